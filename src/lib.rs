//! A terminal coding assistant backed by an OpenAI compatible chat
//! completion API.
pub mod ai;
pub mod cli;
pub mod core;
pub mod openai;
