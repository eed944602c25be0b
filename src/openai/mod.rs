//! Minimal client for an OpenAI compatible chat completion API.
mod core;

pub use self::core::*;
