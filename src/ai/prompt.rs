//! Reusable prompts using Handlebars for templating. Strict mode is
//! on so a template referencing a missing field fails to render
//! instead of silently producing a blank.

use std::fmt;
use std::sync::LazyLock;

use handlebars::{Handlebars, RenderError};
use serde_json::json;

use crate::ai::chat::models::Language;

#[derive(Debug)]
pub enum Prompt {
    Instruction,
}

impl fmt::Display for Prompt {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

const INSTRUCTION_PROMPT: &str = "You are an expert {{upper}} programmer assisting with code development. \
All responses must be valid {{name}} code snippets. \
Identify and correct any syntax errors or logical issues in the code provided. \
Explain any changes or improvements using comments in proper {{upper}} style. \
Exclude explanations outside of code comments.";

static TEMPLATES: LazyLock<Handlebars<'static>> = LazyLock::new(templates);

pub fn templates<'a>() -> Handlebars<'a> {
    let mut registry = Handlebars::new();
    registry.set_strict_mode(true);
    // Plain text prompts, not HTML
    registry.register_escape_fn(handlebars::no_escape);
    registry
        .register_template_string(&Prompt::Instruction.to_string(), INSTRUCTION_PROMPT)
        .expect("Failed to register template");
    registry
}

/// Renders the system instruction steering responses towards
/// `language` code.
pub fn instruction(language: Language) -> Result<String, RenderError> {
    let name = language.to_str();
    TEMPLATES.render(
        &Prompt::Instruction.to_string(),
        &json!({"name": name, "upper": name.to_uppercase()}),
    )
}
