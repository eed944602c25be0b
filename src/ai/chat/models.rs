//! The core models for managing a stateful chat with an LLM.
use std::fmt;

use crate::openai::{Message, Role};

/// One message in a conversation tagged with who said it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Turn {
    role: Role,
    content: String,
}

impl Turn {
    pub fn system(content: &str) -> Self {
        Self {
            role: Role::System,
            content: content.to_string(),
        }
    }

    pub fn user(content: &str) -> Self {
        Self {
            role: Role::User,
            content: content.to_string(),
        }
    }

    pub fn assistant(content: &str) -> Self {
        Self {
            role: Role::Assistant,
            content: content.to_string(),
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

impl From<&Turn> for Message {
    fn from(turn: &Turn) -> Self {
        Message::new(turn.role, &turn.content)
    }
}

/// Past turns of a session, excluding the instruction. Only complete
/// user/assistant exchanges can be recorded so a system turn never
/// ends up in here.
#[derive(Default, Debug, Clone)]
pub struct History(Vec<Turn>);

impl History {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    pub fn record_exchange(&mut self, user: &str, assistant: &str) {
        self.0.push(Turn::user(user));
        self.0.push(Turn::assistant(assistant));
    }

    pub fn clear(&mut self) {
        self.0.clear()
    }

    pub fn turns(&self) -> &[Turn] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Turn> {
        self.0.iter()
    }
}

#[derive(clap::ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Model {
    #[default]
    #[value(name = "gpt-4o-mini")]
    Gpt4oMini,
    #[value(name = "gpt-4o")]
    Gpt4o,
    #[value(name = "gpt-3.5-turbo")]
    Gpt35Turbo,
    #[value(name = "gpt-4")]
    Gpt4,
    #[value(name = "gpt-4-turbo-preview")]
    Gpt4TurboPreview,
}

impl Model {
    pub const ALL: [Model; 5] = [
        Model::Gpt4oMini,
        Model::Gpt4o,
        Model::Gpt35Turbo,
        Model::Gpt4,
        Model::Gpt4TurboPreview,
    ];

    /// The identifier the API expects.
    pub fn to_str(&self) -> &'static str {
        match self {
            Model::Gpt4oMini => "gpt-4o-mini",
            Model::Gpt4o => "gpt-4o",
            Model::Gpt35Turbo => "gpt-3.5-turbo",
            Model::Gpt4 => "gpt-4",
            Model::Gpt4TurboPreview => "gpt-4-turbo-preview",
        }
    }
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.to_str())
    }
}

#[derive(clap::ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Language {
    #[default]
    #[value(name = "python")]
    Python,
    #[value(name = "javascript")]
    Javascript,
    #[value(name = "VBS")]
    Vbs,
    #[value(name = "ABAP")]
    Abap,
}

impl Language {
    pub const ALL: [Language; 4] = [
        Language::Python,
        Language::Javascript,
        Language::Vbs,
        Language::Abap,
    ];

    pub fn to_str(&self) -> &'static str {
        match self {
            Language::Python => "python",
            Language::Javascript => "javascript",
            Language::Vbs => "VBS",
            Language::Abap => "ABAP",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.to_str())
    }
}

#[cfg(test)]
mod tests {
    use clap::ValueEnum;

    use super::*;

    #[test]
    fn test_history_records_exchanges_in_order() {
        let mut history = History::new();
        history.record_exchange("print 1+1", "print(1 + 1)");
        history.record_exchange("", "");

        let roles: Vec<Role> = history.iter().map(Turn::role).collect();
        assert_eq!(
            roles,
            vec![Role::User, Role::Assistant, Role::User, Role::Assistant]
        );
        assert_eq!(history.turns()[1].content(), "print(1 + 1)");
        assert_eq!(history.turns()[2].content(), "");
    }

    #[test]
    fn test_history_clear() {
        let mut history = History::new();
        for i in 0..5 {
            history.record_exchange(&format!("q{}", i), &format!("a{}", i));
        }
        assert_eq!(history.len(), 10);

        history.clear();
        assert!(history.is_empty());
    }

    #[test]
    fn test_turn_into_message() {
        let msg = Message::from(&Turn::system("be terse"));
        assert_eq!(msg, Message::new(Role::System, "be terse"));
    }

    #[test]
    fn test_model_value_names_match_api_ids() {
        for model in Model::ALL {
            let parsed = Model::from_str(model.to_str(), false).unwrap();
            assert_eq!(parsed, model);
        }
        assert!(Model::from_str("gpt-5", true).is_err());
    }

    #[test]
    fn test_language_parse_ignores_case() {
        assert_eq!(Language::from_str("vbs", true).unwrap(), Language::Vbs);
        assert_eq!(Language::from_str("Python", true).unwrap(), Language::Python);
        assert_eq!(Language::Abap.to_string(), "ABAP");
        assert!(Language::from_str("rust", true).is_err());
    }
}
