//! Per-user session state. One `Session` is created when the surface
//! starts and dropped when it exits; it is never shared.

use super::connection::{Connection, validate};
use super::core::{compose, fetch_response};
use super::models::{History, Language, Model};
use crate::ai::prompt;
use crate::core::{AppConfig, AssistantError};

pub const VALIDATED_MESSAGE: &str = "API key validated successfully!";

#[derive(Debug)]
pub struct Session {
    api_hostname: String,
    connection: Option<Connection>,
    history: History,
    model: Model,
    language: Language,
}

impl Session {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            api_hostname: config.openai_api_hostname.clone(),
            connection: None,
            history: History::new(),
            model: config.model,
            language: config.language,
        }
    }

    /// Validates `credential` and keeps the resulting connection. A
    /// failed attempt drops whatever connection was held before.
    pub async fn validate(&mut self, credential: &str) -> Result<&'static str, AssistantError> {
        self.connection = None;
        let connection = validate(credential, &self.api_hostname).await?;
        self.connection = Some(connection);
        Ok(VALIDATED_MESSAGE)
    }

    pub fn is_validated(&self) -> bool {
        self.connection.is_some()
    }

    pub fn model(&self) -> Model {
        self.model
    }

    pub fn set_model(&mut self, model: Model) {
        self.model = model;
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn set_language(&mut self, language: Language) {
        self.language = language;
    }

    /// The instruction sent ahead of every request for the current
    /// language.
    pub fn instruction(&self) -> Result<String, AssistantError> {
        prompt::instruction(self.language).map_err(|e| AssistantError::Template(e.to_string()))
    }

    /// Sends `message` along with the history. The exchange is only
    /// recorded when a response comes back.
    pub async fn submit(&mut self, message: &str) -> Result<String, AssistantError> {
        let instruction = self.instruction()?;
        let turns = compose(&instruction, self.history.turns(), message);
        let response = fetch_response(self.connection.as_ref(), self.model, &turns).await?;
        self.history.record_exchange(message, &response);
        Ok(response)
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }
}
