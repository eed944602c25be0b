use std::env;

use clap::ValueEnum;

use crate::ai::chat::models::{Language, Model};

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub openai_api_hostname: String,
    pub openai_api_key: Option<String>,
    pub model: Model,
    pub language: Language,
}

impl AppConfig {
    /// Builds the config from a variable lookup. `Default` uses the
    /// process environment.
    pub fn from_lookup<F>(get: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let openai_api_hostname =
            get("CODEHELP_API_HOST").unwrap_or_else(|| "https://api.openai.com".to_string());
        let openai_api_key = get("OPENAI_API_KEY").filter(|k| !k.is_empty());
        let model = get("CODEHELP_MODEL")
            .and_then(|v| parse_choice::<Model>("CODEHELP_MODEL", &v))
            .unwrap_or_default();
        let language = get("CODEHELP_LANGUAGE")
            .and_then(|v| parse_choice::<Language>("CODEHELP_LANGUAGE", &v))
            .unwrap_or_default();

        Self {
            openai_api_hostname,
            openai_api_key,
            model,
            language,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }
}

fn parse_choice<T: ValueEnum>(var: &str, value: &str) -> Option<T> {
    T::from_str(value, true)
        .inspect_err(|e| tracing::warn!("Ignoring {}={}: {}", var, value, e))
        .ok()
}
