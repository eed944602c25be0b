use anyhow::anyhow;

use super::connection::Connection;
use super::models::{Model, Turn};
use crate::core::AssistantError;
use crate::openai::{Message, completion};

/// Builds the transcript for the next request: the instruction first,
/// then prior turns, then the new user message. Empty strings are
/// passed through as is.
pub fn compose(instruction: &str, history: &[Turn], message: &str) -> Vec<Turn> {
    let mut turns = Vec::with_capacity(history.len() + 2);
    turns.push(Turn::system(instruction));
    turns.extend_from_slice(history);
    turns.push(Turn::user(message));
    turns
}

/// Sends `turns` to `model` and returns the text of the first choice.
pub async fn fetch_response(
    connection: Option<&Connection>,
    model: Model,
    turns: &[Turn],
) -> Result<String, AssistantError> {
    let Some(connection) = connection else {
        return Err(AssistantError::NotConnected);
    };

    let messages: Vec<Message> = turns.iter().map(Message::from).collect();
    let resp = completion(
        connection.client(),
        &messages,
        connection.api_hostname(),
        connection.api_key(),
        model.to_str(),
    )
    .await
    .map_err(|e| {
        tracing::warn!("Completion request to {} failed: {:#}", model, e);
        AssistantError::remote(e)
    })?;

    resp["choices"][0]["message"]["content"]
        .as_str()
        .map(String::from)
        .ok_or_else(|| AssistantError::remote(anyhow!("No message received. Resp: {}", resp)))
}
