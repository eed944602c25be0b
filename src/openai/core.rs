use std::time::Duration;

use anyhow::{Error, Result, bail};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Upper bound on a single round trip to the API. Not user configurable.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60 * 5);

#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub enum Role {
    #[serde(rename = "system")]
    System,
    #[serde(rename = "assistant")]
    Assistant,
    #[serde(rename = "user")]
    User,
}

#[derive(Clone, Serialize, Deserialize, Debug, PartialEq)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn new(role: Role, content: &str) -> Self {
        Message {
            role,
            content: content.to_string(),
        }
    }
}

pub fn http_client() -> Result<reqwest::Client, Error> {
    let client = reqwest::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()?;
    Ok(client)
}

// OpenAI returns errors in the shape `{"error": {"message": "..."}}`
// so pull out the message when there is one rather than surfacing
// only the status code.
async fn error_for_status(response: reqwest::Response) -> Result<reqwest::Response, Error> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let detail = serde_json::from_str::<Value>(&body)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(String::from))
        .unwrap_or(body);

    if detail.is_empty() {
        bail!("{}", status);
    }
    bail!("{}: {}", status, detail);
}

/// Lists the models available to `api_key`. Used as a cheap probe to
/// confirm the key is accepted.
pub async fn list_models(
    client: &reqwest::Client,
    api_hostname: &str,
    api_key: &str,
) -> Result<Value, Error> {
    let url = format!("{}/v1/models", api_hostname.trim_end_matches("/"));
    tracing::debug!("Probing {}", url);
    let response = client.get(url).bearer_auth(api_key).send().await?;
    let response = error_for_status(response).await?.json().await?;

    Ok(response)
}

pub async fn completion(
    client: &reqwest::Client,
    messages: &[Message],
    api_hostname: &str,
    api_key: &str,
    model: &str,
) -> Result<Value, Error> {
    let payload = json!({
        "model": model,
        "messages": messages,
    });
    let url = format!("{}/v1/chat/completions", api_hostname.trim_end_matches("/"));
    tracing::debug!("Requesting completion from {} with {} messages", model, messages.len());
    let response = client
        .post(url)
        .bearer_auth(api_key)
        .header("Content-Type", "application/json")
        .json(&payload)
        .send()
        .await?;
    let response = error_for_status(response).await?.json().await?;

    Ok(response)
}
