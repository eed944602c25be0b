//! Test utilities for integration tests
use codehelp::ai::chat::{Language, Model};
use codehelp::core::AppConfig;
use mockito::{Mock, ServerGuard};

pub const TEST_API_KEY: &str = "sk-test";

/// Config pointing at a mock server instead of the real API.
pub fn test_config(server: &ServerGuard) -> AppConfig {
    AppConfig {
        openai_api_hostname: server.url(),
        openai_api_key: Some(TEST_API_KEY.to_string()),
        model: Model::Gpt4oMini,
        language: Language::Python,
    }
}

/// Accepts `TEST_API_KEY` on the model listing endpoint.
pub async fn mock_models(server: &mut ServerGuard) -> Mock {
    server
        .mock("GET", "/v1/models")
        .match_header("authorization", format!("Bearer {}", TEST_API_KEY).as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"object":"list","data":[{"id":"gpt-4o-mini","object":"model"}]}"#)
        .create_async()
        .await
}

/// A chat completion response body with a single choice.
pub fn completion_body(content: &str) -> String {
    serde_json::json!({
        "id": "chatcmpl-123",
        "object": "chat.completion",
        "created": 1694268190,
        "model": "gpt-4o-mini",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }]
    })
    .to_string()
}
