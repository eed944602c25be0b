use std::fmt;

use crate::core::AssistantError;
use crate::openai;

/// A credential that the API has accepted, bound to the host it was
/// accepted by. The only way to get one is through `validate`.
pub struct Connection {
    api_hostname: String,
    api_key: String,
    client: reqwest::Client,
}

impl Connection {
    pub fn api_hostname(&self) -> &str {
        &self.api_hostname
    }

    pub(crate) fn api_key(&self) -> &str {
        &self.api_key
    }

    pub(crate) fn client(&self) -> &reqwest::Client {
        &self.client
    }
}

// Never print the key
impl fmt::Debug for Connection {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Connection")
            .field("api_hostname", &self.api_hostname)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

/// Checks `credential` against the API by listing the available
/// models. Every call probes again, nothing is cached.
pub async fn validate(credential: &str, api_hostname: &str) -> Result<Connection, AssistantError> {
    if credential.is_empty() {
        return Err(AssistantError::MissingCredential);
    }

    let client = openai::http_client().map_err(AssistantError::connection)?;
    let models = openai::list_models(&client, api_hostname, credential)
        .await
        .map_err(|e| {
            tracing::warn!("Credential validation against {} failed: {:#}", api_hostname, e);
            AssistantError::connection(e)
        })?;

    tracing::debug!(
        "Credential accepted by {} ({} models available)",
        api_hostname,
        models["data"].as_array().map(|m| m.len()).unwrap_or(0)
    );

    Ok(Connection {
        api_hostname: api_hostname.to_string(),
        api_key: credential.to_string(),
        client,
    })
}

#[cfg(test)]
mod tests {
    use serial_test::serial;

    use super::*;

    #[tokio::test]
    #[serial]
    async fn test_empty_credential_never_probes() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/v1/models")
            .expect(0)
            .create_async()
            .await;

        let result = validate("", &server.url()).await;

        mock.assert_async().await;
        assert_eq!(result.unwrap_err(), AssistantError::MissingCredential);
    }

    #[tokio::test]
    #[serial]
    async fn test_accepted_credential() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/v1/models")
            .match_header("authorization", "Bearer sk-good")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"object":"list","data":[{"id":"gpt-4o"},{"id":"gpt-4o-mini"}]}"#)
            .create_async()
            .await;

        let connection = validate("sk-good", &server.url()).await.unwrap();

        mock.assert_async().await;
        assert_eq!(connection.api_hostname(), server.url());
        assert_eq!(connection.api_key(), "sk-good");
    }

    #[tokio::test]
    #[serial]
    async fn test_rejected_credential() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/v1/models")
            .with_status(401)
            .with_header("content-type", "application/json")
            .with_body(r#"{"error":{"message":"Incorrect API key provided: sk-bad"}}"#)
            .create_async()
            .await;

        let err = validate("sk-bad", &server.url()).await.unwrap_err();

        match err {
            AssistantError::ConnectionError(cause) => {
                assert!(cause.contains("Incorrect API key provided"));
            }
            other => panic!("Expected ConnectionError, got {:?}", other),
        }
    }

    #[tokio::test]
    #[serial]
    async fn test_unreachable_host() {
        // Nothing listens on port 1
        let err = validate("sk-good", "http://127.0.0.1:1").await.unwrap_err();
        match err {
            AssistantError::ConnectionError(cause) => assert!(!cause.is_empty()),
            other => panic!("Expected ConnectionError, got {:?}", other),
        }
    }

    #[tokio::test]
    #[serial]
    async fn test_debug_redacts_key() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/v1/models")
            .with_status(200)
            .with_body(r#"{"data":[]}"#)
            .create_async()
            .await;

        let connection = validate("sk-secret", &server.url()).await.unwrap();
        let debug = format!("{:?}", connection);
        assert!(!debug.contains("sk-secret"));
        assert!(debug.contains("<redacted>"));
    }

    #[tokio::test]
    #[serial]
    async fn test_malformed_credential() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/v1/models")
            .expect(0)
            .create_async()
            .await;

        // A newline can't go in an Authorization header
        let err = validate("sk-\nbad", &server.url()).await.unwrap_err();

        mock.assert_async().await;
        match err {
            AssistantError::ConnectionError(cause) => assert!(!cause.is_empty()),
            other => panic!("Expected ConnectionError, got {:?}", other),
        }
    }
}
