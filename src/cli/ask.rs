use anyhow::Result;

use super::code_block;
use crate::ai::chat::Session;
use crate::core::AppConfig;

/// Validates, submits `message` once and prints the answer. Any
/// failure is returned so the process exits non-zero with the message
/// on stderr.
pub async fn run(config: AppConfig, message: &str) -> Result<()> {
    let mut session = Session::new(&config);
    let api_key = config.openai_api_key.unwrap_or_default();
    session.validate(&api_key).await?;

    let response = session.submit(message).await?;
    println!("{}", code_block(&response, session.language()));
    Ok(())
}
