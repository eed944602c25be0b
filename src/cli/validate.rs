use anyhow::Result;

use crate::ai::chat::Session;
use crate::core::AppConfig;

/// Prints the success message, or returns the failure so the process
/// exits non-zero.
pub async fn run(config: AppConfig) -> Result<()> {
    let mut session = Session::new(&config);
    let api_key = config.openai_api_key.unwrap_or_default();
    let msg = session.validate(&api_key).await?;
    println!("{}", msg);
    Ok(())
}
