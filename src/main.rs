use anyhow::Result;
use codehelp::cli;

#[tokio::main]
async fn main() -> Result<()> {
    cli::run().await
}
