use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub mod ask;
pub mod chat;
pub mod validate;

use crate::ai::chat::{Language, Model};
use crate::core::AppConfig;

#[derive(Args, Clone, Debug, Default)]
pub struct SessionArgs {
    /// API key, falls back to OPENAI_API_KEY
    #[arg(long)]
    api_key: Option<String>,

    #[arg(long, value_enum, ignore_case = true)]
    model: Option<Model>,

    #[arg(long, value_enum, ignore_case = true)]
    language: Option<Language>,
}

impl SessionArgs {
    /// Applies command line overrides on top of the environment.
    fn apply(self, mut config: AppConfig) -> AppConfig {
        if let Some(api_key) = self.api_key {
            config.openai_api_key = Some(api_key);
        }
        if let Some(model) = self.model {
            config.model = model;
        }
        if let Some(language) = self.language {
            config.language = language;
        }
        config
    }
}

#[derive(Subcommand)]
enum Command {
    /// Check an API key against the API
    Validate {
        /// API key, falls back to OPENAI_API_KEY
        #[arg(long)]
        api_key: Option<String>,
    },
    /// Ask a single question and print the answer
    Ask {
        #[command(flatten)]
        session: SessionArgs,

        #[arg(required = true, num_args = 1..)]
        message: Vec<String>,
    },
    /// Start an interactive coding assistant session
    Chat {
        #[command(flatten)]
        session: SessionArgs,
    },
    /// List the models that can be selected
    Models {},
    /// List the programming languages that can be selected
    Languages {},
}

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

/// Wraps a response in a fenced code block tagged with `language`.
pub fn code_block(text: &str, language: Language) -> String {
    format!("```{}\n{}\n```", language.to_str().to_lowercase(), text.trim_end())
}

pub async fn run() -> Result<()> {
    let args = Cli::parse();

    // Logs go to stderr so answers on stdout stay clean
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("{}=warn", env!("CARGO_CRATE_NAME")).into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = AppConfig::default();

    // Handle each sub command
    match args.command {
        Some(Command::Validate { api_key }) => {
            let args = SessionArgs {
                api_key,
                ..Default::default()
            };
            validate::run(args.apply(config)).await?;
        }
        Some(Command::Ask { session, message }) => {
            ask::run(session.apply(config), &message.join(" ")).await?;
        }
        Some(Command::Chat { session }) => {
            chat::run(session.apply(config)).await?;
        }
        Some(Command::Models {}) => {
            for model in Model::ALL {
                println!("{}", model);
            }
        }
        Some(Command::Languages {}) => {
            for language in Language::ALL {
                println!("{}", language);
            }
        }
        None => {}
    }

    Ok(())
}
