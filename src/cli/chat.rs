use std::ops::ControlFlow;

use anyhow::Result;
use clap::ValueEnum;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use super::code_block;
use crate::ai::chat::{Language, Model, Session};
use crate::core::AppConfig;
use crate::openai::Role;

const HELP: &str = r"Type code or a question and press enter. End a line with \ to keep typing.

Commands:
  /validate [KEY]   validate an API key (defaults to the configured key)
  /model [MODEL]    show or change the model
  /language [LANG]  show or change the programming language
  /history          show the conversation so far
  /clear            clear the conversation
  /help             show this message
  /quit             exit

Lines starting with / that aren't one of these commands are sent as messages.";

const NOT_VALIDATED: &str = "Please enter and validate your API key to use the application.";

#[derive(Debug, PartialEq)]
enum Input {
    Validate(Option<String>),
    Model(Option<String>),
    Language(Option<String>),
    History,
    Clear,
    Help,
    Quit,
    Message(String),
}

/// Commands are only recognized on single line input. Anything else
/// starting with `/`, such as a path or `// comment`, is a message.
fn parse_input(input: &str) -> Input {
    let trimmed = input.trim();
    if input.contains('\n') {
        return Input::Message(input.to_string());
    }
    let Some(rest) = trimmed.strip_prefix('/') else {
        return Input::Message(input.to_string());
    };

    let (command, arg) = match rest.split_once(char::is_whitespace) {
        Some((command, arg)) => {
            let arg = arg.trim();
            (command, (!arg.is_empty()).then(|| arg.to_string()))
        }
        None => (rest, None),
    };

    match command {
        "validate" => Input::Validate(arg),
        "model" => Input::Model(arg),
        "language" | "lang" => Input::Language(arg),
        "history" => Input::History,
        "clear" => Input::Clear,
        "help" => Input::Help,
        "quit" | "exit" => Input::Quit,
        _ => Input::Message(input.to_string()),
    }
}

/// Accumulates `line` into `buffer`. Returns the complete input once a
/// line doesn't end in a backslash.
fn continue_input(buffer: &mut String, line: &str) -> Option<String> {
    if let Some(partial) = line.strip_suffix('\\') {
        buffer.push_str(partial);
        buffer.push('\n');
        return None;
    }
    buffer.push_str(line);
    Some(std::mem::take(buffer))
}

fn choices<T: ValueEnum>() -> String {
    T::value_variants()
        .iter()
        .filter_map(|v| v.to_possible_value())
        .map(|v| v.get_name().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

async fn handle(session: &mut Session, config: &AppConfig, input: Input) -> ControlFlow<()> {
    match input {
        Input::Validate(key) => {
            let key = key.or_else(|| config.openai_api_key.clone()).unwrap_or_default();
            match session.validate(&key).await {
                Ok(msg) => println!("{}", msg),
                Err(e) => println!("{}", e),
            }
        }
        Input::Model(None) => {
            println!("Model: {} (available: {})", session.model(), choices::<Model>());
        }
        Input::Model(Some(name)) => match Model::from_str(&name, true) {
            Ok(model) => {
                session.set_model(model);
                println!("Model set to {}", model);
            }
            Err(_) => println!("Unknown model `{}`. Choose one of: {}", name, choices::<Model>()),
        },
        Input::Language(None) => {
            println!(
                "Language: {} (available: {})",
                session.language(),
                choices::<Language>()
            );
        }
        Input::Language(Some(name)) => match Language::from_str(&name, true) {
            Ok(language) => {
                session.set_language(language);
                println!("Language set to {}", language);
            }
            Err(_) => println!(
                "Unknown language `{}`. Choose one of: {}",
                name,
                choices::<Language>()
            ),
        },
        Input::History => {
            if session.history().is_empty() {
                println!("No messages yet.");
            }
            for turn in session.history().iter() {
                let speaker = match turn.role() {
                    Role::User => "you",
                    Role::Assistant => "assistant",
                    Role::System => "system",
                };
                println!("[{}]\n{}\n", speaker, turn.content());
            }
        }
        Input::Clear => {
            session.clear_history();
            println!("Chat memory cleared!");
        }
        Input::Help => println!("{}", HELP),
        Input::Quit => return ControlFlow::Break(()),
        Input::Message(message) => {
            if message.trim().is_empty() {
                return ControlFlow::Continue(());
            }
            if !session.is_validated() {
                println!("{}", NOT_VALIDATED);
                return ControlFlow::Continue(());
            }
            match session.submit(&message).await {
                Ok(response) => println!("{}", code_block(&response, session.language())),
                Err(e) => println!("{}", e),
            }
        }
    }
    ControlFlow::Continue(())
}

pub async fn run(config: AppConfig) -> Result<()> {
    let mut rl = DefaultEditor::new()?;
    let mut session = Session::new(&config);

    println!(
        "Coding assistant using {} for {}. Type /help for commands.",
        session.model(),
        session.language()
    );
    match &config.openai_api_key {
        Some(key) => match session.validate(key).await {
            Ok(msg) => println!("{}", msg),
            Err(e) => println!("{}", e),
        },
        None => println!("{}", NOT_VALIDATED),
    }

    let mut buffer = String::new();
    loop {
        let prompt = if buffer.is_empty() { ">>> " } else { "... " };
        let readline = rl.readline(prompt);
        match readline {
            Ok(line) => {
                let Some(input) = continue_input(&mut buffer, &line) else {
                    continue;
                };
                if !input.trim().is_empty() {
                    let _ = rl.add_history_entry(input.as_str());
                }
                if handle(&mut session, &config, parse_input(&input)).await.is_break() {
                    break;
                }
            }
            // Ctrl-C abandons a multi-line message before exiting
            Err(ReadlineError::Interrupted) if !buffer.is_empty() => buffer.clear(),
            Err(ReadlineError::Interrupted) => break,
            Err(ReadlineError::Eof) => break,
            Err(err) => {
                println!("Error: {:?}", err);
                break;
            }
        }
    }

    Ok(())
}
