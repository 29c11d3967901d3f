//! Command-line interface parsing and handling
//!
//! This module handles parsing command-line arguments and executing the appropriate commands.

pub mod say;


use std::error::Error;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::cli::say::run_say;
use crate::core::config::data::ConfigKey;
use crate::core::config::{resolve_settings, Config, SettingsOverrides};
use crate::ui::chat_loop::run_chat;
use crate::utils::logging::{init_diagnostics, DiagnosticTarget};
use crate::utils::url::parse_endpoint;

#[derive(Parser)]
#[command(name = "formchat", version)]
#[command(about = "A terminal chat client for form-encoded /chat endpoints")]
#[command(
    long_about = "formchat is a full-screen terminal chat client. Each message you send is \
posted to the chat endpoint as form data (message=<text>), and the endpoint's JSON \
{\"response\": ...} reply is shown underneath it.\n\n\
Environment Variables:\n\
  FORMCHAT_ENDPOINT   Chat endpoint URL (overridden by --endpoint)\n\
  FORMCHAT_LOG        Diagnostic filter, e.g. \"debug\" (defaults to info)\n\n\
Controls:\n\
  Type              Enter your message in the input field\n\
  Enter             Send the message\n\
  Up/Down/PgUp/PgDn Scroll through the conversation\n\
  Ctrl+End          Jump back to the newest message\n\
  Ctrl+U / Ctrl+W   Clear the input / delete the previous word\n\
  Esc or Ctrl+C     Quit the application"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Chat endpoint URL
    #[arg(short = 'e', long, global = true, value_name = "URL")]
    pub endpoint: Option<String>,

    /// Write diagnostics to this file
    #[arg(short = 'l', long, global = true, value_name = "FILE")]
    pub log: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the chat interface (default)
    Chat,
    /// Send one message and print the reply
    Say {
        /// Message text (multiple words are joined with spaces)
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        prompt: Vec<String>,
    },
    /// Set configuration values
    Set {
        /// Configuration key to set (endpoint, log-file)
        key: String,
        /// Value to set for the key
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        value: Option<Vec<String>>,
    },
    /// Unset configuration values
    Unset {
        /// Configuration key to unset
        key: String,
    },
}

/// What `set` should do once its arguments are checked.
#[derive(Debug, PartialEq, Eq)]
pub(crate) enum SetOutcome {
    PrintAll,
    Updated { key: ConfigKey, value: String },
}

pub(crate) fn apply_set(
    config: &mut Config,
    key: &str,
    value: Option<&[String]>,
) -> Result<SetOutcome, String> {
    let key = ConfigKey::parse(key).ok_or_else(|| format!("Unknown config key: {key}"))?;
    let value = match value {
        Some(parts) if !parts.is_empty() => parts.join(" "),
        _ => return Ok(SetOutcome::PrintAll),
    };

    let value = match key {
        ConfigKey::Endpoint => parse_endpoint(&value)
            .map(|url| url.to_string())
            .map_err(|reason| format!("Invalid endpoint '{value}': {reason}"))?,
        ConfigKey::LogFile => value,
    };

    config.set(key, value.clone());
    Ok(SetOutcome::Updated { key, value })
}

pub(crate) fn apply_unset(config: &mut Config, key: &str) -> Result<ConfigKey, String> {
    let key = ConfigKey::parse(key).ok_or_else(|| format!("Unknown config key: {key}"))?;
    config.unset(key);
    Ok(key)
}

pub fn main() -> Result<(), Box<dyn Error>> {
    tokio::runtime::Runtime::new()?.block_on(async_main())
}

fn load_config_or_exit() -> Config {
    match Config::load() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("❌ {err}");
            std::process::exit(1);
        }
    }
}

async fn async_main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    match args.command.unwrap_or(Commands::Chat) {
        Commands::Chat => {
            let config = load_config_or_exit();
            let overrides = SettingsOverrides::from_env(args.endpoint, args.log);
            let settings = match resolve_settings(&config, &overrides) {
                Ok(settings) => settings,
                Err(err) => {
                    eprintln!("❌ {err}");
                    std::process::exit(1);
                }
            };

            let log_path = match settings.log_file.clone() {
                Some(path) => path,
                None => Config::default_log_path()?,
            };
            init_diagnostics(&DiagnosticTarget::File(log_path))?;

            if let Err(err) = run_chat(settings).await {
                eprintln!("❌ {err}");
                std::process::exit(1);
            }
            Ok(())
        }
        Commands::Say { prompt } => {
            let config = load_config_or_exit();
            let log_flag = args.log.clone();
            let overrides = SettingsOverrides::from_env(args.endpoint, args.log);
            let settings = match resolve_settings(&config, &overrides) {
                Ok(settings) => settings,
                Err(err) => {
                    eprintln!("❌ {err}");
                    std::process::exit(1);
                }
            };

            // Only an explicit --log moves one-shot diagnostics off stderr.
            let target = match log_flag {
                Some(path) => DiagnosticTarget::File(path),
                None => DiagnosticTarget::Stderr,
            };
            init_diagnostics(&target)?;

            run_say(prompt, settings).await
        }
        Commands::Set { key, value } => {
            let mut config = load_config_or_exit();
            match apply_set(&mut config, &key, value.as_deref()) {
                Ok(SetOutcome::PrintAll) => config.print_all(),
                Ok(SetOutcome::Updated { key, value }) => {
                    config.save()?;
                    println!("✅ Set {} to: {value}", key.as_str());
                }
                Err(message) => {
                    eprintln!("❌ {message}");
                    std::process::exit(1);
                }
            }
            Ok(())
        }
        Commands::Unset { key } => {
            let mut config = load_config_or_exit();
            match apply_unset(&mut config, &key) {
                Ok(key) => {
                    config.save()?;
                    println!("✅ Unset {}", key.as_str());
                }
                Err(message) => {
                    eprintln!("❌ {message}");
                    std::process::exit(1);
                }
            }
            Ok(())
        }
    }
}
