//! TUI-less "say" command

use std::error::Error;

use tracing::error;

use crate::core::chat_transport::{ChatTransport, HttpTransport};
use crate::core::config::ChatSettings;
use crate::utils::input::trim_submission;

/// Join the words of a one-shot prompt; `None` when nothing is left after
/// trimming.
pub fn prepare_prompt(words: &[String]) -> Option<String> {
    let prompt = words.join(" ");
    let trimmed = trim_submission(&prompt);
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

pub async fn run_say(words: Vec<String>, settings: ChatSettings) -> Result<(), Box<dyn Error>> {
    let Some(prompt) = prepare_prompt(&words) else {
        eprintln!("Usage: formchat say <prompt>");
        std::process::exit(1);
    };

    let transport = HttpTransport::new(settings.endpoint);
    match say_once(&transport, &prompt).await {
        Some(reply) => {
            println!("{reply}");
            Ok(())
        }
        None => std::process::exit(1),
    }
}

/// One exchange without a terminal UI. Failures go to the diagnostic
/// channel and yield `None`.
pub async fn say_once(transport: &dyn ChatTransport, prompt: &str) -> Option<String> {
    match transport.send(prompt).await {
        Ok(reply) => Some(reply),
        Err(err) => {
            error!(endpoint = %transport.describe(), error = %err, "chat exchange failed");
            None
        }
    }
}
