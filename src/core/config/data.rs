use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Endpoint used when neither the command line, the environment nor the
/// config file name one.
pub const DEFAULT_ENDPOINT: &str = "http://127.0.0.1:8080/chat";

/// Environment variable overriding the configured endpoint.
pub const ENDPOINT_ENV: &str = "FORMCHAT_ENDPOINT";

#[derive(Debug, Serialize, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct Config {
    /// Absolute URL of the chat endpoint (e.g., "http://127.0.0.1:8080/chat")
    pub endpoint: Option<String>,
    /// Where interactive sessions write diagnostics
    pub log_file: Option<PathBuf>,
}

/// Keys accepted by `formchat set` and `formchat unset`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    Endpoint,
    LogFile,
}

impl ConfigKey {
    pub const ALL: [ConfigKey; 2] = [ConfigKey::Endpoint, ConfigKey::LogFile];

    pub fn parse(key: &str) -> Option<Self> {
        match key {
            "endpoint" => Some(ConfigKey::Endpoint),
            "log-file" | "log_file" => Some(ConfigKey::LogFile),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ConfigKey::Endpoint => "endpoint",
            ConfigKey::LogFile => "log-file",
        }
    }
}

impl Config {
    pub fn set(&mut self, key: ConfigKey, value: String) {
        match key {
            ConfigKey::Endpoint => self.endpoint = Some(value),
            ConfigKey::LogFile => self.log_file = Some(PathBuf::from(value)),
        }
    }

    pub fn unset(&mut self, key: ConfigKey) {
        match key {
            ConfigKey::Endpoint => self.endpoint = None,
            ConfigKey::LogFile => self.log_file = None,
        }
    }

    pub fn display_value(&self, key: ConfigKey) -> Option<String> {
        match key {
            ConfigKey::Endpoint => self.endpoint.clone(),
            ConfigKey::LogFile => self.log_file.as_ref().map(path_display),
        }
    }
}

/// Get a user-friendly display string for a path
/// Converts absolute paths to use ~ notation on Unix-like systems when possible
///
/// # Examples
/// - Unix: `/home/user/.local/share/formchat/formchat.log` → `~/.local/share/formchat/formchat.log`
/// - Windows: paths are shown unchanged
pub fn path_display<P: AsRef<Path>>(path: P) -> String {
    let path = path.as_ref();

    #[cfg(unix)]
    {
        if let Some(home) = std::env::var_os("HOME") {
            let home_path = PathBuf::from(home);
            if let Ok(relative) = path.strip_prefix(&home_path) {
                return format!("~/{}", relative.display());
            }
        }
    }

    path.display().to_string()
}
