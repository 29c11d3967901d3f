//! Diagnostic channel setup.
//!
//! Failed exchanges are reported here and never in the conversation view.
//! The interactive session owns the terminal, so its diagnostics go to a
//! file; the one-shot `say` command writes them to stderr unless `--log`
//! names a file.

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::{fmt, EnvFilter};

/// Environment variable holding an `EnvFilter` directive.
pub const LOG_FILTER_ENV: &str = "FORMCHAT_LOG";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiagnosticTarget {
    File(PathBuf),
    Stderr,
}

impl DiagnosticTarget {
    fn default_directive(&self) -> &'static str {
        match self {
            DiagnosticTarget::File(_) => "info",
            DiagnosticTarget::Stderr => "warn",
        }
    }
}

fn build_filter(target: &DiagnosticTarget) -> EnvFilter {
    EnvFilter::try_from_env(LOG_FILTER_ENV)
        .unwrap_or_else(|_| EnvFilter::new(target.default_directive()))
}

/// Install the global subscriber. Calling this twice keeps the first
/// subscriber and returns an error.
pub fn init_diagnostics(target: &DiagnosticTarget) -> Result<(), Box<dyn std::error::Error>> {
    let filter = build_filter(target);

    let installed = match target {
        DiagnosticTarget::File(path) => {
            let file = open_log_file(path)?;
            fmt()
                .with_env_filter(filter)
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .with_target(false)
                .try_init()
        }
        DiagnosticTarget::Stderr => fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .without_time()
            .try_init(),
    };

    installed.map_err(|err| err as Box<dyn std::error::Error>)
}

/// Open the log file for appending, creating parent directories as needed.
pub fn open_log_file(path: &Path) -> std::io::Result<fs::File> {
    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;

    #[test]
    fn open_log_file_creates_missing_directories() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("nested").join("deeper").join("formchat.log");

        let mut file = open_log_file(&path).expect("open log");
        writeln!(file, "first").unwrap();
        drop(file);

        let mut again = open_log_file(&path).expect("reopen log");
        writeln!(again, "second").unwrap();
        drop(again);

        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(contents, "first\nsecond\n");
    }

    #[test]
    fn default_levels_depend_on_target() {
        assert_eq!(
            DiagnosticTarget::File(PathBuf::from("x.log")).default_directive(),
            "info"
        );
        assert_eq!(DiagnosticTarget::Stderr.default_directive(), "warn");
    }
}
