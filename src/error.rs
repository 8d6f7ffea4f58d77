// error.rs - Error taxonomy for the pipeline

use std::path::{Path, PathBuf};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, AttotreeError>;

/// Everything that can abort a run
#[derive(Debug, Error)]
pub enum AttotreeError {
    /// A delegated engine exited with an unexpected status
    #[error("command failed ({}): {command}{}", describe_status(.status), describe_diagnostics(.diagnostics))]
    ExternalToolFailure {
        command: String,
        /// `None` when the process was terminated by a signal
        status: Option<i32>,
        diagnostics: String,
    },

    /// An intermediate matrix or tree does not have the expected shape
    #[error("malformed file '{}': {message}", .path.display())]
    FormatError { path: PathBuf, message: String },

    #[error("invalid arguments: {0}")]
    ArgumentError(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
}

impl AttotreeError {
    pub fn format(path: &Path, message: impl Into<String>) -> Self {
        AttotreeError::FormatError {
            path: path.to_path_buf(),
            message: message.into(),
        }
    }

    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        AttotreeError::Io {
            context: context.into(),
            source,
        }
    }
}

fn describe_status(status: &Option<i32>) -> String {
    match *status {
        Some(code) => format!("exit code {}", code),
        None => "terminated by signal".to_string(),
    }
}

fn describe_diagnostics(diagnostics: &str) -> String {
    let trimmed = diagnostics.trim();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("\n{}", trimmed)
    }
}
