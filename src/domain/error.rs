// Error taxonomy for the analysis core
use thiserror::Error;

/// Errors surfaced by the analysis core. All of them are recoverable at the
/// presentation boundary; none are fatal to the running process.
#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("CSV line {line}: {message}")]
    Parse { line: u64, message: String },

    #[error("invalid profile: {message}")]
    Validation { message: String },

    #[error("profile not found: {name}")]
    NotFound { name: String },
}

impl TelemetryError {
    pub fn parse(line: u64, message: impl Into<String>) -> Self {
        Self::Parse {
            line,
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound { name: name.into() }
    }
}

pub type TelemetryResult<T> = Result<T, TelemetryError>;
