//! Error types for terminal output.

use thiserror::Error;

/// Errors raised while rendering spinners, key-value rows, or tables.
#[derive(Error, Debug)]
pub enum TuiError {
    #[error("expected even number of key-value pairs, got {count}")]
    MalformedFields { count: usize },

    #[error("no terminal attached")]
    TerminalUnavailable,

    #[error("invalid spinner: {reason}")]
    InvalidSpinner { reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<figment::Error> for TuiError {
    fn from(e: figment::Error) -> Self {
        TuiError::Config(e.to_string())
    }
}

pub type TuiResult<T> = Result<T, TuiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_fields_message() {
        let err = TuiError::MalformedFields { count: 3 };
        assert_eq!(
            err.to_string(),
            "expected even number of key-value pairs, got 3"
        );
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe closed");
        let err: TuiError = io.into();
        assert!(matches!(err, TuiError::Io(_)));
        assert!(err.to_string().contains("pipe closed"));
    }
}
