use thiserror::Error;

/// Top-level error type for circuit loading, rendering and validation.
#[derive(Debug, Error)]
pub enum CircuitError {
    #[error("invalid circuit document: {0}")]
    InvalidDocument(String),

    #[error("unsupported output format: {0}")]
    UnsupportedFormat(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("configuration error: {0}")]
    Config(String),
}

impl From<config::ConfigError> for CircuitError {
    fn from(err: config::ConfigError) -> Self {
        CircuitError::Config(err.to_string())
    }
}
