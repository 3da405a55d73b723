//! Error types for the orrery engine.

use thiserror::Error;

/// Main error type for engine configuration and startup.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration values that cannot be used
    #[error("Config error: {0}")]
    Config(String),

    /// IO errors while reading configuration or scene files
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed JSON configuration
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Result type alias using the engine's Error type.
pub type Result<T> = std::result::Result<T, Error>;
