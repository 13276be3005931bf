//! Error types for vitrine.

use thiserror::Error;

/// Result type alias using vitrine's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for vitrine operations.
///
/// Data-shape problems (absent properties, wrong value types, empty lists)
/// are not errors anywhere in the engine; they resolve to "no value". This
/// type covers the narrow cases that are genuinely fatal to a caller:
/// unreadable persisted data and invalid enum literals.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}
