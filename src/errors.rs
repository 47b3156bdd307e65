//! Error types for ReadHero
//!
//! Library-level failures carry a typed error; the CLI layer wraps them
//! with anyhow context before they reach the user.

use thiserror::Error;

/// Main error type for the trainer
#[derive(Error, Debug)]
pub enum AppError {
    /// Store I/O errors (state directory, record files)
    #[error("Store I/O error: {0}")]
    StoreIo(#[from] std::io::Error),

    /// Record or catalog serialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Text catalog errors
    #[error("Catalog error: {0}")]
    Catalog(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Certificate issuance errors
    #[error("Certificate error: {0}")]
    Certificate(String),
}

/// Result type alias for trainer operations
pub type Result<T> = std::result::Result<T, AppError>;
