//! Error types for GitHub operations

use thiserror::Error;

/// Result type for GitHub operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during GitHub operations
#[derive(Error, Debug)]
pub enum Error {
    /// Authentication error
    #[error("GitHub authentication error: {0}")]
    Auth(String),

    /// Missing environment variable
    #[error("Missing environment variable: {0}")]
    MissingEnv(String),

    /// Invalid credential or endpoint configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error from the core library
    #[error(transparent)]
    Core(#[from] ghmirror_core::Error),
}
