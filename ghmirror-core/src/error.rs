//! Error types for ghmirror

use thiserror::Error;

use crate::RepoId;

/// Result type alias for ghmirror operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for ghmirror operations
#[derive(Error, Debug)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Command-line options do not describe a runnable job
    #[error("{0}")]
    Usage(String),

    /// Missing environment variable
    #[error("Missing environment variable: {0}")]
    MissingEnv(String),

    /// Repository identifier is not of the form owner/name
    #[error("Invalid repository '{0}'. Expected owner/name")]
    InvalidRepo(String),

    /// Batch file could not be read
    #[error("CSV error at row {row}: {reason}")]
    Csv { row: usize, reason: String },

    /// `git clone --bare` failed
    #[error("Failed to clone {repo}: {message}")]
    Clone { repo: RepoId, message: String },

    /// Mirror existence check failed (strict mode only)
    #[error("Failed to check whether mirror {repo} exists: {reason}")]
    ExistenceCheck { repo: RepoId, reason: String },

    /// Mirror repository could not be created (strict mode only)
    #[error("Failed to create mirror {repo}: {reason}")]
    CreateFailed { repo: RepoId, reason: String },

    /// `git push --mirror` failed
    #[error("Failed to push mirror {repo}: {message}")]
    Push { repo: RepoId, message: String },

    /// A batch stopped at the given (1-based) row
    #[error("Batch aborted at row {row}: {source}")]
    BatchAborted {
        row: usize,
        #[source]
        source: Box<Error>,
    },

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Short name of the error variant, used in batch reports
    pub fn kind(&self) -> &'static str {
        match self {
            Error::Io(_) => "io",
            Error::Config(_) => "config",
            Error::Usage(_) => "usage",
            Error::MissingEnv(_) => "missing-env",
            Error::InvalidRepo(_) => "invalid-repo",
            Error::Csv { .. } => "csv",
            Error::Clone { .. } => "clone",
            Error::ExistenceCheck { .. } => "existence-check",
            Error::CreateFailed { .. } => "create",
            Error::Push { .. } => "push",
            Error::BatchAborted { source, .. } => source.kind(),
            Error::Other(_) => "other",
        }
    }
}
