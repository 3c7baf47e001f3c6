//! Destination repository provisioning

use async_trait::async_trait;

use crate::{RepoId, Result};

/// How a failed existence check is interpreted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExistencePolicy {
    /// Anything but 200 means "absent", network faults included
    #[default]
    Lenient,
    /// Only 404 means "absent"; every other failure is an error
    Strict,
}

/// Result of a create request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CreateOutcome {
    /// The host answered 201
    Created,
    /// Any other answer, or no answer at all
    Failed { reason: String },
}

/// Checks for and creates mirror repositories on the destination host
#[async_trait]
pub trait Registrar: Send + Sync {
    /// Whether the mirror repository already exists
    async fn exists(&self, repo: &RepoId) -> Result<bool>;

    /// Create the mirror repository with internal visibility
    ///
    /// Creation failures are reported through [`CreateOutcome::Failed`],
    /// not as errors.
    async fn create(&self, repo: &RepoId) -> Result<CreateOutcome>;
}
