//! Git operations for ghmirror
//!
//! This module provides the per-job clone workspace, the subprocess
//! transport for bare clones and mirror pushes, and ref inspection.

mod refs;
mod transport;
mod workspace;

pub use refs::list_refs;
pub use transport::{GitCli, GitTransport};
pub use workspace::Workspace;
