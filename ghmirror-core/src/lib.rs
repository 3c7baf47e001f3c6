//! ghmirror Core - Core library for mirroring repositories into GitHub Enterprise
//!
//! This crate provides the pieces of a mirror run that do not talk to the
//! GitHub API: job parsing, source backend selection, the per-job clone
//! workspace, the git subprocess transport and the orchestrator that
//! sequences them.

pub mod config;
pub mod error;
pub mod git;
pub mod job;
pub mod remote;
pub mod repo;
pub mod source;
pub mod workflow;

pub use config::{CliOverrides, Config, MirrorConfig};
pub use error::{Error, Result};
pub use git::{GitCli, GitTransport, Workspace};
pub use job::{load_jobs, JobSpec, MirrorJob};
pub use remote::{AccessToken, RemoteUrl};
pub use repo::RepoId;
pub use source::{render_host, BasicAuthHost, Destination, Source, SourceKind};
pub use workflow::{
    BatchPolicy, BatchReport, CreateOutcome, ExistencePolicy, JobOutcome, JobReport, Orchestrator,
    OrchestratorOptions, Registrar,
};
