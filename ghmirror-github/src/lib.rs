//! ghmirror GitHub - GitHub integration for ghmirror
//!
//! This crate turns GitHub App credentials into installation access tokens
//! and provides the mirror registrar that checks for and creates
//! destination repositories on a GitHub Enterprise host.

mod auth;
mod client;
mod credentials;
mod error;
mod registrar;

pub use auth::installation_token;
pub use client::GitHubClient;
pub use credentials::{CredentialSet, Role};
pub use error::{Error, Result};
