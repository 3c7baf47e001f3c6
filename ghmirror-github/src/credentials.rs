//! GitHub App credential sets
//!
//! A run uses two independent apps: one installed on the source host and
//! one on the mirror host. Each is configured through four variables:
//!
//! - `<ROLE>_API_URL`: REST endpoint, e.g. `https://api.github.com`
//! - `<ROLE>_APP_ID`: numeric app id
//! - `<ROLE>_PEM`: the app's private key, or a path to it
//! - `<ROLE>_INSTALLATION_ID`: numeric installation id

use std::fmt;

use tracing::debug;

use crate::{Error, Result};

/// Which side of the mirror a credential set authenticates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// The GitHub host repositories are cloned from
    Source,
    /// The GitHub Enterprise host mirrors are pushed to
    Mirror,
}

impl Role {
    /// Environment variable prefix
    pub fn prefix(&self) -> &'static str {
        match self {
            Role::Source => "SOURCE",
            Role::Mirror => "MIRROR",
        }
    }
}

/// Everything needed to authenticate as one GitHub App installation
#[derive(Clone)]
pub struct CredentialSet {
    /// REST API endpoint
    pub api_url: String,
    /// GitHub App id
    pub app_id: u64,
    /// Installation id of the app on the target account
    pub installation_id: u64,
    private_key: String,
}

impl CredentialSet {
    /// Build a credential set from explicit values
    pub fn new(
        api_url: impl Into<String>,
        app_id: u64,
        private_key: impl Into<String>,
        installation_id: u64,
    ) -> Self {
        Self {
            api_url: api_url.into(),
            app_id,
            installation_id,
            private_key: private_key.into(),
        }
    }

    /// Load the credential set for `role` from the process environment
    pub fn from_env(role: Role) -> Result<Self> {
        Self::from_lookup(role, |name| std::env::var(name).ok())
    }

    fn from_lookup(role: Role, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |suffix: &str| {
            let name = format!("{}_{}", role.prefix(), suffix);
            match lookup(&name) {
                Some(value) if !value.trim().is_empty() => Ok((name, value)),
                _ => Err(Error::MissingEnv(name)),
            }
        };

        let (_, api_url) = var("API_URL")?;
        let app_id = parse_id(var("APP_ID")?)?;
        let private_key = load_private_key(var("PEM")?)?;
        let installation_id = parse_id(var("INSTALLATION_ID")?)?;

        debug!(
            role = role.prefix(),
            api_url = %api_url,
            app_id,
            installation_id,
            "Loaded GitHub App credentials"
        );

        Ok(Self::new(api_url.trim(), app_id, private_key, installation_id))
    }

    /// PEM-encoded RSA private key
    pub fn private_key(&self) -> &str {
        &self.private_key
    }
}

impl fmt::Debug for CredentialSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialSet")
            .field("api_url", &self.api_url)
            .field("app_id", &self.app_id)
            .field("installation_id", &self.installation_id)
            .finish_non_exhaustive()
    }
}

fn parse_id((name, value): (String, String)) -> Result<u64> {
    value
        .trim()
        .parse()
        .map_err(|_| Error::Config(format!("{} must be a numeric id, got '{}'", name, value.trim())))
}

/// Accept the PEM text itself, PEM text with escaped newlines, or a path
fn load_private_key((name, value): (String, String)) -> Result<String> {
    let value = value.trim();
    if value.starts_with("-----BEGIN") {
        return Ok(value.replace("\\n", "\n"));
    }

    std::fs::read_to_string(value).map_err(|e| {
        Error::Config(format!(
            "{} is neither a PEM key nor a readable key file ({}): {}",
            name, value, e
        ))
    })
}
