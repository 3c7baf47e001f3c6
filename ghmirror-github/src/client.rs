//! GitHub API client for the mirror host, using octocrab

use ghmirror_core::{render_host, AccessToken, ExistencePolicy};
use octocrab::Octocrab;
use tracing::info;

use crate::{Error, Result};

/// Client authenticated with the mirror installation token
pub struct GitHubClient {
    client: Octocrab,
    host: String,
    existence_policy: ExistencePolicy,
}

impl GitHubClient {
    /// Create a client for the given API endpoint
    pub fn new(api_url: &str, token: &AccessToken) -> Result<Self> {
        let host = render_host(api_url)?;

        let client = Octocrab::builder()
            .base_uri(api_url)
            .map_err(|e| Error::Config(format!("Invalid API URL '{}': {}", api_url, e)))?
            .personal_token(token.expose().to_string())
            .build()
            .map_err(|e| Error::Auth(format!("Failed to create GitHub client: {}", e)))?;

        info!(api_url, host = %host, "Created GitHub client");

        Ok(Self {
            client,
            host,
            existence_policy: ExistencePolicy::default(),
        })
    }

    /// Choose how failed existence checks are treated
    pub fn with_existence_policy(mut self, policy: ExistencePolicy) -> Self {
        self.existence_policy = policy;
        self
    }

    /// Host git pushes go to, e.g. `ghe.example.com`
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Policy in effect for existence checks
    pub fn existence_policy(&self) -> ExistencePolicy {
        self.existence_policy
    }

    /// Get the underlying octocrab client
    pub fn client(&self) -> &Octocrab {
        &self.client
    }
}

impl std::fmt::Debug for GitHubClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitHubClient")
            .field("host", &self.host)
            .field("existence_policy", &self.existence_policy)
            .finish_non_exhaustive()
    }
}
