//! Mirror repository existence checks and creation

use async_trait::async_trait;
use ghmirror_core::{CreateOutcome, ExistencePolicy, Registrar, RepoId};
use serde_json::json;
use tracing::{debug, info, warn};

use crate::GitHubClient;

impl GitHubClient {
    /// Interpret anything but a 200 according to the existence policy
    fn absent(
        &self,
        repo: &RepoId,
        status: Option<u16>,
        reason: String,
    ) -> ghmirror_core::Result<bool> {
        match self.existence_policy() {
            ExistencePolicy::Strict if status != Some(404) => {
                Err(ghmirror_core::Error::ExistenceCheck {
                    repo: repo.clone(),
                    reason,
                })
            }
            _ => {
                debug!(mirror = %repo, %reason, "Existence check did not return 200");
                info!(mirror = %repo, "Mirror repository does not exist");
                Ok(false)
            }
        }
    }
}

#[async_trait]
impl Registrar for GitHubClient {
    async fn exists(&self, repo: &RepoId) -> ghmirror_core::Result<bool> {
        let route = format!("/repos/{}/{}", repo.owner, repo.name);

        match self.client()._get(route).await {
            Ok(response) if response.status().as_u16() == 200 => {
                info!(mirror = %repo, host = %self.host(), "Mirror repository already exists");
                Ok(true)
            }
            Ok(response) => {
                let status = response.status().as_u16();
                self.absent(repo, Some(status), format!("HTTP {}", status))
            }
            Err(e) => self.absent(repo, None, e.to_string()),
        }
    }

    async fn create(&self, repo: &RepoId) -> ghmirror_core::Result<CreateOutcome> {
        let route = format!("/orgs/{}/repos", repo.owner);
        let body = json!({
            "name": repo.name,
            "private": false,
            "visibility": "internal",
        });

        let reason = match self.client()._post(route, Some(&body)).await {
            Ok(response) if response.status().as_u16() == 201 => {
                info!(mirror = %repo, host = %self.host(), "Mirror repository created");
                return Ok(CreateOutcome::Created);
            }
            Ok(response) => format!("HTTP {}", response.status().as_u16()),
            Err(e) => e.to_string(),
        };

        warn!(mirror = %repo, %reason, "Mirror repository creation failed");
        Ok(CreateOutcome::Failed { reason })
    }
}
