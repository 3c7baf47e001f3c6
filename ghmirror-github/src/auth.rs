//! GitHub App installation token exchange

use chrono::{DateTime, Utc};
use ghmirror_core::AccessToken;
use jsonwebtoken::EncodingKey;
use octocrab::models::AppId;
use octocrab::Octocrab;
use serde::Deserialize;
use tracing::{debug, info};

use crate::credentials::CredentialSet;
use crate::{Error, Result};

/// Response of `POST /app/installations/{id}/access_tokens`
#[derive(Debug, Deserialize)]
struct InstallationAccessToken {
    token: String,
    expires_at: Option<DateTime<Utc>>,
}

/// Exchange a credential set for an installation access token
///
/// Performs one request. The token is not refreshed afterwards; runs
/// longer than its lifetime (one hour on github.com) will fail.
pub async fn installation_token(credentials: &CredentialSet) -> Result<AccessToken> {
    let key = EncodingKey::from_rsa_pem(credentials.private_key().as_bytes()).map_err(|e| {
        Error::Auth(format!(
            "Invalid private key for app {}: {}",
            credentials.app_id, e
        ))
    })?;

    let app = Octocrab::builder()
        .base_uri(credentials.api_url.as_str())
        .map_err(|e| Error::Config(format!("Invalid API URL '{}': {}", credentials.api_url, e)))?
        .app(AppId(credentials.app_id), key)
        .build()
        .map_err(|e| Error::Auth(format!("Failed to create GitHub client: {}", e)))?;

    let route = format!(
        "/app/installations/{}/access_tokens",
        credentials.installation_id
    );
    let response: InstallationAccessToken = app.post(route, None::<&()>).await.map_err(|e| {
        Error::Auth(format!(
            "Failed to obtain token for installation {} of app {} at {}: {}",
            credentials.installation_id, credentials.app_id, credentials.api_url, e
        ))
    })?;

    debug!(expires_at = ?response.expires_at, "Installation token expiry");
    info!(
        api_url = %credentials.api_url,
        installation_id = credentials.installation_id,
        "Obtained installation access token"
    );

    Ok(AccessToken::new(response.token))
}
