//! Source backends and the mirror destination
//!
//! The backend is chosen once per process and decides how clone URLs are
//! rendered for every job in the run.

use std::fmt;

use tracing::debug;

use crate::config::require_env;
use crate::{AccessToken, Error, RemoteUrl, RepoId, Result};

/// Canonical public GitHub API endpoint
const GITHUB_API_URL: &str = "https://api.github.com";

/// Which hosting provider repositories are cloned from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SourceKind {
    /// GitHub.com or GitHub Enterprise Server, via a GitHub App
    #[default]
    GitHub,
    /// Bitbucket, via basic auth
    Bitbucket,
    /// GitLab, via basic auth
    GitLab,
}

impl SourceKind {
    /// Select the backend from the `--bitbucket` / `--gitlab` flags
    ///
    /// Bitbucket wins when both are set.
    pub fn from_flags(bitbucket: bool, gitlab: bool) -> Self {
        if bitbucket {
            SourceKind::Bitbucket
        } else if gitlab {
            SourceKind::GitLab
        } else {
            SourceKind::GitHub
        }
    }

    /// Lowercase backend name
    pub fn name(&self) -> &'static str {
        match self {
            SourceKind::GitHub => "github",
            SourceKind::Bitbucket => "bitbucket",
            SourceKind::GitLab => "gitlab",
        }
    }

    /// Whether this backend authenticates with a GitHub App token
    pub fn uses_app_token(&self) -> bool {
        matches!(self, SourceKind::GitHub)
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A statically configured host reached with basic-auth credentials
#[derive(Clone)]
pub struct BasicAuthHost {
    /// Hostname, optionally with port
    pub host: String,
    /// Userinfo placed before the host (`user:password` or a token)
    pub credentials: String,
}

impl BasicAuthHost {
    /// Read `<PREFIX>_HOST` and `<PREFIX>_APP_CREDENTIALS`
    pub fn from_env(prefix: &str) -> Result<Self> {
        Ok(Self {
            host: require_env(&format!("{}_HOST", prefix))?,
            credentials: require_env(&format!("{}_APP_CREDENTIALS", prefix))?,
        })
    }
}

impl fmt::Debug for BasicAuthHost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BasicAuthHost")
            .field("host", &self.host)
            .finish_non_exhaustive()
    }
}

/// Where source repositories are cloned from
#[derive(Debug, Clone)]
pub enum Source {
    /// GitHub App installation token against a GitHub host
    GitHub {
        /// Rendered host (see [`render_host`])
        host: String,
        /// Installation access token for the source app
        token: AccessToken,
    },
    /// Bitbucket basic auth
    Bitbucket(BasicAuthHost),
    /// GitLab basic auth
    GitLab(BasicAuthHost),
}

impl Source {
    /// GitHub source for the given API endpoint
    pub fn github(api_url: &str, token: AccessToken) -> Result<Self> {
        Ok(Source::GitHub {
            host: render_host(api_url)?,
            token,
        })
    }

    /// Build the non-GitHub backends from their environment variables
    pub fn from_env(kind: SourceKind) -> Result<Self> {
        match kind {
            SourceKind::Bitbucket => Ok(Source::Bitbucket(BasicAuthHost::from_env("BITBUCKET")?)),
            SourceKind::GitLab => Ok(Source::GitLab(BasicAuthHost::from_env("GITLAB")?)),
            SourceKind::GitHub => Err(Error::Config(
                "The GitHub source needs an installation token; use Source::github".to_string(),
            )),
        }
    }

    /// Which backend this is
    pub fn kind(&self) -> SourceKind {
        match self {
            Source::GitHub { .. } => SourceKind::GitHub,
            Source::Bitbucket(_) => SourceKind::Bitbucket,
            Source::GitLab(_) => SourceKind::GitLab,
        }
    }

    /// URL passed to `git clone --bare`
    pub fn clone_url(&self, repo: &RepoId) -> Result<RemoteUrl> {
        match self {
            Source::GitHub { host, token } => token_url(host, token, repo),
            Source::Bitbucket(basic) | Source::GitLab(basic) => RemoteUrl::https_with_userinfo(
                &basic.credentials,
                &basic.host,
                &format!("{}.git", repo.path()),
            ),
        }
    }
}

/// The GitHub Enterprise host mirrors are pushed to
#[derive(Debug, Clone)]
pub struct Destination {
    host: String,
    token: AccessToken,
}

impl Destination {
    /// Destination for the given mirror API endpoint
    pub fn new(api_url: &str, token: AccessToken) -> Result<Self> {
        Ok(Self {
            host: render_host(api_url)?,
            token,
        })
    }

    /// Rendered mirror host
    pub fn host(&self) -> &str {
        &self.host
    }

    /// URL passed to `git push --mirror`
    pub fn push_url(&self, repo: &RepoId) -> Result<RemoteUrl> {
        token_url(&self.host, &self.token, repo)
    }
}

fn token_url(host: &str, token: &AccessToken, repo: &RepoId) -> Result<RemoteUrl> {
    RemoteUrl::https_with_userinfo(
        &format!("x-access-token:{}", token.expose()),
        host,
        &repo.path(),
    )
}

/// Turn a GitHub API endpoint into the host git talks to
///
/// `https://api.github.com` becomes `github.com`; an Enterprise endpoint
/// such as `https://ghe.example.com/api/v3` becomes `ghe.example.com`.
pub fn render_host(api_url: &str) -> Result<String> {
    if api_url.trim_end_matches('/') == GITHUB_API_URL {
        return Ok("github.com".to_string());
    }

    let url = url::Url::parse(api_url)
        .map_err(|e| Error::Config(format!("Invalid API URL '{}': {}", api_url, e)))?;
    let host = url
        .host_str()
        .ok_or_else(|| Error::Config(format!("API URL '{}' has no host", api_url)))?;

    let rendered = match url.port() {
        Some(port) => format!("{}:{}", host, port),
        None => host.to_string(),
    };
    debug!(api_url, host = %rendered, "Rendered git host");
    Ok(rendered)
}
