//! Credentials embedded in git remote URLs

use std::fmt;

use url::Url;

use crate::{Error, Result};

/// An installation access token or other bearer credential
///
/// Never printed: both `Debug` and `Display` redact the value.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    /// Wrap a raw token value
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// The raw token, for request headers and remote URLs only
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(***)")
    }
}

impl fmt::Display for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("***")
    }
}

/// A git remote URL that may carry credentials in its userinfo part
#[derive(Clone, PartialEq, Eq)]
pub struct RemoteUrl {
    url: String,
    /// Credential strings to mask, longest first, raw and percent-encoded
    secrets: Vec<String>,
}

impl RemoteUrl {
    /// Wrap a URL or local path understood by `git`
    pub fn new(url: impl Into<String>) -> Self {
        let url = url.into();
        let secrets = match Url::parse(&url) {
            Ok(parsed) => credential_forms(&parsed),
            Err(_) => Vec::new(),
        };
        Self::with_secrets(url, secrets)
    }

    /// `https://<userinfo>@<host>/<path>`
    ///
    /// `userinfo` is `user:password` or a bare token. Both halves are
    /// percent-encoded, so reserved characters in a password survive.
    pub fn https_with_userinfo(userinfo: &str, host: &str, path: &str) -> Result<Self> {
        let invalid = |what: &str| Error::Config(format!("Invalid {} for host '{}'", what, host));

        let mut url = Url::parse(&format!("https://{}/", host.trim_end_matches('/')))
            .map_err(|e| Error::Config(format!("Invalid host '{}': {}", host, e)))?;
        let prefix = url.path().trim_end_matches('/').to_string();
        url.set_path(&format!("{}/{}", prefix, path.trim_start_matches('/')));

        let (username, password) = match userinfo.split_once(':') {
            Some((user, password)) => (user, Some(password)),
            None => (userinfo, None),
        };
        url.set_username(username).map_err(|_| invalid("username"))?;
        url.set_password(password).map_err(|_| invalid("password"))?;

        let mut secrets = credential_forms(&url);
        match password {
            Some(password) => {
                secrets.push(userinfo.to_string());
                secrets.push(password.to_string());
            }
            None => secrets.push(username.to_string()),
        }

        Ok(Self::with_secrets(url.into(), secrets))
    }

    fn with_secrets(url: String, mut secrets: Vec<String>) -> Self {
        secrets.retain(|s| !s.is_empty());
        secrets.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        secrets.dedup();
        Self { url, secrets }
    }

    /// The real URL, passed to the git subprocess
    pub fn as_str(&self) -> &str {
        &self.url
    }

    /// Remove this URL's credentials from arbitrary text (e.g. git stderr)
    pub fn scrub(&self, text: &str) -> String {
        self.secrets
            .iter()
            .fold(text.to_string(), |text, secret| text.replace(secret.as_str(), "***"))
    }
}

/// Secret parts of a parsed URL's userinfo, as serialized
///
/// With a password the username alone is not secret; a bare username is
/// taken to be a token.
fn credential_forms(url: &Url) -> Vec<String> {
    match url.password() {
        Some(password) => vec![
            format!("{}:{}", url.username(), password),
            password.to_string(),
        ],
        None if !url.username().is_empty() => vec![url.username().to_string()],
        None => Vec::new(),
    }
}

impl fmt::Display for RemoteUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match Url::parse(&self.url) {
            Ok(mut url) if !url.username().is_empty() || url.password().is_some() => {
                // Only fails for URLs that cannot carry userinfo at all
                let _ = url.set_password(None);
                let _ = url.set_username("***");
                f.write_str(url.as_str())
            }
            _ => f.write_str(&self.url),
        }
    }
}

impl fmt::Debug for RemoteUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RemoteUrl({})", self)
    }
}
