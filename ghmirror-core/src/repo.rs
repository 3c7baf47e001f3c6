//! Repository identifiers

use std::fmt;
use std::str::FromStr;

use crate::{Error, Result};

/// An `owner/name` repository identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepoId {
    /// Repository owner (user, organization, workspace or group)
    pub owner: String,
    /// Repository name
    pub name: String,
}

impl RepoId {
    /// Parse an `owner/name` identifier
    ///
    /// Surrounding whitespace and a trailing `.git` are ignored. Nested
    /// paths (`group/subgroup/name`) are rejected.
    pub fn parse(input: &str) -> Result<Self> {
        let trimmed = input.trim();
        let path = trimmed.strip_suffix(".git").unwrap_or(trimmed);

        let Some((owner, name)) = path.split_once('/') else {
            return Err(Error::InvalidRepo(input.to_string()));
        };

        if owner.is_empty() || name.is_empty() || name.contains('/') {
            return Err(Error::InvalidRepo(input.to_string()));
        }

        if owner.chars().any(char::is_whitespace) || name.chars().any(char::is_whitespace) {
            return Err(Error::InvalidRepo(input.to_string()));
        }

        Ok(Self {
            owner: owner.to_string(),
            name: name.to_string(),
        })
    }

    /// The `owner/name` path used in remote URLs and API routes
    pub fn path(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }
}

impl FromStr for RepoId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for RepoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}
