//! Configuration management for ghmirror
//!
//! Configuration is loaded with the following priority (highest to lowest):
//! 1. CLI flags
//! 2. Environment variables (GHMIRROR_*)
//! 3. Config file (~/.config/ghmirror/config.toml)
//! 4. Default values
//!
//! Credentials are not part of this file; they are read from the
//! `SOURCE_*`, `MIRROR_*`, `BITBUCKET_*` and `GITLAB_*` variables.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::workflow::{BatchPolicy, ExistencePolicy, OrchestratorOptions};
use crate::{Error, Result};

/// Mirroring behaviour
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct MirrorConfig {
    /// Path to the git executable
    pub git_path: String,

    /// Parent directory for per-job workspaces (system temp dir if unset)
    pub workspace_dir: Option<PathBuf>,

    /// Treat existence-check failures other than 404 as errors
    pub strict_existence: bool,

    /// Abort a job when the mirror repository cannot be created
    pub strict_create: bool,

    /// Keep running the batch after a job fails
    pub keep_going: bool,
}

impl Default for MirrorConfig {
    fn default() -> Self {
        Self {
            git_path: "git".to_string(),
            workspace_dir: None,
            strict_existence: false,
            strict_create: false,
            keep_going: false,
        }
    }
}

/// Root configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Mirror configuration
    pub mirror: MirrorConfig,
}

/// CLI flag overrides; `None`/`false` leaves the loaded value alone
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub git_path: Option<String>,
    pub workspace_dir: Option<PathBuf>,
    pub strict_existence: bool,
    pub strict_create: bool,
    pub keep_going: bool,
}

impl Config {
    /// Load configuration from the default config file location
    ///
    /// Returns default config if file doesn't exist
    pub fn load() -> Result<Self> {
        if let Some(path) = Self::default_config_path() {
            if path.exists() {
                return Self::load_from_file(&path);
            }
        }

        Ok(Self::default())
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        toml::from_str(&contents)
            .map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))
    }

    /// Get the default config file path
    ///
    /// Returns `~/.config/ghmirror/config.toml` on Unix
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("ghmirror").join("config.toml"))
    }

    /// Apply environment variable overrides
    ///
    /// Supported variables:
    /// - GHMIRROR_GIT: Path to the git executable
    /// - GHMIRROR_WORKSPACE_DIR: Parent directory for workspaces
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(git_path) = std::env::var("GHMIRROR_GIT") {
            self.mirror.git_path = git_path;
        }

        if let Ok(dir) = std::env::var("GHMIRROR_WORKSPACE_DIR") {
            self.mirror.workspace_dir = Some(PathBuf::from(dir));
        }

        self
    }

    /// Apply CLI flag overrides
    pub fn with_cli_overrides(mut self, cli: CliOverrides) -> Self {
        if let Some(path) = cli.git_path {
            self.mirror.git_path = path;
        }

        if let Some(dir) = cli.workspace_dir {
            self.mirror.workspace_dir = Some(dir);
        }

        // Flags can only switch a policy on
        self.mirror.strict_existence |= cli.strict_existence;
        self.mirror.strict_create |= cli.strict_create;
        self.mirror.keep_going |= cli.keep_going;

        self
    }

    /// Load configuration with all overrides applied
    ///
    /// Priority: CLI > env > config file > defaults
    pub fn load_with_overrides(cli: CliOverrides) -> Result<Self> {
        Ok(Self::load()?.with_env_overrides().with_cli_overrides(cli))
    }

    /// How the mirror registrar treats non-200 existence checks
    pub fn existence_policy(&self) -> ExistencePolicy {
        if self.mirror.strict_existence {
            ExistencePolicy::Strict
        } else {
            ExistencePolicy::Lenient
        }
    }

    /// Orchestrator settings derived from this configuration
    pub fn orchestrator_options(&self) -> OrchestratorOptions {
        OrchestratorOptions {
            workspace_dir: self.mirror.workspace_dir.clone(),
            strict_create: self.mirror.strict_create,
            batch_policy: if self.mirror.keep_going {
                BatchPolicy::ContinueOnError
            } else {
                BatchPolicy::FailFast
            },
        }
    }
}

/// Read a required, non-empty environment variable
pub fn require_env(name: &str) -> Result<String> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(Error::MissingEnv(name.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.mirror.git_path, "git");
        assert!(config.mirror.workspace_dir.is_none());
        assert_eq!(config.existence_policy(), ExistencePolicy::Lenient);

        let options = config.orchestrator_options();
        assert!(!options.strict_create);
        assert_eq!(options.batch_policy, BatchPolicy::FailFast);
    }

    #[test]
    fn test_cli_overrides() {
        let config = Config::default().with_cli_overrides(CliOverrides {
            git_path: Some("/opt/git/bin/git".to_string()),
            workspace_dir: Some(PathBuf::from("/var/tmp/mirror")),
            strict_existence: true,
            strict_create: true,
            keep_going: true,
        });

        assert_eq!(config.mirror.git_path, "/opt/git/bin/git");
        assert_eq!(
            config.mirror.workspace_dir,
            Some(PathBuf::from("/var/tmp/mirror"))
        );
        assert_eq!(config.existence_policy(), ExistencePolicy::Strict);

        let options = config.orchestrator_options();
        assert!(options.strict_create);
        assert_eq!(options.batch_policy, BatchPolicy::ContinueOnError);
    }

    #[test]
    fn test_cli_flags_do_not_clear_file_settings() {
        let toml = r#"
[mirror]
strict_create = true
"#;
        let config: Config = toml::from_str(toml).unwrap();
        let config = config.with_cli_overrides(CliOverrides::default());
        assert!(config.mirror.strict_create);
    }

    #[test]
    fn test_parse_toml() {
        let toml = r#"
[mirror]
git_path = "/usr/local/bin/git"
workspace_dir = "/srv/ghmirror"
keep_going = true
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.mirror.git_path, "/usr/local/bin/git");
        assert_eq!(
            config.mirror.workspace_dir,
            Some(PathBuf::from("/srv/ghmirror"))
        );
        assert!(config.mirror.keep_going);
        assert!(!config.mirror.strict_existence);
    }

    #[test]
    fn test_load_from_missing_file() {
        let result = Config::load_from_file(Path::new("/nonexistent/ghmirror/config.toml"));
        assert!(matches!(result, Err(Error::Io(_))));
    }

    #[test]
    fn test_require_env_missing() {
        let err = require_env("GHMIRROR_TEST_SURELY_UNSET_VARIABLE").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Missing environment variable: GHMIRROR_TEST_SURELY_UNSET_VARIABLE"
        );
    }
}
