//! Mirror command - clone from the source host and push to the mirror

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::bail;
use clap::Args;
use ghmirror_core::{
    CliOverrides, Config, Destination, GitCli, JobOutcome, JobReport, JobSpec, Orchestrator,
    Source, SourceKind,
};
use ghmirror_github::{installation_token, CredentialSet, GitHubClient, Role};

/// Arguments selecting what to mirror and how
#[derive(Args, Debug)]
pub struct MirrorArgs {
    /// Source repository (owner/repo)
    #[arg(short, long, value_name = "OWNER/REPO")]
    pub source: Option<String>,

    /// Mirror repository (owner/repo)
    #[arg(short, long, value_name = "OWNER/REPO")]
    pub mirror: Option<String>,

    /// CSV file with `source` and `mirror` columns
    #[arg(short, long, value_name = "PATH")]
    pub csv: Option<PathBuf>,

    /// Clone from Bitbucket (BITBUCKET_HOST, BITBUCKET_APP_CREDENTIALS)
    #[arg(short, long, conflicts_with = "gitlab")]
    pub bitbucket: bool,

    /// Clone from GitLab (GITLAB_HOST, GITLAB_APP_CREDENTIALS)
    #[arg(short = 'l', long)]
    pub gitlab: bool,

    /// Parent directory for per-job workspaces
    #[arg(long, env = "GHMIRROR_WORKSPACE_DIR", value_name = "PATH")]
    pub workspace_dir: Option<PathBuf>,

    /// Path to the git executable
    #[arg(long = "git", env = "GHMIRROR_GIT", value_name = "PATH")]
    pub git_path: Option<String>,

    /// Fail when the mirror existence check errors with anything but 404
    #[arg(long)]
    pub strict_existence: bool,

    /// Abort a job when the mirror repository cannot be created
    #[arg(long)]
    pub strict_create: bool,

    /// Keep going after a failed row and report failures at the end
    #[arg(long)]
    pub keep_going: bool,
}

impl MirrorArgs {
    /// Configuration overrides carried by these flags
    pub fn overrides(&self) -> CliOverrides {
        CliOverrides {
            git_path: self.git_path.clone(),
            workspace_dir: self.workspace_dir.clone(),
            strict_existence: self.strict_existence,
            strict_create: self.strict_create,
            keep_going: self.keep_going,
        }
    }

    /// Execute the mirror command
    pub async fn execute(&self, verbose: bool) -> anyhow::Result<()> {
        let spec = JobSpec::from_options(
            self.source.as_deref(),
            self.mirror.as_deref(),
            self.csv.as_deref(),
        )?;
        let is_batch = matches!(spec, JobSpec::Batch(_));

        let config = Config::load_with_overrides(self.overrides())?;
        if verbose {
            tracing::info!(
                git_path = %config.mirror.git_path,
                workspace_dir = ?config.mirror.workspace_dir,
                "Configuration loaded"
            );
        }

        let kind = SourceKind::from_flags(self.bitbucket, self.gitlab);
        tracing::info!("using {} to source repos", kind);

        let jobs = spec.into_jobs()?;

        let source = if kind.uses_app_token() {
            let creds = CredentialSet::from_env(Role::Source)?;
            let token = installation_token(&creds).await?;
            Source::github(&creds.api_url, token)?
        } else {
            Source::from_env(kind)?
        };

        let mirror_creds = CredentialSet::from_env(Role::Mirror)?;
        let mirror_token = installation_token(&mirror_creds).await?;
        let destination = Destination::new(&mirror_creds.api_url, mirror_token.clone())?;

        let registrar = GitHubClient::new(&mirror_creds.api_url, &mirror_token)?
            .with_existence_policy(config.existence_policy());
        let transport = GitCli::new().with_path(config.mirror.git_path.clone());

        let orchestrator = Orchestrator::new(
            source,
            destination,
            Arc::new(registrar),
            Arc::new(transport),
            config.orchestrator_options(),
        );

        if !is_batch {
            for job in &jobs {
                let report = orchestrator.run_job(job).await?;
                print_report(&report);
            }
            return Ok(());
        }

        let report = orchestrator.run_batch(&jobs).await?;
        for outcome in &report.outcomes {
            if let JobOutcome::Mirrored(job_report) = outcome {
                print_report(job_report);
            }
        }
        for (row, outcome) in report.failures() {
            if let JobOutcome::Failed { job, kind, message } = outcome {
                eprintln!(
                    "Row {}: {} => {} failed ({}): {}",
                    row, job.source, job.mirror, kind, message
                );
            }
        }

        println!();
        println!(
            "{} mirrored, {} failed",
            report.succeeded(),
            report.failed()
        );

        if report.failed() > 0 {
            bail!("{} of {} rows failed", report.failed(), report.outcomes.len());
        }

        Ok(())
    }
}

fn print_report(report: &JobReport) {
    let note = if report.created {
        " (created)"
    } else if report.existed {
        ""
    } else {
        " (not created)"
    };
    println!("Mirrored {} => {}{}", report.job.source, report.job.mirror, note);
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser, Debug)]
    struct TestCli {
        #[command(flatten)]
        mirror: MirrorArgs,
    }

    #[test]
    fn test_single_job_flags() {
        let cli = TestCli::try_parse_from(["ghmirror", "-s", "octo/app", "-m", "mirrors/app"])
            .unwrap();
        assert_eq!(cli.mirror.source.as_deref(), Some("octo/app"));
        assert_eq!(cli.mirror.mirror.as_deref(), Some("mirrors/app"));
        assert!(cli.mirror.csv.is_none());
    }

    #[test]
    fn test_backend_flags_conflict() {
        let result = TestCli::try_parse_from(["ghmirror", "-c", "jobs.csv", "-b", "-l"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_gitlab_short_flag() {
        let cli = TestCli::try_parse_from(["ghmirror", "-c", "jobs.csv", "-l"]).unwrap();
        assert!(cli.mirror.gitlab);
        assert_eq!(
            SourceKind::from_flags(cli.mirror.bitbucket, cli.mirror.gitlab),
            SourceKind::GitLab
        );
    }

    #[test]
    fn test_policy_flags_become_overrides() {
        let cli = TestCli::try_parse_from([
            "ghmirror",
            "-c",
            "jobs.csv",
            "--strict-existence",
            "--keep-going",
            "--git",
            "/usr/local/bin/git",
        ])
        .unwrap();
        let overrides = cli.mirror.overrides();
        assert!(overrides.strict_existence);
        assert!(!overrides.strict_create);
        assert!(overrides.keep_going);
        assert_eq!(overrides.git_path.as_deref(), Some("/usr/local/bin/git"));
    }

    #[test]
    fn test_csv_with_source_is_usage_error() {
        let cli = TestCli::try_parse_from(["ghmirror", "-s", "octo/app", "-c", "jobs.csv"])
            .unwrap();
        let err = JobSpec::from_options(
            cli.mirror.source.as_deref(),
            cli.mirror.mirror.as_deref(),
            cli.mirror.csv.as_deref(),
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "source and csv cannot be used together");
    }
}
