//! Sequential batch driver

use tracing::{info, warn};

use super::orchestrator::{JobReport, Orchestrator};
use crate::{Error, MirrorJob, Result};

/// What happens to the rest of a batch when a job fails
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BatchPolicy {
    /// Stop at the first failure; later rows never run
    #[default]
    FailFast,
    /// Record the failure and carry on with the next row
    ContinueOnError,
}

/// Result of one row
#[derive(Debug, Clone)]
pub enum JobOutcome {
    /// The job completed
    Mirrored(JobReport),
    /// The job failed (only recorded with [`BatchPolicy::ContinueOnError`])
    Failed {
        job: MirrorJob,
        kind: &'static str,
        message: String,
    },
}

impl JobOutcome {
    /// Whether the row failed
    pub fn is_failure(&self) -> bool {
        matches!(self, JobOutcome::Failed { .. })
    }
}

/// Per-row outcomes, in input order
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    pub outcomes: Vec<JobOutcome>,
}

impl BatchReport {
    /// Number of rows that completed
    pub fn succeeded(&self) -> usize {
        self.outcomes.len() - self.failed()
    }

    /// Number of rows that failed
    pub fn failed(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_failure()).count()
    }

    /// Failed rows with their 1-based row numbers
    pub fn failures(&self) -> impl Iterator<Item = (usize, &JobOutcome)> {
        self.outcomes
            .iter()
            .enumerate()
            .filter(|(_, o)| o.is_failure())
            .map(|(i, o)| (i + 1, o))
    }
}

impl Orchestrator {
    /// Run jobs strictly one after another, in order
    pub async fn run_batch(&self, jobs: &[MirrorJob]) -> Result<BatchReport> {
        let mut report = BatchReport::default();
        info!(jobs = jobs.len(), policy = ?self.options.batch_policy, "Starting batch");

        for (index, job) in jobs.iter().enumerate() {
            let row = index + 1;
            match self.run_job(job).await {
                Ok(job_report) => report.outcomes.push(JobOutcome::Mirrored(job_report)),
                Err(err) => match self.options.batch_policy {
                    BatchPolicy::FailFast => {
                        return Err(Error::BatchAborted {
                            row,
                            source: Box::new(err),
                        });
                    }
                    BatchPolicy::ContinueOnError => {
                        warn!(row, source = %job.source, error = %err, "Job failed, continuing");
                        report.outcomes.push(JobOutcome::Failed {
                            job: job.clone(),
                            kind: err.kind(),
                            message: err.to_string(),
                        });
                    }
                },
            }
        }

        info!(
            succeeded = report.succeeded(),
            failed = report.failed(),
            "Batch finished"
        );
        Ok(report)
    }
}
