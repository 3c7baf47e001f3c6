//! Mirror jobs and batch input

use std::fs::File;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::{Error, RepoId, Result};

/// One source → mirror pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MirrorJob {
    /// Repository to clone from the source backend
    pub source: RepoId,
    /// Repository to push to on the mirror host
    pub mirror: RepoId,
}

impl MirrorJob {
    /// Create a job from two already parsed identifiers
    pub fn new(source: RepoId, mirror: RepoId) -> Self {
        Self { source, mirror }
    }

    /// Parse both identifiers
    pub fn parse(source: &str, mirror: &str) -> Result<Self> {
        Ok(Self::new(RepoId::parse(source)?, RepoId::parse(mirror)?))
    }
}

/// What the command line asked for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobSpec {
    /// A single `--source` / `--mirror` pair
    Single(MirrorJob),
    /// A CSV file with `source` and `mirror` columns
    Batch(PathBuf),
}

impl JobSpec {
    /// Validate the combination of `--source`, `--mirror` and `--csv`
    pub fn from_options(
        source: Option<&str>,
        mirror: Option<&str>,
        csv: Option<&Path>,
    ) -> Result<Self> {
        match (source, mirror, csv) {
            (Some(_), _, Some(_)) => Err(usage("source and csv cannot be used together")),
            (_, Some(_), Some(_)) => Err(usage("mirror and csv cannot be used together")),
            (Some(source), Some(mirror), None) => {
                Ok(JobSpec::Single(MirrorJob::parse(source, mirror)?))
            }
            (None, None, Some(path)) => Ok(JobSpec::Batch(path.to_path_buf())),
            (Some(_), None, None) => Err(usage("missing mirror repo")),
            (None, Some(_), None) => Err(usage("missing source repo")),
            (None, None, None) => Err(usage(
                "missing required arguments. \
                 You need to specify a source repo, mirror repo, or csv file",
            )),
        }
    }

    /// Materialize every job before any of them runs
    pub fn into_jobs(self) -> Result<Vec<MirrorJob>> {
        match self {
            JobSpec::Single(job) => Ok(vec![job]),
            JobSpec::Batch(path) => load_jobs(&path),
        }
    }
}

fn usage(message: &str) -> Error {
    Error::Usage(message.to_string())
}

#[derive(Debug, Deserialize)]
struct Row {
    source: String,
    mirror: String,
}

/// Read a CSV batch file
///
/// The file must have a header line naming `source` and `mirror` columns.
/// Other columns are ignored. Row numbers in errors count data rows from 1.
pub fn load_jobs(path: &Path) -> Result<Vec<MirrorJob>> {
    let file = File::open(path)?;
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(file);

    let headers = reader.headers().map_err(|e| Error::Csv {
        row: 0,
        reason: e.to_string(),
    })?;
    for column in ["source", "mirror"] {
        if !headers.iter().any(|h| h == column) {
            return Err(Error::Csv {
                row: 0,
                reason: format!("missing '{}' column", column),
            });
        }
    }

    let mut jobs = Vec::new();
    for (index, record) in reader.deserialize::<Row>().enumerate() {
        let row = index + 1;
        let record = record.map_err(|e| Error::Csv {
            row,
            reason: e.to_string(),
        })?;
        let job = MirrorJob::parse(&record.source, &record.mirror).map_err(|e| Error::Csv {
            row,
            reason: e.to_string(),
        })?;
        jobs.push(job);
    }

    debug!(path = %path.display(), jobs = jobs.len(), "Loaded batch file");
    Ok(jobs)
}
