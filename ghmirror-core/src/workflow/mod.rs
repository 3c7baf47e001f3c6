//! Mirroring workflow
//!
//! The orchestrator composes the source backend, the git transport and the
//! destination registrar into the per-job sequence, and drives batches of
//! jobs strictly one after another.

mod batch;
mod orchestrator;
mod registrar;

pub use batch::{BatchPolicy, BatchReport, JobOutcome};
pub use orchestrator::{JobReport, Orchestrator, OrchestratorOptions};
pub use registrar::{CreateOutcome, ExistencePolicy, Registrar};
