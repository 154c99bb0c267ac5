//! Workspace-wide reconciliation orchestration.

pub mod driver;
pub mod types;


pub use driver::ReconciliationDriver;
pub use types::{DefinitionOutcome, ReconcileReport, SkipReason, SkippedOccurrence};
