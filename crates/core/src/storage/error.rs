//! Storage error types.

use moneta_shared::types::{RecurringDefinitionId, WorkspaceId};
use thiserror::Error;

/// Result type alias for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Storage-related errors.
///
/// All of these are recoverable at per-definition granularity: the affected
/// definition's occurrences are retried wholesale on the next trigger.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    /// The backing store could not be reached.
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    /// Workspace not found.
    #[error("Workspace not found: {0}")]
    WorkspaceNotFound(WorkspaceId),

    /// Recurring definition not found.
    #[error("Recurring definition not found: {0}")]
    DefinitionNotFound(RecurringDefinitionId),
}
