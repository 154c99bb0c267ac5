//! Materialization error types.

use thiserror::Error;

use crate::currency::CurrencyError;
use crate::storage::StorageError;

/// Materialization failures.
///
/// Both variants are recoverable: a missing rate skips the occurrence until
/// the next run, a storage failure retries the whole definition next run.
/// Lost compare-and-swap races are not errors - they surface as
/// [`super::MaterializeOutcome::AlreadyProcessed`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MaterializeError {
    /// No exchange rate for the definition's currency pair.
    #[error(transparent)]
    Rate(#[from] CurrencyError),

    /// The storage port failed; nothing was written.
    #[error(transparent)]
    Storage(#[from] StorageError),
}
