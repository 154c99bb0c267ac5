//! Transaction materialization.
//!
//! Turns one due occurrence into exactly one persisted transaction,
//! advancing the definition's cursor atomically with the insert. The
//! compare-and-swap guard makes concurrent reconciliation triggers safe
//! without a global lock: the losing side observes idempotent success.

use chrono::NaiveDate;
use moneta_shared::types::TransactionId;
use moneta_shared::Currency;
use rust_decimal::Decimal;
use tracing::debug;

use crate::currency::CurrencyConverter;
use crate::recurrence::RecurringDefinition;
use crate::storage::{CommitOutcome, DefinitionAdvance, RecurringStore};
use crate::transaction::{Transaction, TransactionType};

use super::error::MaterializeError;

/// Outcome of materializing one occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MaterializeOutcome {
    /// The transaction was created and the cursor advanced.
    Created(Transaction),
    /// Another run already processed this occurrence (guard mismatch or
    /// duplicate de-duplication key). Not an error; never retried.
    AlreadyProcessed,
}

/// Materialization service.
pub struct Materializer;

impl Materializer {
    /// Materializes `occurrence` for `definition`.
    ///
    /// `expected_last_processed` is the definition's `last_processed_date`
    /// as read at the start of the operation; the storage commit only
    /// applies while the stored value still matches it.
    ///
    /// # Errors
    ///
    /// [`MaterializeError::Rate`] when the definition's currency cannot be
    /// converted into the workspace currency (occurrence skipped, nothing
    /// written); [`MaterializeError::Storage`] when the store fails (the
    /// definition's run is retried wholesale on the next trigger).
    pub fn materialize<S, F>(
        store: &S,
        definition: &RecurringDefinition,
        expected_last_processed: Option<NaiveDate>,
        occurrence: NaiveDate,
        workspace_currency: Currency,
        rate_lookup: &F,
    ) -> Result<MaterializeOutcome, MaterializeError>
    where
        S: RecurringStore + ?Sized,
        F: Fn(Currency, Currency) -> Option<Decimal>,
    {
        let (converted_amount, exchange_rate) = if definition.currency == workspace_currency {
            (None, None)
        } else {
            let conversion = CurrencyConverter::convert(
                definition.amount,
                definition.currency,
                workspace_currency,
                rate_lookup,
            )?;
            (Some(conversion.amount), Some(conversion.rate))
        };

        let next_due_date = definition.frequency.advance(occurrence);
        let advance = DefinitionAdvance {
            last_processed_date: occurrence,
            next_due_date,
            deactivate: definition.end_date.is_some_and(|end| next_due_date > end),
        };

        let transaction = Transaction {
            id: TransactionId::new(),
            workspace_id: definition.workspace_id,
            transaction_type: TransactionType::Expense,
            category_id: Some(definition.category_id),
            income_source_id: None,
            amount: definition.amount,
            currency: definition.currency,
            converted_amount,
            exchange_rate,
            description: definition.note.clone(),
            transaction_date: occurrence,
            recurring_definition_id: Some(definition.id),
            tags: vec![],
        };

        let outcome = store.commit_occurrence(
            definition.id,
            expected_last_processed,
            transaction.clone(),
            advance,
        )?;

        match outcome {
            CommitOutcome::Committed => {
                debug!(
                    definition = %definition.id,
                    date = %occurrence,
                    "materialized occurrence"
                );
                Ok(MaterializeOutcome::Created(transaction))
            }
            CommitOutcome::VersionConflict | CommitOutcome::DuplicateTransaction => {
                debug!(
                    definition = %definition.id,
                    date = %occurrence,
                    "occurrence already processed by a concurrent run"
                );
                Ok(MaterializeOutcome::AlreadyProcessed)
            }
        }
    }

    /// Deactivates a definition whose end date now lies behind its cursor
    /// (a user edit can produce this state without any occurrence left to
    /// materialize). Returns false when a concurrent run advanced the
    /// definition first.
    pub fn retire<S>(
        store: &S,
        definition: &RecurringDefinition,
    ) -> Result<bool, MaterializeError>
    where
        S: RecurringStore + ?Sized,
    {
        let retired = store.retire_definition(definition.id, definition.last_processed_date)?;
        if retired {
            debug!(definition = %definition.id, "retired exhausted definition");
        }
        Ok(retired)
    }
}
