//! The trigger surface invoked by the surrounding application.
//!
//! Any caller - a dashboard load, a periodic sweep - goes through these two
//! request/response entry points. The engine owns no wire format and keeps
//! no ambient state: workspace, period and reference date are explicit
//! parameters, and exchange rates are supplied fresh per call.

use chrono::NaiveDate;
use moneta_shared::types::WorkspaceId;
use moneta_shared::{Currency, Period};
use rust_decimal::Decimal;
use thiserror::Error;

use crate::budget::{BudgetAggregator, BudgetOverview};
use crate::reconcile::{ReconcileReport, ReconciliationDriver};
use crate::storage::{OverviewStore, RecurringStore, StorageError};

/// Engine facade errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// The requested month is not a calendar month.
    #[error("Invalid period: {year}-{month}")]
    InvalidPeriod {
        /// Requested year.
        year: i32,
        /// Requested month.
        month: u32,
    },

    /// The storage port failed.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// The engine over a storage backend.
pub struct Engine<S> {
    store: S,
}

impl<S> Engine<S> {
    /// Wraps a storage backend.
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// Returns the underlying storage backend.
    pub const fn store(&self) -> &S {
        &self.store
    }
}

impl<S> Engine<S>
where
    S: RecurringStore + OverviewStore,
{
    /// Materializes everything due in the workspace at `now` and returns the
    /// run's report.
    ///
    /// Safe to trigger concurrently: overlapping runs settle through the
    /// materializer's compare-and-swap and together produce the same
    /// transaction set as a single run.
    pub fn reconcile<F>(
        &self,
        workspace_id: WorkspaceId,
        now: NaiveDate,
        rate_lookup: F,
    ) -> Result<ReconcileReport, EngineError>
    where
        F: Fn(Currency, Currency) -> Option<Decimal> + Sync,
    {
        Ok(ReconciliationDriver::reconcile(
            &self.store,
            workspace_id,
            now,
            &rate_lookup,
        )?)
    }

    /// Computes the budget overview for one workspace month.
    pub fn budget_overview(
        &self,
        workspace_id: WorkspaceId,
        year: i32,
        month: u32,
    ) -> Result<BudgetOverview, EngineError> {
        let period = Period::new(year, month).ok_or(EngineError::InvalidPeriod { year, month })?;

        let categories = self.store.categories(workspace_id)?;
        let budgets = self.store.monthly_budgets(workspace_id, period)?;
        let transactions = self.store.transactions_in_period(workspace_id, period)?;

        Ok(BudgetAggregator::overview(
            period,
            &categories,
            &budgets,
            &transactions,
        ))
    }
}
