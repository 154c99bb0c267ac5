//! Transaction data types.

use chrono::NaiveDate;
use moneta_shared::types::{
    CategoryId, IncomeSourceId, RecurringDefinitionId, TransactionId, WorkspaceId,
};
use moneta_shared::Currency;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Transaction type classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    /// Money coming into the workspace.
    Income,
    /// Money leaving the workspace.
    Expense,
}

/// A transaction row.
///
/// Generated transactions reference their originating recurring definition;
/// manual entries leave it unset. For generated rows,
/// `(workspace_id, recurring_definition_id, transaction_date)` is unique -
/// the de-duplication key preventing double-generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Transaction ID.
    pub id: TransactionId,
    /// Owning workspace.
    pub workspace_id: WorkspaceId,
    /// Income or expense.
    pub transaction_type: TransactionType,
    /// Category, when assigned.
    pub category_id: Option<CategoryId>,
    /// Income source, for income transactions that track one.
    pub income_source_id: Option<IncomeSourceId>,
    /// Amount in the transaction's own currency.
    pub amount: Decimal,
    /// Currency of `amount`.
    pub currency: Currency,
    /// Amount converted into the workspace currency, locked at creation
    /// time and never recomputed. Unset when no conversion applied.
    pub converted_amount: Option<Decimal>,
    /// Exchange rate used for `converted_amount`, locked at creation time.
    pub exchange_rate: Option<Decimal>,
    /// Human-readable description.
    pub description: String,
    /// Date the transaction occurred.
    pub transaction_date: NaiveDate,
    /// Originating recurring definition; `None` for manual entries.
    pub recurring_definition_id: Option<RecurringDefinitionId>,
    /// Free-form tags.
    pub tags: Vec<String>,
}

impl Transaction {
    /// Returns true if this row was generated from a recurring definition.
    #[must_use]
    pub fn is_generated(&self) -> bool {
        self.recurring_definition_id.is_some()
    }

    /// Returns the amount to count against a budget kept in `budget_currency`:
    /// the locked converted amount when one exists and the transaction is in
    /// a different currency, else the raw amount.
    #[must_use]
    pub fn amount_in(&self, budget_currency: Currency) -> Decimal {
        if self.currency != budget_currency {
            self.converted_amount.unwrap_or(self.amount)
        } else {
            self.amount
        }
    }
}
