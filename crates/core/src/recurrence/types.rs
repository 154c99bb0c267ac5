//! Recurring definition data types.

use chrono::{Datelike, Duration, NaiveDate};
use moneta_shared::types::{CategoryId, RecurringDefinitionId, WorkspaceId};
use moneta_shared::Currency;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// How often a recurring definition generates a transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Frequency {
    /// Every 7 days.
    Weekly,
    /// Every calendar month, day-of-month clamped to the target month.
    Monthly,
    /// Every 3 calendar months, same clamping rule.
    Quarterly,
    /// Every 12 calendar months; Feb 29 clamps to Feb 28 off leap years.
    Yearly,
}

impl Frequency {
    /// Advances a date by one recurrence step.
    ///
    /// Month-based steps preserve the day-of-month; when the target month is
    /// shorter, the day clamps to its last valid day (Jan 31 -> Feb 28/29).
    #[must_use]
    pub fn advance(self, date: NaiveDate) -> NaiveDate {
        match self {
            Self::Weekly => date + Duration::days(7),
            Self::Monthly => add_months_clamped(date, 1),
            Self::Quarterly => add_months_clamped(date, 3),
            Self::Yearly => add_months_clamped(date, 12),
        }
    }
}

/// A recurring transaction definition.
///
/// The `next_due_date`/`last_processed_date` pair is the materialization
/// cursor: it is advanced only through the storage port's conditional commit,
/// or by explicit user edits outside this engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecurringDefinition {
    /// Definition ID.
    pub id: RecurringDefinitionId,
    /// Owning workspace.
    pub workspace_id: WorkspaceId,
    /// Category assigned to generated transactions.
    pub category_id: CategoryId,
    /// Amount of each generated transaction.
    pub amount: Decimal,
    /// Currency of the amount.
    pub currency: Currency,
    /// Recurrence frequency.
    pub frequency: Frequency,
    /// First scheduled date.
    pub start_date: NaiveDate,
    /// Optional last date on which an occurrence may fall.
    pub end_date: Option<NaiveDate>,
    /// Next date an occurrence is due. Invariant: `>= start_date`.
    pub next_due_date: NaiveDate,
    /// Date of the most recently materialized occurrence.
    pub last_processed_date: Option<NaiveDate>,
    /// Whether the definition still generates transactions.
    pub is_active: bool,
    /// Free-text note copied onto generated transactions.
    pub note: String,
}

/// Adds calendar months to a date, clamping the day-of-month to the last
/// valid day of the target month.
fn add_months_clamped(date: NaiveDate, months: u32) -> NaiveDate {
    let zero_based = date.year() * 12 + date.month() as i32 - 1 + months as i32;
    let year = zero_based.div_euclid(12);
    let month = (zero_based.rem_euclid(12) + 1) as u32;
    let day = date.day().min(days_in_month(year, month));
    // year/month/day are valid by construction above.
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(date)
}

/// Number of days in the given month.
fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|first_next| first_next.pred_opt())
        .map_or(28, |last| last.day())
}
