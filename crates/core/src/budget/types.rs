//! Budget data types.

use moneta_shared::types::{CategoryId, WorkspaceId};
use moneta_shared::{Currency, Period};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A budget category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetCategory {
    /// Category ID.
    pub id: CategoryId,
    /// Owning workspace.
    pub workspace_id: WorkspaceId,
    /// Display name.
    pub name: String,
    /// Display icon identifier.
    pub icon: String,
    /// Display color (hex).
    pub color: String,
    /// Whether this is a workspace default category.
    pub is_default: bool,
}

/// Planned spending for one category in one calendar month.
///
/// One row per (workspace, category, year, month).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthlyBudget {
    /// Owning workspace.
    pub workspace_id: WorkspaceId,
    /// Budgeted category.
    pub category_id: CategoryId,
    /// Calendar year.
    pub year: i32,
    /// Month number (1-12).
    pub month: u32,
    /// Planned amount.
    pub planned: Decimal,
    /// Currency of the planned amount (the workspace currency).
    pub currency: Currency,
}

/// Planned-vs-actual result for one budgeted category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetLineResult {
    /// The budgeted category.
    pub category_id: CategoryId,
    /// Planned amount for the period.
    pub planned: Decimal,
    /// Spent amount in the budget's currency.
    pub spent: Decimal,
    /// planned - spent (negative when overspent).
    pub remaining: Decimal,
    /// spent / planned * 100, rounded to 2 dp; 0 when nothing was planned.
    pub percentage: Decimal,
    /// True when spent exceeds a non-zero plan.
    pub is_over_budget: bool,
}

/// Workspace-level totals across all budgeted categories.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkspaceSummary {
    /// Sum of planned amounts over the emitted lines.
    pub total_planned: Decimal,
    /// Sum of spent amounts over the emitted lines.
    pub total_spent: Decimal,
    /// total_spent / total_planned * 100, rounded to 2 dp; 0 when nothing
    /// was planned.
    pub overall_percentage: Decimal,
}

/// The monthly budget overview for a workspace.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetOverview {
    /// The period the overview covers.
    pub period: Period,
    /// One line per budgeted category, ordered by category name.
    pub lines: Vec<BudgetLineResult>,
    /// Totals recomputed from `lines`.
    pub summary: WorkspaceSummary,
}
