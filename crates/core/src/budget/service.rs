//! Budget aggregation service.

use std::collections::{HashMap, HashSet};

use moneta_shared::types::CategoryId;
use moneta_shared::Period;
use rust_decimal::Decimal;

use crate::transaction::{Transaction, TransactionType};

use super::types::{
    BudgetCategory, BudgetLineResult, BudgetOverview, MonthlyBudget, WorkspaceSummary,
};

/// Read-only aggregator over categories, budgets and transactions.
///
/// Raises no domain errors: malformed inputs (a budget row referencing a
/// deleted category, a duplicate budget row, an out-of-period transaction)
/// are skipped rather than failing the whole overview.
pub struct BudgetAggregator;

impl BudgetAggregator {
    /// Computes the budget overview for one workspace month.
    ///
    /// Emits one line per budget row whose category still exists; categories
    /// without a budget row are excluded ("budgeted only"). Spent amounts
    /// take each transaction's locked converted amount when its currency
    /// differs from the budget's, else the raw amount. Uncategorized
    /// transactions never enter category lines.
    #[must_use]
    pub fn overview(
        period: Period,
        categories: &[BudgetCategory],
        budgets: &[MonthlyBudget],
        transactions: &[Transaction],
    ) -> BudgetOverview {
        let category_names: HashMap<CategoryId, &str> = categories
            .iter()
            .map(|c| (c.id, c.name.as_str()))
            .collect();

        let mut seen = HashSet::new();
        let mut lines: Vec<BudgetLineResult> = budgets
            .iter()
            .filter(|b| b.year == period.year && b.month == period.month)
            .filter(|b| category_names.contains_key(&b.category_id))
            .filter(|b| seen.insert(b.category_id))
            .map(|budget| Self::line(budget, transactions, period))
            .collect();

        lines.sort_by(|a, b| {
            let name_of = |line: &BudgetLineResult| category_names.get(&line.category_id).copied();
            name_of(a)
                .cmp(&name_of(b))
                .then_with(|| a.category_id.into_inner().cmp(&b.category_id.into_inner()))
        });

        let summary = Self::summarize(&lines);

        BudgetOverview {
            period,
            lines,
            summary,
        }
    }

    /// Computes one planned-vs-actual line.
    fn line(
        budget: &MonthlyBudget,
        transactions: &[Transaction],
        period: Period,
    ) -> BudgetLineResult {
        let spent: Decimal = transactions
            .iter()
            .filter(|t| t.transaction_type == TransactionType::Expense)
            .filter(|t| t.category_id == Some(budget.category_id))
            .filter(|t| period.contains(t.transaction_date))
            .map(|t| t.amount_in(budget.currency))
            .sum();

        let planned = budget.planned;
        BudgetLineResult {
            category_id: budget.category_id,
            planned,
            spent,
            remaining: planned - spent,
            percentage: Self::percentage(spent, planned),
            is_over_budget: spent > planned && planned > Decimal::ZERO,
        }
    }

    /// Recomputes the workspace summary directly from the emitted lines.
    fn summarize(lines: &[BudgetLineResult]) -> WorkspaceSummary {
        let total_planned: Decimal = lines.iter().map(|l| l.planned).sum();
        let total_spent: Decimal = lines.iter().map(|l| l.spent).sum();

        WorkspaceSummary {
            total_planned,
            total_spent,
            overall_percentage: Self::percentage(total_spent, total_planned),
        }
    }

    /// spent / planned * 100 rounded to 2 dp; 0 when planned is 0 (never a
    /// divide-by-zero or NaN).
    fn percentage(spent: Decimal, planned: Decimal) -> Decimal {
        if planned.is_zero() {
            Decimal::ZERO
        } else {
            (spent / planned * Decimal::ONE_HUNDRED).round_dp(2)
        }
    }
}
