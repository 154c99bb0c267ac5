//! Occurrence enumeration for recurring definitions.

use chrono::NaiveDate;

use super::types::RecurringDefinition;

/// Maximum occurrences emitted per definition per invocation.
///
/// Bounds pathological backlogs (a definition untouched for years). A capped
/// run reports overflow and leaves the cursor positioned so the remainder
/// drains on the next call; missed occurrences are never dropped.
pub const MAX_OCCURRENCES_PER_RUN: usize = 24;

/// The due occurrences of one definition at a reference date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schedule {
    /// Due dates in ascending order, all within `(last_processed, now]`.
    pub occurrences: Vec<NaiveDate>,
    /// Cursor position after the emitted occurrences; to be persisted.
    pub next_due_date: NaiveDate,
    /// True when the backlog was truncated at [`MAX_OCCURRENCES_PER_RUN`].
    pub overflowed: bool,
    /// True when the cursor has passed `end_date`; the definition must be
    /// deactivated once the emitted occurrences are materialized.
    pub exhausted: bool,
}

impl Schedule {
    /// Returns true if nothing is due and no state change is needed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.occurrences.is_empty() && !self.exhausted
    }
}

/// Pure calculator for recurrence schedules.
pub struct RecurrenceCalculator;

impl RecurrenceCalculator {
    /// Enumerates the occurrences of `definition` that are due at `now`.
    ///
    /// Iterates from the stored `next_due_date`: each date `<= now` (and not
    /// past `end_date`) is emitted and the cursor advances one frequency
    /// step. Stops at `now`, at `end_date` (marking the schedule exhausted),
    /// or at the overflow cap.
    #[must_use]
    pub fn due_occurrences(definition: &RecurringDefinition, now: NaiveDate) -> Schedule {
        let mut due = definition.next_due_date;
        let mut occurrences = Vec::new();
        let mut overflowed = false;

        while due <= now {
            if definition.end_date.is_some_and(|end| due > end) {
                break;
            }
            if occurrences.len() == MAX_OCCURRENCES_PER_RUN {
                overflowed = true;
                break;
            }
            occurrences.push(due);
            due = definition.frequency.advance(due);
        }

        let exhausted = definition.end_date.is_some_and(|end| due > end);

        Schedule {
            occurrences,
            next_due_date: due,
            overflowed,
            exhausted,
        }
    }
}
