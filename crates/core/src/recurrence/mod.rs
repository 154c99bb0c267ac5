//! Due-date calculation for recurring definitions.
//!
//! This module implements the pure scheduling core:
//! - Calendar-accurate date stepping per frequency
//! - Iterative enumeration of missed occurrences
//! - Backlog capping with overflow reporting

pub mod schedule;
pub mod types;

#[cfg(test)]
mod props;

pub use schedule::{RecurrenceCalculator, Schedule, MAX_OCCURRENCES_PER_RUN};
pub use types::{Frequency, RecurringDefinition};
