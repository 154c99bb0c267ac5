//! Property-based tests for recurrence date stepping and enumeration.

use chrono::{Datelike, NaiveDate};
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::schedule::{RecurrenceCalculator, MAX_OCCURRENCES_PER_RUN};
use super::types::{Frequency, RecurringDefinition};
use moneta_shared::types::{CategoryId, RecurringDefinitionId, WorkspaceId};
use moneta_shared::Currency;

/// Strategy to generate an arbitrary calendar date between 2000 and 2059.
fn any_date() -> impl Strategy<Value = NaiveDate> {
    (2000i32..2060, 1u32..=12, 1u32..=31).prop_map(|(y, m, d)| {
        // Clamp the day so every generated triple is a real date.
        let mut day = d;
        loop {
            if let Some(date) = NaiveDate::from_ymd_opt(y, m, day) {
                return date;
            }
            day -= 1;
        }
    })
}

/// Strategy to generate a frequency.
fn any_frequency() -> impl Strategy<Value = Frequency> {
    prop_oneof![
        Just(Frequency::Weekly),
        Just(Frequency::Monthly),
        Just(Frequency::Quarterly),
        Just(Frequency::Yearly),
    ]
}

fn definition(frequency: Frequency, next_due: NaiveDate) -> RecurringDefinition {
    RecurringDefinition {
        id: RecurringDefinitionId::new(),
        workspace_id: WorkspaceId::new(),
        category_id: CategoryId::new(),
        amount: Decimal::ONE_HUNDRED,
        currency: Currency::Usd,
        frequency,
        start_date: next_due,
        end_date: None,
        next_due_date: next_due,
        last_processed_date: None,
        is_active: true,
        note: String::new(),
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// Every step strictly advances the date.
    #[test]
    fn prop_advance_is_strictly_increasing(
        date in any_date(),
        frequency in any_frequency(),
    ) {
        prop_assert!(frequency.advance(date) > date);
    }

    /// A weekly step is exactly seven days.
    #[test]
    fn prop_weekly_step_is_seven_days(date in any_date()) {
        let next = Frequency::Weekly.advance(date);
        prop_assert_eq!((next - date).num_days(), 7);
    }

    /// A monthly step preserves the day-of-month whenever the target month
    /// is long enough, and otherwise lands on the target month's last day.
    #[test]
    fn prop_monthly_step_preserves_or_clamps_day(date in any_date()) {
        let next = Frequency::Monthly.advance(date);
        if next.day() != date.day() {
            // Clamped: must be the last day of the target month, and the
            // original day must not fit in it.
            prop_assert!(next.day() < date.day());
            let past_last = NaiveDate::from_ymd_opt(next.year(), next.month(), next.day() + 1);
            prop_assert!(past_last.is_none());
        }
    }

    /// Month-based steps land in the expected calendar month.
    #[test]
    fn prop_month_steps_land_in_target_month(date in any_date()) {
        let months_of = |frequency: Frequency| match frequency {
            Frequency::Monthly => 1,
            Frequency::Quarterly => 3,
            Frequency::Yearly => 12,
            Frequency::Weekly => unreachable!(),
        };
        for frequency in [Frequency::Monthly, Frequency::Quarterly, Frequency::Yearly] {
            let next = frequency.advance(date);
            let expected = date.month0() as i32 + months_of(frequency) + date.year() * 12;
            prop_assert_eq!(next.year() * 12 + next.month0() as i32, expected);
        }
    }

    /// Enumerated occurrences are strictly ascending, within `(.., now]`,
    /// bounded by the cap, and leave the cursor one step past the last one.
    #[test]
    fn prop_enumeration_is_ordered_bounded_and_consistent(
        next_due in any_date(),
        frequency in any_frequency(),
        horizon_days in 0i64..2000,
    ) {
        let now = next_due + chrono::Duration::days(horizon_days);
        let def = definition(frequency, next_due);
        let schedule = RecurrenceCalculator::due_occurrences(&def, now);

        prop_assert!(schedule.occurrences.len() <= MAX_OCCURRENCES_PER_RUN);
        prop_assert!(schedule.occurrences.windows(2).all(|w| w[0] < w[1]));
        prop_assert!(schedule.occurrences.iter().all(|d| *d <= now));
        match schedule.occurrences.last() {
            Some(last) => {
                prop_assert_eq!(schedule.next_due_date, frequency.advance(*last));
            }
            None => prop_assert_eq!(schedule.next_due_date, next_due),
        }
        if !schedule.overflowed {
            prop_assert!(schedule.next_due_date > now);
        }
    }

    /// Draining an overflowed backlog over repeated runs yields the same
    /// occurrence set as unbounded enumeration: no duplicates, no gaps.
    #[test]
    fn prop_repeated_runs_drain_backlog_completely(
        next_due in any_date(),
        weeks in 25u32..120,
    ) {
        let now = next_due + chrono::Duration::weeks(i64::from(weeks));
        let mut def = definition(Frequency::Weekly, next_due);
        let mut collected = Vec::new();

        loop {
            let schedule = RecurrenceCalculator::due_occurrences(&def, now);
            collected.extend(schedule.occurrences.iter().copied());
            def.next_due_date = schedule.next_due_date;
            if !schedule.overflowed {
                break;
            }
        }

        prop_assert_eq!(collected.len(), weeks as usize + 1);
        prop_assert!(collected.windows(2).all(|w| (w[1] - w[0]).num_days() == 7));
    }
}
