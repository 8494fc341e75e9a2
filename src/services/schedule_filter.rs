//! Schedule filter: which trackers are due on a date.
//!
//! Habits are due on the weekdays in their schedule. Irregular events follow
//! an asymmetric rule: a one-off event stays visible (pending) on every day
//! until it is resolved, then vanishes from all days except its completion
//! day, where it remains visible so the user can see or undo it.

use crate::ledger::CompletionLedger;
use crate::models::tracker::{Tracker, TrackerCategory};
use crate::models::weekday::WeekDay;
use chrono::NaiveDate;
use log::debug;

/// Filter a catalog down to the trackers due on `on_date`.
///
/// Categories whose tracker list ends up empty are omitted; relative tracker
/// order within a category is preserved.
pub fn due_trackers(
    catalog: &[TrackerCategory],
    ledger: &CompletionLedger,
    on_date: NaiveDate,
) -> Vec<TrackerCategory> {
    let weekday = WeekDay::from_date(on_date);
    debug!("filtering catalog for {on_date} ({weekday:?})");

    catalog
        .iter()
        .filter_map(|category| {
            let trackers: Vec<Tracker> = category
                .trackers
                .iter()
                .filter(|tracker| is_due(tracker, ledger, on_date, weekday))
                .cloned()
                .collect();
            if trackers.is_empty() {
                None
            } else {
                Some(TrackerCategory::new(category.title.clone(), trackers))
            }
        })
        .collect()
}

fn is_due(
    tracker: &Tracker,
    ledger: &CompletionLedger,
    on_date: NaiveDate,
    weekday: WeekDay,
) -> bool {
    if tracker.is_irregular_event() {
        // Pending until resolved anywhere, afterwards only on the resolution day.
        if ledger.ever_completed(tracker.id) {
            ledger.is_completed(tracker.id, on_date)
        } else {
            true
        }
    } else {
        tracker.schedule.contains(&weekday)
    }
}
