//! Statistics aggregation over the completion ledger.
//!
//! Everything here is a full recomputation from the current ledger and the
//! catalog size; no incremental state is carried between calls. The caller
//! persists the returned snapshot, overwriting the previous one.

use crate::ledger::CompletionLedger;
use crate::models::tracker::StatisticsSnapshot;
use chrono::NaiveDate;

/// Derive a statistics snapshot from the ledger.
///
/// * `tracker_count` is the size of the full tracker catalog (N).
/// * `today` anchors the average-completion metric; passing it explicitly
///   keeps the computation deterministic for callers and tests.
pub fn compute_statistics(
    ledger: &CompletionLedger,
    tracker_count: usize,
    today: NaiveDate,
) -> StatisticsSnapshot {
    let grouped = ledger.group_by_day();

    let completed_trackers = ledger.len() as u32;

    // A day is ideal when every tracker in the catalog was completed on it.
    // An empty catalog has no ideal days: days carry at least one entry, so
    // their counts can never equal zero.
    let ideal_days = if tracker_count == 0 {
        0
    } else {
        grouped
            .values()
            .filter(|entries| entries.len() == tracker_count)
            .count() as u32
    };

    let completions_today = grouped.get(&today).map_or(0, |entries| entries.len());
    let average_completion = if tracker_count > 0 {
        (100.0 * completions_today as f64 / tracker_count as f64).round() as u32
    } else {
        0
    };

    let best_streak = best_streak(grouped.keys().copied());

    StatisticsSnapshot {
        completed_trackers,
        ideal_days,
        average_completion,
        best_streak,
    }
}

/// Longest run of consecutive days, given distinct days in ascending order.
fn best_streak(days: impl Iterator<Item = NaiveDate>) -> u32 {
    let mut best = 0u32;
    let mut current = 0u32;
    let mut previous: Option<NaiveDate> = None;

    for day in days {
        current = match previous {
            Some(prev) if (day - prev).num_days() == 1 => current + 1,
            _ => 1,
        };
        best = best.max(current);
        previous = Some(day);
    }

    best
}
