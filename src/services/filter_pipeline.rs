//! Status and search filters composed on top of the schedule filter.
//!
//! The pipeline order is fixed: schedule filter first, then the status
//! filter, then the title search. All three are intersective predicates, but
//! keeping the order deterministic keeps the `Today` re-anchoring observable
//! in one place. Categories left empty after any stage are dropped.

use crate::ledger::CompletionLedger;
use crate::models::time;
use crate::models::tracker::TrackerCategory;
use crate::services::schedule_filter::due_trackers;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Status filter selected in the filter list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackerFilter {
    AllTrackers,
    TodayTrackers,
    CompletedTrackers,
    UncompletedTrackers,
}

impl TrackerFilter {
    pub const ALL: [TrackerFilter; 4] = [
        TrackerFilter::AllTrackers,
        TrackerFilter::TodayTrackers,
        TrackerFilter::CompletedTrackers,
        TrackerFilter::UncompletedTrackers,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TrackerFilter::AllTrackers => "all_trackers",
            TrackerFilter::TodayTrackers => "today_trackers",
            TrackerFilter::CompletedTrackers => "completed_trackers",
            TrackerFilter::UncompletedTrackers => "uncompleted_trackers",
        }
    }
}

impl FromStr for TrackerFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all_trackers" => Ok(TrackerFilter::AllTrackers),
            "today_trackers" => Ok(TrackerFilter::TodayTrackers),
            "completed_trackers" => Ok(TrackerFilter::CompletedTrackers),
            "uncompleted_trackers" => Ok(TrackerFilter::UncompletedTrackers),
            other => Err(format!("Unknown tracker filter: {other}")),
        }
    }
}

/// Result of the filter pipeline.
///
/// `date` is the date the view was actually computed for. It differs from the
/// requested date only for [`TrackerFilter::TodayTrackers`], which re-anchors
/// the view to the current date; callers owning an "active date" should adopt
/// it.
#[derive(Debug, Clone, PartialEq)]
pub struct FilteredView {
    pub categories: Vec<TrackerCategory>,
    pub date: NaiveDate,
}

/// Run the full pipeline: schedule filter, status filter, title search.
pub fn apply_filters(
    catalog: &[TrackerCategory],
    ledger: &CompletionLedger,
    date: NaiveDate,
    filter: TrackerFilter,
    search_text: &str,
) -> FilteredView {
    let effective_date = match filter {
        TrackerFilter::TodayTrackers => time::today(),
        _ => date,
    };

    let mut categories = due_trackers(catalog, ledger, effective_date);

    match filter {
        TrackerFilter::AllTrackers | TrackerFilter::TodayTrackers => {}
        TrackerFilter::CompletedTrackers => {
            retain_trackers(&mut categories, |id| ledger.is_completed(id, effective_date));
        }
        TrackerFilter::UncompletedTrackers => {
            retain_trackers(&mut categories, |id| !ledger.is_completed(id, effective_date));
        }
    }

    if !search_text.is_empty() {
        let needle = search_text.to_lowercase();
        retain_by_title(&mut categories, &needle);
    }

    FilteredView {
        categories,
        date: effective_date,
    }
}

fn retain_trackers(
    categories: &mut Vec<TrackerCategory>,
    mut keep: impl FnMut(crate::models::tracker::TrackerId) -> bool,
) {
    for category in categories.iter_mut() {
        category.trackers.retain(|tracker| keep(tracker.id));
    }
    categories.retain(|category| !category.trackers.is_empty());
}

fn retain_by_title(categories: &mut Vec<TrackerCategory>, needle: &str) {
    for category in categories.iter_mut() {
        category
            .trackers
            .retain(|tracker| tracker.title.to_lowercase().contains(needle));
    }
    categories.retain(|category| !category.trackers.is_empty());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::tracker::{Tracker, TrackerId};
    use crate::models::weekday::WeekDay;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn habit(title: &str, days: &[WeekDay]) -> Tracker {
        Tracker {
            id: TrackerId::new(),
            title: title.to_string(),
            color: "#33CF69".to_string(),
            emoji: "🏃".to_string(),
            schedule: days.iter().copied().collect(),
            is_pinned: false,
            creation_date: None,
            original_category: None,
        }
    }

    fn everyday(title: &str) -> Tracker {
        habit(title, &WeekDay::ALL)
    }

    fn catalog(trackers: Vec<Tracker>) -> Vec<TrackerCategory> {
        vec![TrackerCategory::new("Health", trackers)]
    }

    #[test]
    fn test_all_trackers_is_identity_over_schedule_filter() {
        let catalog = catalog(vec![everyday("Run"), habit("Gym", &[WeekDay::Monday])]);
        let ledger = CompletionLedger::new();

        // 2024-01-03 is a Wednesday; only the everyday habit is due.
        let view = apply_filters(
            &catalog,
            &ledger,
            day(2024, 1, 3),
            TrackerFilter::AllTrackers,
            "",
        );
        assert_eq!(view.date, day(2024, 1, 3));
        assert_eq!(view.categories[0].trackers.len(), 1);
        assert_eq!(view.categories[0].trackers[0].title, "Run");
    }

    #[test]
    fn test_completed_filter_keeps_only_completed() {
        let run = everyday("Run");
        let swim = everyday("Swim");
        let run_id = run.id;
        let catalog = catalog(vec![run, swim]);
        let mut ledger = CompletionLedger::new();
        ledger.complete(run_id, day(2024, 1, 3));

        let view = apply_filters(
            &catalog,
            &ledger,
            day(2024, 1, 3),
            TrackerFilter::CompletedTrackers,
            "",
        );
        assert_eq!(view.categories[0].trackers.len(), 1);
        assert_eq!(view.categories[0].trackers[0].title, "Run");
    }

    #[test]
    fn test_uncompleted_filter_keeps_only_uncompleted() {
        let run = everyday("Run");
        let swim = everyday("Swim");
        let run_id = run.id;
        let catalog = catalog(vec![run, swim]);
        let mut ledger = CompletionLedger::new();
        ledger.complete(run_id, day(2024, 1, 3));

        let view = apply_filters(
            &catalog,
            &ledger,
            day(2024, 1, 3),
            TrackerFilter::UncompletedTrackers,
            "",
        );
        assert_eq!(view.categories[0].trackers.len(), 1);
        assert_eq!(view.categories[0].trackers[0].title, "Swim");
    }

    #[test]
    fn test_completion_on_other_day_does_not_count() {
        let run = everyday("Run");
        let run_id = run.id;
        let catalog = catalog(vec![run]);
        let mut ledger = CompletionLedger::new();
        ledger.complete(run_id, day(2024, 1, 2));

        let view = apply_filters(
            &catalog,
            &ledger,
            day(2024, 1, 3),
            TrackerFilter::CompletedTrackers,
            "",
        );
        assert!(view.categories.is_empty());
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let catalog = catalog(vec![everyday("Morning Run"), everyday("Swim")]);
        let ledger = CompletionLedger::new();

        let view = apply_filters(
            &catalog,
            &ledger,
            day(2024, 1, 3),
            TrackerFilter::AllTrackers,
            "run",
        );
        assert_eq!(view.categories[0].trackers.len(), 1);
        assert_eq!(view.categories[0].trackers[0].title, "Morning Run");

        let view = apply_filters(
            &catalog,
            &ledger,
            day(2024, 1, 3),
            TrackerFilter::AllTrackers,
            "RUN",
        );
        assert_eq!(view.categories[0].trackers.len(), 1);
    }

    #[test]
    fn test_search_with_no_match_drops_category() {
        let catalog = catalog(vec![everyday("Swim")]);
        let ledger = CompletionLedger::new();

        let view = apply_filters(
            &catalog,
            &ledger,
            day(2024, 1, 3),
            TrackerFilter::AllTrackers,
            "run",
        );
        assert!(view.categories.is_empty());
    }

    #[test]
    fn test_empty_search_is_identity() {
        let catalog = catalog(vec![everyday("Run"), everyday("Swim")]);
        let ledger = CompletionLedger::new();

        let view = apply_filters(
            &catalog,
            &ledger,
            day(2024, 1, 3),
            TrackerFilter::AllTrackers,
            "",
        );
        assert_eq!(view.categories[0].trackers.len(), 2);
    }

    #[test]
    fn test_today_filter_re_anchors_the_date() {
        let catalog = catalog(vec![everyday("Run")]);
        let ledger = CompletionLedger::new();

        let stale = day(2020, 6, 1);
        let view = apply_filters(&catalog, &ledger, stale, TrackerFilter::TodayTrackers, "");
        assert_eq!(view.date, time::today());
        assert_eq!(view.categories[0].trackers.len(), 1);
    }

    #[test]
    fn test_filter_round_trips_through_str() {
        for filter in TrackerFilter::ALL {
            assert_eq!(filter.as_str().parse::<TrackerFilter>(), Ok(filter));
        }
        assert!("nonsense".parse::<TrackerFilter>().is_err());
    }

    #[test]
    fn test_filter_serializes_to_snake_case() {
        // The serde names and the FromStr names must stay in sync.
        for filter in TrackerFilter::ALL {
            let json = serde_json::to_string(&filter).unwrap();
            assert_eq!(json, format!("\"{}\"", filter.as_str()));
            assert_eq!(serde_json::from_str::<TrackerFilter>(&json).unwrap(), filter);
        }
    }
}
