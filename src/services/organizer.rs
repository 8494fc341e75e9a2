//! Pin/category reorganizer.
//!
//! Rebuilds the display catalog from the flat tracker list: pinned trackers
//! form a synthesized pseudo-category sorted first, everything else is grouped
//! by its original category in alphabetical order. The pseudo-category only
//! exists in the returned value and is never persisted.

use crate::models::tracker::{Tracker, TrackerCategory};
use std::collections::BTreeMap;

/// Default title of the synthesized pinned pseudo-category.
pub const PINNED_CATEGORY_TITLE: &str = "Pinned";

/// Partition trackers into display categories.
///
/// Trackers without an `original_category` fall back to `default_category`.
pub fn reorganize(trackers: &[Tracker], default_category: &str) -> Vec<TrackerCategory> {
    reorganize_with_pinned_title(trackers, default_category, PINNED_CATEGORY_TITLE)
}

/// Same as [`reorganize`] with a caller-supplied pinned-category title
/// (localized UIs override the default).
pub fn reorganize_with_pinned_title(
    trackers: &[Tracker],
    default_category: &str,
    pinned_title: &str,
) -> Vec<TrackerCategory> {
    let mut pinned: Vec<Tracker> = Vec::new();
    let mut by_category: BTreeMap<String, Vec<Tracker>> = BTreeMap::new();

    for tracker in trackers {
        if tracker.is_pinned {
            pinned.push(tracker.clone());
        } else {
            let title = tracker
                .original_category
                .clone()
                .unwrap_or_else(|| default_category.to_string());
            by_category.entry(title).or_default().push(tracker.clone());
        }
    }

    let mut categories = Vec::with_capacity(by_category.len() + 1);
    if !pinned.is_empty() {
        categories.push(TrackerCategory::new(pinned_title, pinned));
    }
    // BTreeMap iteration gives the alphabetical order.
    categories.extend(
        by_category
            .into_iter()
            .map(|(title, trackers)| TrackerCategory { title, trackers }),
    );
    categories
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::tracker::TrackerId;
    use crate::models::weekday::WeekDay;

    fn tracker(title: &str, pinned: bool, category: Option<&str>) -> Tracker {
        Tracker {
            id: TrackerId::new(),
            title: title.to_string(),
            color: "#35347C".to_string(),
            emoji: "📌".to_string(),
            schedule: WeekDay::ALL.into_iter().collect(),
            is_pinned: pinned,
            creation_date: None,
            original_category: category.map(str::to_string),
        }
    }

    #[test]
    fn test_pinned_category_first_then_alphabetical() {
        let trackers = vec![
            tracker("Water", false, Some("Health")),
            tracker("Budget", true, Some("Finance")),
            tracker("Read", false, Some("Growth")),
            tracker("Gym", true, Some("Health")),
            tracker("Stretch", false, Some("Health")),
        ];

        let categories = reorganize(&trackers, "Important");
        let titles: Vec<&str> = categories.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, vec!["Pinned", "Growth", "Health"]);
        assert_eq!(categories[0].trackers.len(), 2);
        assert_eq!(categories[2].trackers.len(), 2);

        let total: usize = categories.iter().map(|c| c.trackers.len()).sum();
        assert_eq!(total, trackers.len(), "no tracker duplicated or lost");
    }

    #[test]
    fn test_no_pinned_category_when_nothing_pinned() {
        let trackers = vec![tracker("Water", false, Some("Health"))];
        let categories = reorganize(&trackers, "Important");
        assert_eq!(categories.len(), 1);
        assert_eq!(categories[0].title, "Health");
    }

    #[test]
    fn test_missing_category_falls_back_to_default() {
        let trackers = vec![tracker("Water", false, None)];
        let categories = reorganize(&trackers, "Important");
        assert_eq!(categories[0].title, "Important");
    }

    #[test]
    fn test_custom_pinned_title() {
        let trackers = vec![tracker("Gym", true, Some("Health"))];
        let categories = reorganize_with_pinned_title(&trackers, "Important", "Закрепленные");
        assert_eq!(categories[0].title, "Закрепленные");
    }

    #[test]
    fn test_empty_input_yields_empty_catalog() {
        assert!(reorganize(&[], "Important").is_empty());
    }
}
