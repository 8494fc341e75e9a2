//! Persisted record forms.
//!
//! Whatever store backs the repository must preserve these shapes: tracker
//! id, title, color hex, emoji, schedule bitmask, pinned flag, creation date,
//! original category, and per-record (tracker id, day) pairs with day
//! granularity. Conversion into domain types is fallible; malformed rows
//! surface as [`RepositoryError::Decoding`].

use crate::db::error::RepositoryError;
use crate::ledger::CompletionRecord;
use crate::models::tracker::{StatisticsSnapshot, Tracker, TrackerId};
use crate::models::weekday::WeekDay;
use chrono::{DateTime, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Persisted form of a [`Tracker`]: schedule flattened to a bitmask.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackerRow {
    pub id: Uuid,
    pub title: String,
    pub color: String,
    pub emoji: String,
    pub schedule: i64,
    pub is_pinned: bool,
    pub creation_date: Option<DateTime<Local>>,
    pub original_category: Option<String>,
}

impl From<&Tracker> for TrackerRow {
    fn from(tracker: &Tracker) -> Self {
        Self {
            id: tracker.id.0,
            title: tracker.title.clone(),
            color: tracker.color.clone(),
            emoji: tracker.emoji.clone(),
            schedule: WeekDay::encode(&tracker.schedule),
            is_pinned: tracker.is_pinned,
            creation_date: tracker.creation_date,
            original_category: tracker.original_category.clone(),
        }
    }
}

impl TryFrom<TrackerRow> for Tracker {
    type Error = RepositoryError;

    fn try_from(row: TrackerRow) -> Result<Self, Self::Error> {
        if row.title.trim().is_empty() {
            return Err(RepositoryError::decoding(format!(
                "tracker {} has an empty title",
                row.id
            )));
        }
        if row.color.trim().is_empty() {
            return Err(RepositoryError::decoding(format!(
                "tracker {} has an empty color",
                row.id
            )));
        }

        Ok(Tracker {
            id: TrackerId(row.id),
            title: row.title,
            color: row.color,
            emoji: row.emoji,
            schedule: WeekDay::decode(row.schedule),
            is_pinned: row.is_pinned,
            creation_date: row.creation_date,
            original_category: row.original_category,
        })
    }
}

/// Persisted form of a [`CompletionRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CompletionRow {
    pub tracker_id: Uuid,
    pub date: NaiveDate,
}

impl From<&CompletionRecord> for CompletionRow {
    fn from(record: &CompletionRecord) -> Self {
        Self {
            tracker_id: record.tracker_id.0,
            date: record.date,
        }
    }
}

impl From<CompletionRow> for CompletionRecord {
    fn from(row: CompletionRow) -> Self {
        CompletionRecord::on_day(TrackerId(row.tracker_id), row.date)
    }
}

/// Persisted form of the latest [`StatisticsSnapshot`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatisticsRow {
    pub completed_trackers: u32,
    pub ideal_days: u32,
    pub average_completion: u32,
    pub best_streak: u32,
}

impl From<&StatisticsSnapshot> for StatisticsRow {
    fn from(snapshot: &StatisticsSnapshot) -> Self {
        Self {
            completed_trackers: snapshot.completed_trackers,
            ideal_days: snapshot.ideal_days,
            average_completion: snapshot.average_completion,
            best_streak: snapshot.best_streak,
        }
    }
}

impl From<StatisticsRow> for StatisticsSnapshot {
    fn from(row: StatisticsRow) -> Self {
        Self {
            completed_trackers: row.completed_trackers,
            ideal_days: row.ideal_days,
            average_completion: row.average_completion,
            best_streak: row.best_streak,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn sample_tracker() -> Tracker {
        Tracker {
            id: TrackerId::new(),
            title: "Gym".to_string(),
            color: "#33CF69".to_string(),
            emoji: "💪".to_string(),
            schedule: BTreeSet::from([WeekDay::Monday, WeekDay::Wednesday]),
            is_pinned: true,
            creation_date: None,
            original_category: Some("Health".to_string()),
        }
    }

    #[test]
    fn test_tracker_row_roundtrip() {
        let tracker = sample_tracker();
        let row = TrackerRow::from(&tracker);
        assert_eq!(row.schedule, 0b0000101);

        let decoded = Tracker::try_from(row).unwrap();
        assert_eq!(decoded, tracker);
    }

    #[test]
    fn test_empty_title_fails_decoding() {
        let mut row = TrackerRow::from(&sample_tracker());
        row.title = "   ".to_string();
        let err = Tracker::try_from(row).unwrap_err();
        assert!(matches!(err, RepositoryError::Decoding(_)));
    }

    #[test]
    fn test_empty_color_fails_decoding() {
        let mut row = TrackerRow::from(&sample_tracker());
        row.color = String::new();
        let err = Tracker::try_from(row).unwrap_err();
        assert!(matches!(err, RepositoryError::Decoding(_)));
    }

    #[test]
    fn test_unknown_schedule_bits_are_dropped_on_decode() {
        let mut row = TrackerRow::from(&sample_tracker());
        row.schedule |= 1 << 12;
        let decoded = Tracker::try_from(row).unwrap();
        assert_eq!(
            decoded.schedule,
            BTreeSet::from([WeekDay::Monday, WeekDay::Wednesday])
        );
    }

    #[test]
    fn test_tracker_row_json_keeps_bitmask_schedule() {
        let row = TrackerRow::from(&sample_tracker());
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["schedule"], serde_json::json!(0b0000101));
        assert_eq!(json["title"], serde_json::json!("Gym"));

        let parsed: TrackerRow = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, row);
    }

    #[test]
    fn test_completion_row_roundtrip() {
        let record =
            CompletionRecord::on_day(TrackerId::new(), NaiveDate::from_ymd_opt(2024, 1, 3).unwrap());
        let row = CompletionRow::from(&record);
        assert_eq!(CompletionRecord::from(row), record);
    }
}
