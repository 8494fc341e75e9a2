//! Tracker domain entities.

use crate::models::weekday::WeekDay;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use uuid::Uuid;

/// Opaque unique tracker identity.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct TrackerId(pub Uuid);

impl TrackerId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for TrackerId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for TrackerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A habit or irregular event.
///
/// A tracker is an irregular event iff it is scheduled on exactly one weekday
/// and carries a creation date; everything else is a habit recurring on the
/// weekdays in `schedule`. Mutation is whole-record replacement only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tracker {
    pub id: TrackerId,
    pub title: String,
    /// Display color as a hex string, e.g. `#FD4C49`.
    pub color: String,
    pub emoji: String,
    pub schedule: BTreeSet<WeekDay>,
    pub is_pinned: bool,
    pub creation_date: Option<DateTime<Local>>,
    /// The category the tracker belongs to when unpinned.
    pub original_category: Option<String>,
}

impl Tracker {
    /// One-off event semantics: exactly one scheduled day and a creation date.
    pub fn is_irregular_event(&self) -> bool {
        self.schedule.len() == 1 && self.creation_date.is_some()
    }
}

/// A titled, ordered group of trackers.
///
/// Category titles are unique within a catalog. The "Pinned" pseudo-category
/// is synthesized at read time and never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackerCategory {
    pub title: String,
    pub trackers: Vec<Tracker>,
}

impl TrackerCategory {
    pub fn new(title: impl Into<String>, trackers: Vec<Tracker>) -> Self {
        Self {
            title: title.into(),
            trackers,
        }
    }
}

/// Aggregate statistics derived from the completion ledger.
///
/// A pure derived value: recomputed fully after every ledger mutation, and the
/// previous snapshot is overwritten.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatisticsSnapshot {
    /// All-time number of completion records, over all trackers.
    pub completed_trackers: u32,
    /// Days on which every tracker in the catalog was completed.
    pub ideal_days: u32,
    /// Rounded percentage (0-100) of trackers completed today.
    pub average_completion: u32,
    /// Longest run of consecutive days with at least one completion.
    pub best_streak: u32,
}
