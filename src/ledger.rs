//! The completion ledger.
//!
//! A set of (tracker id, calendar day) pairs recording which trackers were
//! marked done on which days. Identity is day-granular: records are normalized
//! to the local calendar day at construction, so no two records can differ
//! only in time-of-day. There is no update operation; unmark + mark is the
//! edit path.

use crate::models::time::day_of;
use crate::models::tracker::TrackerId;
use chrono::{DateTime, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// One completion: a tracker marked done on a calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CompletionRecord {
    pub tracker_id: TrackerId,
    pub date: NaiveDate,
}

impl CompletionRecord {
    /// Build a record from a timestamp, truncating it to the local day.
    pub fn new(tracker_id: TrackerId, date: DateTime<Local>) -> Self {
        Self {
            tracker_id,
            date: day_of(date),
        }
    }

    pub fn on_day(tracker_id: TrackerId, date: NaiveDate) -> Self {
        Self { tracker_id, date }
    }
}

/// In-memory set of completion records.
#[derive(Debug, Clone, Default)]
pub struct CompletionLedger {
    records: HashSet<CompletionRecord>,
}

impl CompletionLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: impl IntoIterator<Item = CompletionRecord>) -> Self {
        Self {
            records: records.into_iter().collect(),
        }
    }

    pub fn is_completed(&self, tracker_id: TrackerId, date: NaiveDate) -> bool {
        self.records
            .contains(&CompletionRecord::on_day(tracker_id, date))
    }

    /// Whether the tracker was ever completed, on any day.
    pub fn ever_completed(&self, tracker_id: TrackerId) -> bool {
        self.records.iter().any(|r| r.tracker_id == tracker_id)
    }

    /// Idempotent insert. Returns `true` if the record was newly added.
    pub fn complete(&mut self, tracker_id: TrackerId, date: NaiveDate) -> bool {
        self.records
            .insert(CompletionRecord::on_day(tracker_id, date))
    }

    /// Idempotent removal. Returns `true` if a record was present.
    pub fn uncomplete(&mut self, tracker_id: TrackerId, date: NaiveDate) -> bool {
        self.records
            .remove(&CompletionRecord::on_day(tracker_id, date))
    }

    /// Remove every record belonging to a tracker. Returns the removed count.
    pub fn remove_tracker(&mut self, tracker_id: TrackerId) -> usize {
        let before = self.records.len();
        self.records.retain(|r| r.tracker_id != tracker_id);
        before - self.records.len()
    }

    /// Number of days the tracker has been completed on.
    pub fn count_completions(&self, tracker_id: TrackerId) -> usize {
        self.records
            .iter()
            .filter(|r| r.tracker_id == tracker_id)
            .count()
    }

    /// Group records by day, ascending. Days without records are absent.
    pub fn group_by_day(&self) -> BTreeMap<NaiveDate, Vec<&CompletionRecord>> {
        let mut grouped: BTreeMap<NaiveDate, Vec<&CompletionRecord>> = BTreeMap::new();
        for record in &self.records {
            grouped.entry(record.date).or_default().push(record);
        }
        grouped
    }

    /// Total number of records, all trackers, all time.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CompletionRecord> {
        self.records.iter()
    }
}
