//! In-memory repository for unit testing and local development.

use crate::db::error::{RepositoryError, RepositoryResult};
use crate::db::models::{CompletionRow, StatisticsRow, TrackerRow};
use crate::db::repository::TrackerRepository;
use crate::ledger::CompletionRecord;
use crate::models::tracker::{StatisticsSnapshot, Tracker, TrackerCategory, TrackerId};
use async_trait::async_trait;
use log::warn;
use parking_lot::RwLock;
use std::collections::HashSet;
use uuid::Uuid;

#[derive(Debug, Clone, Default)]
struct StoredCategory {
    title: String,
    tracker_ids: Vec<Uuid>,
}

#[derive(Debug, Default)]
struct Store {
    trackers: Vec<TrackerRow>,
    categories: Vec<StoredCategory>,
    completions: HashSet<CompletionRow>,
    statistics: Option<StatisticsRow>,
}

/// In-memory implementation of [`TrackerRepository`].
///
/// State lives behind an `RwLock`; every call takes the lock for its whole
/// (synchronous) body, so reads observe either all or none of a mutation.
#[derive(Default)]
pub struct LocalRepository {
    store: RwLock<Store>,
}

impl LocalRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a raw persisted row, bypassing validation.
    ///
    /// Lets tests and dev tooling reproduce malformed on-disk state that the
    /// load path must skip-and-log.
    pub fn seed_tracker_row(&self, row: TrackerRow, category_title: &str) {
        let mut store = self.store.write();
        let id = row.id;
        store.trackers.push(row);
        attach_to_category(&mut store, id, category_title);
    }
}

fn attach_to_category(store: &mut Store, tracker_id: Uuid, category_title: &str) {
    match store
        .categories
        .iter()
        .position(|c| c.title == category_title)
    {
        Some(index) => {
            let category = &mut store.categories[index];
            if !category.tracker_ids.contains(&tracker_id) {
                category.tracker_ids.push(tracker_id);
            }
        }
        None => store.categories.push(StoredCategory {
            title: category_title.to_string(),
            tracker_ids: vec![tracker_id],
        }),
    }
}

/// Decode a batch of rows, skipping malformed entries with a warning.
fn decode_trackers<'a>(rows: impl Iterator<Item = &'a TrackerRow>) -> Vec<Tracker> {
    rows.filter_map(|row| match Tracker::try_from(row.clone()) {
        Ok(tracker) => Some(tracker),
        Err(err) => {
            warn!("skipping malformed tracker record: {err}");
            None
        }
    })
    .collect()
}

#[async_trait]
impl TrackerRepository for LocalRepository {
    async fn load_trackers(&self) -> RepositoryResult<Vec<Tracker>> {
        let store = self.store.read();
        Ok(decode_trackers(store.trackers.iter()))
    }

    async fn persist_tracker(
        &self,
        tracker: &Tracker,
        category_title: &str,
    ) -> RepositoryResult<()> {
        if tracker.title.trim().is_empty() {
            return Err(RepositoryError::validation("tracker title must not be empty"));
        }

        let mut store = self.store.write();
        let row = TrackerRow::from(tracker);
        match store.trackers.iter().position(|r| r.id == row.id) {
            Some(index) => store.trackers[index] = row,
            None => store.trackers.push(row),
        }
        attach_to_category(&mut store, tracker.id.0, category_title);
        Ok(())
    }

    async fn update_tracker(&self, tracker: &Tracker) -> RepositoryResult<bool> {
        let mut store = self.store.write();
        match store.trackers.iter_mut().find(|r| r.id == tracker.id.0) {
            Some(existing) => {
                *existing = TrackerRow::from(tracker);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_tracker(&self, id: TrackerId) -> RepositoryResult<bool> {
        let mut store = self.store.write();
        let before = store.trackers.len();
        store.trackers.retain(|r| r.id != id.0);
        if store.trackers.len() == before {
            return Ok(false);
        }

        for category in &mut store.categories {
            category.tracker_ids.retain(|tid| *tid != id.0);
        }
        store.completions.retain(|c| c.tracker_id != id.0);
        Ok(true)
    }

    async fn count_trackers(&self) -> RepositoryResult<usize> {
        Ok(self.store.read().trackers.len())
    }

    async fn load_categories(&self) -> RepositoryResult<Vec<TrackerCategory>> {
        let store = self.store.read();
        Ok(store
            .categories
            .iter()
            .map(|category| {
                let rows = category
                    .tracker_ids
                    .iter()
                    .filter_map(|id| store.trackers.iter().find(|r| r.id == *id));
                TrackerCategory::new(category.title.clone(), decode_trackers(rows))
            })
            .collect())
    }

    async fn add_category(&self, title: &str) -> RepositoryResult<()> {
        if title.trim().is_empty() {
            return Err(RepositoryError::validation("category title must not be empty"));
        }

        let mut store = self.store.write();
        if store.categories.iter().any(|c| c.title == title) {
            return Ok(());
        }
        store.categories.push(StoredCategory {
            title: title.to_string(),
            tracker_ids: vec![],
        });
        Ok(())
    }

    async fn rename_category(&self, old_title: &str, new_title: &str) -> RepositoryResult<bool> {
        let mut store = self.store.write();
        match store.categories.iter_mut().find(|c| c.title == old_title) {
            Some(category) => {
                category.title = new_title.to_string();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_category(&self, title: &str) -> RepositoryResult<bool> {
        let mut store = self.store.write();
        let before = store.categories.len();
        store.categories.retain(|c| c.title != title);
        Ok(store.categories.len() != before)
    }

    async fn category_title_for(&self, id: TrackerId) -> RepositoryResult<Option<String>> {
        let store = self.store.read();
        Ok(store
            .categories
            .iter()
            .find(|c| c.tracker_ids.contains(&id.0))
            .map(|c| c.title.clone()))
    }

    async fn load_completions(&self) -> RepositoryResult<Vec<CompletionRecord>> {
        let store = self.store.read();
        Ok(store
            .completions
            .iter()
            .copied()
            .map(CompletionRecord::from)
            .collect())
    }

    async fn persist_completion(&self, record: &CompletionRecord) -> RepositoryResult<()> {
        self.store.write().completions.insert(CompletionRow::from(record));
        Ok(())
    }

    async fn remove_completion(&self, record: &CompletionRecord) -> RepositoryResult<()> {
        self.store.write().completions.remove(&CompletionRow::from(record));
        Ok(())
    }

    async fn load_statistics(&self) -> RepositoryResult<Option<StatisticsSnapshot>> {
        Ok(self.store.read().statistics.map(StatisticsSnapshot::from))
    }

    async fn persist_statistics(&self, snapshot: &StatisticsSnapshot) -> RepositoryResult<()> {
        self.store.write().statistics = Some(StatisticsRow::from(snapshot));
        Ok(())
    }
}
