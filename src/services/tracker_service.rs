//! High-level tracker service.
//!
//! `TrackerService` owns the in-memory catalog and ledger, talks to an
//! injected [`TrackerRepository`] for persistence, and broadcasts change
//! events the presentation layer subscribes to after calling a mutation.
//! Statistics are recomputed from the full ledger after every ledger
//! mutation, then persisted, overwriting the previous snapshot.
//!
//! The service assumes single-writer, single-reader access within one logical
//! operation; it hands out owned snapshots, never mutable aliases into its
//! state.

use crate::db::error::{RepositoryError, RepositoryResult};
use crate::db::repo_config::CatalogSettings;
use crate::db::repository::TrackerRepository;
use crate::ledger::{CompletionLedger, CompletionRecord};
use crate::models::time;
use crate::models::tracker::{StatisticsSnapshot, Tracker, TrackerCategory, TrackerId};
use crate::services::filter_pipeline::{apply_filters, FilteredView, TrackerFilter};
use crate::services::organizer::reorganize_with_pinned_title;
use crate::services::statistics::compute_statistics;
use chrono::{DateTime, Local, NaiveDate};
use log::{debug, warn};
use parking_lot::RwLock;
use std::sync::Arc;
use tokio::sync::broadcast;

/// Change notifications emitted after mutations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackerEvent {
    /// Trackers or categories changed.
    CatalogChanged,
    /// The completion ledger changed.
    CompletionsChanged,
    /// A fresh statistics snapshot was computed and persisted.
    StatisticsChanged,
}

struct ServiceState {
    trackers: Vec<Tracker>,
    ledger: CompletionLedger,
    statistics: StatisticsSnapshot,
    /// The date the tracker list is currently anchored to.
    current_date: NaiveDate,
}

/// Facade over catalog, ledger, statistics and persistence.
pub struct TrackerService {
    repo: Arc<dyn TrackerRepository>,
    catalog: CatalogSettings,
    state: RwLock<ServiceState>,
    events: broadcast::Sender<TrackerEvent>,
}

impl TrackerService {
    /// Load catalog, ledger and the last statistics snapshot from storage.
    pub async fn load(
        repo: Arc<dyn TrackerRepository>,
        catalog: CatalogSettings,
    ) -> RepositoryResult<Self> {
        let trackers = repo.load_trackers().await?;
        let records = repo.load_completions().await?;
        let statistics = repo.load_statistics().await?.unwrap_or_default();
        debug!(
            "loaded {} trackers and {} completion records",
            trackers.len(),
            records.len()
        );

        let (events, _) = broadcast::channel(32);
        Ok(Self {
            repo,
            catalog,
            state: RwLock::new(ServiceState {
                trackers,
                ledger: CompletionLedger::from_records(records),
                statistics,
                current_date: time::today(),
            }),
            events,
        })
    }

    /// Subscribe to change events. Intended for the presentation layer's
    /// refresh logic; lagging subscribers miss events rather than block
    /// mutations.
    pub fn subscribe(&self) -> broadcast::Receiver<TrackerEvent> {
        self.events.subscribe()
    }

    // ========== Views ==========

    /// The date the tracker list is anchored to.
    pub fn current_date(&self) -> NaiveDate {
        self.state.read().current_date
    }

    /// Re-anchor the tracker list to another date (date picker change).
    pub fn set_current_date(&self, date: DateTime<Local>) {
        self.state.write().current_date = time::day_of(date);
    }

    /// The filtered tracker view for the current date.
    ///
    /// Selecting [`TrackerFilter::TodayTrackers`] re-anchors the active date
    /// to today as a side effect.
    pub fn filtered_view(&self, filter: TrackerFilter, search_text: &str) -> FilteredView {
        let mut state = self.state.write();
        let catalog = self.display_catalog(&state.trackers);
        let view = apply_filters(
            &catalog,
            &state.ledger,
            state.current_date,
            filter,
            search_text,
        );
        state.current_date = view.date;
        view
    }

    /// The full display catalog: pinned pseudo-category first, the remaining
    /// categories alphabetical.
    pub fn categories(&self) -> Vec<TrackerCategory> {
        let state = self.state.read();
        self.display_catalog(&state.trackers)
    }

    /// The latest statistics snapshot.
    pub fn statistics(&self) -> StatisticsSnapshot {
        self.state.read().statistics
    }

    pub fn is_completed(&self, id: TrackerId, date: NaiveDate) -> bool {
        self.state.read().ledger.is_completed(id, date)
    }

    /// Number of days a tracker has been completed on (cell badge count).
    pub fn completed_days(&self, id: TrackerId) -> usize {
        self.state.read().ledger.count_completions(id)
    }

    fn display_catalog(&self, trackers: &[Tracker]) -> Vec<TrackerCategory> {
        reorganize_with_pinned_title(
            trackers,
            &self.catalog.default_category,
            &self.catalog.pinned_title,
        )
    }

    // ========== Completion mutations ==========

    /// Flip the completion state of a tracker on a date.
    ///
    /// Returns `Ok(true)` when the tracker is now completed on that day,
    /// `Ok(false)` when it is now uncompleted. Future dates are rejected.
    pub async fn toggle_completion(
        &self,
        id: TrackerId,
        date: DateTime<Local>,
    ) -> RepositoryResult<bool> {
        if time::is_future_date(date) {
            return Err(RepositoryError::validation(
                "cannot complete a tracker on a future date",
            ));
        }

        let day = time::day_of(date);
        let record = CompletionRecord::on_day(id, day);
        let now_completed = !self.state.read().ledger.is_completed(id, day);

        // Persist first: a storage failure must leave the in-memory ledger
        // untouched, or views would report completions storage never saw.
        if now_completed {
            self.repo.persist_completion(&record).await?;
        } else {
            self.repo.remove_completion(&record).await?;
        }

        {
            let mut state = self.state.write();
            if now_completed {
                state.ledger.complete(id, day);
            } else {
                state.ledger.uncomplete(id, day);
            }
        }
        let _ = self.events.send(TrackerEvent::CompletionsChanged);

        self.refresh_statistics().await?;
        Ok(now_completed)
    }

    // ========== Catalog mutations ==========

    /// Create a tracker inside a category.
    pub async fn add_tracker(
        &self,
        tracker: Tracker,
        category_title: &str,
    ) -> RepositoryResult<()> {
        if tracker.title.trim().is_empty() {
            return Err(RepositoryError::validation("tracker title must not be empty"));
        }

        self.repo.persist_tracker(&tracker, category_title).await?;
        self.state.write().trackers.push(tracker);
        let _ = self.events.send(TrackerEvent::CatalogChanged);
        Ok(())
    }

    /// Replace a tracker wholesale (edit flow). `Ok(false)` for unknown ids.
    pub async fn update_tracker(&self, tracker: Tracker) -> RepositoryResult<bool> {
        if !self.repo.update_tracker(&tracker).await? {
            warn!("update of unknown tracker {} ignored", tracker.id);
            return Ok(false);
        }

        {
            let mut state = self.state.write();
            if let Some(existing) = state.trackers.iter_mut().find(|t| t.id == tracker.id) {
                *existing = tracker;
            }
        }
        let _ = self.events.send(TrackerEvent::CatalogChanged);
        Ok(true)
    }

    /// Pin or unpin a tracker. `Ok(false)` for unknown ids.
    pub async fn set_pinned(&self, id: TrackerId, pinned: bool) -> RepositoryResult<bool> {
        let updated = {
            let state = self.state.read();
            state.trackers.iter().find(|t| t.id == id).map(|tracker| {
                let mut tracker = tracker.clone();
                tracker.is_pinned = pinned;
                tracker
            })
        };

        match updated {
            Some(tracker) => self.update_tracker(tracker).await,
            None => Ok(false),
        }
    }

    /// Delete a tracker and its completion records. `Ok(false)` for unknown
    /// ids.
    pub async fn delete_tracker(&self, id: TrackerId) -> RepositoryResult<bool> {
        if !self.repo.delete_tracker(id).await? {
            warn!("delete of unknown tracker {id} ignored");
            return Ok(false);
        }

        {
            let mut state = self.state.write();
            state.trackers.retain(|t| t.id != id);
            state.ledger.remove_tracker(id);
        }
        let _ = self.events.send(TrackerEvent::CatalogChanged);

        // The cascade removed ledger records, so the snapshot is stale.
        self.refresh_statistics().await?;
        Ok(true)
    }

    // ========== Category mutations ==========

    /// Create an empty category. Creating an existing title is a no-op.
    ///
    /// The display catalog is derived from the trackers, so a category shows
    /// up there once a tracker is filed under it.
    pub async fn add_category(&self, title: &str) -> RepositoryResult<()> {
        if title.trim().is_empty() {
            return Err(RepositoryError::validation("category title must not be empty"));
        }

        self.repo.add_category(title).await?;
        let _ = self.events.send(TrackerEvent::CatalogChanged);
        Ok(())
    }

    /// Rename a category; its trackers follow the new title. `Ok(false)`
    /// for unknown titles.
    pub async fn rename_category(
        &self,
        old_title: &str,
        new_title: &str,
    ) -> RepositoryResult<bool> {
        if new_title.trim().is_empty() {
            return Err(RepositoryError::validation("category title must not be empty"));
        }
        if !self.repo.rename_category(old_title, new_title).await? {
            warn!("rename of unknown category {old_title:?} ignored");
            return Ok(false);
        }

        let retitled: Vec<Tracker> = {
            let mut state = self.state.write();
            state
                .trackers
                .iter_mut()
                .filter(|t| t.original_category.as_deref() == Some(old_title))
                .map(|t| {
                    t.original_category = Some(new_title.to_string());
                    t.clone()
                })
                .collect()
        };
        for tracker in &retitled {
            self.repo.update_tracker(tracker).await?;
        }

        let _ = self.events.send(TrackerEvent::CatalogChanged);
        Ok(true)
    }

    /// Delete a category record. `Ok(false)` for unknown titles. Trackers
    /// keep their original category title and are not deleted.
    pub async fn delete_category(&self, title: &str) -> RepositoryResult<bool> {
        if !self.repo.delete_category(title).await? {
            warn!("delete of unknown category {title:?} ignored");
            return Ok(false);
        }
        let _ = self.events.send(TrackerEvent::CatalogChanged);
        Ok(true)
    }

    /// Title of the stored category a tracker is filed under, if any.
    pub async fn category_title_for(&self, id: TrackerId) -> RepositoryResult<Option<String>> {
        self.repo.category_title_for(id).await
    }

    // ========== Statistics ==========

    /// Recompute the snapshot from the current ledger and persist it.
    async fn refresh_statistics(&self) -> RepositoryResult<()> {
        let snapshot = {
            let state = self.state.read();
            compute_statistics(&state.ledger, state.trackers.len(), time::today())
        };

        self.repo.persist_statistics(&snapshot).await?;
        self.state.write().statistics = snapshot;
        let _ = self.events.send(TrackerEvent::StatisticsChanged);
        Ok(())
    }
}
