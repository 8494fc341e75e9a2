//! Repository trait: the persistence boundary of the tracker core.
//!
//! The core consumes catalog and ledger state through `load_*` and pushes
//! mutations through `persist_*`/`delete_*`. Implementations must preserve
//! day granularity of completion records and the tracker fields listed in
//! [`crate::db::models`].

use crate::db::error::RepositoryResult;
use crate::ledger::CompletionRecord;
use crate::models::tracker::{StatisticsSnapshot, Tracker, TrackerCategory, TrackerId};
use async_trait::async_trait;

/// Storage interface consumed by [`crate::services::TrackerService`].
///
/// Update and delete of an unknown id are no-ops signalled by `Ok(false)`,
/// never errors; the caller decides whether that matters.
#[async_trait]
pub trait TrackerRepository: Send + Sync {
    // ========== Trackers ==========

    /// Load the full tracker list. Malformed records are skipped and logged.
    async fn load_trackers(&self) -> RepositoryResult<Vec<Tracker>>;

    /// Create a tracker inside a category, creating the category if needed.
    async fn persist_tracker(
        &self,
        tracker: &Tracker,
        category_title: &str,
    ) -> RepositoryResult<()>;

    /// Replace a tracker record wholesale. `Ok(false)` when the id is unknown.
    async fn update_tracker(&self, tracker: &Tracker) -> RepositoryResult<bool>;

    /// Delete a tracker by id. `Ok(false)` when the id is unknown.
    async fn delete_tracker(&self, id: TrackerId) -> RepositoryResult<bool>;

    async fn count_trackers(&self) -> RepositoryResult<usize>;

    // ========== Categories ==========

    /// Load real categories with their trackers. The pinned pseudo-category
    /// is a read-time construct and never appears here.
    async fn load_categories(&self) -> RepositoryResult<Vec<TrackerCategory>>;

    async fn add_category(&self, title: &str) -> RepositoryResult<()>;

    /// `Ok(false)` when no category carries `old_title`.
    async fn rename_category(&self, old_title: &str, new_title: &str) -> RepositoryResult<bool>;

    /// `Ok(false)` when no category carries `title`.
    async fn delete_category(&self, title: &str) -> RepositoryResult<bool>;

    /// Title of the category a tracker belongs to, if any.
    async fn category_title_for(&self, id: TrackerId) -> RepositoryResult<Option<String>>;

    // ========== Completions ==========

    async fn load_completions(&self) -> RepositoryResult<Vec<CompletionRecord>>;

    /// Idempotent insert of a completion record.
    async fn persist_completion(&self, record: &CompletionRecord) -> RepositoryResult<()>;

    /// Idempotent removal of a completion record.
    async fn remove_completion(&self, record: &CompletionRecord) -> RepositoryResult<()>;

    // ========== Statistics ==========

    /// Latest stored snapshot, if one was ever persisted.
    async fn load_statistics(&self) -> RepositoryResult<Option<StatisticsSnapshot>>;

    /// Overwrite the stored snapshot with the latest recomputation.
    async fn persist_statistics(&self, snapshot: &StatisticsSnapshot) -> RepositoryResult<()>;
}
