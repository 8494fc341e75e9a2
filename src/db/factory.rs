//! Factory for creating repository instances.

use crate::db::error::{RepositoryError, RepositoryResult};
use crate::db::repo_config::RepositoryConfig;
use crate::db::repository::TrackerRepository;
use std::str::FromStr;
use std::sync::Arc;

/// Available repository backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepositoryType {
    /// In-memory backend for testing and local development.
    Local,
}

impl FromStr for RepositoryType {
    type Err = RepositoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "local" | "memory" => Ok(RepositoryType::Local),
            other => Err(RepositoryError::configuration(format!(
                "Unknown repository type: {other}"
            ))),
        }
    }
}

/// Creates repository instances from configuration.
pub struct RepositoryFactory;

impl RepositoryFactory {
    /// Create the repository selected by the configuration.
    pub fn create(config: &RepositoryConfig) -> RepositoryResult<Arc<dyn TrackerRepository>> {
        match config.repository_type()? {
            RepositoryType::Local => Ok(Self::create_local()),
        }
    }

    /// Create a fresh in-memory repository.
    #[cfg(feature = "local-repo")]
    pub fn create_local() -> Arc<dyn TrackerRepository> {
        Arc::new(crate::db::repositories::LocalRepository::new())
    }
}
