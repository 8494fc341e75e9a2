//! Persistence boundary for tracker data.
//!
//! This module provides abstractions for storage via the Repository pattern,
//! allowing different backends to be swapped without touching the filtering
//! and aggregation engines.
//!
//! The module includes:
//! - `repository`: Trait definition for storage operations
//! - `repositories::local`: In-memory implementation for unit testing and
//!   local development
//! - `models`: Persisted record forms and their fallible domain conversions
//! - `factory`: Factory for creating repository instances
//! - `repo_config`: TOML configuration for backend selection and catalog
//!   defaults
//!
//! There is no global repository instance: callers construct one through
//! [`factory::RepositoryFactory`] and inject it into
//! [`crate::services::TrackerService`].

#[cfg(not(feature = "local-repo"))]
compile_error!("Enable at least one repository backend feature.");

pub mod error;
pub mod factory;
pub mod models;
pub mod repo_config;
pub mod repositories;
pub mod repository;

pub use error::{RepositoryError, RepositoryResult};
pub use factory::{RepositoryFactory, RepositoryType};
pub use repo_config::RepositoryConfig;
#[cfg(feature = "local-repo")]
pub use repositories::LocalRepository;
pub use repository::TrackerRepository;
