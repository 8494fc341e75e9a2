//! Repository configuration file support.
//!
//! Reads backend selection and catalog defaults from a TOML file.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use super::error::RepositoryError;
use super::factory::RepositoryType;

/// Repository configuration from file.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RepositoryConfig {
    #[serde(default)]
    pub repository: RepositorySettings,
    #[serde(default)]
    pub catalog: CatalogSettings,
}

/// Repository type settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositorySettings {
    #[serde(rename = "type", default = "default_repo_type")]
    pub repo_type: String,
}

impl Default for RepositorySettings {
    fn default() -> Self {
        Self {
            repo_type: default_repo_type(),
        }
    }
}

/// Catalog display defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogSettings {
    /// Category used for trackers persisted without one.
    #[serde(default = "default_category")]
    pub default_category: String,
    /// Title of the synthesized pinned pseudo-category.
    #[serde(default = "default_pinned_title")]
    pub pinned_title: String,
}

impl Default for CatalogSettings {
    fn default() -> Self {
        Self {
            default_category: default_category(),
            pinned_title: default_pinned_title(),
        }
    }
}

fn default_repo_type() -> String {
    "local".to_string()
}

fn default_category() -> String {
    "Important".to_string()
}

fn default_pinned_title() -> String {
    "Pinned".to_string()
}

impl RepositoryConfig {
    /// Load repository configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, RepositoryError> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            RepositoryError::configuration(format!("Failed to read config file: {e}"))
        })?;

        toml::from_str(&content).map_err(|e| {
            RepositoryError::configuration(format!("Failed to parse config file: {e}"))
        })
    }

    /// Load configuration from the default locations, falling back to
    /// built-in defaults when no `tracker.toml` exists.
    ///
    /// Searches for `tracker.toml` in the current directory, then the parent
    /// directory.
    pub fn from_default_location() -> Self {
        let search_paths = [
            PathBuf::from("tracker.toml"),
            PathBuf::from("../tracker.toml"),
        ];

        for path in search_paths {
            if path.exists() {
                if let Ok(config) = Self::from_file(&path) {
                    return config;
                }
            }
        }

        Self::default()
    }

    /// Get the repository type from configuration.
    pub fn repository_type(&self) -> Result<RepositoryType, RepositoryError> {
        RepositoryType::from_str(&self.repository.repo_type)
    }
}
