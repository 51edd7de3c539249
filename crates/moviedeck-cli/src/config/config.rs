//! `AppConfig` struct and TOML read/write.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Top-level application configuration.
#[derive(Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// TMDB connection settings.
    #[serde(default)]
    pub tmdb: TmdbConfig,
    /// Page range shown by the best-movies view.
    #[serde(default)]
    pub best_movies: BestMoviesConfig,
    /// Movies shown by the watched-movies view.
    #[serde(default)]
    pub watched: WatchedConfig,
}

/// TMDB connection configuration.
///
/// The bearer token is never stored here; it comes from `TMDB_API_TOKEN`.
#[derive(Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct TmdbConfig {
    /// Base URL override (default: TMDB API v3).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

/// Best-movies view configuration.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct BestMoviesConfig {
    /// First top-rated page to fetch (1-based).
    #[serde(default = "default_start_page")]
    pub start_page: u32,
    /// Number of consecutive pages to fetch.
    #[serde(default = "default_page_count")]
    pub page_count: u32,
}

impl Default for BestMoviesConfig {
    fn default() -> Self {
        Self {
            start_page: default_start_page(),
            page_count: default_page_count(),
        }
    }
}

const fn default_start_page() -> u32 {
    1
}

const fn default_page_count() -> u32 {
    5
}

/// Watched-movies configuration.
#[derive(Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct WatchedConfig {
    /// TMDB movie IDs in display order.
    #[serde(default)]
    pub movie_ids: Vec<String>,
}

impl WatchedConfig {
    /// Appends `movie_id` unless it is already listed. Returns whether it was added.
    pub fn add(&mut self, movie_id: &str) -> bool {
        if self.movie_ids.iter().any(|id| id == movie_id) {
            return false;
        }
        self.movie_ids.push(String::from(movie_id));
        true
    }

    /// Removes `movie_id`. Returns whether it was present.
    pub fn remove(&mut self, movie_id: &str) -> bool {
        let before = self.movie_ids.len();
        self.movie_ids.retain(|id| id != movie_id);
        self.movie_ids.len() != before
    }
}

impl AppConfig {
    /// Loads config from a TOML file. Returns default if file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
    }

    /// Saves config to a TOML file, creating parent directories if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation or file write fails.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {}", parent.display()))?;
        }
        let content = toml::to_string_pretty(self).context("failed to serialize config to TOML")?;
        std::fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_default_config() {
        // Arrange & Act
        let config = AppConfig::default();

        // Assert
        assert!(config.tmdb.base_url.is_none());
        assert_eq!(config.best_movies.start_page, 1);
        assert_eq!(config.best_movies.page_count, 5);
        assert!(config.watched.movie_ids.is_empty());
    }

    #[test]
    fn test_parse_full_config() {
        // Arrange
        let toml_str = r#"
[tmdb]
base_url = "http://localhost:8080/3/"

[best_movies]
start_page = 3
page_count = 2

[watched]
movie_ids = ["550", "278"]
"#;

        // Act
        let config: AppConfig = toml::from_str(toml_str).unwrap();

        // Assert
        assert_eq!(
            config.tmdb.base_url.as_deref(),
            Some("http://localhost:8080/3/")
        );
        assert_eq!(config.best_movies.start_page, 3);
        assert_eq!(config.best_movies.page_count, 2);
        assert_eq!(config.watched.movie_ids, vec!["550", "278"]);
    }

    #[test]
    fn test_partial_section_uses_field_defaults() {
        // Arrange
        let toml_str = "[best_movies]\npage_count = 1\n";

        // Act
        let config: AppConfig = toml::from_str(toml_str).unwrap();

        // Assert
        assert_eq!(config.best_movies.start_page, 1);
        assert_eq!(config.best_movies.page_count, 1);
    }

    #[test]
    fn test_watched_add_skips_duplicates() {
        // Arrange
        let mut watched = WatchedConfig::default();

        // Act
        let first = watched.add("550");
        let second = watched.add("550");
        watched.add("278");

        // Assert
        assert!(first);
        assert!(!second);
        assert_eq!(watched.movie_ids, vec!["550", "278"]);
    }

    #[test]
    fn test_watched_remove() {
        // Arrange
        let mut watched = WatchedConfig {
            movie_ids: vec![String::from("550"), String::from("278")],
        };

        // Act
        let removed = watched.remove("550");
        let missing = watched.remove("999");

        // Assert
        assert!(removed);
        assert!(!missing);
        assert_eq!(watched.movie_ids, vec!["278"]);
    }

    #[test]
    fn test_load_nonexistent_returns_default() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.toml");

        // Act
        let config = AppConfig::load(&path).unwrap();

        // Assert
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let mut config = AppConfig::default();
        config.watched.add("550");
        config.best_movies.page_count = 2;

        // Act
        config.save(&path).unwrap();
        let loaded = AppConfig::load(&path).unwrap();

        // Assert
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_invalid_toml_fails() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[best_movies]\npage_count = \"many\"\n").unwrap();

        // Act
        let result = AppConfig::load(&path);

        // Assert
        assert!(result.is_err());
    }
}
