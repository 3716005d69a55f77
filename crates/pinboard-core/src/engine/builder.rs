//! Builder for creating and configuring Board instances.

use std::path::{Path, PathBuf};

use super::Board;
use crate::error::{BoardError, Result};
use crate::store::Store;

/// Builder for creating and configuring Board instances.
#[derive(Debug, Clone)]
pub struct BoardBuilder {
    database_path: Option<PathBuf>,
}

impl BoardBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            database_path: None,
        }
    }

    /// Sets a custom database file path.
    ///
    /// If not specified, uses XDG Base Directory specification:
    /// `$XDG_DATA_HOME/pinboard/pinboard.db` or
    /// `~/.local/share/pinboard/pinboard.db`
    pub fn with_database_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.database_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Builds the configured board instance: opens the store, subscribes
    /// to its change feed, and loads the initial mirror snapshots.
    ///
    /// # Errors
    ///
    /// Returns `BoardError::FileSystem` if the database path is invalid
    /// Returns `BoardError::Store` if store initialization or the initial
    /// snapshot load fails
    pub async fn build(self) -> Result<Board> {
        let db_path = if let Some(path) = self.database_path {
            path
        } else {
            Self::default_database_path()?
        };

        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| BoardError::FileSystem {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let store = Store::open(&db_path).await?;

        // Subscribe before the snapshot load so no mutation between the
        // two can be missed
        let changes = store.subscribe();
        let plans = store.fetch_plans().await?;
        let cards = store.fetch_cards().await?;

        Ok(Board::new(store, changes, plans, cards))
    }

    /// Returns the default database path following XDG Base Directory
    /// specification.
    fn default_database_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("pinboard")
            .place_data_file("pinboard.db")
            .map_err(|e| BoardError::XdgDirectory(e.to_string()))
    }
}

impl Default for BoardBuilder {
    fn default() -> Self {
        Self::new()
    }
}
