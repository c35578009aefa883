//! Persisted list of favourite model names.
//!
//! Stored as a JSON array of strings. A missing or unreadable file is treated
//! as an empty list, so a corrupt file never blocks the shell from starting;
//! the next write replaces it.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::{debug, warn};

use crate::paths::{self, PathError};

/// Errors from writing the favourites file.
#[derive(Debug, Error)]
pub enum FavouritesError {
    #[error("Failed to write favourites to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to encode favourites: {0}")]
    Encode(#[from] serde_json::Error),

    #[error(transparent)]
    Path(#[from] PathError),
}

/// Favourite model names backed by a JSON file.
#[derive(Debug, Clone)]
pub struct FavouritesStore {
    path: PathBuf,
}

impl FavouritesStore {
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at the default location under the data root.
    pub fn at_default_location() -> Result<Self, FavouritesError> {
        Ok(Self::open(paths::favourites_path()?))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current favourites, empty when the file is missing or corrupt.
    pub fn list(&self) -> Vec<String> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Vec::new(),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Failed to read favourites");
                return Vec::new();
            }
        };

        serde_json::from_str(&raw).unwrap_or_else(|e| {
            warn!(path = %self.path.display(), error = %e, "Ignoring corrupt favourites file");
            Vec::new()
        })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.list().iter().any(|f| f == name)
    }

    /// Replace the whole list.
    pub fn set(&self, names: &[String]) -> Result<(), FavouritesError> {
        if let Some(parent) = self.path.parent() {
            paths::ensure_dir(parent)?;
        }
        let json = serde_json::to_string(names)?;
        fs::write(&self.path, json).map_err(|source| FavouritesError::Write {
            path: self.path.clone(),
            source,
        })?;
        debug!(path = %self.path.display(), count = names.len(), "Saved favourites");
        Ok(())
    }

    /// Add `name` if absent, remove it if present; returns the updated list.
    pub fn toggle(&self, name: &str) -> Result<Vec<String>, FavouritesError> {
        let mut favs = self.list();
        if let Some(pos) = favs.iter().position(|f| f == name) {
            favs.remove(pos);
        } else {
            favs.push(name.to_string());
        }
        self.set(&favs)?;
        Ok(favs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store() -> (tempfile::TempDir, FavouritesStore) {
        let dir = tempfile::tempdir().unwrap();
        let store = FavouritesStore::open(dir.path().join("nested").join("favourites.json"));
        (dir, store)
    }

    #[test]
    fn test_missing_file_is_empty() {
        let (_dir, store) = temp_store();
        assert!(store.list().is_empty());
        assert!(!store.contains("llama3"));
    }

    #[test]
    fn test_toggle_adds_then_removes() {
        let (_dir, store) = temp_store();

        assert_eq!(store.toggle("llama3").unwrap(), vec!["llama3"]);
        assert_eq!(store.toggle("mistral").unwrap(), vec!["llama3", "mistral"]);
        assert!(store.contains("mistral"));

        assert_eq!(store.toggle("llama3").unwrap(), vec!["mistral"]);
        assert_eq!(store.list(), vec!["mistral"]);
    }

    #[test]
    fn test_corrupt_file_reads_as_empty() {
        let (_dir, store) = temp_store();
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(store.path(), "{not json").unwrap();

        assert!(store.list().is_empty());
        assert_eq!(store.toggle("phi3").unwrap(), vec!["phi3"]);
    }

    #[test]
    fn test_set_overwrites() {
        let (_dir, store) = temp_store();
        store.set(&["a".to_string(), "b".to_string()]).unwrap();
        store.set(&["c".to_string()]).unwrap();
        assert_eq!(store.list(), vec!["c"]);
    }
}
