//! Data directory resolution.
//!
//! Resolution order for the data root:
//! 1. `OCHAT_DATA_DIR` environment variable (highest priority)
//! 2. System data directory (e.g., `~/.local/share/ochat`)

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Environment variable overriding the data root.
pub const DATA_DIR_ENV: &str = "OCHAT_DATA_DIR";

const FAVOURITES_FILE: &str = "favourites.json";

/// Errors that can occur during path resolution.
#[derive(Debug, Error)]
pub enum PathError {
    /// Could not determine the system data directory.
    #[error("Cannot determine system data directory")]
    NoDataDir,

    /// Failed to create a directory.
    #[error("Failed to create directory {path}: {reason}")]
    CreateFailed { path: PathBuf, reason: String },
}

/// Get the root directory for application data, creating it if needed.
pub fn data_root() -> Result<PathBuf, PathError> {
    if let Ok(path) = env::var(DATA_DIR_ENV) {
        return Ok(PathBuf::from(path));
    }

    let data_dir = dirs::data_local_dir().ok_or(PathError::NoDataDir)?;
    let root = data_dir.join("ochat");
    ensure_dir(&root)?;
    Ok(root)
}

/// Location of the persisted favourites list.
pub fn favourites_path() -> Result<PathBuf, PathError> {
    Ok(data_root()?.join(FAVOURITES_FILE))
}

/// Favourites file inside an explicit data directory.
pub fn favourites_path_in(dir: &Path) -> PathBuf {
    dir.join(FAVOURITES_FILE)
}

pub(crate) fn ensure_dir(path: &Path) -> Result<(), PathError> {
    if path.exists() {
        return Ok(());
    }
    fs::create_dir_all(path).map_err(|e| PathError::CreateFailed {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_favourites_path_in_dir() {
        let path = favourites_path_in(Path::new("/tmp/ochat-data"));
        assert_eq!(path, PathBuf::from("/tmp/ochat-data/favourites.json"));
    }

    #[test]
    fn test_ensure_dir_creates_nested() {
        let tmp = tempfile::tempdir().unwrap();
        let nested = tmp.path().join("a").join("b");
        ensure_dir(&nested).unwrap();
        assert!(nested.is_dir());
        // Second call is a no-op
        ensure_dir(&nested).unwrap();
    }
}
