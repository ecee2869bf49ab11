//! Persistence for the workout list.
//!
//! The list is written as a single JSON document, replaced in full on
//! every change. Nothing is ever read back; a restart starts from an
//! empty list while the file keeps the last session's data.

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

use crate::workout::Workout;

const DATA_FILE_NAME: &str = "workouts.json";
const APP_DATA_DIR: &str = "waymark";
const DATA_ENV_VAR: &str = "WAYMARK_DATA_DIR";

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Failed to get application data directory")]
    DataDir,
    #[error("I/O error accessing workout data file")]
    Io(#[from] std::io::Error),
    #[error("Failed to serialize workout data (JSON): {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Determines the path to the workout data file.
pub fn get_data_path() -> Result<PathBuf, StorageError> {
    let app_dir = if let Ok(path_str) = std::env::var(DATA_ENV_VAR) {
        PathBuf::from(path_str)
    } else {
        let data_dir = dirs::data_dir().ok_or(StorageError::DataDir)?;
        data_dir.join(APP_DATA_DIR)
    };
    if !app_dir.exists() {
        fs::create_dir_all(&app_dir)?;
    }
    Ok(app_dir.join(DATA_FILE_NAME))
}

pub struct Storage {
    path: PathBuf,
}

impl Storage {
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Storage { path }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Serializes the whole list and replaces the stored copy.
    /// # Errors
    /// Returns `StorageError` if serialization or the file write fails.
    pub fn save(&self, workouts: &[Workout]) -> Result<(), StorageError> {
        let json = serde_json::to_string(workouts)?;
        fs::write(&self.path, json)?;
        debug!(
            path = %self.path.display(),
            count = workouts.len(),
            "persisted workout list"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workout::GeoPoint;
    use anyhow::Result;
    use tempfile::TempDir;

    #[test]
    fn save_replaces_file_with_whole_list() -> Result<()> {
        let dir = TempDir::new()?;
        let storage = Storage::new(dir.path().join(DATA_FILE_NAME));
        let point = GeoPoint {
            latitude: 41.39,
            longitude: 2.16,
        };

        let first = vec![Workout::running(point, 5.0, 30.0, 170.0)];
        storage.save(&first)?;
        let on_disk: serde_json::Value = serde_json::from_str(&fs::read_to_string(storage.path())?)?;
        assert_eq!(on_disk.as_array().map(Vec::len), Some(1));

        let second = vec![
            first[0].clone(),
            Workout::cycling(point, 27.0, 95.0, 523.0),
        ];
        storage.save(&second)?;
        let on_disk: serde_json::Value = serde_json::from_str(&fs::read_to_string(storage.path())?)?;
        assert_eq!(on_disk.as_array().map(Vec::len), Some(2));
        assert_eq!(on_disk[0]["type"], "running");
        assert_eq!(on_disk[1]["type"], "cycling");
        Ok(())
    }
}
