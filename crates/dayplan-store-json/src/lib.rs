//! JSON file storage for dayplan.
//!
//! Tasks are persisted as one pretty-printed JSON array per data file, the
//! whole collection at a time. Reading tolerates a missing or damaged
//! snapshot by starting empty, so a broken file never locks the user out.

mod error;

pub use error::StoreError;

use dayplan_core::Task;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Storage based on a single JSON snapshot file.
#[derive(Debug, Clone)]
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    /// Create a store backed by `path`. The file does not have to exist yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path of the snapshot file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the task collection from the snapshot file.
    ///
    /// A missing file yields an empty collection. So does a file that no
    /// longer parses; the damage is logged and the tracker starts over
    /// rather than refusing to run.
    ///
    /// # Errors
    /// Returns an error if the file exists but cannot be read.
    pub fn load(&self) -> Result<Vec<Task>, StoreError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No snapshot yet, starting empty");
                return Ok(Vec::new());
            }
            Err(err) => return Err(err.into()),
        };

        match serde_json::from_str(&raw) {
            Ok(tasks) => Ok(tasks),
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "Snapshot did not parse, starting empty");
                Ok(Vec::new())
            }
        }
    }

    /// Write the whole task collection to the snapshot file.
    ///
    /// # Errors
    /// Returns an error if the parent directory cannot be created or the
    /// file cannot be written.
    pub fn save(&self, tasks: &[Task]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let body = serde_json::to_string_pretty(tasks)?;
        fs::write(&self.path, body)?;
        info!(path = %self.path.display(), count = tasks.len(), "Saved snapshot");
        Ok(())
    }
}
