//! Storage backends for the persisted blob.
//!
//! The hub persists exactly one opaque string under a single key. The
//! [`SaveStore`] trait abstracts where that string lives so the save system
//! can run against a real file on disk or an in-memory store in tests.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::error::SaveResult;

/// A single-key blob store with one backup generation.
pub trait SaveStore: Send {
    /// Loads the primary blob, if any.
    fn load(&self) -> Option<String>;

    /// Loads the backup blob, if any.
    fn load_backup(&self) -> Option<String>;

    /// Persists the blob, rotating the previous primary into the backup.
    fn persist(&mut self, blob: &str) -> SaveResult<()>;
}

/// File-backed store with atomic writes (temp file + rename) and a backup of
/// the previous generation, kept for recovery from a corrupted primary.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Creates a store persisting to the given path.
    #[must_use]
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Returns the primary file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn backup_path(&self) -> PathBuf {
        let mut path = self.path.clone().into_os_string();
        path.push(".backup");
        PathBuf::from(path)
    }

    fn temp_path(&self) -> PathBuf {
        let mut path = self.path.clone().into_os_string();
        path.push(".tmp");
        PathBuf::from(path)
    }
}

impl SaveStore for FileStore {
    fn load(&self) -> Option<String> {
        fs::read_to_string(&self.path).ok()
    }

    fn load_backup(&self) -> Option<String> {
        fs::read_to_string(self.backup_path()).ok()
    }

    fn persist(&mut self, blob: &str) -> SaveResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
                info!(dir = %parent.display(), "created save directory");
            }
        }

        // Rotate the previous generation into the backup before overwriting.
        if self.path.exists() {
            if let Err(e) = fs::copy(&self.path, self.backup_path()) {
                warn!(error = %e, "failed to rotate save backup");
            }
        }

        // Atomic write: temp file, flush, rename over the primary.
        let temp = self.temp_path();
        {
            let mut file = fs::File::create(&temp)?;
            file.write_all(blob.as_bytes())?;
            file.flush()?;
        }
        if let Err(e) = fs::rename(&temp, &self.path) {
            let _ = fs::remove_file(&temp);
            return Err(e.into());
        }

        Ok(())
    }
}

/// In-memory store for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryStore {
    primary: Option<String>,
    backup: Option<String>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store pre-seeded with a primary blob.
    #[must_use]
    pub fn with_blob(blob: impl Into<String>) -> Self {
        Self {
            primary: Some(blob.into()),
            backup: None,
        }
    }

    /// Creates a store pre-seeded with both generations.
    #[must_use]
    pub fn with_blob_and_backup(blob: impl Into<String>, backup: impl Into<String>) -> Self {
        Self {
            primary: Some(blob.into()),
            backup: Some(backup.into()),
        }
    }
}

impl SaveStore for MemoryStore {
    fn load(&self) -> Option<String> {
        self.primary.clone()
    }

    fn load_backup(&self) -> Option<String> {
        self.backup.clone()
    }

    fn persist(&mut self, blob: &str) -> SaveResult<()> {
        self.backup = self.primary.take();
        self.primary = Some(blob.to_string());
        Ok(())
    }
}
