use crate::storage::error::{Result as StorageResult, StorageError};
use crate::storage::{SessionStorage, StoredSession};

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use vs_core::Identity;

pub const TOKEN_FILE: &str = "token";
pub const IDENTITY_FILE: &str = "identity.json";

const DATE_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Session pair stored as two files in one directory.
///
/// Writes go identity first, token last; clears go token first, identity
/// last. A crash in between leaves one slot alone, which `load` reports as
/// corrupted rather than restoring half a session.
#[derive(Debug, Clone)]
pub struct FileSessionStorage {
    dir: PathBuf,
}

impl FileSessionStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn token_path(&self) -> PathBuf {
        self.dir.join(TOKEN_FILE)
    }

    fn identity_path(&self) -> PathBuf {
        self.dir.join(IDENTITY_FILE)
    }

    /// Writes using the atomic pattern.
    ///
    /// 1. Writes to temp file
    /// 2. Syncs to disk (fsync)
    /// 3. Atomic rename to final location
    fn write_atomic(&self, file_name: &str, contents: &[u8]) -> StorageResult<()> {
        let final_path = self.dir.join(file_name);
        let temp_path = self
            .dir
            .join(format!("{file_name}.tmp.{}", std::process::id()));

        {
            let mut file = create_private(&temp_path)
                .map_err(|e| StorageError::file_write(temp_path.clone(), e))?;

            file.write_all(contents)
                .map_err(|e| StorageError::file_write(temp_path.clone(), e))?;

            file.sync_all()
                .map_err(|e| StorageError::file_write(temp_path.clone(), e))?;
        }

        fs::rename(&temp_path, &final_path).map_err(|e| {
            // Clean up temp file on failure
            let _ = fs::remove_file(&temp_path);
            StorageError::atomic_rename(temp_path, final_path.clone(), e)
        })?;

        Ok(())
    }

    fn read_slot(path: &Path) -> StorageResult<Option<String>> {
        match fs::read_to_string(path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::file_read(path.to_path_buf(), e)),
        }
    }

    fn remove_slot(path: &Path) -> StorageResult<()> {
        match fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::file_remove(path.to_path_buf(), e)),
        }
    }
}

impl SessionStorage for FileSessionStorage {
    fn load(&self) -> StorageResult<StoredSession> {
        let token = Self::read_slot(&self.token_path())?;
        let identity = Self::read_slot(&self.identity_path())?;

        let (token, identity_json) = match (token, identity) {
            (None, None) => {
                info!("No saved session in {:?}", self.dir);
                return Ok(StoredSession::Empty);
            }
            (Some(_), None) => {
                warn!("Session token found without identity in {:?}", self.dir);
                return Ok(StoredSession::Corrupted {
                    reason: String::from("token slot present without identity"),
                });
            }
            (None, Some(_)) => {
                warn!("Session identity found without token in {:?}", self.dir);
                return Ok(StoredSession::Corrupted {
                    reason: String::from("identity slot present without token"),
                });
            }
            (Some(token), Some(identity)) => (token, identity),
        };

        let identity = match serde_json::from_str::<Identity>(&identity_json) {
            Ok(identity) => identity,
            Err(e) => {
                warn!("Session identity corrupted in {:?}: {e}", self.dir);
                return Ok(StoredSession::Corrupted {
                    reason: e.to_string(),
                });
            }
        };

        if identity.token.expose() != token {
            warn!("Session token does not match identity in {:?}", self.dir);
            return Ok(StoredSession::Corrupted {
                reason: String::from("token slot does not match identity"),
            });
        }

        info!("Restored session for {} ({})", identity.username, identity.role);
        Ok(StoredSession::Restored(identity))
    }

    fn save(&self, identity: &Identity) -> StorageResult<()> {
        fs::create_dir_all(&self.dir)
            .map_err(|e| StorageError::dir_creation(self.dir.clone(), e))?;

        // Pretty printing for debuggability
        let json = serde_json::to_string_pretty(identity)?;

        self.write_atomic(IDENTITY_FILE, json.as_bytes())?;
        self.write_atomic(TOKEN_FILE, identity.token.expose().as_bytes())?;

        debug!("Saved session for {}", identity.username);
        Ok(())
    }

    fn clear(&self) -> StorageResult<()> {
        Self::remove_slot(&self.token_path())?;
        Self::remove_slot(&self.identity_path())?;

        debug!("Cleared saved session in {:?}", self.dir);
        Ok(())
    }

    /// Renames `identity.json` to `identity.json.corrupted.{timestamp}` and
    /// drops the token.
    fn discard_corrupted(&self) -> StorageResult<Option<PathBuf>> {
        Self::remove_slot(&self.token_path())?;

        let path = self.identity_path();
        if !path.exists() {
            return Ok(None);
        }

        let timestamp = chrono::Utc::now().format(DATE_FORMAT);
        let backup_path = self
            .dir
            .join(format!("{IDENTITY_FILE}.corrupted.{timestamp}"));

        fs::rename(&path, &backup_path).map_err(StorageError::backup_failed)?;

        warn!("Backed up corrupted session to {backup_path:?}");
        Ok(Some(backup_path))
    }
}

#[cfg(unix)]
fn create_private(path: &Path) -> std::io::Result<fs::File> {
    use std::os::unix::fs::OpenOptionsExt;

    fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o600)
        .open(path)
}

#[cfg(not(unix))]
fn create_private(path: &Path) -> std::io::Result<fs::File> {
    fs::File::create(path)
}
