pub(crate) mod error;
pub(crate) mod file_storage;
pub(crate) mod memory_storage;

use crate::storage::error::Result as StorageResult;

use std::path::PathBuf;

use vs_core::Identity;

/// Outcome of reading the persisted session pair.
#[derive(Debug, Clone, PartialEq)]
pub enum StoredSession {
    /// Neither slot is present (first launch or signed out)
    Empty,
    /// Both slots present and consistent
    Restored(Identity),
    /// Slots exist but cannot be trusted: unparseable, torn or mismatched
    Corrupted { reason: String },
}

/// Persisted client state: a token slot and an identity slot.
///
/// Implementations write and clear the two slots as a pair. `load` reports
/// any state where one slot exists without the other as corrupted.
pub trait SessionStorage: Send + Sync {
    fn load(&self) -> StorageResult<StoredSession>;

    fn save(&self, identity: &Identity) -> StorageResult<()>;

    /// Removes both slots. Succeeds when nothing is stored.
    fn clear(&self) -> StorageResult<()>;

    /// Gets rid of a corrupted pair so the next load starts clean.
    ///
    /// Returns where a backup was kept, if the implementation keeps one.
    fn discard_corrupted(&self) -> StorageResult<Option<PathBuf>> {
        self.clear().map(|_| None)
    }
}

impl<T: SessionStorage + ?Sized> SessionStorage for std::sync::Arc<T> {
    fn load(&self) -> StorageResult<StoredSession> {
        (**self).load()
    }

    fn save(&self, identity: &Identity) -> StorageResult<()> {
        (**self).save(identity)
    }

    fn clear(&self) -> StorageResult<()> {
        (**self).clear()
    }

    fn discard_corrupted(&self) -> StorageResult<Option<PathBuf>> {
        (**self).discard_corrupted()
    }
}
