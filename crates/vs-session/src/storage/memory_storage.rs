use crate::storage::error::Result as StorageResult;
use crate::storage::{SessionStorage, StoredSession};

use std::sync::{Mutex, PoisonError};

use vs_core::Identity;

#[derive(Debug, Default, Clone)]
struct Slots {
    token: Option<String>,
    identity: Option<String>,
}

/// In-process session storage; nothing survives the process.
///
/// Slots hold serialized text, the same as the file storage, so restores go
/// through the same parsing and pairing checks.
#[derive(Debug, Default)]
pub struct MemorySessionStorage {
    slots: Mutex<Slots>,
}

impl MemorySessionStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts from raw slot contents, e.g. a previous process's state.
    pub fn with_slots(token: Option<&str>, identity_json: Option<&str>) -> Self {
        Self {
            slots: Mutex::new(Slots {
                token: token.map(String::from),
                identity: identity_json.map(String::from),
            }),
        }
    }

    /// Raw slot contents: (token, identity json).
    pub fn raw_slots(&self) -> (Option<String>, Option<String>) {
        let slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        (slots.token.clone(), slots.identity.clone())
    }
}

impl SessionStorage for MemorySessionStorage {
    fn load(&self) -> StorageResult<StoredSession> {
        let slots = self
            .slots
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();

        let (token, identity_json) = match (slots.token, slots.identity) {
            (None, None) => return Ok(StoredSession::Empty),
            (Some(token), Some(identity)) => (token, identity),
            _ => {
                return Ok(StoredSession::Corrupted {
                    reason: String::from("token and identity slots out of sync"),
                });
            }
        };

        match serde_json::from_str::<Identity>(&identity_json) {
            Ok(identity) if identity.token.expose() == token => {
                Ok(StoredSession::Restored(identity))
            }
            Ok(_) => Ok(StoredSession::Corrupted {
                reason: String::from("token slot does not match identity"),
            }),
            Err(e) => Ok(StoredSession::Corrupted {
                reason: e.to_string(),
            }),
        }
    }

    fn save(&self, identity: &Identity) -> StorageResult<()> {
        let json = serde_json::to_string(identity)?;

        let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        slots.identity = Some(json);
        slots.token = Some(identity.token.expose().to_string());
        Ok(())
    }

    fn clear(&self) -> StorageResult<()> {
        let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        slots.token = None;
        slots.identity = None;
        Ok(())
    }
}
