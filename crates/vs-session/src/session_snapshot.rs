use serde::Serialize;
use vs_core::{BearerToken, Identity};

/// Lifecycle phase of a session store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    Uninitialized,
    Initializing,
    Anonymous,
    Authenticated,
}

impl SessionPhase {
    /// Access decisions must wait while this is true.
    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Uninitialized | Self::Initializing)
    }
}

/// Immutable view of the store at one instant.
///
/// `generation` changes on every sign-in and sign-out, so a result computed
/// from this snapshot can tell whether its session is still the active one.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    phase: SessionPhase,
    identity: Option<Identity>,
    generation: u64,
}

impl SessionSnapshot {
    pub(crate) fn new(phase: SessionPhase, identity: Option<Identity>, generation: u64) -> Self {
        Self {
            phase,
            identity,
            generation,
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.identity.as_ref()
    }

    pub fn token(&self) -> Option<&BearerToken> {
        self.identity.as_ref().map(|identity| &identity.token)
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_pending(&self) -> bool {
        self.phase.is_pending()
    }
}
