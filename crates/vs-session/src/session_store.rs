use crate::error::{Result as SessionResult, SessionError};
use crate::{
    AuthBackend, ProfileBackend, SessionPhase, SessionSnapshot, SessionStorage, StoredSession,
};

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use log::{debug, error, info, warn};
use vs_core::{
    BearerToken, Credentials, Identity, PasswordChange, ProfilePicture, ProfileUpdate,
    Registration, UserRecord,
};

#[derive(Debug)]
struct StoreInner {
    phase: SessionPhase,
    identity: Option<Identity>,
    generation: u64,
}

impl StoreInner {
    /// Drops the identity and starts a new generation.
    fn end_session(&mut self) -> Option<Identity> {
        self.generation += 1;
        if self.phase != SessionPhase::Uninitialized {
            self.phase = SessionPhase::Anonymous;
        }
        self.identity.take()
    }

    fn begin_session(&mut self, identity: Identity) {
        self.generation += 1;
        self.phase = SessionPhase::Authenticated;
        self.identity = Some(identity);
    }
}

/// Single source of truth for who is signed in.
///
/// Owned by the application root and shared by reference. Reads return
/// clones; writes happen under a lock that is never held across an await, and
/// late results are applied only when their generation is still current.
pub struct SessionStore<B, S> {
    backend: B,
    storage: S,
    inner: RwLock<StoreInner>,
}

impl<B, S> SessionStore<B, S>
where
    B: AuthBackend,
    S: SessionStorage,
{
    pub fn new(backend: B, storage: S) -> Self {
        Self {
            backend,
            storage,
            inner: RwLock::new(StoreInner {
                phase: SessionPhase::Uninitialized,
                identity: None,
                generation: 0,
            }),
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    fn read(&self) -> RwLockReadGuard<'_, StoreInner> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, StoreInner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Restores the persisted session, once.
    ///
    /// Never fails: unreadable or torn storage yields an anonymous session.
    /// Later calls return the current identity without touching storage.
    pub fn initialize(&self) -> Option<Identity> {
        let generation = {
            let mut inner = self.write();
            if inner.phase != SessionPhase::Uninitialized {
                return inner.identity.clone();
            }
            inner.phase = SessionPhase::Initializing;
            inner.generation
        };

        let restored = self.restore();

        let mut inner = self.write();
        if inner.phase != SessionPhase::Initializing || inner.generation != generation {
            debug!("Session changed during restore, keeping the newer state");
            return inner.identity.clone();
        }

        match restored {
            Some(identity) => {
                info!(
                    "Restored session for '{}' ({})",
                    identity.username, identity.role
                );
                inner.begin_session(identity);
            }
            None => {
                info!("No stored session, starting anonymous");
                inner.phase = SessionPhase::Anonymous;
            }
        }

        inner.identity.clone()
    }

    fn restore(&self) -> Option<Identity> {
        match self.storage.load() {
            Ok(StoredSession::Restored(identity)) => Some(identity),
            Ok(StoredSession::Empty) => None,
            Ok(StoredSession::Corrupted { reason }) => {
                warn!("Stored session is corrupted ({reason}), discarding it");
                match self.storage.discard_corrupted() {
                    Ok(Some(backup)) => {
                        warn!("Corrupted session backed up to {}", backup.display())
                    }
                    Ok(None) => {}
                    Err(e) => error!("Failed to discard corrupted session: {e}"),
                }
                None
            }
            Err(e) => {
                warn!("Failed to read stored session: {e} ({})", e.recovery_hint());
                None
            }
        }
    }

    pub fn current_identity(&self) -> Option<Identity> {
        self.read().identity.clone()
    }

    pub fn phase(&self) -> SessionPhase {
        self.read().phase
    }

    pub fn is_initializing(&self) -> bool {
        self.read().phase == SessionPhase::Initializing
    }

    pub fn is_ready(&self) -> bool {
        !self.read().phase.is_pending()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        let inner = self.read();
        SessionSnapshot::new(inner.phase, inner.identity.clone(), inner.generation)
    }

    /// Exchanges credentials for a session and persists it.
    ///
    /// On failure nothing changes; the backend's error comes back untouched.
    pub async fn sign_in(&self, credentials: &Credentials) -> SessionResult<Identity, B::Error> {
        credentials.validate()?;

        let payload = self
            .backend
            .login(credentials)
            .await
            .map_err(SessionError::Backend)?;

        let identity = Identity::from_login(payload, &credentials.username)?;

        let mut inner = self.write();
        self.storage.save(&identity).map_err(SessionError::storage)?;
        inner.begin_session(identity.clone());

        info!("Signed in as '{}' ({})", identity.username, identity.role);
        Ok(identity)
    }

    /// Submits a registration. The caller still has to sign in.
    pub async fn sign_up(&self, registration: &Registration) -> SessionResult<(), B::Error> {
        self.backend
            .register(registration)
            .await
            .map_err(SessionError::Backend)?;

        info!("Registered '{}'", registration.username);
        Ok(())
    }

    /// Ends the session in memory and in storage. Always succeeds.
    pub async fn sign_out(&self) {
        let previous = {
            let mut inner = self.write();
            let previous = inner.end_session();
            self.clear_storage();
            previous
        };

        let Some(previous) = previous else {
            debug!("Sign-out without an active session");
            return;
        };

        info!("Signed out '{}'", previous.username);

        if let Err(e) = self.backend.logout(&previous.token).await {
            warn!("Remote logout failed, ignoring: {e}");
        }
    }

    /// Signs out only when `generation` is still the active session.
    pub fn end_session_if_current(&self, generation: u64) -> bool {
        let mut inner = self.write();
        if inner.generation != generation || inner.identity.is_none() {
            return false;
        }

        if let Some(previous) = inner.end_session() {
            info!("Session for '{}' ended by the backend", previous.username);
        }
        self.clear_storage();
        true
    }

    fn clear_storage(&self) {
        if let Err(e) = self.storage.clear() {
            error!(
                "Failed to clear stored session: {e} ({})",
                e.recovery_hint()
            );
        }
    }

    fn active_session<E>(&self) -> SessionResult<(BearerToken, u64), E>
    where
        E: std::error::Error + 'static,
    {
        let inner = self.read();
        match (&inner.phase, &inner.identity) {
            (SessionPhase::Authenticated, Some(identity)) => {
                Ok((identity.token.clone(), inner.generation))
            }
            _ => Err(SessionError::not_authenticated()),
        }
    }

    /// Merges a profile response into the session that asked for it.
    fn apply_profile<E>(&self, generation: u64, record: &UserRecord) -> SessionResult<Identity, E>
    where
        E: std::error::Error + 'static,
    {
        let mut inner = self.write();
        if inner.generation != generation {
            warn!("Dropping profile response for an ended session");
            return Err(SessionError::session_ended());
        }

        let Some(current) = inner.identity.as_mut() else {
            return Err(SessionError::session_ended());
        };

        let mut updated = current.clone();
        if updated.merge_profile(record) {
            self.storage
                .save(&updated)
                .map_err(SessionError::storage)?;
            *current = updated;
            debug!("Profile of '{}' updated", current.username);
        }

        Ok(current.clone())
    }

    pub async fn update_profile<P>(
        &self,
        profile: &P,
        update: &ProfileUpdate,
    ) -> SessionResult<Identity, P::Error>
    where
        P: ProfileBackend,
    {
        update.validate()?;
        let (token, generation) = self.active_session()?;

        let record = profile
            .update_profile(&token, update)
            .await
            .map_err(SessionError::Backend)?;

        self.apply_profile(generation, &record)
    }

    pub async fn update_avatar<P>(
        &self,
        profile: &P,
        picture: &ProfilePicture,
    ) -> SessionResult<Identity, P::Error>
    where
        P: ProfileBackend,
    {
        let (token, generation) = self.active_session()?;

        let record = profile
            .update_profile_picture(&token, picture)
            .await
            .map_err(SessionError::Backend)?;

        self.apply_profile(generation, &record)
    }

    pub async fn refresh_profile<P>(&self, profile: &P) -> SessionResult<Identity, P::Error>
    where
        P: ProfileBackend,
    {
        let (token, generation) = self.active_session()?;

        let record = profile
            .get_profile(&token)
            .await
            .map_err(SessionError::Backend)?;

        self.apply_profile(generation, &record)
    }

    pub async fn change_password<P>(
        &self,
        profile: &P,
        change: &PasswordChange,
    ) -> SessionResult<(), P::Error>
    where
        P: ProfileBackend,
    {
        change.validate()?;
        let (token, _) = self.active_session()?;

        profile
            .change_password(&token, change)
            .await
            .map_err(SessionError::Backend)?;

        info!("Password changed");
        Ok(())
    }
}
