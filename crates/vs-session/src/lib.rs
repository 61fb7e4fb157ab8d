//! Client-side session and authorization.
//!
//! [`SessionStore`] owns the signed-in identity and its persisted copy,
//! [`RouteGuard`] turns a session snapshot into navigation decisions, and
//! [`settle`] ends the session when the backend rejects its credential.

pub mod backend;
pub mod error;
pub mod route_guard;
pub mod session_snapshot;
pub mod session_store;
pub mod settle;
pub mod storage;

pub use backend::{AuthBackend, AuthRejection, ProfileBackend};
pub use error::{Result, SessionError};
pub use route_guard::{GuardDecision, NavigationTargets, Redirect, RedirectReason, RouteGuard};
pub use session_snapshot::{SessionPhase, SessionSnapshot};
pub use session_store::SessionStore;
pub use settle::{Settled, settle};
pub use storage::error::StorageError;
pub use storage::file_storage::{FileSessionStorage, IDENTITY_FILE, TOKEN_FILE};
pub use storage::memory_storage::MemorySessionStorage;
pub use storage::{SessionStorage, StoredSession};

#[cfg(test)]
mod tests;
