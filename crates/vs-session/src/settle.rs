//! Top-level handling of authenticated call results.

use crate::route_guard::{NavigationTargets, Redirect, RedirectReason};
use crate::{AuthBackend, AuthRejection, SessionSnapshot, SessionStorage, SessionStore};

use log::{debug, info};

/// What the application root should do with a finished call.
#[derive(Debug)]
pub enum Settled<T, E> {
    Completed(T),
    Failed(E),
    /// The credential was rejected; the session is over and the user goes to
    /// sign-in.
    SessionEnded(Redirect),
}

impl<T, E> Settled<T, E> {
    pub fn is_session_ended(&self) -> bool {
        matches!(self, Self::SessionEnded(_))
    }
}

/// Routes an authenticated call's result.
///
/// A rejected credential ends the session the call was issued under, and only
/// that one: if a newer session became active in the meantime, it stays, and
/// the rejection is reported as a plain failure.
pub fn settle<B, S, T, E>(
    store: &SessionStore<B, S>,
    issued_under: &SessionSnapshot,
    targets: &NavigationTargets,
    return_to: Option<&str>,
    result: Result<T, E>,
) -> Settled<T, E>
where
    B: AuthBackend,
    S: SessionStorage,
    E: AuthRejection,
{
    let error = match result {
        Ok(value) => return Settled::Completed(value),
        Err(e) if e.is_authorization_rejected() => e,
        Err(e) => return Settled::Failed(e),
    };

    if store.end_session_if_current(issued_under.generation()) {
        info!("Credential rejected, redirecting to {}", targets.sign_in_path);
    } else if store.current_identity().is_some() {
        debug!("Credential rejection for a replaced session, keeping the current one");
        return Settled::Failed(error);
    }

    Settled::SessionEnded(Redirect::to_sign_in(
        targets,
        return_to,
        RedirectReason::SessionEnded,
    ))
}
