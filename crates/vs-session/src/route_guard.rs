use crate::SessionSnapshot;

use serde::Serialize;
use vs_core::{DEFAULT_LANDING_PATH, DEFAULT_SIGN_IN_PATH, Role};

/// Locations guards redirect to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationTargets {
    pub sign_in_path: String,
    pub landing_path: String,
}

impl Default for NavigationTargets {
    fn default() -> Self {
        Self {
            sign_in_path: String::from(DEFAULT_SIGN_IN_PATH),
            landing_path: String::from(DEFAULT_LANDING_PATH),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RedirectReason {
    /// Protected location visited without a session
    SignInRequired,
    /// Sign-in/sign-up entry point visited with a session
    AlreadySignedIn,
    /// Signed in, but the role is not in the allowed set
    RoleNotAllowed,
    /// The backend rejected the credential mid-session
    SessionEnded,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Redirect {
    pub to: String,
    /// Location to come back to after signing in
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_to: Option<String>,
    pub reason: RedirectReason,
}

impl Redirect {
    pub fn to_sign_in(
        targets: &NavigationTargets,
        return_to: Option<&str>,
        reason: RedirectReason,
    ) -> Self {
        Self {
            to: targets.sign_in_path.clone(),
            return_to: return_to.map(String::from),
            reason,
        }
    }

    pub fn to_landing(targets: &NavigationTargets, reason: RedirectReason) -> Self {
        Self {
            to: targets.landing_path.clone(),
            return_to: None,
            reason,
        }
    }

    /// Where to go once sign-in succeeds: the remembered location, or the
    /// landing path when there is none or it points back at sign-in.
    pub fn post_sign_in_target<'a>(&'a self, targets: &'a NavigationTargets) -> &'a str {
        match self.return_to.as_deref() {
            Some(location) if !location.is_empty() && location != targets.sign_in_path => {
                location
            }
            _ => &targets.landing_path,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum GuardDecision {
    /// Session still restoring; render a neutral placeholder
    Pending,
    Allow,
    Redirect(Redirect),
}

/// Access rule for one navigable location.
///
/// `require_auth = true` admits only signed-in users (optionally narrowed by
/// role); `require_auth = false` admits only visitors without a session, as
/// for sign-in and sign-up pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteGuard {
    pub require_auth: bool,
    pub allowed_roles: Option<Vec<Role>>,
}

impl Default for RouteGuard {
    fn default() -> Self {
        Self::authenticated()
    }
}

impl RouteGuard {
    pub fn authenticated() -> Self {
        Self {
            require_auth: true,
            allowed_roles: None,
        }
    }

    pub fn guest_only() -> Self {
        Self {
            require_auth: false,
            allowed_roles: None,
        }
    }

    pub fn with_roles(mut self, roles: impl IntoIterator<Item = Role>) -> Self {
        self.allowed_roles = Some(roles.into_iter().collect());
        self
    }

    /// Decides what happens when `requested` is visited in the given session.
    ///
    /// Evaluate on every navigation; the answer changes with the session.
    pub fn evaluate(
        &self,
        session: &SessionSnapshot,
        requested: &str,
        targets: &NavigationTargets,
    ) -> GuardDecision {
        if session.is_pending() {
            return GuardDecision::Pending;
        }

        match (self.require_auth, session.identity()) {
            (true, None) => GuardDecision::Redirect(Redirect::to_sign_in(
                targets,
                Some(requested),
                RedirectReason::SignInRequired,
            )),
            (false, Some(_)) => GuardDecision::Redirect(Redirect::to_landing(
                targets,
                RedirectReason::AlreadySignedIn,
            )),
            (true, Some(identity)) => match &self.allowed_roles {
                Some(roles) if !identity.has_any_role(roles) => GuardDecision::Redirect(
                    Redirect::to_landing(targets, RedirectReason::RoleNotAllowed),
                ),
                _ => GuardDecision::Allow,
            },
            (false, None) => GuardDecision::Allow,
        }
    }
}
