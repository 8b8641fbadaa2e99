//! Session identity types and the durable storage contract.
//!
//! The durable record is two string values under fixed keys: the opaque
//! token and the JSON-serialised user. A third one-shot key stores the path
//! to restore after a login round-trip.

use serde::{Deserialize, Serialize};

/// Durable storage key for the auth token.
pub const TOKEN_STORAGE_KEY: &str = "checklist_auth_token";
/// Durable storage key for the serialised user.
pub const USER_STORAGE_KEY: &str = "checklist_auth_user";
/// One-shot durable storage key for the post-login redirect path.
pub const REDIRECT_STORAGE_KEY: &str = "checklist_redirect_after_login";

/// Path of the login entry point.
pub const LOGIN_PATH: &str = "/login";
/// Path prefix of the auth-callback screen.
pub const AUTH_CALLBACK_PATH: &str = "/auth/callback";

/// Authenticated user identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    /// Opaque user identifier.
    pub user_id: String,
    /// Email address shown in the shell.
    pub email: String,
}

/// A fully established session: token and user, always together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Opaque bearer token.
    pub token: String,
    /// The authenticated user.
    pub user: AuthUser,
}

/// Lifecycle of the session store.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionState {
    /// Store constructed but not yet initialised from durable storage.
    #[default]
    Uninitialized,
    /// Durable storage is being read; shells show a neutral screen.
    Loading,
    /// Token and user are both present.
    Authenticated(Session),
    /// No usable session.
    Unauthenticated,
}

impl SessionState {
    /// Whether a token and user are both present.
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }

    /// The current session, when authenticated.
    pub fn session(&self) -> Option<&Session> {
        match self {
            Self::Authenticated(session) => Some(session),
            _ => None,
        }
    }
}
