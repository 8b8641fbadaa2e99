//! Auth session store.
//!
//! Owns the session lifecycle and writes every transition through to durable
//! storage and the request client's token cell, so the three never disagree
//! for longer than one transition.

use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use tracing::{info, warn};

use super::callback::{CallbackOutcome, parse_callback_query};
use super::redirect::{is_disallowed_path, safe_redirect_path};
use crate::domain::ports::{Navigator, SessionStorage};
use crate::domain::{
    AuthUser, LOGIN_PATH, REDIRECT_STORAGE_KEY, Session, SessionState, TOKEN_STORAGE_KEY,
    USER_STORAGE_KEY,
};
use crate::request::AuthClient;

/// Session lifecycle owner; always used behind an [`Arc`].
pub struct SessionStore {
    storage: Arc<dyn SessionStorage>,
    navigator: Arc<dyn Navigator>,
    client: Arc<AuthClient>,
    state: RwLock<SessionState>,
    init_delay: Duration,
}

impl SessionStore {
    /// Build a store over the given ports and request client.
    ///
    /// `init_delay` is the artificial pause held during [`initialize`]
    /// before the final state lands, guarding shells against a loading
    /// flash.
    ///
    /// [`initialize`]: SessionStore::initialize
    pub fn new(
        storage: Arc<dyn SessionStorage>,
        navigator: Arc<dyn Navigator>,
        client: Arc<AuthClient>,
        init_delay: Duration,
    ) -> Self {
        Self {
            storage,
            navigator,
            client,
            state: RwLock::new(SessionState::Uninitialized),
            init_delay,
        }
    }

    /// The current lifecycle state.
    pub fn state(&self) -> SessionState {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Recover a session from durable storage.
    ///
    /// A user record that fails to parse purges storage and lands on
    /// `Unauthenticated`; recovery never fails outright. A recovered pair
    /// primes the request client's token cell.
    pub async fn initialize(&self) {
        self.set_state(SessionState::Loading);
        let recovered = self.recover_session();
        tokio::time::sleep(self.init_delay).await;
        match recovered {
            Some(session) => {
                self.client.set_token(Some(session.token.clone()));
                info!(user_id = %session.user.user_id, "session recovered from storage");
                self.set_state(SessionState::Authenticated(session));
            }
            None => self.set_state(SessionState::Unauthenticated),
        }
    }

    /// Establish a session, writing through to storage and the token cell.
    pub fn login(&self, token: String, user: AuthUser) {
        if let Err(err) = self.storage.set(TOKEN_STORAGE_KEY, &token) {
            warn!(error = %err, "could not persist session token");
        }
        match serde_json::to_string(&user) {
            Ok(serialized) => {
                if let Err(err) = self.storage.set(USER_STORAGE_KEY, &serialized) {
                    warn!(error = %err, "could not persist session user");
                }
            }
            Err(err) => warn!(error = %err, "could not serialise session user"),
        }
        self.client.set_token(Some(token.clone()));
        self.set_state(SessionState::Authenticated(Session { token, user }));
    }

    /// Tear the session down everywhere: memory, storage, and token cell.
    pub fn logout(&self) {
        self.client.set_token(None);
        for key in [TOKEN_STORAGE_KEY, USER_STORAGE_KEY] {
            if let Err(err) = self.storage.remove(key) {
                warn!(error = %err, key, "could not clear session storage");
            }
        }
        self.set_state(SessionState::Unauthenticated);
    }

    /// Send the shell to the login screen, remembering where it was.
    ///
    /// The current location goes under the one-shot redirect key unless it
    /// is already the login or auth-callback screen.
    pub fn redirect_to_login(&self) {
        let current = self.navigator.current_path_and_query();
        let path_only = current.split('?').next().unwrap_or("");
        if !is_disallowed_path(path_only) {
            if let Err(err) = self.storage.set(REDIRECT_STORAGE_KEY, &current) {
                warn!(error = %err, "could not record redirect target");
            }
        }
        self.navigator.navigate(LOGIN_PATH);
    }

    /// Consume the auth-callback query exactly once.
    ///
    /// On success the session is established and the shell navigates to the
    /// stored redirect target, filtered through the open-redirect guard; on
    /// failure nothing about the session changes.
    pub fn handle_auth_callback(&self, query: &str) -> CallbackOutcome {
        let params = match parse_callback_query(query) {
            Ok(params) => params,
            Err(message) => {
                warn!(%message, "auth callback failed");
                return CallbackOutcome::Failed { message };
            }
        };
        self.login(
            params.token,
            AuthUser {
                user_id: params.user_id,
                email: params.email,
            },
        );
        let stored = self.take_stored_redirect();
        let redirect_to = safe_redirect_path(stored.as_deref(), &self.navigator.origin());
        self.navigator.navigate(&redirect_to);
        CallbackOutcome::LoggedIn { redirect_to }
    }

    /// Wire the request client's 401/403 teardown to logout-and-redirect.
    ///
    /// Holds only a weak reference, so dropping the store unhooks the
    /// handler instead of leaking a cycle through the client.
    pub fn install_session_error_handler(self: &Arc<Self>) {
        let weak = Arc::downgrade(self);
        self.client.set_session_error_handler(Arc::new(move || {
            if let Some(store) = weak.upgrade() {
                store.logout();
                store.redirect_to_login();
            }
        }));
    }

    fn set_state(&self, state: SessionState) {
        *self.state.write().unwrap_or_else(PoisonError::into_inner) = state;
    }

    /// Read and validate the stored token/user pair, purging on corruption.
    fn recover_session(&self) -> Option<Session> {
        let token = self.read_key(TOKEN_STORAGE_KEY)?;
        let raw_user = self.read_key(USER_STORAGE_KEY)?;
        match serde_json::from_str::<AuthUser>(&raw_user) {
            Ok(user) => Some(Session { token, user }),
            Err(err) => {
                warn!(error = %err, "stored session user is corrupt; purging");
                for key in [TOKEN_STORAGE_KEY, USER_STORAGE_KEY] {
                    if let Err(err) = self.storage.remove(key) {
                        warn!(error = %err, key, "could not purge session storage");
                    }
                }
                None
            }
        }
    }

    fn read_key(&self, key: &str) -> Option<String> {
        match self.storage.get(key) {
            Ok(value) => value,
            Err(err) => {
                warn!(error = %err, key, "could not read session storage");
                None
            }
        }
    }

    /// One-shot read of the stored redirect target.
    fn take_stored_redirect(&self) -> Option<String> {
        let stored = self.read_key(REDIRECT_STORAGE_KEY);
        if let Err(err) = self.storage.remove(REDIRECT_STORAGE_KEY) {
            warn!(error = %err, "could not clear redirect target");
        }
        stored
    }
}
