//! Auth-callback query parsing.

use std::collections::HashMap;

/// Outcome of consuming the auth-callback query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallbackOutcome {
    /// The callback carried a complete credential set; the session is
    /// established and the shell was sent to `redirect_to`.
    LoggedIn {
        /// Path the shell was navigated to.
        redirect_to: String,
    },
    /// The callback reported an error or was missing credentials.
    Failed {
        /// Human-readable description for the callback screen.
        message: String,
    },
}

/// Credential set carried by a successful callback.
#[derive(Debug)]
pub(super) struct CallbackParams {
    pub token: String,
    pub user_id: String,
    pub email: String,
}

/// Extract the credential set, or the reason there is none.
pub(super) fn parse_callback_query(query: &str) -> Result<CallbackParams, String> {
    let raw = query.trim_start_matches('?');
    let mut params: HashMap<String, String> =
        url::form_urlencoded::parse(raw.as_bytes()).into_owned().collect();
    if let Some(error) = params.remove("error") {
        return Err(error);
    }
    match (
        params.remove("token"),
        params.remove("user_id"),
        params.remove("email"),
    ) {
        (Some(token), Some(user_id), Some(email)) => Ok(CallbackParams {
            token,
            user_id,
            email,
        }),
        _ => Err("missing authentication data".to_owned()),
    }
}
