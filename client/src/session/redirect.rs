//! Open-redirect guard for the post-login redirect target.

use url::Url;

use crate::domain::{AUTH_CALLBACK_PATH, LOGIN_PATH};

const FALLBACK: &str = "/";

/// Filter a stored redirect target down to a safe, app-internal path.
///
/// Only same-origin paths survive, and never the login or auth-callback
/// screens (redirecting there would loop). Anything else, including
/// unparseable values and other origins, collapses to `/`. Fragments are
/// stripped before the check.
pub fn safe_redirect_path(raw: Option<&str>, origin: &str) -> String {
    let Some(raw) = raw else {
        return FALLBACK.to_owned();
    };
    let raw = raw.split('#').next().unwrap_or("");
    if raw.trim().is_empty() {
        return FALLBACK.to_owned();
    }
    let Ok(base) = Url::parse(origin) else {
        return FALLBACK.to_owned();
    };
    let Ok(url) = base.join(raw) else {
        return FALLBACK.to_owned();
    };
    if url.origin() != base.origin() {
        return FALLBACK.to_owned();
    }
    let path = url.path();
    if is_disallowed_path(path) {
        return FALLBACK.to_owned();
    }
    match url.query() {
        Some(query) => format!("{path}?{query}"),
        None => path.to_owned(),
    }
}

/// Paths the redirect must never point back at.
pub(super) fn is_disallowed_path(path: &str) -> bool {
    path == LOGIN_PATH || path.starts_with("/login/") || path.starts_with(AUTH_CALLBACK_PATH)
}
