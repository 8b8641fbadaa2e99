//! Authenticated request pipeline.
//!
//! Every network exchange flows through [`AuthClient`]: it resolves the
//! bearer token, executes the exchange over the transport port, and converts
//! wire outcomes into the [`ApiError`] taxonomy. Session teardown on a
//! rejected token happens here, once, instead of in every resource client.

use std::sync::{Arc, PoisonError, RwLock};

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

use crate::domain::ports::{HttpTransport, Method, SessionStorage, WireRequest, WireResponse};
use crate::domain::{ApiError, ApiResult, TOKEN_STORAGE_KEY, USER_STORAGE_KEY};

/// Callback fired when a token-bearing request is rejected with 401/403.
pub type SessionErrorHandler = Arc<dyn Fn() + Send + Sync>;

/// Authenticated HTTP client shared by every resource client.
///
/// The token lives in an in-memory cell, refreshed from durable storage on
/// demand so a freshly constructed client picks up an existing session
/// without an explicit handshake.
pub struct AuthClient {
    transport: Arc<dyn HttpTransport>,
    storage: Arc<dyn SessionStorage>,
    base_url: Url,
    token_cell: RwLock<Option<String>>,
    on_session_error: RwLock<Option<SessionErrorHandler>>,
}

impl AuthClient {
    /// Build a client over the given transport and session storage.
    pub fn new(
        transport: Arc<dyn HttpTransport>,
        storage: Arc<dyn SessionStorage>,
        base_url: Url,
    ) -> Self {
        Self {
            transport,
            storage,
            base_url,
            token_cell: RwLock::new(None),
            on_session_error: RwLock::new(None),
        }
    }

    /// Replace the in-memory token; `None` clears it.
    pub fn set_token(&self, token: Option<String>) {
        *self
            .token_cell
            .write()
            .unwrap_or_else(PoisonError::into_inner) = token;
    }

    /// The in-memory token, if any.
    pub fn token(&self) -> Option<String> {
        self.token_cell
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Register the callback fired when the session is rejected.
    pub fn set_session_error_handler(&self, handler: SessionErrorHandler) {
        *self
            .on_session_error
            .write()
            .unwrap_or_else(PoisonError::into_inner) = Some(handler);
    }

    /// Drop the session-error callback, e.g. on shutdown.
    pub fn clear_session_error_handler(&self) {
        *self
            .on_session_error
            .write()
            .unwrap_or_else(PoisonError::into_inner) = None;
    }

    /// Execute one exchange with token resolution and 401/403 teardown.
    ///
    /// A non-2xx response is returned as `Ok`; only transport faults and
    /// session rejection become errors here. Typed helpers layer status
    /// checking on top.
    pub async fn send(
        &self,
        method: Method,
        path: &str,
        json_body: Option<serde_json::Value>,
        skip_auth: bool,
    ) -> ApiResult<WireResponse> {
        let url = resolve_url(&self.base_url, path);
        let bearer_token = if skip_auth { None } else { self.resolve_token() };
        let token_sent = bearer_token.is_some();
        debug!(%method, %url, authenticated = token_sent, "dispatching request");

        let response = self
            .transport
            .execute(WireRequest {
                method,
                url,
                bearer_token,
                json_body,
            })
            .await
            .map_err(ApiError::network)?;

        if matches!(response.status, 401 | 403) && token_sent {
            self.tear_down_session();
            return Err(ApiError::authentication(response.status));
        }
        Ok(response)
    }

    /// GET a JSON resource.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let response = self.send(Method::Get, path, None, false).await?;
        decode_success(response)
    }

    /// POST a JSON body and decode a JSON response.
    pub async fn post_json<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<T> {
        let response = self
            .send(Method::Post, path, Some(encode_body(body)?), false)
            .await?;
        decode_success(response)
    }

    /// POST with no body and decode a JSON response.
    pub async fn post_empty_json<T: DeserializeOwned>(&self, path: &str) -> ApiResult<T> {
        let response = self.send(Method::Post, path, None, false).await?;
        decode_success(response)
    }

    /// POST a JSON body, discarding any success payload.
    pub async fn post_unit<B: Serialize>(&self, path: &str, body: &B) -> ApiResult<()> {
        let response = self
            .send(Method::Post, path, Some(encode_body(body)?), false)
            .await?;
        require_success(response)
    }

    /// PUT a JSON body and decode a JSON response.
    pub async fn put_json<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ApiResult<T> {
        let response = self
            .send(Method::Put, path, Some(encode_body(body)?), false)
            .await?;
        decode_success(response)
    }

    /// PUT a JSON body, discarding any success payload.
    pub async fn put_unit<B: Serialize>(&self, path: &str, body: &B) -> ApiResult<()> {
        let response = self
            .send(Method::Put, path, Some(encode_body(body)?), false)
            .await?;
        require_success(response)
    }

    /// DELETE a resource, discarding any success payload.
    pub async fn delete(&self, path: &str) -> ApiResult<()> {
        let response = self.send(Method::Delete, path, None, false).await?;
        require_success(response)
    }

    /// In-memory token, falling back to durable storage once.
    fn resolve_token(&self) -> Option<String> {
        if let Some(token) = self.token() {
            return Some(token);
        }
        match self.storage.get(TOKEN_STORAGE_KEY) {
            Ok(Some(token)) => {
                self.set_token(Some(token.clone()));
                Some(token)
            }
            Ok(None) => None,
            Err(err) => {
                warn!(error = %err, "could not read token from session storage");
                None
            }
        }
    }

    /// Clear the in-memory token, purge durable state, fire the handler.
    fn tear_down_session(&self) {
        self.set_token(None);
        for key in [TOKEN_STORAGE_KEY, USER_STORAGE_KEY] {
            if let Err(err) = self.storage.remove(key) {
                warn!(error = %err, key, "could not purge session storage");
            }
        }
        let handler = self
            .on_session_error
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        if let Some(handler) = handler {
            handler();
        }
    }
}

/// Join a request path onto the base URL; absolute URLs pass through.
fn resolve_url(base_url: &Url, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
        return path.to_owned();
    }
    let base = base_url.as_str().trim_end_matches('/');
    let suffix = path.trim_start_matches('/');
    format!("{base}/{suffix}")
}

fn encode_body<B: Serialize>(body: &B) -> ApiResult<serde_json::Value> {
    serde_json::to_value(body)
        .map_err(|err| ApiError::validation(format!("could not encode request body: {err}")))
}

fn decode_success<T: DeserializeOwned>(response: WireResponse) -> ApiResult<T> {
    if !response.is_success() {
        return Err(ApiError::http(response.status, response.body));
    }
    serde_json::from_str(&response.body).map_err(ApiError::decode)
}

fn require_success(response: WireResponse) -> ApiResult<()> {
    if !response.is_success() {
        return Err(ApiError::http(response.status, response.body));
    }
    Ok(())
}
