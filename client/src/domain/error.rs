//! Client-side error taxonomy.
//!
//! Every failure surfaced by the request pipeline, the resource clients, the
//! cache layer, and the operations layer is an [`ApiError`]. Errors propagate
//! through operation results and cache snapshots; nothing in this crate
//! throws past the caller.

use thiserror::Error;

/// Convenient result alias for fallible client operations.
pub type ApiResult<T> = Result<T, ApiError>;

/// Failure categories for client operations.
///
/// The variants mirror how the remote API misbehaves from the client's point
/// of view: the wire broke, the server answered with a non-success status,
/// the session was rejected, the caller handed us bad input, or a success
/// payload could not be decoded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Transport-level failure before a response arrived.
    #[error("network failure: {message}")]
    Network {
        /// Description of the transport fault.
        message: String,
    },
    /// The server answered with a non-success status.
    #[error("http status {status}: {body}")]
    Http {
        /// HTTP status code.
        status: u16,
        /// Response body text, retained for diagnostics.
        body: String,
    },
    /// A 401/403 arrived for a request that carried a token.
    ///
    /// Raising this error also tears down the session: the request client
    /// clears its token cell, purges the durable session record, and fires
    /// the registered session-error handler before the error reaches the
    /// caller.
    #[error("authentication failed with status {status}")]
    Authentication {
        /// The rejecting status code (401 or 403).
        status: u16,
    },
    /// Client-side validation failure; the request never reached the network.
    #[error("validation failed: {message}")]
    Validation {
        /// What the caller got wrong.
        message: String,
    },
    /// A success response carried a payload we could not decode.
    #[error("malformed response payload: {message}")]
    Decode {
        /// Description of the decode failure.
        message: String,
    },
}

impl ApiError {
    /// Build a [`ApiError::Network`] from any displayable cause.
    pub fn network(message: impl std::fmt::Display) -> Self {
        Self::Network {
            message: message.to_string(),
        }
    }

    /// Build a [`ApiError::Http`] from a status code and body text.
    pub fn http(status: u16, body: impl Into<String>) -> Self {
        Self::Http {
            status,
            body: body.into(),
        }
    }

    /// Build a [`ApiError::Authentication`] for the given status.
    pub fn authentication(status: u16) -> Self {
        Self::Authentication { status }
    }

    /// Build a [`ApiError::Validation`] from any displayable cause.
    pub fn validation(message: impl std::fmt::Display) -> Self {
        Self::Validation {
            message: message.to_string(),
        }
    }

    /// Build a [`ApiError::Decode`] from any displayable cause.
    pub fn decode(message: impl std::fmt::Display) -> Self {
        Self::Decode {
            message: message.to_string(),
        }
    }

    /// Whether this error tears down the session.
    pub fn is_authentication(&self) -> bool {
        matches!(self, Self::Authentication { .. })
    }
}

#[cfg(test)]
mod tests {
    //! Display formatting and constructor coverage.
    use super::ApiError;
    use rstest::rstest;

    #[rstest]
    #[case(ApiError::network("connection refused"), "network failure: connection refused")]
    #[case(ApiError::http(500, "boom"), "http status 500: boom")]
    #[case(ApiError::authentication(401), "authentication failed with status 401")]
    #[case(ApiError::validation("name must not be empty"), "validation failed: name must not be empty")]
    #[case(ApiError::decode("expected a map"), "malformed response payload: expected a map")]
    fn formats_each_variant(#[case] error: ApiError, #[case] expected: &str) {
        assert_eq!(error.to_string(), expected);
    }

    #[rstest]
    fn only_authentication_is_session_fatal() {
        assert!(ApiError::authentication(403).is_authentication());
        assert!(!ApiError::http(403, "nope").is_authentication());
        assert!(!ApiError::network("lost").is_authentication());
    }
}
