//! Outbound port for executing HTTP exchanges.

use async_trait::async_trait;

use super::macros::define_port_error;

define_port_error! {
    /// Failures raised by the transport before a response is available.
    pub enum TransportError {
        /// The exchange could not complete (DNS, connect, TLS, read).
        Transport => "transport failure: {message}",
        /// The exchange exceeded the configured deadline.
        Timeout => "transport timeout: {message}",
    }
}

/// HTTP method of an outbound exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// Read a resource.
    Get,
    /// Create a resource or trigger an action.
    Post,
    /// Replace a resource.
    Put,
    /// Remove a resource.
    Delete,
}

impl Method {
    /// Canonical wire spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Delete => "DELETE",
        }
    }
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully prepared outbound request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WireRequest {
    /// HTTP method.
    pub method: Method,
    /// Absolute URL of the exchange.
    pub url: String,
    /// Bearer token to attach, when the request is authenticated.
    pub bearer_token: Option<String>,
    /// JSON body to send, when present.
    pub json_body: Option<serde_json::Value>,
}

/// The raw outcome of an exchange that produced a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WireResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response body as text; may be empty.
    pub body: String,
}

impl WireResponse {
    /// Whether the status is in the 2xx range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Executes prepared HTTP exchanges against the backend.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Perform the exchange and return the raw response.
    ///
    /// A non-2xx status is a response, not an error; only failures that
    /// prevent a response from arriving map to [`TransportError`].
    async fn execute(&self, request: WireRequest) -> Result<WireResponse, TransportError>;
}

#[cfg(test)]
mod tests {
    //! Status classification coverage.
    use super::{Method, WireResponse};
    use rstest::rstest;

    #[rstest]
    #[case(200, true)]
    #[case(204, true)]
    #[case(299, true)]
    #[case(199, false)]
    #[case(300, false)]
    #[case(401, false)]
    #[case(500, false)]
    fn success_is_the_2xx_range(#[case] status: u16, #[case] expected: bool) {
        let response = WireResponse {
            status,
            body: String::new(),
        };
        assert_eq!(response.is_success(), expected);
    }

    #[rstest]
    #[case(Method::Get, "GET")]
    #[case(Method::Post, "POST")]
    #[case(Method::Put, "PUT")]
    #[case(Method::Delete, "DELETE")]
    fn methods_spell_canonically(#[case] method: Method, #[case] expected: &str) {
        assert_eq!(method.as_str(), expected);
        assert_eq!(method.to_string(), expected);
    }
}
