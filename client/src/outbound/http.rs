//! Reqwest-backed HTTP transport adapter.

use std::time::Duration;

use async_trait::async_trait;

use crate::domain::ports::{HttpTransport, Method, TransportError, WireRequest, WireResponse};

/// [`HttpTransport`] over a shared `reqwest` client.
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Build a transport with a per-request deadline.
    pub fn new(timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn execute(&self, request: WireRequest) -> Result<WireResponse, TransportError> {
        let mut builder = match request.method {
            Method::Get => self.client.get(&request.url),
            Method::Post => self.client.post(&request.url),
            Method::Put => self.client.put(&request.url),
            Method::Delete => self.client.delete(&request.url),
        };
        if let Some(token) = &request.bearer_token {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = &request.json_body {
            builder = builder.json(body);
        }
        let response = builder.send().await.map_err(map_transport_error)?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(map_transport_error)?;
        Ok(WireResponse { status, body })
    }
}

fn map_transport_error(err: reqwest::Error) -> TransportError {
    if err.is_timeout() {
        TransportError::timeout(err)
    } else {
        TransportError::transport(err)
    }
}
