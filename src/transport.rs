//! Network seams used by the executor.
//!
//! The default implementations wrap a pooled `reqwest` client; tests and
//! embedders can substitute their own.

use async_trait::async_trait;
use reqwest::header;

use crate::{classify::body_failure, HttpRequest, RawResponse, RequestOutcome};

/// Issues a single round trip without suspending the calling thread.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: &HttpRequest) -> RequestOutcome;
}

/// Async transport backed by a shared `reqwest::Client` connection pool.
#[derive(Clone, Debug, Default)]
pub struct ReqwestTransport {
    http: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses a preconfigured client (proxies, TLS roots, default headers).
    pub fn with_client(http: reqwest::Client) -> Self {
        Self { http }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: &HttpRequest) -> RequestOutcome {
        let mut builder = self
            .http
            .request(request.method.as_reqwest(), &request.url)
            .timeout(request.timeout);
        if let Some(body) = &request.body {
            builder = builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(body.clone());
        }

        let response = builder.send().await?;
        let status = response.status();
        // A status line that arrived is kept even when the body is cut short.
        let body = match response.bytes().await {
            Ok(body) => body.to_vec(),
            Err(_) if !status.is_success() => Vec::new(),
            Err(err) => return Err(body_failure(err)),
        };
        Ok(RawResponse::new(status.as_u16(), body))
    }
}

/// Issues a single round trip on the calling thread.
#[cfg(feature = "blocking")]
pub trait BlockingTransport: Send + Sync {
    fn send(&self, request: &HttpRequest) -> RequestOutcome;
}

/// Blocking transport backed by `reqwest::blocking::Client`.
///
/// Must not be constructed or used from inside an async runtime.
#[cfg(feature = "blocking")]
#[derive(Clone, Debug, Default)]
pub struct ReqwestBlockingTransport {
    http: reqwest::blocking::Client,
}

#[cfg(feature = "blocking")]
impl ReqwestBlockingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_client(http: reqwest::blocking::Client) -> Self {
        Self { http }
    }
}

#[cfg(feature = "blocking")]
impl BlockingTransport for ReqwestBlockingTransport {
    fn send(&self, request: &HttpRequest) -> RequestOutcome {
        let mut builder = self
            .http
            .request(request.method.as_reqwest(), &request.url)
            .timeout(request.timeout);
        if let Some(body) = &request.body {
            builder = builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(body.clone());
        }

        let response = builder.send()?;
        let status = response.status();
        let body = match response.bytes() {
            Ok(body) => body.to_vec(),
            Err(_) if !status.is_success() => Vec::new(),
            Err(err) => return Err(body_failure(err)),
        };
        Ok(RawResponse::new(status.as_u16(), body))
    }
}
