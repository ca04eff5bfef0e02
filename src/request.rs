use std::fmt;
use std::time::Duration;

use serde::Serialize;

use crate::{classify::encode_error, Result};

/// HTTP methods used by the model-serving API.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Method {
    Get,
    Post,
    Delete,
}

impl Method {
    pub(crate) fn as_reqwest(self) -> reqwest::Method {
        match self {
            Self::Get => reqwest::Method::GET,
            Self::Post => reqwest::Method::POST,
            Self::Delete => reqwest::Method::DELETE,
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Delete => "DELETE",
        })
    }
}

/// One outbound call, fully prepared and replayable across attempts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    /// Serialized JSON payload, sent with `Content-Type: application/json`.
    pub body: Option<Vec<u8>>,
    pub timeout: Duration,
}

impl HttpRequest {
    /// Builds a request without a body.
    pub fn new(method: Method, url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            method,
            url: url.into(),
            body: None,
            timeout,
        }
    }

    /// Builds a request carrying `body` serialized as JSON.
    pub fn json<B: Serialize + ?Sized>(
        method: Method,
        url: impl Into<String>,
        body: &B,
        timeout: Duration,
    ) -> Result<Self> {
        let body = serde_json::to_vec(body).map_err(encode_error)?;
        Ok(Self {
            method,
            url: url.into(),
            body: Some(body),
            timeout,
        })
    }
}

/// Status and body of a response that made it back over the wire.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl RawResponse {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn is_server_error(&self) -> bool {
        (500..600).contains(&self.status)
    }

    pub(crate) fn body_text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Why an attempt produced no response at all.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TransportFailure {
    /// The per-request timeout elapsed.
    Timeout,
    /// Connection refused, DNS failure, reset while sending or reading.
    Connection(String),
    /// The request itself could not be issued; retrying would not help.
    Request(String),
}

impl fmt::Display for TransportFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Timeout => f.write_str("timed out"),
            Self::Connection(message) => write!(f, "connection failed: {message}"),
            Self::Request(message) => write!(f, "request failed: {message}"),
        }
    }
}

/// Result of a single round trip.
pub type RequestOutcome = std::result::Result<RawResponse, TransportFailure>;

/// Joins a base URL and an API path with exactly one `/` between them.
pub(crate) fn join_url(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}
