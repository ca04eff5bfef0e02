//! Maps heterogeneous failure signals onto [`OllamaError`].
//!
//! Every function here is total: whatever comes in, exactly one variant
//! comes out, and `reqwest` types never leak to callers.

use serde::de::DeserializeOwned;

use crate::{OllamaError, RawResponse, TransportFailure};

impl From<reqwest::Error> for TransportFailure {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportFailure::Timeout
        } else if err.is_connect() || err.is_request() || err.is_body() {
            TransportFailure::Connection(err.to_string())
        } else {
            TransportFailure::Request(err.to_string())
        }
    }
}

impl From<TransportFailure> for OllamaError {
    fn from(failure: TransportFailure) -> Self {
        match failure {
            TransportFailure::Timeout => OllamaError::Timeout,
            TransportFailure::Connection(message) | TransportFailure::Request(message) => {
                OllamaError::Transport(message)
            }
        }
    }
}

/// Failure while reading the body of a success response.
///
/// The exchange was cut short mid-stream, so anything but a timeout counts
/// as a connection failure, whatever kind `reqwest` assigns it.
pub(crate) fn body_failure(err: reqwest::Error) -> TransportFailure {
    if err.is_timeout() {
        TransportFailure::Timeout
    } else {
        TransportFailure::Connection(err.to_string())
    }
}

pub(crate) fn status_error(response: &RawResponse) -> OllamaError {
    OllamaError::StatusCode {
        status: response.status,
        body: response.body_text(),
    }
}

pub(crate) fn encode_error(err: serde_json::Error) -> OllamaError {
    OllamaError::Decode(format!("could not encode request body: {err}"))
}

/// Decodes a success body into `T`.
///
/// An empty (or whitespace-only) body is read as JSON `null`, so endpoints
/// that reply with nothing decode into `()` or `Option<_>`.
pub(crate) fn decode_body<T: DeserializeOwned>(body: &[u8]) -> Result<T, OllamaError> {
    let body = if body.iter().all(u8::is_ascii_whitespace) {
        &b"null"[..]
    } else {
        body
    };
    serde_json::from_slice(body).map_err(|err| {
        OllamaError::Decode(format!(
            "invalid response JSON: {err}; body: {}",
            String::from_utf8_lossy(body)
        ))
    })
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::{decode_body, status_error};
    use crate::{OllamaError, RawResponse, TransportFailure};

    #[derive(Debug, Deserialize, PartialEq)]
    struct Flag {
        ok: bool,
    }

    #[test]
    fn empty_body_decodes_as_unit() {
        decode_body::<()>(b"").expect("empty body must decode as unit");
        decode_body::<()>(b"  \n").expect("whitespace body must decode as unit");
        assert_eq!(decode_body::<Option<Flag>>(b"").expect("option"), None);
    }

    #[test]
    fn mismatched_shape_is_decode_error() {
        let err = decode_body::<Flag>(br#"{"ok": "yes"}"#).expect_err("shape must not match");
        match err {
            OllamaError::Decode(message) => assert!(message.contains(r#"{"ok": "yes"}"#)),
            other => panic!("expected decode error, got {other:?}"),
        }
    }

    #[test]
    fn transport_failures_map_to_closed_set() {
        assert!(matches!(
            OllamaError::from(TransportFailure::Timeout),
            OllamaError::Timeout
        ));
        assert!(matches!(
            OllamaError::from(TransportFailure::Connection("refused".to_owned())),
            OllamaError::Transport(message) if message == "refused"
        ));
        assert!(matches!(
            OllamaError::from(TransportFailure::Request("bad url".to_owned())),
            OllamaError::Transport(_)
        ));
    }

    #[test]
    fn status_error_keeps_body_text() {
        let err = status_error(&RawResponse::new(404, &b"model not found"[..]));
        match err {
            OllamaError::StatusCode { status, body } => {
                assert_eq!(status, 404);
                assert_eq!(body, "model not found");
            }
            other => panic!("expected status error, got {other:?}"),
        }
    }
}
