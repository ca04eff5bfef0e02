/// Error type returned by this crate.
///
/// Every failure of a logical call ends in exactly one of these variants.
/// Intermediate failures absorbed by retries are never surfaced on their own.
#[derive(Debug, thiserror::Error)]
pub enum OllamaError {
    /// No response was obtained and the failure is not worth retrying.
    #[error("transport error: {0}")]
    Transport(String),
    /// Non-success HTTP status code with raw response body.
    #[error("http error {status}: {body}")]
    StatusCode { status: u16, body: String },
    /// JSON encoding of the request or decoding of the response failed.
    #[error("decode error: {0}")]
    Decode(String),
    /// The per-request timeout elapsed before a response arrived.
    #[error("request timed out")]
    Timeout,
    /// Transient failures persisted through every allowed attempt.
    #[error("giving up after {attempts} attempts: {last}")]
    MaxRetriesExceeded {
        /// Number of round trips that were made.
        attempts: usize,
        /// The failure observed on the final attempt.
        #[source]
        last: Box<OllamaError>,
    },
}

impl OllamaError {
    /// HTTP status of the failure, looking through retry exhaustion.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::StatusCode { status, .. } => Some(*status),
            Self::MaxRetriesExceeded { last, .. } => last.status(),
            _ => None,
        }
    }

    /// Number of attempts made, when the error came from an exhausted retry budget.
    pub fn attempts(&self) -> Option<usize> {
        match self {
            Self::MaxRetriesExceeded { attempts, .. } => Some(*attempts),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::OllamaError;

    #[test]
    fn status_looks_through_exhaustion() {
        let err = OllamaError::MaxRetriesExceeded {
            attempts: 3,
            last: Box::new(OllamaError::StatusCode {
                status: 503,
                body: "busy".to_owned(),
            }),
        };
        assert_eq!(err.status(), Some(503));
        assert_eq!(err.attempts(), Some(3));
    }

    #[test]
    fn display_includes_last_cause() {
        let err = OllamaError::MaxRetriesExceeded {
            attempts: 2,
            last: Box::new(OllamaError::Transport("connection refused".to_owned())),
        };
        assert_eq!(
            err.to_string(),
            "giving up after 2 attempts: transport error: connection refused"
        );
    }
}
