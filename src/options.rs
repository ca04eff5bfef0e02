use std::time::Duration;

use crate::RetryPolicy;

/// Default address of a locally running model server.
pub const DEFAULT_BASE_URL: &str = "http://localhost:11434";

/// Configures endpoint, timeout and retry behavior.
///
/// Built once and shared read-only by every call of the owning client.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ClientConfig {
    /// Server root, e.g. `http://localhost:11434`.
    pub base_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
    pub retry_policy: RetryPolicy,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            timeout: Duration::from_secs(30),
            retry_policy: RetryPolicy::default(),
        }
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    /// Reads configuration from environment variables.
    ///
    /// Reads:
    /// - `OLLAMA_HOST` — server address; `http://` is assumed when no scheme is given
    /// - `OLLAMA_TIMEOUT_MS` — optional per-request timeout
    /// - `OLLAMA_MAX_RETRIES` — optional retry budget
    /// - `OLLAMA_RETRY_BACKOFF_MS` — optional base backoff delay
    ///
    /// Returns an error if `OLLAMA_HOST` is missing or empty, or a numeric
    /// variable does not parse.
    pub fn from_env() -> std::result::Result<Self, String> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup<F>(lookup: F) -> std::result::Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("OLLAMA_HOST")
            .ok_or_else(|| "missing OLLAMA_HOST environment variable".to_owned())?;
        let host = host.trim();
        if host.is_empty() {
            return Err("OLLAMA_HOST is set but empty".to_owned());
        }

        let mut config = Self::new(normalize_host(host));
        if let Some(ms) = parse_u64(&lookup, "OLLAMA_TIMEOUT_MS")? {
            config.timeout = Duration::from_millis(ms);
        }
        if let Some(retries) = parse_u64(&lookup, "OLLAMA_MAX_RETRIES")? {
            config.retry_policy.max_retries = usize::try_from(retries)
                .map_err(|_| format!("OLLAMA_MAX_RETRIES is out of range: {retries}"))?;
        }
        if let Some(ms) = parse_u64(&lookup, "OLLAMA_RETRY_BACKOFF_MS")? {
            config.retry_policy.base_delay = Duration::from_millis(ms);
        }
        Ok(config)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_retry_policy(mut self, retry_policy: RetryPolicy) -> Self {
        self.retry_policy = retry_policy;
        self
    }
}

fn normalize_host(host: &str) -> String {
    let host = host.trim_end_matches('/');
    if host.contains("://") {
        host.to_owned()
    } else {
        format!("http://{host}")
    }
}

fn parse_u64<F>(lookup: &F, key: &str) -> std::result::Result<Option<u64>, String>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(None),
        Some(value) if value.trim().is_empty() => Ok(None),
        Some(value) => value
            .trim()
            .parse()
            .map(Some)
            .map_err(|err| format!("{key} must be a non-negative integer: {err}")),
    }
}
