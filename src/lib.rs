//! `ollama-http` is a retrying HTTP client for local model-serving REST APIs.
//!
//! Every call goes through one executor that serializes the request body,
//! retries transient failures (connection errors, 5xx) with backoff, fails
//! fast on everything else, and decodes the JSON reply:
//! - [`OllamaClient`] runs calls on an async runtime
//! - [`BlockingOllamaClient`] runs the same calls on the current thread
//!   (`blocking` feature, enabled by default)

mod classify;
mod client;
mod error;
mod executor;
mod options;
mod request;
mod retry;
mod sleep;
mod tools;
mod transport;
mod types;

#[cfg(feature = "blocking")]
pub mod blocking;

#[cfg(feature = "blocking")]
pub use blocking::BlockingOllamaClient;
pub use client::OllamaClient;
pub use error::OllamaError;
#[cfg(feature = "blocking")]
pub use executor::execute_blocking;
pub use executor::execute;
pub use options::{ClientConfig, DEFAULT_BASE_URL};
pub use request::{HttpRequest, Method, RawResponse, RequestOutcome, TransportFailure};
pub use retry::{Backoff, RetryPolicy};
#[cfg(feature = "blocking")]
pub use sleep::{BlockingSleep, ThreadSleep};
pub use sleep::{Sleep, TokioSleep};
pub use tools::{FunctionDefinition, ToolCall, ToolCallFunction, ToolDefinition, Tools};
#[cfg(feature = "blocking")]
pub use transport::{BlockingTransport, ReqwestBlockingTransport};
pub use transport::{ReqwestTransport, Transport};
pub use types::{
    ChatMessage, ChatRequest, ChatResponse, ModelList, ModelSummary, Role, VersionResponse,
};

pub type Result<T> = std::result::Result<T, OllamaError>;
