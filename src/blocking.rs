//! Blocking client with the same contract as [`OllamaClient`](crate::OllamaClient).
//!
//! Enabled with the `blocking` feature. Calls occupy the current thread,
//! including during backoff sleeps, and must not be made from inside an
//! async runtime.

use std::fmt;
use std::sync::Arc;

use serde::{de::DeserializeOwned, Serialize};

use crate::{
    client::{build_request, prepare_chat, CHAT_PATH, DELETE_PATH, TAGS_PATH, VERSION_PATH},
    executor::execute_blocking,
    types::DeleteRequest,
    BlockingSleep, BlockingTransport, ChatRequest, ChatResponse, ClientConfig, Method, ModelList,
    ReqwestBlockingTransport, Result, ThreadSleep, Tools, VersionResponse,
};

#[derive(Clone)]
/// Blocking HTTP client for a model-serving REST API.
pub struct BlockingOllamaClient {
    transport: Arc<dyn BlockingTransport>,
    sleeper: Arc<dyn BlockingSleep>,
    config: Arc<ClientConfig>,
    tools: Option<Arc<Tools>>,
}

impl fmt::Debug for BlockingOllamaClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BlockingOllamaClient")
            .field("config", &self.config)
            .field("tools", &self.tools.as_ref().map(|tools| tools.len()))
            .finish()
    }
}

impl BlockingOllamaClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_config(ClientConfig::new(base_url))
    }

    pub fn with_config(config: ClientConfig) -> Self {
        Self {
            transport: Arc::new(ReqwestBlockingTransport::new()),
            sleeper: Arc::new(ThreadSleep),
            config: Arc::new(config),
            tools: None,
        }
    }

    /// Creates a client from `OLLAMA_*` environment variables.
    pub fn from_env() -> std::result::Result<Self, String> {
        Ok(Self::with_config(ClientConfig::from_env()?))
    }

    pub fn with_transport(mut self, transport: impl BlockingTransport + 'static) -> Self {
        self.transport = Arc::new(transport);
        self
    }

    pub fn with_sleeper(mut self, sleeper: impl BlockingSleep + 'static) -> Self {
        self.sleeper = Arc::new(sleeper);
        self
    }

    pub fn with_tools(mut self, tools: Tools) -> Self {
        self.tools = Some(Arc::new(tools));
        self
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn tools(&self) -> Option<&Tools> {
        self.tools.as_deref()
    }

    pub fn version(&self) -> Result<VersionResponse> {
        self.get(VERSION_PATH)
    }

    pub fn list_models(&self) -> Result<ModelList> {
        self.get(TAGS_PATH)
    }

    pub fn chat(&self, request: ChatRequest) -> Result<ChatResponse> {
        let request = prepare_chat(self.tools(), request);
        self.post(CHAT_PATH, &request)
    }

    pub fn delete_model(&self, model: &str) -> Result<()> {
        self.delete(DELETE_PATH, &DeleteRequest { model })
    }

    pub fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.send::<(), T>(Method::Get, path, None)
    }

    pub fn post<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(Method::Post, path, Some(body))
    }

    pub fn delete<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send(Method::Delete, path, Some(body))
    }

    pub fn send<B, T>(&self, method: Method, path: &str, body: Option<&B>) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let request = build_request(&self.config, method, path, body)?;
        execute_blocking(
            self.transport.as_ref(),
            self.sleeper.as_ref(),
            &request,
            &self.config.retry_policy,
        )
    }
}
