use std::fmt;
use std::sync::Arc;

use serde::{de::DeserializeOwned, Serialize};

use crate::{
    executor::execute,
    request::join_url,
    types::DeleteRequest,
    ChatRequest, ChatResponse, ClientConfig, HttpRequest, Method, ModelList, ReqwestTransport,
    Result, Sleep, TokioSleep, Tools, Transport, VersionResponse,
};

pub(crate) const VERSION_PATH: &str = "/api/version";
pub(crate) const TAGS_PATH: &str = "/api/tags";
pub(crate) const CHAT_PATH: &str = "/api/chat";
pub(crate) const DELETE_PATH: &str = "/api/delete";

/// Builds the request for one call against `config`.
pub(crate) fn build_request<B: Serialize + ?Sized>(
    config: &ClientConfig,
    method: Method,
    path: &str,
    body: Option<&B>,
) -> Result<HttpRequest> {
    let url = join_url(&config.base_url, path);
    match body {
        Some(body) => HttpRequest::json(method, url, body, config.timeout),
        None => Ok(HttpRequest::new(method, url, config.timeout)),
    }
}

/// Attaches the registered tool definitions when the request brings none.
pub(crate) fn prepare_chat(tools: Option<&Tools>, mut request: ChatRequest) -> ChatRequest {
    if let Some(tools) = tools {
        if request.tools.is_empty() {
            request.tools = tools.definitions().to_vec();
        }
    }
    request
}

#[derive(Clone)]
/// Async HTTP client for a model-serving REST API.
///
/// Cloning is cheap; clones share configuration and the connection pool.
pub struct OllamaClient {
    transport: Arc<dyn Transport>,
    sleeper: Arc<dyn Sleep>,
    config: Arc<ClientConfig>,
    tools: Option<Arc<Tools>>,
}

impl fmt::Debug for OllamaClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OllamaClient")
            .field("config", &self.config)
            .field("tools", &self.tools.as_ref().map(|tools| tools.len()))
            .finish()
    }
}

impl Default for OllamaClient {
    fn default() -> Self {
        Self::with_config(ClientConfig::default())
    }
}

impl OllamaClient {
    /// Creates a client for `base_url` with default timeout and retry policy.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_config(ClientConfig::new(base_url))
    }

    pub fn with_config(config: ClientConfig) -> Self {
        Self {
            transport: Arc::new(ReqwestTransport::new()),
            sleeper: Arc::new(TokioSleep),
            config: Arc::new(config),
            tools: None,
        }
    }

    /// Creates a client from `OLLAMA_*` environment variables.
    ///
    /// See [`ClientConfig::from_env`] for the variables read.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use ollama_http::OllamaClient;
    ///
    /// let client = OllamaClient::from_env().expect("missing OLLAMA_HOST");
    /// ```
    pub fn from_env() -> std::result::Result<Self, String> {
        Ok(Self::with_config(ClientConfig::from_env()?))
    }

    /// Replaces the network layer, e.g. with a preconfigured `reqwest::Client`.
    pub fn with_transport(mut self, transport: impl Transport + 'static) -> Self {
        self.transport = Arc::new(transport);
        self
    }

    /// Replaces how backoff delays are waited out.
    pub fn with_sleeper(mut self, sleeper: impl Sleep + 'static) -> Self {
        self.sleeper = Arc::new(sleeper);
        self
    }

    /// Enables tool calling with the given definitions.
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

    /// Returns the server version.
    pub async fn version(&self) -> Result<VersionResponse> {
        self.get(VERSION_PATH).await
    }

    /// Lists locally available models.
    pub async fn list_models(&self) -> Result<ModelList> {
        self.get(TAGS_PATH).await
    }

    /// Sends a chat turn and waits for the complete reply.
    pub async fn chat(&self, request: ChatRequest) -> Result<ChatResponse> {
        let request = prepare_chat(self.tools(), request);
        self.post(CHAT_PATH, &request).await
    }

    /// Deletes a local model by name.
    pub async fn delete_model(&self, model: &str) -> Result<()> {
        self.delete(DELETE_PATH, &DeleteRequest { model }).await
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.send::<(), T>(Method::Get, path, None).await
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        self.send(Method::Post, path, Some(body)).await
    }

    pub async fn delete<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        self.send(Method::Delete, path, Some(body)).await
    }

    /// Issues `method` against `path` under the configured retry policy.
    pub async fn send<B, T>(&self, method: Method, path: &str, body: Option<&B>) -> Result<T>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let request = build_request(&self.config, method, path, body)?;
        execute(
            self.transport.as_ref(),
            self.sleeper.as_ref(),
            &request,
            &self.config.retry_policy,
        )
        .await
    }
}
