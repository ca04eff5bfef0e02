use serde::{Deserialize, Serialize};

use crate::tools::{ToolCall, ToolDefinition};

/// Reply of `GET /api/version`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct VersionResponse {
    pub version: String,
}

/// Reply of `GET /api/tags`.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ModelList {
    #[serde(default)]
    pub models: Vec<ModelSummary>,
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ModelSummary {
    pub name: String,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub modified_at: Option<String>,
    #[serde(default)]
    pub size: Option<u64>,
    #[serde(default)]
    pub digest: Option<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    System,
    User,
    Assistant,
    Tool,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    #[serde(default)]
    pub content: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tool_calls: Vec<ToolCall>,
}

impl ChatMessage {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
            tool_calls: Vec::new(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    /// Result of a tool invocation, fed back to the model.
    pub fn tool(content: impl Into<String>) -> Self {
        Self::new(Role::Tool, content)
    }
}

/// Body of `POST /api/chat`.
///
/// Always sent with `stream: false`; the client reads one complete reply.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tools: Vec<ToolDefinition>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub options: Option<serde_json::Value>,
    stream: bool,
}

impl ChatRequest {
    pub fn new<I>(model: impl Into<String>, messages: I) -> Self
    where
        I: IntoIterator<Item = ChatMessage>,
    {
        Self {
            model: model.into(),
            messages: messages.into_iter().collect(),
            tools: Vec::new(),
            options: None,
            stream: false,
        }
    }

    /// Model runtime options such as `temperature` or `num_ctx`.
    pub fn with_options(mut self, options: serde_json::Value) -> Self {
        self.options = Some(options);
        self
    }

    pub fn with_tools<I>(mut self, tools: I) -> Self
    where
        I: IntoIterator<Item = ToolDefinition>,
    {
        self.tools = tools.into_iter().collect();
        self
    }
}

/// Reply of `POST /api/chat` with streaming disabled.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct ChatResponse {
    pub model: String,
    #[serde(default)]
    pub created_at: Option<String>,
    pub message: ChatMessage,
    #[serde(default)]
    pub done: bool,
    #[serde(default)]
    pub done_reason: Option<String>,
    #[serde(default)]
    pub total_duration: Option<u64>,
    #[serde(default)]
    pub prompt_eval_count: Option<u64>,
    #[serde(default)]
    pub eval_count: Option<u64>,
}

/// Body of `DELETE /api/delete`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub(crate) struct DeleteRequest<'a> {
    pub model: &'a str,
}
