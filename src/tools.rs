//! Tool-calling capability.
//!
//! A client composed with [`Tools`] advertises the registered function
//! definitions on chat requests; clients built without it never send any.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// A function the model may ask the caller to invoke.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    #[serde(rename = "type")]
    pub kind: String,
    pub function: FunctionDefinition,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FunctionDefinition {
    pub name: String,
    pub description: String,
    /// JSON Schema of the arguments object.
    pub parameters: JsonValue,
}

impl ToolDefinition {
    pub fn function(
        name: impl Into<String>,
        description: impl Into<String>,
        parameters: JsonValue,
    ) -> Self {
        Self {
            kind: "function".to_owned(),
            function: FunctionDefinition {
                name: name.into(),
                description: description.into(),
                parameters,
            },
        }
    }

    pub fn name(&self) -> &str {
        &self.function.name
    }
}

/// A tool invocation requested by the model.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    pub function: ToolCallFunction,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ToolCallFunction {
    pub name: String,
    #[serde(default)]
    pub arguments: JsonValue,
}

/// Registry of tool definitions, keyed by function name.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Tools {
    definitions: Vec<ToolDefinition>,
}

impl Tools {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `definition`, replacing any earlier one with the same name.
    pub fn with(mut self, definition: ToolDefinition) -> Self {
        self.register(definition);
        self
    }

    pub fn register(&mut self, definition: ToolDefinition) {
        match self
            .definitions
            .iter_mut()
            .find(|existing| existing.name() == definition.name())
        {
            Some(existing) => *existing = definition,
            None => self.definitions.push(definition),
        }
    }

    pub fn get(&self, name: &str) -> Option<&ToolDefinition> {
        self.definitions.iter().find(|definition| definition.name() == name)
    }

    pub fn definitions(&self) -> &[ToolDefinition] {
        &self.definitions
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{ToolDefinition, Tools};

    fn weather(description: &str) -> ToolDefinition {
        ToolDefinition::function(
            "get_weather",
            description,
            json!({
                "type": "object",
                "properties": { "city": { "type": "string" } },
                "required": ["city"]
            }),
        )
    }

    #[test]
    fn registering_same_name_replaces_definition() {
        let tools = Tools::new().with(weather("old")).with(weather("new"));
        assert_eq!(tools.len(), 1);
        let definition = tools.get("get_weather").expect("tool must be registered");
        assert_eq!(definition.function.description, "new");
        assert!(tools.get("missing").is_none());
    }

    #[test]
    fn definition_serializes_with_type_tag() {
        let body = serde_json::to_value(weather("Current weather")).expect("must serialize");
        assert_eq!(body["type"], "function");
        assert_eq!(body["function"]["name"], "get_weather");
    }
}
