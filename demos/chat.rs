use ollama_http::{ChatMessage, ChatRequest, OllamaClient, ToolDefinition, Tools};
use serde_json::json;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let model = std::env::var("OLLAMA_MODEL").unwrap_or_else(|_| "llama3".to_owned());
    let client = OllamaClient::from_env()
        .unwrap_or_default()
        .with_tools(Tools::new().with(ToolDefinition::function(
            "get_time",
            "Current time in a given IANA time zone",
            json!({
                "type": "object",
                "properties": { "zone": { "type": "string" } },
                "required": ["zone"]
            }),
        )));

    println!("server version: {}", client.version().await?.version);

    let response = client
        .chat(ChatRequest::new(
            model,
            [
                ChatMessage::system("You are terse."),
                ChatMessage::user("What time is it in Oslo?"),
            ],
        ))
        .await?;

    for call in &response.message.tool_calls {
        println!("tool call: {}({})", call.function.name, call.function.arguments);
    }
    println!("{}", response.message.content);

    Ok(())
}
