use ollama_http::{BlockingOllamaClient, ClientConfig, RetryPolicy};
use std::time::Duration;

fn main() -> anyhow::Result<()> {
    let config = ClientConfig::from_env()
        .unwrap_or_default()
        .with_retry_policy(
            RetryPolicy::default()
                .with_max_retries(5)
                .with_base_delay(Duration::from_millis(250)),
        );
    let client = BlockingOllamaClient::with_config(config);

    for model in client.list_models()?.models {
        println!("{}", model.name);
    }

    Ok(())
}
