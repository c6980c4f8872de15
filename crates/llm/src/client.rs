use async_trait::async_trait;
use common::{Config, MosaicError, MosaicResult};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

/// A single-turn chat completion endpoint.
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Sends `prompt` as one user message and returns the completion text.
    async fn complete(&self, prompt: &str, max_tokens: u32) -> MosaicResult<String>;
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: Message,
}

#[derive(Deserialize)]
struct Message {
    #[serde(default)]
    content: Option<String>,
}

/// OpenAI-compatible `/chat/completions` client.
#[derive(Clone)]
pub struct OpenAiClient {
    http_client: Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl OpenAiClient {
    pub fn new(api_key: &str, model: &str, base_url: &str) -> MosaicResult<Self> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(60))
            .build()?;
        Ok(Self {
            http_client,
            api_key: api_key.to_string(),
            model: model.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn from_config(config: &Config) -> MosaicResult<Self> {
        let api_key = config.require_openai_api_key()?;
        Self::new(api_key, &config.llm.model, &config.llm.base_url)
    }
}

#[async_trait]
impl ChatModel for OpenAiClient {
    async fn complete(&self, prompt: &str, max_tokens: u32) -> MosaicResult<String> {
        let url = format!("{}/chat/completions", self.base_url);
        let body = serde_json::json!({
            "model": self.model,
            "messages": [{"role": "user", "content": prompt}],
            "max_tokens": max_tokens
        });

        debug!("Sending chat request to {} ({} prompt chars)", url, prompt.len());
        let res = self
            .http_client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| MosaicError::Llm(e.to_string()))?;

        if !res.status().is_success() {
            let status = res.status();
            let text = res.text().await.unwrap_or_default();
            return Err(MosaicError::Llm(format!("{} - {}", status, text)));
        }

        let resp: ChatCompletionResponse = res
            .json()
            .await
            .map_err(|e| MosaicError::Llm(format!("unreadable completion: {}", e)))?;
        let content = resp
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .unwrap_or_default();
        Ok(content)
    }
}
