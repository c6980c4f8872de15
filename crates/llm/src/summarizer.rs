use crate::client::ChatModel;
use crate::reply::parse_reply;
use common::Summary;
use std::sync::Arc;
use tracing::{debug, warn};

/// Body characters sent to the model per post.
pub const MAX_BODY_CHARS: usize = 1000;
pub const SUMMARY_MAX_TOKENS: u32 = 200;

pub const FAILED_SUMMARY: &str = "Failed to summarise due to API error.";
pub const EMPTY_SUMMARY: &str = "No summary returned.";

#[derive(Clone)]
pub struct Summarizer {
    model: Arc<dyn ChatModel>,
}

impl Summarizer {
    pub fn new(model: Arc<dyn ChatModel>) -> Self {
        Self { model }
    }

    /// Always yields a summary; unusable replies and failed calls produce a degraded one.
    pub async fn summarise(&self, title: &str, body: &str) -> Summary {
        let prompt = build_prompt(title, truncate_body(body));

        let reply = match self.model.complete(&prompt, SUMMARY_MAX_TOKENS).await {
            Ok(reply) => reply,
            Err(e) => {
                warn!("Summarising '{}' failed: {}", title, e);
                return Summary::degraded(FAILED_SUMMARY);
            }
        };

        match parse_reply(&reply) {
            Ok(summary) => summary,
            Err(e) => {
                debug!("Unstructured summary reply for '{}': {}", title, e);
                let text = reply.trim();
                if text.is_empty() {
                    Summary::degraded(EMPTY_SUMMARY)
                } else {
                    Summary::degraded(text)
                }
            }
        }
    }
}

/// Trimmed body, cut to at most [`MAX_BODY_CHARS`] characters on a char boundary.
pub fn truncate_body(body: &str) -> &str {
    let body = body.trim();
    match body.char_indices().nth(MAX_BODY_CHARS) {
        Some((idx, _)) => &body[..idx],
        None => body,
    }
}

pub fn build_prompt(title: &str, body: &str) -> String {
    format!(
        "Summarise this post and extract the sentiment (positive, neutral, or negative).

Title: {title}
Body: {body}

Output as JSON with keys:
- 'summary': a brief summary of the discussion.
- 'sentiment': positive, neutral, or negative.
- 'tags': a list of named technologies, tools, frameworks, or concepts mentioned (e.g. 'dbt', 'Snowflake', 'DuckDB').

Keep the response to 3-5 sentences."
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use common::{MosaicError, MosaicResult, Sentiment};
    use std::sync::Mutex;

    struct ScriptedModel {
        reply: MosaicResult<String>,
        prompts: Mutex<Vec<(String, u32)>>,
    }

    impl ScriptedModel {
        fn replying(text: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: Ok(text.to_string()),
                prompts: Mutex::new(Vec::new()),
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self {
                reply: Err(MosaicError::Llm("401 Unauthorized".to_string())),
                prompts: Mutex::new(Vec::new()),
            })
        }
    }

    #[async_trait]
    impl ChatModel for ScriptedModel {
        async fn complete(&self, prompt: &str, max_tokens: u32) -> MosaicResult<String> {
            self.prompts
                .lock()
                .unwrap()
                .push((prompt.to_string(), max_tokens));
            match &self.reply {
                Ok(text) => Ok(text.clone()),
                Err(e) => Err(MosaicError::Llm(e.to_string())),
            }
        }
    }

    #[tokio::test]
    async fn test_well_formed_reply() {
        let model = ScriptedModel::replying(
            "{'summary': 'DuckDB speeds up local analysis.', 'sentiment': 'positive', 'tags': ['DuckDB']}",
        );
        let summary = Summarizer::new(model.clone())
            .summarise("DuckDB is fast", "Benchmarks inside")
            .await;

        assert_eq!(summary.summary, "DuckDB speeds up local analysis.");
        assert_eq!(summary.sentiment, Sentiment::Positive);
        assert_eq!(summary.tags, vec!["DuckDB"]);

        let prompts = model.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert_eq!(prompts[0].1, SUMMARY_MAX_TOKENS);
        assert!(prompts[0].0.contains("Title: DuckDB is fast"));
        assert!(prompts[0].0.contains("Body: Benchmarks inside"));
    }

    #[tokio::test]
    async fn test_unparseable_reply_degrades_to_raw_text() {
        let model = ScriptedModel::replying("  not json at all \n");
        let summary = Summarizer::new(model).summarise("t", "b").await;

        assert_eq!(summary.summary, "not json at all");
        assert_eq!(summary.sentiment, Sentiment::Unknown);
        assert!(summary.tags.is_empty());
    }

    #[tokio::test]
    async fn test_empty_reply_uses_placeholder() {
        let summary = Summarizer::new(ScriptedModel::replying("")).summarise("t", "b").await;
        assert_eq!(summary.summary, EMPTY_SUMMARY);
        assert_eq!(summary.sentiment, Sentiment::Unknown);
    }

    #[tokio::test]
    async fn test_service_failure_uses_failure_placeholder() {
        let summary = Summarizer::new(ScriptedModel::failing()).summarise("t", "b").await;
        assert_eq!(summary.summary, FAILED_SUMMARY);
        assert_eq!(summary.sentiment, Sentiment::Unknown);
        assert!(summary.tags.is_empty());
    }

    #[tokio::test]
    async fn test_long_body_is_truncated_in_prompt() {
        let model = ScriptedModel::replying("{'summary': 's'}");
        let body = "Z".repeat(5000);
        Summarizer::new(model.clone()).summarise("t", &body).await;

        let prompts = model.prompts.lock().unwrap();
        let sent = prompts[0].0.chars().filter(|&c| c == 'Z').count();
        assert_eq!(sent, MAX_BODY_CHARS);
    }

    #[test]
    fn test_truncate_body_respects_char_boundaries() {
        let body = "é".repeat(1200);
        let cut = truncate_body(&body);
        assert_eq!(cut.chars().count(), MAX_BODY_CHARS);

        assert_eq!(truncate_body("  short body  "), "short body");
    }
}
