use crate::client::ChatModel;
use common::{EnrichedPost, MosaicError, MosaicResult};
use std::sync::Arc;
use tracing::info;

pub const INSIGHT_MAX_TOKENS: u32 = 400;

/// Free-form questions answered from the summaries of an enriched set.
#[derive(Clone)]
pub struct Insight {
    model: Arc<dyn ChatModel>,
}

impl Insight {
    pub fn new(model: Arc<dyn ChatModel>) -> Self {
        Self { model }
    }

    pub async fn answer(&self, posts: &[EnrichedPost], question: &str) -> MosaicResult<String> {
        let context = build_context(posts);
        info!(
            "Answering question over {} summaries ({} context chars)",
            posts.len(),
            context.len()
        );

        let reply = self
            .model
            .complete(&build_prompt(question, &context), INSIGHT_MAX_TOKENS)
            .await
            .map_err(|e| MosaicError::QaService(e.to_string()))?;
        Ok(reply.trim().to_string())
    }
}

/// Every summary, in order, separated by a blank line.
pub fn build_context(posts: &[EnrichedPost]) -> String {
    posts
        .iter()
        .map(|p| p.summary.summary.as_str())
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn build_prompt(question: &str, context: &str) -> String {
    format!(
        "You are analysing recent community discussions about a technology topic.

Question: {question}

Discussion summaries:
{context}

Answer the question concisely using only these summaries. Where the discussions disagree, say so and describe both sides."
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use common::{Post, Sentiment, SourceKind, Summary};
    use std::sync::Mutex;

    struct RecordingModel {
        fail: bool,
        prompts: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl ChatModel for RecordingModel {
        async fn complete(&self, prompt: &str, max_tokens: u32) -> MosaicResult<String> {
            assert_eq!(max_tokens, INSIGHT_MAX_TOKENS);
            self.prompts.lock().unwrap().push(prompt.to_string());
            if self.fail {
                Err(MosaicError::Llm("429 Too Many Requests".to_string()))
            } else {
                Ok("  Mostly positive, with cost concerns.  ".to_string())
            }
        }
    }

    fn enriched(summary: &str) -> EnrichedPost {
        EnrichedPost {
            post: Post {
                title: "title".to_string(),
                body: String::new(),
                url: "https://example.com".to_string(),
                score: None,
                created_at: Post::timestamp(0),
                source: SourceKind::HackerNews,
                subreddit: None,
            },
            summary: Summary {
                summary: summary.to_string(),
                sentiment: Sentiment::Neutral,
                tags: Vec::new(),
            },
        }
    }

    #[test]
    fn test_context_joins_all_summaries() {
        let posts = vec![enriched("First."), enriched("Second."), enriched("Third.")];
        assert_eq!(build_context(&posts), "First.\n\nSecond.\n\nThird.");
        assert_eq!(build_context(&[]), "");
    }

    #[tokio::test]
    async fn test_answer_embeds_question_and_context() {
        let model = Arc::new(RecordingModel {
            fail: false,
            prompts: Mutex::new(Vec::new()),
        });
        let posts = vec![enriched("dbt is loved."), enriched("dbt is slow.")];

        let answer = Insight::new(model.clone())
            .answer(&posts, "What do people think of dbt?")
            .await
            .unwrap();
        assert_eq!(answer, "Mostly positive, with cost concerns.");

        let prompts = model.prompts.lock().unwrap();
        assert!(prompts[0].contains("Question: What do people think of dbt?"));
        assert!(prompts[0].contains("dbt is loved.\n\ndbt is slow."));
    }

    #[tokio::test]
    async fn test_answer_surfaces_failure() {
        let model = Arc::new(RecordingModel {
            fail: true,
            prompts: Mutex::new(Vec::new()),
        });

        let err = Insight::new(model)
            .answer(&[enriched("x")], "anything?")
            .await
            .unwrap_err();
        assert!(matches!(err, MosaicError::QaService(_)));
        assert!(err.to_string().contains("429"));
    }
}
