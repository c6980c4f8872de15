pub mod api;
pub mod models;

use api::{decode_entities, StackExchangeAPI};
use async_trait::async_trait;
use common::{Config, MosaicResult, Post, Source, SourceKind};
use tracing::info;

pub struct StackOverflowSource {
    api: StackExchangeAPI,
    page_size: usize,
}

impl StackOverflowSource {
    pub fn new(config: &Config) -> Self {
        Self::with_api(StackExchangeAPI::new(), config.stack_overflow.page_size)
    }

    pub fn with_api(api: StackExchangeAPI, page_size: usize) -> Self {
        Self { api, page_size }
    }
}

#[async_trait]
impl Source for StackOverflowSource {
    async fn fetch(&self, topic: &str) -> MosaicResult<Vec<Post>> {
        info!("Searching Stack Overflow questions for '{}'", topic);
        let questions = self.api.search_questions(topic, self.page_size).await?;

        Ok(questions
            .into_iter()
            .take(self.page_size)
            .filter_map(|question| {
                let title = decode_entities(question.title.as_deref().unwrap_or_default());
                if title.is_empty() {
                    return None;
                }
                Some(Post {
                    body: title.clone(),
                    title,
                    url: question.link,
                    score: Some(question.score),
                    created_at: Post::timestamp(question.creation_date),
                    source: SourceKind::StackOverflow,
                    subreddit: None,
                })
            })
            .collect())
    }

    fn kind(&self) -> SourceKind {
        SourceKind::StackOverflow
    }

    fn name(&self) -> &'static str {
        "Stack Overflow"
    }
}
