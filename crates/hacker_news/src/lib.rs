pub mod api;
pub mod models;

use api::HackerNewsAPI;
use async_trait::async_trait;
use common::{Config, MosaicResult, Post, Source, SourceKind};
use models::HNHit;
use tracing::{debug, info};

pub struct HackerNewsSource {
    api: HackerNewsAPI,
    max_hits: usize,
}

impl HackerNewsSource {
    pub fn new(config: &Config) -> Self {
        Self::with_api(HackerNewsAPI::new(), config.hacker_news.max_hits)
    }

    pub fn with_api(api: HackerNewsAPI, max_hits: usize) -> Self {
        Self { api, max_hits }
    }

    fn to_post(&self, hit: HNHit) -> Option<Post> {
        let title = hit.title.as_deref().map(str::trim).unwrap_or_default();
        if title.is_empty() {
            debug!("Skipping Hacker News hit {} without a title", hit.object_id);
            return None;
        }

        // Link posts rarely carry text; the title stands in for the body.
        let body = hit
            .story_text
            .as_deref()
            .map(|html| self.api.clean_html(html))
            .filter(|text| !text.is_empty())
            .unwrap_or_else(|| title.to_string());

        Some(Post {
            title: title.to_string(),
            body,
            url: hit.item_url(),
            score: None,
            created_at: Post::timestamp(hit.created_at_i),
            source: SourceKind::HackerNews,
            subreddit: None,
        })
    }
}

#[async_trait]
impl Source for HackerNewsSource {
    async fn fetch(&self, topic: &str) -> MosaicResult<Vec<Post>> {
        info!("Searching Hacker News stories for '{}'", topic);
        let hits = self.api.search_stories(topic, self.max_hits).await?;
        Ok(hits
            .into_iter()
            .take(self.max_hits)
            .filter_map(|hit| self.to_post(hit))
            .collect())
    }

    fn kind(&self) -> SourceKind {
        SourceKind::HackerNews
    }

    fn name(&self) -> &'static str {
        "Hacker News"
    }
}
