pub mod api;
pub mod models;

use api::RedditAPI;
use async_trait::async_trait;
use common::{Config, MosaicResult, Post, Source, SourceKind};
use tracing::info;

/// Hits requested per subreddit; the overall cap is applied while accumulating.
const PER_SUBREDDIT_LIMIT: usize = 20;

pub struct RedditSource {
    api: RedditAPI,
    subreddits: Vec<String>,
    total_limit: usize,
}

impl RedditSource {
    pub fn new(config: &Config) -> MosaicResult<Self> {
        let (client_id, client_secret) = config.require_reddit_credentials()?;
        let api = RedditAPI::new(client_id, client_secret, &config.reddit.user_agent)?;
        Ok(Self::with_api(
            api,
            config.reddit.subreddits.clone(),
            config.reddit.total_limit,
        ))
    }

    pub fn with_api(api: RedditAPI, subreddits: Vec<String>, total_limit: usize) -> Self {
        Self {
            api,
            subreddits,
            total_limit,
        }
    }
}

#[async_trait]
impl Source for RedditSource {
    async fn fetch(&self, topic: &str) -> MosaicResult<Vec<Post>> {
        let mut results = Vec::new();
        if self.total_limit == 0 || self.subreddits.is_empty() {
            return Ok(results);
        }

        let token = self.api.access_token().await?;

        'subreddits: for subreddit in &self.subreddits {
            info!("Searching r/{} for '{}'", subreddit, topic);
            let hits = self
                .api
                .search_subreddit(&token, subreddit, topic, PER_SUBREDDIT_LIMIT)
                .await?;

            for hit in hits {
                if hit.title.trim().is_empty() {
                    continue;
                }
                results.push(Post {
                    title: hit.title,
                    body: hit.selftext,
                    url: hit.url,
                    score: Some(hit.score),
                    created_at: Post::timestamp(hit.created_utc as i64),
                    source: SourceKind::Reddit,
                    subreddit: Some(subreddit.clone()),
                });

                if results.len() >= self.total_limit {
                    break 'subreddits;
                }
            }
        }

        Ok(results)
    }

    fn kind(&self) -> SourceKind {
        SourceKind::Reddit
    }

    fn name(&self) -> &'static str {
        "Reddit"
    }
}
