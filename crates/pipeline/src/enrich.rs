use crate::cache::TopicCache;
use common::{Aggregation, Aggregator, Config, EnrichedPost, EnrichedResult, MosaicResult};
use futures::stream::{self, StreamExt};
use hacker_news::HackerNewsSource;
use llm::{ChatModel, Summarizer};
use reddit::RedditSource;
use stack_overflow::StackOverflowSource;
use std::sync::Arc;
use tracing::info;

/// Fetch → summarise for one topic, memoized per topic.
pub struct Pipeline {
    aggregator: Aggregator,
    summarizer: Summarizer,
    cache: TopicCache,
    concurrency: usize,
}

impl Pipeline {
    pub fn new(aggregator: Aggregator, summarizer: Summarizer, concurrency: usize) -> Self {
        Self {
            aggregator,
            summarizer,
            cache: TopicCache::new(),
            concurrency: concurrency.max(1),
        }
    }

    /// Reddit, Hacker News and Stack Overflow, in that order.
    pub fn from_config(config: &Config, model: Arc<dyn ChatModel>) -> MosaicResult<Self> {
        let aggregator = Aggregator::new()
            .add_source(Box::new(RedditSource::new(config)?))
            .add_source(Box::new(HackerNewsSource::new(config)))
            .add_source(Box::new(StackOverflowSource::new(config)));

        Ok(Self::new(
            aggregator,
            Summarizer::new(model),
            config.summary_concurrency,
        ))
    }

    pub async fn enrich(&self, topic: &str) -> MosaicResult<Arc<EnrichedResult>> {
        if let Some(cached) = self.cache.get(topic) {
            info!("Serving '{}' from cache ({} posts)", topic, cached.len());
            return Ok(cached);
        }

        let Aggregation { posts, counts } = self.aggregator.collect(topic).await?;
        info!("Summarising {} posts for '{}'", posts.len(), topic);

        let summarizer = &self.summarizer;
        // buffered keeps input order
        let enriched: Vec<EnrichedPost> = stream::iter(posts)
            .map(|post| async move {
                let summary = summarizer.summarise(&post.title, &post.body).await;
                EnrichedPost { post, summary }
            })
            .buffered(self.concurrency)
            .collect()
            .await;

        let result = Arc::new(EnrichedResult::new(enriched, counts));
        info!(
            "Enriched '{}': reddit={}, hackernews={}, stackoverflow={}",
            topic, result.reddit_count, result.hn_count, result.so_count
        );
        Ok(self.cache.insert(topic, result))
    }

    /// Drops every cached topic.
    pub fn refresh(&self) {
        info!("Clearing {} cached topics", self.cache.len());
        self.cache.invalidate_all();
    }

    pub fn refresh_topic(&self, topic: &str) -> bool {
        self.cache.invalidate(topic)
    }

    pub fn is_cached(&self, topic: &str) -> bool {
        self.cache.contains(topic)
    }
}
