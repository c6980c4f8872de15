use async_trait::async_trait;
use tracing::{info, warn};

use crate::error::MosaicResult;
use crate::models::{Post, SourceCounts, SourceKind};

/// A discussion platform that can be searched for a topic.
#[async_trait]
pub trait Source: Send + Sync {
    async fn fetch(&self, topic: &str) -> MosaicResult<Vec<Post>>;
    fn kind(&self) -> SourceKind;
    fn name(&self) -> &'static str;
}

/// Posts from every source in registration order, with the raw per-source counts.
#[derive(Debug, Default)]
pub struct Aggregation {
    pub posts: Vec<Post>,
    pub counts: SourceCounts,
}

pub struct Aggregator {
    sources: Vec<Box<dyn Source>>,
}

impl Aggregator {
    pub fn new() -> Self {
        Self {
            sources: Vec::new(),
        }
    }

    pub fn add_source(mut self, source: Box<dyn Source>) -> Self {
        self.sources.push(source);
        self
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    /// Queries each source in turn. The first failing source aborts the whole collection.
    pub async fn collect(&self, topic: &str) -> MosaicResult<Aggregation> {
        let mut aggregation = Aggregation::default();

        for source in &self.sources {
            let name = source.name();
            match source.fetch(topic).await {
                Ok(posts) => {
                    info!("{} returned {} posts for '{}'", name, posts.len(), topic);
                    aggregation.counts.record(source.kind(), posts.len());
                    aggregation.posts.extend(posts);
                }
                Err(e) => {
                    warn!("{} failed for '{}': {}", name, topic, e);
                    return Err(e);
                }
            }
        }

        Ok(aggregation)
    }
}

impl Default for Aggregator {
    fn default() -> Self {
        Self::new()
    }
}
