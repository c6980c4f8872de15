pub mod config;
pub mod error;
pub mod models;
pub mod source;

pub use config::{Config, HackerNewsConfig, LlmConfig, RedditConfig, StackOverflowConfig};
pub use error::{check_status, MosaicError, MosaicResult};
pub use models::{
    EnrichedPost, EnrichedResult, Post, Sentiment, SourceCounts, SourceKind, Summary,
};
pub use source::{Aggregation, Aggregator, Source};
