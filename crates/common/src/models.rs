use serde::{Deserialize, Serialize};
use std::fmt;
use time::OffsetDateTime;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceKind {
    Reddit,
    HackerNews,
    StackOverflow,
}

impl SourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SourceKind::Reddit => "reddit",
            SourceKind::HackerNews => "hackernews",
            SourceKind::StackOverflow => "stackoverflow",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One discussion item, normalized from whichever source produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub title: String,
    pub body: String,
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<i64>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    pub source: SourceKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subreddit: Option<String>,
}

impl Post {
    /// Converts a source-reported epoch timestamp, clamping garbage to the epoch.
    pub fn timestamp(epoch_seconds: i64) -> OffsetDateTime {
        OffsetDateTime::from_unix_timestamp(epoch_seconds).unwrap_or(OffsetDateTime::UNIX_EPOCH)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
    #[default]
    Unknown,
}

impl Sentiment {
    /// Lenient label matching; anything unrecognized is `Unknown`.
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "positive" => Sentiment::Positive,
            "neutral" => Sentiment::Neutral,
            "negative" => Sentiment::Negative,
            _ => Sentiment::Unknown,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Sentiment::Positive => "positive",
            Sentiment::Neutral => "neutral",
            Sentiment::Negative => "negative",
            Sentiment::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub summary: String,
    #[serde(default)]
    pub sentiment: Sentiment,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Summary {
    /// Fallback annotation used when the model reply is unusable or the call failed.
    pub fn degraded(text: impl Into<String>) -> Self {
        Self {
            summary: text.into(),
            sentiment: Sentiment::Unknown,
            tags: Vec::new(),
        }
    }

    pub fn has_any_tag(&self, selected: &[String]) -> bool {
        self.tags.iter().any(|tag| selected.contains(tag))
    }
}

/// A post with its summary attached. Serializes as the post's fields plus a `summary` object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedPost {
    #[serde(flatten)]
    pub post: Post,
    pub summary: Summary,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SourceCounts {
    pub reddit: usize,
    pub hacker_news: usize,
    pub stack_overflow: usize,
}

impl SourceCounts {
    pub fn record(&mut self, kind: SourceKind, count: usize) {
        match kind {
            SourceKind::Reddit => self.reddit += count,
            SourceKind::HackerNews => self.hacker_news += count,
            SourceKind::StackOverflow => self.stack_overflow += count,
        }
    }

    pub fn total(&self) -> usize {
        self.reddit + self.hacker_news + self.stack_overflow
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedResult {
    pub posts: Vec<EnrichedPost>,
    pub reddit_count: usize,
    pub hn_count: usize,
    pub so_count: usize,
}

impl EnrichedResult {
    pub fn new(posts: Vec<EnrichedPost>, counts: SourceCounts) -> Self {
        Self {
            posts,
            reddit_count: counts.reddit,
            hn_count: counts.hacker_news,
            so_count: counts.stack_overflow,
        }
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }
}
