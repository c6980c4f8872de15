use anyhow::{Context, Result};
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Debug, Clone)]
pub struct LlmConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub base_url: String,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: "gpt-3.5-turbo".to_string(),
            base_url: "https://api.openai.com/v1".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RedditConfig {
    pub client_id: Option<String>,
    pub client_secret: Option<String>,
    pub user_agent: String,
    pub subreddits: Vec<String>,
    /// Cap across all subreddits combined.
    pub total_limit: usize,
}

impl Default for RedditConfig {
    fn default() -> Self {
        Self {
            client_id: None,
            client_secret: None,
            user_agent: "TrendMosaicBot".to_string(),
            subreddits: vec!["dataengineering".to_string(), "datascience".to_string()],
            total_limit: 12,
        }
    }
}

#[derive(Debug, Clone)]
pub struct HackerNewsConfig {
    pub max_hits: usize,
}

impl Default for HackerNewsConfig {
    fn default() -> Self {
        Self { max_hits: 10 }
    }
}

#[derive(Debug, Clone)]
pub struct StackOverflowConfig {
    pub page_size: usize,
}

impl Default for StackOverflowConfig {
    fn default() -> Self {
        Self { page_size: 10 }
    }
}

#[derive(Debug, Clone)]
pub struct BatchConfig {
    pub topic: String,
    pub output: PathBuf,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            topic: "dbt".to_string(),
            output: PathBuf::from("trendmosaic_output.json"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub llm: LlmConfig,
    pub reddit: RedditConfig,
    pub hacker_news: HackerNewsConfig,
    pub stack_overflow: StackOverflowConfig,
    pub summary_concurrency: usize,
    pub batch: BatchConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            llm: LlmConfig::default(),
            reddit: RedditConfig::default(),
            hacker_news: HackerNewsConfig::default(),
            stack_overflow: StackOverflowConfig::default(),
            summary_concurrency: 4,
            batch: BatchConfig::default(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let defaults = Config::default();

        let subreddits = match env::var("SUBREDDITS") {
            Ok(raw) => {
                let list = split_list(&raw);
                if list.is_empty() {
                    anyhow::bail!("SUBREDDITS must list at least one community");
                }
                list
            }
            Err(_) => defaults.reddit.subreddits,
        };

        let llm = LlmConfig {
            api_key: env::var("OPENAI_API_KEY").ok(),
            model: env::var("OPENAI_MODEL").unwrap_or(defaults.llm.model),
            base_url: env::var("OPENAI_BASE_URL").unwrap_or(defaults.llm.base_url),
        };

        let reddit = RedditConfig {
            client_id: env::var("REDDIT_CLIENT_ID").ok(),
            client_secret: env::var("REDDIT_CLIENT_SECRET").ok(),
            user_agent: env::var("REDDIT_USER_AGENT").unwrap_or(defaults.reddit.user_agent),
            subreddits,
            total_limit: parse_env("REDDIT_LIMIT", defaults.reddit.total_limit),
        };

        let summary_concurrency =
            parse_env("SUMMARY_CONCURRENCY", defaults.summary_concurrency).max(1);

        Ok(Config {
            llm,
            reddit,
            hacker_news: HackerNewsConfig {
                max_hits: parse_env("HN_LIMIT", defaults.hacker_news.max_hits),
            },
            stack_overflow: StackOverflowConfig {
                page_size: parse_env("SO_LIMIT", defaults.stack_overflow.page_size),
            },
            summary_concurrency,
            batch: BatchConfig {
                topic: env::var("BATCH_TOPIC").unwrap_or(defaults.batch.topic),
                output: env::var("BATCH_OUTPUT")
                    .map(PathBuf::from)
                    .unwrap_or(defaults.batch.output),
            },
        })
    }

    pub fn require_openai_api_key(&self) -> Result<&String> {
        self.llm
            .api_key
            .as_ref()
            .context("OPENAI_API_KEY must be set")
    }

    pub fn require_reddit_credentials(&self) -> Result<(&String, &String)> {
        let id = self
            .reddit
            .client_id
            .as_ref()
            .context("REDDIT_CLIENT_ID must be set")?;
        let secret = self
            .reddit
            .client_secret
            .as_ref()
            .context("REDDIT_CLIENT_SECRET must be set")?;
        Ok((id, secret))
    }
}

fn parse_env<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(default)
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
