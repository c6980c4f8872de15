use crate::models::{HNHit, SearchResponse};
use common::{check_status, MosaicResult};
use reqwest::Client;
use scraper::Html;

const SERVICE: &str = "Hacker News";

#[derive(Clone)]
pub struct HackerNewsAPI {
    client: Client,
    base_url: String,
}

impl HackerNewsAPI {
    pub fn new() -> Self {
        Self::with_base_url("https://hn.algolia.com/api/v1")
    }

    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub async fn search_stories(&self, query: &str, limit: usize) -> MosaicResult<Vec<HNHit>> {
        let url = format!("{}/search", self.base_url);
        let limit = limit.to_string();
        let resp = self
            .client
            .get(&url)
            .query(&[("query", query), ("tags", "story"), ("hitsPerPage", limit.as_str())])
            .send()
            .await?;
        let resp = check_status(SERVICE, resp).await?;
        let body: SearchResponse = resp.json().await?;
        Ok(body.hits)
    }

    pub fn clean_html(&self, html: &str) -> String {
        Html::parse_fragment(html)
            .root_element()
            .text()
            .collect::<Vec<_>>()
            .join("")
            .trim()
            .to_string()
    }
}

impl Default for HackerNewsAPI {
    fn default() -> Self {
        Self::new()
    }
}
