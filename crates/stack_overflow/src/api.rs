use crate::models::{Question, SearchResponse};
use common::{check_status, MosaicResult};
use reqwest::Client;
use scraper::Html;
use tracing::debug;

const SERVICE: &str = "Stack Overflow";

#[derive(Clone)]
pub struct StackExchangeAPI {
    client: Client,
    base_url: String,
}

impl StackExchangeAPI {
    pub fn new() -> Self {
        Self::with_base_url("https://api.stackexchange.com/2.3")
    }

    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Top-voted questions matching `query`. The default filter carries no question bodies.
    pub async fn search_questions(&self, query: &str, page_size: usize) -> MosaicResult<Vec<Question>> {
        let url = format!("{}/search/advanced", self.base_url);
        let page_size = page_size.to_string();
        let resp = self
            .client
            .get(&url)
            .query(&[
                ("order", "desc"),
                ("sort", "votes"),
                ("q", query),
                ("site", "stackoverflow"),
                ("pagesize", page_size.as_str()),
                ("filter", "default"),
            ])
            .send()
            .await?;
        let resp = check_status(SERVICE, resp).await?;
        let body: SearchResponse = resp.json().await?;
        if let Some(quota) = body.quota_remaining {
            debug!("Stack Exchange quota remaining: {}", quota);
        }
        Ok(body.items)
    }
}

impl Default for StackExchangeAPI {
    fn default() -> Self {
        Self::new()
    }
}

/// Titles come back HTML-escaped (`&#39;`, `&quot;`).
pub fn decode_entities(text: &str) -> String {
    Html::parse_fragment(text)
        .root_element()
        .text()
        .collect::<String>()
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_entities() {
        assert_eq!(
            decode_entities("How do I use dbt&#39;s &quot;ref&quot; macro?"),
            "How do I use dbt's \"ref\" macro?"
        );
        assert_eq!(decode_entities("plain"), "plain");
    }
}
