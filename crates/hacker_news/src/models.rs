use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub hits: Vec<HNHit>,
}

/// One story hit from the Algolia search API.
#[derive(Debug, Deserialize)]
pub struct HNHit {
    #[serde(rename = "objectID")]
    pub object_id: String,
    pub title: Option<String>,
    pub url: Option<String>,
    pub story_text: Option<String>,
    #[serde(default)]
    pub created_at_i: i64,
}

impl HNHit {
    pub fn item_url(&self) -> String {
        match self.url.as_deref() {
            Some(url) if !url.is_empty() => url.to_string(),
            _ => format!("https://news.ycombinator.com/item?id={}", self.object_id),
        }
    }
}
