use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub items: Vec<Question>,
    #[serde(default)]
    pub quota_remaining: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct Question {
    pub title: Option<String>,
    pub link: String,
    #[serde(default)]
    pub score: i64,
    #[serde(default)]
    pub creation_date: i64,
}
