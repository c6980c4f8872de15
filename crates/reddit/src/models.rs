use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct TokenResponse {
    pub access_token: Option<String>,
    #[serde(default)]
    pub expires_in: Option<u64>,
    /// Reddit reports some grant failures with a 200 and an `error` field.
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Listing<T> {
    pub data: ListingData<T>,
}

#[derive(Debug, Deserialize)]
pub struct ListingData<T> {
    #[serde(default = "Vec::new")]
    pub children: Vec<ListingChild<T>>,
}

#[derive(Debug, Deserialize)]
pub struct ListingChild<T> {
    pub data: T,
}

#[derive(Debug, Deserialize)]
pub struct RedditPostData {
    pub title: String,
    #[serde(default)]
    pub selftext: String,
    #[serde(default)]
    pub score: i64,
    pub url: String,
    #[serde(default)]
    pub created_utc: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_listing_deserializes() {
        let raw = r#"{
            "kind": "Listing",
            "data": {
                "after": null,
                "children": [
                    {"kind": "t3", "data": {"title": "dbt vs sqlmesh", "selftext": "", "score": 12,
                     "url": "https://www.reddit.com/r/dataengineering/comments/x/", "created_utc": 1717000000.0,
                     "subreddit": "dataengineering"}}
                ]
            }
        }"#;
        let listing: Listing<RedditPostData> = serde_json::from_str(raw).unwrap();
        assert_eq!(listing.data.children.len(), 1);
        assert_eq!(listing.data.children[0].data.score, 12);
        assert_eq!(listing.data.children[0].data.created_utc as i64, 1717000000);
    }
}
