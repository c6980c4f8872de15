use crate::models::{Listing, RedditPostData, TokenResponse};
use common::{check_status, MosaicError, MosaicResult};
use reqwest::Client;
use std::time::Duration;
use tracing::debug;

const SERVICE: &str = "Reddit";

#[derive(Clone)]
pub struct RedditAPI {
    client: Client,
    auth_url: String,
    api_url: String,
    client_id: String,
    client_secret: String,
}

impl RedditAPI {
    pub fn new(client_id: &str, client_secret: &str, user_agent: &str) -> MosaicResult<Self> {
        Self::with_base_urls(
            "https://www.reddit.com",
            "https://oauth.reddit.com",
            client_id,
            client_secret,
            user_agent,
        )
    }

    pub fn with_base_urls(
        auth_url: &str,
        api_url: &str,
        client_id: &str,
        client_secret: &str,
        user_agent: &str,
    ) -> MosaicResult<Self> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            auth_url: auth_url.trim_end_matches('/').to_string(),
            api_url: api_url.trim_end_matches('/').to_string(),
            client_id: client_id.to_string(),
            client_secret: client_secret.to_string(),
        })
    }

    /// Application-only OAuth token (client credentials grant).
    pub async fn access_token(&self) -> MosaicResult<String> {
        let url = format!("{}/api/v1/access_token", self.auth_url);
        let resp = self
            .client
            .post(&url)
            .basic_auth(&self.client_id, Some(&self.client_secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await?;

        let status = resp.status();
        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            return Err(MosaicError::Auth {
                service: SERVICE,
                message: format!("token endpoint rejected credentials ({})", status),
            });
        }
        let resp = check_status(SERVICE, resp).await?;
        let token: TokenResponse = resp.json().await?;

        match (token.access_token, token.error) {
            (Some(access_token), None) => {
                debug!("Obtained Reddit token valid for {:?}s", token.expires_in);
                Ok(access_token)
            }
            (_, Some(error)) => Err(MosaicError::Auth {
                service: SERVICE,
                message: error,
            }),
            (None, None) => Err(MosaicError::Auth {
                service: SERVICE,
                message: "token response carried no access_token".to_string(),
            }),
        }
    }

    /// Top posts of the past week in `subreddit` matching `query`.
    pub async fn search_subreddit(
        &self,
        token: &str,
        subreddit: &str,
        query: &str,
        limit: usize,
    ) -> MosaicResult<Vec<RedditPostData>> {
        let url = format!("{}/r/{}/search", self.api_url, subreddit);
        let limit = limit.to_string();
        let resp = self
            .client
            .get(&url)
            .bearer_auth(token)
            .query(&[
                ("q", query),
                ("restrict_sr", "1"),
                ("sort", "top"),
                ("t", "week"),
                ("limit", limit.as_str()),
                ("raw_json", "1"),
            ])
            .send()
            .await?;
        let resp = check_status(SERVICE, resp).await?;
        let listing: Listing<RedditPostData> = resp.json().await?;
        Ok(listing.data.children.into_iter().map(|c| c.data).collect())
    }
}
