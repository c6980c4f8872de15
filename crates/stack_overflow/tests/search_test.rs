//! Stack Overflow adapter against a mock Stack Exchange endpoint.

use common::{Source, SourceKind};
use serde_json::json;
use stack_overflow::api::StackExchangeAPI;
use stack_overflow::StackOverflowSource;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn source_for(server: &MockServer, page_size: usize) -> StackOverflowSource {
    StackOverflowSource::with_api(StackExchangeAPI::with_base_url(&server.uri()), page_size)
}

#[tokio::test]
async fn test_fetch_maps_items_with_title_as_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search/advanced"))
        .and(query_param("q", "dbt"))
        .and(query_param("sort", "votes"))
        .and(query_param("order", "desc"))
        .and(query_param("site", "stackoverflow"))
        .and(query_param("pagesize", "5"))
        .and(query_param("filter", "default"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "items": [
                {
                    "title": "dbt&#39;s incremental models explained",
                    "link": "https://stackoverflow.com/questions/1/dbt-incremental",
                    "score": 57,
                    "creation_date": 1600000000
                }
            ],
            "has_more": false,
            "quota_remaining": 299
        })))
        .expect(1)
        .mount(&server)
        .await;

    let posts = source_for(&server, 5).fetch("dbt").await.unwrap();
    assert_eq!(posts.len(), 1);
    let post = &posts[0];
    assert_eq!(post.title, "dbt's incremental models explained");
    assert_eq!(post.body, post.title);
    assert_eq!(post.score, Some(57));
    assert_eq!(post.source, SourceKind::StackOverflow);
    assert_eq!(post.created_at.unix_timestamp(), 1600000000);
}

#[tokio::test]
async fn test_fetch_with_no_items() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search/advanced"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "items": [] })))
        .mount(&server)
        .await;

    let posts = source_for(&server, 10).fetch("nothing-matches").await.unwrap();
    assert!(posts.is_empty());
}

#[tokio::test]
async fn test_fetch_fails_on_throttle() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search/advanced"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error_id": 502,
            "error_name": "throttle_violation"
        })))
        .mount(&server)
        .await;

    let err = source_for(&server, 10).fetch("dbt").await.unwrap_err();
    assert!(err.is_external_service());
    assert!(err.to_string().contains("throttle_violation"));
}
