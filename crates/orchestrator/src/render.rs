use common::{EnrichedPost, EnrichedResult};
use std::fmt::Write;

pub fn counts_line(result: &EnrichedResult) -> String {
    format!(
        "{} posts (Reddit: {}, Hacker News: {}, Stack Overflow: {})",
        result.len(),
        result.reddit_count,
        result.hn_count,
        result.so_count
    )
}

pub fn tags_line(top: &[(String, usize)]) -> String {
    if top.is_empty() {
        return "Top tags: none".to_string();
    }
    let tags = top
        .iter()
        .map(|(tag, count)| format!("{} ({})", tag, count))
        .collect::<Vec<_>>()
        .join(", ");
    format!("Top tags: {}", tags)
}

pub fn post_block(enriched: &EnrichedPost) -> String {
    let post = &enriched.post;
    let summary = &enriched.summary;

    let mut out = String::new();
    let _ = write!(out, "[{}", post.source);
    if let Some(subreddit) = &post.subreddit {
        let _ = write!(out, " r/{}", subreddit);
    }
    if let Some(score) = post.score {
        let _ = write!(out, " | score {}", score);
    }
    let _ = writeln!(out, " | {}] {}", post.created_at.date(), post.title);
    let _ = writeln!(out, "  {}", post.url);
    let _ = writeln!(out, "  Sentiment: {}", summary.sentiment);
    if !summary.tags.is_empty() {
        let _ = writeln!(out, "  Tags: {}", summary.tags.join(", "));
    }
    let _ = write!(out, "  {}", summary.summary);
    out
}

pub fn posts_listing(posts: &[EnrichedPost]) -> String {
    if posts.is_empty() {
        return "No posts match.".to_string();
    }
    posts
        .iter()
        .map(post_block)
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::{Post, Sentiment, SourceCounts, SourceKind, Summary};

    fn reddit_post() -> EnrichedPost {
        EnrichedPost {
            post: Post {
                title: "dbt at scale".to_string(),
                body: String::new(),
                url: "https://www.reddit.com/r/dataengineering/comments/1".to_string(),
                score: Some(31),
                created_at: Post::timestamp(1_717_000_000),
                source: SourceKind::Reddit,
                subreddit: Some("dataengineering".to_string()),
            },
            summary: Summary {
                summary: "Large teams split projects.".to_string(),
                sentiment: Sentiment::Neutral,
                tags: vec!["dbt".to_string(), "Snowflake".to_string()],
            },
        }
    }

    #[test]
    fn test_post_block() {
        let block = post_block(&reddit_post());
        assert_eq!(
            block,
            "[reddit r/dataengineering | score 31 | 2024-05-29] dbt at scale\n  https://www.reddit.com/r/dataengineering/comments/1\n  Sentiment: neutral\n  Tags: dbt, Snowflake\n  Large teams split projects."
        );
    }

    #[test]
    fn test_counts_and_tags_lines() {
        let mut counts = SourceCounts::default();
        counts.record(SourceKind::Reddit, 1);
        let result = EnrichedResult::new(vec![reddit_post()], counts);
        assert_eq!(
            counts_line(&result),
            "1 posts (Reddit: 1, Hacker News: 0, Stack Overflow: 0)"
        );
        assert_eq!(
            tags_line(&[("dbt".to_string(), 3), ("DuckDB".to_string(), 1)]),
            "Top tags: dbt (3), DuckDB (1)"
        );
        assert_eq!(tags_line(&[]), "Top tags: none");
        assert_eq!(posts_listing(&[]), "No posts match.");
    }
}
