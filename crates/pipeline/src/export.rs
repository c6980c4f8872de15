use common::{EnrichedPost, MosaicResult};
use std::path::Path;
use tracing::info;

/// Writes the enriched posts as a pretty-printed JSON array, replacing any existing file.
pub async fn write_batch(path: &Path, posts: &[EnrichedPost]) -> MosaicResult<()> {
    let content = serde_json::to_string_pretty(posts)?;
    tokio::fs::write(path, content).await?;
    info!("Wrote {} enriched posts to {}", posts.len(), path.display());
    Ok(())
}

pub async fn read_batch(path: &Path) -> MosaicResult<Vec<EnrichedPost>> {
    let content = tokio::fs::read_to_string(path).await?;
    Ok(serde_json::from_str(&content)?)
}
