use common::EnrichedResult;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

/// Enriched results keyed by the exact topic string.
///
/// Entries are only ever replaced whole. When two callers race on the same
/// uncached topic both fetch, and the first to finish populates the entry.
#[derive(Default)]
pub struct TopicCache {
    entries: RwLock<HashMap<String, Arc<EnrichedResult>>>,
}

impl TopicCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, topic: &str) -> Option<Arc<EnrichedResult>> {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(topic)
            .cloned()
    }

    /// Stores `result` unless the topic is already present; returns the stored entry.
    pub fn insert(&self, topic: &str, result: Arc<EnrichedResult>) -> Arc<EnrichedResult> {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(topic.to_string())
            .or_insert(result)
            .clone()
    }

    pub fn contains(&self, topic: &str) -> bool {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(topic)
    }

    pub fn invalidate(&self, topic: &str) -> bool {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(topic)
            .is_some()
    }

    pub fn invalidate_all(&self) {
        self.entries
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    pub fn len(&self) -> usize {
        self.entries
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::SourceCounts;

    fn result_with_reddit(count: usize) -> Arc<EnrichedResult> {
        let mut counts = SourceCounts::default();
        counts.record(common::SourceKind::Reddit, count);
        Arc::new(EnrichedResult::new(Vec::new(), counts))
    }

    #[test]
    fn test_first_insert_wins() {
        let cache = TopicCache::new();
        let kept = cache.insert("dbt", result_with_reddit(1));
        let again = cache.insert("dbt", result_with_reddit(2));

        assert_eq!(kept.reddit_count, 1);
        assert_eq!(again.reddit_count, 1);
        assert_eq!(cache.get("dbt").unwrap().reddit_count, 1);
    }

    #[test]
    fn test_keys_are_exact() {
        let cache = TopicCache::new();
        cache.insert("DuckDB", result_with_reddit(1));
        assert!(cache.contains("DuckDB"));
        assert!(!cache.contains("duckdb"));
        assert!(cache.get("duckdb ").is_none());
    }

    #[test]
    fn test_invalidate() {
        let cache = TopicCache::new();
        cache.insert("dbt", result_with_reddit(1));
        cache.insert("duckdb", result_with_reddit(1));

        assert!(cache.invalidate("dbt"));
        assert!(!cache.invalidate("dbt"));
        assert_eq!(cache.len(), 1);

        cache.invalidate_all();
        assert!(cache.is_empty());
    }
}
