use common::EnrichedPost;
use std::collections::HashMap;

/// Occurrences of every tag, in the order tags were first seen.
pub fn tag_frequency(posts: &[EnrichedPost]) -> Vec<(String, usize)> {
    let mut order: Vec<(String, usize)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for tag in posts.iter().flat_map(|p| p.summary.tags.iter()) {
        match index.get(tag.as_str()) {
            Some(&i) => order[i].1 += 1,
            None => {
                index.insert(tag.as_str(), order.len());
                order.push((tag.clone(), 1));
            }
        }
    }

    order
}

/// The `n` most frequent tags. Equal counts keep first-seen order.
pub fn top_tags(posts: &[EnrichedPost], n: usize) -> Vec<(String, usize)> {
    let mut ranked = tag_frequency(posts);
    // sort_by is stable
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked.truncate(n);
    ranked
}

/// Posts carrying at least one of `selected`; an empty selection keeps everything.
pub fn filter_by_tags(posts: &[EnrichedPost], selected: &[String]) -> Vec<EnrichedPost> {
    if selected.is_empty() {
        return posts.to_vec();
    }
    posts
        .iter()
        .filter(|p| p.summary.has_any_tag(selected))
        .cloned()
        .collect()
}
