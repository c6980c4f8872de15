pub mod cache;
pub mod enrich;
pub mod export;
pub mod tags;

pub use cache::TopicCache;
pub use enrich::Pipeline;
pub use export::{read_batch, write_batch};
pub use tags::{filter_by_tags, tag_frequency, top_tags};
