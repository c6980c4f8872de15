pub mod client;
pub mod insight;
pub mod reply;
pub mod summarizer;

pub use client::{ChatModel, OpenAiClient};
pub use insight::Insight;
pub use reply::{parse_reply, SummaryParseError};
pub use summarizer::Summarizer;
