//! Lenient parsing of the model's structured summary reply.
//!
//! Models asked for JSON frequently answer with a Python-style literal
//! (`{'summary': '...', 'tags': ['dbt']}`), wrap it in a code fence, or add a
//! sentence of prose around it. The parser accepts all of those and reports
//! anything else as a [`SummaryParseError`] for the caller to degrade.

use common::{Sentiment, Summary};
use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SummaryParseError {
    #[error("reply was empty")]
    Empty,

    #[error("reply contains no mapping")]
    NoMapping,

    #[error("reply mapping is malformed: {0}")]
    Malformed(String),

    #[error("reply mapping has no textual 'summary' key")]
    MissingSummary,
}

pub fn parse_reply(raw: &str) -> Result<Summary, SummaryParseError> {
    let text = raw.trim();
    if text.is_empty() {
        return Err(SummaryParseError::Empty);
    }

    let span = mapping_span(text).ok_or(SummaryParseError::NoMapping)?;
    let value = match serde_json::from_str::<Value>(span) {
        Ok(value) => value,
        Err(_) => serde_json::from_str::<Value>(&python_literal_to_json(span))
            .map_err(|e| SummaryParseError::Malformed(e.to_string()))?,
    };

    let Value::Object(map) = value else {
        return Err(SummaryParseError::NoMapping);
    };
    summary_from_map(&map)
}

/// Outermost `{ ... }` of the reply.
fn mapping_span(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (start < end).then(|| &text[start..=end])
}

fn summary_from_map(map: &Map<String, Value>) -> Result<Summary, SummaryParseError> {
    let summary = match map.get("summary") {
        Some(Value::String(s)) => s.trim().to_string(),
        _ => return Err(SummaryParseError::MissingSummary),
    };

    let sentiment = map
        .get("sentiment")
        .and_then(Value::as_str)
        .map(Sentiment::from_label)
        .unwrap_or_default();

    let raw_tags: Vec<String> = match map.get("tags") {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s.clone()),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
            .collect(),
        Some(Value::String(s)) => s.split(',').map(str::to_string).collect(),
        _ => Vec::new(),
    };

    let mut tags: Vec<String> = Vec::with_capacity(raw_tags.len());
    for tag in raw_tags {
        let tag = tag.trim();
        if !tag.is_empty() && !tags.iter().any(|t| t == tag) {
            tags.push(tag.to_string());
        }
    }

    Ok(Summary {
        summary,
        sentiment,
        tags,
    })
}

/// Rewrites a Python dict literal into JSON: single-quoted strings,
/// `True`/`False`/`None`, trailing commas.
fn python_literal_to_json(src: &str) -> String {
    let mut out = String::with_capacity(src.len() + 16);
    let mut chars = src.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '\'' | '"' => {
                let mut content = String::new();
                while let Some(ch) = chars.next() {
                    match ch {
                        '\\' => match chars.next() {
                            Some('n') => content.push('\n'),
                            Some('t') => content.push('\t'),
                            Some('r') => content.push('\r'),
                            Some(other @ ('\\' | '\'' | '"')) => content.push(other),
                            Some(other) => {
                                content.push('\\');
                                content.push(other);
                            }
                            None => content.push('\\'),
                        },
                        q if q == c => break,
                        other => content.push(other),
                    }
                }
                // Serializing a String cannot fail.
                out.push_str(&serde_json::to_string(&content).unwrap_or_default());
            }
            '}' | ']' => {
                let trimmed = out.trim_end().len();
                out.truncate(trimmed);
                if out.ends_with(',') {
                    out.pop();
                }
                out.push(c);
            }
            c if c.is_ascii_alphabetic() => {
                let mut word = String::from(c);
                while let Some(&next) = chars.peek() {
                    if next.is_ascii_alphanumeric() || next == '_' {
                        word.push(next);
                        chars.next();
                    } else {
                        break;
                    }
                }
                match word.as_str() {
                    "True" => out.push_str("true"),
                    "False" => out.push_str("false"),
                    "None" => out.push_str("null"),
                    _ => out.push_str(&word),
                }
            }
            other => out.push(other),
        }
    }

    out
}
