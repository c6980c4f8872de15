use crate::render;
use common::EnrichedResult;
use llm::Insight;
use pipeline::{filter_by_tags, top_tags, Pipeline};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::warn;

const HELP: &str = "Commands:
  topic <keyword>     fetch and summarise discussions
  tags [n]            show the n most frequent tags (default 10)
  filter <t1,t2,..>   show posts carrying any of the tags (empty clears)
  ask <question>      ask a question about the current topic
  refresh             clear every cached topic
  quit";

#[derive(Debug, PartialEq, Eq)]
pub enum SessionCommand {
    Topic(String),
    Tags(usize),
    Filter(Vec<String>),
    Ask(String),
    Refresh,
    Help,
    Quit,
}

impl SessionCommand {
    pub fn parse(line: &str) -> Result<Self, String> {
        let line = line.trim();
        let (head, rest) = match line.split_once(char::is_whitespace) {
            Some((head, rest)) => (head, rest.trim()),
            None => (line, ""),
        };

        match head.to_ascii_lowercase().as_str() {
            "topic" if !rest.is_empty() => Ok(SessionCommand::Topic(rest.to_string())),
            "topic" => Err("usage: topic <keyword>".to_string()),
            "tags" if rest.is_empty() => Ok(SessionCommand::Tags(10)),
            "tags" => rest
                .parse()
                .map(SessionCommand::Tags)
                .map_err(|_| format!("not a number: {}", rest)),
            "filter" => Ok(SessionCommand::Filter(
                rest.split(',')
                    .map(|t| t.trim().to_string())
                    .filter(|t| !t.is_empty())
                    .collect(),
            )),
            "ask" if !rest.is_empty() => Ok(SessionCommand::Ask(rest.to_string())),
            "ask" => Err("usage: ask <question>".to_string()),
            "refresh" => Ok(SessionCommand::Refresh),
            "help" | "?" => Ok(SessionCommand::Help),
            "quit" | "exit" => Ok(SessionCommand::Quit),
            other => Err(format!("unknown command: {}", other)),
        }
    }
}

pub struct Session {
    pipeline: Pipeline,
    insight: Insight,
    topic: Option<String>,
    selected_tags: Vec<String>,
}

impl Session {
    pub fn new(pipeline: Pipeline, insight: Insight) -> Self {
        Self {
            pipeline,
            insight,
            topic: None,
            selected_tags: Vec::new(),
        }
    }

    pub async fn run(mut self) -> anyhow::Result<()> {
        println!("{}", HELP);
        let mut lines = BufReader::new(tokio::io::stdin()).lines();

        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }
            match SessionCommand::parse(&line) {
                Ok(SessionCommand::Quit) => break,
                Ok(command) => self.handle(command).await,
                Err(message) => println!("{}", message),
            }
        }

        Ok(())
    }

    async fn current(&self) -> Option<Arc<EnrichedResult>> {
        let Some(topic) = self.topic.as_deref() else {
            println!("Pick a topic first: topic <keyword>");
            return None;
        };
        match self.pipeline.enrich(topic).await {
            Ok(result) => Some(result),
            Err(e) => {
                warn!("Enrichment failed for '{}': {}", topic, e);
                println!("Failed to load '{}': {}", topic, e);
                None
            }
        }
    }

    async fn handle(&mut self, command: SessionCommand) {
        match command {
            SessionCommand::Topic(topic) => {
                self.topic = Some(topic);
                self.selected_tags.clear();
                if let Some(result) = self.current().await {
                    println!("{}", render::counts_line(&result));
                    println!("{}", render::tags_line(&top_tags(&result.posts, 10)));
                    println!("{}", render::posts_listing(&result.posts));
                }
            }
            SessionCommand::Tags(n) => {
                if let Some(result) = self.current().await {
                    println!("{}", render::tags_line(&top_tags(&result.posts, n)));
                }
            }
            SessionCommand::Filter(tags) => {
                self.selected_tags = tags;
                if let Some(result) = self.current().await {
                    let posts = filter_by_tags(&result.posts, &self.selected_tags);
                    println!("{}", render::posts_listing(&posts));
                }
            }
            SessionCommand::Ask(question) => {
                if let Some(result) = self.current().await {
                    match self.insight.answer(&result.posts, &question).await {
                        Ok(answer) => println!("{}", answer),
                        Err(e) => println!("Could not answer: {}", e),
                    }
                }
            }
            SessionCommand::Refresh => {
                self.pipeline.refresh();
                println!("Cache cleared.");
            }
            SessionCommand::Help => println!("{}", HELP),
            SessionCommand::Quit => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(
            SessionCommand::parse("topic  data contracts "),
            Ok(SessionCommand::Topic("data contracts".to_string()))
        );
        assert_eq!(SessionCommand::parse("tags"), Ok(SessionCommand::Tags(10)));
        assert_eq!(SessionCommand::parse("TAGS 3"), Ok(SessionCommand::Tags(3)));
        assert_eq!(
            SessionCommand::parse("filter dbt, DuckDB,"),
            Ok(SessionCommand::Filter(vec!["dbt".to_string(), "DuckDB".to_string()]))
        );
        assert_eq!(SessionCommand::parse("filter"), Ok(SessionCommand::Filter(Vec::new())));
        assert_eq!(
            SessionCommand::parse("ask is dbt worth it?"),
            Ok(SessionCommand::Ask("is dbt worth it?".to_string()))
        );
        assert_eq!(SessionCommand::parse("refresh"), Ok(SessionCommand::Refresh));
        assert_eq!(SessionCommand::parse("exit"), Ok(SessionCommand::Quit));
    }

    #[test]
    fn test_parse_errors() {
        assert!(SessionCommand::parse("topic").is_err());
        assert!(SessionCommand::parse("ask   ").is_err());
        assert!(SessionCommand::parse("tags many").is_err());
        assert_eq!(
            SessionCommand::parse("search dbt"),
            Err("unknown command: search".to_string())
        );
    }
}
