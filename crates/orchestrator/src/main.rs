mod render;
mod session;

use anyhow::Result;
use clap::{Parser, Subcommand};
use common::Config;
use llm::{ChatModel, Insight, OpenAiClient};
use pipeline::{filter_by_tags, read_batch, top_tags, write_batch, Pipeline};
use session::Session;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser)]
#[command(
    name = "trend-mosaic",
    about = "Summarise what Reddit, Hacker News and Stack Overflow are saying about a technology"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch, summarise and list discussions for a topic
    Explore {
        topic: String,
        /// Only show posts carrying this tag (repeatable, any match)
        #[arg(long = "tag")]
        tags: Vec<String>,
        /// Number of top tags to list
        #[arg(long, default_value_t = 10)]
        top: usize,
    },
    /// Ask a question answered from a topic's summaries
    Ask { topic: String, question: String },
    /// Enrich one topic and write the result to a JSON file
    Batch {
        #[arg(long)]
        topic: Option<String>,
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Print a previously written batch file
    View {
        path: PathBuf,
        #[arg(long = "tag")]
        tags: Vec<String>,
    },
    /// Interactive session with a shared topic cache
    Session,
}

fn build(config: &Config) -> Result<(Pipeline, Arc<dyn ChatModel>)> {
    let model: Arc<dyn ChatModel> = Arc::new(OpenAiClient::from_config(config)?);
    let pipeline = Pipeline::from_config(config, model.clone())?;
    Ok((pipeline, model))
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    let _ = dotenv::dotenv();

    // Results go to stdout, logs to stderr
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let cli = Cli::parse();
    let config = Config::from_env()?;

    match cli.command {
        Command::Explore { topic, tags, top } => {
            let (pipeline, _) = build(&config)?;
            let result = pipeline.enrich(&topic).await?;

            println!("{}", render::counts_line(&result));
            println!("{}", render::tags_line(&top_tags(&result.posts, top)));
            println!();
            println!(
                "{}",
                render::posts_listing(&filter_by_tags(&result.posts, &tags))
            );
        }
        Command::Ask { topic, question } => {
            let (pipeline, model) = build(&config)?;
            let result = pipeline.enrich(&topic).await?;
            let answer = Insight::new(model).answer(&result.posts, &question).await?;
            println!("{}", answer);
        }
        Command::Batch { topic, output } => {
            let topic = topic.unwrap_or_else(|| config.batch.topic.clone());
            let output = output.unwrap_or_else(|| config.batch.output.clone());

            let (pipeline, _) = build(&config)?;
            let result = pipeline.enrich(&topic).await?;
            write_batch(&output, &result.posts).await?;
            info!(
                "Batch for '{}' finished: {}",
                topic,
                render::counts_line(&result)
            );
        }
        Command::View { path, tags } => {
            let posts = read_batch(&path).await?;
            println!("{}", render::tags_line(&top_tags(&posts, 10)));
            println!();
            println!("{}", render::posts_listing(&filter_by_tags(&posts, &tags)));
        }
        Command::Session => {
            let (pipeline, model) = build(&config)?;
            Session::new(pipeline, Insight::new(model)).run().await?;
        }
    }

    Ok(())
}
