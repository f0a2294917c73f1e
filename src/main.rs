use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use tracing::info;

use clio::config::AppConfig;
use clio::db::Database;
use clio::entity::EntityExtractor;
use clio::news::{self, Headline, NewsClient};
use clio::pipeline::{self, ScoredRow};
use clio::scoring::Scorer;
use clio::wiki::{self, WikiClient, WikiMatch, WikiResolver};
use clio::{logging, TARGET_PIPELINE};

#[derive(Parser)]
#[command(author, version, about = "Match daily news headlines with Wikipedia articles", long_about = None)]
struct Cli {
    /// Path to the YAML configuration file
    #[arg(short, long, default_value = "config/default.yaml")]
    config: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the day's headlines from the news API
    LoadNews {
        /// Path to save the headlines as JSON (stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Extract entities from fetched headlines and resolve Wikipedia candidates
    LoadWiki {
        /// Path to the headlines JSON from load-news
        #[arg(short, long)]
        input: String,

        /// Path to save the candidate matches as JSON (stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Join, score and filter (headline, candidate) pairs
    Filter {
        /// Path to the headlines JSON from load-news
        #[arg(long)]
        news: String,

        /// Path to the candidate matches JSON from load-wiki
        #[arg(long)]
        wiki: String,

        /// Path to save the filtered rows as JSON (stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Create the database file and schema
    CreateDb,

    /// Ingest a filtered batch, replacing the previous one
    Ingest {
        /// Path to the filtered rows JSON from filter
        #[arg(short, long)]
        input: String,
    },

    /// Run the whole pipeline and persist the result
    Run,
}

#[tokio::main]
async fn main() -> Result<()> {
    logging::configure_logging();

    let cli = Cli::parse();
    let config = AppConfig::from_yaml_file(&cli.config)?;

    match cli.command {
        Commands::LoadNews { output } => {
            let client = NewsClient::new(&config.news, &config.http)?;
            let headlines = news::load_news(&client, &config.news.source_words).await?;
            write_output(output.as_deref(), &headlines)?;
        }

        Commands::LoadWiki { input, output } => {
            let headlines: Vec<Headline> = read_json(&input)?;
            let extractor = EntityExtractor::new(&config.entities);
            let client = WikiClient::new(&config.wiki, &config.http)?;
            let resolver = WikiResolver::new(client, &config.wiki);
            let matches = wiki::load_wiki(&headlines, &extractor, &resolver).await;
            write_output(output.as_deref(), &matches)?;
        }

        Commands::Filter { news, wiki, output } => {
            let headlines: Vec<Headline> = read_json(&news)?;
            let matches: Vec<WikiMatch> = read_json(&wiki)?;
            let scorer = Scorer::new(&config.filter);
            let joined = pipeline::join::join(&headlines, &matches, &pipeline::batch_date());
            let filtered = pipeline::filter_rows(joined, &scorer);
            write_output(output.as_deref(), &filtered)?;
        }

        Commands::CreateDb => {
            Database::new(&config.database.path).await?;
            info!(target: TARGET_PIPELINE, "database created at {}", config.database.path);
        }

        Commands::Ingest { input } => {
            let rows: Vec<ScoredRow> = read_json(&input)?;
            let db = Database::new(&config.database.path).await?;
            pipeline::persist(&db, &rows).await?;
        }

        Commands::Run => {
            let db = Database::new(&config.database.path).await?;
            let summary = pipeline::run_batch(&config, &db).await?;
            info!(
                target: TARGET_PIPELINE,
                "done: {} headlines, {} candidates, {} relevant matches persisted",
                summary.headlines, summary.candidates, summary.relevant
            );
        }
    }

    Ok(())
}

fn read_json<T: DeserializeOwned>(path: &str) -> Result<T> {
    let raw = fs::read_to_string(path).with_context(|| format!("failed to read {}", path))?;
    serde_json::from_str(&raw).with_context(|| format!("failed to parse {}", path))
}

fn write_output<T: Serialize>(path: Option<&str>, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    match path {
        Some(path) => {
            fs::write(path, json).with_context(|| format!("failed to write {}", path))?;
            info!(target: TARGET_PIPELINE, "output saved to {}", path);
        }
        None => println!("{}", json),
    }
    Ok(())
}
