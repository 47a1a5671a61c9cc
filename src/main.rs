//! rss-summa CLI - summarise the latest feed entries with an LLM
//!
//! The application logic is contained in lib.rs, and this file is responsible
//! for parsing arguments and handling top-level errors.

use clap::Parser;
use rss_summa::{pipeline, ChatClient, Config, FeedFetcher, Pipeline};
use std::io::Write;
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "rss-summa")]
#[command(author, version, about = "Summarise the latest RSS/Atom entries with an LLM", long_about = None)]
struct Cli {
    /// Path to the TOML config (defaults to ./config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Show the cleaned text that would be sent instead of summarising
    #[arg(long)]
    raw: bool,
}

/// Logs go to stderr so stdout carries only the summaries.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();

    // Fail fast on a bad config before touching the network
    let config = Config::load(cli.config.as_deref())?;

    let fetcher = FeedFetcher::new()?;
    let entries = match fetcher.fetch(&config.rss_url).await {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!(url = %config.rss_url, error = %e, "feed fetch failed");
            eprintln!("Warning: {e}; no entries to summarise");
            Vec::new()
        }
    };

    let mut stdout = std::io::stdout().lock();
    if cli.raw {
        pipeline::preview(&entries, &mut stdout)?;
    } else {
        let client = ChatClient::new(&config)?;
        Pipeline::new(client).run(&entries, &mut stdout).await?;
    }
    stdout.flush()?;

    Ok(())
}
