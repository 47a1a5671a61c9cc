//! Feed fetching and parsing.
//!
//! Uses reqwest for fetching and feed-rs for RSS, Atom and JSON Feed parsing.

use reqwest::Client;
use std::time::Duration;
use thiserror::Error;

/// User-Agent string identifying this fetcher
const USER_AGENT: &str = concat!("rss-summa/", env!("CARGO_PKG_VERSION"));

/// Default timeout for feed requests
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Error, Debug)]
pub enum FeedError {
    #[error("failed to fetch feed: {0}")]
    FetchError(#[from] reqwest::Error),
    #[error("feed server returned HTTP {0}")]
    Status(u16),
    #[error("failed to parse feed: {0}")]
    ParseError(#[from] feed_rs::parser::ParseFeedError),
}

/// One article from a feed. Either field may be absent in the source document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedEntry {
    pub title: Option<String>,
    /// Summary or description, possibly carrying HTML
    pub description: Option<String>,
}

impl FeedEntry {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            description: Some(description.into()),
        }
    }

    /// Entry title, or an empty string when the feed omits it
    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or_default()
    }

    /// Entry description, or an empty string when the feed omits it
    pub fn description(&self) -> &str {
        self.description.as_deref().unwrap_or_default()
    }
}

/// HTTP feed reader holding a configured client
pub struct FeedFetcher {
    client: Client,
}

impl FeedFetcher {
    pub fn new() -> Result<Self, FeedError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self { client })
    }

    /// Fetch `url` and return its entries in document order
    pub async fn fetch(&self, url: &str) -> Result<Vec<FeedEntry>, FeedError> {
        tracing::debug!(url, "fetching feed");
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::Status(status.as_u16()));
        }

        let body = response.bytes().await?;
        let entries = parse_feed(&body)?;
        tracing::info!(url, entries = entries.len(), "feed fetched");
        Ok(entries)
    }
}

/// Parse a feed document into entries
pub fn parse_feed(body: &[u8]) -> Result<Vec<FeedEntry>, FeedError> {
    let feed = feed_rs::parser::parse(body)?;

    let entries = feed
        .entries
        .into_iter()
        .map(|entry| FeedEntry {
            title: entry.title.map(|t| t.content),
            // Fall back to the full content when there is no summary
            description: entry
                .summary
                .map(|s| s.content)
                .or_else(|| entry.content.and_then(|c| c.body)),
        })
        .collect();

    Ok(entries)
}
