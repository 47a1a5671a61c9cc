//! # rss-summa
//!
//! Summarise the latest entries of an RSS or Atom feed with an LLM.
//!
//! ## Pipeline
//!
//! - **Config**: eight mandatory keys, validated before any network call
//! - **Feed**: fetched once, first five entries kept
//! - **Summaries**: one chat-completions request per entry, failures reported per entry

pub mod agent;
pub mod clean;
pub mod config;
pub mod feed;
pub mod pipeline;

pub use agent::{AgentError, ChatClient, Summarize};
pub use config::Config;
pub use feed::{FeedEntry, FeedFetcher};
pub use pipeline::Pipeline;
