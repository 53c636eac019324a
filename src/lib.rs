//! Summarize a GitHub user's public event feed as readable lines.

pub mod activity;
pub mod cli;
pub mod config;
pub mod error;
pub mod event;
pub mod feed;
pub mod tally;

pub use activity::{render, summarize, Rendered, Summary};
pub use error::ActivityError;
pub use event::{Event, EventKind};
pub use feed::{EventSource, FeedResponse, GithubClient};
