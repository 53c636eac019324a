use anyhow::{Context, Result};
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT};
use std::time::Duration;
use tracing::{debug, info};

use crate::config::ApiConfig;
use crate::error::ActivityError;
use crate::event::Event;

/// Status and decoded events of one feed request.
///
/// `events` is only populated when the status is a success.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedResponse {
    pub status: u16,
    pub events: Vec<Event>,
}

impl FeedResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Port for fetching a user's public events
pub trait EventSource {
    /// Fetch one batch of events. A non-success status is reported in the
    /// response, not as an error; errors mean no status was obtained at all.
    fn fetch(&self, user: &str) -> Result<FeedResponse>;
}

/// GitHub REST API implementation of [`EventSource`]
pub struct GithubClient {
    client: Client,
    config: ApiConfig,
}

impl GithubClient {
    pub fn new(config: ApiConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_str(&config.accept)
                .with_context(|| format!("Invalid Accept header: {}", config.accept))?,
        );

        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers(headers)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { client, config })
    }
}

impl EventSource for GithubClient {
    fn fetch(&self, user: &str) -> Result<FeedResponse> {
        validate_user(user)?;
        let url = events_url(&self.config.base_url, user);
        info!("Fetching public events from {}", url);

        let mut request = self.client.get(&url);
        if let Some(token) = &self.config.token {
            request = request.bearer_auth(token);
        }

        let response = request
            .send()
            .with_context(|| format!("HTTP request to {} failed", url))?;

        let status = response.status();
        if !status.is_success() {
            debug!("{} returned {}", url, status);
            return Ok(FeedResponse {
                status: status.as_u16(),
                events: Vec::new(),
            });
        }

        let events: Vec<Event> = response
            .json()
            .with_context(|| format!("Failed to decode event feed from {}", url))?;
        debug!("Received {} events", events.len());

        Ok(FeedResponse {
            status: status.as_u16(),
            events,
        })
    }
}

pub fn events_url(base_url: &str, user: &str) -> String {
    format!("{}/users/{}/events/public", base_url.trim_end_matches('/'), user)
}

pub fn validate_user(user: &str) -> std::result::Result<(), ActivityError> {
    if user.trim().is_empty() {
        return Err(ActivityError::InvalidUser {
            reason: "user name is empty".to_string(),
        });
    }
    if user.contains(|c: char| c == '/' || c == '?' || c == '#' || c.is_whitespace()) {
        return Err(ActivityError::InvalidUser {
            reason: format!("'{}' is not a valid GitHub login", user),
        });
    }
    Ok(())
}
