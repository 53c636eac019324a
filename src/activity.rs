//! Classification and aggregation of a fetched event batch.
//!
//! Push events are folded into one line per repository, placed first in
//! first-seen order. Every other recognised event becomes one message, in feed
//! order, with consecutive repeats collapsed.

use tracing::{debug, warn};

use crate::event::{Event, EventKind};
use crate::feed::FeedResponse;
use crate::tally::{push_line, PushTally};

/// Result of summarizing one batch of events
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Summary {
    pub messages: Vec<String>,
    /// Events dropped because their payload lacked a field their kind requires
    pub skipped: usize,
}

/// What the caller prints: either messages, or the status that prevented them
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Rendered {
    pub messages: Vec<String>,
    pub failed_status: Option<u16>,
}

impl Rendered {
    pub fn is_failure(&self) -> bool {
        self.failed_status.is_some()
    }
}

pub fn summarize(events: &[Event]) -> Summary {
    let mut pushes = PushTally::new();
    let mut others: Vec<String> = Vec::new();
    let mut skipped = 0;

    for event in events {
        let repo = event.repo_name();
        let kind = EventKind::from_record(event);

        if let EventKind::Push { commits } = kind {
            pushes.add(repo, commits as u64);
            continue;
        }

        match kind.message(repo) {
            Ok(Some(msg)) => {
                if !msg.is_empty() && others.last() != Some(&msg) {
                    others.push(msg);
                }
            }
            Ok(None) => debug!("Ignoring {} in {}", kind, repo),
            Err(e) => {
                warn!("Skipping malformed event: {}", e);
                skipped += 1;
            }
        }
    }

    let mut messages: Vec<String> = pushes
        .iter()
        .map(|(repo, commits)| push_line(repo, commits))
        .collect();
    messages.extend(others);

    Summary { messages, skipped }
}

/// Turn a transport response into printable lines.
///
/// A non-success status yields no messages; the status is handed back so the
/// caller can report it.
pub fn render(response: &FeedResponse) -> Rendered {
    if !response.is_success() {
        warn!("Event feed request failed with status {}", response.status);
        return Rendered {
            messages: Vec::new(),
            failed_status: Some(response.status),
        };
    }

    let summary = summarize(&response.events);
    debug!(
        "Summarized {} events into {} messages ({} skipped)",
        response.events.len(),
        summary.messages.len(),
        summary.skipped
    );

    Rendered {
        messages: summary.messages,
        failed_status: None,
    }
}
