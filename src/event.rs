use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use crate::error::{ActivityError, Result};

/// One record of the public events feed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    #[serde(rename = "type")]
    pub kind: String,
    pub repo: Repo,
    #[serde(default)]
    pub payload: Map<String, Value>,
}

/// Repository an event happened in
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Repo {
    pub name: String,
}

impl Event {
    pub fn new(kind: impl Into<String>, repo: impl Into<String>, payload: Map<String, Value>) -> Self {
        Self {
            kind: kind.into(),
            repo: Repo { name: repo.into() },
            payload,
        }
    }

    pub fn repo_name(&self) -> &str {
        &self.repo.name
    }
}

/// Event record narrowed to the fields each known kind needs
#[derive(Debug, Clone, PartialEq)]
pub enum EventKind {
    Push { commits: usize },
    Issues { action: Option<String> },
    PullRequest { action: Option<String>, merged: bool },
    Watch,
    Fork,
    Other(String),
}

impl EventKind {
    pub fn from_record(event: &Event) -> Self {
        let payload = &event.payload;
        match event.kind.as_str() {
            "PushEvent" => EventKind::Push {
                commits: payload
                    .get("commits")
                    .and_then(Value::as_array)
                    .map_or(0, Vec::len),
            },
            "IssuesEvent" => EventKind::Issues {
                action: action_of(payload),
            },
            "PullRequestEvent" => EventKind::PullRequest {
                action: action_of(payload),
                merged: payload
                    .get("pull_request")
                    .and_then(|pr| pr.get("merged"))
                    .and_then(Value::as_bool)
                    .unwrap_or(false),
            },
            "WatchEvent" => EventKind::Watch,
            "ForkEvent" => EventKind::Fork,
            other => EventKind::Other(other.to_string()),
        }
    }

    /// Display line for a non-push event, `None` for kinds that produce nothing here.
    pub fn message(&self, repo: &str) -> Result<Option<String>> {
        let msg = match self {
            EventKind::Push { .. } | EventKind::Other(_) => return Ok(None),
            EventKind::Issues { action } => match require_action(action, "IssuesEvent", repo)? {
                "opened" => format!("Opened a new issue in {}", repo),
                "closed" => format!("Closed an issue in {}", repo),
                other => format!("{} an issue in {}", capitalize(other), repo),
            },
            EventKind::PullRequest { action, merged } => {
                match require_action(action, "PullRequestEvent", repo)? {
                    "opened" => format!("Opened a new pull request in {}", repo),
                    "closed" if *merged => format!("Merged a pull request in {}", repo),
                    "closed" => format!("Closed a pull request in {}", repo),
                    other => format!("{} a pull request in {}", capitalize(other), repo),
                }
            }
            EventKind::Watch => format!("Starred {}", repo),
            EventKind::Fork => format!("Forked {}", repo),
        };
        Ok(Some(msg))
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventKind::Push { .. } => write!(f, "PushEvent"),
            EventKind::Issues { .. } => write!(f, "IssuesEvent"),
            EventKind::PullRequest { .. } => write!(f, "PullRequestEvent"),
            EventKind::Watch => write!(f, "WatchEvent"),
            EventKind::Fork => write!(f, "ForkEvent"),
            EventKind::Other(kind) => write!(f, "{}", kind),
        }
    }
}

fn action_of(payload: &Map<String, Value>) -> Option<String> {
    payload
        .get("action")
        .and_then(Value::as_str)
        .map(str::to_string)
}

fn require_action<'a>(action: &'a Option<String>, kind: &'static str, repo: &str) -> Result<&'a str> {
    action.as_deref().ok_or_else(|| ActivityError::MissingAction {
        kind,
        repo: repo.to_string(),
    })
}

/// Upper-case the first character and lower-case the rest.
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn event(kind: &str, repo: &str, payload: Value) -> Event {
        let payload = match payload {
            Value::Object(map) => map,
            _ => Map::new(),
        };
        Event::new(kind, repo, payload)
    }

    #[test]
    fn test_deserialize_feed_record() -> anyhow::Result<()> {
        let raw = r#"{
            "id": "1",
            "type": "WatchEvent",
            "actor": {"login": "octocat"},
            "repo": {"id": 7, "name": "octocat/hello", "url": "https://api.github.com/repos/octocat/hello"},
            "payload": {"action": "started"},
            "public": true
        }"#;

        let parsed: Event = serde_json::from_str(raw)?;
        assert_eq!(parsed.kind, "WatchEvent");
        assert_eq!(parsed.repo_name(), "octocat/hello");
        assert_eq!(parsed.payload.get("action"), Some(&json!("started")));
        Ok(())
    }

    #[test]
    fn test_deserialize_without_payload() -> anyhow::Result<()> {
        let parsed: Event = serde_json::from_str(r#"{"type": "ForkEvent", "repo": {"name": "a/b"}}"#)?;
        assert!(parsed.payload.is_empty());
        Ok(())
    }

    #[test]
    fn test_push_counts_commits() {
        let kind = EventKind::from_record(&event("PushEvent", "a/b", json!({"commits": [{}, {}, {}]})));
        assert_eq!(kind, EventKind::Push { commits: 3 });
    }

    #[test]
    fn test_push_without_commits_is_zero() {
        let kind = EventKind::from_record(&event("PushEvent", "a/b", json!({"size": 4})));
        assert_eq!(kind, EventKind::Push { commits: 0 });

        let kind = EventKind::from_record(&event("PushEvent", "a/b", json!({"commits": "abc"})));
        assert_eq!(kind, EventKind::Push { commits: 0 });
    }

    #[test]
    fn test_issue_messages() -> anyhow::Result<()> {
        let opened = EventKind::Issues { action: Some("opened".into()) };
        assert_eq!(opened.message("X")?, Some("Opened a new issue in X".to_string()));

        let closed = EventKind::Issues { action: Some("closed".into()) };
        assert_eq!(closed.message("X")?, Some("Closed an issue in X".to_string()));

        let reopened = EventKind::Issues { action: Some("reopened".into()) };
        assert_eq!(reopened.message("X")?, Some("Reopened an issue in X".to_string()));
        Ok(())
    }

    #[test]
    fn test_pull_request_closed_depends_on_merged() -> anyhow::Result<()> {
        let merged = EventKind::from_record(&event(
            "PullRequestEvent",
            "Y",
            json!({"action": "closed", "pull_request": {"merged": true}}),
        ));
        assert_eq!(merged.message("Y")?, Some("Merged a pull request in Y".to_string()));

        let unmerged = EventKind::from_record(&event(
            "PullRequestEvent",
            "Y",
            json!({"action": "closed", "pull_request": {"merged": false}}),
        ));
        assert_eq!(unmerged.message("Y")?, Some("Closed a pull request in Y".to_string()));

        // No pull_request object at all means not merged
        let bare = EventKind::from_record(&event("PullRequestEvent", "Y", json!({"action": "closed"})));
        assert_eq!(bare.message("Y")?, Some("Closed a pull request in Y".to_string()));
        Ok(())
    }

    #[test]
    fn test_pull_request_other_actions() -> anyhow::Result<()> {
        let opened = EventKind::PullRequest { action: Some("opened".into()), merged: false };
        assert_eq!(opened.message("Y")?, Some("Opened a new pull request in Y".to_string()));

        let sync = EventKind::PullRequest { action: Some("synchronize".into()), merged: false };
        assert_eq!(sync.message("Y")?, Some("Synchronize a pull request in Y".to_string()));
        Ok(())
    }

    #[test]
    fn test_missing_action_is_an_error() {
        let kind = EventKind::from_record(&event("IssuesEvent", "X", json!({})));
        assert_eq!(
            kind.message("X"),
            Err(ActivityError::MissingAction { kind: "IssuesEvent", repo: "X".to_string() })
        );

        let kind = EventKind::from_record(&event("PullRequestEvent", "X", json!({"action": 5})));
        assert!(matches!(kind.message("X"), Err(ActivityError::MissingAction { .. })));
    }

    #[test]
    fn test_star_fork_and_unknown() -> anyhow::Result<()> {
        assert_eq!(EventKind::Watch.message("R")?, Some("Starred R".to_string()));
        assert_eq!(EventKind::Fork.message("R")?, Some("Forked R".to_string()));

        let kind = EventKind::from_record(&event("CreateEvent", "R", json!({"ref_type": "branch"})));
        assert_eq!(kind, EventKind::Other("CreateEvent".to_string()));
        assert_eq!(kind.message("R")?, None);
        assert_eq!(EventKind::Push { commits: 2 }.message("R")?, None);
        Ok(())
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("reopened"), "Reopened");
        assert_eq!(capitalize("LABELED"), "Labeled");
        assert_eq!(capitalize("x"), "X");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(EventKind::Watch.to_string(), "WatchEvent");
        assert_eq!(EventKind::Other("GollumEvent".into()).to_string(), "GollumEvent");
    }
}
