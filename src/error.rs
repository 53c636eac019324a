use thiserror::Error;

/// Errors raised while turning feed events into messages
#[derive(Error, Debug, PartialEq)]
pub enum ActivityError {
    #[error("{kind} in {repo} has no action")]
    MissingAction { kind: &'static str, repo: String },

    #[error("Invalid user name: {reason}")]
    InvalidUser { reason: String },
}

pub type Result<T> = std::result::Result<T, ActivityError>;
