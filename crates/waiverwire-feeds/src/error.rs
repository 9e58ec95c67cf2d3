// Errors raised by the upstream feeds.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    /// The upstream answered with a non-2xx status.
    #[error("{endpoint} returned {status} {reason}")]
    Status {
        endpoint: String,
        status: u16,
        reason: String,
    },

    /// The request never produced a response (DNS, connect, timeout, ...).
    #[error("request to {endpoint} failed: {source}")]
    Transport {
        endpoint: String,
        source: reqwest::Error,
    },

    #[error("failed to decode response from {endpoint}: {source}")]
    Decode {
        endpoint: String,
        source: serde_json::Error,
    },

    #[error("failed to build HTTP client: {0}")]
    ClientBuild(reqwest::Error),

    #[error("user not found: {user}")]
    UserNotFound { user: String },

    #[error("roster not found for user {owner_id} in league {league_id}")]
    RosterNotFound { owner_id: String, league_id: String },
}

impl FetchError {
    /// HTTP status carried by the error, if the upstream responded.
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Domain "not found" errors, as opposed to transport failures.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            FetchError::UserNotFound { .. } | FetchError::RosterNotFound { .. }
        )
    }
}
