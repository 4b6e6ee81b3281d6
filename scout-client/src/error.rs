//! Error types for the platform client
//!
//! Besides transport failures, the platform reports several expected
//! conditions inside otherwise successful responses. Those are surfaced as
//! dedicated variants so callers can apply the right policy to each.

use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, PlatformError>;

/// Errors that can occur when talking to the recruiting platform
#[derive(Debug, Error)]
pub enum PlatformError {
    /// The session credential was rejected; nothing succeeds until it is replaced
    #[error("session credential is no longer valid")]
    SessionInvalid,

    /// The account's daily outreach quota is used up
    #[error("daily outreach quota exhausted")]
    QuotaExceeded,

    /// The candidate has not replied yet, so a resume cannot be requested
    #[error("friend relation with candidate not yet established")]
    FriendRelationPending,

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// Platform returned an error status code
    #[error("API error (status {status}): {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Response body
        message: String,
    },

    /// Platform answered 2xx but flagged the request as failed
    #[error("request rejected (code {code}): {message}")]
    Rejected { code: i64, message: String },

    /// Failed to parse response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// The credential cannot be carried in an HTTP header
    #[error("credential is not a valid header value")]
    InvalidCredential,
}

impl PlatformError {
    /// Create an API error from status code and message
    pub fn api_error(status: u16, message: impl Into<String>) -> Self {
        Self::ApiError {
            status,
            message: message.into(),
        }
    }

    pub fn is_session_invalid(&self) -> bool {
        matches!(self, Self::SessionInvalid)
    }

    pub fn is_quota_exceeded(&self) -> bool {
        matches!(self, Self::QuotaExceeded)
    }

    pub fn is_friend_relation_pending(&self) -> bool {
        matches!(self, Self::FriendRelationPending)
    }

    /// The request never produced a response (connect, send or timeout)
    pub fn is_unanswered(&self) -> bool {
        matches!(self, Self::RequestFailed(_))
    }

    /// Failures of the exchange itself rather than platform verdicts
    ///
    /// Unlike [`is_unanswered`](Self::is_unanswered) this includes bad
    /// statuses and unreadable bodies, which are still answers.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::RequestFailed(_) | Self::ApiError { .. } | Self::ParseError(_)
        )
    }
}
