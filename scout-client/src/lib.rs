//! Scout Platform Client
//!
//! A typed HTTP client for the recruiting platform's web API.
//!
//! The engine talks to the platform only through the [`RecruitingPlatform`]
//! trait, which covers the four remote operations it needs. Greeting
//! template setup lives on the separate [`GreetingTemplates`] trait since
//! it runs once at startup and is not part of the outreach loop.
//!
//! # Example
//!
//! ```no_run
//! use scout_client::{PlatformClient, RecruitingPlatform};
//! use scout_core::domain::credential::SessionCredential;
//! use tokio::sync::watch;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let (_tx, rx) = watch::channel(SessionCredential::new("wt2=..."));
//!     let client = PlatformClient::new("https://www.zhipin.com", rx)?;
//!
//!     let candidates = client.list_recommended("job-123").await?;
//!     println!("{} candidates recommended", candidates.len());
//!     Ok(())
//! }
//! ```

pub mod error;
mod exchange;
mod greeting;
pub mod headers;
mod recommend;

pub use error::{PlatformError, Result};
pub use scout_core::dto::greeting::GreetingJob;

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use scout_core::domain::candidate::{ContactHandles, RecommendedCandidate};
use scout_core::domain::credential::SessionCredential;
use scout_core::dto::Envelope;
use serde::de::DeserializeOwned;
use tokio::sync::watch;

/// Upper bound on one request when no custom client is supplied
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Body text the platform returns when the session cookie is rejected
pub const SESSION_INVALID_MARKER: &str = "当前登录状态已失效";
/// Body text the platform returns when the daily outreach cap is reached
pub const QUOTA_EXCEEDED_MARKER: &str = "今日沟通已达上限";
/// Body text the platform returns when a resume is requested too early
pub const FRIEND_PENDING_MARKER: &str = "好友关系校验失败";

/// The remote operations the outreach engine depends on
#[async_trait]
pub trait RecruitingPlatform: Send + Sync {
    /// Fetches one page of recommended candidates for a job
    async fn list_recommended(&self, job_id: &str) -> Result<Vec<RecommendedCandidate>>;

    /// Sends the initial greeting to a candidate
    async fn send_greeting(&self, job_id: &str, handles: &ContactHandles) -> Result<()>;

    /// Asks a candidate for their resume
    ///
    /// Fails with [`PlatformError::FriendRelationPending`] until the
    /// candidate has replied to the greeting.
    async fn request_resume(&self, security_token: &str) -> Result<()>;

    /// Accepts a resume the candidate offered on their own
    async fn accept_resume(&self, message_id: &str, security_token: &str) -> Result<()>;
}

/// Account-level greeting template management
#[async_trait]
pub trait GreetingTemplates: Send + Sync {
    /// Turns on the automatic greeting for the account
    async fn enable_auto_greeting(&self) -> Result<()>;

    /// Lists the account's jobs with their current greeting
    async fn list_greeting_jobs(&self) -> Result<Vec<GreetingJob>>;

    /// Saves the greeting text for one job
    async fn save_greeting(&self, job: &GreetingJob, content: &str) -> Result<()>;
}

/// HTTP client for the recruiting platform
///
/// The session credential is read from a watch channel on every request,
/// so a refreshed cookie takes effect on the next call without restarting.
#[derive(Debug, Clone)]
pub struct PlatformClient {
    /// Base URL of the platform (e.g., "https://www.zhipin.com")
    base_url: String,
    /// HTTP client instance
    client: Client,
    /// Latest published session credential
    credential: watch::Receiver<SessionCredential>,
}

impl PlatformClient {
    /// Create a new platform client
    ///
    /// # Arguments
    /// * `base_url` - The platform's base URL
    /// * `credential` - Receiver publishing the current session credential
    ///
    /// Every request is bounded by [`DEFAULT_REQUEST_TIMEOUT`].
    pub fn new(
        base_url: impl Into<String>,
        credential: watch::Receiver<SessionCredential>,
    ) -> Result<Self> {
        let client = Client::builder().timeout(DEFAULT_REQUEST_TIMEOUT).build()?;
        Ok(Self::with_client(base_url, client, credential))
    }

    /// Create a new platform client with a custom HTTP client
    ///
    /// This allows you to configure timeouts, proxies, TLS settings, etc.
    pub fn with_client(
        base_url: impl Into<String>,
        client: Client,
        credential: watch::Receiver<SessionCredential>,
    ) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            credential,
        }
    }

    /// Get the base URL of the platform
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn headers(&self) -> Result<reqwest::header::HeaderMap> {
        let credential = self.credential.borrow().clone();
        headers::browser_headers(&credential)
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Reads the body of a response, failing on non-success status codes
    async fn read_body(&self, response: reqwest::Response) -> Result<String> {
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(PlatformError::api_error(status.as_u16(), body));
        }

        Ok(body)
    }

    /// Reads a response, classifies known failure markers, and decodes the envelope
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let body = self.read_body(response).await?;
        classify_body(&body)?;
        decode_envelope(&body)
    }
}

/// Maps the platform's in-body failure markers to typed errors
pub fn classify_body(body: &str) -> Result<()> {
    if body.contains(SESSION_INVALID_MARKER) {
        return Err(PlatformError::SessionInvalid);
    }
    if body.contains(QUOTA_EXCEEDED_MARKER) {
        return Err(PlatformError::QuotaExceeded);
    }
    if body.contains(FRIEND_PENDING_MARKER) {
        return Err(PlatformError::FriendRelationPending);
    }
    Ok(())
}

/// Decodes the payload of a response envelope
///
/// A missing payload decodes as the payload type's default.
pub fn decode_envelope<T: DeserializeOwned>(body: &str) -> Result<T> {
    let envelope: Envelope<serde_json::Value> = serde_json::from_str(body)
        .map_err(|e| PlatformError::ParseError(format!("Failed to parse JSON response: {}", e)))?;

    if envelope.code != 0 {
        return Err(PlatformError::Rejected {
            code: envelope.code,
            message: envelope.message,
        });
    }

    let data = envelope.zp_data.unwrap_or(serde_json::Value::Null);
    let data = if data.is_null() {
        serde_json::Value::Object(Default::default())
    } else {
        data
    };

    serde_json::from_value(data)
        .map_err(|e| PlatformError::ParseError(format!("Failed to decode payload: {}", e)))
}

fn unix_now() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or_default()
}

#[async_trait]
impl RecruitingPlatform for PlatformClient {
    async fn list_recommended(&self, job_id: &str) -> Result<Vec<RecommendedCandidate>> {
        self.fetch_recommended(job_id).await
    }

    async fn send_greeting(&self, job_id: &str, handles: &ContactHandles) -> Result<()> {
        self.start_chat(job_id, handles).await
    }

    async fn request_resume(&self, security_token: &str) -> Result<()> {
        self.request_resume_exchange(security_token).await
    }

    async fn accept_resume(&self, message_id: &str, security_token: &str) -> Result<()> {
        self.accept_resume_exchange(message_id, security_token).await
    }
}

#[async_trait]
impl GreetingTemplates for PlatformClient {
    async fn enable_auto_greeting(&self) -> Result<()> {
        self.update_auto_greeting(true).await
    }

    async fn list_greeting_jobs(&self) -> Result<Vec<GreetingJob>> {
        self.fetch_greeting_jobs().await
    }

    async fn save_greeting(&self, job: &GreetingJob, content: &str) -> Result<()> {
        self.save_job_greeting(job, content).await
    }
}
