//! Chat and resume-exchange endpoints

use scout_core::domain::candidate::ContactHandles;
use tracing::debug;

use crate::error::Result;
use crate::{PlatformClient, classify_body, unix_now};

const START_CHAT_PATH: &str = "/wapi/zpboss/h5/chat/start";
const EXCHANGE_REQUEST_PATH: &str = "/wapi/zpchat/exchange/request";
const EXCHANGE_ACCEPT_PATH: &str = "/wapi/zpchat/exchange/accept";

/// Exchange type: the candidate sent us their resume
const EXCHANGE_TO_ME: &str = "3";
/// Exchange type: we ask the candidate for their resume
const EXCHANGE_TO_GEEK: &str = "4";

pub(crate) fn greeting_form(job_id: &str, handles: &ContactHandles) -> Vec<(&'static str, String)> {
    vec![
        ("jid", job_id.to_string()),
        ("gid", handles.encrypted_id.clone()),
        ("lid", handles.list_id.clone()),
        ("expectId", handles.expectation_id.to_string()),
        ("securityId", handles.security_token.clone()),
    ]
}

impl PlatformClient {
    // =============================================================================
    // Outreach
    // =============================================================================

    /// Start a chat with a candidate, which sends the job's greeting
    ///
    /// Only the quota marker is meaningful in the reply; any other 2xx body
    /// counts as sent.
    pub(crate) async fn start_chat(&self, job_id: &str, handles: &ContactHandles) -> Result<()> {
        let url = format!("{}?_={}", self.url(START_CHAT_PATH), unix_now());
        let response = self
            .client
            .post(&url)
            .headers(self.headers()?)
            .form(&greeting_form(job_id, handles))
            .send()
            .await?;

        let body = self.read_body(response).await?;
        classify_body(&body)
    }

    // =============================================================================
    // Resume Exchange
    // =============================================================================

    /// Ask a candidate to send their resume
    pub(crate) async fn request_resume_exchange(&self, security_token: &str) -> Result<()> {
        let url = self.url(EXCHANGE_REQUEST_PATH);
        let response = self
            .client
            .post(&url)
            .headers(self.headers()?)
            .form(&[("type", EXCHANGE_TO_GEEK), ("securityId", security_token)])
            .send()
            .await?;

        let body = self.read_body(response).await?;
        debug!(body = %body, "Resume request response");
        classify_body(&body)
    }

    /// Accept a resume the candidate offered in a chat message
    ///
    /// # Arguments
    /// * `message_id` - The chat message carrying the offer
    /// * `security_token` - The candidate's security token
    pub(crate) async fn accept_resume_exchange(
        &self,
        message_id: &str,
        security_token: &str,
    ) -> Result<()> {
        let url = self.url(EXCHANGE_ACCEPT_PATH);
        let response = self
            .client
            .post(&url)
            .headers(self.headers()?)
            .form(&[
                ("mid", message_id),
                ("type", EXCHANGE_TO_ME),
                ("securityId", security_token),
            ])
            .send()
            .await?;

        let body = self.read_body(response).await?;
        debug!(body = %body, "Resume accept response");
        Ok(())
    }
}
