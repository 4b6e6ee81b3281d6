//! Greeting template endpoints

use scout_core::dto::greeting::{GreetingJob, GreetingJobList};

use crate::error::{PlatformError, Result};
use crate::{PlatformClient, classify_body};

const UPDATE_GREETING_PATH: &str = "/wapi/zpchat/greeting/updateGreeting";
const GREETING_JOBS_PATH: &str = "/wapi/zpchat/greeting/job/get";
const SAVE_GREETING_PATH: &str = "/wapi/zpchat/greeting/job/save";

/// Body text of a successful settings update
const SUCCESS_MARKER: &str = "Success";

fn expect_success(body: &str) -> Result<()> {
    classify_body(body)?;
    if body.contains(SUCCESS_MARKER) {
        Ok(())
    } else {
        Err(PlatformError::ParseError(format!(
            "unexpected greeting response: {}",
            body
        )))
    }
}

impl PlatformClient {
    /// Switch the account's automatic greeting on or off
    pub(crate) async fn update_auto_greeting(&self, enabled: bool) -> Result<()> {
        let url = self.url(UPDATE_GREETING_PATH);
        let status = if enabled { "1" } else { "0" };
        let response = self
            .client
            .post(&url)
            .headers(self.headers()?)
            .form(&[("status", status), ("templateId", "")])
            .send()
            .await?;

        let body = self.read_body(response).await?;
        expect_success(&body)
    }

    /// List the account's jobs and their greetings
    pub(crate) async fn fetch_greeting_jobs(&self) -> Result<Vec<GreetingJob>> {
        let url = self.url(GREETING_JOBS_PATH);
        let response = self
            .client
            .get(&url)
            .headers(self.headers()?)
            .send()
            .await?;

        let list: GreetingJobList = self.handle_response(response).await?;
        Ok(list.jobs)
    }

    /// Save the greeting text for a job
    pub(crate) async fn save_job_greeting(&self, job: &GreetingJob, content: &str) -> Result<()> {
        let url = self.url(SAVE_GREETING_PATH);
        let response = self
            .client
            .post(&url)
            .headers(self.headers()?)
            .form(&[
                ("encJobId", job.enc_job_id.as_str()),
                ("encGreetingId", job.enc_greeting_id.as_str()),
                ("content", content),
            ])
            .send()
            .await?;

        let body = self.read_body(response).await?;
        expect_success(&body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expect_success() {
        assert!(expect_success(r#"{"code":0,"message":"Success"}"#).is_ok());
        assert!(expect_success(r#"{"code":1,"message":"fail"}"#).is_err());
    }
}
