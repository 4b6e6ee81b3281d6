//! Greeting template payloads

use serde::Deserialize;

/// A job on the account together with its automatic greeting
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GreetingJob {
    #[serde(default)]
    pub enc_job_id: String,
    #[serde(default)]
    pub enc_greeting_id: String,
    #[serde(default)]
    pub job_name: String,
    #[serde(default)]
    pub job_greeting: String,
}

impl GreetingJob {
    pub fn has_greeting(&self) -> bool {
        !self.job_greeting.trim().is_empty()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GreetingJobList {
    #[serde(default)]
    pub jobs: Vec<GreetingJob>,
}
