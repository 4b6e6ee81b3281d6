//! Job requisition domain types

use serde::{Deserialize, Serialize};

/// An open position being sourced for
///
/// Loaded once at startup and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobRequisition {
    pub job_id: String,
    pub job_name: String,
}

impl JobRequisition {
    pub fn new(job_id: impl Into<String>, job_name: impl Into<String>) -> Self {
        Self {
            job_id: job_id.into(),
            job_name: job_name.into(),
        }
    }
}

impl std::fmt::Display for JobRequisition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.job_name, self.job_id)
    }
}
