//! Recommended-candidate endpoint

use scout_core::domain::candidate::RecommendedCandidate;
use scout_core::dto::recommend::RecommendPage;
use tracing::debug;

use crate::error::Result;
use crate::{PlatformClient, unix_now};

const RECOMMEND_PATH: &str = "/wapi/zprelation/interaction/bossGetGeek";

/// Builds the query for the first page of unfiltered recommendations
pub(crate) fn recommend_query(job_id: &str, refresh: u64) -> Vec<(&'static str, String)> {
    let mut query: Vec<(&'static str, String)> = [
        "gender",
        "exchangeResumeWithColleague",
        "switchJobFrequency",
        "activation",
        "recentNotView",
        "school",
        "major",
        "experience",
        "degree",
        "salary",
        "intention",
        "businessId",
        "districtCode",
    ]
    .into_iter()
    .map(|key| (key, "0".to_string()))
    .collect();

    query.extend([
        ("jobid", job_id.to_string()),
        ("refresh", refresh.to_string()),
        ("status", "1".to_string()),
        ("cityCode", String::new()),
        ("source", String::new()),
        ("page", "1".to_string()),
        ("tag", "1".to_string()),
    ]);
    query
}

impl PlatformClient {
    /// Fetch one page of recommended candidates for a job
    ///
    /// # Arguments
    /// * `job_id` - The platform's job identifier
    ///
    /// # Returns
    /// The candidates on the page, in the order the platform listed them
    pub(crate) async fn fetch_recommended(&self, job_id: &str) -> Result<Vec<RecommendedCandidate>> {
        let url = self.url(RECOMMEND_PATH);
        let response = self
            .client
            .get(&url)
            .headers(self.headers()?)
            .query(&recommend_query(job_id, unix_now()))
            .send()
            .await?;

        let page: RecommendPage = self.handle_response(response).await?;
        debug!(job_id, count = page.geek_list.len(), "Fetched recommendation page");

        Ok(page.geek_list.into_iter().map(Into::into).collect())
    }
}
