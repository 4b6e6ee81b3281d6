//! Job worker
//!
//! One worker per requisition. For a fixed window it polls the platform
//! for recommendations on a timer, scores each page, and accumulates every
//! eligible candidate. Duplicates across polls are kept on purpose: a later
//! poll may carry fresher status for the same person, and the ledger
//! filters repeats at outreach time. When the window closes the whole
//! list goes to the outreach sequencer.

use scout_client::PlatformError;
use scout_core::domain::candidate::RankedCandidate;
use scout_core::domain::job::JobRequisition;
use thiserror::Error;
use tokio::time::{self, Instant};
use tracing::{debug, info, warn};

use crate::context::RunContext;
use crate::scheduler::sequencer::{OutreachReport, OutreachSequencer};

/// Why a job ended without completing its outreach pass
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum JobFailure {
    /// The platform rejected the session credential while collecting
    #[error("session credential rejected while sourcing job {job_id}")]
    SessionInvalid { job_id: String },

    /// The worker task panicked
    #[error("worker for job {job_id} panicked: {message}")]
    Panicked { job_id: String, message: String },

    /// The worker task was cancelled before finishing
    #[error("worker for job {job_id} was cancelled")]
    Cancelled { job_id: String },
}

impl JobFailure {
    pub fn is_session_invalid(&self) -> bool {
        matches!(self, Self::SessionInvalid { .. })
    }
}

/// Collection and outreach for one requisition
pub struct JobWorker {
    job: JobRequisition,
    ctx: RunContext,
}

impl JobWorker {
    pub fn new(job: JobRequisition, ctx: RunContext) -> Self {
        Self { job, ctx }
    }

    /// Collects for the configured window, then runs outreach
    pub async fn run(self) -> Result<OutreachReport, JobFailure> {
        let candidates = self.collect().await?;
        let report = OutreachSequencer::new(&self.job, &self.ctx)
            .run(candidates)
            .await;
        Ok(report)
    }

    /// Polls until the collection window closes
    ///
    /// The first poll happens one interval after start. A poll still in
    /// flight when the window closes is abandoned. A rejected credential
    /// ends collection immediately; other failures are logged and the next
    /// tick acts as the retry.
    pub async fn collect(&self) -> Result<Vec<RankedCandidate>, JobFailure> {
        let timing = self.ctx.timing;
        let deadline = time::sleep(timing.collection_window);
        tokio::pin!(deadline);

        let mut ticker = time::interval_at(Instant::now() + timing.poll_interval, timing.poll_interval);
        ticker.set_missed_tick_behavior(time::MissedTickBehavior::Delay);

        let mut collected = Vec::new();
        let mut polls = 0usize;

        loop {
            tokio::select! {
                biased;

                _ = &mut deadline => break,

                _ = ticker.tick() => {
                    polls += 1;
                    let polled = tokio::select! {
                        biased;

                        _ = &mut deadline => {
                            debug!("Poll {} for {} cut off by the window", polls, self.job);
                            break;
                        }
                        polled = self.poll_once() => polled,
                    };
                    match polled {
                        Ok(batch) => {
                            debug!("Poll {} for {} queued {} candidate(s)", polls, self.job, batch.len());
                            collected.extend(batch);
                        }
                        Err(PlatformError::SessionInvalid) => {
                            return Err(JobFailure::SessionInvalid {
                                job_id: self.job.job_id.clone(),
                            });
                        }
                        Err(e) => {
                            warn!("Poll {} for {} failed: {}", polls, self.job, e);
                        }
                    }
                }
            }
        }

        info!(
            "Collection window for {} closed after {} poll(s), {} candidate(s) queued",
            self.job,
            polls,
            collected.len()
        );
        Ok(collected)
    }

    /// Fetches one page and keeps the eligible candidates, scored
    async fn poll_once(&self) -> Result<Vec<RankedCandidate>, PlatformError> {
        let page = self.ctx.platform.list_recommended(&self.job.job_id).await?;

        let ranked = page
            .into_iter()
            .filter_map(|candidate| {
                debug!(
                    "Candidate {} expects {}",
                    candidate.profile.name, candidate.profile.expected_position
                );
                let ranked = self.ctx.scorer.rank(candidate, &self.job.job_name)?;
                debug!("Queued {} with weight {}", ranked.name(), ranked.weight);
                Some(ranked)
            })
            .collect();

        Ok(ranked)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::testing::{FakePlatform, Listing, context, recommended};
    use scout_core::domain::candidate::RecommendedCandidate;
    use std::sync::Arc;
    use std::time::Duration;

    fn job() -> JobRequisition {
        JobRequisition::new("job-1", "Backend Engineer")
    }

    fn chatted(id: &str) -> RecommendedCandidate {
        let mut candidate = recommended(id);
        candidate.profile.already_chatted_with_me = true;
        candidate
    }

    #[tokio::test(start_paused = true)]
    async fn test_collects_for_whole_window() {
        let platform = Arc::new(FakePlatform::new().with_listings(
            "job-1",
            vec![
                Listing::Page(vec![recommended("a"), chatted("x")]),
                Listing::Unavailable,
                Listing::Page(vec![recommended("a"), recommended("b")]),
            ],
        ));
        let worker = JobWorker::new(job(), context(platform.clone()));
        let started = Instant::now();

        let collected = worker.collect().await.unwrap();

        // 28s window, 5s interval: polls at 5, 10, 15, 20, 25.
        assert_eq!(platform.list_calls(), 5);
        assert_eq!(started.elapsed(), Duration::from_secs(28));
        let ids: Vec<&str> = collected.iter().map(|c| c.candidate_id()).collect();
        assert_eq!(ids, vec!["a", "a", "b"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stalled_poll_does_not_extend_window() {
        let platform = Arc::new(FakePlatform::new().with_listings(
            "job-1",
            vec![
                Listing::Page(vec![recommended("a")]),
                Listing::Stall(Duration::from_secs(300)),
            ],
        ));
        let worker = JobWorker::new(job(), context(platform.clone()));
        let started = Instant::now();

        let collected = worker.collect().await.unwrap();

        assert_eq!(started.elapsed(), Duration::from_secs(28));
        assert_eq!(platform.list_calls(), 2);
        let ids: Vec<&str> = collected.iter().map(|c| c.candidate_id()).collect();
        assert_eq!(ids, vec!["a"]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_session_invalid_aborts_collection() {
        let platform = Arc::new(FakePlatform::new().with_listings(
            "job-1",
            vec![
                Listing::Page(vec![recommended("a")]),
                Listing::SessionInvalid,
                Listing::Page(vec![recommended("b")]),
            ],
        ));
        let worker = JobWorker::new(job(), context(platform.clone()));

        let result = worker.run().await;

        assert_eq!(
            result.unwrap_err(),
            JobFailure::SessionInvalid {
                job_id: "job-1".to_string()
            }
        );
        assert_eq!(platform.list_calls(), 2);
        assert!(platform.greeted().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_run_greets_after_window() {
        let platform = Arc::new(FakePlatform::new().with_listings(
            "job-1",
            vec![Listing::Page(vec![recommended("a"), recommended("b")])],
        ));
        let ctx = context(platform.clone());
        let worker = JobWorker::new(job(), ctx.clone());

        let report = worker.run().await.unwrap();

        assert_eq!(report.greeted, 2);
        assert_eq!(platform.greeted(), vec!["a", "b"]);
        assert!(ctx.ledger.exists("a"));
        assert!(ctx.ledger.exists("b"));
    }
}
