//! Outreach sequencer
//!
//! Greets one job's collected candidates strictly in ranked order, one at
//! a time, with a fixed pause between greetings. The daily quota is shared
//! by the whole account, so the first quota refusal ends the pass.
//!
//! A candidate is recorded as contacted after any greeting attempt that
//! was not refused for quota, including attempts that failed in transit.
//! A missed contact is preferred over a duplicate message.

use scout_client::PlatformError;
use scout_core::domain::candidate::RankedCandidate;
use scout_core::domain::job::JobRequisition;
use scout_core::scoring::sort_by_weight;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::context::RunContext;
use crate::scheduler::retrier::{ResumeOutcome, ResumeRetrier};

/// What one outreach pass did
#[derive(Debug, Default)]
pub struct OutreachReport {
    /// Greetings the platform accepted
    pub greeted: usize,

    /// Greetings that failed for reasons other than quota
    pub failed: usize,

    /// Candidates skipped because they were already contacted
    pub skipped: usize,

    /// Candidates never reached because the quota ran out
    pub unprocessed: usize,

    pub quota_exhausted: bool,

    /// Resume retriers started for greeted candidates
    pub retriers: Vec<JoinHandle<ResumeOutcome>>,
}

/// Sequential greeter for one job
pub struct OutreachSequencer<'a> {
    job: &'a JobRequisition,
    ctx: &'a RunContext,
}

impl<'a> OutreachSequencer<'a> {
    pub fn new(job: &'a JobRequisition, ctx: &'a RunContext) -> Self {
        Self { job, ctx }
    }

    /// Ranks the candidates and greets them in order
    pub async fn run(&self, mut candidates: Vec<RankedCandidate>) -> OutreachReport {
        sort_by_weight(&mut candidates);
        info!(
            "Starting outreach for {} with {} candidate(s)",
            self.job,
            candidates.len()
        );

        let mut report = OutreachReport::default();
        let mut attempted_any = false;

        for (index, candidate) in candidates.iter().enumerate() {
            if let Some(at) = self.ctx.ledger.contacted_at(candidate.candidate_id()) {
                debug!("Skipping {}: already contacted at {}", candidate.name(), at);
                report.skipped += 1;
                continue;
            }

            if attempted_any {
                tokio::time::sleep(self.ctx.timing.pacing_delay).await;
            }

            // Another job may have started greeting the same candidate.
            let Some(claim) = self.ctx.ledger.claim(candidate.candidate_id()) else {
                debug!("Skipping {}: contacted by another job", candidate.name());
                report.skipped += 1;
                continue;
            };
            attempted_any = true;

            info!(
                "Greeting {} for {} (weight {})",
                candidate.name(),
                self.job.job_name,
                candidate.weight
            );

            match self
                .ctx
                .platform
                .send_greeting(&self.job.job_id, &candidate.handles)
                .await
            {
                Ok(()) => {
                    claim.mark();
                    report.greeted += 1;
                    report.retriers.push(self.start_retrier(candidate));
                }
                Err(PlatformError::QuotaExceeded) => {
                    drop(claim);
                    report.quota_exhausted = true;
                    report.unprocessed = candidates.len() - index;
                    warn!(
                        "Daily outreach quota reached; stopping {} with {} candidate(s) left",
                        self.job, report.unprocessed
                    );
                    break;
                }
                Err(e) => {
                    claim.mark();
                    report.failed += 1;
                    warn!(
                        "Greeting {} ({}) failed, not retrying: {}",
                        candidate.name(),
                        candidate.candidate_id(),
                        e
                    );
                }
            }
        }

        info!(
            "Outreach for {} done: {} greeted, {} failed, {} skipped",
            self.job, report.greeted, report.failed, report.skipped
        );
        report
    }

    fn start_retrier(&self, candidate: &RankedCandidate) -> JoinHandle<ResumeOutcome> {
        ResumeRetrier::new(
            self.ctx.platform.clone(),
            candidate.name(),
            candidate.handles.security_token.clone(),
            self.ctx.timing.resume_retry_interval,
        )
        .spawn()
    }
}
