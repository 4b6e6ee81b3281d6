//! Orchestrator
//!
//! Starts one worker per job at the same time and waits for every worker
//! to finish collection and outreach. Resume retriers spawned along the
//! way are not awaited here; their handles are returned to the caller.
//!
//! A worker failure never affects its siblings. Each worker runs in its own
//! task, so a panic is caught at the join boundary and reported as a
//! failure of that job only.

use std::collections::HashMap;
use std::sync::Arc;

use scout_core::domain::job::JobRequisition;
use tokio::task::{JoinHandle, JoinSet};
use tracing::{Instrument, error, info, info_span, warn};
use uuid::Uuid;

use crate::alert::Alerter;
use crate::context::RunContext;
use crate::scheduler::retrier::ResumeOutcome;
use crate::scheduler::sequencer::OutreachReport;
use crate::scheduler::worker::{JobFailure, JobWorker};

/// Final state of one job
#[derive(Debug)]
pub struct JobOutcome {
    pub job: JobRequisition,
    pub result: Result<OutreachReport, JobFailure>,
}

/// Result of a whole run
#[derive(Debug)]
pub struct RunSummary {
    pub run_id: Uuid,
    pub outcomes: Vec<JobOutcome>,
    /// Retriers still owned by the process; dropping a handle detaches it
    pub retriers: Vec<JoinHandle<ResumeOutcome>>,
}

impl RunSummary {
    pub fn greeted(&self) -> usize {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().ok())
            .map(|r| r.greeted)
            .sum()
    }

    pub fn failed_jobs(&self) -> usize {
        self.outcomes.iter().filter(|o| o.result.is_err()).count()
    }

    /// Whether there was at least one job and none of them finished
    pub fn all_jobs_failed(&self) -> bool {
        !self.outcomes.is_empty() && self.failed_jobs() == self.outcomes.len()
    }
}

/// Fans out one worker per job
pub struct Orchestrator {
    ctx: RunContext,
    alerter: Arc<dyn Alerter>,
}

impl Orchestrator {
    pub fn new(ctx: RunContext, alerter: Arc<dyn Alerter>) -> Self {
        Self { ctx, alerter }
    }

    /// Runs every job to the end of its outreach pass
    ///
    /// Outcomes are listed in completion order. The operator is alerted
    /// once for each job that stopped on a rejected credential.
    pub async fn run(&self, jobs: Vec<JobRequisition>) -> RunSummary {
        let run_id = Uuid::new_v4();
        info!("Starting run {} for {} job(s)", run_id, jobs.len());

        let mut workers = JoinSet::new();
        let mut jobs_by_task = HashMap::new();
        for job in jobs {
            info!("Sourcing for {}", job);
            let span = info_span!("job", job_id = %job.job_id);
            let worker = JobWorker::new(job.clone(), self.ctx.clone());
            let task_job = job.clone();

            let handle = workers.spawn(
                async move {
                    let result = worker.run().await;
                    JobOutcome {
                        job: task_job,
                        result,
                    }
                }
                .instrument(span),
            );
            jobs_by_task.insert(handle.id(), job);
        }

        let mut outcomes = Vec::new();
        let mut retriers = Vec::new();

        while let Some(joined) = workers.join_next().await {
            let mut outcome = match joined {
                Ok(outcome) => outcome,
                Err(e) => {
                    let Some(job) = jobs_by_task.remove(&e.id()) else {
                        error!("Unknown job task failed: {}", e);
                        continue;
                    };
                    let failure = if e.is_panic() {
                        JobFailure::Panicked {
                            job_id: job.job_id.clone(),
                            message: e.to_string(),
                        }
                    } else {
                        JobFailure::Cancelled {
                            job_id: job.job_id.clone(),
                        }
                    };
                    JobOutcome {
                        job,
                        result: Err(failure),
                    }
                }
            };

            match &mut outcome.result {
                Ok(report) => {
                    info!(
                        "Job {} finished: {} greeted, {} failed, {} skipped{}",
                        outcome.job,
                        report.greeted,
                        report.failed,
                        report.skipped,
                        if report.quota_exhausted {
                            " (quota exhausted)"
                        } else {
                            ""
                        }
                    );
                    retriers.append(&mut report.retriers);
                }
                Err(failure) => {
                    error!("Job {} failed: {}", outcome.job, failure);
                    if failure.is_session_invalid() {
                        warn!("Alerting operator about rejected session");
                        self.alerter
                            .notify_operator(&format!(
                                "The recruiting session is no longer valid; sourcing for {} stopped. Log in again and update the cookie file.",
                                outcome.job
                            ))
                            .await;
                    }
                }
            }

            outcomes.push(outcome);
        }

        info!(
            "Run {} complete: {} job(s), {} failed, {} candidate(s) contacted, {} resume retrier(s) pending",
            run_id,
            outcomes.len(),
            outcomes.iter().filter(|o| o.result.is_err()).count(),
            self.ctx.ledger.len(),
            retriers.len()
        );

        RunSummary {
            run_id,
            outcomes,
            retriers,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::testing::{
        FakePlatform, Listing, RecordingAlerter, context, recommended,
    };

    fn outcome<'a>(summary: &'a RunSummary, job_id: &str) -> &'a JobOutcome {
        summary
            .outcomes
            .iter()
            .find(|o| o.job.job_id == job_id)
            .unwrap()
    }

    #[tokio::test(start_paused = true)]
    async fn test_session_failure_is_isolated_and_alerted_once() {
        let platform = Arc::new(
            FakePlatform::new()
                .with_listings("bad", vec![Listing::SessionInvalid])
                .with_listings("good", vec![Listing::Page(vec![recommended("a")])]),
        );
        let alerter = Arc::new(RecordingAlerter::default());
        let orchestrator = Orchestrator::new(context(platform.clone()), alerter.clone());

        let summary = orchestrator
            .run(vec![
                JobRequisition::new("bad", "Data Analyst"),
                JobRequisition::new("good", "Backend Engineer"),
            ])
            .await;

        assert_eq!(summary.outcomes.len(), 2);
        assert_eq!(summary.failed_jobs(), 1);
        assert_eq!(summary.greeted(), 1);
        assert!(matches!(
            outcome(&summary, "bad").result,
            Err(JobFailure::SessionInvalid { .. })
        ));
        assert_eq!(alerter.reasons().len(), 1);
        assert!(alerter.reasons()[0].contains("Data Analyst"));
        assert_eq!(summary.retriers.len(), 1);
        assert!(!summary.all_jobs_failed());
    }

    #[tokio::test(start_paused = true)]
    async fn test_all_jobs_failed_survives_taking_retriers() {
        let platform = Arc::new(
            FakePlatform::new().with_listings("bad", vec![Listing::SessionInvalid]),
        );
        let orchestrator = Orchestrator::new(
            context(platform.clone()),
            Arc::new(RecordingAlerter::default()),
        );

        let summary = orchestrator
            .run(vec![JobRequisition::new("bad", "Data Analyst")])
            .await;

        let all_failed = summary.all_jobs_failed();
        let retriers = summary.retriers;
        assert!(all_failed);
        assert!(retriers.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_panicking_worker_does_not_stop_siblings() {
        let platform = Arc::new(
            FakePlatform::new()
                .with_listings("boom", vec![Listing::Panic])
                .with_listings("good", vec![Listing::Page(vec![recommended("a")])]),
        );
        let alerter = Arc::new(RecordingAlerter::default());
        let orchestrator = Orchestrator::new(context(platform.clone()), alerter.clone());

        let summary = orchestrator
            .run(vec![
                JobRequisition::new("boom", "Designer"),
                JobRequisition::new("good", "Backend Engineer"),
            ])
            .await;

        assert!(matches!(
            outcome(&summary, "boom").result,
            Err(JobFailure::Panicked { .. })
        ));
        assert!(outcome(&summary, "good").result.is_ok());
        assert_eq!(summary.outcomes.len(), 2);
        assert_eq!(summary.failed_jobs(), 1);
        assert!(alerter.reasons().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_candidate_shared_by_jobs_is_greeted_once() {
        let platform = Arc::new(
            FakePlatform::new()
                .with_listings("one", vec![Listing::Page(vec![recommended("shared")])])
                .with_listings("two", vec![Listing::Page(vec![recommended("shared")])]),
        );
        let orchestrator = Orchestrator::new(
            context(platform.clone()),
            Arc::new(RecordingAlerter::default()),
        );

        let summary = orchestrator
            .run(vec![
                JobRequisition::new("one", "Backend Engineer"),
                JobRequisition::new("two", "Platform Engineer"),
            ])
            .await;

        assert_eq!(platform.greeted(), vec!["shared"]);
        assert_eq!(summary.greeted(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_no_jobs() {
        let platform = Arc::new(FakePlatform::new());
        let orchestrator =
            Orchestrator::new(context(platform), Arc::new(RecordingAlerter::default()));

        let summary = orchestrator.run(Vec::new()).await;

        assert!(summary.outcomes.is_empty());
        assert!(summary.retriers.is_empty());
        assert!(!summary.all_jobs_failed());
    }
}
