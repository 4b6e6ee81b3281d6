//! Resume retrier
//!
//! After a greeting, the platform refuses resume requests until the
//! candidate replies. A retrier keeps asking on a fixed interval until the
//! platform answers with anything other than "relation pending". A request
//! that got no answer at all is retried on the next tick; a bad status or
//! unreadable body is an answer and ends the retrier. It has no attempt
//! limit and no deadline; it lives as long as the process.

use std::sync::Arc;
use std::time::Duration;

use scout_client::{PlatformError, RecruitingPlatform};
use tokio::time::{self, Instant};
use tracing::{debug, info, warn};

/// How a retrier ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResumeOutcome {
    /// The platform accepted the resume request
    Requested { attempts: u32 },

    /// The platform answered with a failure other than "relation pending"
    Abandoned { attempts: u32, reason: String },
}

/// Periodic resume requester for one contacted candidate
pub struct ResumeRetrier {
    platform: Arc<dyn RecruitingPlatform>,
    candidate_name: String,
    security_token: String,
    interval: Duration,
}

impl ResumeRetrier {
    pub fn new(
        platform: Arc<dyn RecruitingPlatform>,
        candidate_name: impl Into<String>,
        security_token: impl Into<String>,
        interval: Duration,
    ) -> Self {
        Self {
            platform,
            candidate_name: candidate_name.into(),
            security_token: security_token.into(),
            interval,
        }
    }

    /// Spawns the retry loop as a detached task
    ///
    /// Dropping the handle does not stop the task.
    pub fn spawn(self) -> tokio::task::JoinHandle<ResumeOutcome> {
        tokio::spawn(self.run())
    }

    /// Requests the resume every interval, first one interval from now
    pub async fn run(self) -> ResumeOutcome {
        let mut ticker = time::interval_at(Instant::now() + self.interval, self.interval);
        ticker.set_missed_tick_behavior(time::MissedTickBehavior::Delay);
        let mut attempts = 0;

        loop {
            ticker.tick().await;
            attempts += 1;

            match self.platform.request_resume(&self.security_token).await {
                Ok(()) => {
                    info!(
                        "Resume requested from {} after {} attempt(s)",
                        self.candidate_name, attempts
                    );
                    return ResumeOutcome::Requested { attempts };
                }
                Err(PlatformError::FriendRelationPending) => {
                    debug!("{} has not replied yet (attempt {})", self.candidate_name, attempts);
                }
                Err(e) if e.is_unanswered() => {
                    warn!(
                        "Resume request for {} failed to send: {}",
                        self.candidate_name, e
                    );
                }
                Err(e) => {
                    warn!(
                        "Giving up resume requests for {} after {} attempt(s): {}",
                        self.candidate_name, attempts, e
                    );
                    return ResumeOutcome::Abandoned {
                        attempts,
                        reason: e.to_string(),
                    };
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::testing::{FakePlatform, Reply};

    #[tokio::test(start_paused = true)]
    async fn test_retries_until_relation_established() {
        let platform = Arc::new(FakePlatform::new().with_resume_replies(
            "tok",
            vec![Reply::FriendPending, Reply::FriendPending, Reply::Ok],
        ));
        let started = Instant::now();

        let outcome = ResumeRetrier::new(platform.clone(), "Li", "tok", Duration::from_secs(60))
            .run()
            .await;

        assert_eq!(outcome, ResumeOutcome::Requested { attempts: 3 });
        assert_eq!(platform.resume_requests().len(), 3);
        assert_eq!(started.elapsed(), Duration::from_secs(180));
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_request_waits_one_interval() {
        let platform = Arc::new(FakePlatform::new());
        let started = Instant::now();

        let outcome = ResumeRetrier::new(platform, "Li", "tok", Duration::from_secs(60))
            .run()
            .await;

        assert_eq!(outcome, ResumeOutcome::Requested { attempts: 1 });
        assert_eq!(started.elapsed(), Duration::from_secs(60));
    }

    #[tokio::test(start_paused = true)]
    async fn test_stops_on_other_failure() {
        let platform = Arc::new(FakePlatform::new().with_resume_replies(
            "tok",
            vec![Reply::FriendPending, Reply::Unavailable, Reply::Ok],
        ));

        let outcome = ResumeRetrier::new(platform.clone(), "Li", "tok", Duration::from_secs(60))
            .run()
            .await;

        assert!(matches!(outcome, ResumeOutcome::Abandoned { attempts: 2, .. }));
        assert_eq!(platform.resume_requests().len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_keeps_going_when_request_gets_no_answer() {
        let platform = Arc::new(FakePlatform::new().with_resume_replies(
            "tok",
            vec![Reply::Unreachable, Reply::FriendPending, Reply::Unreachable, Reply::Ok],
        ));
        let started = Instant::now();

        let outcome = ResumeRetrier::new(platform.clone(), "Li", "tok", Duration::from_secs(60))
            .run()
            .await;

        assert_eq!(outcome, ResumeOutcome::Requested { attempts: 4 });
        assert_eq!(platform.resume_requests().len(), 4);
        assert_eq!(started.elapsed(), Duration::from_secs(240));
    }

    #[tokio::test(start_paused = true)]
    async fn test_spawned_retrier_runs_detached() {
        let platform = Arc::new(
            FakePlatform::new().with_resume_replies("tok", vec![Reply::FriendPending]),
        );
        let handle =
            ResumeRetrier::new(platform.clone(), "Li", "tok", Duration::from_secs(60)).spawn();

        assert_eq!(
            handle.await.unwrap(),
            ResumeOutcome::Requested { attempts: 2 }
        );
    }
}
