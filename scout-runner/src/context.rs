//! Run context
//!
//! Everything a job worker shares with its siblings, built once by `main`
//! and handed to the orchestrator. Cloning is cheap: all shared state sits
//! behind `Arc`.

use std::sync::Arc;
use std::time::Duration;

use scout_client::RecruitingPlatform;
use scout_core::scoring::Scorer;

use crate::config::Config;
use crate::ledger::DedupLedger;

/// Pacing of the outreach engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    pub collection_window: Duration,
    pub poll_interval: Duration,
    pub pacing_delay: Duration,
    pub resume_retry_interval: Duration,
}

impl From<&Config> for Timing {
    fn from(config: &Config) -> Self {
        Self {
            collection_window: config.collection_window,
            poll_interval: config.poll_interval,
            pacing_delay: config.pacing_delay,
            resume_retry_interval: config.resume_retry_interval,
        }
    }
}

/// Shared state for one sourcing run
#[derive(Clone)]
pub struct RunContext {
    pub platform: Arc<dyn RecruitingPlatform>,
    pub scorer: Arc<Scorer>,
    pub ledger: Arc<DedupLedger>,
    pub timing: Timing,
}

impl RunContext {
    pub fn new(platform: Arc<dyn RecruitingPlatform>, scorer: Scorer, timing: Timing) -> Self {
        Self {
            platform,
            scorer: Arc::new(scorer),
            ledger: Arc::new(DedupLedger::new()),
            timing,
        }
    }
}
