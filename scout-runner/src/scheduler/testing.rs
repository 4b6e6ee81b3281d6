//! Scripted fakes for scheduler tests

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use scout_client::{PlatformError, RecruitingPlatform, Result};
use scout_core::domain::candidate::{
    CandidateProfile, ContactHandles, RankedCandidate, RecommendedCandidate,
};
use scout_core::scoring::Scorer;

use crate::alert::Alerter;
use crate::context::{RunContext, Timing};

/// One scripted answer to a recommendation poll
#[derive(Debug, Clone)]
pub enum Listing {
    Page(Vec<RecommendedCandidate>),
    SessionInvalid,
    Unavailable,
    /// Answers with an empty page after the given delay
    Stall(Duration),
    Panic,
}

/// One scripted answer to a greeting or resume request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reply {
    Ok,
    Quota,
    SessionInvalid,
    FriendPending,
    Unavailable,
    /// The request fails before any response arrives
    Unreachable,
}

impl Reply {
    fn into_result(self) -> Result<()> {
        match self {
            Reply::Ok => Ok(()),
            Reply::Quota => Err(PlatformError::QuotaExceeded),
            Reply::SessionInvalid => Err(PlatformError::SessionInvalid),
            Reply::FriendPending => Err(PlatformError::FriendRelationPending),
            Reply::Unavailable => Err(PlatformError::api_error(502, "bad gateway")),
            Reply::Unreachable => Err(unsent_request_error()),
        }
    }
}

/// A genuine `reqwest` failure raised before anything is sent
fn unsent_request_error() -> PlatformError {
    let err = reqwest::Client::new()
        .get("not a url")
        .build()
        .unwrap_err();
    PlatformError::RequestFailed(err)
}

/// In-memory platform answering from scripts
///
/// Greetings and resume requests are keyed by security token. Unscripted
/// calls succeed; exhausted listing scripts return empty pages.
#[derive(Default)]
pub struct FakePlatform {
    listings: Mutex<HashMap<String, VecDeque<Listing>>>,
    greet_replies: Mutex<HashMap<String, Reply>>,
    resume_replies: Mutex<HashMap<String, VecDeque<Reply>>>,
    list_calls: AtomicUsize,
    greeted: Mutex<Vec<String>>,
    resume_requests: Mutex<Vec<String>>,
}

impl FakePlatform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_listings(self, job_id: &str, listings: Vec<Listing>) -> Self {
        self.listings
            .lock()
            .unwrap()
            .insert(job_id.to_string(), listings.into());
        self
    }

    pub fn with_greet_reply(self, token: &str, reply: Reply) -> Self {
        self.greet_replies
            .lock()
            .unwrap()
            .insert(token.to_string(), reply);
        self
    }

    pub fn with_resume_replies(self, token: &str, replies: Vec<Reply>) -> Self {
        self.resume_replies
            .lock()
            .unwrap()
            .insert(token.to_string(), replies.into());
        self
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    /// Security tokens of every greeting attempt, in call order
    pub fn greeted(&self) -> Vec<String> {
        self.greeted.lock().unwrap().clone()
    }

    pub fn resume_requests(&self) -> Vec<String> {
        self.resume_requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl RecruitingPlatform for FakePlatform {
    async fn list_recommended(&self, job_id: &str) -> Result<Vec<RecommendedCandidate>> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        let next = self
            .listings
            .lock()
            .unwrap()
            .get_mut(job_id)
            .and_then(|script| script.pop_front());

        match next {
            None => Ok(Vec::new()),
            Some(Listing::Page(page)) => Ok(page),
            Some(Listing::SessionInvalid) => Err(PlatformError::SessionInvalid),
            Some(Listing::Unavailable) => Err(PlatformError::api_error(503, "unavailable")),
            Some(Listing::Stall(delay)) => {
                tokio::time::sleep(delay).await;
                Ok(Vec::new())
            }
            Some(Listing::Panic) => panic!("scripted listing panic"),
        }
    }

    async fn send_greeting(&self, _job_id: &str, handles: &ContactHandles) -> Result<()> {
        self.greeted
            .lock()
            .unwrap()
            .push(handles.security_token.clone());
        let reply = self
            .greet_replies
            .lock()
            .unwrap()
            .get(&handles.security_token)
            .copied()
            .unwrap_or(Reply::Ok);
        reply.into_result()
    }

    async fn request_resume(&self, security_token: &str) -> Result<()> {
        self.resume_requests
            .lock()
            .unwrap()
            .push(security_token.to_string());
        let reply = self
            .resume_replies
            .lock()
            .unwrap()
            .get_mut(security_token)
            .and_then(|script| script.pop_front())
            .unwrap_or(Reply::Ok);
        reply.into_result()
    }

    async fn accept_resume(&self, _message_id: &str, _security_token: &str) -> Result<()> {
        Ok(())
    }
}

/// Alerter remembering every reason it was given
#[derive(Default)]
pub struct RecordingAlerter {
    reasons: Mutex<Vec<String>>,
}

impl RecordingAlerter {
    pub fn reasons(&self) -> Vec<String> {
        self.reasons.lock().unwrap().clone()
    }
}

#[async_trait]
impl Alerter for RecordingAlerter {
    async fn notify_operator(&self, reason: &str) {
        self.reasons.lock().unwrap().push(reason.to_string());
    }
}

pub fn timing() -> Timing {
    Timing {
        collection_window: Duration::from_secs(28),
        poll_interval: Duration::from_secs(5),
        pacing_delay: Duration::from_secs(5),
        resume_retry_interval: Duration::from_secs(60),
    }
}

pub fn context(platform: Arc<FakePlatform>) -> RunContext {
    RunContext::new(platform, Scorer::default(), timing())
}

/// A listed candidate whose id doubles as every contact handle
pub fn recommended(id: &str) -> RecommendedCandidate {
    RecommendedCandidate {
        profile: CandidateProfile {
            candidate_id: id.to_string(),
            name: format!("candidate {}", id),
            ..Default::default()
        },
        handles: ContactHandles {
            encrypted_id: id.to_string(),
            list_id: id.to_string(),
            security_token: id.to_string(),
            expectation_id: 0,
        },
    }
}

pub fn ranked(id: &str, weight: u32) -> RankedCandidate {
    let candidate = recommended(id);
    RankedCandidate {
        profile: candidate.profile,
        handles: candidate.handles,
        weight,
    }
}
