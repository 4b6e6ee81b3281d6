//! Candidate domain types

use serde::{Deserialize, Serialize};

/// Whether a colleague on the same recruiting account already reached out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ColleagueContact {
    /// No colleague has touched this candidate
    #[default]
    None,

    /// A colleague is linked to the candidate but has not completed contact
    Pending,

    /// A colleague already completed contact; the candidate is theirs
    Completed,
}

/// One entry in a candidate's employment history
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WorkEntry {
    pub company: String,
    pub position: Option<String>,
}

/// Snapshot of a recommended candidate as returned by the platform
///
/// Created fresh on every poll; never cached across polls.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CandidateProfile {
    pub candidate_id: String,
    pub name: String,
    pub degree: String,
    pub school: String,
    pub work_history: Vec<WorkEntry>,
    /// Raw years-of-experience text, e.g. "5年"
    pub work_years: String,
    pub expected_position: String,
    pub application_status: String,
    pub activity: String,
    pub already_chatted_with_me: bool,
    pub colleague_contact: ColleagueContact,
}

impl CandidateProfile {
    /// Candidates already in a conversation with us or fully handled by a
    /// colleague are never scored or contacted.
    pub fn is_contactable(&self) -> bool {
        !self.already_chatted_with_me && self.colleague_contact != ColleagueContact::Completed
    }
}

/// Opaque identifiers the platform needs to address a candidate
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ContactHandles {
    pub encrypted_id: String,
    pub list_id: String,
    pub security_token: String,
    pub expectation_id: i64,
}

/// A candidate as listed in a recommendation page
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RecommendedCandidate {
    pub profile: CandidateProfile,
    pub handles: ContactHandles,
}

/// A scored candidate waiting for outreach
///
/// The weight is fixed when the candidate is scored and never recomputed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedCandidate {
    pub profile: CandidateProfile,
    pub handles: ContactHandles,
    pub weight: u32,
}

impl RankedCandidate {
    pub fn candidate_id(&self) -> &str {
        &self.profile.candidate_id
    }

    pub fn name(&self) -> &str {
        &self.profile.name
    }
}
