//! Candidate scoring
//!
//! A fixed, additive rubric. Each rule is independent and only ever adds
//! points, so a candidate's weight is non-negative and never decreases
//! while rules are applied. Scoring is pure: no I/O, no clock, no state.

use serde::Serialize;

use crate::domain::candidate::{CandidateProfile, RankedCandidate, RecommendedCandidate};
use crate::reference::ReferenceLists;

// Markers as the platform renders them.
pub const DEGREE_BACHELOR: &str = "本科";
pub const DEGREE_MASTER: &str = "硕士";
pub const YEARS_SUFFIX: char = '年';
pub const STATUS_NOT_CONSIDERING: &str = "暂不考虑";
pub const STATUS_WITHIN_MONTH: &str = "月内到岗";
pub const STATUS_DEPARTED: &str = "离职";
pub const ACTIVE_TODAY: &str = "今日活跃";
pub const ACTIVE_JUST_NOW: &str = "刚刚活跃";

/// Minimum years of experience that earn points
pub const EXPERIENCED_YEARS: i64 = 3;

/// A rubric rule that matched
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Rule {
    Bachelor,
    Master,
    School211,
    School985,
    GoodCompany,
    Experienced,
    NotConsidering,
    AvailableWithinMonth,
    Departed,
    PositionMatch,
    ActiveToday,
    ActiveJustNow,
}

impl Rule {
    pub fn points(self) -> u32 {
        match self {
            Rule::Bachelor => 2,
            Rule::Master => 3,
            Rule::School211 => 2,
            Rule::School985 => 3,
            Rule::GoodCompany => 3,
            Rule::Experienced => 2,
            Rule::NotConsidering => 1,
            Rule::AvailableWithinMonth => 2,
            Rule::Departed => 3,
            Rule::PositionMatch => 3,
            Rule::ActiveToday => 2,
            Rule::ActiveJustNow => 3,
        }
    }
}

/// Outcome of scoring one candidate against one job
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Score {
    pub eligible: bool,
    pub weight: u32,
    pub matched: Vec<Rule>,
}

impl Score {
    fn ineligible() -> Self {
        Self {
            eligible: false,
            weight: 0,
            matched: Vec::new(),
        }
    }
}

/// Parses "5年" style experience text; anything unparsable yields `None`
pub fn parse_work_years(raw: &str) -> Option<i64> {
    raw.trim().trim_end_matches(YEARS_SUFFIX).trim().parse().ok()
}

/// Applies the rubric using a fixed set of reference lists
#[derive(Debug, Clone, Default)]
pub struct Scorer {
    lists: ReferenceLists,
}

impl Scorer {
    pub fn new(lists: ReferenceLists) -> Self {
        Self { lists }
    }

    pub fn lists(&self) -> &ReferenceLists {
        &self.lists
    }

    /// Scores a profile against the target job name
    pub fn score(&self, profile: &CandidateProfile, job_name: &str) -> Score {
        if !profile.is_contactable() {
            return Score::ineligible();
        }

        let mut matched = Vec::new();

        if profile.degree == DEGREE_BACHELOR {
            matched.push(Rule::Bachelor);
        }
        if profile.degree == DEGREE_MASTER {
            matched.push(Rule::Master);
        }
        if self.lists.schools_211.matches(&profile.school) {
            matched.push(Rule::School211);
        }
        if self.lists.schools_985.matches(&profile.school) {
            matched.push(Rule::School985);
        }
        if profile
            .work_history
            .iter()
            .any(|w| self.lists.good_companies.matches(&w.company))
        {
            matched.push(Rule::GoodCompany);
        }
        if parse_work_years(&profile.work_years).is_some_and(|years| years >= EXPERIENCED_YEARS) {
            matched.push(Rule::Experienced);
        }

        let status = &profile.application_status;
        if status.contains(STATUS_NOT_CONSIDERING) {
            matched.push(Rule::NotConsidering);
        }
        if status.contains(STATUS_WITHIN_MONTH) {
            matched.push(Rule::AvailableWithinMonth);
        }
        if status.contains(STATUS_DEPARTED) {
            matched.push(Rule::Departed);
        }

        let expected = profile.expected_position.to_lowercase();
        if job_name.to_lowercase().contains(&expected) {
            matched.push(Rule::PositionMatch);
        }

        if profile.activity.contains(ACTIVE_TODAY) {
            matched.push(Rule::ActiveToday);
        }
        if profile.activity.contains(ACTIVE_JUST_NOW) {
            matched.push(Rule::ActiveJustNow);
        }

        let weight = matched.iter().map(|rule| rule.points()).sum();
        Score {
            eligible: true,
            weight,
            matched,
        }
    }

    /// Scores a listed candidate, returning it ranked only when eligible
    ///
    /// Candidates without an identifier are dropped: they could not be
    /// told apart in the contact ledger.
    pub fn rank(&self, candidate: RecommendedCandidate, job_name: &str) -> Option<RankedCandidate> {
        if candidate.profile.candidate_id.is_empty() {
            tracing::warn!(
                candidate = %candidate.profile.name,
                "Dropping listed candidate without an id"
            );
            return None;
        }
        let score = self.score(&candidate.profile, job_name);
        if !score.eligible {
            return None;
        }
        tracing::trace!(
            candidate = %candidate.profile.name,
            weight = score.weight,
            rules = ?score.matched,
            "Scored candidate"
        );
        Some(RankedCandidate {
            profile: candidate.profile,
            handles: candidate.handles,
            weight: score.weight,
        })
    }
}

/// Orders candidates by descending weight, keeping arrival order on ties
pub fn sort_by_weight(candidates: &mut [RankedCandidate]) {
    // slice::sort_by is stable
    candidates.sort_by(|a, b| b.weight.cmp(&a.weight));
}
