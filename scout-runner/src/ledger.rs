//! Dedup ledger
//!
//! Process-wide record of candidates that have already been contacted.
//! Shared by every job's outreach sequencer so a candidate recommended for
//! several jobs is greeted only once per run.
//!
//! Records are write-once and never removed. To stop two jobs greeting the
//! same candidate at the same moment, a sequencer first takes a
//! [`ContactClaim`]; the claim either becomes a permanent record through
//! [`ContactClaim::mark`] or is released when dropped.

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

/// Concurrent set of contacted candidate identifiers
#[derive(Debug, Default)]
pub struct DedupLedger {
    contacted: DashMap<String, DateTime<Utc>>,
    in_flight: DashMap<String, ()>,
}

impl DedupLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the candidate has been recorded as contacted
    pub fn exists(&self, candidate_id: &str) -> bool {
        self.contacted.contains_key(candidate_id)
    }

    /// Records the candidate as contacted
    ///
    /// Returns `false` if it was already recorded; the original timestamp
    /// is kept.
    pub fn mark(&self, candidate_id: &str) -> bool {
        match self.contacted.entry(candidate_id.to_string()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(Utc::now());
                true
            }
        }
    }

    /// When the candidate was recorded, if at all
    pub fn contacted_at(&self, candidate_id: &str) -> Option<DateTime<Utc>> {
        self.contacted.get(candidate_id).map(|at| *at)
    }

    /// Reserves a candidate for a greeting attempt
    ///
    /// Returns `None` if the candidate is already recorded or another
    /// sequencer currently holds a claim on it.
    pub fn claim(&self, candidate_id: &str) -> Option<ContactClaim<'_>> {
        if self.exists(candidate_id) {
            return None;
        }
        match self.in_flight.entry(candidate_id.to_string()) {
            Entry::Occupied(_) => None,
            Entry::Vacant(slot) => {
                slot.insert(());
                // A mark may have landed between the check and the insert.
                if self.exists(candidate_id) {
                    self.in_flight.remove(candidate_id);
                    return None;
                }
                Some(ContactClaim {
                    ledger: self,
                    candidate_id: candidate_id.to_string(),
                })
            }
        }
    }

    /// Number of contacted candidates
    pub fn len(&self) -> usize {
        self.contacted.len()
    }
}

/// Exclusive, temporary reservation of one candidate
#[derive(Debug)]
pub struct ContactClaim<'a> {
    ledger: &'a DedupLedger,
    candidate_id: String,
}

impl ContactClaim<'_> {
    /// Turns the claim into a permanent contact record
    pub fn mark(self) {
        self.ledger.mark(&self.candidate_id);
        // Drop releases the in-flight entry after the record exists.
    }
}

impl Drop for ContactClaim<'_> {
    fn drop(&mut self) {
        self.ledger.in_flight.remove(&self.candidate_id);
    }
}
