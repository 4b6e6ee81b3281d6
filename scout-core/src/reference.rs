//! Reference data
//!
//! Static allow-lists used by the scorer (985 schools, 211 schools, good
//! companies) and the job requisition list, plus parsers for the flat
//! text files they are loaded from.

use std::collections::BTreeMap;
use std::path::Path;

use thiserror::Error;

use crate::domain::job::JobRequisition;

/// Separator between job id and job name in the jobs file
pub const JOB_LINE_SEPARATOR: &str = "//";

/// Errors raised while loading reference files
#[derive(Debug, Error)]
pub enum ReferenceError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{path} contains no usable entries")]
    Empty { path: String },
}

/// A list of names matched loosely against candidate fields
///
/// A value matches when either it or an entry contains the other, ignoring
/// case. This tolerates abbreviations and suffixes in the lists at the cost
/// of some false positives: an empty value is contained in every entry and
/// so matches any non-empty list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AllowList {
    /// Trimmed and lowercased
    entries: Vec<String>,
}

impl AllowList {
    pub fn new<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            entries: entries
                .into_iter()
                .map(|e| e.as_ref().trim().to_lowercase())
                .filter(|e| !e.is_empty())
                .collect(),
        }
    }

    /// Parses one entry per line, skipping blank lines
    pub fn parse(text: &str) -> Self {
        Self::new(text.lines())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Loose, case-insensitive, two-way substring match
    pub fn matches(&self, value: &str) -> bool {
        let value = value.to_lowercase();
        self.entries
            .iter()
            .any(|entry| entry.contains(&value) || value.contains(entry.as_str()))
    }
}

/// The allow-lists consulted by the scorer
#[derive(Debug, Clone, Default)]
pub struct ReferenceLists {
    pub schools_985: AllowList,
    pub schools_211: AllowList,
    pub good_companies: AllowList,
}

/// Parses the jobs file
///
/// Each line is `<jobId> // <jobName>`. A line with an id but no separator
/// keeps an empty name. Lines without an id are skipped. A repeated id
/// keeps the last name seen.
pub fn parse_jobs(text: &str) -> Vec<JobRequisition> {
    let mut jobs: BTreeMap<String, String> = BTreeMap::new();
    let mut order = Vec::new();

    for line in text.lines() {
        let (id, name) = match line.split_once(JOB_LINE_SEPARATOR) {
            Some((id, name)) => (id.trim(), name.trim()),
            None => (line.trim(), ""),
        };
        if id.is_empty() {
            continue;
        }
        if jobs.insert(id.to_string(), name.to_string()).is_none() {
            order.push(id.to_string());
        }
    }

    order
        .into_iter()
        .filter_map(|id| {
            let name = jobs.remove(&id)?;
            Some(JobRequisition::new(id, name))
        })
        .collect()
}

fn read(path: &Path) -> Result<String, ReferenceError> {
    std::fs::read_to_string(path).map_err(|source| ReferenceError::Read {
        path: path.display().to_string(),
        source,
    })
}

/// Loads an allow-list file; an empty list is allowed but logged
pub fn load_allow_list(path: &Path) -> Result<AllowList, ReferenceError> {
    let list = AllowList::parse(&read(path)?);
    if list.is_empty() {
        tracing::warn!("Allow-list {} is empty", path.display());
    }
    Ok(list)
}

/// Loads the jobs file; at least one requisition is required
pub fn load_jobs(path: &Path) -> Result<Vec<JobRequisition>, ReferenceError> {
    let jobs = parse_jobs(&read(path)?);
    if jobs.is_empty() {
        return Err(ReferenceError::Empty {
            path: path.display().to_string(),
        });
    }
    Ok(jobs)
}
