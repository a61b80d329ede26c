use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Outcome of one unit of validation work.
///
/// `Skip` is distinct from `Fail`: it signals that a prerequisite upstream
/// step produced no usable input, so the unit could not be evaluated at
/// all. Every non-Pass verdict carries a reason naming the offending value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", content = "reason", rename_all = "lowercase")]
pub enum Verdict {
    Pass,
    Fail(String),
    Skip(String),
}

impl Verdict {
    pub fn is_pass(&self) -> bool {
        matches!(self, Verdict::Pass)
    }

    pub fn is_fail(&self) -> bool {
        matches!(self, Verdict::Fail(_))
    }

    pub fn is_skip(&self) -> bool {
        matches!(self, Verdict::Skip(_))
    }

    pub fn reason(&self) -> Option<&str> {
        match self {
            Verdict::Pass => None,
            Verdict::Fail(reason) | Verdict::Skip(reason) => Some(reason),
        }
    }
}

/// Verdict for one record within an entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordReport {
    pub index: usize,
    pub verdict: Verdict,
}

/// Verdict tree for one manifest entry.
///
/// The entry verdict reports whether the entry's own machinery (fields,
/// profile lookup, URL, fetch, split) succeeded; record verdicts are
/// independent of it and of each other.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryReport {
    pub index: usize,
    pub profile_name: Option<String>,
    pub content_url: Option<String>,
    pub verdict: Verdict,
    pub records: Vec<RecordReport>,
}

impl EntryReport {
    /// Terminal entry report for a failure before any record was evaluated.
    pub(crate) fn failed(
        index: usize,
        profile_name: Option<String>,
        content_url: Option<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self {
            index,
            profile_name,
            content_url,
            verdict: Verdict::Fail(reason.into()),
            records: Vec::new(),
        }
    }
}

/// Full result of one validation run, consumed by the reporting layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub manifest_fetch: Verdict,
    pub manifest_structure: Verdict,
    pub entries: Vec<EntryReport>,
}

impl ValidationReport {
    /// True when any verdict in the tree is a Fail.
    pub fn has_failures(&self) -> bool {
        self.manifest_fetch.is_fail()
            || self.manifest_structure.is_fail()
            || self.entries.iter().any(|entry| {
                entry.verdict.is_fail()
                    || entry.records.iter().any(|record| record.verdict.is_fail())
            })
    }

    /// Total number of records evaluated across all entries.
    pub fn record_count(&self) -> usize {
        self.entries.iter().map(|entry| entry.records.len()).sum()
    }
}
