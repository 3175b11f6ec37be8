//! Audit trail entry and status types.

use serde::{Deserialize, Serialize};

/// One immutable line in a record's audit trail.
///
/// `hash` is the lowercase hex SHA-256 of
/// `previous hash | date | event`. Entries written before hashing existed
/// carry no hash; they deserialize with an empty string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Calendar date, `YYYY-MM-DD`.
    pub date: String,
    /// Free-text description of what happened.
    pub event: String,
    #[serde(default)]
    pub hash: String,
}

impl HistoryEntry {
    /// True when the entry predates hash tracking.
    pub fn is_unhashed(&self) -> bool {
        self.hash.is_empty()
    }
}

/// Result of checking a record's audit trail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditStatus {
    /// Every entry matches its recomputed hash.
    Valid,
    /// At least one entry fails recomputation.
    Invalid,
    /// Some entry has no hash, so the chain cannot be checked.
    Unverifiable,
}

impl AuditStatus {
    pub fn label(&self) -> &'static str {
        match self {
            AuditStatus::Valid => "Valid",
            AuditStatus::Invalid => "Invalid",
            AuditStatus::Unverifiable => "Unverifiable",
        }
    }
}

/// How legacy, unhashed history is treated when records are imported.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MigrationMode {
    /// Leave history untouched. Records with unhashed entries report
    /// `AuditStatus::Unverifiable`.
    #[default]
    Strict,
    /// Recompute missing or incorrect hashes in place. Every rewrite is
    /// logged.
    Backfill,
}
