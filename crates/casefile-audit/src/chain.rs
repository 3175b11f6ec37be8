//! Hash-chain primitives: hashing, appending, and chain verification.
//!
//! Hash input layout (UTF-8, in order):
//!   1. previous entry's hash (64 hex chars, or empty for the first entry)
//!   2. `|`
//!   3. date, `YYYY-MM-DD`
//!   4. `|`
//!   5. event text
//!
//! Because each hash folds in its predecessor, editing, deleting, or
//! reordering any entry invalidates every hash after it.

use chrono::{Local, NaiveDate};
use sha2::{Digest, Sha256};

use casefile_contracts::history::{AuditStatus, HistoryEntry};

/// Compute the SHA-256 link for one entry.
///
/// Returns a lowercase 64-character hex string.
pub fn hash_entry(prev_hash: &str, date: &str, event: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(prev_hash.as_bytes());
    hasher.update(b"|");
    hasher.update(date.as_bytes());
    hasher.update(b"|");
    hasher.update(event.as_bytes());

    hex::encode(hasher.finalize())
}

/// Append `event` dated `date` to `history` and return the new entry.
///
/// Only the last entry is read, for its hash. An empty history chains from
/// the empty string.
pub fn append_entry<'h>(
    history: &'h mut Vec<HistoryEntry>,
    event: &str,
    date: NaiveDate,
) -> &'h HistoryEntry {
    let prev_hash = history.last().map(|e| e.hash.as_str()).unwrap_or("");
    let date = date.format("%Y-%m-%d").to_string();
    let hash = hash_entry(prev_hash, &date, event);

    history.push(HistoryEntry { date, event: event.to_string(), hash });
    &history[history.len() - 1]
}

/// Append `event` stamped with today's local date.
pub fn append<'h>(history: &'h mut Vec<HistoryEntry>, event: &str) -> &'h HistoryEntry {
    append_entry(history, event, Local::now().date_naive())
}

/// Verify the integrity of a history.
///
/// Walks from the first entry, recomputing each hash from the running
/// predecessor and comparing it to the stored value. Returns `false` at the
/// first mismatch. An empty history is valid.
pub fn verify_chain(history: &[HistoryEntry]) -> bool {
    let mut prev_hash = String::new();

    for entry in history {
        let recomputed = hash_entry(&prev_hash, &entry.date, &entry.event);
        if entry.hash != recomputed {
            return false;
        }
        prev_hash = recomputed;
    }

    true
}

/// Classify a history for display.
///
/// Any unhashed entry makes the whole chain `Unverifiable`: it cannot be
/// told apart from an entry whose hash was stripped.
pub fn chain_status(history: &[HistoryEntry]) -> AuditStatus {
    if history.iter().any(HistoryEntry::is_unhashed) {
        AuditStatus::Unverifiable
    } else if verify_chain(history) {
        AuditStatus::Valid
    } else {
        AuditStatus::Invalid
    }
}
