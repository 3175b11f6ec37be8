//! One-time upgrade of history written before hashing existed.
//!
//! Backfill recomputes the chain from the first entry and overwrites every
//! missing or incorrect hash. The result always verifies, including for
//! event text that was altered before the backfill ran, so this must stay an
//! explicit, logged step and never run on ordinary loads.

use tracing::warn;

use casefile_contracts::history::HistoryEntry;
use casefile_core::traits::BackfillReport;

use crate::chain::hash_entry;

/// Rewrite missing or incorrect hashes in place.
pub fn backfill(history: &mut [HistoryEntry]) -> BackfillReport {
    let mut report = BackfillReport::default();
    let mut prev_hash = String::new();

    for (position, entry) in history.iter_mut().enumerate() {
        let recomputed = hash_entry(&prev_hash, &entry.date, &entry.event);
        if entry.hash != recomputed {
            warn!(
                position,
                date = %entry.date,
                had_hash = !entry.hash.is_empty(),
                "backfilling audit hash"
            );
            entry.hash = recomputed.clone();
            report.rewritten.push(position);
        }
        prev_hash = recomputed;
    }

    report
}
