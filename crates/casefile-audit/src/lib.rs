//! # casefile-audit
//!
//! Append-only, SHA-256 hash-chained audit trail for casefile records.
//!
//! ## Overview
//!
//! Every event in a record's history carries
//! `SHA256(prev_hash | date | event)`. Editing any entry, or reordering or
//! deleting one, breaks every later hash, which `verify_chain` detects.
//! Verification is a detection mechanism only; nothing is repaired unless
//! the caller explicitly runs `backfill`.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use casefile_audit::{append, verify_chain};
//!
//! append(&mut complaint.history, "Status updated: Filed");
//! assert!(verify_chain(&complaint.history));
//! ```

pub mod chain;
pub mod migrate;
pub mod trail;

pub use chain::{append, append_entry, chain_status, hash_entry, verify_chain};
pub use migrate::backfill;
pub use trail::Sha256AuditTrail;

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use casefile_contracts::history::{AuditStatus, HistoryEntry};
    use casefile_core::traits::AuditTrail;

    use super::{append, append_entry, backfill, chain_status, hash_entry, verify_chain, Sha256AuditTrail};

    // ── Helpers ───────────────────────────────────────────────────────────────

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, d).unwrap()
    }

    /// Build a valid chain of `n` distinguishable events.
    fn make_chain(n: usize) -> Vec<HistoryEntry> {
        let mut history = Vec::new();
        for i in 0..n {
            append_entry(&mut history, &format!("event {}", i), day(1 + (i as u32 % 28)));
        }
        history
    }

    const FIRST_HASH: &str = "eabe5b958a56bad97095f5a9e3b4e4e773ecf325b6686bec20f4de56f4a179a1";
    const SECOND_HASH: &str = "37237b30e1dba3c0e6d8e74a5cfdbbf07c771840888d5cd4abfc304656f55b93";

    // ── Hashing ───────────────────────────────────────────────────────────────

    /// The first entry hashes `"|2025-01-10|Complaint created"`; the second
    /// chains from it.
    #[test]
    fn test_known_vectors() {
        let mut history = Vec::new();
        let first = append_entry(&mut history, "Complaint created", day(10)).clone();
        assert_eq!(first.date, "2025-01-10");
        assert_eq!(first.hash, FIRST_HASH);
        assert_eq!(first.hash, hash_entry("", "2025-01-10", "Complaint created"));

        let second = append_entry(&mut history, "Status updated: Filed", day(10)).clone();
        assert_eq!(second.hash, SECOND_HASH);
        assert_eq!(second.hash, hash_entry(FIRST_HASH, "2025-01-10", "Status updated: Filed"));
    }

    #[test]
    fn test_hash_is_lowercase_hex() {
        let hash = hash_entry("", "2025-01-10", "x");
        assert_eq!(hash.len(), 64);
        assert!(hash.chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }

    /// Same predecessor, date, and event always give the same hash.
    #[test]
    fn test_digest_determinism() {
        let mut a = Vec::new();
        let mut b = Vec::new();
        append_entry(&mut a, "Complaint created", day(3));
        append_entry(&mut b, "Complaint created", day(3));
        assert_eq!(a[0].hash, b[0].hash);

        append_entry(&mut a, "Reminder sent", day(4));
        append_entry(&mut b, "Reminder sent", day(4));
        assert_eq!(a[1].hash, b[1].hash);
    }

    /// `append` stamps a `YYYY-MM-DD` date with no time component.
    #[test]
    fn test_append_uses_calendar_date() {
        let mut history = Vec::new();
        let entry = append(&mut history, "Complaint created");
        assert_eq!(entry.date.len(), 10);
        assert!(NaiveDate::parse_from_str(&entry.date, "%Y-%m-%d").is_ok());
        assert!(verify_chain(&history));
    }

    // ── Verification ──────────────────────────────────────────────────────────

    #[test]
    fn test_chain_validity() {
        for n in [0, 1, 2, 5, 40] {
            assert!(verify_chain(&make_chain(n)), "chain of {} must verify", n);
        }
    }

    /// Editing any single event or date breaks verification.
    #[test]
    fn test_tamper_detection() {
        let original = make_chain(6);
        for i in 0..original.len() {
            let mut edited_event = original.clone();
            edited_event[i].event.push_str(" (edited)");
            assert!(!verify_chain(&edited_event), "event edit at {} must be detected", i);

            let mut edited_date = original.clone();
            edited_date[i].date = "1999-12-31".to_string();
            assert!(!verify_chain(&edited_date), "date edit at {} must be detected", i);
        }
    }

    #[test]
    fn test_order_sensitivity() {
        let original = make_chain(5);
        for i in 0..original.len() - 1 {
            let mut swapped = original.clone();
            swapped.swap(i, i + 1);
            assert!(!verify_chain(&swapped), "swap at {} must be detected", i);
        }
    }

    /// Removing an entry anywhere but the end breaks the chain.
    #[test]
    fn test_deletion_detected() {
        let mut history = make_chain(4);
        history.remove(1);
        assert!(!verify_chain(&history));
    }

    /// Recomputing one entry's hash after editing it still leaves the next
    /// entry broken.
    #[test]
    fn test_local_rehash_detected() {
        let mut history = make_chain(3);
        history[0].event = "rewritten".to_string();
        history[0].hash = hash_entry("", &history[0].date, &history[0].event);
        assert!(!verify_chain(&history));
    }

    // ── Status ────────────────────────────────────────────────────────────────

    #[test]
    fn test_chain_status() {
        let mut history = make_chain(3);
        assert_eq!(chain_status(&history), AuditStatus::Valid);

        history[1].event = "edited".to_string();
        assert_eq!(chain_status(&history), AuditStatus::Invalid);

        history[1].hash.clear();
        assert_eq!(chain_status(&history), AuditStatus::Unverifiable);
    }

    // ── Backfill ──────────────────────────────────────────────────────────────

    /// Legacy entries loaded from JSON without hashes are filled in.
    #[test]
    fn test_backfill_legacy_history() {
        let json = r#"[
            { "date": "2023-02-01", "event": "Complaint created" },
            { "date": "2023-02-09", "event": "Status updated: Filed" }
        ]"#;
        let mut history: Vec<HistoryEntry> = serde_json::from_str(json).unwrap();
        assert_eq!(chain_status(&history), AuditStatus::Unverifiable);

        let report = backfill(&mut history);

        assert_eq!(report.rewritten, vec![0, 1]);
        assert!(verify_chain(&history));
        assert_eq!(history[0].hash, hash_entry("", "2023-02-01", "Complaint created"));
    }

    #[test]
    fn test_backfill_leaves_valid_chain_alone() {
        let mut history = make_chain(4);
        let before = history.clone();

        let report = backfill(&mut history);

        assert!(report.is_empty());
        assert_eq!(history, before);
    }

    /// Backfill also rewrites stale hashes from the first bad one onward.
    #[test]
    fn test_backfill_repairs_stale_suffix() {
        let mut history = make_chain(4);
        history[2].event = "altered".to_string();

        let report = backfill(&mut history);

        assert_eq!(report.rewritten, vec![2, 3]);
        assert!(verify_chain(&history));
    }

    // ── Trait impl ────────────────────────────────────────────────────────────

    #[test]
    fn test_trail_delegates_to_chain() {
        let trail = Sha256AuditTrail::new();
        let mut history = Vec::new();
        trail.append(&mut history, "Complaint created", day(10));
        trail.append(&mut history, "Status updated: Filed", day(10));

        assert_eq!(history[1].hash, SECOND_HASH);
        assert!(trail.verify(&history));
        assert_eq!(trail.status(&history), AuditStatus::Valid);

        history[0].hash.clear();
        assert!(!trail.verify(&history));
        assert_eq!(trail.backfill(&mut history).rewritten, vec![0]);
        assert!(trail.verify(&history));
    }
}
