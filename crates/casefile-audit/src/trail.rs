//! `AuditTrail` implementation backed by the SHA-256 chain.

use chrono::NaiveDate;
use tracing::debug;

use casefile_contracts::history::{AuditStatus, HistoryEntry};
use casefile_core::traits::{AuditTrail, BackfillReport};

use crate::{chain, migrate};

/// The production audit trail.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha256AuditTrail;

impl Sha256AuditTrail {
    pub fn new() -> Self {
        Self
    }
}

impl AuditTrail for Sha256AuditTrail {
    fn append(&self, history: &mut Vec<HistoryEntry>, event: &str, date: NaiveDate) {
        let entry = chain::append_entry(history, event, date);
        debug!(date = %entry.date, hash = %entry.hash, "audit entry chained");
    }

    fn verify(&self, history: &[HistoryEntry]) -> bool {
        chain::verify_chain(history)
    }

    fn status(&self, history: &[HistoryEntry]) -> AuditStatus {
        chain::chain_status(history)
    }

    fn backfill(&self, history: &mut [HistoryEntry]) -> BackfillReport {
        migrate::backfill(history)
    }
}
