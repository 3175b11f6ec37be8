//! Core trait definitions for casefile.
//!
//! - `Clock`      : source of the calendar date stamped on audit entries
//! - `AuditTrail` : the hash-chain operations over a record's history
//! - `Redactor`   : produces a masked copy of a record
//! - `CaseStore`  : durable home of records
//!
//! `CaseKeeper` wires them together. None of the traits reach into global
//! state: every call receives the record or history it operates on.

use chrono::NaiveDate;

use casefile_contracts::{
    error::CasefileResult,
    history::{AuditStatus, HistoryEntry},
    record::{Complaint, ComplaintId},
    redaction::RedactionOverrides,
};

/// Supplies today's date at day granularity.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// Positions rewritten by a backfill pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BackfillReport {
    /// Indices of entries whose hash was missing or wrong and got replaced.
    pub rewritten: Vec<usize>,
}

impl BackfillReport {
    pub fn is_empty(&self) -> bool {
        self.rewritten.is_empty()
    }
}

/// The hash-chained audit trail.
///
/// Implementations must be deterministic: the same history always yields
/// the same hashes and the same verdict.
pub trait AuditTrail: Send + Sync {
    /// Append `event` stamped with `date` to the end of `history`.
    ///
    /// Reads only the last entry; earlier entries are never touched.
    fn append(&self, history: &mut Vec<HistoryEntry>, event: &str, date: NaiveDate);

    /// Return true iff every entry matches its recomputed hash, in order.
    fn verify(&self, history: &[HistoryEntry]) -> bool;

    /// Classify `history` as valid, invalid, or unverifiable.
    fn status(&self, history: &[HistoryEntry]) -> AuditStatus;

    /// Recompute and overwrite missing or incorrect hashes.
    ///
    /// This is a migration step for legacy data. It makes any history
    /// verify, tampered or not, so callers must only run it on explicit
    /// request.
    fn backfill(&self, history: &mut [HistoryEntry]) -> BackfillReport;
}

/// Produces a view- or export-safe copy of a record.
pub trait Redactor: Send + Sync {
    /// Return a masked deep copy of `complaint`. The input is never mutated.
    fn redact(&self, complaint: &Complaint, overrides: &RedactionOverrides) -> Complaint;

    /// Version of the rule table in use, recorded alongside exports.
    fn rules_version(&self) -> u32;
}

/// Mutation applied to a stored record under the store's exclusive access.
pub type RecordMutation<'a> = dyn FnMut(&mut Complaint) -> CasefileResult<()> + 'a;

/// Durable storage for records.
pub trait CaseStore: Send + Sync {
    /// Store a new record. Fails with `DuplicateRecord` if the id is taken.
    fn insert(&self, complaint: Complaint) -> CasefileResult<()>;

    /// Return a copy of the record.
    fn get(&self, id: &ComplaintId) -> CasefileResult<Complaint>;

    /// Apply `mutation` to the stored record.
    ///
    /// The mutation runs while the store holds exclusive access, so at most
    /// one append per record is in flight. If the mutation fails the stored
    /// record is left unchanged.
    fn update(&self, id: &ComplaintId, mutation: &mut RecordMutation<'_>) -> CasefileResult<()>;

    /// Ids of every stored record, in a stable order.
    fn ids(&self) -> CasefileResult<Vec<ComplaintId>>;

    /// Copies of every stored record, in the same order as `ids`.
    fn all(&self) -> CasefileResult<Vec<Complaint>>;
}
