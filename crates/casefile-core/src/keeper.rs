//! The record keeper: the service the UI layer talks to.
//!
//! The keeper enforces the record lifecycle:
//!
//!   Mutate → Append audit entry   (inside one store update)
//!   Load   → Verify               (before anything is displayed)
//!   Export → Redact               (using the record's own override map)
//!
//! Every mutation and its audit entry are applied inside a single
//! `CaseStore::update` call, so the two can never be observed apart.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info, warn};

use casefile_contracts::{
    error::{CasefileError, CasefileResult},
    history::{AuditStatus, MigrationMode},
    record::{Attachment, Complaint, ComplaintId, Concern, Note, Response},
    redaction::RedactionOverrides,
};

use crate::traits::{AuditTrail, BackfillReport, CaseStore, Clock, Redactor};

/// A record together with the verdict on its audit trail.
#[derive(Debug, Clone, Serialize)]
pub struct RecordView {
    pub complaint: Complaint,
    pub audit_status: AuditStatus,
    /// True when `complaint` is the masked copy.
    pub redacted: bool,
}

/// A redacted record ready to be written out as a separate artifact.
///
/// `complaint.history` is carried over unmasked so the copy still verifies.
/// Event text is therefore not PII-safe: it names attachment keys that were
/// dropped from `complaint.attachments`, and holds whatever free text was
/// passed to `CaseKeeper::record_event`.
#[derive(Debug, Clone, Serialize)]
pub struct RedactedExport {
    pub complaint: Complaint,
    pub audit_status: AuditStatus,
    /// Version of the redaction rule table that produced `complaint`.
    pub rules_version: u32,
    pub exported_at: DateTime<Utc>,
}

/// Outcome of `CaseKeeper::import`.
#[derive(Debug, Clone, Default)]
pub struct ImportReport {
    pub imported: usize,
    /// Records whose history was rewritten by a backfill pass.
    pub backfilled: Vec<(ComplaintId, BackfillReport)>,
    /// Records left with unhashed entries (strict mode only).
    pub unverifiable: Vec<ComplaintId>,
}

/// Owns the trusted components and applies the lifecycle on every call.
pub struct CaseKeeper {
    store: Box<dyn CaseStore>,
    audit: Box<dyn AuditTrail>,
    redactor: Box<dyn Redactor>,
    clock: Box<dyn Clock>,
}

impl CaseKeeper {
    pub fn new(
        store: Box<dyn CaseStore>,
        audit: Box<dyn AuditTrail>,
        redactor: Box<dyn Redactor>,
        clock: Box<dyn Clock>,
    ) -> Self {
        Self { store, audit, redactor, clock }
    }

    /// Store a new record and start its audit trail.
    ///
    /// Any history on the draft is discarded; the trail begins with
    /// `Complaint created`.
    pub fn open(&self, mut draft: Complaint) -> CasefileResult<ComplaintId> {
        let today = self.clock.today();
        if draft.created.is_empty() {
            draft.created = today.to_string();
        }
        draft.history.clear();
        self.audit.append(&mut draft.history, "Complaint created", today);

        let id = draft.id;
        self.store.insert(draft)?;

        info!(record_id = %id, "record opened");
        Ok(id)
    }

    pub fn update_status(&self, id: &ComplaintId, status: &str) -> CasefileResult<()> {
        let event = format!("Status updated: {}", status);
        self.mutate(id, &event, |complaint| {
            complaint.status = Some(status.to_string());
            Ok(())
        })
    }

    pub fn add_concern(&self, id: &ComplaintId, concern: Concern) -> CasefileResult<()> {
        let event = format!("Concern added: {}", concern.id);
        let mut concern = Some(concern);
        self.mutate(id, &event, |complaint| {
            if let Some(concern) = concern.take() {
                complaint.concerns.push(concern);
            }
            Ok(())
        })
    }

    pub fn add_note(&self, id: &ComplaintId, concern_id: &str, note: Note) -> CasefileResult<()> {
        let event = format!("Note added to concern {}", concern_id);
        let mut note = Some(note);
        self.mutate(id, &event, |complaint| {
            let concern = find_concern(complaint, concern_id)?;
            if let Some(note) = note.take() {
                concern.notes.push(note);
            }
            Ok(())
        })
    }

    pub fn add_response(
        &self,
        id: &ComplaintId,
        concern_id: &str,
        response: Response,
    ) -> CasefileResult<()> {
        let event = format!("Response added to concern {}", concern_id);
        let mut response = Some(response);
        self.mutate(id, &event, |complaint| {
            let concern = find_concern(complaint, concern_id)?;
            if let Some(response) = response.take() {
                concern.responses.push(response);
            }
            Ok(())
        })
    }

    pub fn add_attachment(&self, id: &ComplaintId, attachment: Attachment) -> CasefileResult<()> {
        let event = format!("Attachment added: {}", attachment.key);
        let mut attachment = Some(attachment);
        self.mutate(id, &event, |complaint| {
            if let Some(attachment) = attachment.take() {
                complaint.attachments.push(attachment);
            }
            Ok(())
        })
    }

    pub fn set_overrides(
        &self,
        id: &ComplaintId,
        overrides: RedactionOverrides,
    ) -> CasefileResult<()> {
        let mut overrides = Some(overrides);
        self.mutate(id, "Redaction settings updated", |complaint| {
            if let Some(overrides) = overrides.take() {
                complaint.overrides = overrides;
            }
            Ok(())
        })
    }

    /// Append a free-form event without changing any other field.
    ///
    /// `event` is stored verbatim and is never masked, not even in
    /// redacted exports. Do not put personal data in it.
    pub fn record_event(&self, id: &ComplaintId, event: &str) -> CasefileResult<()> {
        self.mutate(id, event, |_| Ok(()))
    }

    pub fn audit_status(&self, id: &ComplaintId) -> CasefileResult<AuditStatus> {
        let complaint = self.store.get(id)?;
        Ok(self.checked_status(&complaint))
    }

    /// Load a record for display, verifying its trail first.
    ///
    /// With `redacted` set, the returned copy is masked using the record's
    /// own overrides.
    pub fn view(&self, id: &ComplaintId, redacted: bool) -> CasefileResult<RecordView> {
        let complaint = self.store.get(id)?;
        let audit_status = self.checked_status(&complaint);
        let complaint = if redacted {
            self.redactor.redact(&complaint, &complaint.overrides)
        } else {
            complaint
        };
        Ok(RecordView { complaint, audit_status, redacted })
    }

    pub fn export_redacted(&self, id: &ComplaintId) -> CasefileResult<RedactedExport> {
        let view = self.view(id, true)?;
        let export = RedactedExport {
            complaint: view.complaint,
            audit_status: view.audit_status,
            rules_version: self.redactor.rules_version(),
            exported_at: Utc::now(),
        };
        info!(
            record_id = %id,
            rules_version = export.rules_version,
            attachments = export.complaint.attachments.len(),
            "redacted export produced"
        );
        Ok(export)
    }

    /// Insert previously persisted records.
    ///
    /// Under `MigrationMode::Strict` history is stored as loaded. Under
    /// `MigrationMode::Backfill` missing or wrong hashes are recomputed
    /// first and every rewritten position is logged.
    ///
    /// Ids are checked against the store and within the batch before any
    /// record is touched, so a `DuplicateRecord` leaves the store unchanged.
    pub fn import(
        &self,
        complaints: Vec<Complaint>,
        mode: MigrationMode,
    ) -> CasefileResult<ImportReport> {
        let mut seen: BTreeSet<ComplaintId> = self.store.ids()?.into_iter().collect();
        for complaint in &complaints {
            if !seen.insert(complaint.id) {
                return Err(CasefileError::DuplicateRecord { id: complaint.id.to_string() });
            }
        }

        let mut report = ImportReport::default();

        for mut complaint in complaints {
            match mode {
                MigrationMode::Backfill => {
                    let backfill = self.audit.backfill(&mut complaint.history);
                    if !backfill.is_empty() {
                        warn!(
                            record_id = %complaint.id,
                            positions = ?backfill.rewritten,
                            "audit hashes regenerated by backfill; earlier tampering can no longer be detected"
                        );
                        report.backfilled.push((complaint.id, backfill));
                    }
                }
                MigrationMode::Strict => {
                    if complaint.history.iter().any(|e| e.is_unhashed()) {
                        warn!(
                            record_id = %complaint.id,
                            "record has unhashed history entries and cannot be verified"
                        );
                        report.unverifiable.push(complaint.id);
                    }
                }
            }

            self.store.insert(complaint)?;
            report.imported += 1;
        }

        info!(
            imported = report.imported,
            backfilled = report.backfilled.len(),
            unverifiable = report.unverifiable.len(),
            mode = ?mode,
            "import complete"
        );
        Ok(report)
    }

    /// Direct access to the underlying store.
    pub fn store(&self) -> &dyn CaseStore {
        self.store.as_ref()
    }

    // ── Internal helpers ──────────────────────────────────────────────────────

    /// Apply `change` and append `event`, both under one store update.
    fn mutate<F>(&self, id: &ComplaintId, event: &str, mut change: F) -> CasefileResult<()>
    where
        F: FnMut(&mut Complaint) -> CasefileResult<()>,
    {
        let today = self.clock.today();
        self.store.update(id, &mut |complaint: &mut Complaint| {
            change(complaint)?;
            self.audit.append(&mut complaint.history, event, today);
            Ok(())
        })?;

        debug!(record_id = %id, event = %event, "audit entry appended");
        Ok(())
    }

    fn checked_status(&self, complaint: &Complaint) -> AuditStatus {
        let status = self.audit.status(&complaint.history);
        if status != AuditStatus::Valid {
            warn!(
                record_id = %complaint.id,
                status = status.label(),
                entries = complaint.history.len(),
                "audit trail does not verify"
            );
        }
        status
    }
}

fn find_concern<'c>(complaint: &'c mut Complaint, concern_id: &str) -> CasefileResult<&'c mut Concern> {
    let record_id = complaint.id.to_string();
    complaint
        .concern_mut(concern_id)
        .ok_or_else(|| CasefileError::ConcernNotFound {
            record_id,
            concern_id: concern_id.to_string(),
        })
}
