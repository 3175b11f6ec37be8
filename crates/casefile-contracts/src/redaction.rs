//! Per-record redaction overrides.
//!
//! Every text field defaults to "redact". An override set to `false` opts
//! that field out of masking. Attachments work the other way round: none
//! appear in a redacted copy unless their key is listed as safe.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::record::{ComplaintField, ConcernField};

/// Overrides scoped to a single concern.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConcernOverrides {
    /// Keyed by `ConcernField::as_str()`.
    #[serde(default)]
    pub fields: BTreeMap<String, bool>,
    /// Note id → redact flag.
    #[serde(default)]
    pub notes: BTreeMap<String, bool>,
    /// Response id → redact flag.
    #[serde(default)]
    pub responses: BTreeMap<String, bool>,
}

impl ConcernOverrides {
    pub fn redacts(&self, field: ConcernField) -> bool {
        self.fields.get(field.as_str()).copied().unwrap_or(true)
    }

    pub fn redacts_note(&self, note_id: &str) -> bool {
        self.notes.get(note_id).copied().unwrap_or(true)
    }

    pub fn redacts_response(&self, response_id: &str) -> bool {
        self.responses.get(response_id).copied().unwrap_or(true)
    }
}

/// The override map a record owner edits to relax the default policy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RedactionOverrides {
    /// Keyed by `ComplaintField::as_str()`. Absent means redact.
    #[serde(default)]
    pub fields: BTreeMap<String, bool>,
    /// Concern id → nested overrides.
    #[serde(default)]
    pub concerns: BTreeMap<String, ConcernOverrides>,
    /// Attachment keys allowed into a redacted copy.
    #[serde(default)]
    pub safe_attachments: BTreeSet<String>,
}

impl RedactionOverrides {
    /// Whether `field` should be masked.
    pub fn redacts(&self, field: ComplaintField) -> bool {
        self.fields.get(field.as_str()).copied().unwrap_or(true)
    }

    /// Set the redact flag for `field`.
    pub fn set(&mut self, field: ComplaintField, redact: bool) {
        self.fields.insert(field.as_str().to_string(), redact);
    }

    /// Overrides for one concern, or `None` when the owner never set any.
    pub fn concern(&self, concern_id: &str) -> Option<&ConcernOverrides> {
        self.concerns.get(concern_id)
    }

    pub fn concern_mut(&mut self, concern_id: &str) -> &mut ConcernOverrides {
        self.concerns.entry(concern_id.to_string()).or_default()
    }

    /// Mark an attachment as safe to include in redacted output.
    pub fn allow_attachment(&mut self, key: impl Into<String>) {
        self.safe_attachments.insert(key.into());
    }

    pub fn is_attachment_safe(&self, key: &str) -> bool {
        self.safe_attachments.contains(key)
    }
}
