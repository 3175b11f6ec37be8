//! Structural redaction of a whole record.
//!
//! Text fields default to masked and can be opted out through the record's
//! `RedactionOverrides`. Evidence URLs are always masked. Attachments are the
//! exception to the default: binary content cannot be pattern-masked, so an
//! attachment survives only if its key is explicitly listed as safe.

use tracing::debug;

use casefile_contracts::{
    record::{Complaint, ComplaintField, Concern, ConcernField},
    redaction::{ConcernOverrides, RedactionOverrides},
};
use casefile_core::traits::Redactor;

use crate::rules::RuleSet;

/// Return a redacted deep copy of `complaint`. The input is not touched.
///
/// Absent optional fields stay absent; nothing here can fail.
///
/// `history` is copied unmasked so the redacted copy still verifies. Its
/// event text is outside the masking pass.
pub fn redact_complaint(
    rules: &RuleSet,
    complaint: &Complaint,
    overrides: &RedactionOverrides,
) -> Complaint {
    let mut out = complaint.clone();

    for field in ComplaintField::ALL {
        if !overrides.redacts(field) {
            continue;
        }
        if let Some(text) = out.text_field_mut(field) {
            *text = rules.mask(text);
        }
    }

    let unset = ConcernOverrides::default();
    for concern in &mut out.concerns {
        let scoped = overrides.concern(&concern.id).unwrap_or(&unset);
        redact_concern(rules, concern, scoped);
    }

    let before = out.attachments.len();
    out.attachments.retain(|a| overrides.is_attachment_safe(&a.key));

    debug!(
        record_id = %out.id,
        concerns = out.concerns.len(),
        attachments_kept = out.attachments.len(),
        attachments_dropped = before - out.attachments.len(),
        "record redacted"
    );

    out
}

fn redact_concern(rules: &RuleSet, concern: &mut Concern, overrides: &ConcernOverrides) {
    for field in ConcernField::ALL {
        if !overrides.redacts(field) {
            continue;
        }
        if let Some(text) = concern.text_field_mut(field) {
            *text = rules.mask(text);
        }
    }

    // URLs often embed names or reference numbers in their path.
    mask_all(rules, &mut concern.evidence_urls);

    for note in &mut concern.notes {
        if overrides.redacts_note(&note.id) {
            note.text = rules.mask(&note.text);
            mask_all(rules, &mut note.urls);
        }
    }

    for response in &mut concern.responses {
        if overrides.redacts_response(&response.id) {
            response.text = rules.mask(&response.text);
            mask_all(rules, &mut response.urls);
        }
    }
}

fn mask_all(rules: &RuleSet, values: &mut [String]) {
    for value in values {
        *value = rules.mask(value);
    }
}

/// A `Redactor` backed by a compiled rule table.
#[derive(Debug, Clone)]
pub struct PatternRedactor {
    rules: RuleSet,
}

impl PatternRedactor {
    pub fn new(rules: RuleSet) -> Self {
        Self { rules }
    }

    /// Use the compiled-in rule table.
    pub fn builtin() -> Self {
        Self::new(RuleSet::builtin().clone())
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }
}

impl Default for PatternRedactor {
    fn default() -> Self {
        Self::builtin()
    }
}

impl Redactor for PatternRedactor {
    fn redact(&self, complaint: &Complaint, overrides: &RedactionOverrides) -> Complaint {
        redact_complaint(&self.rules, complaint, overrides)
    }

    fn rules_version(&self) -> u32 {
        self.rules.version()
    }
}
