//! Complaint records and their nested entities.
//!
//! A `Complaint` is the unit of storage: it owns its concerns, attachment
//! references, audit trail, and redaction overrides. The same shape is used
//! for subject-access requests and escalations, distinguished by `kind`.

use serde::{Deserialize, Serialize};

use crate::{history::HistoryEntry, redaction::RedactionOverrides};

/// Unique identifier for a stored record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ComplaintId(pub uuid::Uuid);

impl ComplaintId {
    /// Create a new, unique record id.
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for ComplaintId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ComplaintId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for ComplaintId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        uuid::Uuid::parse_str(s).map(Self)
    }
}

/// What sort of matter a record tracks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    #[default]
    Complaint,
    SubjectAccessRequest,
    Escalation,
}

/// Top-level text fields eligible for masking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComplaintField {
    Title,
    Institution,
    ContactPerson,
    Content,
    Address,
    Email,
    Status,
    Hint,
    TermsText,
}

impl ComplaintField {
    pub const ALL: [ComplaintField; 9] = [
        ComplaintField::Title,
        ComplaintField::Institution,
        ComplaintField::ContactPerson,
        ComplaintField::Content,
        ComplaintField::Address,
        ComplaintField::Email,
        ComplaintField::Status,
        ComplaintField::Hint,
        ComplaintField::TermsText,
    ];

    /// Key used for this field in `RedactionOverrides::fields`.
    pub fn as_str(&self) -> &'static str {
        match self {
            ComplaintField::Title => "title",
            ComplaintField::Institution => "institution",
            ComplaintField::ContactPerson => "contact_person",
            ComplaintField::Content => "content",
            ComplaintField::Address => "address",
            ComplaintField::Email => "email",
            ComplaintField::Status => "status",
            ComplaintField::Hint => "hint",
            ComplaintField::TermsText => "terms_text",
        }
    }
}

/// Per-concern text fields eligible for masking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConcernField {
    Summary,
    Details,
    DecisionMaker,
    Response,
}

impl ConcernField {
    pub const ALL: [ConcernField; 4] = [
        ConcernField::Summary,
        ConcernField::Details,
        ConcernField::DecisionMaker,
        ConcernField::Response,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ConcernField::Summary => "summary",
            ConcernField::Details => "details",
            ConcernField::DecisionMaker => "decision_maker",
            ConcernField::Response => "response",
        }
    }
}

/// A reference to a stored file. The content itself lives elsewhere and is
/// never pattern-masked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    /// Storage key; also the key used in `RedactionOverrides::safe_attachments`.
    pub key: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub mime: Option<String>,
}

/// A free-form note attached to a concern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub urls: Vec<String>,
}

/// A reply received from the institution about a concern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Response {
    pub id: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub urls: Vec<String>,
    /// Calendar date the response arrived, if known.
    #[serde(default)]
    pub received: Option<String>,
}

/// One distinct issue raised within a complaint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Concern {
    pub id: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub details: Option<String>,
    #[serde(default)]
    pub decision_maker: Option<String>,
    #[serde(default)]
    pub response: Option<String>,
    #[serde(default)]
    pub evidence_urls: Vec<String>,
    #[serde(default)]
    pub notes: Vec<Note>,
    #[serde(default)]
    pub responses: Vec<Response>,
}

impl Concern {
    /// Mutable access to a maskable field. Returns `None` when the field is
    /// absent.
    pub fn text_field_mut(&mut self, field: ConcernField) -> Option<&mut String> {
        match field {
            ConcernField::Summary => Some(&mut self.summary),
            ConcernField::Details => self.details.as_mut(),
            ConcernField::DecisionMaker => self.decision_maker.as_mut(),
            ConcernField::Response => self.response.as_mut(),
        }
    }
}

/// A complaint, subject-access request, or escalation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Complaint {
    pub id: ComplaintId,
    #[serde(default)]
    pub kind: RecordKind,
    /// Calendar date the record was opened.
    #[serde(default)]
    pub created: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub institution: Option<String>,
    #[serde(default)]
    pub contact_person: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub hint: Option<String>,
    #[serde(default)]
    pub terms_text: Option<String>,
    #[serde(default)]
    pub concerns: Vec<Concern>,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
    /// Hash-chained audit trail. Appended to, never rewritten.
    #[serde(default)]
    pub history: Vec<HistoryEntry>,
    #[serde(default)]
    pub overrides: RedactionOverrides,
}

impl Complaint {
    /// Start a new record with only a title set.
    pub fn draft(kind: RecordKind, title: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            ..Self::default()
        }
    }

    /// Mutable access to a maskable field. Returns `None` when the field is
    /// absent.
    pub fn text_field_mut(&mut self, field: ComplaintField) -> Option<&mut String> {
        match field {
            ComplaintField::Title => Some(&mut self.title),
            ComplaintField::Institution => self.institution.as_mut(),
            ComplaintField::ContactPerson => self.contact_person.as_mut(),
            ComplaintField::Content => self.content.as_mut(),
            ComplaintField::Address => self.address.as_mut(),
            ComplaintField::Email => self.email.as_mut(),
            ComplaintField::Status => self.status.as_mut(),
            ComplaintField::Hint => self.hint.as_mut(),
            ComplaintField::TermsText => self.terms_text.as_mut(),
        }
    }

    pub fn concern_mut(&mut self, concern_id: &str) -> Option<&mut Concern> {
        self.concerns.iter_mut().find(|c| c.id == concern_id)
    }
}
