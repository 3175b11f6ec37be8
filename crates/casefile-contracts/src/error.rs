//! Error types for the casefile crates.
//!
//! All fallible operations return `CasefileResult<T>`. A failed audit
//! verification is not an error: it is reported as `false` or
//! `AuditStatus::Invalid`. Redaction never fails.

use thiserror::Error;

/// The unified error type for casefile.
#[derive(Debug, Error)]
pub enum CasefileError {
    /// No record with the given id exists in the store.
    #[error("record '{id}' not found")]
    RecordNotFound { id: String },

    /// A record with the given id is already present in the store.
    #[error("record '{id}' already exists")]
    DuplicateRecord { id: String },

    /// The record exists but holds no concern with the given id.
    #[error("concern '{concern_id}' not found on record '{record_id}'")]
    ConcernNotFound { record_id: String, concern_id: String },

    /// A redaction rule's pattern failed to compile.
    #[error("redaction rule '{rule_id}' failed to compile: {reason}")]
    RuleCompile { rule_id: String, reason: String },

    /// A rule table or other configuration input is missing or invalid.
    #[error("configuration error: {reason}")]
    ConfigError { reason: String },

    /// A snapshot could not be encoded or decoded.
    #[error("serialization error: {reason}")]
    Serialization { reason: String },

    /// The store could not complete the operation.
    #[error("store failure: {reason}")]
    StoreFailed { reason: String },
}

/// Convenience alias used throughout the casefile crates.
pub type CasefileResult<T> = Result<T, CasefileError>;
