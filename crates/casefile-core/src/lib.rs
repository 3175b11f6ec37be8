//! # casefile-core
//!
//! The record-keeping runtime for casefile.
//!
//! This crate provides:
//! - The four core traits (`Clock`, `AuditTrail`, `Redactor`, `CaseStore`)
//! - The `CaseKeeper` that wires them together so every mutation is audited,
//!   every display is verified, and every export is redacted
//!
//! ## Usage
//!
//! ```rust,ignore
//! use casefile_core::{CaseKeeper, clock::SystemClock};
//!
//! let keeper = CaseKeeper::new(store, audit, redactor, Box::new(SystemClock));
//! let id = keeper.open(Complaint::draft(RecordKind::Complaint, "Bin collection"))?;
//! keeper.update_status(&id, "Filed")?;
//! ```

pub mod clock;
pub mod keeper;
pub mod traits;

pub use keeper::{CaseKeeper, ImportReport, RecordView, RedactedExport};

// ── Tests ─────────────────────────────────────────────────────────────────────
