//! # casefile-store
//!
//! In-memory record store and JSON snapshots.
//!
//! [`InMemoryCaseStore`] implements [`CaseStore`](casefile_core::traits::CaseStore)
//! and is what the CLI and tests hand to a `CaseKeeper`. [`CaseSnapshot`] is
//! the on-disk form: pretty-printed JSON holding every record with its
//! history and overrides.

pub mod memory;
pub mod snapshot;

pub use memory::InMemoryCaseStore;
pub use snapshot::CaseSnapshot;

// ── Tests ─────────────────────────────────────────────────────────────────────
