//! # casefile-contracts
//!
//! Shared record types, override maps, and error types for casefile.
//!
//! Every other crate in the workspace imports from here. No business logic
//! lives in this crate, only data definitions and error types.

pub mod error;
pub mod history;
pub mod record;
pub mod redaction;
