//! Assessment Service: the entry point for the approval workflow
//!
//! The service sequences every mutation path: load the persisted
//! record, run the pure engine function, write back the result under a
//! compare-and-swap on the record's `last_modified` stamp. Status is
//! always re-derived from the freshly read ledger, never from a stale
//! in-memory copy.
//!
//! # Key Principle
//!
//! **The service sequences, the engine decides.** All workflow rules
//! live in `assessment-engine`; this crate owns persistence ordering,
//! draft transitions, and the advisory-scoring seam.

#![deny(unsafe_code)]

mod error;
mod scorer;
mod service;

pub use error::*;
pub use scorer::*;
pub use service::*;
