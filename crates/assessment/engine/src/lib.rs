//! Workflow Engine for Vessel Risk Assessments
//!
//! Pure transition logic over the domain types. Three concerns live
//! here:
//!
//! - [`machine`] — status derivation and the decision protocol. Status
//!   is a projection of the ledger (except the explicit `Draft`
//!   transition), recomputed on every mutation path.
//! - [`diff`] — the single change-set module comparing two content
//!   snapshots under absent/empty normalization. Both the reset policy
//!   and any future audit-diff feature read from here.
//! - [`reset`] — the edit-triggered reset policy: substantive edits to
//!   an in-flight assessment rewind the workflow to the first level.
//!
//! # Key Principle
//!
//! **Every function here is pure.** No persistence, no clocks beyond
//! decision timestamps, no partial writes: an `Err` means nothing
//! changed.

#![deny(unsafe_code)]

pub mod diff;
pub mod machine;
pub mod reset;

pub use diff::{attachments_differ, change_set};
pub use machine::{decide, derive_status, submit_draft};
pub use reset::{apply_edit, should_reset_workflow, EditOutcome};
