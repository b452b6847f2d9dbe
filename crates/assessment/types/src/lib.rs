//! Domain Types for the Vessel Risk Assessment Workflow
//!
//! A risk assessment moves through three fixed, sequential approval
//! levels: Crewing Standards & Oversight, then the Senior Director,
//! then the Director General. Each level holds exactly one slot in the
//! assessment's [`ApprovalLedger`]; the slot is either pending or
//! carries a full [`DecisionRecord`] — never a partial one.
//!
//! # Key Concepts
//!
//! - **RiskAssessment**: The aggregate root — content, workflow state,
//!   advisory annotations, and audit stamps.
//! - **ApprovalLedger**: A fixed-cardinality array of one
//!   [`ApprovalStep`] per level, in canonical order. The "one step per
//!   level, always present" invariant is unrepresentable-as-wrong.
//! - **AssessmentStatus**: The overall workflow state. Outside of
//!   `Draft` it is always a pure projection of the ledger.
//! - **AssessmentContent**: The substantive fields. Any change to them
//!   while the workflow is in flight invalidates prior approvals.
//!
//! # Design Principles
//!
//! 1. Status is derived, never hand-set (except the explicit `Draft`
//!    transition owned by the service layer).
//! 2. Decisions are recorded exactly once per level per workflow pass.
//! 3. Every persisted shape round-trips losslessly through JSON with
//!    canonical string literals for statuses and levels.

#![deny(unsafe_code)]

mod actor;
mod assessment;
mod content;
mod errors;
mod ledger;
mod level;

pub use actor::*;
pub use assessment::*;
pub use content::*;
pub use errors::*;
pub use ledger::*;
pub use level::*;
