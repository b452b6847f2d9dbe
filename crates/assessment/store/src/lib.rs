//! Persistence layer for risk assessment records.
//!
//! The workflow engine is pure; this crate owns the read/write seam.
//! [`AssessmentStore`] is the interface the service layer drives, and
//! [`InMemoryAssessmentStore`] is the deterministic reference adapter.
//! Production deployments should use a transactional backend behind the
//! same trait.
//!
//! Updates are compare-and-swap on the record's `last_modified` stamp:
//! a writer that raced and lost gets [`StoreError::Conflict`] and must
//! reload before retrying. Retry policy belongs to the caller, never to
//! the store.

#![deny(unsafe_code)]

mod error;
mod memory;
mod traits;

pub use error::*;
pub use memory::*;
pub use traits::*;
