//! Batch reconciliation pipeline for glossary terms.
//!
//! Two-phase control flow: Phase 1 (load → validate → derive keys →
//! detect collisions) runs over the entire batch and must pass with zero
//! errors before Phase 2 (resolve → diff → reconcile) touches the remote
//! store for any record.

pub mod collision;
pub mod diff;
pub mod loader;
pub mod pipeline;
pub mod progress;
pub mod report;
pub mod slug;
pub mod validate;

pub use pipeline::{ImportConfig, run_batch, run_import};
pub use progress::{ImportProgress, SilentProgress};
pub use report::{Action, ImportSummary, ReconciliationOutcome};
