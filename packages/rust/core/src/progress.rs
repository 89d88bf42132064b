//! Progress reporting hooks for the import pipeline.

use crate::report::ReconciliationOutcome;

/// Progress callback for reporting pipeline status.
pub trait ImportProgress: Send + Sync {
    /// Called when entering a new phase.
    fn phase(&self, name: &str);
    /// Called after each record's outcome is decided.
    fn record_done(&self, outcome: &ReconciliationOutcome, current: usize, total: usize);
}

/// No-op progress reporter for headless/test usage.
pub struct SilentProgress;

impl ImportProgress for SilentProgress {
    fn phase(&self, _name: &str) {}
    fn record_done(&self, _outcome: &ReconciliationOutcome, _current: usize, _total: usize) {}
}
