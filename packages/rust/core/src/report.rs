//! Outcome accumulation and summary rendering.
//!
//! The reporter is pure: it consumes structured outcomes and produces
//! strings. Printing them is the CLI's job, so the pipeline stays free
//! of console side effects.

use std::time::Duration;

/// Action taken (or previewed) for one record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Created,
    Updated,
    Skipped,
    WouldCreate,
    WouldUpdate,
    WouldSkip,
    Error,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Created => "created",
            Action::Updated => "updated",
            Action::Skipped => "skipped",
            Action::WouldCreate => "would-create",
            Action::WouldUpdate => "would-update",
            Action::WouldSkip => "would-skip",
            Action::Error => "error",
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of reconciling one input record.
#[derive(Debug, Clone)]
pub struct ReconciliationOutcome {
    /// Zero-based position in the input batch.
    pub index: usize,
    pub term: String,
    pub slug: String,
    pub action: Action,
    /// Changed field names (empty on skip).
    pub changed: Vec<&'static str>,
    /// Failure detail when `action` is [`Action::Error`].
    pub error: Option<String>,
}

impl ReconciliationOutcome {
    /// Render the per-record progress line.
    pub fn line(&self) -> String {
        match self.action {
            Action::Error => format!(
                "{} ({}): error: {}",
                self.term,
                self.slug,
                self.error.as_deref().unwrap_or("unknown")
            ),
            Action::Updated | Action::WouldUpdate | Action::WouldCreate
                if !self.changed.is_empty() =>
            {
                format!(
                    "{} ({}): {} [{}]",
                    self.term,
                    self.slug,
                    self.action,
                    self.changed.join(", ")
                )
            }
            _ => format!("{} ({}): {}", self.term, self.slug, self.action),
        }
    }
}

/// Accumulated result of one import run.
#[derive(Debug, Clone)]
pub struct ImportSummary {
    /// One outcome per input record, in input order.
    pub outcomes: Vec<ReconciliationOutcome>,
    pub created: usize,
    pub updated: usize,
    pub skipped: usize,
    pub errors: usize,
    pub dry_run: bool,
    pub elapsed: Duration,
}

impl ImportSummary {
    pub fn new(dry_run: bool) -> Self {
        Self {
            outcomes: Vec::new(),
            created: 0,
            updated: 0,
            skipped: 0,
            errors: 0,
            dry_run,
            elapsed: Duration::ZERO,
        }
    }

    /// Record one outcome. Preview actions count toward the totals of
    /// their real counterparts so a dry run previews the same summary a
    /// real run would produce.
    pub fn record(&mut self, outcome: ReconciliationOutcome) {
        match outcome.action {
            Action::Created | Action::WouldCreate => self.created += 1,
            Action::Updated | Action::WouldUpdate => self.updated += 1,
            Action::Skipped | Action::WouldSkip => self.skipped += 1,
            Action::Error => self.errors += 1,
        }
        self.outcomes.push(outcome);
    }

    /// Render the final summary block.
    pub fn render(&self) -> String {
        let header = if self.dry_run {
            "Preview complete (dry run — no writes performed)"
        } else {
            "Import complete"
        };
        format!(
            "{header}\n  Created: {}\n  Updated: {}\n  Skipped: {}\n  Errors:  {}\n  Time:    {:.1}s",
            self.created,
            self.updated,
            self.skipped,
            self.errors,
            self.elapsed.as_secs_f64()
        )
    }
}
