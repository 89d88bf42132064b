//! Error types for termsync.
//!
//! Library crates use [`TermSyncError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.
//!
//! Validation and collision failures carry structured payloads so the
//! consolidated error report can list *every* violation in the batch,
//! not just the first one found.

use std::fmt;
use std::path::PathBuf;

/// Top-level error type for all termsync operations.
#[derive(Debug, thiserror::Error)]
pub enum TermSyncError {
    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// Batch input error (file unparsable, not an array, empty).
    #[error("input error: {message}")]
    Input { message: String },

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// One or more records violated field constraints. Fatal for the batch.
    #[error("{0}")]
    Validation(BatchValidationError),

    /// Two or more records in the batch share a natural key. Fatal.
    #[error("{0}")]
    Collision(CollisionError),

    /// Remote store lookup or mutation failure. Recovered per record.
    #[error("remote store error: {0}")]
    Remote(String),
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, TermSyncError>;

impl TermSyncError {
    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Create an input error from any displayable message.
    pub fn input(msg: impl Into<String>) -> Self {
        Self::Input {
            message: msg.into(),
        }
    }

    /// Create a remote-store error from any displayable message.
    pub fn remote(msg: impl Into<String>) -> Self {
        Self::Remote(msg.into())
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

// ---------------------------------------------------------------------------
// Validation failure payload
// ---------------------------------------------------------------------------

/// A single field-constraint violation for one input record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// Input-file spelling of the offending field (e.g. `seoTitle`).
    pub field: &'static str,
    /// What went wrong.
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// All constraint violations for a single record.
#[derive(Debug, Clone)]
pub struct RecordErrors {
    /// Zero-based position in the input batch.
    pub index: usize,
    /// The record's display name, when one could be read.
    pub term: Option<String>,
    /// Every violated constraint for this record.
    pub errors: Vec<FieldError>,
}

/// Aggregated validation failure for an entire batch.
///
/// Produced only after *all* records have been checked, so the operator
/// can fix the input file in one pass.
#[derive(Debug, Clone)]
pub struct BatchValidationError {
    pub records: Vec<RecordErrors>,
}

impl fmt::Display for BatchValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "validation failed for {} record(s):", self.records.len())?;
        for rec in &self.records {
            match &rec.term {
                Some(term) => writeln!(f, "  record {} ({term:?}):", rec.index + 1)?,
                None => writeln!(f, "  record {}:", rec.index + 1)?,
            }
            for err in &rec.errors {
                writeln!(f, "    - {err}")?;
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Collision failure payload
// ---------------------------------------------------------------------------

/// A natural key shared by two or more records in one batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollisionGroup {
    /// The contested slug.
    pub slug: String,
    /// Display names of every record resolving to this slug, in input order.
    pub terms: Vec<String>,
}

/// Aggregated collision failure: every colliding group, not just the first.
#[derive(Debug, Clone)]
pub struct CollisionError {
    pub groups: Vec<CollisionGroup>,
}

impl fmt::Display for CollisionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "slug collision(s) detected in batch ({} group(s)):",
            self.groups.len()
        )?;
        for group in &self.groups {
            writeln!(
                f,
                "  \"{}\" is shared by: {}",
                group.slug,
                group.terms.join(", ")
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_formatting() {
        let err = TermSyncError::config("store token missing");
        assert_eq!(err.to_string(), "config error: store token missing");

        let err = TermSyncError::input("batch is empty");
        assert!(err.to_string().contains("batch is empty"));
    }

    #[test]
    fn validation_error_lists_every_record() {
        let err = TermSyncError::Validation(BatchValidationError {
            records: vec![
                RecordErrors {
                    index: 0,
                    term: Some("Abrazija".into()),
                    errors: vec![FieldError::new(
                        "definition",
                        "too short (12 chars, minimum 60)",
                    )],
                },
                RecordErrors {
                    index: 2,
                    term: None,
                    errors: vec![
                        FieldError::new("term", "required field is missing"),
                        FieldError::new("category", "unknown value \"misc\""),
                    ],
                },
            ],
        });

        let text = err.to_string();
        assert!(text.contains("2 record(s)"));
        assert!(text.contains("record 1 (\"Abrazija\")"));
        assert!(text.contains("record 3"));
        assert!(text.contains("definition: too short"));
        assert!(text.contains("category: unknown value"));
    }

    #[test]
    fn collision_error_lists_every_group() {
        let err = TermSyncError::Collision(CollisionError {
            groups: vec![
                CollisionGroup {
                    slug: "prva-pomoc".into(),
                    terms: vec!["Prva pomoč".into(), "Prva Pomoc".into()],
                },
                CollisionGroup {
                    slug: "opeklina".into(),
                    terms: vec!["Opeklina".into(), "opeklina".into()],
                },
            ],
        });

        let text = err.to_string();
        assert!(text.contains("2 group(s)"));
        assert!(text.contains("\"prva-pomoc\" is shared by: Prva pomoč, Prva Pomoc"));
        assert!(text.contains("\"opeklina\""));
    }
}
