//! End-to-end import pipeline: load → validate → derive keys → detect
//! collisions → reconcile against the remote store.
//!
//! Control flow is strictly two-phase. Phase 1 is pure and covers the
//! whole batch; it must finish with zero errors before Phase 2 touches
//! the store for any record. A structurally invalid batch therefore
//! never produces partial writes. Phase 2 failures are per record: the
//! outcome is recorded and the batch continues.

use std::path::PathBuf;
use std::time::Instant;

use chrono::Utc;
use tracing::{info, instrument, warn};

use termsync_richtext::{Block, text_to_blocks};
use termsync_shared::{Result, ValidatedRecord};
use termsync_store::{DocumentPatch, DocumentStore, NewDocument, PersistedDocument};

use crate::loader::{self, RawRecord};
use crate::progress::ImportProgress;
use crate::report::{Action, ImportSummary, ReconciliationOutcome};
use crate::{collision, diff, validate};

/// Configuration for a single import run.
#[derive(Debug, Clone)]
pub struct ImportConfig {
    /// Path to the batch input file.
    pub input: PathBuf,
    /// Preview mode: resolve and diff, but never write.
    pub dry_run: bool,
}

/// Run the full import from an input file.
pub async fn run_import(
    config: &ImportConfig,
    store: &dyn DocumentStore,
    progress: &dyn ImportProgress,
) -> Result<ImportSummary> {
    progress.phase("Loading batch");
    let raw = loader::load_batch(&config.input)?;
    run_batch(raw, config.dry_run, store, progress).await
}

/// Run the pipeline over already-loaded raw records.
#[instrument(skip_all, fields(records = raw.len(), dry_run))]
pub async fn run_batch(
    raw: Vec<RawRecord>,
    dry_run: bool,
    store: &dyn DocumentStore,
    progress: &dyn ImportProgress,
) -> Result<ImportSummary> {
    let start = Instant::now();

    // --- Phase 1: validate and detect collisions over the whole batch ---
    progress.phase("Validating records");
    let records = validate::validate_batch(&raw)?;
    info!(records = records.len(), "batch validated");

    collision::check_collisions(&records)?;

    // --- Phase 2: reconcile each record against the store, in input order ---
    progress.phase(if dry_run {
        "Previewing changes"
    } else {
        "Reconciling records"
    });

    let total = records.len();
    let mut summary = ImportSummary::new(dry_run);

    for (index, record) in records.iter().enumerate() {
        let outcome = match reconcile_record(record, index, dry_run, store).await {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!(slug = %record.slug, error = %e, "record failed, continuing with batch");
                ReconciliationOutcome {
                    index,
                    term: record.term.clone(),
                    slug: record.slug.clone(),
                    action: Action::Error,
                    changed: Vec::new(),
                    error: Some(e.to_string()),
                }
            }
        };
        progress.record_done(&outcome, index + 1, total);
        summary.record(outcome);
    }

    summary.elapsed = start.elapsed();

    info!(
        created = summary.created,
        updated = summary.updated,
        skipped = summary.skipped,
        errors = summary.errors,
        elapsed_ms = summary.elapsed.as_millis(),
        "import complete"
    );

    Ok(summary)
}

/// Decide and (unless previewing) apply one record's reconciliation.
async fn reconcile_record(
    record: &ValidatedRecord,
    index: usize,
    dry_run: bool,
    store: &dyn DocumentStore,
) -> Result<ReconciliationOutcome> {
    let article = record.article.as_deref().map(text_to_blocks);

    let persisted = store.fetch_by_slug(&record.slug).await?;
    let changed = diff::diff_fields(record, article.as_deref(), persisted.as_ref());

    let action = match (persisted, changed.is_empty(), dry_run) {
        (None, _, true) => Action::WouldCreate,
        (None, _, false) => {
            store.create(&new_document(record, article)).await?;
            Action::Created
        }
        (Some(_), true, true) => Action::WouldSkip,
        (Some(_), true, false) => Action::Skipped,
        (Some(_), false, true) => Action::WouldUpdate,
        (Some(doc), false, false) => {
            let patch = build_patch(record, article, &changed, &doc);
            store.patch(&doc.id, &patch).await?;
            Action::Updated
        }
    };

    Ok(ReconciliationOutcome {
        index,
        term: record.term.clone(),
        slug: record.slug.clone(),
        action,
        changed,
        error: None,
    })
}

/// Assemble the create payload, stamping the creation timestamp.
fn new_document(record: &ValidatedRecord, article: Option<Vec<Block>>) -> NewDocument {
    NewDocument {
        slug: record.slug.clone(),
        term: record.term.clone(),
        definition: record.definition.clone(),
        category: record.category,
        article,
        seo_title: record.seo_title.clone(),
        meta_description: record.meta_description.clone(),
        noindex: record.noindex,
        created_at: Utc::now(),
    }
}

/// Build the minimal patch for the changed fields.
///
/// The creation timestamp is only ever included as a backfill when the
/// persisted document lacks one; an existing timestamp is never touched.
/// This is the single point where the immutability invariant is enforced.
fn build_patch(
    record: &ValidatedRecord,
    article: Option<Vec<Block>>,
    changed: &[&'static str],
    persisted: &PersistedDocument,
) -> DocumentPatch {
    let mut patch = DocumentPatch::default();

    for field in changed {
        match *field {
            "term" => patch.term = Some(record.term.clone()),
            "definition" => patch.definition = Some(record.definition.clone()),
            "category" => patch.category = Some(record.category),
            "article" => patch.article = Some(article.clone()),
            "seoTitle" => patch.seo_title = Some(record.seo_title.clone()),
            "metaDescription" => patch.meta_description = Some(record.meta_description.clone()),
            "noindex" => patch.noindex = Some(record.noindex),
            _ => {}
        }
    }

    if persisted.created_at.is_none() {
        patch.created_at = Some(Utc::now());
    }

    patch
}
