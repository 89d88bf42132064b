//! Remote content-store client and document wire model.
//!
//! The pipeline only ever touches the store through the [`DocumentStore`]
//! trait: look up a document by its natural key, create a new one, or
//! patch an existing one. [`HttpStore`] implements the trait against the
//! store's HTTP API; tests substitute in-memory implementations.

mod http;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use termsync_richtext::Block;
use termsync_shared::{Category, Result};

pub use http::HttpStore;

// ---------------------------------------------------------------------------
// Wire model
// ---------------------------------------------------------------------------

/// The store's view of a previously imported glossary term.
///
/// The pipeline reads and patches these documents; it never deletes them.
/// `created_at` is immutable once set — updates may only backfill it when
/// it is missing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedDocument {
    /// Store-side document identity (distinct from the slug).
    pub id: String,
    /// Natural key addressing this document.
    pub slug: String,
    pub term: String,
    pub definition: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    /// Long-form article as structured rich-text blocks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub article: Option<Vec<Block>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seo_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta_description: Option<String>,
    #[serde(default)]
    pub noindex: bool,
    /// When the document was first created. Absent on documents imported
    /// by older tooling; backfilled on the next update.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Payload for creating a new document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewDocument {
    pub slug: String,
    pub term: String,
    pub definition: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub article: Option<Vec<Block>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seo_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meta_description: Option<String>,
    #[serde(default)]
    pub noindex: bool,
    /// Creation timestamp, stamped by the pipeline at create time.
    pub created_at: DateTime<Utc>,
}

/// Partial update for an existing document.
///
/// Only fields present in the patch are touched on the store side; `None`
/// fields are omitted from the serialized body entirely. Optional document
/// fields use a nested `Option` so a patch can distinguish "leave alone"
/// (`None`) from "clear" (`Some(None)`).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub term: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub definition: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<Option<Category>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub article: Option<Option<Vec<Block>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seo_title: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta_description: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub noindex: Option<bool>,
    /// Set only as a backfill when the persisted document has no
    /// creation timestamp. Never overwrites an existing one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl DocumentPatch {
    /// Whether the patch carries no changes at all.
    pub fn is_empty(&self) -> bool {
        *self == DocumentPatch::default()
    }
}

// ---------------------------------------------------------------------------
// Store trait
// ---------------------------------------------------------------------------

/// Boundary contract for the remote document store.
///
/// Failures of any operation are per-record [`TermSyncError::Remote`]
/// errors; the pipeline recovers them locally and continues with the
/// next record.
///
/// [`TermSyncError::Remote`]: termsync_shared::TermSyncError::Remote
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Look up a document by natural key. `Ok(None)` means "not found".
    async fn fetch_by_slug(&self, slug: &str) -> Result<Option<PersistedDocument>>;

    /// Create a new document, returning the persisted view.
    async fn create(&self, doc: &NewDocument) -> Result<PersistedDocument>;

    /// Apply a partial update to an existing document.
    async fn patch(&self, id: &str, patch: &DocumentPatch) -> Result<()>;
}
