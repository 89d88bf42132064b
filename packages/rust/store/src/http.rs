//! HTTP implementation of the [`DocumentStore`] boundary.
//!
//! Speaks the content store's REST API:
//! - `GET    {endpoint}/datasets/{dataset}/documents/glossary-term/{slug}`
//! - `POST   {endpoint}/datasets/{dataset}/documents`
//! - `PATCH  {endpoint}/datasets/{dataset}/documents/{id}`
//!
//! All requests carry a bearer token. Transport and HTTP-status failures
//! map to [`TermSyncError::Remote`]; a 404 on lookup is the regular
//! "not found" outcome, not an error.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Serialize;
use tracing::debug;
use uuid::Uuid;

use termsync_shared::{Result, StoreConfig, TermSyncError};

use crate::{DocumentPatch, DocumentStore, NewDocument, PersistedDocument};

/// User-Agent string for store requests.
const USER_AGENT: &str = concat!("termsync/", env!("CARGO_PKG_VERSION"));

/// Maximum number of redirects to follow.
const MAX_REDIRECTS: usize = 3;

/// Document type segment in the store's REST paths.
const DOCUMENT_TYPE: &str = "glossary-term";

/// HTTP client for the remote content store.
pub struct HttpStore {
    client: Client,
    endpoint: String,
    dataset: String,
    token: String,
}

impl HttpStore {
    /// Build a store client from config plus the resolved API token.
    pub fn new(config: &StoreConfig, token: impl Into<String>) -> Result<Self> {
        // Validate the endpoint up front so a bad config fails at startup
        let endpoint = config.endpoint_url()?.to_string();

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| TermSyncError::remote(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            endpoint: endpoint.trim_end_matches('/').to_string(),
            dataset: config.dataset.clone(),
            token: token.into(),
        })
    }

    fn url(&self, tail: &str) -> String {
        format!("{}/datasets/{}/{tail}", self.endpoint, self.dataset)
    }
}

/// Create body: the new document plus its client-generated identity.
#[derive(Serialize)]
struct CreateBody<'a> {
    id: &'a str,
    #[serde(flatten)]
    doc: &'a NewDocument,
}

#[async_trait]
impl DocumentStore for HttpStore {
    async fn fetch_by_slug(&self, slug: &str) -> Result<Option<PersistedDocument>> {
        let url = self.url(&format!("documents/{DOCUMENT_TYPE}/{slug}"));

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.token)
            .send()
            .await
            .map_err(|e| TermSyncError::remote(format!("{url}: {e}")))?;

        match response.status() {
            StatusCode::NOT_FOUND => {
                debug!(slug, "document not found in store");
                Ok(None)
            }
            status if status.is_success() => {
                let doc: PersistedDocument = response
                    .json()
                    .await
                    .map_err(|e| TermSyncError::remote(format!("{url}: invalid body: {e}")))?;
                debug!(slug, id = %doc.id, "document resolved");
                Ok(Some(doc))
            }
            status => Err(TermSyncError::remote(format!("{url}: HTTP {status}"))),
        }
    }

    async fn create(&self, doc: &NewDocument) -> Result<PersistedDocument> {
        let url = self.url("documents");
        let id = Uuid::now_v7().to_string();

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .json(&CreateBody { id: &id, doc })
            .send()
            .await
            .map_err(|e| TermSyncError::remote(format!("{url}: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TermSyncError::remote(format!("{url}: HTTP {status}")));
        }

        debug!(slug = %doc.slug, %id, "document created");

        Ok(PersistedDocument {
            id,
            slug: doc.slug.clone(),
            term: doc.term.clone(),
            definition: doc.definition.clone(),
            category: doc.category,
            article: doc.article.clone(),
            seo_title: doc.seo_title.clone(),
            meta_description: doc.meta_description.clone(),
            noindex: doc.noindex,
            created_at: Some(doc.created_at),
        })
    }

    async fn patch(&self, id: &str, patch: &DocumentPatch) -> Result<()> {
        let url = self.url(&format!("documents/{id}"));

        let response = self
            .client
            .patch(&url)
            .bearer_auth(&self.token)
            .json(patch)
            .send()
            .await
            .map_err(|e| TermSyncError::remote(format!("{url}: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(TermSyncError::remote(format!("{url}: HTTP {status}")));
        }

        debug!(%id, "document patched");
        Ok(())
    }
}
