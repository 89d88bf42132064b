//! Batch-wide natural-key collision detection.
//!
//! Runs after all slugs are derived and before any remote call: a batch
//! with a shared slug must never produce a single write.

use std::collections::BTreeMap;

use termsync_shared::{CollisionError, CollisionGroup, Result, TermSyncError, ValidatedRecord};

/// Check that every record's slug is unique within the batch.
///
/// Fails with *every* colliding group — each contested slug with all of
/// its conflicting display names — not just the first one found. Groups
/// are reported in slug order; names within a group keep input order.
pub fn check_collisions(records: &[ValidatedRecord]) -> Result<()> {
    let mut by_slug: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
    for record in records {
        by_slug
            .entry(record.slug.as_str())
            .or_default()
            .push(record.term.as_str());
    }

    let groups: Vec<CollisionGroup> = by_slug
        .into_iter()
        .filter(|(_, terms)| terms.len() > 1)
        .map(|(slug, terms)| CollisionGroup {
            slug: slug.to_string(),
            terms: terms.into_iter().map(String::from).collect(),
        })
        .collect();

    if groups.is_empty() {
        Ok(())
    } else {
        Err(TermSyncError::Collision(CollisionError { groups }))
    }
}
