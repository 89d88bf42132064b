//! Natural-key derivation.
//!
//! Slugs address persisted documents and detect in-batch duplicates, so
//! derivation must be pure and deterministic: identical input always
//! yields an identical slug.

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

/// Derive a slug from a display name.
///
/// Case-folds, decomposes accented characters (NFD) and drops the
/// combining marks, replaces every run of non-alphanumeric characters
/// with a single `-`, and trims leading/trailing separators.
pub fn slugify(name: &str) -> String {
    let folded: String = name
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase();

    let mut slug = String::with_capacity(folded.len());
    let mut pending_sep = false;

    for c in folded.chars() {
        if c.is_alphanumeric() {
            if pending_sep && !slug.is_empty() {
                slug.push('-');
            }
            pending_sep = false;
            slug.push(c);
        } else {
            pending_sep = true;
        }
    }

    slug
}
