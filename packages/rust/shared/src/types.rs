//! Core domain types for the termsync reconciliation pipeline.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Category
// ---------------------------------------------------------------------------

/// Fixed glossary category taxonomy.
///
/// The wire spelling is kebab-case (`first-aid`), matching both the input
/// batch format and the remote store's schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    FirstAid,
    Injuries,
    Illnesses,
    Procedures,
    Equipment,
}

impl Category {
    /// Every valid category, in schema order.
    pub const ALL: &'static [Category] = &[
        Category::FirstAid,
        Category::Injuries,
        Category::Illnesses,
        Category::Procedures,
        Category::Equipment,
    ];

    /// The kebab-case wire spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::FirstAid => "first-aid",
            Category::Injuries => "injuries",
            Category::Illnesses => "illnesses",
            Category::Procedures => "procedures",
            Category::Equipment => "equipment",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Category::ALL
            .iter()
            .find(|c| c.as_str() == s)
            .copied()
            .ok_or_else(|| {
                let valid: Vec<&str> = Category::ALL.iter().map(|c| c.as_str()).collect();
                format!("unknown value {s:?} (expected one of: {})", valid.join(", "))
            })
    }
}

// ---------------------------------------------------------------------------
// ValidatedRecord
// ---------------------------------------------------------------------------

/// A fully validated, normalized input record.
///
/// Exists only for records whose *entire* constraint set passed; partially
/// valid records never reach the reconciliation phase. String fields are
/// trimmed, the natural key is resolved, and optionality is explicit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedRecord {
    /// Display name of the glossary term.
    pub term: String,
    /// Resolved natural key addressing the persisted document.
    pub slug: String,
    /// Short definition text (60–200 characters).
    pub definition: String,
    /// Optional taxonomy assignment.
    pub category: Option<Category>,
    /// Optional long-form article as plain text paragraphs.
    pub article: Option<String>,
    /// Optional SEO title override (≤ 60 characters).
    pub seo_title: Option<String>,
    /// Optional meta description (≤ 160 characters).
    pub meta_description: Option<String>,
    /// Whether search engines should skip the term's page.
    pub noindex: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn category_wire_spelling_roundtrip() {
        for cat in Category::ALL {
            let parsed = Category::from_str(cat.as_str()).expect("parse category");
            assert_eq!(parsed, *cat);
        }
    }

    #[test]
    fn category_serde_uses_kebab_case() {
        let json = serde_json::to_string(&Category::FirstAid).expect("serialize");
        assert_eq!(json, "\"first-aid\"");
        let parsed: Category = serde_json::from_str("\"injuries\"").expect("deserialize");
        assert_eq!(parsed, Category::Injuries);
    }

    #[test]
    fn category_rejects_unknown_value() {
        let err = Category::from_str("misc").unwrap_err();
        assert!(err.contains("unknown value"));
        assert!(err.contains("first-aid"));
    }
}
