//! Per-record field validation.
//!
//! Each raw record either passes its *entire* constraint set and becomes
//! a [`ValidatedRecord`], or fails with every violated constraint listed.
//! The batch-level wrapper aggregates failures across all records before
//! aborting, so the operator sees the full picture in one run.

use std::str::FromStr;

use serde_json::Value;

use termsync_shared::{
    BatchValidationError, Category, FieldError, RecordErrors, Result, TermSyncError,
    ValidatedRecord,
};

use crate::loader::{RawRecord, json_type_name};
use crate::slug;

/// Definition length bounds, in characters.
pub const DEFINITION_MIN_CHARS: usize = 60;
pub const DEFINITION_MAX_CHARS: usize = 200;

/// SEO field limits, in characters.
pub const SEO_TITLE_MAX_CHARS: usize = 60;
pub const META_DESCRIPTION_MAX_CHARS: usize = 160;

/// Validate every record in the batch, aggregating all failures.
///
/// Returns the validated records (in input order) only when the whole
/// batch is clean; otherwise fails with every record's violations.
pub fn validate_batch(records: &[RawRecord]) -> Result<Vec<ValidatedRecord>> {
    let mut validated = Vec::with_capacity(records.len());
    let mut failures: Vec<RecordErrors> = Vec::new();

    for (index, raw) in records.iter().enumerate() {
        match validate_record(raw, index) {
            Ok(record) => validated.push(record),
            Err(errors) => failures.push(errors),
        }
    }

    if failures.is_empty() {
        Ok(validated)
    } else {
        Err(TermSyncError::Validation(BatchValidationError {
            records: failures,
        }))
    }
}

/// Validate a single record against the full constraint set.
///
/// Pure: no side effects, and the error path collects every violation
/// rather than stopping at the first.
pub fn validate_record(
    raw: &RawRecord,
    index: usize,
) -> std::result::Result<ValidatedRecord, RecordErrors> {
    let mut errors: Vec<FieldError> = Vec::new();

    let term = match required_string(raw, "term", &mut errors) {
        Some(t) => t,
        None => String::new(),
    };

    let definition = match required_string(raw, "definition", &mut errors) {
        Some(d) => {
            let chars = d.chars().count();
            if chars < DEFINITION_MIN_CHARS {
                errors.push(FieldError::new(
                    "definition",
                    format!("too short ({chars} chars, minimum {DEFINITION_MIN_CHARS})"),
                ));
            } else if chars > DEFINITION_MAX_CHARS {
                errors.push(FieldError::new(
                    "definition",
                    format!("too long ({chars} chars, maximum {DEFINITION_MAX_CHARS})"),
                ));
            }
            d
        }
        None => String::new(),
    };

    let category = optional_string(raw, "category", &mut errors).and_then(|s| {
        match Category::from_str(&s) {
            Ok(cat) => Some(cat),
            Err(msg) => {
                errors.push(FieldError::new("category", msg));
                None
            }
        }
    });

    let explicit_slug = optional_string(raw, "slug", &mut errors);
    if let Some(s) = &explicit_slug {
        if s.is_empty() {
            errors.push(FieldError::new("slug", "must not be empty when present"));
        }
    }

    let article = optional_string(raw, "fullArticle", &mut errors).filter(|s| !s.is_empty());

    let seo_title = optional_string(raw, "seoTitle", &mut errors);
    if let Some(t) = &seo_title {
        let chars = t.chars().count();
        if chars > SEO_TITLE_MAX_CHARS {
            errors.push(FieldError::new(
                "seoTitle",
                format!("too long ({chars} chars, maximum {SEO_TITLE_MAX_CHARS})"),
            ));
        }
    }

    let meta_description = optional_string(raw, "metaDescription", &mut errors);
    if let Some(d) = &meta_description {
        let chars = d.chars().count();
        if chars > META_DESCRIPTION_MAX_CHARS {
            errors.push(FieldError::new(
                "metaDescription",
                format!("too long ({chars} chars, maximum {META_DESCRIPTION_MAX_CHARS})"),
            ));
        }
    }

    let noindex = optional_bool(raw, "noindex", &mut errors).unwrap_or(false);

    if !errors.is_empty() {
        return Err(RecordErrors {
            index,
            term: raw
                .get("term")
                .and_then(Value::as_str)
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty()),
            errors,
        });
    }

    let slug = match explicit_slug {
        // Explicit slugs are used verbatim (trimmed), never re-normalized
        Some(s) => s,
        None => slug::slugify(&term),
    };

    Ok(ValidatedRecord {
        term,
        slug,
        definition,
        category,
        article,
        seo_title,
        meta_description,
        noindex,
    })
}

// ---------------------------------------------------------------------------
// Field extraction
// ---------------------------------------------------------------------------

/// Extract a required, non-empty-after-trim string field.
fn required_string(
    raw: &RawRecord,
    field: &'static str,
    errors: &mut Vec<FieldError>,
) -> Option<String> {
    match raw.get(field) {
        None | Some(Value::Null) => {
            errors.push(FieldError::new(field, "required field is missing"));
            None
        }
        Some(Value::String(s)) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                errors.push(FieldError::new(field, "must not be empty"));
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        Some(other) => {
            errors.push(FieldError::new(
                field,
                format!("expected a string, found {}", json_type_name(other)),
            ));
            None
        }
    }
}

/// Extract an optional string field; absent and `null` both mean "absent".
fn optional_string(
    raw: &RawRecord,
    field: &'static str,
    errors: &mut Vec<FieldError>,
) -> Option<String> {
    match raw.get(field) {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s.trim().to_string()),
        Some(other) => {
            errors.push(FieldError::new(
                field,
                format!("expected a string, found {}", json_type_name(other)),
            ));
            None
        }
    }
}

/// Extract an optional boolean field.
fn optional_bool(
    raw: &RawRecord,
    field: &'static str,
    errors: &mut Vec<FieldError>,
) -> Option<bool> {
    match raw.get(field) {
        None | Some(Value::Null) => None,
        Some(Value::Bool(b)) => Some(*b),
        Some(other) => {
            errors.push(FieldError::new(
                field,
                format!("expected a boolean, found {}", json_type_name(other)),
            ));
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::parse_batch;

    fn record(json: &str) -> RawRecord {
        let records = parse_batch(&format!("[{json}]")).expect("parse test record");
        records.into_iter().next().unwrap()
    }

    fn definition_of(chars: usize) -> String {
        "d".repeat(chars)
    }

    #[test]
    fn minimal_valid_record() {
        let raw = record(&format!(
            "{{\"term\": \"Abrazija\", \"definition\": \"{}\"}}",
            definition_of(80)
        ));
        let rec = validate_record(&raw, 0).expect("should validate");
        assert_eq!(rec.term, "Abrazija");
        assert_eq!(rec.slug, "abrazija");
        assert_eq!(rec.category, None);
        assert!(!rec.noindex);
    }

    #[test]
    fn definition_boundary_values() {
        for (chars, ok) in [(59, false), (60, true), (200, true), (201, false)] {
            let raw = record(&format!(
                "{{\"term\": \"T\", \"definition\": \"{}\"}}",
                definition_of(chars)
            ));
            let result = validate_record(&raw, 0);
            assert_eq!(result.is_ok(), ok, "definition of {chars} chars");
            if chars == 59 {
                let errors = result.clone().unwrap_err().errors;
                assert!(errors[0].message.contains("too short"));
            }
            if chars == 201 {
                let errors = result.unwrap_err().errors;
                assert!(errors[0].message.contains("too long"));
            }
        }
    }

    #[test]
    fn definition_length_counts_characters_not_bytes() {
        // 60 two-byte characters: valid by character count
        let raw = record(&format!(
            "{{\"term\": \"Šok\", \"definition\": \"{}\"}}",
            "č".repeat(60)
        ));
        assert!(validate_record(&raw, 0).is_ok());
    }

    #[test]
    fn aggregates_every_violation() {
        let raw = record("{\"definition\": \"kratko\", \"category\": \"misc\", \"noindex\": \"yes\"}");
        let failure = validate_record(&raw, 4).unwrap_err();
        assert_eq!(failure.index, 4);
        assert!(failure.term.is_none());

        let fields: Vec<&str> = failure.errors.iter().map(|e| e.field).collect();
        assert!(fields.contains(&"term"));
        assert!(fields.contains(&"definition"));
        assert!(fields.contains(&"category"));
        assert!(fields.contains(&"noindex"));
    }

    #[test]
    fn wrong_type_is_a_field_error() {
        let raw = record("{\"term\": \"T\", \"definition\": 42}");
        let failure = validate_record(&raw, 0).unwrap_err();
        assert_eq!(failure.errors.len(), 1);
        assert!(failure.errors[0].message.contains("expected a string, found a number"));
    }

    #[test]
    fn trims_string_fields() {
        let raw = record(&format!(
            "{{\"term\": \"  Opeklina  \", \"definition\": \"  {}  \", \"seoTitle\": \"  Naslov  \"}}",
            definition_of(70)
        ));
        let rec = validate_record(&raw, 0).unwrap();
        assert_eq!(rec.term, "Opeklina");
        assert_eq!(rec.definition.chars().count(), 70);
        assert_eq!(rec.seo_title.as_deref(), Some("Naslov"));
    }

    #[test]
    fn explicit_slug_is_used_verbatim() {
        let raw = record(&format!(
            "{{\"term\": \"Prva pomoč\", \"slug\": \" Custom-Slug \", \"definition\": \"{}\"}}",
            definition_of(80)
        ));
        let rec = validate_record(&raw, 0).unwrap();
        assert_eq!(rec.slug, "Custom-Slug");
    }

    #[test]
    fn empty_explicit_slug_is_rejected() {
        let raw = record(&format!(
            "{{\"term\": \"T\", \"slug\": \"   \", \"definition\": \"{}\"}}",
            definition_of(80)
        ));
        let failure = validate_record(&raw, 0).unwrap_err();
        assert_eq!(failure.errors[0].field, "slug");
    }

    #[test]
    fn seo_field_limits() {
        let raw = record(&format!(
            "{{\"term\": \"T\", \"definition\": \"{}\", \"seoTitle\": \"{}\", \"metaDescription\": \"{}\"}}",
            definition_of(80),
            "t".repeat(61),
            "m".repeat(161)
        ));
        let failure = validate_record(&raw, 0).unwrap_err();
        let fields: Vec<&str> = failure.errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["seoTitle", "metaDescription"]);
    }

    #[test]
    fn category_enum_membership() {
        let raw = record(&format!(
            "{{\"term\": \"T\", \"definition\": \"{}\", \"category\": \"injuries\"}}",
            definition_of(80)
        ));
        let rec = validate_record(&raw, 0).unwrap();
        assert_eq!(rec.category, Some(Category::Injuries));
    }

    #[test]
    fn empty_article_becomes_absent() {
        let raw = record(&format!(
            "{{\"term\": \"T\", \"definition\": \"{}\", \"fullArticle\": \"   \"}}",
            definition_of(80)
        ));
        let rec = validate_record(&raw, 0).unwrap();
        assert!(rec.article.is_none());
    }

    #[test]
    fn batch_validation_collects_all_failing_records() {
        let records = parse_batch(&format!(
            "[{{\"term\": \"A\", \"definition\": \"{}\"}}, {{\"term\": \"B\", \"definition\": \"x\"}}, {{\"definition\": \"y\"}}]",
            definition_of(80)
        ))
        .unwrap();

        let err = validate_batch(&records).unwrap_err();
        let TermSyncError::Validation(batch) = err else {
            panic!("expected validation error");
        };
        assert_eq!(batch.records.len(), 2);
        assert_eq!(batch.records[0].index, 1);
        assert_eq!(batch.records[1].index, 2);
    }

    #[test]
    fn clean_batch_passes_in_order() {
        let records = parse_batch(&format!(
            "[{{\"term\": \"B\", \"definition\": \"{d}\"}}, {{\"term\": \"A\", \"definition\": \"{d}\"}}]",
            d = definition_of(80)
        ))
        .unwrap();

        let validated = validate_batch(&records).unwrap();
        assert_eq!(validated.len(), 2);
        assert_eq!(validated[0].term, "B");
        assert_eq!(validated[1].term, "A");
    }
}
