//! Plain-text to structured rich-text block conversion.
//!
//! The remote store persists long-form articles as an array of block
//! objects (paragraphs with styled spans) rather than a single string.
//! This crate converts the batch format's plain-text articles (paragraphs
//! separated by blank lines) into that block structure.
//!
//! Block and span keys are **deterministic** — derived from the block's
//! position and a content hash — so identical input always produces
//! byte-identical output. Reconciliation depends on this: a re-imported,
//! unchanged article must serialize to exactly the same bytes as the one
//! already persisted.

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Matches one or more blank lines (paragraph separators).
static PARAGRAPH_SPLIT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n[ \t]*\n+").expect("paragraph split regex"));

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

/// One paragraph-level block in the store's rich-text representation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    /// Stable key identifying this block within the array.
    #[serde(rename = "_key")]
    pub key: String,
    /// Block kind discriminator; always `"block"` for text paragraphs.
    #[serde(rename = "_type")]
    pub block_type: String,
    /// Paragraph style; imported articles use `"normal"`.
    pub style: String,
    /// Inline spans making up the paragraph text.
    pub children: Vec<Span>,
}

/// An inline text span within a block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    /// Stable key identifying this span within its block.
    #[serde(rename = "_key")]
    pub key: String,
    /// Span kind discriminator; always `"span"`.
    #[serde(rename = "_type")]
    pub span_type: String,
    /// The span's text content.
    pub text: String,
    /// Formatting marks; imported plain text carries none.
    #[serde(default)]
    pub marks: Vec<String>,
}

// ---------------------------------------------------------------------------
// Conversion
// ---------------------------------------------------------------------------

/// Convert plain article text into the store's block structure.
///
/// Paragraphs are split on blank-line runs; line breaks inside a paragraph
/// are collapsed to single spaces. Empty paragraphs are dropped. Returns
/// an empty vector for whitespace-only input.
pub fn text_to_blocks(text: &str) -> Vec<Block> {
    PARAGRAPH_SPLIT_RE
        .split(text)
        .map(collapse_whitespace)
        .filter(|p| !p.is_empty())
        .enumerate()
        .map(|(i, paragraph)| {
            let block_key = content_key("block", i, &paragraph);
            let span_key = content_key("span", i, &paragraph);
            Block {
                key: block_key,
                block_type: "block".into(),
                style: "normal".into(),
                children: vec![Span {
                    key: span_key,
                    span_type: "span".into(),
                    text: paragraph,
                    marks: Vec::new(),
                }],
            }
        })
        .collect()
}

/// Size of the serialized block array, in bytes.
///
/// Used by the differ as a coarse change proxy for article content.
pub fn serialized_len(blocks: &[Block]) -> usize {
    serde_json::to_string(blocks).map(|s| s.len()).unwrap_or(0)
}

/// Collapse internal line breaks and repeated whitespace into single spaces.
fn collapse_whitespace(paragraph: &str) -> String {
    paragraph.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Derive a stable 12-hex-char key from position and content.
fn content_key(prefix: &str, index: usize, text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(prefix.as_bytes());
    hasher.update(index.to_le_bytes());
    hasher.update(text.as_bytes());
    let digest = format!("{:x}", hasher.finalize());
    digest[..12].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_on_blank_lines() {
        let blocks = text_to_blocks("First paragraph.\n\nSecond paragraph.");
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].children[0].text, "First paragraph.");
        assert_eq!(blocks[1].children[0].text, "Second paragraph.");
    }

    #[test]
    fn collapses_inner_line_breaks() {
        let blocks = text_to_blocks("A line\nwrapped onto\nthree lines.\n\nNext.");
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].children[0].text, "A line wrapped onto three lines.");
    }

    #[test]
    fn tolerates_whitespace_only_separators() {
        let blocks = text_to_blocks("One.\n   \n\nTwo.");
        assert_eq!(blocks.len(), 2);
    }

    #[test]
    fn empty_input_yields_no_blocks() {
        assert!(text_to_blocks("").is_empty());
        assert!(text_to_blocks("  \n\n  \n").is_empty());
    }

    #[test]
    fn output_is_deterministic() {
        let text = "Opeklina je poškodba kože.\n\nHladite jo z mlačno vodo.";
        let a = serde_json::to_string(&text_to_blocks(text)).unwrap();
        let b = serde_json::to_string(&text_to_blocks(text)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn identical_paragraphs_get_distinct_keys() {
        let blocks = text_to_blocks("Same text.\n\nSame text.");
        assert_eq!(blocks.len(), 2);
        assert_ne!(blocks[0].key, blocks[1].key);
    }

    #[test]
    fn keys_are_twelve_hex_chars() {
        let blocks = text_to_blocks("A paragraph.");
        assert_eq!(blocks[0].key.len(), 12);
        assert!(blocks[0].key.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(blocks[0].children[0].key.len(), 12);
        assert_ne!(blocks[0].key, blocks[0].children[0].key);
    }

    #[test]
    fn wire_format_uses_underscore_discriminators() {
        let blocks = text_to_blocks("Hello.");
        let json = serde_json::to_string(&blocks).unwrap();
        assert!(json.contains("\"_key\""));
        assert!(json.contains("\"_type\":\"block\""));
        assert!(json.contains("\"_type\":\"span\""));
        assert!(json.contains("\"style\":\"normal\""));
    }

    #[test]
    fn serialized_len_is_stable_and_content_sensitive() {
        let a = text_to_blocks("Alpha paragraph.");
        let b = text_to_blocks("A much longer paragraph with more words in it.");
        assert_eq!(serialized_len(&a), serialized_len(&a));
        assert_ne!(serialized_len(&a), serialized_len(&b));
        assert_eq!(serialized_len(&[]), 2); // "[]"
    }
}
