//! Raw-text tokenization for roster and prize ingestion
//!
//! Entries are separated by newline or comma, trimmed, empties dropped.
//! File uploads (plain text or CSV) are fed through the same path: the
//! content is treated as raw delimited text, never as columnar CSV.

/// Split raw input into trimmed, non-empty tokens in input order.
pub fn tokenize(raw: &str) -> Vec<&str> {
    raw.split(['\n', ','])
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .collect()
}
