//! Identifier normalization and locale-style ordering.
//!
//! # Responsibility
//! - Fold country/organization tokens into their canonical lowercase form.
//! - Split comma-separated record fields into normalized tokens.
//! - Provide the single comparator used for every user-visible sort.
//!
//! # Invariants
//! - Identity comparisons always run on the trimmed, lowercased form.
//! - `locale_cmp` is a strict total order: it returns `Equal` only for
//!   byte-identical strings.

use std::cmp::Ordering;

/// Trims and lowercases one identifier token.
pub fn normalize_token(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Normalizes a country lookup key.
///
/// Same as [`normalize_token`], plus `_` is read as a space so URL-style keys
/// (`united_kingdom`) match dataset tokens (`united kingdom`).
pub fn normalize_country_key(raw: &str) -> String {
    normalize_token(raw).replace('_', " ")
}

/// Splits a comma-separated field into normalized tokens.
///
/// Empty tokens are kept; callers decide whether blanks are meaningful.
pub fn split_tokens(field: &str) -> impl Iterator<Item = String> + '_ {
    field.split(',').map(normalize_token)
}

/// Compares two strings the way a user-facing list should be ordered.
///
/// Case-insensitive first; ties put lowercase before uppercase, then fall
/// back to byte order.
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| case_rank(a).cmp(&case_rank(b)))
        .then_with(|| a.cmp(b))
}

fn case_rank(value: &str) -> Vec<u8> {
    value
        .chars()
        .map(|c| if c.is_uppercase() { 1 } else { 0 })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{locale_cmp, normalize_country_key, normalize_token, split_tokens};
    use std::cmp::Ordering;

    #[test]
    fn normalize_token_trims_and_lowercases() {
        assert_eq!(normalize_token("  US "), "us");
    }

    #[test]
    fn country_key_converts_underscores() {
        assert_eq!(normalize_country_key(" United_Kingdom"), "united kingdom");
    }

    #[test]
    fn split_tokens_keeps_blank_entries() {
        let tokens: Vec<String> = split_tokens("US, fr,,").collect();
        assert_eq!(tokens, vec!["us", "fr", "", ""]);
    }

    #[test]
    fn locale_cmp_ignores_case_before_tiebreak() {
        assert_eq!(locale_cmp("apple", "Banana"), Ordering::Less);
        assert_eq!(locale_cmp("a", "A"), Ordering::Less);
        assert_eq!(locale_cmp("A", "a"), Ordering::Greater);
        assert_eq!(locale_cmp("same", "same"), Ordering::Equal);
    }
}
