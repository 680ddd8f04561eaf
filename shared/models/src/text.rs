/// Canonical form used for header matching, vocabularies and reconciliation keys:
/// trimmed, internal whitespace (tabs and line breaks included) collapsed to a
/// single space, lower-cased.
pub fn normalize_text(value: &str) -> String {
    value
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_collapses_and_folds() {
        assert_eq!(normalize_text("  Description\r\nof\tGoods "), "description of goods");
        assert_eq!(normalize_text("WHEAT"), "wheat");
        assert_eq!(normalize_text("   "), "");
    }

    #[test]
    fn test_normalize_keeps_units_distinct() {
        assert_ne!(normalize_text("25kg"), normalize_text("25 kg"));
    }
}
