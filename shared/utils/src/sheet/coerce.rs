//! Value Coercion
//!
//! Free-form cell content to a finite number, or `None` when there is no
//! number to be had. A blank cell is never read as zero.

use packtally_models::CellValue;
use regex::Regex;
use std::sync::OnceLock;

fn currency_and_grouping() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"[\p{Sc},]").expect("static pattern"))
}

fn leading_decimal() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[+-]?(?:\d+(?:\.\d*)?|\.\d+)(?:[eE][+-]?\d+)?").expect("static pattern")
    })
}

pub fn coerce_number(cell: &CellValue) -> Option<f64> {
    match cell {
        CellValue::Number(n) => n.is_finite().then_some(*n),
        CellValue::Text(text) => parse_number(text),
        CellValue::Empty => None,
    }
}

/// Strips currency symbols and thousands separators, then reads the leading
/// decimal number. "₹ 1,250.50" is 1250.5, "10 bags" is 10, "N/A" is `None`.
pub fn parse_number(text: &str) -> Option<f64> {
    let cleaned = currency_and_grouping().replace_all(text, "");
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return None;
    }

    leading_decimal()
        .find(cleaned)
        .and_then(|m| m.as_str().parse::<f64>().ok())
        .filter(|n| n.is_finite())
}
