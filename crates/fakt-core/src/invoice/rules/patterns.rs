//! Regex patterns shared by the field extractors.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Norwegian amount format: optional sign, 1-3 leading digits,
    // space-grouped thousands, comma decimals (1 234,56)
    pub static ref NUMBER_PATTERN: Regex = Regex::new(
        r"[-+]?\d{1,3}(?: \d{3})*(?:,\d+)?"
    ).unwrap();

    // D.M.YY through DD.MM.YYYY
    pub static ref DATE_DMY: Regex = Regex::new(
        r"\b(\d{1,2})\.(\d{1,2})\.(\d{4}|\d{2})\b"
    ).unwrap();

    // d.m.yy - d.m.yy billing period, whitespace tolerated around the
    // dash and inside the date tokens
    pub static ref DATE_RANGE: Regex = Regex::new(
        r"\b(\d{1,2})\s*\.\s*(\d{1,2})\s*\.\s*(\d{2})\s*-\s*(\d{1,2})\s*\.\s*(\d{1,2})\s*\.\s*(\d{2})\b"
    ).unwrap();
}

/// Build the pattern matching an amount immediately followed by `unit`.
///
/// Compiled per call because the unit label is configuration, not a fixed
/// pattern; the label is escaped before it enters the expression.
pub fn unit_pattern(unit: &str) -> Regex {
    Regex::new(&format!(
        r"(?i)([-+]?\d{{1,3}}(?:\s*\d{{3}})*(?:,\d+)?)\s*{}",
        regex::escape(unit)
    ))
    .unwrap()
}
