//! Amount extraction for space-grouped, comma-decimal invoice text.

use crate::error::ExtractionError;

use super::patterns::{unit_pattern, NUMBER_PATTERN};

type Result<T> = std::result::Result<T, ExtractionError>;

/// Pull the first amount out of a noisy line ("kr 1 234,56 due" -> 1234.56).
pub fn extract_float(text: &str) -> Result<f64> {
    let m = NUMBER_PATTERN
        .find(text)
        .ok_or(ExtractionError::NoMatch("number"))?;

    let cleaned = m.as_str().replace(' ', "").replace(',', ".");
    cleaned.parse().map_err(|_| ExtractionError::Malformed {
        kind: "number",
        value: m.as_str().to_string(),
    })
}

/// Pull the first amount immediately followed by `unit`, matched
/// case-insensitively ("1 200,5 kWh" with unit "kwh" -> 1200.5).
pub fn extract_unit(text: &str, unit: &str) -> Result<f64> {
    let m = unit_pattern(unit)
        .find(text)
        .ok_or(ExtractionError::NoMatch("unit-qualified number"))?;

    // The match still carries grouping spaces and the unit label itself;
    // keep only digits, sign and separators.
    let cleaned: String = m
        .as_str()
        .replace(',', ".")
        .chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.'))
        .collect();

    cleaned.parse().map_err(|_| ExtractionError::Malformed {
        kind: "unit-qualified number",
        value: m.as_str().to_string(),
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_extract_float_with_thousands_and_decimals() {
        assert_eq!(extract_float("kr 1 234,56 due").unwrap(), 1234.56);
    }

    #[test]
    fn test_extract_float_plain_integer() {
        assert_eq!(extract_float("betalt 400 i fjor").unwrap(), 400.0);
    }

    #[test]
    fn test_extract_float_signed() {
        assert_eq!(extract_float("korrigert -12,50").unwrap(), -12.5);
    }

    #[test]
    fn test_extract_float_none() {
        assert!(matches!(
            extract_float("no digits here"),
            Err(ExtractionError::NoMatch("number"))
        ));
    }

    #[test]
    fn test_extract_unit_case_insensitive() {
        assert_eq!(
            extract_unit("Usage: 1 200,5 kWh total", "kwh").unwrap(),
            1200.5
        );
    }

    #[test]
    fn test_extract_unit_no_space_before_label() {
        assert_eq!(extract_unit("780,50kWh", "kwh").unwrap(), 780.5);
    }

    #[test]
    fn test_extract_unit_ignores_unlabeled_numbers() {
        // 42 has no unit label; the labeled amount further on wins
        assert_eq!(extract_unit("linje 42 sum 900 kWh", "kwh").unwrap(), 900.0);
    }

    #[test]
    fn test_extract_unit_absent() {
        assert!(matches!(
            extract_unit("1 234,56 kr", "kwh"),
            Err(ExtractionError::NoMatch(_))
        ));
    }
}
