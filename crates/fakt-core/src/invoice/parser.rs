//! Region parsing: anchor search, character windows, field extraction.

use regex::{Regex, RegexBuilder};
use tracing::{debug, warn};

use crate::error::ExtractionError;
use crate::models::config::{ExtractionConfig, Window};
use crate::models::record::InvoiceRecord;

use super::rules::{
    add_capital_spaces, extract_date, extract_date_range, extract_float, extract_unit,
    months_in_range,
};
use super::{Region, RegionKind, Result};

/// A region that failed to parse, with the cause.
#[derive(Debug)]
pub struct RegionFailure {
    /// Tag of the failing region.
    pub region: String,
    /// What went wrong.
    pub error: ExtractionError,
}

/// Outcome of a parse batch: the populated record plus per-region failures.
///
/// A failing region leaves its fields unset on the record and never stops
/// the remaining regions from being parsed.
#[derive(Debug)]
pub struct ParseReport {
    pub record: InvoiceRecord,
    pub failures: Vec<RegionFailure>,
}

impl ParseReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Parses extracted region text into an [`InvoiceRecord`].
///
/// Anchor phrases come from [`ExtractionConfig`] and are compiled once,
/// case-insensitively, at construction.
pub struct RegionParser {
    config: ExtractionConfig,
    currency_anchor: Regex,
    consumption_anchor: Regex,
    address_anchor: Regex,
}

impl RegionParser {
    pub fn new(config: ExtractionConfig) -> Self {
        Self {
            currency_anchor: anchor_pattern(&format!("{} ", config.currency_label)),
            consumption_anchor: anchor_pattern(&config.consumption_marker),
            address_anchor: anchor_pattern(&config.address_marker),
            config,
        }
    }

    /// Parse every region into a fresh record, isolating failures per region.
    pub fn parse(&self, regions: &[Region]) -> ParseReport {
        let mut record = InvoiceRecord::new();
        let mut failures = Vec::new();

        for region in regions {
            let Some(kind) = RegionKind::from_tag(&region.name) else {
                debug!("ignoring unknown region tag {:?}", region.name);
                continue;
            };

            let result = match kind {
                RegionKind::Info => self.parse_address(&mut record, &region.extract),
                RegionKind::Consumption => self.parse_total_usage(&mut record, &region.extract),
                RegionKind::Payment => {
                    self.parse_total_cost_and_deadline(&mut record, &region.extract)
                }
            };

            if let Err(error) = result {
                warn!("region {}: {}", region.name, error);
                failures.push(RegionFailure {
                    region: region.name.clone(),
                    error,
                });
            }
        }

        ParseReport { record, failures }
    }

    /// The amount due sits just before the currency label, the payment
    /// deadline just after it.
    fn parse_total_cost_and_deadline(&self, record: &mut InvoiceRecord, text: &str) -> Result<()> {
        let at = self.find_anchor(&self.currency_anchor, text, &self.config.currency_label)?;
        let (before, after) = char_window(text, at, self.config.payment_window);

        // A stray line break inside the window would pull in numbers from
        // an unrelated line; keep only the segments touching the anchor.
        let cost_text = after_last_newline(&before);
        let date_text = before_first_newline(&after);

        record.total_cost = Some(extract_float(cost_text)?);
        record.invoice_deadline = Some(extract_date(date_text)?);
        Ok(())
    }

    /// The consumption line holds the total kWh and the billing period
    /// together; the month label is derived from the period in the same
    /// pass.
    fn parse_total_usage(&self, record: &mut InvoiceRecord, text: &str) -> Result<()> {
        let at = self.find_anchor(
            &self.consumption_anchor,
            text,
            &self.config.consumption_marker,
        )?;
        let (before, after) = char_window(text, at, self.config.consumption_window);

        // Trim the window to the enclosing line; the marker itself stays
        // inside the kept span.
        let line = format!(
            "{}{}",
            after_last_newline(&before),
            before_first_newline(&after)
        );

        record.total_usage = Some(extract_unit(&line, &self.config.usage_unit)?);

        let range = extract_date_range(&line)?;
        record.invoice_month_str = Some(months_in_range(range.0, range.1));
        record.invoice_range = Some(range);
        Ok(())
    }

    /// The supply address is the first full line after the marker's line.
    fn parse_address(&self, record: &mut InvoiceRecord, text: &str) -> Result<()> {
        let at = self.find_anchor(&self.address_anchor, text, &self.config.address_marker)?;

        let rest = &text[at..];
        let line_start = rest
            .find('\n')
            .map(|idx| idx + 1)
            .ok_or(ExtractionError::NoMatch("address line"))?;
        let line = before_first_newline(&rest[line_start..]);

        record.street = Some(add_capital_spaces(line));
        Ok(())
    }

    fn find_anchor(&self, anchor: &Regex, text: &str, phrase: &str) -> Result<usize> {
        anchor
            .find(text)
            .map(|m| m.start())
            .ok_or_else(|| ExtractionError::AnchorNotFound(phrase.to_string()))
    }
}

fn anchor_pattern(phrase: &str) -> Regex {
    RegexBuilder::new(&regex::escape(phrase))
        .case_insensitive(true)
        .build()
        .unwrap()
}

/// Character-counted window around the byte offset of an anchor match:
/// up to `before` chars ahead of it, up to `after` chars from it on
/// (the anchor itself lands in the after part). Counted in chars, not
/// bytes, since the surrounding text is Norwegian.
fn char_window(text: &str, at: usize, window: Window) -> (String, String) {
    let head: Vec<char> = text[..at].chars().collect();
    let start = head.len().saturating_sub(window.before);
    let before: String = head[start..].iter().collect();
    let after: String = text[at..].chars().take(window.after).collect();
    (before, after)
}

fn after_last_newline(text: &str) -> &str {
    match text.rfind('\n') {
        Some(idx) => &text[idx + 1..],
        None => text,
    }
}

fn before_first_newline(text: &str) -> &str {
    match text.find('\n') {
        Some(idx) => &text[..idx],
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;

    use super::*;

    fn parser() -> RegionParser {
        RegionParser::new(ExtractionConfig::default())
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    const PAYMENT: &str = "Betalingsinformasjon\nÅ betale 1 234,56 kr 15.04.2024\nKID: 0123456789";
    const CONSUMPTION: &str =
        "Strøm forbruk\nSpotpris 780,50 kWh 01.02.24-29.02.24 avregnet\nNettleie 312,00";
    const INFO: &str = "Kundenummer 556677\nAnleggsadresse\nStorgataVeien12B\n0181 Oslo";

    #[test]
    fn test_payment_region() {
        let report = parser().parse(&[Region::new("INVOICE_PAYMENT", PAYMENT)]);

        assert!(report.is_clean());
        assert_eq!(report.record.total_cost, Some(1234.56));
        assert_eq!(report.record.invoice_deadline, Some(ymd(2024, 4, 15)));
    }

    #[test]
    fn test_consumption_region() {
        let report = parser().parse(&[Region::new("INVOICE_CONSUMPTION", CONSUMPTION)]);

        assert!(report.is_clean());
        assert_eq!(report.record.total_usage, Some(780.5));
        assert_eq!(
            report.record.invoice_range,
            Some((ymd(2024, 2, 1), ymd(2024, 2, 29)))
        );
        assert_eq!(report.record.invoice_month_str.as_deref(), Some("February"));
    }

    #[test]
    fn test_info_region() {
        let report = parser().parse(&[Region::new("INVOICE_INFO", INFO)]);

        assert!(report.is_clean());
        assert_eq!(report.record.street.as_deref(), Some("Storgata Veien 12 B"));
    }

    #[test]
    fn test_full_batch() {
        let report = parser().parse(&[
            Region::new("INVOICE_INFO", INFO),
            Region::new("INVOICE_CONSUMPTION", CONSUMPTION),
            Region::new("INVOICE_PAYMENT", PAYMENT),
        ]);

        assert!(report.is_clean());
        let record = report.record;
        assert_eq!(record.street.as_deref(), Some("Storgata Veien 12 B"));
        assert_eq!(record.total_usage, Some(780.5));
        assert_eq!(record.total_cost, Some(1234.56));
    }

    #[test]
    fn test_missing_anchor_is_isolated() {
        // The payment region lacks its anchor; the consumption region
        // after it must still be parsed.
        let report = parser().parse(&[
            Region::new("INVOICE_PAYMENT", "ingen valuta her\n01.01.2024"),
            Region::new("INVOICE_CONSUMPTION", CONSUMPTION),
        ]);

        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].region, "INVOICE_PAYMENT");
        assert!(matches!(
            report.failures[0].error,
            ExtractionError::AnchorNotFound(_)
        ));
        assert_eq!(report.record.total_cost, None);
        assert_eq!(report.record.invoice_deadline, None);
        assert_eq!(report.record.total_usage, Some(780.5));
    }

    #[test]
    fn test_unknown_tag_ignored() {
        let report = parser().parse(&[Region::new("INVOICE_FOOTER", "whatever")]);

        assert!(report.is_clean());
        assert_eq!(report.record.total_cost, None);
    }

    #[test]
    fn test_anchor_match_is_case_insensitive() {
        let text = "Å betale 99,00 KR 01.03.2024";
        let report = parser().parse(&[Region::new("INVOICE_PAYMENT", text)]);

        assert!(report.is_clean());
        assert_eq!(report.record.total_cost, Some(99.0));
    }

    #[test]
    fn test_newline_in_window_does_not_leak_numbers() {
        // 888 sits in the window but on the previous line; it must not be
        // mistaken for the amount due.
        let text = "ref 888\n77,25 kr 05.03.2024";
        let report = parser().parse(&[Region::new("INVOICE_PAYMENT", text)]);

        assert!(report.is_clean());
        assert_eq!(report.record.total_cost, Some(77.25));
        assert_eq!(report.record.invoice_deadline, Some(ymd(2024, 3, 5)));
    }

    #[test]
    fn test_address_without_following_line() {
        let report = parser().parse(&[Region::new("INVOICE_INFO", "Anleggsadresse")]);

        assert_eq!(report.failures.len(), 1);
        assert!(matches!(
            report.failures[0].error,
            ExtractionError::NoMatch("address line")
        ));
        assert_eq!(report.record.street, None);
    }
}
