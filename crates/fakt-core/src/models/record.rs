//! The invoice record assembled from parsed regions.

use chrono::NaiveDate;
use serde::Serialize;

use crate::error::ExtractionError;

/// All fields recovered from one invoice, plus the derived tenant share.
///
/// Constructed empty and populated region by region; regions are
/// independent of each other and may arrive in any order. The share
/// fields are only set by [`InvoiceRecord::calculate_user_data`].
#[derive(Debug, Clone, Default, Serialize)]
pub struct InvoiceRecord {
    /// Tenant name, filled by the caller when known.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Normalized supply address line.
    pub street: Option<String>,

    /// Total consumption on the invoice, kWh.
    pub total_usage: Option<f64>,

    /// Total amount due on the invoice.
    pub total_cost: Option<f64>,

    /// Tenant consumption for the billing period, kWh.
    pub user_usage: Option<f64>,

    /// Tenant share of the total cost.
    pub user_cost: Option<f64>,

    /// Tenant share of total usage, in percent.
    pub user_percent: Option<f64>,

    /// Payment deadline.
    pub invoice_deadline: Option<NaiveDate>,

    /// Billing period (start, end).
    pub invoice_range: Option<(NaiveDate, NaiveDate)>,

    /// Month names spanned by the billing period.
    pub invoice_month_str: Option<String>,
}

impl InvoiceRecord {
    /// Create a new empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Derive the tenant's share of usage and cost.
    ///
    /// Both totals must be parsed and total usage must be above zero; a
    /// zero or missing total fails here instead of yielding infinity
    /// downstream.
    pub fn calculate_user_data(&mut self, usage: f64) -> Result<(), ExtractionError> {
        let (total_usage, total_cost) = match (self.total_usage, self.total_cost) {
            (Some(total), Some(cost)) if total > 0.0 => (total, cost),
            _ => return Err(ExtractionError::MissingTotals),
        };

        self.user_usage = Some(usage);
        self.user_percent = Some(100.0 * usage / total_usage);
        self.user_cost = Some(total_cost * usage / total_usage);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn record_with_totals(usage: f64, cost: f64) -> InvoiceRecord {
        InvoiceRecord {
            total_usage: Some(usage),
            total_cost: Some(cost),
            ..Default::default()
        }
    }

    #[test]
    fn test_share_derivation() {
        let mut record = record_with_totals(1200.0, 3000.0);
        record.calculate_user_data(600.0).unwrap();

        assert_eq!(record.user_usage, Some(600.0));
        assert_eq!(record.user_percent, Some(50.0));
        assert_eq!(record.user_cost, Some(1500.0));
    }

    #[test]
    fn test_share_at_zero_usage() {
        let mut record = record_with_totals(1200.0, 3000.0);
        record.calculate_user_data(0.0).unwrap();

        assert_eq!(record.user_percent, Some(0.0));
        assert_eq!(record.user_cost, Some(0.0));
    }

    #[test]
    fn test_share_at_full_usage() {
        let mut record = record_with_totals(1200.0, 3000.0);
        record.calculate_user_data(1200.0).unwrap();

        assert_eq!(record.user_percent, Some(100.0));
        assert_eq!(record.user_cost, Some(3000.0));
    }

    #[test]
    fn test_zero_total_usage_fails() {
        let mut record = record_with_totals(0.0, 3000.0);

        assert!(matches!(
            record.calculate_user_data(100.0),
            Err(ExtractionError::MissingTotals)
        ));
        assert_eq!(record.user_usage, None);
        assert_eq!(record.user_percent, None);
    }

    #[test]
    fn test_unset_totals_fail() {
        let mut record = InvoiceRecord::new();
        assert!(record.calculate_user_data(100.0).is_err());

        record.total_usage = Some(1200.0);
        assert!(record.calculate_user_data(100.0).is_err());
    }
}
