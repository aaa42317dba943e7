//! Tenant summary document rendered from a user-supplied template.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{FaktError, Result};
use crate::models::record::InvoiceRecord;

/// User-editable template for the generated summary document.
///
/// The `gen-info` block carries `##` placeholders that are substituted
/// with values from the record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryTemplate {
    /// Document heading, shown before the tenant name.
    pub heading: String,

    /// Tenant name.
    pub name: String,

    /// General information block with placeholders.
    #[serde(rename = "gen-info")]
    pub gen_info: String,

    /// Free-form explanation of how the usage share was measured.
    #[serde(rename = "usage-info")]
    pub usage_info: String,

    /// Link to further details.
    pub link: String,

    /// Account details for the payment.
    pub account: String,
}

impl SummaryTemplate {
    /// Load a template from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| FaktError::Config(e.to_string()))
    }

    /// Render the full summary document for `record`.
    pub fn render(&self, record: &InvoiceRecord) -> String {
        let mut out = String::new();
        out.push_str(&format!("{} {}\n\n", self.heading, self.name));
        out.push_str(&fill_placeholders(&self.gen_info, record));
        out.push_str("\n\n");
        out.push_str(&self.usage_info);
        out.push_str("\n\nFor more details, visit:\n");
        out.push_str(&self.link);
        out.push_str("\n\n");
        out.push_str(&self.account);
        out.push('\n');
        out
    }

    /// File name the summary document is written under.
    pub fn file_name(&self, record: &InvoiceRecord) -> String {
        format!(
            "power_invoice_{}.txt",
            record.invoice_month_str.as_deref().unwrap_or("unknown")
        )
    }
}

/// Substitute the `##` placeholders in `template` with record values.
///
/// Percentages and costs are fixed to two decimals; usage keeps the
/// parsed precision. Fields the parse left unset render as "?".
pub fn fill_placeholders(template: &str, record: &InvoiceRecord) -> String {
    fn num(value: Option<f64>) -> String {
        value.map_or_else(|| "?".to_string(), |v| v.to_string())
    }
    fn money(value: Option<f64>) -> String {
        value.map_or_else(|| "?".to_string(), |v| format!("{:.2}", v))
    }

    let percent = record
        .user_percent
        .map_or_else(|| "?".to_string(), |v| format!("{:.2}%", v));

    template
        .replace("##Address", record.street.as_deref().unwrap_or("?"))
        .replace("##usage_tot", &num(record.total_usage))
        .replace("##user_usage", &num(record.user_usage))
        .replace("##user_percent", &percent)
        .replace("##cost_tot", &money(record.total_cost))
        .replace("##user_cost", &money(record.user_cost))
}
