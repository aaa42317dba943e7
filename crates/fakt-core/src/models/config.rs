//! Configuration: anchor phrases, extraction windows and region definitions.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{FaktError, Result};

/// Anchor phrases and window widths steering region parsing.
///
/// The defaults match the supported invoice layout; a different layout is
/// a config change, not a code change.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Currency label preceding the amount due.
    pub currency_label: String,

    /// Unit the total consumption is stated in.
    pub usage_unit: String,

    /// Marker phrase anchoring the consumption line.
    pub consumption_marker: String,

    /// Marker phrase anchoring the supply address.
    pub address_marker: String,

    /// Character window around the currency anchor.
    pub payment_window: Window,

    /// Character window around the consumption marker.
    pub consumption_window: Window,
}

/// A fixed-width character window around an anchor position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Window {
    /// Characters kept ahead of the anchor.
    pub before: usize,
    /// Characters kept from the anchor on.
    pub after: usize,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            currency_label: "kr".to_string(),
            usage_unit: "kwh".to_string(),
            consumption_marker: "spotpris".to_string(),
            address_marker: "anleggsadresse".to_string(),
            payment_window: Window {
                before: 20,
                after: 20,
            },
            consumption_window: Window {
                before: 5,
                after: 92,
            },
        }
    }
}

impl ExtractionConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| FaktError::Config(e.to_string()))
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content =
            serde_json::to_string_pretty(self).map_err(|e| FaktError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

/// One named region of the invoice layout to pull text from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegionSpec {
    /// Region tag, e.g. "INVOICE_PAYMENT".
    pub name: String,

    /// Zero-based page the region sits on.
    #[serde(default)]
    pub page: u32,
}

/// The regions file listing every region of the invoice layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegionsFile {
    pub regions: Vec<RegionSpec>,
}

impl RegionsFile {
    /// Load region definitions from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| FaktError::Config(e.to_string()))
    }
}
