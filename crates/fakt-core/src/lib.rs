//! Core library for splitting a shared power invoice.
//!
//! This crate provides:
//! - PDF text extraction per named invoice region
//! - Anchor-based field extraction (amounts, dates, billing period, address)
//! - The invoice record and per-tenant cost/usage share derivation
//! - Summary document rendering from a user template

pub mod error;
pub mod invoice;
pub mod models;
pub mod pdf;
pub mod summary;

pub use error::{ExtractionError, FaktError, PdfError, Result};
pub use invoice::{ParseReport, Region, RegionFailure, RegionKind, RegionParser};
pub use models::config::{ExtractionConfig, RegionSpec, RegionsFile, Window};
pub use models::record::InvoiceRecord;
pub use pdf::{PdfExtractor, PdfTextSource};
pub use summary::SummaryTemplate;
