//! PDF text extraction using lopdf and pdf-extract.

use lopdf::Document;
use tracing::debug;

use super::{PdfTextSource, Result};
use crate::error::PdfError;
use crate::invoice::Region;
use crate::models::config::RegionSpec;

/// PDF text extractor: lopdf for document structure, pdf-extract for the
/// text runs.
pub struct PdfExtractor {
    document: Option<Document>,
    raw_data: Vec<u8>,
}

impl PdfExtractor {
    /// Create a new PDF extractor.
    pub fn new() -> Self {
        Self {
            document: None,
            raw_data: Vec::new(),
        }
    }

    /// Map each region definition to the text of its page.
    ///
    /// The anchor phrases narrow the text down during parsing, so page
    /// granularity is enough here. A region pointing past the last page
    /// means the layout does not match the document.
    pub fn extract_regions(&self, specs: &[RegionSpec]) -> Result<Vec<Region>> {
        let page_count = self.page_count();
        let mut regions = Vec::with_capacity(specs.len());

        for spec in specs {
            if spec.page >= page_count {
                return Err(PdfError::InvalidPage(spec.page));
            }
            let text = self.extract_page_text(spec.page)?;
            debug!(
                "region {}: {} chars from page {}",
                spec.name,
                text.len(),
                spec.page
            );
            regions.push(Region::new(spec.name.clone(), text));
        }

        Ok(regions)
    }
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfTextSource for PdfExtractor {
    fn load(&mut self, data: &[u8]) -> Result<()> {
        let mut doc = Document::load_mem(data).map_err(|e| PdfError::Parse(e.to_string()))?;

        // Handle PDFs with empty password encryption
        if doc.is_encrypted() {
            if doc.decrypt("").is_err() {
                return Err(PdfError::Encrypted);
            }
            debug!("Decrypted PDF with empty password");

            // Save decrypted document to raw_data for pdf_extract
            let mut decrypted_data = Vec::new();
            doc.save_to(&mut decrypted_data)
                .map_err(|e| PdfError::Parse(format!("Failed to save decrypted PDF: {}", e)))?;
            self.raw_data = decrypted_data;
        } else {
            self.raw_data = data.to_vec();
        }

        let page_count = doc.get_pages().len();
        if page_count == 0 {
            return Err(PdfError::NoPages);
        }

        debug!("Loaded PDF with {} pages", page_count);
        self.document = Some(doc);
        Ok(())
    }

    fn page_count(&self) -> u32 {
        self.document
            .as_ref()
            .map(|doc| doc.get_pages().len() as u32)
            .unwrap_or(0)
    }

    fn extract_text(&self) -> Result<String> {
        let text = pdf_extract::extract_text_from_mem(&self.raw_data)
            .map_err(|e| PdfError::TextExtraction(e.to_string()))?;
        Ok(text)
    }

    fn extract_page_text(&self, page: u32) -> Result<String> {
        // pdf-extract yields one text stream for the document; split it
        // evenly across pages to approximate per-page text.
        let full_text = self.extract_text()?;
        let lines: Vec<&str> = full_text.lines().collect();
        let page_count = self.page_count() as usize;

        if page_count == 0 {
            return Ok(String::new());
        }

        let lines_per_page = lines.len() / page_count;
        let start = (page as usize) * lines_per_page;
        // The division remainder belongs to the last page
        let end = if page as usize + 1 == page_count {
            lines.len()
        } else {
            (page as usize + 1) * lines_per_page
        };

        Ok(lines[start.min(lines.len())..end.min(lines.len())].join("\n"))
    }
}
