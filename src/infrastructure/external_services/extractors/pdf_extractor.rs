use lopdf::Document;
use rayon::iter::{IntoParallelIterator, ParallelIterator};

use crate::application::ports::{ContentExtractor, ExtractionError};

const PDF_MIME: &str = "application/pdf";

/// PDF text extraction via lopdf: page texts pulled in parallel, then
/// stitched back together in document order.
pub struct PdfExtractor {
    password: String,
}

impl PdfExtractor {
    pub fn new() -> Self {
        Self {
            password: String::new(),
        }
    }

    fn extract_pages(&self, doc: &Document) -> Result<String, ExtractionError> {
        let page_numbers: Vec<u32> = doc.get_pages().keys().copied().collect();

        let mut extracted: Vec<(u32, String)> = page_numbers
            .into_par_iter()
            .filter_map(|page_num| {
                // A page that fails to decode is skipped rather than sinking
                // the whole document.
                doc.extract_text(&[page_num])
                    .ok()
                    .map(|text| (page_num, text))
            })
            .collect();

        extracted.sort_by_key(|(page_num, _)| *page_num);

        let text = extracted
            .into_iter()
            .map(|(_, page_text)| {
                page_text
                    .lines()
                    .map(|line| line.trim_end())
                    .filter(|line| !line.is_empty())
                    .collect::<Vec<_>>()
                    .join("\n")
            })
            .filter(|page| !page.is_empty())
            .collect::<Vec<_>>()
            .join("\n");

        Ok(text)
    }
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentExtractor for PdfExtractor {
    fn extract(&self, data: &[u8], mime_type: &str) -> Result<String, ExtractionError> {
        if !self.supports(mime_type) {
            return Err(ExtractionError::UnsupportedFormat(mime_type.to_string()));
        }

        let mut doc = Document::load_mem(data)
            .map_err(|e| ExtractionError::CorruptedFile(e.to_string()))?;

        if doc.is_encrypted() {
            doc.decrypt(&self.password).map_err(|_| {
                ExtractionError::ExtractionFailed(
                    "PDF is password protected".to_string(),
                )
            })?;
        }

        self.extract_pages(&doc)
    }

    fn supports(&self, mime_type: &str) -> bool {
        mime_type.eq_ignore_ascii_case(PDF_MIME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_supports_only_pdf() {
        let extractor = PdfExtractor::new();

        assert!(extractor.supports("application/pdf"));
        assert!(extractor.supports("APPLICATION/PDF"));
        assert!(!extractor.supports("text/plain"));
    }

    #[test]
    fn test_garbage_bytes_are_reported_corrupted() {
        let extractor = PdfExtractor::new();
        let result = extractor.extract(b"not a pdf at all", "application/pdf");

        assert!(matches!(result, Err(ExtractionError::CorruptedFile(_))));
    }
}
