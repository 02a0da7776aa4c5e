pub mod docx_extractor;
pub mod pdf_extractor;
pub mod text_extractor;

pub use docx_extractor::DocxExtractor;
pub use pdf_extractor::PdfExtractor;
pub use text_extractor::PlainTextExtractor;

use std::sync::Arc;

use crate::application::ports::{ContentExtractor, ExtractionError};

/// Dispatches to the extractor that claims the MIME type; anything none of
/// them claims is an unsupported format.
pub struct CompositeExtractor {
    extractors: Vec<Arc<dyn ContentExtractor>>,
}

impl CompositeExtractor {
    pub fn new() -> Self {
        Self {
            extractors: vec![
                Arc::new(PdfExtractor::new()),
                Arc::new(DocxExtractor::new()),
                Arc::new(PlainTextExtractor::new()),
            ],
        }
    }
}

impl Default for CompositeExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentExtractor for CompositeExtractor {
    fn extract(&self, data: &[u8], mime_type: &str) -> Result<String, ExtractionError> {
        let extractor = self
            .extractors
            .iter()
            .find(|e| e.supports(mime_type))
            .ok_or_else(|| ExtractionError::UnsupportedFormat(mime_type.to_string()))?;

        extractor.extract(data, mime_type)
    }

    fn supports(&self, mime_type: &str) -> bool {
        self.extractors.iter().any(|e| e.supports(mime_type))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_mime_types_are_claimed() {
        let composite = CompositeExtractor::new();

        assert!(composite.supports("application/pdf"));
        assert!(composite.supports(
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
        ));
        assert!(composite.supports("text/plain"));
    }

    #[test]
    fn test_unknown_mime_type_is_unsupported() {
        let composite = CompositeExtractor::new();

        assert!(!composite.supports("image/png"));

        let result = composite.extract(b"\x89PNG", "image/png");
        match result {
            Err(ExtractionError::UnsupportedFormat(mime)) => assert_eq!(mime, "image/png"),
            other => panic!("expected UnsupportedFormat, got {:?}", other),
        }
    }

    #[test]
    fn test_plain_text_routes_to_the_text_extractor() {
        let composite = CompositeExtractor::new();
        let text = composite.extract(b"hello", "text/plain").unwrap();

        assert_eq!(text, "hello");
    }
}
