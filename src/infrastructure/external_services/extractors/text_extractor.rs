use crate::application::ports::{ContentExtractor, ExtractionError};

const TEXT_MIME: &str = "text/plain";

/// Plain text passes through with a strict UTF-8 decode; invalid bytes are a
/// corruption error, never silently replaced.
pub struct PlainTextExtractor;

impl PlainTextExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PlainTextExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentExtractor for PlainTextExtractor {
    fn extract(&self, data: &[u8], mime_type: &str) -> Result<String, ExtractionError> {
        if !self.supports(mime_type) {
            return Err(ExtractionError::UnsupportedFormat(mime_type.to_string()));
        }

        String::from_utf8(data.to_vec())
            .map_err(|e| ExtractionError::CorruptedFile(format!("invalid UTF-8: {}", e)))
    }

    fn supports(&self, mime_type: &str) -> bool {
        mime_type.eq_ignore_ascii_case(TEXT_MIME)
            || mime_type.to_lowercase().starts_with("text/plain;")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_utf8_passes_through() {
        let extractor = PlainTextExtractor::new();
        let text = extractor.extract("héllo wörld".as_bytes(), "text/plain").unwrap();

        assert_eq!(text, "héllo wörld");
    }

    #[test]
    fn test_charset_parameter_is_accepted() {
        let extractor = PlainTextExtractor::new();
        assert!(extractor.supports("text/plain; charset=utf-8"));
    }

    #[test]
    fn test_invalid_utf8_is_corrupted() {
        let extractor = PlainTextExtractor::new();
        let result = extractor.extract(&[0xff, 0xfe, 0x00], "text/plain");

        assert!(matches!(result, Err(ExtractionError::CorruptedFile(_))));
    }
}
