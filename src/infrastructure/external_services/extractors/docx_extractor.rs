use std::io::{Cursor, Read};

use quick_xml::Reader;
use quick_xml::events::Event;
use zip::ZipArchive;

use crate::application::ports::{ContentExtractor, ExtractionError};

const DOCX_MIME: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// DOCX text extraction: open the OOXML zip package, read
/// `word/document.xml`, and collect the `<w:t>` runs, emitting a newline at
/// each paragraph close.
pub struct DocxExtractor;

impl DocxExtractor {
    pub fn new() -> Self {
        Self
    }

    fn document_xml(&self, data: &[u8]) -> Result<String, ExtractionError> {
        let mut archive = ZipArchive::new(Cursor::new(data))
            .map_err(|e| ExtractionError::CorruptedFile(format!("not a zip package: {}", e)))?;

        let mut entry = archive.by_name("word/document.xml").map_err(|_| {
            ExtractionError::CorruptedFile("word/document.xml missing from package".to_string())
        })?;

        let mut xml = String::new();
        entry
            .read_to_string(&mut xml)
            .map_err(|e| ExtractionError::CorruptedFile(e.to_string()))?;
        Ok(xml)
    }

    fn paragraph_text(&self, xml: &str) -> Result<String, ExtractionError> {
        let mut reader = Reader::from_str(xml);
        let mut out = String::new();
        let mut in_text_run = false;

        loop {
            match reader.read_event() {
                Ok(Event::Start(e)) if e.local_name().as_ref() == b"t" => {
                    in_text_run = true;
                }
                Ok(Event::End(e)) if e.local_name().as_ref() == b"t" => {
                    in_text_run = false;
                }
                Ok(Event::End(e)) if e.local_name().as_ref() == b"p" => {
                    out.push('\n');
                }
                Ok(Event::Text(t)) if in_text_run => {
                    let text = t
                        .unescape()
                        .map_err(|e| ExtractionError::ExtractionFailed(e.to_string()))?;
                    out.push_str(&text);
                }
                Ok(Event::Eof) => break,
                Err(e) => {
                    return Err(ExtractionError::CorruptedFile(format!(
                        "malformed document.xml: {}",
                        e
                    )));
                }
                _ => {}
            }
        }

        Ok(out.trim_end().to_string())
    }
}

impl Default for DocxExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl ContentExtractor for DocxExtractor {
    fn extract(&self, data: &[u8], mime_type: &str) -> Result<String, ExtractionError> {
        if !self.supports(mime_type) {
            return Err(ExtractionError::UnsupportedFormat(mime_type.to_string()));
        }

        let xml = self.document_xml(data)?;
        self.paragraph_text(&xml)
    }

    fn supports(&self, mime_type: &str) -> bool {
        mime_type.eq_ignore_ascii_case(DOCX_MIME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn docx_package(document_xml: &str) -> Vec<u8> {
        use std::io::Write;
        use zip::write::SimpleFileOptions;

        let mut buffer = Cursor::new(Vec::new());
        {
            let mut writer = zip::ZipWriter::new(&mut buffer);
            writer
                .start_file("word/document.xml", SimpleFileOptions::default())
                .unwrap();
            writer.write_all(document_xml.as_bytes()).unwrap();
            writer.finish().unwrap();
        }
        buffer.into_inner()
    }

    #[test]
    fn test_paragraph_runs_are_joined_with_newlines() {
        let xml = r#"<?xml version="1.0"?>
            <w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
              <w:body>
                <w:p><w:r><w:t>First paragraph.</w:t></w:r></w:p>
                <w:p><w:r><w:t>Second </w:t></w:r><w:r><w:t>paragraph.</w:t></w:r></w:p>
              </w:body>
            </w:document>"#;

        let extractor = DocxExtractor::new();
        let text = extractor.extract(&docx_package(xml), DOCX_MIME).unwrap();

        assert_eq!(text, "First paragraph.\nSecond paragraph.");
    }

    #[test]
    fn test_entities_are_unescaped() {
        let xml = r#"<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
              <w:body><w:p><w:r><w:t>Fish &amp; chips</w:t></w:r></w:p></w:body>
            </w:document>"#;

        let extractor = DocxExtractor::new();
        let text = extractor.extract(&docx_package(xml), DOCX_MIME).unwrap();

        assert_eq!(text, "Fish & chips");
    }

    #[test]
    fn test_non_zip_bytes_are_reported_corrupted() {
        let extractor = DocxExtractor::new();
        let result = extractor.extract(b"plain bytes", DOCX_MIME);

        assert!(matches!(result, Err(ExtractionError::CorruptedFile(_))));
    }

    #[test]
    fn test_zip_without_document_xml_is_corrupted() {
        use std::io::Write;
        use zip::write::SimpleFileOptions;

        let mut buffer = Cursor::new(Vec::new());
        {
            let mut writer = zip::ZipWriter::new(&mut buffer);
            writer
                .start_file("unrelated.txt", SimpleFileOptions::default())
                .unwrap();
            writer.write_all(b"hello").unwrap();
            writer.finish().unwrap();
        }

        let extractor = DocxExtractor::new();
        let result = extractor.extract(&buffer.into_inner(), DOCX_MIME);

        assert!(matches!(result, Err(ExtractionError::CorruptedFile(_))));
    }
}
