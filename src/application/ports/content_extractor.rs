#[derive(Debug)]
pub enum ExtractionError {
    UnsupportedFormat(String),
    CorruptedFile(String),
    ExtractionFailed(String),
}

impl std::fmt::Display for ExtractionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExtractionError::UnsupportedFormat(mime) => {
                write!(f, "Unsupported format: {}", mime)
            }
            ExtractionError::CorruptedFile(msg) => write!(f, "Corrupted file: {}", msg),
            ExtractionError::ExtractionFailed(msg) => write!(f, "Extraction failed: {}", msg),
        }
    }
}

impl std::error::Error for ExtractionError {}

/// Turns an uploaded binary into one plain-text string. A pure, CPU-bound
/// transform: no I/O, no side effects, so the trait is synchronous.
pub trait ContentExtractor: Send + Sync {
    fn extract(&self, data: &[u8], mime_type: &str) -> Result<String, ExtractionError>;

    fn supports(&self, mime_type: &str) -> bool;
}
