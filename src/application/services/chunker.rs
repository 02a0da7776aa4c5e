use crate::domain::value_objects::TextChunk;

const DEFAULT_CHUNK_SIZE: usize = 1000;
const DEFAULT_OVERLAP: usize = 200;

/// Splits extracted text into overlapping chunks for embedding.
///
/// Each chunk carries up to `chunk_size` characters of new text; every chunk
/// after the first is prefixed with its predecessor's trailing `overlap`
/// characters so context severed at a boundary survives in the neighbor.
/// Consequently the last `overlap` characters of chunk i always equal the
/// first `overlap` characters of chunk i+1, and stripping that prefix from
/// every chunk after the first reassembles the input exactly.
///
/// Cut points prefer a paragraph break, then a sentence break, then a word
/// break in the back half of the window before falling back to a hard cut.
/// Indices are character-based, so multi-byte text never splits inside a
/// code point. Same input, same output: re-chunking after a failed run
/// produces identical ordinals.
#[derive(Debug, Clone)]
pub struct OverlapChunker {
    chunk_size: usize,
    overlap: usize,
}

impl Default for OverlapChunker {
    fn default() -> Self {
        Self {
            chunk_size: DEFAULT_CHUNK_SIZE,
            overlap: DEFAULT_OVERLAP,
        }
    }
}

impl OverlapChunker {
    /// `overlap` must be smaller than `chunk_size / 2` so the cursor always
    /// advances past the carried prefix.
    pub fn new(chunk_size: usize, overlap: usize) -> Self {
        assert!(chunk_size > 0, "chunk size must be positive");
        assert!(overlap < chunk_size / 2, "overlap must be under half the chunk size");
        Self {
            chunk_size,
            overlap,
        }
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    pub fn overlap(&self) -> usize {
        self.overlap
    }

    pub fn chunk(&self, text: &str, source: &str) -> Vec<TextChunk> {
        let chars: Vec<char> = text.chars().collect();
        if chars.is_empty() {
            return Vec::new();
        }

        let mut chunks = Vec::new();
        let mut start = 0;
        let mut ordinal: u32 = 0;

        while start < chars.len() {
            let hard_end = (start + self.chunk_size).min(chars.len());
            let end = if hard_end == chars.len() {
                hard_end
            } else {
                self.cut_point(&chars, start, hard_end)
            };

            let carried = if ordinal == 0 { 0 } else { self.overlap };
            let from = start.saturating_sub(carried);
            let chunk_text: String = chars[from..end].iter().collect();

            chunks.push(TextChunk::new(source, ordinal, chunk_text));
            ordinal += 1;
            start = end;
        }

        chunks
    }

    /// Best cut position in `(floor, hard_end]`, searching the back half of
    /// the window so chunks never collapse below half the target size.
    fn cut_point(&self, chars: &[char], start: usize, hard_end: usize) -> usize {
        let floor = start + self.chunk_size / 2;

        // Paragraph break.
        for i in (floor..hard_end).rev() {
            if chars[i] == '\n' && i > 0 && chars[i - 1] == '\n' {
                return i + 1;
            }
        }

        // Sentence break: a newline, or terminal punctuation followed by a
        // space.
        for i in (floor..hard_end).rev() {
            if chars[i] == '\n' {
                return i + 1;
            }
            if i + 1 < hard_end && matches!(chars[i], '.' | '!' | '?') && chars[i + 1] == ' ' {
                return i + 1;
            }
        }

        // Word break.
        for i in (floor..hard_end).rev() {
            if chars[i] == ' ' {
                return i + 1;
            }
        }

        hard_end
    }
}
