//! Recursive character chunking with overlap and position tracking

use std::collections::VecDeque;
use std::ops::Range;

use unicode_segmentation::UnicodeSegmentation;

use super::parser::ParsedDocument;
use crate::types::{Chunk, ChunkSource, Document};

/// Split points tried from coarsest to finest
#[derive(Debug, Clone, Copy)]
enum Separator {
    Literal(&'static str),
    /// Split between grapheme clusters, always applicable
    Grapheme,
}

impl Separator {
    fn applies_to(&self, text: &str) -> bool {
        match self {
            Separator::Literal(s) => text.contains(s),
            Separator::Grapheme => true,
        }
    }

    /// Byte ranges of the non-empty pieces of `text[range]`, relative to `text`
    fn split(&self, text: &str, range: Range<usize>) -> Vec<Range<usize>> {
        let slice = &text[range.clone()];
        let base = range.start;

        match self {
            Separator::Literal(sep) => {
                let mut pieces = Vec::new();
                let mut from = 0;
                for (pos, _) in slice.match_indices(sep) {
                    if pos > from {
                        pieces.push(base + from..base + pos);
                    }
                    from = pos + sep.len();
                }
                if from < slice.len() {
                    pieces.push(base + from..base + slice.len());
                }
                pieces
            }
            Separator::Grapheme => slice
                .grapheme_indices(true)
                .map(|(i, g)| base + i..base + i + g.len())
                .collect(),
        }
    }
}

const SEPARATORS: [Separator; 4] = [
    Separator::Literal("\n\n"),
    Separator::Literal("\n"),
    Separator::Literal(" "),
    Separator::Grapheme,
];

fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Shrink `range` so `text[range]` has no surrounding whitespace
fn trim_range(text: &str, range: Range<usize>) -> Option<Range<usize>> {
    let slice = &text[range.clone()];
    let start = range.start + (slice.len() - slice.trim_start().len());
    let end = range.start + slice.trim_end().len();
    (start < end).then_some(start..end)
}

/// A piece of text and where it starts in the text it was split from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextSpan {
    /// Chunk text
    pub text: String,
    /// Character offset of the chunk in the source text
    pub char_start: usize,
}

/// Text chunker with configurable size and overlap, both measured in characters
pub struct TextChunker {
    /// Maximum chunk size
    chunk_size: usize,
    /// Characters carried over from the previous chunk
    overlap: usize,
}

impl TextChunker {
    /// Create a new chunker
    pub fn new(chunk_size: usize, overlap: usize) -> Self {
        let chunk_size = chunk_size.max(1);
        Self {
            chunk_size,
            overlap: overlap.min(chunk_size - 1),
        }
    }

    /// Chunk a parsed document, page by page
    pub fn chunk_document(&self, doc: &Document, parsed: &ParsedDocument) -> Vec<Chunk> {
        let mut chunks = Vec::new();
        let mut chunk_index = 0u32;

        for page in &parsed.pages {
            for span in self.split_text(&page.content) {
                let char_start = page.char_offset + span.char_start;
                let char_end = char_start + char_len(&span.text);
                chunks.push(Chunk::new(
                    doc.id,
                    span.text,
                    ChunkSource::pdf(doc.filename.clone(), page.page_number),
                    char_start,
                    char_end,
                    chunk_index,
                ));
                chunk_index += 1;
            }
        }

        chunks
    }

    /// Split text into overlapping chunks of at most `chunk_size` characters.
    ///
    /// Every chunk is a verbatim slice of `text`, so separator runs inside a
    /// chunk are kept as they appear in the source.
    pub fn split_text(&self, text: &str) -> Vec<TextSpan> {
        let ranges = self.split_recursive(text, 0..text.len(), &SEPARATORS);

        // Ranges come out in source order, count characters incrementally
        let mut spans = Vec::with_capacity(ranges.len());
        let mut cursor_byte = 0usize;
        let mut cursor_char = 0usize;
        for range in ranges {
            let char_start = if range.start >= cursor_byte {
                cursor_char + char_len(&text[cursor_byte..range.start])
            } else {
                char_len(&text[..range.start])
            };
            cursor_byte = range.start;
            cursor_char = char_start;

            spans.push(TextSpan {
                text: text[range].to_string(),
                char_start,
            });
        }

        spans
    }

    fn split_recursive(&self, text: &str, range: Range<usize>, separators: &[Separator]) -> Vec<Range<usize>> {
        let Some(position) = separators.iter().position(|s| s.applies_to(&text[range.clone()])) else {
            return trim_range(text, range).into_iter().collect();
        };
        let separator = separators[position];
        let finer = &separators[position + 1..];

        let mut chunks = Vec::new();
        let mut fitting: Vec<Range<usize>> = Vec::new();

        for piece in separator.split(text, range) {
            if char_len(&text[piece.clone()]) < self.chunk_size {
                fitting.push(piece);
                continue;
            }

            if !fitting.is_empty() {
                chunks.extend(self.merge_splits(text, &fitting));
                fitting.clear();
            }

            if finer.is_empty() {
                chunks.extend(trim_range(text, piece));
            } else {
                chunks.extend(self.split_recursive(text, piece, finer));
            }
        }

        if !fitting.is_empty() {
            chunks.extend(self.merge_splits(text, &fitting));
        }

        chunks
    }

    /// Greedily join neighbouring pieces into windows, keeping up to `overlap` characters of tail
    fn merge_splits(&self, text: &str, splits: &[Range<usize>]) -> Vec<Range<usize>> {
        let mut chunks = Vec::new();
        let mut window: VecDeque<Range<usize>> = VecDeque::new();

        // Length of the source slice from the window start through `end`
        let span_len = |window: &VecDeque<Range<usize>>, end: usize| {
            window.front().map_or(0, |front| char_len(&text[front.start..end]))
        };

        for piece in splits {
            let with_piece = match window.front() {
                Some(front) => char_len(&text[front.start..piece.end]),
                None => char_len(&text[piece.clone()]),
            };

            if with_piece > self.chunk_size {
                if let (Some(front), Some(back)) = (window.front(), window.back()) {
                    chunks.extend(trim_range(text, front.start..back.end));
                }

                while let Some(back) = window.back() {
                    let kept = span_len(&window, back.end);
                    if kept > self.overlap || span_len(&window, piece.end) > self.chunk_size {
                        window.pop_front();
                    } else {
                        break;
                    }
                }
            }

            window.push_back(piece.clone());
        }

        if let (Some(front), Some(back)) = (window.front(), window.back()) {
            chunks.extend(trim_range(text, front.start..back.end));
        }
        chunks
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingestion::parser::PageContent;
    use crate::types::FileType;

    fn words(n: usize) -> String {
        (0..n).map(|i| format!("word{}", i)).collect::<Vec<_>>().join(" ")
    }

    #[test]
    fn test_short_text_is_single_chunk() {
        let chunker = TextChunker::new(1000, 200);
        let spans = chunker.split_text("A short paragraph.");
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].text, "A short paragraph.");
        assert_eq!(spans[0].char_start, 0);
    }

    #[test]
    fn test_chunks_respect_size() {
        let chunker = TextChunker::new(100, 30);
        let text = words(500);
        let spans = chunker.split_text(&text);

        assert!(spans.len() > 1);
        for span in &spans {
            assert!(char_len(&span.text) <= 100, "chunk too long: {}", span.text.len());
        }
    }

    #[test]
    fn test_consecutive_chunks_overlap() {
        let chunker = TextChunker::new(100, 30);
        let text = words(300);
        let spans = chunker.split_text(&text);

        for pair in spans.windows(2) {
            let first_word = pair[1].text.split(' ').next().unwrap();
            let previous: Vec<&str> = pair[0].text.split(' ').collect();
            assert!(
                previous.contains(&first_word),
                "'{}' not carried over from previous chunk",
                first_word
            );
            assert!(pair[1].char_start > pair[0].char_start);
        }
    }

    #[test]
    fn test_offsets_point_into_source() {
        let chunker = TextChunker::new(80, 20);
        let text = format!("{}\n\n{}", words(40), words(40));
        for span in chunker.split_text(&text) {
            let located: String = text.chars().skip(span.char_start).take(char_len(&span.text)).collect();
            assert_eq!(located, span.text);
        }
    }

    #[test]
    fn test_offsets_survive_repeated_separators() {
        let chunker = TextChunker::new(20, 5);
        let text = "alpha  beta  gamma  delta  epsilon\n\n\n\nzeta   eta  theta";
        let spans = chunker.split_text(text);

        assert!(spans.len() > 1);
        for span in &spans {
            assert!(char_len(&span.text) <= 20);
            let located: String = text.chars().skip(span.char_start).take(char_len(&span.text)).collect();
            assert_eq!(located, span.text);
        }
        assert_eq!(spans[0].text, "alpha  beta  gamma");
    }

    #[test]
    fn test_long_word_falls_back_to_graphemes() {
        let chunker = TextChunker::new(10, 2);
        let spans = chunker.split_text(&"x".repeat(35));
        assert!(spans.len() >= 4);
        assert!(spans.iter().all(|s| char_len(&s.text) <= 10));
    }

    #[test]
    fn test_multibyte_text() {
        let chunker = TextChunker::new(20, 5);
        let text = "ção ".repeat(30);
        let spans = chunker.split_text(&text);
        assert!(spans.iter().all(|s| char_len(&s.text) <= 20));
    }

    #[test]
    fn test_chunk_document_tracks_pages() {
        let chunker = TextChunker::new(1000, 200);
        let doc = Document::new("manual.pdf".to_string(), FileType::Pdf, "hash".to_string(), 10);
        let parsed = ParsedDocument {
            file_type: FileType::Pdf,
            content: "page one\npage two".to_string(),
            content_hash: "hash".to_string(),
            total_pages: Some(2),
            pages: vec![
                PageContent { page_number: Some(1), content: "page one".to_string(), char_offset: 0 },
                PageContent { page_number: Some(2), content: "page two".to_string(), char_offset: 9 },
            ],
        };

        let chunks = chunker.chunk_document(&doc, &parsed);
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].chunk_index, 0);
        assert_eq!(chunks[1].chunk_index, 1);
        assert_eq!(chunks[1].source.page_number, Some(2));
        assert_eq!(chunks[1].char_start, 9);
        assert_eq!(chunks[1].document_id, doc.id);
        assert_eq!(chunks[1].source.filename, "manual.pdf");
    }
}
