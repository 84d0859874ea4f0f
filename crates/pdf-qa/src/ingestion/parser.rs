//! PDF text extraction

use sha2::{Digest, Sha256};
use std::time::Duration;

use crate::error::{Error, Result};
use crate::types::FileType;

/// How long pdf-extract may run before it is abandoned
const PDF_EXTRACT_TIMEOUT: Duration = Duration::from_secs(60);

/// Parsed document with extracted text
#[derive(Debug, Clone)]
pub struct ParsedDocument {
    /// File type
    pub file_type: FileType,
    /// Extracted text content, pages separated by a newline
    pub content: String,
    /// Hash of the extracted text
    pub content_hash: String,
    /// Total pages
    pub total_pages: Option<u32>,
    /// Page-level content
    pub pages: Vec<PageContent>,
}

/// Content from a single page
#[derive(Debug, Clone)]
pub struct PageContent {
    /// Page number (1-indexed), `None` when extraction was not page-aware
    pub page_number: Option<u32>,
    /// Text content of the page
    pub content: String,
    /// Character offset in `ParsedDocument::content`
    pub char_offset: usize,
}

/// PDF file parser
pub struct FileParser;

impl FileParser {
    /// Parse a file based on its extension
    pub fn parse(filename: &str, data: &[u8]) -> Result<ParsedDocument> {
        let file_type = FileType::from_filename(filename);

        if !file_type.is_supported() {
            return Err(Error::UnsupportedFileType(format!(
                "{} - only PDF files are accepted",
                filename
            )));
        }

        Self::parse_pdf(filename, data)
    }

    /// Parse PDF document, page by page when possible
    fn parse_pdf(filename: &str, data: &[u8]) -> Result<ParsedDocument> {
        let doc = lopdf::Document::load_mem(data)
            .map_err(|e| Error::file_parse(filename, format!("Failed to load PDF: {}", e)))?;

        if doc.is_encrypted() {
            tracing::warn!("{} is encrypted, text extraction will likely fail", filename);
        }

        let page_numbers: Vec<u32> = doc.get_pages().keys().copied().collect();
        let total_pages = Some(page_numbers.len() as u32);

        let mut pages = Vec::new();
        let mut content = String::new();

        for page_number in page_numbers {
            let text = match doc.extract_text(&[page_number]) {
                Ok(text) => cleanup_pdf_text(&text),
                Err(e) => {
                    tracing::debug!("Could not extract page {} of {}: {}", page_number, filename, e);
                    continue;
                }
            };

            if text.is_empty() {
                tracing::debug!("No text on page {} of {}, it might be an image", page_number, filename);
                continue;
            }

            Self::push_page(&mut content, &mut pages, Some(page_number), text);
        }

        if pages.is_empty() {
            tracing::warn!("Page extraction found no text in {}, trying pdf-extract", filename);
            let text = cleanup_pdf_text(&Self::extract_with_pdf_extract(filename, data)?);
            if !text.is_empty() {
                Self::push_page(&mut content, &mut pages, None, text);
            }
        }

        if content.trim().is_empty() {
            return Err(Error::file_parse(
                filename,
                "No text content could be extracted from PDF. It might be image-based, empty, or password-protected.",
            ));
        }

        Ok(ParsedDocument {
            file_type: FileType::Pdf,
            content_hash: hash_content(&content),
            content,
            total_pages,
            pages,
        })
    }

    fn push_page(content: &mut String, pages: &mut Vec<PageContent>, page_number: Option<u32>, text: String) {
        if !content.is_empty() {
            content.push('\n');
        }
        let char_offset = content.chars().count();
        content.push_str(&text);
        pages.push(PageContent {
            page_number,
            content: text,
            char_offset,
        });
    }

    /// Whole-document extraction with pdf-extract, bounded by a timeout
    fn extract_with_pdf_extract(filename: &str, data: &[u8]) -> Result<String> {
        use std::sync::mpsc;
        use std::thread;

        let data_vec = data.to_vec();
        let (tx, rx) = mpsc::channel();

        // pdf-extract can hang or panic on unusual fonts, so it runs on its own thread
        thread::spawn(move || {
            let result = pdf_extract::extract_text_from_mem(&data_vec);
            let _ = tx.send(result.map_err(|e| e.to_string()));
        });

        match rx.recv_timeout(PDF_EXTRACT_TIMEOUT) {
            Ok(Ok(text)) => Ok(text),
            Ok(Err(e)) => Err(Error::file_parse(filename, format!("pdf-extract failed: {}", e))),
            Err(mpsc::RecvTimeoutError::Timeout) => Err(Error::file_parse(
                filename,
                format!("PDF extraction timed out after {}s", PDF_EXTRACT_TIMEOUT.as_secs()),
            )),
            Err(mpsc::RecvTimeoutError::Disconnected) => {
                Err(Error::file_parse(filename, "PDF extraction thread crashed"))
            }
        }
    }
}

/// Normalise extracted PDF text: expand ligatures, drop NULs, trim lines and drop blank ones
fn cleanup_pdf_text(text: &str) -> String {
    text.replace('\0', "")
        .replace('\u{00A0}', " ")
        .replace('\u{FB00}', "ff")
        .replace('\u{FB01}', "fi")
        .replace('\u{FB02}', "fl")
        .replace('\u{FB03}', "ffi")
        .replace('\u{FB04}', "ffl")
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Hash content for identification
pub fn hash_content(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    format!("{:x}", hasher.finalize())
}
