//! Response types for the HTTP API

use serde::{Deserialize, Serialize};

use super::document::Chunk;

/// Characters of chunk text shown in a source preview
pub const PREVIEW_CHARS: usize = 250;

/// Answer given when nothing has been indexed yet
pub const NO_DOCUMENTS_ANSWER: &str =
    "No documents have been indexed. Please upload documents using the /documents endpoint first.";

/// Response from `POST /documents`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentUploadResponse {
    /// Human readable summary
    pub message: String,
    /// Number of PDFs that produced at least one chunk
    pub documents_indexed: usize,
    /// Chunks added to the index by this upload
    pub total_chunks_generated: usize,
}

impl DocumentUploadResponse {
    /// Successful upload
    pub fn indexed(documents_indexed: usize, total_chunks_generated: usize) -> Self {
        Self {
            message: format!(
                "Documents processed successfully. {} PDF(s) indexed.",
                documents_indexed
            ),
            documents_indexed,
            total_chunks_generated,
        }
    }

    /// Upload contained PDFs but none yielded indexable text
    pub fn nothing_indexed() -> Self {
        Self {
            message: "No new documents were suitable for indexing or no text could be extracted."
                .to_string(),
            documents_indexed: 0,
            total_chunks_generated: 0,
        }
    }
}

/// A retrieved chunk shown alongside an answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceDocumentInfo {
    /// Filename the chunk came from
    pub source_filename: String,
    /// Leading text of the chunk
    pub content_preview: String,
}

impl SourceDocumentInfo {
    /// Build a preview from a retrieved chunk
    pub fn from_chunk(chunk: &Chunk) -> Self {
        let preview: String = chunk.content.chars().take(PREVIEW_CHARS).collect();
        Self {
            source_filename: chunk.source.filename.clone(),
            content_preview: format!("{}...", preview),
        }
    }
}

/// Response from `POST /question`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerResponse {
    /// Generated answer
    pub answer: String,
    /// Chunks the answer was grounded on
    #[serde(default)]
    pub source_documents: Vec<SourceDocumentInfo>,
}

impl AnswerResponse {
    /// Create a new answer response
    pub fn new(answer: String, source_documents: Vec<SourceDocumentInfo>) -> Self {
        Self {
            answer,
            source_documents,
        }
    }

    /// Response when the index holds no chunks
    pub fn no_documents() -> Self {
        Self::new(NO_DOCUMENTS_ANSWER.to_string(), Vec::new())
    }
}

/// Response from `POST /reset_index`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResetResponse {
    /// Confirmation message
    pub message: String,
}

impl ResetResponse {
    /// Build the confirmation for a reset
    pub fn new(had_persisted_index: bool) -> Self {
        let message = if had_persisted_index {
            "Vector store and persisted index have been reset successfully."
        } else {
            "No persisted vector store found to reset. In-memory store cleared."
        };
        Self {
            message: message.to_string(),
        }
    }
}
