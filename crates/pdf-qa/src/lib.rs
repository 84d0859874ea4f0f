//! pdf-qa: question answering over uploaded PDF documents
//!
//! PDFs are split into overlapping chunks, embedded, and kept in a local
//! persisted vector index. Questions are answered by a hosted LLM prompted
//! with the most similar chunks. An axum server exposes upload, question and
//! reset endpoints; a second binary serves a small browser UI.

pub mod config;
pub mod error;
pub mod generation;
pub mod ingestion;
pub mod providers;
pub mod retrieval;
pub mod server;
pub mod types;
pub mod ui;

pub use config::RagConfig;
pub use error::{Error, Result};
pub use types::{
    document::{Chunk, ChunkSource, Document, FileType},
    query::QuestionRequest,
    response::{AnswerResponse, DocumentUploadResponse, ResetResponse, SourceDocumentInfo},
};
