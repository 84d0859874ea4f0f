//! Core types for the PDF Q&A system

pub mod document;
pub mod query;
pub mod response;

pub use document::{Chunk, ChunkSource, Document, FileType};
pub use query::QuestionRequest;
pub use response::{
    AnswerResponse, DocumentUploadResponse, ResetResponse, SourceDocumentInfo, NO_DOCUMENTS_ANSWER,
    PREVIEW_CHARS,
};
