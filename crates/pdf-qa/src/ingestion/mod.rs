//! Document ingestion: PDF text extraction and chunking

mod chunker;
mod parser;
mod processor;

pub use chunker::{TextChunker, TextSpan};
pub use parser::{hash_content, FileParser, PageContent, ParsedDocument};
pub use processor::IngestPipeline;
