//! Vector index and similarity search

pub mod index;

pub use index::{cosine_similarity, SearchResult, VectorIndex, INDEX_FILE};
