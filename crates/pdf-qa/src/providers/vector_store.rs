//! Vector store provider trait for storing and searching embeddings

use async_trait::async_trait;
use crate::error::Result;
use crate::retrieval::SearchResult;
use crate::types::Chunk;

/// Trait for vector storage and similarity search
///
/// Implementations:
/// - `LocalVectorStore`: Persisted brute-force index on the local filesystem
#[async_trait]
pub trait VectorStoreProvider: Send + Sync {
    /// Insert embedded chunks, returning how many were stored
    async fn insert_chunks(&self, chunks: Vec<Chunk>) -> Result<usize>;

    /// Search for the `top_k` most similar chunks
    async fn search(&self, query_embedding: &[f32], top_k: usize) -> Result<Vec<SearchResult>>;

    /// Remove every chunk and the persisted index.
    ///
    /// Returns whether a persisted index existed.
    async fn reset(&self) -> Result<bool>;

    /// Get total number of vectors stored
    async fn len(&self) -> Result<usize>;

    /// Check if store is empty
    async fn is_empty(&self) -> Result<bool> {
        Ok(self.len().await? == 0)
    }

    /// Get provider name for logging
    fn name(&self) -> &str;
}
