//! Local vector store backed by the on-disk JSON index

use async_trait::async_trait;
use std::sync::Arc;

use crate::config::RagConfig;
use crate::error::{Error, Result};
use crate::retrieval::{SearchResult, VectorIndex};
use crate::types::Chunk;

use super::vector_store::VectorStoreProvider;

/// Local vector store wrapping `VectorIndex`
pub struct LocalVectorStore {
    index: Arc<VectorIndex>,
}

impl LocalVectorStore {
    /// Create from an existing index
    pub fn new(index: Arc<VectorIndex>) -> Self {
        Self { index }
    }

    /// Open the index directory named in config
    pub fn from_config(config: &RagConfig) -> Result<Self> {
        let index = Arc::new(VectorIndex::open(&config.vector_db.index_dir)?);
        Ok(Self { index })
    }
}

#[async_trait]
impl VectorStoreProvider for LocalVectorStore {
    async fn insert_chunks(&self, chunks: Vec<Chunk>) -> Result<usize> {
        // Persisting writes the whole file, keep it off the runtime threads
        let index = self.index.clone();
        tokio::task::spawn_blocking(move || index.add(chunks))
            .await
            .map_err(|e| Error::Internal(format!("Task join error: {}", e)))?
    }

    async fn search(&self, query_embedding: &[f32], top_k: usize) -> Result<Vec<SearchResult>> {
        let index = self.index.clone();
        let query = query_embedding.to_vec();

        tokio::task::spawn_blocking(move || index.search(&query, top_k))
            .await
            .map_err(|e| Error::Internal(format!("Task join error: {}", e)))?
    }

    async fn reset(&self) -> Result<bool> {
        let index = self.index.clone();
        tokio::task::spawn_blocking(move || index.reset())
            .await
            .map_err(|e| Error::Internal(format!("Task join error: {}", e)))?
    }

    async fn len(&self) -> Result<usize> {
        Ok(self.index.len())
    }

    fn name(&self) -> &str {
        "local-json"
    }
}
