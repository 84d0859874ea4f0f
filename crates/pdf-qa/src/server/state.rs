//! Application state for the Q&A server

use std::sync::Arc;

use crate::config::{EmbeddingBackend, LlmBackend, RagConfig};
use crate::error::Result;
use crate::generation::AnswerComposer;
use crate::ingestion::IngestPipeline;
use crate::providers::{
    EmbeddingProvider, GroqClient, HashingEmbedder, LlmProvider, LocalVectorStore, OllamaEmbedder,
    OllamaLlm, VectorStoreProvider,
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    /// Configuration
    config: RagConfig,
    /// Vector store for chunks
    vector_store: Arc<dyn VectorStoreProvider>,
    /// Embedding provider (Ollama or hashing)
    embedding_provider: Arc<dyn EmbeddingProvider>,
    /// LLM provider (Groq or Ollama)
    llm_provider: Arc<dyn LlmProvider>,
    /// Parse and chunk uploads
    pipeline: IngestPipeline,
    /// Question answering over the store
    composer: AnswerComposer,
}

impl AppState {
    /// Create new application state with providers picked by config
    pub async fn new(config: RagConfig) -> Result<Self> {
        tracing::info!(
            "Initializing application state (embeddings: {:?}, llm: {:?})...",
            config.embeddings.provider,
            config.llm.provider
        );

        let embedding_provider: Arc<dyn EmbeddingProvider> = match config.embeddings.provider {
            EmbeddingBackend::Ollama => {
                tracing::info!(
                    "Using Ollama embeddings ({} at {})",
                    config.embeddings.model,
                    config.embeddings.base_url
                );
                Arc::new(OllamaEmbedder::new(&config.embeddings)?)
            }
            EmbeddingBackend::Hashing => {
                tracing::info!("Using offline hashing embeddings");
                Arc::new(HashingEmbedder::new(config.embeddings.dimensions)?)
            }
        };

        let llm_provider: Arc<dyn LlmProvider> = match config.llm.provider {
            LlmBackend::Groq => Arc::new(GroqClient::new(&config.llm)?),
            LlmBackend::Ollama => Arc::new(OllamaLlm::new(&config.llm)?),
        };
        tracing::info!("LLM provider: {} ({})", llm_provider.name(), llm_provider.model());

        Self::with_providers(config, embedding_provider, llm_provider)
    }

    /// Create state around explicit embedding and LLM providers.
    ///
    /// The vector index is opened from `config.vector_db.index_dir`.
    pub fn with_providers(
        config: RagConfig,
        embedding_provider: Arc<dyn EmbeddingProvider>,
        llm_provider: Arc<dyn LlmProvider>,
    ) -> Result<Self> {
        let vector_store: Arc<dyn VectorStoreProvider> =
            Arc::new(LocalVectorStore::from_config(&config)?);
        tracing::info!(
            "Vector store initialized ({} at {})",
            vector_store.name(),
            config.vector_db.index_dir.display()
        );

        let pipeline = IngestPipeline::new(config.chunking.chunk_size, config.chunking.chunk_overlap);
        let composer = AnswerComposer::new(
            Arc::clone(&embedding_provider),
            Arc::clone(&llm_provider),
            Arc::clone(&vector_store),
            config.llm.top_k,
        );

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                vector_store,
                embedding_provider,
                llm_provider,
                pipeline,
                composer,
            }),
        })
    }

    /// Get configuration
    pub fn config(&self) -> &RagConfig {
        &self.inner.config
    }

    /// Get embedding provider
    pub fn embedding_provider(&self) -> &Arc<dyn EmbeddingProvider> {
        &self.inner.embedding_provider
    }

    /// Get LLM provider
    pub fn llm_provider(&self) -> &Arc<dyn LlmProvider> {
        &self.inner.llm_provider
    }

    /// Get vector store provider
    pub fn vector_store(&self) -> &Arc<dyn VectorStoreProvider> {
        &self.inner.vector_store
    }

    /// Get the ingestion pipeline
    pub fn pipeline(&self) -> &IngestPipeline {
        &self.inner.pipeline
    }

    /// Get the answer composer
    pub fn composer(&self) -> &AnswerComposer {
        &self.inner.composer
    }

    /// Ready once the embedding backend answers; uploads and questions both need it
    pub async fn is_ready(&self) -> bool {
        match self.inner.embedding_provider.health_check().await {
            Ok(healthy) => healthy,
            Err(e) => {
                tracing::warn!("Embedding provider health check failed: {}", e);
                false
            }
        }
    }
}
