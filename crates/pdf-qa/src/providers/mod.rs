//! Provider abstractions for embeddings, LLM and vector storage
//!
//! Trait objects let the server switch between hosted, local and offline
//! backends from configuration.

pub mod embedding;
pub mod groq;
pub mod hashing;
pub mod llm;
pub mod local;
pub mod ollama;
pub mod vector_store;

pub use embedding::EmbeddingProvider;
pub use groq::GroqClient;
pub use hashing::HashingEmbedder;
pub use llm::LlmProvider;
pub use local::LocalVectorStore;
pub use ollama::{OllamaEmbedder, OllamaLlm};
pub use vector_store::VectorStoreProvider;
