//! Retrieval-augmented answering: embed, search, prompt, generate

use std::sync::Arc;
use std::time::Instant;

use crate::error::{Error, Result};
use crate::providers::{EmbeddingProvider, LlmProvider, VectorStoreProvider};
use crate::types::{AnswerResponse, SourceDocumentInfo};

use super::prompt::PromptBuilder;

/// Answers questions from the chunks held in a vector store
pub struct AnswerComposer {
    embedder: Arc<dyn EmbeddingProvider>,
    llm: Arc<dyn LlmProvider>,
    vector_store: Arc<dyn VectorStoreProvider>,
    top_k: usize,
}

impl AnswerComposer {
    /// Create a composer retrieving `top_k` chunks per question
    pub fn new(
        embedder: Arc<dyn EmbeddingProvider>,
        llm: Arc<dyn LlmProvider>,
        vector_store: Arc<dyn VectorStoreProvider>,
        top_k: usize,
    ) -> Self {
        Self {
            embedder,
            llm,
            vector_store,
            top_k: top_k.max(1),
        }
    }

    /// Answer `question` from the indexed documents
    pub async fn answer(&self, question: &str) -> Result<AnswerResponse> {
        if question.trim().is_empty() {
            return Err(Error::invalid_request("Question cannot be empty."));
        }

        if self.vector_store.is_empty().await? {
            tracing::info!("Question received before any documents were indexed");
            return Ok(AnswerResponse::no_documents());
        }

        let start = Instant::now();

        let query_embedding = self.embedder.embed(question).await?;
        let results = self.vector_store.search(&query_embedding, self.top_k).await?;
        tracing::debug!(
            "Retrieved {} chunks for question in {}ms",
            results.len(),
            start.elapsed().as_millis()
        );

        let context = PromptBuilder::build_context(&results);
        let prompt = PromptBuilder::build_qa_prompt(question, &context);

        let answer = self.llm.generate(&prompt).await?;

        tracing::info!(
            "Answered with {} ({}) using {} chunks in {}ms",
            self.llm.name(),
            self.llm.model(),
            results.len(),
            start.elapsed().as_millis()
        );

        let sources = results
            .iter()
            .map(|r| SourceDocumentInfo::from_chunk(&r.chunk))
            .collect();

        Ok(AnswerResponse::new(answer.trim().to_string(), sources))
    }
}
