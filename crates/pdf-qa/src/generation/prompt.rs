//! Prompt template for grounded question answering

use crate::retrieval::SearchResult;

/// Prompt builder for RAG queries
pub struct PromptBuilder;

impl PromptBuilder {
    /// Concatenate retrieved chunk texts, most similar first
    pub fn build_context(results: &[SearchResult]) -> String {
        results
            .iter()
            .map(|r| r.chunk.content.as_str())
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Fill the answering template
    pub fn build_qa_prompt(question: &str, context: &str) -> String {
        format!(
            "You are an AI assistant specialized in answering questions based on provided documents.
Use ONLY the following pieces of context (document excerpts) to answer the question.
If the context does not contain the answer, state that you don't know or the information is not available in the provided documents.
Do not make up information or use external knowledge.
Keep your answer concise and directly responsive to the question.

Context:
{context}

Question: {question}

Helpful Answer:"
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Chunk, ChunkSource};
    use uuid::Uuid;

    fn result(content: &str) -> SearchResult {
        SearchResult {
            chunk: Chunk::new(
                Uuid::new_v4(),
                content.to_string(),
                ChunkSource::pdf("a.pdf".to_string(), None),
                0,
                content.len(),
                0,
            ),
            similarity: 0.9,
        }
    }

    #[test]
    fn test_build_context_joins_chunks() {
        let context = PromptBuilder::build_context(&[result("first"), result("second")]);
        assert_eq!(context, "first\n\nsecond");
        assert_eq!(PromptBuilder::build_context(&[]), "");
    }

    #[test]
    fn test_prompt_fills_slots() {
        let prompt = PromptBuilder::build_qa_prompt("What colour is the sky?", "The sky is blue.");
        assert!(prompt.contains("Context:\nThe sky is blue.\n\nQuestion: What colour is the sky?"));
        assert!(prompt.ends_with("Helpful Answer:"));
        assert!(!prompt.contains("{context}"));
        assert!(!prompt.contains("{question}"));
    }
}
