//! Answer generation from retrieved chunks

pub mod composer;
pub mod ollama;
pub mod prompt;

pub use composer::AnswerComposer;
pub use ollama::OllamaClient;
pub use prompt::PromptBuilder;
