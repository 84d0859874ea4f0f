//! Request types

use serde::{Deserialize, Serialize};

/// Body of `POST /question`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionRequest {
    /// The question to answer
    pub question: String,
}

