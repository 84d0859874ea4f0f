#![allow(dead_code)]

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, Response};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};
use serde_json::Value;

use pdf_qa::config::{EmbeddingBackend, RagConfig};
use pdf_qa::providers::{HashingEmbedder, LlmProvider};
use pdf_qa::server::state::AppState;

pub const BOUNDARY: &str = "pdf-qa-test-boundary";
pub const STUB_ANSWER: &str = "Stub answer from the test model.";

/// Build a PDF with one page per entry, each line drawn with its own text operator
pub fn build_pdf(pages: &[&[&str]]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => font_id,
        },
    });

    let mut kids: Vec<Object> = Vec::new();
    for lines in pages {
        let mut operations = Vec::new();
        for (i, line) in lines.iter().enumerate() {
            operations.push(Operation::new("BT", vec![]));
            operations.push(Operation::new("Tf", vec!["F1".into(), 12.into()]));
            operations.push(Operation::new("Td", vec![50.into(), (780 - 16 * i as i64).into()]));
            operations.push(Operation::new("Tj", vec![Object::string_literal(*line)]));
            operations.push(Operation::new("ET", vec![]));
        }
        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));

        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buf = Vec::new();
    doc.save_to(&mut buf).unwrap();
    buf
}

/// A file part for a multipart upload
pub struct Part<'a> {
    pub filename: Option<&'a str>,
    pub content_type: &'a str,
    pub data: Vec<u8>,
}

impl<'a> Part<'a> {
    pub fn pdf(filename: &'a str, data: Vec<u8>) -> Self {
        Self {
            filename: Some(filename),
            content_type: "application/pdf",
            data,
        }
    }

    pub fn text(filename: &'a str, text: &str) -> Self {
        Self {
            filename: Some(filename),
            content_type: "text/plain",
            data: text.as_bytes().to_vec(),
        }
    }
}

/// Encode parts under the repeated `files` field
pub fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for part in parts {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        match part.filename {
            Some(name) => body.extend_from_slice(
                format!("Content-Disposition: form-data; name=\"files\"; filename=\"{}\"\r\n", name)
                    .as_bytes(),
            ),
            None => body.extend_from_slice(b"Content-Disposition: form-data; name=\"files\"\r\n"),
        }
        body.extend_from_slice(format!("Content-Type: {}\r\n\r\n", part.content_type).as_bytes());
        body.extend_from_slice(&part.data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    body
}

pub fn upload_request(parts: &[Part<'_>]) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/documents")
        .header("content-type", format!("multipart/form-data; boundary={}", BOUNDARY))
        .body(Body::from(multipart_body(parts)))
        .unwrap()
}

pub fn question_request(question: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/question")
        .header("content-type", "application/json")
        .body(Body::from(serde_json::json!({ "question": question }).to_string()))
        .unwrap()
}

pub fn reset_request() -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/reset_index")
        .body(Body::empty())
        .unwrap()
}

pub async fn json_body(response: Response<Body>) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// LLM stand-in that counts calls and returns a fixed answer
#[derive(Default)]
pub struct StubLlm {
    pub calls: AtomicUsize,
}

impl StubLlm {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl LlmProvider for StubLlm {
    async fn generate(&self, _prompt: &str) -> pdf_qa::Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(format!("  {}  ", STUB_ANSWER))
    }

    async fn health_check(&self) -> pdf_qa::Result<bool> {
        Ok(true)
    }

    fn name(&self) -> &str {
        "stub"
    }

    fn model(&self) -> &str {
        "stub-model"
    }
}

pub fn test_config(index_dir: &Path) -> RagConfig {
    let mut config = RagConfig::default();
    config.vector_db.index_dir = index_dir.to_path_buf();
    config.embeddings.provider = EmbeddingBackend::Hashing;
    config.embeddings.dimensions = 128;
    config
}

/// App state with the hashing embedder and the stub model
pub fn test_state(index_dir: &Path) -> (AppState, Arc<StubLlm>) {
    let config = test_config(index_dir);
    let embedder = Arc::new(HashingEmbedder::new(config.embeddings.dimensions).unwrap());
    let llm = Arc::new(StubLlm::default());
    let state = AppState::with_providers(config, embedder, llm.clone()).unwrap();
    (state, llm)
}
