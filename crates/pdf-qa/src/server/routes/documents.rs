//! PDF upload endpoint

use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    Json,
};
use std::time::{Duration, Instant};
use tokio::time::timeout;

use crate::error::{Error, Result};
use crate::server::state::AppState;
use crate::types::{Chunk, DocumentUploadResponse, FileType};

/// POST /documents - Upload PDFs, chunk, embed and index them
pub async fn upload_documents(
    State(state): State<AppState>,
    multipart: std::result::Result<Multipart, MultipartRejection>,
) -> Result<Json<DocumentUploadResponse>> {
    let mut multipart = multipart.map_err(|e| Error::invalid_request(e.body_text()))?;
    let start = Instant::now();
    let file_timeout = Duration::from_secs(state.config().processing.file_timeout_secs);

    let mut files_received = 0usize;
    let mut documents_indexed = 0usize;
    let mut pending_chunks: Vec<Chunk> = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| Error::invalid_request(format!("Failed to read multipart field: {}", e)))?
    {
        // Plain form fields are ignored; only `files` parts or parts carrying a filename count
        if field.name() != Some("files") && field.file_name().is_none() {
            tracing::debug!("Ignoring form field {:?}", field.name());
            continue;
        }
        files_received += 1;

        let Some(filename) = field.file_name().map(|s| s.to_string()).filter(|s| !s.is_empty()) else {
            tracing::warn!("Received a file without a filename, skipping");
            continue;
        };

        if !FileType::from_filename(&filename).is_supported() {
            tracing::warn!("Skipping non-PDF file: {}", filename);
            continue;
        }

        let data = match field.bytes().await {
            Ok(d) => d,
            Err(e) => {
                tracing::warn!("Failed to read {}: {}", filename, e);
                continue;
            }
        };

        tracing::info!("Processing file: {} ({} bytes)", filename, data.len());
        let file_start = Instant::now();
        let file_size = data.len();

        // Parsing is CPU bound, run it on the blocking pool under the per-file timeout
        let ingest_state = state.clone();
        let ingest_name = filename.clone();
        let ingest = tokio::task::spawn_blocking(move || {
            ingest_state.pipeline().ingest(&ingest_name, &data)
        });

        match timeout(file_timeout, ingest).await {
            Ok(Ok(Ok((doc, chunks)))) => {
                if chunks.is_empty() {
                    tracing::warn!("No chunks generated for {}, text might be too short", filename);
                    continue;
                }
                tracing::info!(
                    "Chunked '{}': {} pages, {} chunks in {:.1}s",
                    filename,
                    doc.total_pages.unwrap_or(1),
                    doc.total_chunks,
                    file_start.elapsed().as_secs_f64()
                );
                documents_indexed += 1;
                pending_chunks.extend(chunks);
            }
            Ok(Ok(Err(e))) => {
                tracing::warn!("Failed to process {}: {}", filename, e);
            }
            Ok(Err(e)) => {
                tracing::error!("Processing task for {} failed: {}", filename, e);
            }
            Err(_) => {
                tracing::error!(
                    "TIMEOUT processing '{}' after {:.1}s (limit: {}s, size: {} bytes). Skipping file.",
                    filename,
                    file_start.elapsed().as_secs_f64(),
                    file_timeout.as_secs(),
                    file_size
                );
            }
        }
    }

    if pending_chunks.is_empty() {
        if files_received > 0 {
            return Err(Error::invalid_request(
                "No PDF files provided were valid or processable.",
            ));
        }
        return Ok(Json(DocumentUploadResponse::nothing_indexed()));
    }

    let total_chunks = embed_and_index(&state, pending_chunks).await?;

    tracing::info!(
        "Indexed {} PDF(s), {} chunks in {}ms",
        documents_indexed,
        total_chunks,
        start.elapsed().as_millis()
    );

    Ok(Json(DocumentUploadResponse::indexed(documents_indexed, total_chunks)))
}

/// Embed every chunk then add them to the store in one write
async fn embed_and_index(state: &AppState, mut chunks: Vec<Chunk>) -> Result<usize> {
    let texts: Vec<String> = chunks.iter().map(|c| c.content.clone()).collect();
    let embeddings = state.embedding_provider().embed_batch(&texts).await?;

    if embeddings.len() != chunks.len() {
        return Err(Error::embedding(format!(
            "Expected {} embeddings, got {}",
            chunks.len(),
            embeddings.len()
        )));
    }

    for (chunk, embedding) in chunks.iter_mut().zip(embeddings) {
        chunk.embedding = embedding;
    }

    state.vector_store().insert_chunks(chunks).await
}
