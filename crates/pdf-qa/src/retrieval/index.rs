//! Persisted brute-force vector index for chunk storage and search

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::types::Chunk;

/// File inside the index directory that holds chunks and embeddings
pub const INDEX_FILE: &str = "index.json";

const FORMAT_VERSION: u32 = 1;

/// Search result with chunk and similarity
#[derive(Debug, Clone)]
pub struct SearchResult {
    /// The retrieved chunk
    pub chunk: Chunk,
    /// Cosine similarity (-1.0 to 1.0, higher is better)
    pub similarity: f32,
}

#[derive(Deserialize)]
struct PersistedIndex {
    version: u32,
    chunks: Vec<Chunk>,
}

#[derive(Serialize)]
struct PersistedIndexRef<'a> {
    version: u32,
    chunks: &'a [Chunk],
}

/// Vector index over embedded chunks, persisted as JSON on every write
pub struct VectorIndex {
    /// Directory holding `index.json`
    index_dir: PathBuf,
    /// Chunks with their embeddings
    chunks: RwLock<Vec<Chunk>>,
}

impl VectorIndex {
    /// Open the index in `index_dir`, loading any persisted chunks
    pub fn open(index_dir: impl Into<PathBuf>) -> Result<Self> {
        let index_dir = index_dir.into();
        fs::create_dir_all(&index_dir)?;

        let chunks = Self::load(&index_dir.join(INDEX_FILE));
        tracing::info!("Vector index opened at {} ({} chunks)", index_dir.display(), chunks.len());

        Ok(Self {
            index_dir,
            chunks: RwLock::new(chunks),
        })
    }

    /// Load persisted chunks; a missing or unreadable file yields an empty index
    fn load(path: &Path) -> Vec<Chunk> {
        if !path.exists() {
            tracing::info!("No index found at {}, a new one will be created on upload", path.display());
            return Vec::new();
        }

        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                tracing::warn!("Failed to read {}: {}", path.display(), e);
                return Vec::new();
            }
        };

        match serde_json::from_str::<PersistedIndex>(&content) {
            Ok(persisted) if persisted.version == FORMAT_VERSION => persisted.chunks,
            Ok(persisted) => {
                tracing::warn!(
                    "Ignoring index at {} with unsupported version {}",
                    path.display(),
                    persisted.version
                );
                Vec::new()
            }
            Err(e) => {
                tracing::warn!("Failed to parse {}: {}. Starting with an empty index.", path.display(), e);
                Vec::new()
            }
        }
    }

    /// Path of the persisted index file
    pub fn index_path(&self) -> PathBuf {
        self.index_dir.join(INDEX_FILE)
    }

    /// Add embedded chunks and persist the index
    pub fn add(&self, new_chunks: Vec<Chunk>) -> Result<usize> {
        if new_chunks.is_empty() {
            return Ok(0);
        }

        let mut chunks = self.chunks.write();

        let expected = chunks
            .first()
            .map(|c| c.embedding.len())
            .unwrap_or_else(|| new_chunks[0].embedding.len());

        for chunk in &new_chunks {
            if chunk.embedding.is_empty() {
                return Err(Error::vector_db(format!("Chunk {} has no embedding", chunk.id)));
            }
            if chunk.embedding.len() != expected {
                return Err(Error::vector_db(format!(
                    "Embedding dimension mismatch: index uses {}, chunk {} has {}",
                    expected,
                    chunk.id,
                    chunk.embedding.len()
                )));
            }
        }

        let before = chunks.len();
        let added = new_chunks.len();
        chunks.extend(new_chunks);

        // Memory never runs ahead of disk
        if let Err(e) = self.persist(&chunks) {
            chunks.truncate(before);
            return Err(e);
        }

        tracing::debug!("Added {} chunks, index now holds {}", added, chunks.len());
        Ok(added)
    }

    /// Return the `top_k` chunks most similar to `query_embedding`
    pub fn search(&self, query_embedding: &[f32], top_k: usize) -> Result<Vec<SearchResult>> {
        let chunks = self.chunks.read();

        if let Some(first) = chunks.first() {
            if first.embedding.len() != query_embedding.len() {
                return Err(Error::vector_db(format!(
                    "Query dimension {} does not match index dimension {}",
                    query_embedding.len(),
                    first.embedding.len()
                )));
            }
        }

        let mut scored: Vec<(f32, &Chunk)> = chunks
            .iter()
            .map(|chunk| (cosine_similarity(query_embedding, &chunk.embedding), chunk))
            .collect();

        scored.sort_by(|a, b| b.0.total_cmp(&a.0));
        scored.truncate(top_k);

        let results = scored
            .into_iter()
            .map(|(similarity, chunk)| SearchResult {
                similarity,
                // Callers never need the stored vector back
                chunk: Chunk {
                    id: chunk.id,
                    document_id: chunk.document_id,
                    content: chunk.content.clone(),
                    embedding: Vec::new(),
                    source: chunk.source.clone(),
                    char_start: chunk.char_start,
                    char_end: chunk.char_end,
                    chunk_index: chunk.chunk_index,
                },
            })
            .collect();

        Ok(results)
    }

    /// Drop every chunk, delete the persisted directory and recreate it empty.
    ///
    /// Returns whether a persisted index existed.
    pub fn reset(&self) -> Result<bool> {
        let mut chunks = self.chunks.write();
        chunks.clear();

        let existed = self.index_path().exists();
        if self.index_dir.exists() {
            fs::remove_dir_all(&self.index_dir)?;
        }
        fs::create_dir_all(&self.index_dir)?;

        tracing::info!("Vector index reset (persisted index existed: {})", existed);
        Ok(existed)
    }

    /// Get chunk count
    pub fn len(&self) -> usize {
        self.chunks.read().len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Write to a temporary file then rename over the index file
    fn persist(&self, chunks: &[Chunk]) -> Result<()> {
        fs::create_dir_all(&self.index_dir)?;

        let persisted = PersistedIndexRef {
            version: FORMAT_VERSION,
            chunks,
        };
        let tmp_path = self.index_dir.join(format!("{}.tmp", INDEX_FILE));
        fs::write(&tmp_path, serde_json::to_vec(&persisted)?)?;
        fs::rename(&tmp_path, self.index_path())?;

        Ok(())
    }
}

/// Cosine similarity, 0.0 when either vector has zero norm
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot / (norm_a * norm_b)
    }
}
