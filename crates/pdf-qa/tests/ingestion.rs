mod common;

use tempfile::tempdir;

use pdf_qa::ingestion::{FileParser, IngestPipeline};
use pdf_qa::providers::HashingEmbedder;
use pdf_qa::retrieval::VectorIndex;

use common::build_pdf;

#[test]
fn pdf_text_is_extracted_per_page() {
    let pdf = build_pdf(&[&["First page text."], &["Second page text."]]);
    let parsed = FileParser::parse("two-pages.pdf", &pdf).unwrap();

    assert_eq!(parsed.total_pages, Some(2));
    assert_eq!(parsed.pages.len(), 2);
    assert_eq!(parsed.pages[0].page_number, Some(1));
    assert!(parsed.pages[0].content.contains("First page text."));
    assert!(parsed.pages[1].content.contains("Second page text."));
}

#[test]
fn ingested_chunk_is_found_by_its_own_text() {
    let lines: Vec<String> = (0..40)
        .map(|i| format!("Line {} mentions topic{} and nothing else.", i, i))
        .collect();
    let line_refs: Vec<&str> = lines.iter().map(String::as_str).collect();
    let pdf = build_pdf(&[&line_refs]);

    let pipeline = IngestPipeline::new(300, 50);
    let (doc, mut chunks) = pipeline.ingest("topics.pdf", &pdf).unwrap();
    assert!(chunks.len() > 1);
    assert_eq!(doc.total_chunks as usize, chunks.len());
    assert!(chunks.iter().all(|c| c.content.chars().count() <= 300));

    let embedder = HashingEmbedder::new(256).unwrap();
    for chunk in chunks.iter_mut() {
        chunk.embedding = embedder.embed_text(&chunk.content);
    }
    let target = chunks[1].clone();

    let tmp = tempdir().unwrap();
    let index = VectorIndex::open(tmp.path()).unwrap();
    index.add(chunks).unwrap();

    let results = index.search(&embedder.embed_text(&target.content), 1).unwrap();
    assert_eq!(results[0].chunk.id, target.id);
    assert!((results[0].similarity - 1.0).abs() < 1e-4);
}
