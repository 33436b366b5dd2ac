//! End-to-end tests: corpus on disk -> HTTP embedding service -> index ->
//! query, over real sockets with the deterministic stub embedder.

use std::fs;
use std::time::Duration;

use tempfile::TempDir;

use ctx_client::EmbeddingClient;
use ctx_embeddings::Embedding;
use ctx_index::{FlatIndex, VectorIndex};
use ctx_ingest::{IngestConfig, IngestPipeline};
use e2e_tests::{spawn_stub_server, stub_vector, FAIL_MARKER, STUB_DIM};

fn write_corpus(dir: &TempDir, files: &[(&str, &str)]) {
    for (name, text) in files {
        fs::write(dir.path().join(name), text).unwrap();
    }
}

fn client_for(addr: std::net::SocketAddr) -> EmbeddingClient {
    EmbeddingClient::new(format!("http://{}", addr), Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn test_ingest_then_query_returns_matching_file_first() {
    let (addr, server) = spawn_stub_server().await;
    let corpus = TempDir::new().unwrap();
    write_corpus(
        &corpus,
        &[
            ("alpha.txt", "the quick brown fox"),
            ("beta.txt", "an entirely different subject"),
            ("gamma.txt", "yet another topic altogether"),
        ],
    );

    let client = client_for(addr);
    let mut index = FlatIndex::new();
    let pipeline = IngestPipeline::new(client.clone(), IngestConfig::new(corpus.path()));

    let stats = pipeline.run(&mut index).await.unwrap();
    assert_eq!(stats.discovered, 3);
    assert_eq!(stats.indexed, 3);
    assert_eq!(stats.failed, 0);
    assert_eq!(index.stats().dimension, Some(STUB_DIM));

    // Query with the exact text of beta.txt: same text, same stub vector,
    // so beta must rank first with similarity 1.0
    let values = client
        .embed_text("query", "an entirely different subject")
        .await
        .unwrap();
    let results = index.search(&Embedding::new(values), 2).unwrap();

    assert_eq!(results[0].identifier, "beta.txt");
    assert!((results[0].score - 1.0).abs() < 1e-5);
    assert!(results[1].score < results[0].score);

    server.abort();
}

#[tokio::test]
async fn test_one_failing_document_does_not_block_the_rest() {
    let (addr, server) = spawn_stub_server().await;
    let corpus = TempDir::new().unwrap();
    write_corpus(
        &corpus,
        &[
            ("good-one.txt", "perfectly fine text"),
            ("bad.txt", &format!("{} this one breaks", FAIL_MARKER)),
            ("good-two.txt", "more fine text"),
        ],
    );

    let client = client_for(addr);
    let mut index = FlatIndex::new();
    let pipeline = IngestPipeline::new(client, IngestConfig::new(corpus.path()).with_batch_size(3));

    let stats = pipeline.run(&mut index).await.unwrap();
    assert_eq!(stats.discovered, 3);
    assert_eq!(stats.indexed, 2);
    assert_eq!(stats.failed, 1);

    // Only the two good files made it in
    let query = Embedding::new(stub_vector("perfectly fine text"));
    let results = index.search(&query, 5).unwrap();
    assert_eq!(results.len(), 2);
    assert!(results.iter().all(|r| r.identifier != "bad.txt"));

    server.abort();
}

#[tokio::test]
async fn test_unreachable_service_skips_files_but_finishes() {
    // Nothing listens on the discard port
    let client = EmbeddingClient::new("http://127.0.0.1:9", Duration::from_secs(2)).unwrap();

    let corpus = TempDir::new().unwrap();
    write_corpus(&corpus, &[("a.txt", "alpha"), ("b.txt", "beta")]);

    let mut index = FlatIndex::new();
    let pipeline = IngestPipeline::new(client, IngestConfig::new(corpus.path()));

    let stats = pipeline.run(&mut index).await.unwrap();
    assert_eq!(stats.discovered, 2);
    assert_eq!(stats.indexed, 0);
    assert_eq!(stats.failed, 2);
    assert!(index.is_empty());
}

#[tokio::test]
async fn test_reingesting_appends_duplicates() {
    let (addr, server) = spawn_stub_server().await;
    let corpus = TempDir::new().unwrap();
    write_corpus(&corpus, &[("a.txt", "alpha")]);

    let client = client_for(addr);
    let mut index = FlatIndex::new();
    let pipeline = IngestPipeline::new(client, IngestConfig::new(corpus.path()));

    pipeline.run(&mut index).await.unwrap();
    pipeline.run(&mut index).await.unwrap();

    // Identifier is not a key: the second run adds a second entry
    assert_eq!(index.len(), 2);

    server.abort();
}

#[tokio::test]
async fn test_health_endpoint_reports_stub_model() {
    let (addr, server) = spawn_stub_server().await;

    let body: serde_json::Value = reqwest::get(format!("http://{}/health", addr))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body["status"], "ok");
    assert_eq!(body["model"], "stub-embedder");
    assert_eq!(body["dimension"], STUB_DIM as u64);

    server.abort();
}
