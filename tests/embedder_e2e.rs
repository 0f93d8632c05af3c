use actix_web::{App, HttpResponse, HttpServer, web};
use serde_json::{Value, json};
use std::net::TcpListener;
use tokio::time::{Duration, sleep};
use vecsim::embedder::{Embedder, OllamaEmbedder, embed_in_batches};
use vecsim::features::royalty_texts;
use vecsim::store::{Document, DocumentStore, IndexSettings, VectorSearch};
use vecsim::{Error, similarity};

/// Find a free port by binding to port 0
fn free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    listener.local_addr().unwrap().port()
}

/// Deterministic stand-in for a model: counts a few marker words.
fn fake_embedding(text: &str) -> Vec<f32> {
    let lower = text.to_lowercase();
    ["male", "female", "rich", "poor", "animal"]
        .iter()
        .map(|marker| {
            lower.split(|c: char| !c.is_alphanumeric())
                .filter(|word| word == marker)
                .count() as f32
        })
        .collect()
}

async fn embed_handler(body: web::Json<Value>) -> HttpResponse {
    if body["model"] != "test-model" {
        return HttpResponse::NotFound().json(json!({"error": "model not found"}));
    }

    let embeddings: Vec<Vec<f32>> = body["input"]
        .as_array()
        .unwrap()
        .iter()
        .map(|text| fake_embedding(text.as_str().unwrap()))
        .collect();

    HttpResponse::Ok().json(json!({ "model": "test-model", "embeddings": embeddings }))
}

/// Always returns a single vector regardless of input count.
async fn short_handler() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "embeddings": [[1.0, 2.0]] }))
}

async fn start_mock() -> (actix_web::dev::ServerHandle, String) {
    let port = free_port();
    let server = HttpServer::new(|| {
        App::new()
            .route("/api/embed", web::post().to(embed_handler))
            .route("/short/api/embed", web::post().to(short_handler))
    })
    .bind(format!("127.0.0.1:{}", port))
    .unwrap()
    .run();
    let handle = server.handle();
    tokio::spawn(server);
    sleep(Duration::from_millis(200)).await;

    (handle, format!("http://127.0.0.1:{}", port))
}

#[actix_web::test]
async fn test_embed_royalty_texts() {
    let (handle, base) = start_mock().await;
    let embedder = OllamaEmbedder::new(&base, "test-model");

    let mut data = royalty_texts();
    let texts: Vec<String> = data.iter().map(|d| d.text.clone()).collect();
    let vectors = embedder.embed(&texts).await.unwrap();

    assert_eq!(vectors.len(), 5);
    for (point, vector) in data.iter_mut().zip(vectors) {
        point.vector = vector;
    }

    // King vs Queen differ only in gender; King vs Horse share nothing
    let results = similarity(&data[3], &data);
    assert!((results[3].similarity - 1.0).abs() < 1e-5);
    assert!(results[4].similarity > results[0].similarity);
    assert_eq!(results[0].similarity, 0.0);

    handle.stop(true).await;
}

#[actix_web::test]
async fn test_batches_and_search() {
    let (handle, base) = start_mock().await;
    let embedder = OllamaEmbedder::new(format!("{}/", base), "test-model");

    let chunks: Vec<String> = vec![
        "a rich male ruler".to_string(),
        "a poor female worker".to_string(),
        "an animal in a field".to_string(),
        "rich female ruler".to_string(),
        "poor male worker".to_string(),
    ];
    let vectors = embed_in_batches(&embedder, &chunks, 2).await.unwrap();
    assert_eq!(vectors.len(), 5);

    let mut store = DocumentStore::new(IndexSettings::cosine(5));
    for (i, (text, embedding)) in chunks.iter().zip(vectors).enumerate() {
        store.insert(Document::new(i.to_string(), text.clone(), embedding)).unwrap();
    }

    let query = embedder.embed_one("which animal?").await.unwrap();
    let results = store.vector_search(&query, VectorSearch { num_candidates: 5, limit: 2 }).unwrap();

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].id, "2");
    assert!((results[0].score - 1.0).abs() < 1e-5);

    handle.stop(true).await;
}

#[actix_web::test]
async fn test_unknown_model_is_service_error() {
    let (handle, base) = start_mock().await;
    let embedder = OllamaEmbedder::new(&base, "missing-model");

    let result = embedder.embed(&["hello".to_string()]).await;
    match result {
        Err(Error::EmbeddingService { status, body }) => {
            assert_eq!(status, 404);
            assert!(body.contains("model not found"));
        }
        other => panic!("expected service error, got {:?}", other),
    }

    handle.stop(true).await;
}

#[actix_web::test]
async fn test_count_mismatch() {
    let (handle, base) = start_mock().await;
    let embedder = OllamaEmbedder::new(format!("{}/short", base), "test-model");

    let result = embedder.embed(&["a".to_string(), "b".to_string()]).await;
    assert!(matches!(result, Err(Error::EmbeddingCount { expected: 2, got: 1 })));

    handle.stop(true).await;
}

#[actix_web::test]
async fn test_empty_input_skips_request() {
    // Nothing is listening here; an empty batch must not connect
    let embedder = OllamaEmbedder::new(format!("http://127.0.0.1:{}", free_port()), "test-model");
    let vectors = embedder.embed(&[]).await.unwrap();
    assert!(vectors.is_empty());
}

#[actix_web::test]
async fn test_connection_refused() {
    let embedder = OllamaEmbedder::new(format!("http://127.0.0.1:{}", free_port()), "test-model");
    let result = embedder.embed(&["hello".to_string()]).await;
    assert!(matches!(result, Err(Error::Http(_))));
}
