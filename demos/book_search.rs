//! Chunk file -> local embeddings -> in-memory document store -> question.
//!
//! The input holds one chunk of text per line.
//!
//! Run with `cargo run --release --example book_search -- book.chunks "what is an interface?"`.

use std::time::Instant;
use vecsim::store::{Document, DocumentStore, IndexSettings, VectorSearch};

use candle_core::{DType, Device, Tensor};
use candle_nn::VarBuilder;
use candle_transformers::models::bert::{BertModel, Config as BertConfig};
use hf_hub::{api::sync::Api, Repo, RepoType};
use tokenizers::{PaddingParams, Tokenizer, TruncationParams};

const BATCH_SIZE: usize = 32;

const MODEL_ID: &str = "BAAI/bge-base-en-v1.5";

/// BERT sentence embeddings computed on this machine.
struct LocalEmbedder {
    model: BertModel,
    tokenizer: Tokenizer,
    device: Device,
    dims: usize,
}

impl LocalEmbedder {
    fn load(model_id: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let device = Device::cuda_if_available(0)?;
        let repo = Api::new()?.repo(Repo::new(model_id.to_string(), RepoType::Model));

        let bert_config: BertConfig = serde_json::from_str(&std::fs::read_to_string(repo.get("config.json")?)?)?;
        let mut tokenizer = Tokenizer::from_file(repo.get("tokenizer.json")?).map_err(|e| e.to_string())?;
        tokenizer.with_padding(Some(PaddingParams::default()));
        tokenizer
            .with_truncation(Some(TruncationParams { max_length: 512, ..Default::default() }))
            .map_err(|e| e.to_string())?;

        let weights = [repo.get("model.safetensors")?];
        let vb = unsafe { VarBuilder::from_mmaped_safetensors(&weights, DType::F32, &device)? };
        let model = BertModel::load(vb, &bert_config)?;

        Ok(LocalEmbedder { model, tokenizer, device, dims: bert_config.hidden_size })
    }

    /// One vector per text, mean-pooled over the non-padding tokens.
    fn embed(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, Box<dyn std::error::Error>> {
        let encodings = self.tokenizer.encode_batch(texts.to_vec(), true).map_err(|e| e.to_string())?;
        let (rows, cols) = (encodings.len(), encodings[0].len());

        let mut token_ids = Vec::with_capacity(rows * cols);
        let mut attention = Vec::with_capacity(rows * cols);
        for encoding in &encodings {
            token_ids.extend_from_slice(encoding.get_ids());
            attention.extend_from_slice(encoding.get_attention_mask());
        }

        let token_ids = Tensor::from_vec(token_ids, (rows, cols), &self.device)?;
        let attention = Tensor::from_vec(attention, (rows, cols), &self.device)?;
        let hidden = self.model.forward(&token_ids, &token_ids.zeros_like()?, Some(&attention))?;

        let weights = attention.unsqueeze(2)?.to_dtype(DType::F32)?;
        let summed = hidden.broadcast_mul(&weights)?.sum(1)?;
        let counts = weights.sum(1)?.clamp(1e-9, f64::MAX)?;
        let pooled = summed.broadcast_div(&counts)?;

        Ok(pooled.to_vec2()?)
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let [input, question @ ..] = args.as_slice() else {
        eprintln!("Usage: cargo run --example book_search -- <chunks file> \"your question\"");
        std::process::exit(1);
    };
    if question.is_empty() {
        eprintln!("Missing question");
        std::process::exit(1);
    }
    let question = question.join(" ");

    let chunks: Vec<String> = std::fs::read_to_string(input)?
        .lines()
        .filter(|l| !l.trim().is_empty())
        .map(String::from)
        .collect();
    println!("{} chunks in '{}'", chunks.len(), input);

    let start = Instant::now();
    let embedder = LocalEmbedder::load(MODEL_ID)?;
    println!("Loaded '{}' in {:.3}s\n", MODEL_ID, start.elapsed().as_secs_f64());

    let start = Instant::now();
    let mut store = DocumentStore::new(IndexSettings::cosine(embedder.dims));
    for batch in chunks.chunks(BATCH_SIZE) {
        let texts: Vec<&str> = batch.iter().map(String::as_str).collect();

        for (text, embedding) in batch.iter().zip(embedder.embed(&texts)?) {
            let doc = Document::new(store.count().to_string(), text.clone(), embedding)
                .with_metadata("source", input.as_str());
            store.insert(doc)?;
        }
        println!("Vectorizing Data: {} of {}", store.count(), chunks.len());
    }
    println!("Vectorized in {:.3}s\n", start.elapsed().as_secs_f64());

    let query = embedder.embed(&[question.as_str()])?.remove(0);
    let start = Instant::now();
    let results = store.vector_search(&query, VectorSearch { num_candidates: 5, limit: 5 })?;

    println!("Question: \"{}\" ({:.1}ms)\n", question, start.elapsed().as_secs_f64() * 1000.0);
    for res in results {
        println!("ID: {}, Score: {:.3}%\n{}\n", res.id, res.score * 100.0, res.text);
    }

    Ok(())
}
