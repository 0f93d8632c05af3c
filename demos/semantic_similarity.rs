//! Model-generated embeddings for the royalty descriptions, computed
//! locally with a BERT sentence model instead of an Ollama server.
//!
//! Run with `cargo run --release --example semantic_similarity`.

use std::time::Instant;
use vecsim::features::royalty_texts;
use vecsim::similarity::{Embedding, similarity};
use vecsim::vector::{add, cosine_similarity, sub};

use candle_core::{DType, Device, Tensor};
use candle_nn::VarBuilder;
use candle_transformers::models::bert::{BertModel, Config as BertConfig};
use hf_hub::{api::sync::Api, Repo, RepoType};
use tokenizers::{PaddingParams, Tokenizer, TruncationParams};

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
    let start = Instant::now();
    let embedder = LocalEmbedder::load(MODEL_ID)?;
    println!("Loaded '{}' ({} dims) in {:.3}s\n", MODEL_ID, embedder.dims, start.elapsed().as_secs_f64());

    // Cosine similarity does not need normalized vectors
    let mut data = royalty_texts();
    let texts: Vec<&str> = data.iter().map(|d| d.text.as_str()).collect();
    let vectors = embedder.embed(&texts)?;
    for (point, vector) in data.iter_mut().zip(vectors) {
        point.vector = vector;
    }

    for target in &data {
        for result in similarity(target, &data) {
            println!("{:<8} -> {:<8}: {:.3}% similar",
                result.target.name, result.candidate.name, result.percentage);
        }
        println!();
    }

    // King - Man + Woman ~= Queen
    let king_sub_man = sub(data[3].vector(), &data[1].vector());
    let plus_woman = add(king_sub_man, &data[2].vector());

    let result = cosine_similarity(&plus_woman, &data[4].vector());
    println!("King - Man + Woman ~= Queen similarity: {:.3}%", result * 100.0);

    Ok(())
}
