//! One-shot subcommands. Each prints its report to stdout.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter};
use std::path::Path;

use anyhow::{Context, bail};
use tracing::info;
use vecsim::Config;
use vecsim::embedder::{Embedder, OllamaEmbedder, embed_in_batches};
use vecsim::features::{TextData, royalty, royalty_texts};
use vecsim::similarity::{Embedding, similarity};
use vecsim::store::{Document, DocumentStore, IndexSettings};
use vecsim::text::clean_reviews;
use vecsim::vector::{add, cosine_similarity, sub};
use vecsim::word2vec::{Format, Model};

/// Prints every pairwise similarity, one block per target.
fn print_similarity_matrix<E: Embedding>(data: &[E], name: impl Fn(&E) -> &str) {
    for target in data {
        for result in similarity(target, data) {
            println!("{:<8} -> {:<8}: {:.3}% similar",
                name(result.target), name(result.candidate), result.percentage);
        }
        println!();
    }
}

/// King - Man + Woman, compared against Queen. Expects the royalty order.
fn print_royalty_analogy<E: Embedding>(data: &[E]) {
    let king_sub_man = sub(data[3].vector(), &data[1].vector());
    let plus_woman = add(king_sub_man, &data[2].vector());

    let result = cosine_similarity(&plus_woman, &data[4].vector());
    println!("King - Man + Woman ~= Queen similarity: {:.3}%", result * 100.0);
}

pub fn features() {
    let data = royalty();

    println!();
    for point in &data {
        println!("{:<8}: {}", point.name, point);
    }
    println!();

    print_similarity_matrix(&data, |d| d.name.as_str());
    print_royalty_analogy(&data);
}

pub async fn embed(config: &Config) -> anyhow::Result<()> {
    let embedder = OllamaEmbedder::from_config(config);
    let mut data: Vec<TextData> = royalty_texts();

    let texts: Vec<String> = data.iter().map(|d| d.text.clone()).collect();
    let vectors = embedder.embed(&texts).await
        .with_context(|| format!("create embeddings with '{}'", embedder.model()))?;

    for (point, vector) in data.iter_mut().zip(vectors) {
        point.vector = vector;
    }
    info!(model = embedder.model(), dims = data[0].vector.len(), "embedded royalty texts");

    print_similarity_matrix(&data, |d| d.name.as_str());
    print_royalty_analogy(&data);
    Ok(())
}

pub fn clean(input: &Path, output: &Path) -> anyhow::Result<()> {
    let reader = BufReader::new(File::open(input).with_context(|| format!("open {}", input.display()))?);
    let writer = BufWriter::new(File::create(output).with_context(|| format!("create {}", output.display()))?);

    let count = clean_reviews(reader, writer).context("clean reviews")?;
    println!("Reading/Cleaning Data: {}", count);
    Ok(())
}

fn load_model(path: &Path, binary: bool) -> anyhow::Result<Model> {
    let format = if binary { Format::Binary } else { Format::Text };
    Model::load(path, format).with_context(|| format!("load model {}", path.display()))
}

pub fn nearest(path: &Path, binary: bool, word: &str, n: usize) -> anyhow::Result<()> {
    let model = load_model(path, binary)?;
    let nearest = model.nearest(word, n)?;

    println!("Top {} words similar to \"{}\"", nearest.len(), word);
    for (rank, item) in nearest.iter().enumerate() {
        println!("  {:2}. {}", rank + 1, item);
    }
    Ok(())
}

pub fn compare(path: &Path, binary: bool, a: &str, b: &str) -> anyhow::Result<()> {
    let model = load_model(path, binary)?;
    let sim = model.similarity(a, b)?;

    println!("The similarity between the word \"{}\" and \"{}\"", a, b);
    println!("{:.3}%", sim * 100.0);
    Ok(())
}

/// Embeds each line of `input` as a chunk, then answers `question` with
/// the closest chunks.
pub async fn search(config: &Config, input: &Path, question: &str) -> anyhow::Result<()> {
    let file = File::open(input).with_context(|| format!("open {}", input.display()))?;
    let chunks: Vec<String> = BufReader::new(file)
        .lines()
        .collect::<std::io::Result<Vec<String>>>()?
        .into_iter()
        .filter(|line| !line.trim().is_empty())
        .collect();
    if chunks.is_empty() {
        bail!("{} has no chunks", input.display());
    }

    let embedder = OllamaEmbedder::from_config(config);
    let vectors = embed_in_batches(&embedder, &chunks, config.batch_size).await
        .context("vectorize chunks")?;

    let mut store = DocumentStore::new(IndexSettings::cosine(vectors[0].len()));
    for (i, (text, embedding)) in chunks.into_iter().zip(vectors).enumerate() {
        let doc = Document::new(i.to_string(), text, embedding).with_metadata("source", input.display().to_string());
        store.insert(doc)?;
    }

    let query = embedder.embed_one(question).await.context("embed question")?;
    let results = store.vector_search(&query, config.search())?;

    for res in results {
        println!("ID: {}, Score: {:.3}%\n{}\n", res.id, res.score * 100.0, res.text);
    }
    Ok(())
}
