//! Hand-crafted embeddings: every dimension is a named feature.
//!
//! Run with `cargo run --example analogy`.

use vecsim::features::royalty;
use vecsim::similarity::{Embedding, similarity};
use vecsim::vector::{add, cosine_similarity, sub};

fn main() {
    let data = royalty();

    println!("Features: authority, animal, human, rich, gender\n");
    for point in &data {
        println!("{:<8}: {}", point.name, point);
    }
    println!();

    for target in &data {
        let mut results = similarity(target, &data);
        // Ranking is the caller's job
        results.sort_by(|a, b| b.similarity.total_cmp(&a.similarity));

        println!("Closest to {}:", target.name);
        for result in results.iter().skip(1) {
            println!("  {:<8} {:>8.3}%", result.candidate.name, result.percentage);
        }
        println!();
    }

    // King - Man + Woman ~= Queen
    let king_sub_man = sub(data[3].vector(), &data[1].vector());
    println!("King - Man         = {:?}", king_sub_man);

    let plus_woman = add(king_sub_man, &data[2].vector());
    println!("King - Man + Woman = {:?}", plus_woman);
    println!("Queen              = {:?}", data[4].vector());

    let result = cosine_similarity(&plus_woman, &data[4].vector());
    println!("\nKing - Man + Woman ~= Queen similarity: {:.3}%", result * 100.0);
}
