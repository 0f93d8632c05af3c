//! Small hand-made datasets for exploring embeddings.
//!
//! [`FeatureData`] spells its features out by hand: each field is one
//! dimension of the vector. A trained model learns features like these on
//! its own, but nobody can tell you what its dimensions mean.
//! [`TextData`] carries a description whose vector comes from a model.

use std::fmt;

use crate::similarity::Embedding;

#[derive(Debug, Clone, PartialEq)]
pub struct FeatureData {
    pub name: String,
    pub authority: f32,
    pub animal: f32,
    pub human: f32,
    pub rich: f32,
    pub gender: f32,
}

impl Embedding for FeatureData {
    fn vector(&self) -> Vec<f32> {
        vec![self.authority, self.animal, self.human, self.rich, self.gender]
    }
}

impl fmt::Display for FeatureData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let values: Vec<String> = self.vector().iter().map(|v| format!("{:.6}", v)).collect();
        write!(f, "[{}]", values.join(" "))
    }
}

fn feature(name: &str, authority: f32, animal: f32, human: f32, rich: f32, gender: f32) -> FeatureData {
    FeatureData { name: name.to_string(), authority, animal, human, rich, gender }
}

/// Horse, Man, Woman, King and Queen, in that order.
///
/// Gender is -1 for male and +1 for female, so `King - Man + Woman`
/// comes out identical to `Queen`.
pub fn royalty() -> Vec<FeatureData> {
    vec![
        feature("Horse", 0.0, 1.0, 0.0, 0.0, 1.0),
        feature("Man", 0.0, 0.0, 1.0, 0.0, -1.0),
        feature("Woman", 0.0, 0.0, 1.0, 0.0, 1.0),
        feature("King", 1.0, 0.0, 1.0, 1.0, -1.0),
        feature("Queen", 1.0, 0.0, 1.0, 1.0, 1.0),
    ]
}

/// A labeled piece of text and the vector a model produced for it.
#[derive(Debug, Clone, PartialEq)]
pub struct TextData {
    pub name: String,
    pub text: String,
    pub vector: Vec<f32>,
}

impl Embedding for TextData {
    fn vector(&self) -> Vec<f32> {
        self.vector.clone()
    }
}

/// Same five entities as [`royalty`], described in words. Vectors start
/// empty and are filled in by an embedder.
pub fn royalty_texts() -> Vec<TextData> {
    [
        ("Horse", "Animal, Female"),
        ("Man", "Human,  Male,   Pants, Poor, Worker"),
        ("Woman", "Human,  Female, Dress, Poor, Worker"),
        ("King", "Human,  Male,   Pants, Rich, Ruler"),
        ("Queen", "Human,  Female, Dress, Rich, Ruler"),
    ]
    .into_iter()
    .map(|(name, text)| TextData { name: name.to_string(), text: text.to_string(), vector: Vec::new() })
    .collect()
}
