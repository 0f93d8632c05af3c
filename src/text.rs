//! Corpus cleaning ahead of word2vec training.

use std::collections::HashSet;
use std::io::{BufRead, Write};
use std::sync::LazyLock;

use serde::Deserialize;
use tracing::{debug, info};

use crate::error::Result;

static STOPWORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        "a", "about", "above", "after", "again", "against", "all", "am", "an", "and",
        "any", "are", "as", "at", "be", "because", "been", "before", "being", "below",
        "between", "both", "but", "by", "can", "could", "did", "do", "does", "doing",
        "down", "during", "each", "few", "for", "from", "further", "had", "has", "have",
        "having", "he", "her", "here", "hers", "herself", "him", "himself", "his", "how",
        "i", "if", "in", "into", "is", "it", "its", "itself", "just", "me", "more",
        "most", "my", "myself", "no", "nor", "not", "now", "of", "off", "on", "once",
        "only", "or", "other", "our", "ours", "ourselves", "out", "over", "own", "same",
        "she", "should", "so", "some", "such", "than", "that", "the", "their", "theirs",
        "them", "themselves", "then", "there", "these", "they", "this", "those", "through",
        "to", "too", "under", "until", "up", "very", "was", "we", "were", "what", "when",
        "where", "which", "while", "who", "whom", "why", "will", "with", "would", "you",
        "your", "yours", "yourself", "yourselves",
    ]
    .into_iter()
    .collect()
});

pub fn is_stopword(word: &str) -> bool {
    STOPWORDS.contains(word)
}

/// Lowercases `text`, strips punctuation around each word and drops
/// stopwords. Words are joined with single spaces.
///
/// ```
/// use vecsim::text::remove_stopwords;
///
/// assert_eq!(remove_stopwords("This is a GREAT phone, and cheap!"), "great phone cheap");
/// ```
pub fn remove_stopwords(text: &str) -> String {
    text.split_whitespace()
        .map(|word| word.trim_matches(|c: char| !c.is_alphanumeric()).to_lowercase())
        .filter(|word| !word.is_empty() && !is_stopword(word))
        .collect::<Vec<_>>()
        .join(" ")
}

#[derive(Deserialize)]
struct Review {
    #[serde(rename = "reviewText", default)]
    review_text: String,
}

/// Reads one JSON review per line and writes its cleaned `reviewText`
/// as one line of output. Returns the number of reviews processed.
pub fn clean_reviews<R: BufRead, W: Write>(input: R, mut output: W) -> Result<usize> {
    let mut counter = 0;

    for line in input.lines() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let review: Review = serde_json::from_str(&line)?;
        writeln!(output, "{}", remove_stopwords(&review.review_text))?;

        counter += 1;
        if counter % 10_000 == 0 {
            debug!("Reading/Cleaning Data: {}", counter);
        }
    }

    output.flush()?;
    info!(reviews = counter, "cleaned reviews");
    Ok(counter)
}
