use crate::corpus::CourseCorpus;
use crate::error::CatalogError;
use crate::tokenizer::tokenize;
use std::collections::HashMap;

/// Word -> occurrence count for one piece of text. Built per comparison.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TermVector {
    counts: HashMap<String, u32>,
}

impl TermVector {
    pub fn from_text(text: &str) -> Self {
        let mut counts: HashMap<String, u32> = HashMap::new();
        for word in tokenize(text) {
            *counts.entry(word).or_insert(0) += 1;
        }
        Self { counts }
    }

    pub fn is_empty(&self) -> bool { self.counts.is_empty() }

    pub fn get(&self, word: &str) -> u32 { self.counts.get(word).copied().unwrap_or(0) }

    pub fn dot(&self, other: &TermVector) -> u64 {
        // iterate the smaller side
        let (small, large) = if self.counts.len() <= other.counts.len() { (self, other) } else { (other, self) };
        small
            .counts
            .iter()
            .map(|(w, &c)| c as u64 * large.get(w) as u64)
            .sum()
    }

    pub fn squared_norm(&self) -> u64 {
        self.counts.values().map(|&c| c as u64 * c as u64).sum()
    }
}

/// Cosine similarity of the raw term-frequency vectors of two texts, in [0, 1].
/// Empty vocabularies on either side give 0.0.
pub fn cosine(text_a: &str, text_b: &str) -> f64 {
    let a = TermVector::from_text(text_a);
    let b = TermVector::from_text(text_b);
    cosine_vectors(&a, &b)
}

pub fn cosine_vectors(a: &TermVector, b: &TermVector) -> f64 {
    if a.is_empty() || b.is_empty() { return 0.0; }
    let (sq_a, sq_b) = (a.squared_norm(), b.squared_norm());
    if sq_a == 0 || sq_b == 0 { return 0.0; }
    // sqrt of the product keeps self-similarity exactly 1.0
    let denom = ((sq_a as f64) * (sq_b as f64)).sqrt();
    (a.dot(b) as f64 / denom).clamp(0.0, 1.0)
}

/// Similarity of two courses of the corpus over title and description.
pub fn compare(corpus: &CourseCorpus, id_a: &str, id_b: &str) -> Result<f64, CatalogError> {
    let a = corpus.lookup(id_a)?;
    let b = corpus.lookup(id_b)?;
    Ok(cosine(&a.full_text(), &b.full_text()))
}
