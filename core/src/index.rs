use crate::corpus::CourseCorpus;
use crate::tokenizer::tokenize;
use std::collections::{BTreeMap, BTreeSet};

/// Word -> ids of the courses whose title or description contains it.
///
/// Ordered maps make the structure (and its persisted form) independent of
/// the order courses were visited in.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct InvertedIndex {
    pub postings: BTreeMap<String, BTreeSet<String>>,
}

impl InvertedIndex {
    pub fn new() -> Self { Self::default() }

    pub fn insert(&mut self, word: String, course_id: &str) {
        self.postings.entry(word).or_default().insert(course_id.to_string());
    }

    pub fn courses_for(&self, word: &str) -> Option<&BTreeSet<String>> { self.postings.get(word) }

    pub fn num_terms(&self) -> usize { self.postings.len() }

    /// `(word, course_id)` pairs sorted by word, then by id.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.postings
            .iter()
            .flat_map(|(w, ids)| ids.iter().map(move |id| (w.as_str(), id.as_str())))
    }
}

pub fn build_index(corpus: &CourseCorpus) -> InvertedIndex {
    let mut index = InvertedIndex::new();
    for course in corpus.iter() {
        for word in tokenize(&course.full_text()) {
            index.insert(word, &course.id);
        }
    }
    tracing::debug!(courses = corpus.len(), terms = index.num_terms(), "built inverted index");
    index
}
