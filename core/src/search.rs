use crate::corpus::CourseCorpus;
use crate::similarity::{cosine_vectors, TermVector};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchHit {
    pub course_id: String,
    pub url: String,
    pub score: f64,
}

/// Rank every course against the query words and keep the `top_k` best.
///
/// Only strictly positive scores are returned. Equal scores are ordered by
/// course id so results do not depend on how the corpus was built.
pub fn search<S: AsRef<str>>(query_words: &[S], corpus: &CourseCorpus, top_k: usize) -> Vec<SearchHit> {
    let query = query_words.iter().map(|w| w.as_ref()).collect::<Vec<&str>>().join(" ");
    let q_vec = TermVector::from_text(&query);
    if q_vec.is_empty() || top_k == 0 { return Vec::new(); }

    let mut scored: Vec<SearchHit> = corpus
        .iter()
        .filter_map(|course| {
            let score = cosine_vectors(&q_vec, &TermVector::from_text(&course.full_text()));
            (score > 0.0).then(|| SearchHit { course_id: course.id.clone(), url: course.url.clone(), score })
        })
        .collect();

    scored.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.course_id.cmp(&b.course_id))
    });
    scored.truncate(top_k);
    tracing::debug!(query = %query, hits = scored.len(), "ranked courses");
    scored
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corpus::CourseRecord;

    fn course(id: &str, title: &str, description: &str) -> CourseRecord {
        CourseRecord { id: id.into(), title: title.into(), description: description.into(), url: format!("u-{id}") }
    }

    #[test]
    fn ties_break_by_id() {
        let corpus: CourseCorpus = vec![
            course("zeta", "Arte", ""),
            course("alfa", "Arte", ""),
        ].into_iter().collect();
        let hits = search(&["arte"], &corpus, 10);
        let ids: Vec<&str> = hits.iter().map(|h| h.course_id.as_str()).collect();
        assert_eq!(ids, vec!["alfa", "zeta"]);
        assert_eq!(hits[0].score, hits[1].score);
    }

    #[test]
    fn zero_k_or_stopword_query_is_empty() {
        let corpus: CourseCorpus = vec![course("a", "Arte", "")].into_iter().collect();
        assert!(search(&["arte"], &corpus, 0).is_empty());
        assert!(search(&["el", "de"], &corpus, 5).is_empty());
    }
}
