use crate::error::CatalogError;
use crate::tokenizer::normalize;
use indexmap::IndexMap;
use lazy_static::lazy_static;
use percent_encoding::percent_decode_str;
use regex::Regex;
use serde::{Deserialize, Serialize};
use url::Url;

lazy_static! {
    static ref ID_STRIP: Regex = Regex::new(r"[^a-z0-9\-_]").expect("valid regex");
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CourseRecord {
    pub id: String,
    pub title: String,
    pub description: String,
    pub url: String,
}

impl CourseRecord {
    /// Title and description joined the way both indexing and scoring read them.
    pub fn full_text(&self) -> String {
        format!("{} {}", self.title, self.description)
    }
}

/// Derive a course id from the last non-empty path segment of `url`:
/// percent-decoded, normalized, spaces turned into dashes and anything outside
/// `[a-z0-9-_]` removed.
pub fn course_id_from_url(url: &Url) -> Option<String> {
    let last = url.path().split('/').filter(|p| !p.is_empty()).last()?;
    let decoded = percent_decode_str(last).decode_utf8_lossy();
    let slug = normalize(&decoded).replace(' ', "-");
    let slug = ID_STRIP.replace_all(&slug, "").into_owned();
    if slug.is_empty() { None } else { Some(slug) }
}

/// Courses keyed by id, kept in the order they were first harvested.
#[derive(Debug, Clone, Default)]
pub struct CourseCorpus {
    courses: IndexMap<String, CourseRecord>,
}

impl CourseCorpus {
    pub fn new() -> Self { Self::default() }

    /// Insert unless a course with the same id is already present.
    /// Returns whether the record was stored.
    pub fn insert_if_absent(&mut self, record: CourseRecord) -> bool {
        if self.courses.contains_key(&record.id) { return false; }
        self.courses.insert(record.id.clone(), record);
        true
    }

    /// Insert or replace, keeping the original position of an existing id.
    pub fn upsert(&mut self, record: CourseRecord) {
        self.courses.insert(record.id.clone(), record);
    }

    pub fn get(&self, id: &str) -> Option<&CourseRecord> { self.courses.get(id) }

    pub fn lookup(&self, id: &str) -> Result<&CourseRecord, CatalogError> {
        self.get(id).ok_or_else(|| CatalogError::UnknownCourse(id.to_string()))
    }

    pub fn iter(&self) -> impl Iterator<Item = &CourseRecord> { self.courses.values() }

    pub fn len(&self) -> usize { self.courses.len() }

    pub fn is_empty(&self) -> bool { self.courses.is_empty() }
}

impl FromIterator<CourseRecord> for CourseCorpus {
    fn from_iter<I: IntoIterator<Item = CourseRecord>>(iter: I) -> Self {
        let mut corpus = CourseCorpus::new();
        for record in iter { corpus.insert_if_absent(record); }
        corpus
    }
}
