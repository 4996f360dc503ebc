use crate::{CourseCorpus, CourseRecord, InvertedIndex};
use anyhow::{anyhow, Context, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs::{self, create_dir_all, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Separator of the `course_id|word` index table. Neither ids nor words can contain it.
pub const INDEX_DELIMITER: char = '|';

#[derive(Debug, Serialize, Deserialize)]
pub struct MetaFile {
    pub num_courses: usize,
    pub num_terms: usize,
    pub created_at: String,
    pub version: u32,
}

impl MetaFile {
    pub fn describe(corpus: &CourseCorpus, index: &InvertedIndex) -> Self {
        Self {
            num_courses: corpus.len(),
            num_terms: index.num_terms(),
            created_at: time::OffsetDateTime::now_utc()
                .format(&time::format_description::well_known::Rfc3339)
                .unwrap_or_default(),
            version: 1,
        }
    }
}

#[derive(Serialize, Deserialize)]
struct StoredCourse {
    title: String,
    description: String,
    url: String,
}

pub struct CatalogPaths {
    pub root: PathBuf,
}

impl CatalogPaths {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self { root: root.as_ref().to_path_buf() }
    }
    pub fn index(&self) -> PathBuf { self.root.join("index.csv") }
    pub fn courses(&self) -> PathBuf { self.root.join("courses.json") }
    pub fn meta(&self) -> PathBuf { self.root.join("meta.json") }
}

/// Write through a sibling temp file and rename it into place, so readers
/// never see a half-written file.
fn write_atomically<F>(path: &Path, write: F) -> Result<()>
where
    F: FnOnce(&mut BufWriter<File>) -> Result<()>,
{
    if let Some(dir) = path.parent() { create_dir_all(dir)?; }
    let tmp = path.with_extension("tmp");
    let mut out = BufWriter::new(File::create(&tmp)?);
    let written = write(&mut out).and_then(|()| out.flush().map_err(anyhow::Error::from));
    drop(out);
    if let Err(err) = written {
        fs::remove_file(&tmp).ok();
        return Err(err);
    }
    fs::rename(&tmp, path).with_context(|| format!("moving {} into place", path.display()))?;
    Ok(())
}

/// One `course_id|word` row per membership, sorted by word then by course id.
pub fn save_index(paths: &CatalogPaths, index: &InvertedIndex) -> Result<()> {
    write_atomically(&paths.index(), |out| {
        for (word, course_id) in index.pairs() {
            writeln!(out, "{course_id}{INDEX_DELIMITER}{word}")?;
        }
        Ok(())
    })
}

pub fn load_index(paths: &CatalogPaths) -> Result<InvertedIndex> {
    let reader = BufReader::new(File::open(paths.index())?);
    let mut index = InvertedIndex::new();
    for (lineno, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() { continue; }
        let (course_id, word) = line
            .split_once(INDEX_DELIMITER)
            .ok_or_else(|| anyhow!("malformed index row {}: {line:?}", lineno + 1))?;
        index.insert(word.to_string(), course_id);
    }
    Ok(index)
}

pub fn save_corpus(paths: &CatalogPaths, corpus: &CourseCorpus) -> Result<()> {
    let stored: IndexMap<&str, StoredCourse> = corpus
        .iter()
        .map(|c| {
            (c.id.as_str(), StoredCourse { title: c.title.clone(), description: c.description.clone(), url: c.url.clone() })
        })
        .collect();
    write_atomically(&paths.courses(), |out| {
        serde_json::to_writer_pretty(&mut *out, &stored)?;
        out.write_all(b"\n")?;
        Ok(())
    })
}

pub fn load_corpus(paths: &CatalogPaths) -> Result<CourseCorpus> {
    load_corpus_file(&paths.courses())
}

pub fn load_corpus_file(path: &Path) -> Result<CourseCorpus> {
    let f = File::open(path).with_context(|| format!("opening corpus {}", path.display()))?;
    let stored: IndexMap<String, StoredCourse> = serde_json::from_reader(BufReader::new(f))?;
    Ok(stored
        .into_iter()
        .map(|(id, c)| CourseRecord { id, title: c.title, description: c.description, url: c.url })
        .collect())
}

pub fn save_meta(paths: &CatalogPaths, meta: &MetaFile) -> Result<()> {
    write_atomically(&paths.meta(), |out| {
        serde_json::to_writer_pretty(&mut *out, meta)?;
        Ok(())
    })
}

pub fn load_meta(paths: &CatalogPaths) -> Result<MetaFile> {
    let f = File::open(paths.meta())?;
    let meta: MetaFile = serde_json::from_reader(BufReader::new(f))?;
    Ok(meta)
}

/// Persist everything one crawl or rebuild produces.
pub fn save_catalog(paths: &CatalogPaths, corpus: &CourseCorpus, index: &InvertedIndex) -> Result<()> {
    save_corpus(paths, corpus)?;
    save_index(paths, index)?;
    save_meta(paths, &MetaFile::describe(corpus, index))?;
    Ok(())
}
