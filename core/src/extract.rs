//! Course card extraction.
//!
//! A card is a loosely structured HTML fragment from the catalog listing. The
//! title and the description are each picked by an ordered chain of
//! strategies; the first strategy that produces text wins.

use crate::config::{CrawlConfig, UNTITLED};
use crate::corpus::{course_id_from_url, CourseRecord};
use crate::error::ExtractError;
use crate::html::{clean_title, flat_text, selectors, text_lines};
use crate::metadata::is_metadata;
use lazy_static::lazy_static;
use regex::Regex;
use scraper::{Html, Selector};
use std::collections::HashSet;
use url::Url;

lazy_static! {
    static ref ANCHOR: Selector = Selector::parse("a").expect("valid selector");
    static ref TITLE_SELECTORS: Vec<Selector> =
        selectors(&["b.card-title", ".card-title", "h3", "h4", "h5", "a > b", "a"]);
    /// Description containers, most specific first. The flag marks the generic
    /// paragraph selector, which gets a minimum length filter.
    static ref DESCRIPTION_SELECTORS: Vec<(Selector, bool)> = selectors(&[
        "div[class*='descripcion']",
        "div.description",
        "p.card-text",
        "p",
    ])
    .into_iter()
    .zip([false, false, false, true])
    .collect();
    static ref SENTENCE_END: Regex = Regex::new(r"[.!?]\s+").expect("valid regex");
}

const MIN_GENERIC_PARAGRAPH: usize = 30;
const MIN_SENTENCE: usize = 50;
const FALLBACK_LINES: usize = 3;

type Strategy = fn(&Html) -> Option<String>;

const TITLE_CHAIN: &[Strategy] = &[title_from_selectors, title_from_first_line];
const DESCRIPTION_CHAIN: &[Strategy] =
    &[description_from_selectors, description_from_sentences, description_from_longest_lines];

/// Extract one course from a candidate card. Any failure means "no course here".
pub fn extract(node_html: &str, base_url: &Url, config: &CrawlConfig) -> Option<CourseRecord> {
    match try_extract(node_html, base_url, config) {
        Ok(record) => Some(record),
        Err(err) => {
            tracing::debug!(%err, "skipping candidate node");
            None
        }
    }
}

pub fn try_extract(node_html: &str, base_url: &Url, config: &CrawlConfig) -> Result<CourseRecord, ExtractError> {
    let node = Html::parse_fragment(node_html);

    // only the first anchor counts, even when a later one carries the link
    let href = node
        .select(&ANCHOR)
        .next()
        .and_then(|a| a.value().attr("href"))
        .map(str::trim)
        .filter(|h| !h.is_empty())
        .ok_or(ExtractError::MissingHref)?;
    let url = base_url.join(href).map_err(|_| ExtractError::InvalidUrl(href.to_string()))?;
    let host = url.host_str().unwrap_or_default();
    if !config.accepts_host(host) {
        return Err(ExtractError::ForeignHost { host: host.to_string() });
    }
    let id = course_id_from_url(&url).ok_or_else(|| ExtractError::NoCourseId(url.to_string()))?;

    let title = TITLE_CHAIN
        .iter()
        .find_map(|strategy| strategy(&node))
        .map(|t| clean_title(&t))
        .unwrap_or_else(|| UNTITLED.to_string());
    let description = DESCRIPTION_CHAIN.iter().find_map(|strategy| strategy(&node)).unwrap_or_default();

    Ok(CourseRecord { id, title, description, url: url.to_string() })
}

/// Short fragments with digits are almost always "40 horas" or a price.
fn is_descriptive(text: &str) -> bool {
    if text.is_empty() || is_metadata(text) { return false; }
    let short = text.split_whitespace().count() < 4;
    !(short && text.chars().any(|c| c.is_ascii_digit()))
}

fn non_empty(parts: Vec<String>) -> Option<String> {
    let joined = parts.join(" ");
    let joined = joined.trim();
    (!joined.is_empty()).then(|| joined.to_string())
}

fn title_from_selectors(node: &Html) -> Option<String> {
    TITLE_SELECTORS
        .iter()
        .find_map(|sel| node.select(sel).map(flat_text).find(|t| !t.is_empty()))
}

fn title_from_first_line(node: &Html) -> Option<String> {
    text_lines(node.root_element()).into_iter().next()
}

fn description_from_selectors(node: &Html) -> Option<String> {
    let mut parts = Vec::new();
    let mut taken = HashSet::new();
    let mut specific_found = false;
    for (selector, generic) in DESCRIPTION_SELECTORS.iter() {
        for el in node.select(selector) {
            // an element, or one nested in it, contributes once
            if taken.contains(&el.id()) || el.ancestors().any(|a| taken.contains(&a.id())) { continue; }
            let text = flat_text(el);
            if !is_descriptive(&text) { continue; }
            if *generic && !specific_found && text.chars().count() < MIN_GENERIC_PARAGRAPH { continue; }
            taken.insert(el.id());
            parts.push(text);
        }
        if !*generic && !parts.is_empty() { specific_found = true; }
    }
    non_empty(parts)
}

fn description_from_sentences(node: &Html) -> Option<String> {
    let flat = flat_text(node.root_element());
    let sentences = SENTENCE_END
        .split(&flat)
        .map(str::trim)
        .filter(|s| !is_metadata(s) && s.chars().count() >= MIN_SENTENCE)
        .map(str::to_string)
        .collect();
    non_empty(sentences)
}

fn description_from_longest_lines(node: &Html) -> Option<String> {
    let mut lines: Vec<String> = text_lines(node.root_element()).into_iter().filter(|l| !is_metadata(l)).collect();
    // stable: equal lengths keep document order
    lines.sort_by_key(|l| std::cmp::Reverse(l.chars().count()));
    lines.truncate(FALLBACK_LINES);
    non_empty(lines)
}
