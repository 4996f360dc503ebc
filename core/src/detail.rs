//! Course detail page parsing: a second, richer look at a course once its own
//! page has been fetched.

use crate::config::UNTITLED;
use crate::corpus::{course_id_from_url, CourseRecord};
use crate::html::{clean_title, flat_text, selectors};
use crate::metadata::is_metadata;
use lazy_static::lazy_static;
use scraper::{Html, Selector};
use url::Url;

lazy_static! {
    static ref META_DESCRIPTION: Selector = Selector::parse("meta[name='description']").expect("valid selector");
    static ref OG_DESCRIPTION: Selector = Selector::parse("meta[property='og:description']").expect("valid selector");
    static ref CONTAINERS: Vec<Selector> = selectors(&[
        "div[class*='descripcion']",
        "div.description",
        "div[class*='content']",
        "article",
    ]);
    static ref PARAGRAPH: Selector = Selector::parse("p").expect("valid selector");
    static ref BODY: Selector = Selector::parse("body").expect("valid selector");
    static ref TITLES: Vec<Selector> = selectors(&["h1", ".title", ".card-title", "title"]);
}

const MIN_PARAGRAPH: usize = 40;
const MAX_PARAGRAPHS: usize = 3;
const MAX_RAW_TEXT: usize = 1000;

type Strategy = fn(&Html) -> Option<String>;

const DESCRIPTION_CHAIN: &[Strategy] = &[
    meta_description,
    og_description,
    longest_container_text,
    leading_paragraphs,
    raw_page_text,
];

/// Rebuild a course record from its detail page. `None` when the url yields
/// no course id.
pub fn parse_detail_page(url: &Url, html: &str) -> Option<CourseRecord> {
    let id = course_id_from_url(url)?;
    let doc = Html::parse_document(html);
    let description = DESCRIPTION_CHAIN.iter().find_map(|strategy| strategy(&doc)).unwrap_or_default();
    let title = page_title(&doc)
        .or_else(|| first_sentence(&description))
        .map(|t| clean_title(&t))
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| UNTITLED.to_string());
    Some(CourseRecord { id, title, description, url: url.to_string() })
}

fn meta_description(doc: &Html) -> Option<String> { meta_content(doc, &META_DESCRIPTION) }

fn og_description(doc: &Html) -> Option<String> { meta_content(doc, &OG_DESCRIPTION) }

fn meta_content(doc: &Html, selector: &Selector) -> Option<String> {
    doc.select(selector)
        .next()
        .and_then(|m| m.value().attr("content"))
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_string)
}

/// Longest non-metadata text of the first container kind that has any.
fn longest_container_text(doc: &Html) -> Option<String> {
    CONTAINERS.iter().find_map(|sel| {
        doc.select(sel)
            .map(flat_text)
            .filter(|t| !t.is_empty() && !is_metadata(t))
            .reduce(|best, t| if t.chars().count() > best.chars().count() { t } else { best })
    })
}

fn leading_paragraphs(doc: &Html) -> Option<String> {
    let paras: Vec<String> = doc
        .select(&PARAGRAPH)
        .map(flat_text)
        .filter(|p| !is_metadata(p) && p.chars().count() > MIN_PARAGRAPH)
        .take(MAX_PARAGRAPHS)
        .collect();
    (!paras.is_empty()).then(|| paras.join(" "))
}

fn raw_page_text(doc: &Html) -> Option<String> {
    let root = doc.select(&BODY).next().unwrap_or_else(|| doc.root_element());
    let text: String = flat_text(root).chars().take(MAX_RAW_TEXT).collect();
    (!text.is_empty()).then_some(text)
}

fn page_title(doc: &Html) -> Option<String> {
    TITLES.iter().find_map(|sel| doc.select(sel).map(flat_text).find(|t| !t.is_empty()))
}

fn first_sentence(description: &str) -> Option<String> {
    let first = description.split('.').next()?.trim();
    (!first.is_empty()).then(|| first.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url() -> Url { Url::parse("https://educacionvirtual.javeriana.edu.co/huella-de-carbono").unwrap() }

    #[test]
    fn prefers_meta_description() {
        let html = r#"<html><head><meta name="description" content=" Mide y reduce emisiones. ">
            <meta property="og:description" content="otra"></head>
            <body><h1>Huella de Carbono</h1><p>Un párrafo bastante largo que no debería ganar nunca aquí.</p></body></html>"#;
        let course = parse_detail_page(&url(), html).unwrap();
        assert_eq!(course.id, "huella-de-carbono");
        assert_eq!(course.title, "Huella de Carbono");
        assert_eq!(course.description, "Mide y reduce emisiones.");
    }

    #[test]
    fn falls_back_to_og_then_containers() {
        let og = r#"<html><head><meta property="og:description" content="Desde og"></head><body></body></html>"#;
        assert_eq!(parse_detail_page(&url(), og).unwrap().description, "Desde og");

        let containers = r#"<html><body>
            <div class="main-content">Corto</div>
            <div class="page-content">Texto más largo del contenedor principal</div>
            <div class="side-content">Duración: 40 horas y mucho más texto aquí</div>
        </body></html>"#;
        let course = parse_detail_page(&url(), containers).unwrap();
        assert_eq!(course.description, "Texto más largo del contenedor principal");
        assert_eq!(course.title, "Texto más largo del contenedor principal");
    }

    #[test]
    fn uses_long_paragraphs_then_raw_text() {
        let paras = r#"<html><body>
            <p>corto</p>
            <p>Primer párrafo con suficiente longitud para contar como texto.</p>
            <p>Horario: lunes a viernes, siempre con una frase bien larga.</p>
            <p>Segundo párrafo con suficiente longitud para contar también.</p>
        </body></html>"#;
        let course = parse_detail_page(&url(), paras).unwrap();
        assert_eq!(
            course.description,
            "Primer párrafo con suficiente longitud para contar como texto. Segundo párrafo con suficiente longitud para contar también."
        );
        assert_eq!(course.title, "Primer párrafo con suficiente longitud para contar como texto");

        let raw = "<html><body><span>Solo texto suelto</span></body></html>";
        assert_eq!(parse_detail_page(&url(), raw).unwrap().description, "Solo texto suelto");
    }

    #[test]
    fn untitled_when_page_is_empty() {
        let course = parse_detail_page(&url(), "<html><body></body></html>").unwrap();
        assert_eq!(course.title, UNTITLED);
        assert_eq!(course.description, "");
    }
}
