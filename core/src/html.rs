//! Text helpers shared by the card extractor and the detail page parser.

use crate::config::TITLE_SUFFIX;
use scraper::{ElementRef, Selector};

const HIDDEN: &[&str] = &["script", "style", "noscript", "template"];

pub(crate) fn selectors(list: &[&str]) -> Vec<Selector> {
    list.iter().map(|s| Selector::parse(s).expect("valid selector")).collect()
}

/// Trimmed, non-empty text nodes under `el`, skipping script-like content.
pub(crate) fn text_chunks(el: ElementRef<'_>) -> Vec<&str> {
    el.descendants()
        .filter_map(|node| {
            let text = node.value().as_text()?;
            let hidden = node
                .ancestors()
                .any(|a| a.value().as_element().map_or(false, |e| HIDDEN.contains(&e.name())));
            if hidden { return None; }
            let t = text.trim();
            (!t.is_empty()).then_some(t)
        })
        .collect()
}

/// Flattened text of `el`: every text node trimmed and joined by a space.
pub(crate) fn flat_text(el: ElementRef<'_>) -> String {
    text_chunks(el).join(" ")
}

/// Text of `el` split on the line breaks of its text nodes, trimmed, blanks dropped.
pub(crate) fn text_lines(el: ElementRef<'_>) -> Vec<String> {
    text_chunks(el)
        .into_iter()
        .flat_map(str::lines)
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(str::to_string)
        .collect()
}

/// Remove the CMS suffix from a page or card title.
pub fn clean_title(title: &str) -> String {
    title.replace(TITLE_SUFFIX, "").trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::Html;

    #[test]
    fn skips_script_text() {
        let doc = Html::parse_fragment("<div><p> Hola </p><script>var x = 1;</script><p>mundo</p></div>");
        assert_eq!(flat_text(doc.root_element()), "Hola mundo");
    }

    #[test]
    fn strips_suffix() {
        let t = format!("Huella de Carbono{TITLE_SUFFIX}");
        assert_eq!(clean_title(&t), "Huella de Carbono");
    }
}
