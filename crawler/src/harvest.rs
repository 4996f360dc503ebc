use crate::render::Renderer;
use catalog_core::extract::extract;
use catalog_core::{CourseCorpus, CrawlConfig};
use std::time::Duration;
use tokio::time::sleep;
use url::Url;

/// Card containers seen on the listing page, most specific first.
pub const CARD_SELECTORS: &[&str] = &["div.card-body", "div.item-programa", "div[class*='card']", "article"];
/// Cards looked up again once "load more" stopped adding content.
pub const LOADED_CARD_SELECTOR: &str = "div.card-body, div.item-programa, article";
pub const LOAD_MORE_SELECTOR: &str =
    "button[class*='load'], button[class*='more'], a[class*='load'], button[class*='mas']";

#[derive(Debug, Clone)]
pub struct HarvestConfig {
    pub crawl: CrawlConfig,
    /// Wait after navigating, for the listing's scripts to render.
    pub settle: Duration,
    /// Wait after each scroll or click.
    pub scroll_pause: Duration,
    pub max_scrolls: usize,
}

impl Default for HarvestConfig {
    fn default() -> Self {
        Self {
            crawl: CrawlConfig::default(),
            settle: Duration::from_secs(4),
            scroll_pause: Duration::from_secs(2),
            max_scrolls: 20,
        }
    }
}

/// Enumerate the course cards of the listing page. Failures of the renderer
/// only reduce the number of candidates; the first extraction of an id wins.
pub async fn harvest<R: Renderer + ?Sized>(renderer: &R, config: &HarvestConfig) -> CourseCorpus {
    let mut corpus = CourseCorpus::new();
    let base = match Url::parse(&config.crawl.start_url) {
        Ok(url) => url,
        Err(err) => {
            tracing::warn!(%err, start_url = %config.crawl.start_url, "invalid listing url");
            return corpus;
        }
    };
    if let Err(err) = renderer.navigate(base.as_str()).await {
        tracing::warn!(%err, url = %base, "could not load listing page");
        return corpus;
    }
    sleep(config.settle).await;

    for selector in CARD_SELECTORS {
        collect_cards(renderer, selector, &base, config, &mut corpus).await;
    }
    let scrolls = load_more(renderer, config).await;
    if scrolls > 0 {
        collect_cards(renderer, LOADED_CARD_SELECTOR, &base, config, &mut corpus).await;
    }

    tracing::info!(courses = corpus.len(), scrolls, "harvested catalog listing");
    corpus
}

async fn collect_cards<R: Renderer + ?Sized>(
    renderer: &R,
    selector: &str,
    base: &Url,
    config: &HarvestConfig,
    corpus: &mut CourseCorpus,
) -> usize {
    let nodes = match renderer.find_nodes(selector).await {
        Ok(nodes) => nodes,
        Err(err) => {
            tracing::debug!(%err, selector, "no candidates");
            return 0;
        }
    };
    let mut added = 0;
    for course in nodes.iter().filter_map(|node| extract(node, base, &config.crawl)) {
        if corpus.insert_if_absent(course) { added += 1; }
    }
    tracing::debug!(selector, candidates = nodes.len(), added, "extracted cards");
    added
}

/// Scroll and press "load more" until the page stops growing or the scroll
/// ceiling is hit. Returns the number of scrolls that grew the page.
async fn load_more<R: Renderer + ?Sized>(renderer: &R, config: &HarvestConfig) -> usize {
    let mut last_height = match renderer.page_height().await {
        Ok(h) => h,
        Err(err) => {
            tracing::debug!(%err, "page height unavailable, skipping load more");
            return 0;
        }
    };
    let mut grown = 0;
    while grown < config.max_scrolls {
        if let Err(err) = renderer.scroll_to_bottom().await {
            tracing::debug!(%err, "scroll failed");
            break;
        }
        sleep(config.scroll_pause).await;
        match renderer.click_all(LOAD_MORE_SELECTOR).await {
            Ok(0) => {}
            Ok(clicked) => {
                tracing::debug!(clicked, "pressed load more");
                sleep(config.scroll_pause).await;
            }
            Err(err) => tracing::debug!(%err, "load more lookup failed"),
        }
        let height = match renderer.page_height().await {
            Ok(h) => h,
            Err(_) => break,
        };
        if height == last_height { break; }
        last_height = height;
        grown += 1;
    }
    grown
}
