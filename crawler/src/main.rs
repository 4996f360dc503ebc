use anyhow::{bail, Result};
use catalog_core::config::{DEFAULT_START_URL, DEFAULT_TARGET_DOMAIN};
use catalog_core::persist::{save_catalog, CatalogPaths};
use catalog_core::{build_index, CrawlConfig};
use clap::Parser;
use crawler::{enrich_corpus, harvest, HarvestConfig, HttpDetailSource, StaticRenderer, WebDriverRenderer};
use reqwest::Client;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "crawler")]
#[command(about = "Harvest the course catalog, enrich course pages and write the index")]
struct Cli {
    /// Catalog listing page
    #[arg(long, default_value = DEFAULT_START_URL)]
    start_url: String,
    /// Host that course links must point to
    #[arg(long, default_value = DEFAULT_TARGET_DOMAIN)]
    domain: String,
    /// Output directory for index.csv, courses.json and meta.json
    #[arg(long, default_value = "./catalog")]
    output: String,
    /// WebDriver endpoint (e.g. chromedriver). Without it the listing is fetched as static HTML
    #[arg(long)]
    webdriver: Option<String>,
    /// Seconds to wait for the listing to render
    #[arg(long, default_value_t = 4)]
    settle_secs: u64,
    /// Upper bound on "load more" scrolls
    #[arg(long, default_value_t = 20)]
    max_scrolls: usize,
    /// Maximum number of course pages to visit for enrichment
    #[arg(long, default_value_t = 50)]
    enrich_limit: usize,
    /// Concurrent detail page requests
    #[arg(long, default_value_t = 8)]
    concurrency: usize,
    /// Request timeout seconds
    #[arg(long, default_value_t = 12)]
    timeout_secs: u64,
    /// User-Agent string
    #[arg(long, default_value = "Mozilla/5.0 (Windows NT 10.0; Win64; x64)")]
    user_agent: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Cli::parse();

    let config = HarvestConfig {
        crawl: CrawlConfig { start_url: args.start_url.clone(), target_domain: args.domain.clone() },
        settle: Duration::from_secs(args.settle_secs),
        max_scrolls: args.max_scrolls,
        ..HarvestConfig::default()
    };
    tracing::info!(start_url = %args.start_url, domain = %args.domain, output = %args.output, "starting crawl");

    let corpus = match &args.webdriver {
        Some(server) => {
            let renderer = WebDriverRenderer::connect(server, &args.user_agent).await?;
            let corpus = harvest(&renderer, &config).await;
            if let Err(err) = renderer.quit().await {
                tracing::warn!(%err, "webdriver session did not close cleanly");
            }
            corpus
        }
        None => {
            let client = Client::builder()
                .user_agent(args.user_agent.clone())
                .timeout(Duration::from_secs(args.timeout_secs))
                .build()?;
            harvest(&StaticRenderer::new(client), &config).await
        }
    };
    if corpus.is_empty() {
        bail!("no courses harvested from {}", args.start_url);
    }

    let source = Arc::new(HttpDetailSource::new(Duration::from_secs(args.timeout_secs), &args.user_agent)?);
    let corpus = enrich_corpus(source, corpus, args.enrich_limit, args.concurrency).await;

    let index = build_index(&corpus);
    let paths = CatalogPaths::new(&args.output);
    save_catalog(&paths, &corpus, &index)?;
    tracing::info!(courses = corpus.len(), terms = index.num_terms(), output = %args.output, "catalog written");
    Ok(())
}
