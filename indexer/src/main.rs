use anyhow::Result;
use catalog_core::persist::{load_corpus, load_corpus_file, save_catalog, CatalogPaths};
use catalog_core::{build_index, compare, search};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
#[command(name = "indexer")]
#[command(about = "Build, search and compare the course catalog index", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rebuild index.csv and meta.json from a courses.json snapshot
    Build {
        /// Corpus file (courses.json)
        #[arg(long)]
        input: PathBuf,
        /// Output catalog directory
        #[arg(long)]
        output: PathBuf,
    },
    /// Rank courses against free-text keywords
    Search {
        /// Catalog directory holding courses.json
        #[arg(long, default_value = "./catalog")]
        catalog: PathBuf,
        /// Number of results
        #[arg(short, long, default_value_t = 10)]
        k: usize,
        /// Print results as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
        /// Keywords of interest
        #[arg(required = true)]
        words: Vec<String>,
    },
    /// Cosine similarity between two courses
    Compare {
        #[arg(long, default_value = "./catalog")]
        catalog: PathBuf,
        first: String,
        second: String,
    },
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).with_writer(std::io::stderr).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Build { input, output } => rebuild(&input, &output),
        Commands::Search { catalog, k, json, words } => run_search(&catalog, &words, k, json),
        Commands::Compare { catalog, first, second } => run_compare(&catalog, &first, &second),
    }
}

fn rebuild(input: &Path, output: &Path) -> Result<()> {
    let corpus = load_corpus_file(input)?;
    let index = build_index(&corpus);
    tracing::info!(courses = corpus.len(), terms = index.num_terms(), "indexed corpus");
    save_catalog(&CatalogPaths::new(output), &corpus, &index)?;
    tracing::info!(output = %output.display(), "index build complete");
    Ok(())
}

fn run_search(catalog: &Path, words: &[String], k: usize, json: bool) -> Result<()> {
    let corpus = load_corpus(&CatalogPaths::new(catalog))?;
    let hits = search(words, &corpus, k);
    if json {
        println!("{}", serde_json::to_string_pretty(&hits)?);
        return Ok(());
    }
    for hit in &hits {
        println!("{} | {} | {:.3}", hit.course_id, hit.url, hit.score);
    }
    Ok(())
}

fn run_compare(catalog: &Path, first: &str, second: &str) -> Result<()> {
    let corpus = load_corpus(&CatalogPaths::new(catalog))?;
    let score = compare(&corpus, first, second)?;
    println!("{score}");
    Ok(())
}
