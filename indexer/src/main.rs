use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use pildoras_core::config::{DEFAULT_CORPUS_DIR, DEFAULT_OUTPUT};
use pildoras_core::index::build_index;
use pildoras_core::persist::{load_index, save_index};
use pildoras_core::IndexerConfig;
use tracing_subscriber::{fmt, EnvFilter};

use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "generar-indice")]
#[command(about = "Build the píldoras keyword index from a folder of HTML articles", long_about = None)]
struct Cli {
    /// Directory holding the HTML articles
    #[arg(long, default_value = DEFAULT_CORPUS_DIR)]
    input: PathBuf,
    /// Index file to write (or read, for `search`)
    #[arg(long, default_value = DEFAULT_OUTPUT)]
    output: PathBuf,
    /// Prefix for each article's link; defaults to the input directory name
    #[arg(long)]
    link_prefix: Option<String>,
    /// Keep corpus order instead of sorting files by title
    #[arg(long, default_value_t = false)]
    no_sort: bool,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Rebuild the index (same as running without a subcommand)
    Build,
    /// Query an existing index by keywords
    Search {
        query: String,
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },
}

fn main() -> Result<()> {
    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
    let cli = Cli::parse();

    let mut cfg = IndexerConfig::new(&cli.input, &cli.output);
    if let Some(prefix) = cli.link_prefix.clone() {
        cfg.link_prefix = prefix;
    }
    cfg.sort_by_title = !cli.no_sort;

    match cli.command {
        None | Some(Commands::Build) => rebuild(&cfg),
        Some(Commands::Search { query, limit }) => search(&cfg, &query, limit),
    }
}

fn rebuild(cfg: &IndexerConfig) -> Result<()> {
    let doc = build_index(cfg).with_context(|| format!("indexing {}", cfg.corpus_dir.display()))?;
    save_index(&cfg.output, &doc)?;
    tracing::info!(output = %cfg.output.display(), "index written");
    println!(
        "{} files processed, {} distinct keywords -> {}",
        doc.metadata.total_files,
        doc.keyword_index.len(),
        cfg.output.display()
    );
    Ok(())
}

fn search(cfg: &IndexerConfig, query: &str, limit: usize) -> Result<()> {
    let doc = load_index(&cfg.output)?;
    let hits = doc.search(query, limit);
    if hits.is_empty() {
        println!("no matches for {query:?}");
    }
    for hit in hits {
        println!("{:>4}  {}  ({})", hit.score, hit.title, hit.path);
    }
    Ok(())
}
