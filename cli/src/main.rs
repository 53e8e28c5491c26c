use anyhow::{ensure, Context, Result};
use clap::{Parser, Subcommand};
use sift_core::{RankingMode, SearchEngine};
use tracing_subscriber::{fmt, EnvFilter};
use walkdir::WalkDir;

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "sift")]
#[command(about = "Index plain-text documents and rank free-text queries", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Index a text file or a directory of .txt files, then run a query
    Search {
        /// Input path (file or directory)
        #[arg(long)]
        input: String,
        /// Free-text query
        #[arg(long)]
        query: String,
        /// Ranking algorithm: frequency, tf-idf or bm25 (unknown values
        /// fall back to frequency)
        #[arg(long, default_value = "frequency")]
        mode: String,
    },
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Search { input, query, mode } => run_search(&input, &query, &mode),
    }
}

fn run_search(input: &str, query: &str, mode: &str) -> Result<()> {
    let input_path = Path::new(input);
    let mut files: Vec<PathBuf> = Vec::new();
    if input_path.is_dir() {
        for entry in WalkDir::new(input_path).into_iter().filter_map(|e| e.ok()) {
            let p = entry.path();
            if p.is_file() && p.extension().and_then(|s| s.to_str()) == Some("txt") {
                files.push(p.to_path_buf());
            }
        }
    } else if input_path.is_file() {
        files.push(input_path.to_path_buf());
    }
    ensure!(!files.is_empty(), "no input documents under {input}");

    let mut engine = SearchEngine::new();
    for file in &files {
        index_file(&mut engine, file)?;
    }
    tracing::info!(
        documents = engine.index().document_count(),
        terms = engine.index().term_count(),
        "indexed corpus"
    );

    for line in engine.search(query, RankingMode::parse(mode)) {
        println!("{line}");
    }
    Ok(())
}

/// Feed one file into the engine line by line. A read failure aborts this
/// document; counts from lines already supplied stay applied.
fn index_file(engine: &mut SearchEngine, path: &Path) -> Result<()> {
    let doc_id = path.display().to_string();
    let file = File::open(path).with_context(|| format!("open {doc_id}"))?;
    for line in BufReader::new(file).lines() {
        let line = line.with_context(|| format!("read {doc_id}"))?;
        engine.index_document(&doc_id, &line);
    }
    Ok(())
}
