use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use sift_core::records::read_lines_from;
use sift_core::{IndexConfig, IndexStore, Record, TokenizerVariant};
use tracing_subscriber::{EnvFilter, fmt};
use walkdir::WalkDir;

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "sift-indexer")]
#[command(about = "Build an in-memory index from line-per-document files and query it", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct IndexArgs {
    /// Input path (file or directory of .csv/.txt files)
    #[arg(long)]
    input: PathBuf,
    /// Tokenizer: simple | without-stop-words
    #[arg(long, default_value = "simple")]
    tokenizer: TokenizerVariant,
    /// Keep repeated terms so each occurrence scores
    #[arg(long, default_value_t = false)]
    keep_frequency: bool,
    /// Stem terms before indexing and querying
    #[arg(long, default_value_t = false)]
    stemming: bool,
}

impl IndexArgs {
    fn config(&self) -> IndexConfig {
        IndexConfig::new(self.tokenizer, self.keep_frequency, self.stemming)
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Build the index and print one page of results as JSON
    Search {
        #[command(flatten)]
        index: IndexArgs,
        /// Query text
        #[arg(long)]
        query: String,
        #[arg(long, default_value_t = 10)]
        page_size: i64,
        /// 1-based page number
        #[arg(long, default_value_t = 1)]
        page: i64,
    },
    /// Build the index and print its statistics as JSON
    Stats {
        #[command(flatten)]
        index: IndexArgs,
    },
}

fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Search { index, query, page_size, page } => {
            let store = build_store(&index)?;
            let result = store.search(&query, page_size, page)?;
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        Commands::Stats { index } => {
            let store = build_store(&index)?;
            println!("{}", serde_json::to_string_pretty(&store.stats()?)?);
        }
    }
    Ok(())
}

fn build_store(args: &IndexArgs) -> Result<IndexStore> {
    let records = collect_records(&args.input)?;
    tracing::info!(input = %args.input.display(), num_docs = records.len(), "read records");
    let store = IndexStore::new();
    store.rebuild(records, args.config())?;
    Ok(store)
}

/// Read every input file in path order, numbering lines continuously across files.
fn collect_records(input: &Path) -> Result<Vec<Record>> {
    let mut files: Vec<PathBuf> = Vec::new();
    if input.is_dir() {
        for entry in WalkDir::new(input).sort_by_file_name().into_iter().filter_map(|e| e.ok()) {
            let p = entry.path();
            if p.is_file() {
                if let Some(ext) = p.extension().and_then(|s| s.to_str()) {
                    if matches!(ext, "csv" | "txt") {
                        files.push(p.to_path_buf());
                    }
                }
            }
        }
    } else if input.is_file() {
        files.push(input.to_path_buf());
    } else {
        bail!("input path {} does not exist", input.display());
    }

    let mut records = Vec::new();
    for file in files {
        let f = File::open(&file).with_context(|| format!("opening {}", file.display()))?;
        let lines = read_lines_from(BufReader::new(f), records.len())
            .with_context(|| format!("reading {}", file.display()))?;
        tracing::debug!(file = %file.display(), lines = lines.len(), "read input file");
        records.extend(lines);
    }
    Ok(records)
}
