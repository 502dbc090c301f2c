use anyhow::Result;
use axum::Router;
use clap::Parser;
use sift_core::{IndexConfig, IndexStore, TokenizerVariant};
use sift_server::{build_app, load_seed, AppConfig, DEFAULT_MAX_UPLOAD_BYTES};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser)]
struct Args {
    /// Host to bind
    #[arg(long, default_value = "0.0.0.0")]
    host: String,
    /// Port to bind
    #[arg(long, default_value_t = 5090)]
    port: u16,
    /// Largest accepted upload body in bytes
    #[arg(long, default_value_t = DEFAULT_MAX_UPLOAD_BYTES)]
    max_upload_bytes: usize,
    /// Line-per-document file to index at startup
    #[arg(long)]
    seed: Option<PathBuf>,
    /// Tokenizer for the seed index: simple | without-stop-words
    #[arg(long, default_value = "simple")]
    tokenizer: TokenizerVariant,
    /// Keep repeated terms in the seed index
    #[arg(long)]
    keep_frequency: bool,
    /// Stem terms in the seed index
    #[arg(long)]
    stemming: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();
    let args = Args::parse();

    let store = Arc::new(IndexStore::new());
    if let Some(seed) = &args.seed {
        let config = IndexConfig::new(args.tokenizer, args.keep_frequency, args.stemming);
        let num_docs = load_seed(&store, seed, config)?;
        tracing::info!(seed = %seed.display(), num_docs, "seed index built");
    }

    let app_config = AppConfig { max_upload_bytes: args.max_upload_bytes, ..AppConfig::from_env() };
    let app: Router = build_app(store, app_config);

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!(%addr, "server listening");
    axum::serve(listener, app).await?;
    Ok(())
}
