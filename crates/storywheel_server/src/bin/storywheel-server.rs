//! Storywheel server - streams fictional life stories for a chosen city,
//! decade, and gender identity, with optional image generation and
//! two-story comparison.

use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use storywheel_core::{AppConfig, DisabledSeedStore, MemorySeedStore, SeedStore, SeedStoreMode};
use storywheel_models::{ImageClient, RouterClient};
use storywheel_server::{SpinService, create_router};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Command-line arguments for the Storywheel server.
#[derive(Parser, Debug)]
#[command(name = "storywheel-server")]
#[command(about = "Storywheel - streamed life-story generation")]
#[command(version)]
struct Args {
    /// Path to a dotenv file loaded before reading configuration
    #[arg(long)]
    env_file: Option<PathBuf>,

    /// Bind address, overriding STORYWHEEL_BIND_ADDR
    #[arg(long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    // Environment wins over the dotenv file; a missing file is fine.
    match &args.env_file {
        Some(path) => {
            dotenvy::from_path(path)?;
        }
        None => {
            let _ = dotenvy::dotenv();
        }
    }

    let config = AppConfig::from_env()?;
    info!(
        model = %config.model(),
        seed_store = ?config.seed_store(),
        "Configuration loaded"
    );

    let seeds: Arc<dyn SeedStore> = match config.seed_store() {
        SeedStoreMode::Memory => Arc::new(MemorySeedStore::with_builtin_seeds()),
        SeedStoreMode::Disabled => Arc::new(DisabledSeedStore),
    };

    let text = RouterClient::from_config(&config);
    let image = ImageClient::new(config.image_base_url());
    let service = SpinService::new(seeds, text, image);

    let bind_addr = args.bind.unwrap_or_else(|| config.bind_addr().clone());
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!(addr = %bind_addr, "Storywheel server listening");

    axum::serve(listener, create_router(service)).await?;
    Ok(())
}
