//! qbank-api - Quiz question HTTP service
//!
//! Serves a small quiz dataset (questions grouped by year and tag)
//! sourced from a remotely published spreadsheet, merged with a local
//! fallback dataset, behind a time-based cache with manual
//! invalidation.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use qbank_api::services::{JsonBaseStore, QuestionCache, SheetFeed, SystemClock, VisitLog};
use qbank_api::{build_router, AppState};
use qbank_common::config::{Config, Overrides};

/// Command-line arguments for qbank-api
#[derive(Parser, Debug)]
#[command(name = "qbank-api")]
#[command(about = "Quiz question HTTP service")]
#[command(version)]
struct Args {
    /// Port to listen on
    #[arg(short, long)]
    port: Option<u16>,

    /// Remote CSV feed URL (published spreadsheet)
    #[arg(long)]
    feed_url: Option<String>,

    /// Local base dataset file (JSON array of questions)
    #[arg(long)]
    base_data: Option<PathBuf>,

    /// Visit counter file
    #[arg(long)]
    visits: Option<PathBuf>,

    /// Cache validity window in seconds
    #[arg(long)]
    cache_ttl_secs: Option<u64>,

    /// Config file path
    #[arg(short, long)]
    config: Option<PathBuf>,
}

impl Args {
    fn into_overrides(self) -> Overrides {
        Overrides {
            port: self.port,
            feed_url: self.feed_url,
            base_data_path: self.base_data,
            visits_path: self.visits,
            cache_ttl_secs: self.cache_ttl_secs,
            config_file: self.config,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "qbank_api=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting QBank API v{}", env!("CARGO_PKG_VERSION"));

    let args = Args::parse();
    let config = Config::load(args.into_overrides()).context("Failed to load configuration")?;

    info!("Base data: {}", config.base_data_path.display());
    if config.feed_url.is_empty() {
        info!("No feed URL configured - serving base data only");
    } else {
        info!("Feed URL: {}", config.feed_url);
    }
    if config.admin_password.is_empty() {
        info!("Admin login disabled (no admin password configured)");
    }

    let feed = SheetFeed::new(config.feed_url.clone()).context("Failed to build feed client")?;
    let cache = Arc::new(QuestionCache::new(
        Arc::new(feed),
        Arc::new(JsonBaseStore::new(config.base_data_path.clone())),
        Arc::new(SystemClock),
        Duration::from_secs(config.cache_ttl_secs),
    ));
    let visits = Arc::new(VisitLog::open(config.visits_path.clone()));

    let state = AppState::new(
        cache,
        visits,
        config.admin_username.clone(),
        config.admin_password.clone(),
    );
    let app = build_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("qbank-api listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
