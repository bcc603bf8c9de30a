//! rmp-api - Research Match Platform HTTP service
//!
//! Single-binary server: initializes the SQLite store, registers the
//! module handlers with the router, and serves the dispatch endpoint.
//! A background job periodically matches new projects and students.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use rmp_api::notify::{LogNotifier, MatchJob};
use rmp_api::{build_router, AppState};
use rmp_common::config::{resolve_database_path, DEFAULT_PORT};
use rmp_common::db::{init_database, SqlStore};
use rmp_core::ModuleRouter;

#[derive(Parser, Debug)]
#[command(name = "rmp-api", about = "Research Match Platform API service")]
struct Args {
    /// Port to listen on
    #[arg(long, env = "RMP_PORT", default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Path to the SQLite database file
    #[arg(long)]
    database: Option<String>,

    /// Minutes between match notification passes
    #[arg(long, env = "RMP_MATCH_INTERVAL", default_value_t = 60)]
    match_interval: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    // Log build identification immediately, before database delays
    info!(
        "Starting Research Match Platform (rmp-api) v{}",
        env!("CARGO_PKG_VERSION")
    );

    let args = Args::parse();

    let db_path = resolve_database_path(args.database.as_deref());
    info!("Database path: {}", db_path.display());

    let pool = init_database(&db_path)
        .await
        .context("failed to initialize database")?;
    info!("✓ Connected to database");

    let store = Arc::new(SqlStore::new(pool));
    let router = Arc::new(ModuleRouter::for_store(store.clone()));

    let state = AppState::new(router, args.port);
    let app = build_router(state);

    // Background matching; one failed tick never takes the server down
    let job = MatchJob::new(
        store,
        Arc::new(LogNotifier),
        Duration::from_secs(args.match_interval * 60),
    );
    tokio::spawn(job.run());

    let addr = format!("127.0.0.1:{}", args.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!("rmp-api listening on http://{addr}");
    info!("Health check: http://{addr}/health");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown signal received");
    }
}
