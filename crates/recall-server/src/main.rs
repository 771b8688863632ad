use anyhow::Result;
use clap::Parser;
use recall_core::config::ServiceConfig;
use recall_server::router::build_router;
use recall_server::serve::{serve, ServeConfig};
use recall_server::state::build_state;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Bind address (overrides RECALL_HOST)
    #[arg(long)]
    host: Option<String>,
    /// Bind port (overrides RECALL_PORT)
    #[arg(long)]
    port: Option<u16>,
    /// SQLite database path (overrides RECALL_DB)
    #[arg(long)]
    db: Option<PathBuf>,
}

use tracing_subscriber::{fmt, EnvFilter};

fn init_logging(log_level: &str) {
    let filter = EnvFilter::try_new(log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    fmt()
        .with_env_filter(filter)
        .json()
        .with_timer(fmt::time::UtcTime::rfc_3339())
        .with_target(true)
        .with_current_span(false)
        .with_span_list(false)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let mut cfg = ServiceConfig::from_env()?;
    if let Some(host) = args.host {
        cfg.host = host;
    }
    if let Some(port) = args.port {
        cfg.port = port;
    }
    if let Some(db) = args.db {
        cfg.db_path = db;
    }

    init_logging(&cfg.log_level);

    tracing::info!(event = "server_start", config = ?cfg);

    let state = build_state(&cfg)?;
    let router = build_router(state);

    serve(ServeConfig {
        host: cfg.host.clone(),
        port: cfg.port,
        router,
        max_concurrency: cfg.max_concurrency,
    })
    .await
}
