//! Main REST API server for the storefront service.
//!
//! Wires the book list, the SQLite stores and the REST API together
//! with configuration parsing and graceful shutdown.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use storefront_api::{router::Router, server::Server};
use storefront_core::books::BookStore;
use storefront_core::config::ServerConfig;
use storefront_core::Database;
use tokio::signal;
use tracing_subscriber::EnvFilter;

/// Command-line arguments for the storefront server.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Port to listen on
    #[arg(short, long, default_value_t = 8000)]
    port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// SQLite database file
    #[arg(long, default_value = "./storefront.db")]
    database: PathBuf,

    /// Request body read timeout in milliseconds
    #[arg(long, default_value_t = 5000)]
    request_timeout_ms: u64,

    /// Page size for listings without an explicit limit
    #[arg(long, default_value_t = 100)]
    default_page_limit: u32,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = Arc::new(ServerConfig {
        database_path: args.database.clone(),
        request_timeout_ms: args.request_timeout_ms,
        default_page_limit: args.default_page_limit,
        ..Default::default()
    });

    let db = Database::new(config.database_path.clone());
    db.init()
        .with_context(|| format!("Failed to prepare database {}", db.path().display()))?;

    // Books are process-local; every start begins from the seed rows
    let books = Arc::new(BookStore::new());

    let router = Router::new(books, Arc::new(db), config);

    let addr: SocketAddr = format!("{}:{}", args.host, args.port)
        .parse()
        .context("Invalid listen address")?;
    let server = Server::new(addr, router);

    tracing::info!("Starting storefront server...");
    tracing::info!("  Host: {}", args.host);
    tracing::info!("  Port: {}", args.port);
    tracing::info!("  Database: {}", args.database.display());
    tracing::info!("  Request timeout: {} ms", args.request_timeout_ms);

    tokio::select! {
        result = server.serve() => {
            result.context("Server error")?;
        }
        result = signal::ctrl_c() => {
            result.context("Failed to listen for ctrl_c")?;
            tracing::info!("Shutting down server...");
        }
    }

    Ok(())
}
