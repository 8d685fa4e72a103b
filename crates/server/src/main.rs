// crates/server/src/main.rs
//! Branchlog server binary.
//!
//! Opens (or creates) the SQLite store, builds the Axum app, and serves the
//! API on localhost.

use std::net::SocketAddr;
use std::path::PathBuf;

use anyhow::Result;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use branchlog_db::Database;
use branchlog_server::create_app;

/// Default port for the server.
const DEFAULT_PORT: u16 = 47831;

/// Get the server port from environment or use default.
fn get_port() -> u16 {
    std::env::var("BRANCHLOG_PORT")
        .ok()
        .or_else(|| std::env::var("PORT").ok())
        .and_then(|p| p.parse().ok())
        .unwrap_or(DEFAULT_PORT)
}

/// Database path override, for running against a scratch file.
fn get_db_path() -> Option<PathBuf> {
    std::env::var("BRANCHLOG_DB").ok().map(PathBuf::from)
}

#[tokio::main]
async fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .compact()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    eprintln!("\n\u{1f4d2} branchlog v{}\n", env!("CARGO_PKG_VERSION"));

    let db = match get_db_path() {
        Some(path) => Database::new(&path).await?,
        None => Database::open_default().await?,
    };

    let app = create_app(db);

    let port = get_port();
    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    eprintln!("  \u{2192} http://localhost:{}\n", port);

    axum::serve(listener, app).await?;

    Ok(())
}
