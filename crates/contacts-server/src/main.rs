//! contacts server binary.
//!
//! Reads `contacts.toml` (or the path specified with `--config`), opens the
//! SQLite contacts store named by `database_url`, and serves the JSON API
//! over HTTP.
//!
//! ```sh
//! CONTACTS_DATABASE_URL=contacts.db cargo run -p contacts-server --bin server -- --port 8080
//! ```

mod settings;

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::Parser;
use contacts_api::AppState;
use contacts_store_sqlite::SqliteStore;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::settings::{Overrides, ServerConfig};

#[derive(Parser)]
#[command(author, version, about = "Contacts REST API server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "contacts.toml")]
  config: PathBuf,

  /// Address to listen on (overrides the config file).
  #[arg(long)]
  host: Option<String>,

  /// Port to listen on (overrides the config file).
  #[arg(short, long)]
  port: Option<u16>,

  /// SQLite database path, optionally `sqlite://`-prefixed.
  #[arg(long)]
  database_url: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  // Load configuration.
  let overrides = Overrides {
    host:         cli.host,
    port:         cli.port,
    database_url: cli.database_url,
  };
  let server_cfg = ServerConfig::load(&cli.config, &overrides)
    .context("failed to load configuration")?;

  // Open the store; without one the API is useless, so stop here.
  let Some(db_path) = server_cfg.database_path() else {
    tracing::error!("failed to connect to database: no database_url configured");
    anyhow::bail!("no database_url configured; set CONTACTS_DATABASE_URL or --database-url");
  };
  let store = match SqliteStore::open(&db_path).await {
    Ok(store) => store,
    Err(e) => {
      tracing::error!(path = ?db_path, error = %e, "failed to connect to database");
      return Err(e).with_context(|| format!("failed to open store at {db_path:?}"));
    }
  };
  tracing::info!(path = ?db_path, "connected to database");

  let state = AppState::new(Arc::new(store)).with_db_timeout(server_cfg.db_timeout());
  let app = contacts_api::router(state).layer(TraceLayer::new_for_http());
  let address = server_cfg.bind_address();

  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;
  tracing::info!("Listening on http://{address}");

  axum::serve(listener, app)
    .with_graceful_shutdown(shutdown_signal())
    .await
    .context("server error")?;

  Ok(())
}

async fn shutdown_signal() {
  if let Err(e) = tokio::signal::ctrl_c().await {
    tracing::warn!(error = %e, "failed to listen for shutdown signal");
    std::future::pending::<()>().await;
  }
  tracing::info!("shutting down");
}
