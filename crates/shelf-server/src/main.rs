//! shelf API server binary.
//!
//! Reads `shelf.toml` (or the path specified with `--config`) and `SHELF_*`
//! environment variables, opens the SQLite store, and serves the JSON API
//! under `/api`.

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use anyhow::Context as _;
use clap::Parser;
use shelf_server::ServerConfig;
use shelf_store_sqlite::SqliteStore;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "shelf catalog API server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "shelf.toml")]
  config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  // File first, environment on top. `SHELF_CORS_ORIGINS` is comma-separated.
  let settings = config::Config::builder()
    .add_source(config::File::from(cli.config).required(false))
    .add_source(
      config::Environment::with_prefix("SHELF")
        .try_parsing(true)
        .list_separator(",")
        .with_list_parse_key("cors_origins"),
    )
    .build()
    .context("failed to read config file")?;

  let server_cfg: ServerConfig = settings
    .try_deserialize()
    .context("failed to deserialise ServerConfig")?;

  let store_path = expand_tilde(&server_cfg.store_path);

  let store = SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;

  let app = shelf_server::router(Arc::new(store), &server_cfg)
    .context("invalid server configuration")?;
  let address = format!("{}:{}", server_cfg.host, server_cfg.port);

  tracing::info!(
    origins = ?server_cfg.cors_origins,
    store = %store_path.display(),
    "Listening on http://{address}"
  );
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
