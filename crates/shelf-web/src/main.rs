//! shelf web client binary.
//!
//! Reads `shelf-web.toml` (or the path specified with `--config`) and
//! `SHELF_WEB_*` environment variables, then serves the catalog pages.

use std::path::PathBuf;

use anyhow::Context as _;
use clap::Parser;
use shelf_web::{ApiClient, ApiConfig, AppState, WebConfig};
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "shelf catalog web client")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "shelf-web.toml")]
  config: PathBuf,

  /// Base URL of the API; overrides the config file and environment.
  #[arg(long)]
  api_url: Option<String>,
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

  let settings = config::Config::builder()
    .add_source(config::File::from(cli.config).required(false))
    .add_source(config::Environment::with_prefix("SHELF_WEB").try_parsing(true))
    .build()
    .context("failed to read config file")?;

  let mut web_cfg: WebConfig = settings
    .try_deserialize()
    .context("failed to deserialise WebConfig")?;
  if let Some(url) = cli.api_url {
    web_cfg.api_url = url;
  }

  let client = ApiClient::new(ApiConfig { base_url: web_cfg.api_url.clone() })
    .context("failed to build HTTP client")?;

  let app = shelf_web::router(AppState { client });
  let address = format!("{}:{}", web_cfg.host, web_cfg.port);

  tracing::info!(api = %web_cfg.api_url, "Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}
