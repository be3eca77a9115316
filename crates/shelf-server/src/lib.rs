//! HTTP server for the shelf catalog API.
//!
//! Wraps [`shelf_api::api_router`] under `/api` with the cross-origin policy
//! and request tracing, and defines the server's configuration.

pub mod error;

pub use error::{Error, Result};

use std::{path::PathBuf, sync::Arc, time::Duration};

use axum::{
  Router,
  http::{
    HeaderName, HeaderValue,
    header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
  },
};
use serde::Deserialize;
use shelf_core::store::OpusStore;
use tower_http::{
  cors::{AllowMethods, AllowOrigin, CorsLayer},
  trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// How long browsers may cache a preflight response.
const CORS_MAX_AGE: Duration = Duration::from_secs(86_400);

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `shelf.toml` and
/// `SHELF_*` environment variables.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:         String,
  #[serde(default = "default_port")]
  pub port:         u16,
  #[serde(default = "default_store_path")]
  pub store_path:   PathBuf,
  /// Origins allowed to call the API from a browser.
  #[serde(default = "default_cors_origins")]
  pub cors_origins: Vec<String>,
}

fn default_host() -> String { "127.0.0.1".to_owned() }

fn default_port() -> u16 { 8080 }

fn default_store_path() -> PathBuf { PathBuf::from("shelf.db") }

fn default_cors_origins() -> Vec<String> {
  vec!["http://localhost:3000".to_owned(), "http://localhost:3003".to_owned()]
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:         default_host(),
      port:         default_port(),
      store_path:   default_store_path(),
      cors_origins: default_cors_origins(),
    }
  }
}

// ─── CORS ─────────────────────────────────────────────────────────────────────

/// Build the cross-origin policy for the API.
///
/// Only the listed origins are allowed and credentials are permitted, so the
/// request method is mirrored rather than answered with a wildcard.
pub fn cors_layer(origins: &[String]) -> Result<CorsLayer> {
  let origins = origins
    .iter()
    .map(|o| {
      if o.trim() == "*" {
        return Err(Error::WildcardOrigin);
      }
      HeaderValue::from_str(o.trim()).map_err(|source| Error::InvalidOrigin {
        origin: o.clone(),
        source,
      })
    })
    .collect::<Result<Vec<_>>>()?;

  Ok(
    CorsLayer::new()
      .allow_origin(AllowOrigin::list(origins))
      .allow_methods(AllowMethods::mirror_request())
      .allow_headers([
        ACCEPT,
        AUTHORIZATION,
        CONTENT_TYPE,
        HeaderName::from_static("x-requested-with"),
        HeaderName::from_static("x-csrf-token"),
      ])
      .allow_credentials(true)
      .max_age(CORS_MAX_AGE),
  )
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the server's [`Router`]: the API nested at `/api` behind CORS, with
/// every request traced.
pub fn router<S>(store: Arc<S>, config: &ServerConfig) -> Result<Router>
where
  S: OpusStore + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let cors = cors_layer(&config.cors_origins)?;

  Ok(
    Router::new()
      .nest("/api", shelf_api::api_router(store).layer(cors))
      .layer(
        TraceLayer::new_for_http()
          .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
          .on_response(DefaultOnResponse::new().level(Level::INFO)),
      ),
  )
}

// ─── Integration tests ────────────────────────────────────────────────────────
