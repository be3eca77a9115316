//! Server-rendered web client for the shelf catalog.
//!
//! Renders the catalog list and the creation form, talking to the JSON API
//! through [`client::ApiClient`]. The client has no store of its own.

pub mod client;
pub mod form;
pub mod pages;
pub mod views;

pub use client::{ApiClient, ApiConfig, ClientError};

use axum::{Router, routing::get};
use serde::Deserialize;
use tower_http::trace::TraceLayer;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime configuration, deserialised from `shelf-web.toml` and
/// `SHELF_WEB_*` environment variables.
#[derive(Debug, Deserialize, Clone)]
pub struct WebConfig {
  #[serde(default = "default_host")]
  pub host:    String,
  #[serde(default = "default_port")]
  pub port:    u16,
  /// Base URL of the API, including its `/api` prefix.
  #[serde(default = "default_api_url")]
  pub api_url: String,
}

fn default_host() -> String { "127.0.0.1".to_owned() }

fn default_port() -> u16 { 3000 }

fn default_api_url() -> String { "http://localhost:8080/api".to_owned() }

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all page handlers.
#[derive(Clone)]
pub struct AppState {
  pub client: ApiClient,
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the web client's [`Router`].
pub fn router(state: AppState) -> Router {
  Router::new()
    .route("/", get(pages::list))
    .route("/opuses/new", get(pages::new_form).post(pages::submit))
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}
