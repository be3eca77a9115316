//! Startup errors for the API server.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("invalid CORS origin {origin:?}: {source}")]
  InvalidOrigin {
    origin: String,
    #[source]
    source: axum::http::header::InvalidHeaderValue,
  },

  /// Credentials are allowed, so a wildcard origin can never be honoured.
  #[error("wildcard CORS origin is not allowed with credentials")]
  WildcardOrigin,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
