//! JSON REST API for the shelf catalog.
//!
//! Exposes an axum [`Router`] backed by any [`shelf_core::store::OpusStore`].
//! CORS, TLS, and transport concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", shelf_api::api_router(store.clone()))
//! ```

pub mod error;
pub mod opuses;

use std::sync::Arc;

use axum::{Router, routing::get};
use shelf_core::store::OpusStore;

pub use error::ApiError;

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: OpusStore + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  Router::new()
    .route("/opuses", get(opuses::list::<S>).post(opuses::create::<S>))
    .route(
      "/opuses/{id}",
      get(opuses::get_one::<S>)
        .put(opuses::update::<S>)
        .patch(opuses::update::<S>)
        .delete(opuses::delete::<S>),
    )
    .with_state(store)
}

// ─── Integration tests ────────────────────────────────────────────────────────
