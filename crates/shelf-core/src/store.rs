//! The `OpusStore` trait.
//!
//! The trait is implemented by storage backends (e.g. `shelf-store-sqlite`).
//! The HTTP layer (`shelf-api`) depends on this abstraction and receives a
//! store handle explicitly; there is no process-wide connection.

use std::future::Future;

use crate::opus::{NewOpus, Opus, OpusPatch};

/// Abstraction over a catalog backend.
///
/// Each method is a single storage operation. All methods return `Send`
/// futures so the trait can be used in multi-threaded async runtimes (e.g.
/// tokio with `axum`).
pub trait OpusStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// All opuses in storage order (ascending `id`, i.e. insertion order).
  fn list_opuses(
    &self,
  ) -> impl Future<Output = Result<Vec<Opus>, Self::Error>> + Send + '_;

  /// Retrieve an opus by id. Returns `None` if not found.
  fn get_opus(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<Opus>, Self::Error>> + Send + '_;

  /// Persist a new opus. The store assigns `id`, `created_at` and
  /// `updated_at`; ids are never reused, even after deletion.
  fn create_opus(
    &self,
    input: NewOpus,
  ) -> impl Future<Output = Result<Opus, Self::Error>> + Send + '_;

  /// Apply `patch` to an existing opus and return the result, or `None` if
  /// no opus has this id. `updated_at` only moves when a value changes.
  fn update_opus(
    &self,
    id: i64,
    patch: OpusPatch,
  ) -> impl Future<Output = Result<Option<Opus>, Self::Error>> + Send + '_;

  /// Permanently remove an opus. Returns `false` if no opus has this id.
  fn delete_opus(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;
}
