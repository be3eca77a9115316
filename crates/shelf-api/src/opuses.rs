//! Handlers for `/opuses` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/opuses` | All opuses, storage order |
//! | `GET`  | `/opuses/{id}` | 404 if not found |
//! | `POST` | `/opuses` | Body: [`OpusInput`]; returns 201 + stored opus |
//! | `PUT` / `PATCH` | `/opuses/{id}` | Body: partial [`OpusInput`]; returns the updated opus |
//! | `DELETE` | `/opuses/{id}` | 204, empty body |

use std::sync::Arc;

use axum::{
  Json,
  extract::{
    Path, State,
    rejection::{JsonRejection, PathRejection},
  },
  http::StatusCode,
  response::IntoResponse,
};
use shelf_core::{input::OpusInput, opus::Opus, store::OpusStore};

use crate::error::ApiError;

fn not_found(id: i64) -> ApiError { ApiError::NotFound(format!("opus {id} not found")) }

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /opuses`
pub async fn list<S>(State(store): State<Arc<S>>) -> Result<Json<Vec<Opus>>, ApiError>
where
  S: OpusStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let opuses = store
    .list_opuses()
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(opuses))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /opuses/{id}`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  path: Result<Path<i64>, PathRejection>,
) -> Result<Json<Opus>, ApiError>
where
  S: OpusStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let Path(id) = path?;
  let opus = store
    .get_opus(id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(|| not_found(id))?;
  Ok(Json(opus))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /opuses`: 201 with the stored [`Opus`].
///
/// Nothing is written unless every field passes validation.
pub async fn create<S>(
  State(store): State<Arc<S>>,
  body: Result<Json<OpusInput>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
  S: OpusStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let Json(input) = body?;
  let new = input.into_new()?;

  let opus = store
    .create_opus(new)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  tracing::info!(id = opus.id, title = %opus.title, "opus created");
  Ok((StatusCode::CREATED, Json(opus)))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// `PUT|PATCH /opuses/{id}`: only keys present in the body are written.
///
/// An unknown id is reported as 404 even when the body is also invalid.
pub async fn update<S>(
  State(store): State<Arc<S>>,
  path: Result<Path<i64>, PathRejection>,
  body: Result<Json<OpusInput>, JsonRejection>,
) -> Result<Json<Opus>, ApiError>
where
  S: OpusStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let Path(id) = path?;

  let patch = match body.map_err(ApiError::from).and_then(|Json(input)| {
    input.into_patch().map_err(ApiError::from)
  }) {
    Ok(patch) => patch,
    Err(e) => {
      let exists = store
        .get_opus(id)
        .await
        .map_err(|e| ApiError::Store(Box::new(e)))?
        .is_some();
      return Err(if exists { e } else { not_found(id) });
    }
  };

  let opus = store
    .update_opus(id, patch)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(|| not_found(id))?;

  tracing::info!(id, "opus updated");
  Ok(Json(opus))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /opuses/{id}`: 204, or 404 if the id is unknown.
pub async fn delete<S>(
  State(store): State<Arc<S>>,
  path: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, ApiError>
where
  S: OpusStore,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let Path(id) = path?;
  let removed = store
    .delete_opus(id)
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;

  if !removed {
    return Err(not_found(id));
  }

  tracing::info!(id, "opus deleted");
  Ok(StatusCode::NO_CONTENT)
}
