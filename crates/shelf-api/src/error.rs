//! API error type and [`axum::response::IntoResponse`] implementation.
//!
//! Every failure leaves the API as `{"message": ..., "code": ...}`, plus an
//! `errors` map of field messages for validation failures.

use axum::{
  Json,
  extract::rejection::{JsonRejection, PathRejection},
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde::Serialize;
use shelf_core::input::ValidationErrors;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("not found: {0}")]
  NotFound(String),

  #[error("validation failed: {0}")]
  Validation(#[from] ValidationErrors),

  /// The body could not be read as an opus input at all.
  #[error("malformed body: {message}")]
  MalformedBody { status: StatusCode, message: String },

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

#[derive(Serialize)]
struct ErrorBody<'a> {
  message: String,
  code:    &'static str,
  #[serde(skip_serializing_if = "Option::is_none")]
  errors:  Option<&'a ValidationErrors>,
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, body) = match &self {
      ApiError::NotFound(m) => (StatusCode::NOT_FOUND, ErrorBody {
        message: m.clone(),
        code:    "NOT_FOUND",
        errors:  None,
      }),
      ApiError::Validation(errors) => {
        (StatusCode::UNPROCESSABLE_ENTITY, ErrorBody {
          message: errors.summary(),
          code:    "VALIDATION_ERROR",
          errors:  Some(errors),
        })
      }
      ApiError::MalformedBody { status, message } => (*status, ErrorBody {
        message: message.clone(),
        code:    "MALFORMED_BODY",
        errors:  None,
      }),
      ApiError::Store(e) => {
        tracing::error!(error = %e, "store operation failed");
        (StatusCode::INTERNAL_SERVER_ERROR, ErrorBody {
          message: "Server Error".to_owned(),
          code:    "INTERNAL_ERROR",
          errors:  None,
        })
      }
    };
    (status, Json(body)).into_response()
  }
}

impl From<JsonRejection> for ApiError {
  fn from(rejection: JsonRejection) -> Self {
    ApiError::MalformedBody {
      status:  rejection.status(),
      message: rejection.body_text(),
    }
  }
}

/// A path id that is not an integer cannot name an opus.
impl From<PathRejection> for ApiError {
  fn from(_: PathRejection) -> Self { ApiError::NotFound("opus not found".to_owned()) }
}
