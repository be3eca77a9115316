//! Handlers for the web client's pages.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/` | Catalog list, fetched fresh from the API on every request |
//! | `GET`  | `/opuses/new` | Empty creation form |
//! | `POST` | `/opuses/new` | Create via the API; 303 to `/` or the form again with the error |

use axum::{
  Form,
  extract::State,
  http::{StatusCode, header},
  response::{Html, IntoResponse, Redirect, Response},
};

use crate::{AppState, form::OpusForm, views};

/// `GET /`
pub async fn list(State(state): State<AppState>) -> Response {
  match state.client.list_opuses().await {
    Ok(opuses) => (
      [(header::CACHE_CONTROL, "no-store")],
      Html(views::list_page(&opuses)),
    )
      .into_response(),
    Err(e) => {
      tracing::warn!(error = %e, "failed to load catalog");
      (StatusCode::BAD_GATEWAY, Html(views::error_page(e.user_message()))).into_response()
    }
  }
}

/// `GET /opuses/new`
pub async fn new_form() -> Html<String> { Html(views::form_page(&OpusForm::default(), None)) }

/// `POST /opuses/new`
pub async fn submit(State(state): State<AppState>, Form(form): Form<OpusForm>) -> Response {
  let input = match form.to_input() {
    Ok(input) => input,
    Err(message) => {
      return (
        StatusCode::UNPROCESSABLE_ENTITY,
        Html(views::form_page(&form, Some(&message))),
      )
        .into_response();
    }
  };

  match state.client.create_opus(&input).await {
    Ok(opus) => {
      tracing::info!(id = opus.id, "opus created from form");
      Redirect::to("/").into_response()
    }
    Err(e) => {
      tracing::warn!(error = %e, "create request failed");
      let status = match e.status() {
        Some(s) if s.is_client_error() => StatusCode::UNPROCESSABLE_ENTITY,
        _ => StatusCode::BAD_GATEWAY,
      };
      (status, Html(views::form_page(&form, Some(e.user_message())))).into_response()
    }
  }
}
