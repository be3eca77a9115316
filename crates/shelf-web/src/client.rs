//! Async HTTP client wrapping the shelf JSON API.

use std::time::Duration;

use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use shelf_core::{input::OpusInput, opus::Opus};
use thiserror::Error;

/// Fallbacks for when the API rejects a call without saying why.
pub const GENERIC_LOAD_ERROR: &str = "Failed to load the catalog.";
pub const GENERIC_SAVE_ERROR: &str = "Failed to save the entry.";
pub const GENERIC_DELETE_ERROR: &str = "Failed to delete the entry.";

/// Shown when the API cannot be reached at all.
pub const NETWORK_ERROR: &str =
  "A network error occurred. Check that the backend server is running.";

#[derive(Debug, Error)]
pub enum ClientError {
  #[error("http error: {0}")]
  Http(#[from] reqwest::Error),

  /// The API answered with a non-success status.
  #[error("{status}: {message}")]
  Api { status: StatusCode, message: String },
}

impl ClientError {
  /// A message fit to show to the person using the web client.
  pub fn user_message(&self) -> &str {
    match self {
      ClientError::Http(_) => NETWORK_ERROR,
      ClientError::Api { message, .. } => message,
    }
  }

  pub fn status(&self) -> Option<StatusCode> {
    match self {
      ClientError::Http(e) => e.status(),
      ClientError::Api { status, .. } => Some(*status),
    }
  }
}

pub type Result<T, E = ClientError> = std::result::Result<T, E>;

/// Connection settings for the shelf API.
#[derive(Debug, Clone)]
pub struct ApiConfig {
  /// Base URL including the `/api` prefix, e.g. `http://localhost:8080/api`.
  pub base_url: String,
}

#[derive(Deserialize)]
struct ErrorBody {
  message: Option<String>,
}

/// Async HTTP client for the shelf JSON REST API.
///
/// Cheap to clone; the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct ApiClient {
  client: Client,
  config: ApiConfig,
}

impl ApiClient {
  pub fn new(config: ApiConfig) -> Result<Self> {
    let client = Client::builder().timeout(Duration::from_secs(30)).build()?;
    Ok(Self { client, config })
  }

  fn url(&self, path: &str) -> String {
    format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
  }

  /// Pass success responses through; turn anything else into
  /// [`ClientError::Api`], keeping the API's `message` when it sent one and
  /// `fallback` otherwise.
  async fn check(resp: Response, fallback: &str) -> Result<Response> {
    let status = resp.status();
    if status.is_success() {
      return Ok(resp);
    }
    let message = resp
      .json::<ErrorBody>()
      .await
      .ok()
      .and_then(|b| b.message)
      .filter(|m| !m.is_empty())
      .unwrap_or_else(|| fallback.to_owned());
    Err(ClientError::Api { status, message })
  }

  /// `GET /opuses`
  pub async fn list_opuses(&self) -> Result<Vec<Opus>> {
    let resp = self.client.get(self.url("/opuses")).send().await?;
    Ok(Self::check(resp, GENERIC_LOAD_ERROR).await?.json().await?)
  }

  /// `GET /opuses/{id}`
  pub async fn get_opus(&self, id: i64) -> Result<Opus> {
    let resp = self.client.get(self.url(&format!("/opuses/{id}"))).send().await?;
    Ok(Self::check(resp, GENERIC_LOAD_ERROR).await?.json().await?)
  }

  /// `POST /opuses`
  pub async fn create_opus(&self, input: &OpusInput) -> Result<Opus> {
    let resp = self
      .client
      .post(self.url("/opuses"))
      .header(reqwest::header::ACCEPT, "application/json")
      .json(input)
      .send()
      .await?;
    Ok(Self::check(resp, GENERIC_SAVE_ERROR).await?.json().await?)
  }

  /// `PATCH /opuses/{id}`. Only the keys set on `input` are sent.
  pub async fn update_opus(&self, id: i64, input: &OpusInput) -> Result<Opus> {
    let resp = self
      .client
      .patch(self.url(&format!("/opuses/{id}")))
      .header(reqwest::header::ACCEPT, "application/json")
      .json(input)
      .send()
      .await?;
    Ok(Self::check(resp, GENERIC_SAVE_ERROR).await?.json().await?)
  }

  /// `DELETE /opuses/{id}`
  pub async fn delete_opus(&self, id: i64) -> Result<()> {
    let resp = self
      .client
      .delete(self.url(&format!("/opuses/{id}")))
      .send()
      .await?;
    Self::check(resp, GENERIC_DELETE_ERROR).await?;
    Ok(())
  }
}
