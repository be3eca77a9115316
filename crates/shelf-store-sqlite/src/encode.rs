//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings and enums by their snake_case
//! names.

use chrono::{DateTime, Utc};
use shelf_core::opus::{Category, Opus, Status};

use crate::{Error, Result};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Rating ──────────────────────────────────────────────────────────────────

pub fn decode_rating(r: Option<i64>) -> Result<Option<u8>> {
  r.map(|v| u8::try_from(v).map_err(|_| Error::RatingRange(v)))
    .transpose()
}

// ─── Raw row ─────────────────────────────────────────────────────────────────

/// Column list shared by every `SELECT` that feeds [`RawOpus::from_row`].
pub const OPUS_COLUMNS: &str = "id, title, creator, category, sub_category, \
                                status, rating, review, created_at, updated_at";

/// An `opuses` row exactly as SQLite hands it back.
pub struct RawOpus {
  pub id:           i64,
  pub title:        String,
  pub creator:      Option<String>,
  pub category:     String,
  pub sub_category: Option<String>,
  pub status:       String,
  pub rating:       Option<i64>,
  pub review:       Option<String>,
  pub created_at:   String,
  pub updated_at:   String,
}

impl RawOpus {
  /// Read a row selected with [`OPUS_COLUMNS`].
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:           row.get(0)?,
      title:        row.get(1)?,
      creator:      row.get(2)?,
      category:     row.get(3)?,
      sub_category: row.get(4)?,
      status:       row.get(5)?,
      rating:       row.get(6)?,
      review:       row.get(7)?,
      created_at:   row.get(8)?,
      updated_at:   row.get(9)?,
    })
  }

  pub fn into_opus(self) -> Result<Opus> {
    Ok(Opus {
      id:           self.id,
      title:        self.title,
      creator:      self.creator,
      category:     Category::parse(&self.category)?,
      sub_category: self.sub_category,
      status:       Status::parse(&self.status)?,
      rating:       decode_rating(self.rating)?,
      review:       self.review,
      created_at:   decode_dt(&self.created_at)?,
      updated_at:   decode_dt(&self.updated_at)?,
    })
  }
}
