//! The catalog entry: one tracked work.
//!
//! An opus is mutable: updates overwrite fields in place and deletions are
//! permanent. Identity (`id`) and timestamps are assigned by the store and are
//! never accepted from callers.

use std::str::FromStr as _;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

use crate::{Error, Result};

/// Maximum length of a title, in characters.
pub const TITLE_MAX_CHARS: usize = 255;

// ─── Enumerations ────────────────────────────────────────────────────────────

/// Top-level classification of an opus.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Default,
  Serialize,
  Deserialize,
  AsRefStr,
  Display,
  EnumIter,
  EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Category {
  /// First member; an omitted category lands here.
  #[default]
  Book,
  Program,
  Movie,
  Other,
}

impl Category {
  pub fn parse(s: &str) -> Result<Self> {
    Self::from_str(s).map_err(|_| Error::UnknownCategory(s.to_owned()))
  }
}

/// The user's progress with respect to an opus. Transitions are unrestricted.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Default,
  Serialize,
  Deserialize,
  AsRefStr,
  Display,
  EnumIter,
  EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Status {
  Completed,
  InProgress,
  #[default]
  Planned,
}

impl Status {
  pub fn parse(s: &str) -> Result<Self> {
    Self::from_str(s).map_err(|_| Error::UnknownStatus(s.to_owned()))
  }
}

// ─── Opus ────────────────────────────────────────────────────────────────────

/// A persisted catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Opus {
  pub id:           i64,
  pub title:        String,
  pub creator:      Option<String>,
  pub category:     Category,
  pub sub_category: Option<String>,
  pub status:       Status,
  pub rating:       Option<u8>,
  pub review:       Option<String>,
  pub created_at:   DateTime<Utc>,
  pub updated_at:   DateTime<Utc>,
}

// ─── NewOpus ─────────────────────────────────────────────────────────────────

/// Validated input to [`crate::store::OpusStore::create_opus`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewOpus {
  pub title:        String,
  pub creator:      Option<String>,
  pub category:     Category,
  pub sub_category: Option<String>,
  pub status:       Status,
  pub rating:       Option<u8>,
  pub review:       Option<String>,
}

impl NewOpus {
  /// Convenience constructor with all optional fields set to their defaults.
  pub fn new(title: impl Into<String>) -> Self {
    Self {
      title:        title.into(),
      creator:      None,
      category:     Category::default(),
      sub_category: None,
      status:       Status::default(),
      rating:       None,
      review:       None,
    }
  }
}

// ─── OpusPatch ───────────────────────────────────────────────────────────────

/// A validated partial update. `None` leaves a field untouched; for nullable
/// fields `Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OpusPatch {
  pub title:        Option<String>,
  pub creator:      Option<Option<String>>,
  pub category:     Option<Category>,
  pub sub_category: Option<Option<String>>,
  pub status:       Option<Status>,
  pub rating:       Option<Option<u8>>,
  pub review:       Option<Option<String>>,
}

impl OpusPatch {
  pub fn is_empty(&self) -> bool { *self == Self::default() }

  /// Write every set field into `opus`. Returns whether any value changed;
  /// timestamps are left to the caller.
  pub fn apply(self, opus: &mut Opus) -> bool {
    let before = opus.clone();

    if let Some(title) = self.title {
      opus.title = title;
    }
    if let Some(creator) = self.creator {
      opus.creator = creator;
    }
    if let Some(category) = self.category {
      opus.category = category;
    }
    if let Some(sub_category) = self.sub_category {
      opus.sub_category = sub_category;
    }
    if let Some(status) = self.status {
      opus.status = status;
    }
    if let Some(rating) = self.rating {
      opus.rating = rating;
    }
    if let Some(review) = self.review {
      opus.review = review;
    }

    *opus != before
  }
}

#[cfg(test)]
mod tests {
  use chrono::Utc;
  use strum::IntoEnumIterator as _;

  use super::*;

  fn sample() -> Opus {
    let now = Utc::now();
    Opus {
      id:           7,
      title:        "Dune".into(),
      creator:      Some("Frank Herbert".into()),
      category:     Category::Book,
      sub_category: Some("sci-fi".into()),
      status:       Status::InProgress,
      rating:       Some(5),
      review:       None,
      created_at:   now,
      updated_at:   now,
    }
  }

  #[test]
  fn enum_string_forms_are_snake_case() {
    assert_eq!(Status::InProgress.as_ref(), "in_progress");
    assert_eq!(Status::parse("in_progress").unwrap(), Status::InProgress);
    assert_eq!(Category::Program.to_string(), "program");
    assert_eq!(
      serde_json::to_string(&Status::InProgress).unwrap(),
      "\"in_progress\""
    );
  }

  #[test]
  fn enum_parse_rejects_values_outside_the_set() {
    assert!(matches!(
      Category::parse("podcast"),
      Err(Error::UnknownCategory(s)) if s == "podcast"
    ));
    assert!(matches!(Status::parse("Planned"), Err(Error::UnknownStatus(_))));
  }

  #[test]
  fn defaults() {
    assert_eq!(Status::default(), Status::Planned);
    assert_eq!(Category::default(), Category::Book);
    assert_eq!(Category::iter().count(), 4);
    assert_eq!(Status::iter().count(), 3);
  }

  #[test]
  fn empty_patch_changes_nothing() {
    let mut opus = sample();
    let before = opus.clone();
    let patch = OpusPatch::default();
    assert!(patch.is_empty());
    assert!(!patch.apply(&mut opus));
    assert_eq!(opus, before);
  }

  #[test]
  fn patch_touches_only_set_fields() {
    let mut opus = sample();
    let patch = OpusPatch {
      title: Some("Dune Messiah".into()),
      review: Some(Some("better than I remembered".into())),
      rating: Some(None),
      ..OpusPatch::default()
    };
    assert!(patch.apply(&mut opus));

    assert_eq!(opus.title, "Dune Messiah");
    assert_eq!(opus.review.as_deref(), Some("better than I remembered"));
    assert_eq!(opus.rating, None);
    assert_eq!(opus.creator.as_deref(), Some("Frank Herbert"));
    assert_eq!(opus.status, Status::InProgress);
    assert_eq!(opus.sub_category.as_deref(), Some("sci-fi"));
  }

  #[test]
  fn patch_with_same_values_reports_no_change() {
    let mut opus = sample();
    let patch = OpusPatch {
      title: Some("Dune".into()),
      status: Some(Status::InProgress),
      ..OpusPatch::default()
    };
    assert!(!patch.apply(&mut opus));
  }
}
