//! Request-boundary input for opus writes.
//!
//! [`OpusInput`] is the loosely-typed body accepted by create and update. It
//! names every writable field explicitly; anything else in a request body
//! (`id`, timestamps, unknown keys) is dropped during deserialisation.
//! Converting it into a [`NewOpus`] or [`OpusPatch`] is where all field rules
//! are enforced, so an invalid enum value never reaches storage.

use std::fmt;

use serde::{
  Deserialize, Deserializer, Serialize, Serializer, ser::SerializeMap as _,
};

use crate::opus::{Category, NewOpus, OpusPatch, Status, TITLE_MAX_CHARS};

// ─── Validation errors ───────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
  pub field:   &'static str,
  pub message: String,
}

/// Every field-level failure found in one input, in field order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
  errors: Vec<FieldError>,
}

impl ValidationErrors {
  pub fn push(&mut self, field: &'static str, message: impl Into<String>) {
    self.errors.push(FieldError { field, message: message.into() });
  }

  pub fn is_empty(&self) -> bool { self.errors.is_empty() }

  pub fn len(&self) -> usize { self.errors.len() }

  /// Messages recorded against `field`.
  pub fn messages_for(&self, field: &str) -> Vec<&str> {
    self
      .errors
      .iter()
      .filter(|e| e.field == field)
      .map(|e| e.message.as_str())
      .collect()
  }

  /// The first message, with a count of the remaining ones.
  pub fn summary(&self) -> String {
    match self.errors.as_slice() {
      [] => "The given data was invalid.".to_owned(),
      [only] => only.message.clone(),
      [first, rest @ ..] => {
        let noun = if rest.len() == 1 { "error" } else { "errors" };
        format!("{} (and {} more {noun})", first.message, rest.len())
      }
    }
  }

  fn into_result<T>(self, value: T) -> Result<T, Self> {
    if self.is_empty() { Ok(value) } else { Err(self) }
  }
}

impl fmt::Display for ValidationErrors {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.summary())
  }
}

impl std::error::Error for ValidationErrors {}

/// Serialises as `{"field": ["message", ...], ...}`.
impl Serialize for ValidationErrors {
  fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
    let mut fields: Vec<&'static str> = Vec::new();
    for e in &self.errors {
      if !fields.contains(&e.field) {
        fields.push(e.field);
      }
    }

    let mut map = serializer.serialize_map(Some(fields.len()))?;
    for field in fields {
      map.serialize_entry(field, &self.messages_for(field))?;
    }
    map.end()
  }
}

// ─── Input ───────────────────────────────────────────────────────────────────

/// Distinguishes an absent key (`None`) from an explicit `null` (`Some(None)`).
fn nullable<'de, D, T>(de: D) -> Result<Option<Option<T>>, D::Error>
where
  D: Deserializer<'de>,
  T: Deserialize<'de>,
{
  Option::<T>::deserialize(de).map(Some)
}

/// Raw write body for `POST /opuses` and `PUT|PATCH /opuses/{id}`.
///
/// Enums are carried as strings so that an unknown value becomes a field
/// error rather than a deserialisation failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpusInput {
  #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
  pub title:        Option<Option<String>>,
  #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
  pub creator:      Option<Option<String>>,
  #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
  pub category:     Option<Option<String>>,
  #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
  pub sub_category: Option<Option<String>>,
  #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
  pub status:       Option<Option<String>>,
  #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
  pub rating:       Option<Option<i64>>,
  #[serde(default, deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
  pub review:       Option<Option<String>>,
}

/// Trim, and treat a blank string as "not set".
fn clean(value: Option<String>) -> Option<String> {
  value
    .map(|v| v.trim().to_owned())
    .filter(|v| !v.is_empty())
}

fn check_title(title: &str, errors: &mut ValidationErrors) {
  if title.chars().count() > TITLE_MAX_CHARS {
    errors.push(
      "title",
      format!("The title field must not be greater than {TITLE_MAX_CHARS} characters."),
    );
  }
}

fn check_rating(rating: i64, errors: &mut ValidationErrors) -> Option<u8> {
  match u8::try_from(rating) {
    Ok(r) => Some(r),
    Err(_) => {
      errors.push("rating", "The rating field must be between 0 and 255.");
      None
    }
  }
}

fn check_category(raw: &str, errors: &mut ValidationErrors) -> Option<Category> {
  Category::parse(raw.trim())
    .map_err(|_| errors.push("category", "The selected category is invalid."))
    .ok()
}

fn check_status(raw: &str, errors: &mut ValidationErrors) -> Option<Status> {
  Status::parse(raw.trim())
    .map_err(|_| errors.push("status", "The selected status is invalid."))
    .ok()
}

impl OpusInput {
  /// Input for a new opus with only a title set.
  pub fn titled(title: impl Into<String>) -> Self {
    Self { title: Some(Some(title.into())), ..Self::default() }
  }

  /// Validate as a creation request. `title` is required; an omitted category
  /// or status takes its default.
  pub fn into_new(self) -> Result<NewOpus, ValidationErrors> {
    let mut errors = ValidationErrors::default();

    let title = match clean(self.title.flatten()) {
      Some(t) => {
        check_title(&t, &mut errors);
        t
      }
      None => {
        errors.push("title", "The title field is required.");
        String::new()
      }
    };

    let category = clean(self.category.flatten())
      .map(|c| check_category(&c, &mut errors).unwrap_or_default())
      .unwrap_or_default();

    let status = clean(self.status.flatten())
      .map(|s| check_status(&s, &mut errors).unwrap_or_default())
      .unwrap_or_default();

    let rating = self
      .rating
      .flatten()
      .and_then(|r| check_rating(r, &mut errors));

    errors.into_result(NewOpus {
      title,
      creator: clean(self.creator.flatten()),
      category,
      sub_category: clean(self.sub_category.flatten()),
      status,
      rating,
      review: clean(self.review.flatten()),
    })
  }

  /// Validate as a partial update. Only keys present in the body are set on
  /// the patch; `title`, `category` and `status` cannot be cleared.
  pub fn into_patch(self) -> Result<OpusPatch, ValidationErrors> {
    let mut errors = ValidationErrors::default();

    let title = self.title.and_then(|t| match clean(t) {
      Some(t) => {
        check_title(&t, &mut errors);
        Some(t)
      }
      None => {
        errors.push("title", "The title field must be a non-empty string.");
        None
      }
    });

    let category = self.category.and_then(|c| match clean(c) {
      Some(c) => check_category(&c, &mut errors),
      None => {
        errors.push("category", "The category field cannot be null.");
        None
      }
    });

    let status = self.status.and_then(|s| match clean(s) {
      Some(s) => check_status(&s, &mut errors),
      None => {
        errors.push("status", "The status field cannot be null.");
        None
      }
    });

    let rating = self.rating.map(|r| r.and_then(|r| check_rating(r, &mut errors)));

    errors.into_result(OpusPatch {
      title,
      creator: self.creator.map(clean),
      category,
      sub_category: self.sub_category.map(clean),
      status,
      rating,
      review: self.review.map(clean),
    })
  }
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  fn input(value: serde_json::Value) -> OpusInput {
    serde_json::from_value(value).expect("valid input json")
  }

  // ─── Create ────────────────────────────────────────────────────────────────

  #[test]
  fn create_with_title_only_takes_defaults() {
    let new = input(json!({ "title": "Dune" })).into_new().unwrap();
    assert_eq!(new, NewOpus::new("Dune"));
    assert_eq!(new.status, Status::Planned);
  }

  #[test]
  fn create_requires_a_title() {
    for body in [json!({}), json!({ "title": null }), json!({ "title": "   " })] {
      let errors = input(body).into_new().unwrap_err();
      assert_eq!(errors.messages_for("title"), ["The title field is required."]);
    }
  }

  #[test]
  fn create_rejects_long_title_by_characters() {
    let ok = "é".repeat(TITLE_MAX_CHARS);
    assert!(OpusInput::titled(ok).into_new().is_ok());

    let too_long = "a".repeat(TITLE_MAX_CHARS + 1);
    let errors = OpusInput::titled(too_long).into_new().unwrap_err();
    assert_eq!(errors.len(), 1);
    assert!(errors.summary().contains("255 characters"));
  }

  #[test]
  fn create_rejects_values_outside_the_enums() {
    let errors = input(json!({
      "title": "x",
      "category": "podcast",
      "status": "abandoned",
      "rating": 300,
    }))
    .into_new()
    .unwrap_err();

    assert_eq!(errors.len(), 3);
    assert_eq!(errors.messages_for("category"), ["The selected category is invalid."]);
    assert_eq!(errors.messages_for("status"), ["The selected status is invalid."]);
    assert_eq!(errors.summary(), "The selected category is invalid. (and 2 more errors)");
  }

  #[test]
  fn create_blanks_optional_text_and_ignores_unknown_keys() {
    let new = input(json!({
      "id": 99,
      "created_at": "2020-01-01T00:00:00Z",
      "title": "  Spirited Away ",
      "creator": "",
      "category": "movie",
      "sub_category": " anime ",
      "status": "completed",
      "rating": null,
      "review": "",
    }))
    .into_new()
    .unwrap();

    assert_eq!(new.title, "Spirited Away");
    assert_eq!(new.creator, None);
    assert_eq!(new.category, Category::Movie);
    assert_eq!(new.sub_category.as_deref(), Some("anime"));
    assert_eq!(new.status, Status::Completed);
    assert_eq!(new.rating, None);
    assert_eq!(new.review, None);
  }

  // ─── Update ────────────────────────────────────────────────────────────────

  #[test]
  fn patch_distinguishes_absent_from_null() {
    let patch = input(json!({ "creator": null, "rating": 3 })).into_patch().unwrap();
    assert_eq!(patch.creator, Some(None));
    assert_eq!(patch.rating, Some(Some(3)));
    assert_eq!(patch.title, None);
    assert_eq!(patch.review, None);
  }

  #[test]
  fn empty_body_is_an_empty_patch() {
    assert!(input(json!({ "id": 5 })).into_patch().unwrap().is_empty());
  }

  #[test]
  fn patch_rejects_empty_title_and_null_enums() {
    let errors = input(json!({ "title": "", "category": null, "status": "done" }))
      .into_patch()
      .unwrap_err();
    assert_eq!(errors.len(), 3);
    assert_eq!(
      errors.messages_for("title"),
      ["The title field must be a non-empty string."]
    );
    assert_eq!(errors.messages_for("category"), ["The category field cannot be null."]);
  }

  #[test]
  fn errors_serialise_grouped_by_field() {
    let mut errors = ValidationErrors::default();
    errors.push("title", "a");
    errors.push("rating", "b");
    errors.push("title", "c");
    assert_eq!(
      serde_json::to_value(&errors).unwrap(),
      json!({ "title": ["a", "c"], "rating": ["b"] })
    );
  }
}
