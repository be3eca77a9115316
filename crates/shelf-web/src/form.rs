//! State of the creation form, as posted by the browser.

use serde::Deserialize;
use shelf_core::{
  input::OpusInput,
  opus::{Category, Status},
};

/// Every writable field, exactly as typed. HTML forms only carry strings, so
/// nothing is interpreted until [`OpusForm::to_input`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct OpusForm {
  pub title:        String,
  pub creator:      String,
  pub category:     String,
  pub sub_category: String,
  pub status:       String,
  pub rating:       String,
  pub review:       String,
}

impl Default for OpusForm {
  fn default() -> Self {
    Self {
      title:        String::new(),
      creator:      String::new(),
      category:     Category::default().to_string(),
      sub_category: String::new(),
      status:       Status::default().to_string(),
      rating:       String::new(),
      review:       String::new(),
    }
  }
}

impl OpusForm {
  /// The JSON body for a create request. A blank rating is sent as `null`;
  /// a rating that is not a whole number is rejected before any request.
  pub fn to_input(&self) -> Result<OpusInput, String> {
    let rating = match self.rating.trim() {
      "" => None,
      r => Some(
        r.parse::<i64>()
          .map_err(|_| "The rating field must be a whole number.".to_owned())?,
      ),
    };

    Ok(OpusInput {
      title:        Some(Some(self.title.clone())),
      creator:      Some(Some(self.creator.clone())),
      category:     Some(Some(self.category.clone())),
      sub_category: Some(Some(self.sub_category.clone())),
      status:       Some(Some(self.status.clone())),
      rating:       Some(rating),
      review:       Some(Some(self.review.clone())),
    })
  }
}
