//! Server-rendered HTML pages.

use shelf_core::opus::{Category, Opus, Status};

use crate::form::OpusForm;

/// Escape text for use in HTML content and attribute values.
pub fn escape(s: &str) -> String {
  let mut out = String::with_capacity(s.len());
  for c in s.chars() {
    match c {
      '&' => out.push_str("&amp;"),
      '<' => out.push_str("&lt;"),
      '>' => out.push_str("&gt;"),
      '"' => out.push_str("&quot;"),
      '\'' => out.push_str("&#39;"),
      _ => out.push(c),
    }
  }
  out
}

pub fn category_label(c: Category) -> &'static str {
  match c {
    Category::Book => "Book",
    Category::Program => "Program",
    Category::Movie => "Movie",
    Category::Other => "Other",
  }
}

pub fn status_label(s: Status) -> &'static str {
  match s {
    Status::Planned => "Planned",
    Status::InProgress => "In progress",
    Status::Completed => "Completed",
  }
}

fn layout(title: &str, body: &str) -> String {
  format!(
    r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>
        body {{
            font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif;
            background-color: #111827;
            color: #f9fafb;
            margin: 0;
            padding: 48px 16px;
        }}
        main {{ max-width: 56rem; margin: 0 auto; }}
        h1 {{ font-size: 2.25rem; }}
        a.button, button {{
            background-color: #06b6d4;
            color: #fff;
            font-weight: 700;
            padding: 8px 16px;
            border: none;
            border-radius: 8px;
            text-decoration: none;
            cursor: pointer;
        }}
        button:disabled {{ opacity: 0.5; cursor: default; }}
        .header {{ display: flex; justify-content: space-between; align-items: center; }}
        .card {{ background-color: #1f2937; padding: 24px; border-radius: 8px; margin-bottom: 16px; }}
        .card h2 {{ color: #22d3ee; margin: 0; }}
        .tag {{ background-color: #374151; padding: 4px 8px; border-radius: 999px; margin-right: 8px; }}
        .muted {{ color: #9ca3af; }}
        .error {{ color: #ef4444; }}
        label {{ display: block; margin-top: 16px; color: #d1d5db; }}
        input, select, textarea {{
            width: 100%;
            box-sizing: border-box;
            background-color: #374151;
            color: #f9fafb;
            border: 1px solid #4b5563;
            border-radius: 6px;
            padding: 8px;
        }}
    </style>
</head>
<body>
<main>
{body}
</main>
</body>
</html>
"#,
    title = escape(title),
  )
}

/// The catalog list: every opus, or an empty-state message.
pub fn list_page(opuses: &[Opus]) -> String {
  let items = if opuses.is_empty() {
    r#"<p class="muted empty">No works registered yet.</p>"#.to_owned()
  } else {
    let cards: String = opuses.iter().map(opus_card).collect();
    format!(r#"<ul style="list-style: none; padding: 0;">{cards}</ul>"#)
  };

  layout(
    "Catalog",
    &format!(
      r#"<div class="header">
    <h1>Catalog</h1>
    <a class="button" href="/opuses/new">New entry</a>
</div>
{items}"#
    ),
  )
}

fn opus_card(opus: &Opus) -> String {
  format!(
    r#"
<li class="card">
    <h2>{title}</h2>
    <p class="muted">{creator}</p>
    <div>
        <span class="tag">{category}</span>
        <span class="tag">{sub_category}</span>
        <strong>{status}</strong>
    </div>
</li>"#,
    title = escape(&opus.title),
    creator = escape(opus.creator.as_deref().unwrap_or_default()),
    category = category_label(opus.category),
    sub_category = escape(opus.sub_category.as_deref().unwrap_or_default()),
    status = status_label(opus.status),
  )
}

fn options<T>(selected: &str, label: fn(T) -> &'static str) -> String
where
  T: strum::IntoEnumIterator + AsRef<str> + Copy,
{
  T::iter()
    .map(|v| {
      let value = v.as_ref();
      let sel = if value == selected { " selected" } else { "" };
      format!(r#"<option value="{value}"{sel}>{}</option>"#, label(v))
    })
    .collect()
}

/// The creation form, pre-filled with `form` and showing `error` if set.
///
/// The submit button disables itself as the form is sent so a second click
/// cannot post the same entry twice.
pub fn form_page(form: &OpusForm, error: Option<&str>) -> String {
  let error = error
    .map(|e| format!(r#"<p class="error" role="alert">{}</p>"#, escape(e)))
    .unwrap_or_default();

  layout(
    "New entry",
    &format!(
      r#"<h1>New entry</h1>
<form class="card" method="post" action="/opuses/new"
      onsubmit="var b = this.querySelector('button[type=submit]'); b.disabled = true; b.textContent = 'Saving...';">
    <label for="title">Title *</label>
    <input type="text" id="title" name="title" value="{title}" maxlength="255" required>

    <label for="creator">Creator</label>
    <input type="text" id="creator" name="creator" value="{creator}">

    <label for="category">Category</label>
    <select id="category" name="category">{categories}</select>

    <label for="sub_category">Sub-category</label>
    <input type="text" id="sub_category" name="sub_category" value="{sub_category}"
           placeholder="e.g. manga, anime, variety">

    <label for="status">Status</label>
    <select id="status" name="status">{statuses}</select>

    <label for="rating">Rating</label>
    <input type="number" id="rating" name="rating" value="{rating}" min="0" max="255">

    <label for="review">Review</label>
    <textarea id="review" name="review" rows="4">{review}</textarea>

    {error}

    <p style="text-align: right;">
        <a class="muted" href="/">Cancel</a>
        <button type="submit">Save</button>
    </p>
</form>"#,
      title = escape(&form.title),
      creator = escape(&form.creator),
      categories = options::<Category>(&form.category, category_label),
      sub_category = escape(&form.sub_category),
      statuses = options::<Status>(&form.status, status_label),
      rating = escape(&form.rating),
      review = escape(&form.review),
    ),
  )
}

/// Shown when the catalog could not be loaded.
pub fn error_page(message: &str) -> String {
  layout(
    "Catalog unavailable",
    &format!(
      r#"<h1>Catalog unavailable</h1>
<p class="error" role="alert">{}</p>
<p><a class="button" href="/">Retry</a></p>"#,
      escape(message)
    ),
  )
}

#[cfg(test)]
mod tests {
  use chrono::Utc;

  use super::*;

  #[test]
  fn escape_covers_markup_and_quotes() {
    assert_eq!(
      escape(r#"<a href="x">Tom & Jerry's</a>"#),
      "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#39;s&lt;/a&gt;"
    );
  }

  #[test]
  fn empty_list_shows_empty_state() {
    let html = list_page(&[]);
    assert!(html.contains("No works registered yet."));
    assert!(html.contains(r#"href="/opuses/new""#));
  }

  #[test]
  fn list_renders_fields_escaped() {
    let now = Utc::now();
    let opus = Opus {
      id:           1,
      title:        "<Akira>".into(),
      creator:      Some("Katsuhiro Otomo".into()),
      category:     Category::Movie,
      sub_category: Some("anime".into()),
      status:       Status::InProgress,
      rating:       None,
      review:       None,
      created_at:   now,
      updated_at:   now,
    };
    let html = list_page(&[opus]);
    assert!(html.contains("&lt;Akira&gt;"));
    assert!(!html.contains("<Akira>"));
    assert!(html.contains("Katsuhiro Otomo"));
    assert!(html.contains("Movie"));
    assert!(html.contains("anime"));
    assert!(html.contains("In progress"));
    assert!(!html.contains("No works registered yet."));
  }

  #[test]
  fn form_keeps_values_and_selection() {
    let form = OpusForm {
      title: "Frieren".into(),
      category: "program".into(),
      status: "in_progress".into(),
      ..OpusForm::default()
    };
    let html = form_page(&form, Some("The title field is required."));
    assert!(html.contains(r#"value="Frieren""#));
    assert!(html.contains(r#"<option value="program" selected>"#));
    assert!(html.contains(r#"<option value="in_progress" selected>"#));
    assert!(html.contains(r#"<option value="book">"#));
    assert!(html.contains("The title field is required."));
    assert!(html.contains("b.disabled = true"));
  }

  #[test]
  fn form_without_error_has_no_alert() {
    let html = form_page(&OpusForm::default(), None);
    assert!(!html.contains(r#"role="alert""#));
    assert!(html.contains(r#"<option value="planned" selected>"#));
  }
}
