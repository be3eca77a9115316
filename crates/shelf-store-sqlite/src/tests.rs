//! Integration tests for `SqliteStore` against an in-memory database.

use shelf_core::{
  opus::{Category, NewOpus, OpusPatch, Status},
  store::OpusStore,
};

use crate::SqliteStore;

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn full_opus(title: &str) -> NewOpus {
  NewOpus {
    title:        title.into(),
    creator:      Some("Hayao Miyazaki".into()),
    category:     Category::Movie,
    sub_category: Some("anime".into()),
    status:       Status::Completed,
    rating:       Some(5),
    review:       Some("Still holds up.".into()),
  }
}

// ─── Create / read ───────────────────────────────────────────────────────────

#[tokio::test]
async fn create_assigns_id_and_defaults() {
  let s = store().await;

  let opus = s.create_opus(NewOpus::new("Dune")).await.unwrap();
  assert!(opus.id > 0);
  assert_eq!(opus.title, "Dune");
  assert_eq!(opus.status, Status::Planned);
  assert_eq!(opus.category, Category::Book);
  assert_eq!(opus.created_at, opus.updated_at);
}

#[tokio::test]
async fn created_opus_equals_refetched_opus() {
  let s = store().await;

  let created = s.create_opus(full_opus("Spirited Away")).await.unwrap();
  let fetched = s.get_opus(created.id).await.unwrap();
  assert_eq!(fetched, Some(created.clone()));

  let listed = s.list_opuses().await.unwrap();
  assert_eq!(listed, vec![created]);
}

#[tokio::test]
async fn get_missing_returns_none() {
  let s = store().await;
  assert!(s.get_opus(42).await.unwrap().is_none());
}

#[tokio::test]
async fn list_is_in_insertion_order() {
  let s = store().await;
  assert!(s.list_opuses().await.unwrap().is_empty());

  s.create_opus(NewOpus::new("A")).await.unwrap();
  s.create_opus(NewOpus::new("B")).await.unwrap();
  s.create_opus(NewOpus::new("C")).await.unwrap();

  let titles: Vec<_> = s
    .list_opuses()
    .await
    .unwrap()
    .into_iter()
    .map(|o| o.title)
    .collect();
  assert_eq!(titles, ["A", "B", "C"]);
}

// ─── Update ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn update_title_leaves_other_fields() {
  let s = store().await;
  let created = s.create_opus(full_opus("Totoro")).await.unwrap();

  let patch = OpusPatch { title: Some("My Neighbor Totoro".into()), ..OpusPatch::default() };
  let updated = s.update_opus(created.id, patch).await.unwrap().unwrap();

  assert_eq!(updated.title, "My Neighbor Totoro");
  assert_eq!(updated.creator, created.creator);
  assert_eq!(updated.category, created.category);
  assert_eq!(updated.sub_category, created.sub_category);
  assert_eq!(updated.status, created.status);
  assert_eq!(updated.rating, created.rating);
  assert_eq!(updated.review, created.review);
  assert_eq!(updated.created_at, created.created_at);
  assert!(updated.updated_at >= created.updated_at);

  assert_eq!(s.get_opus(created.id).await.unwrap(), Some(updated));
}

#[tokio::test]
async fn update_can_clear_optional_fields() {
  let s = store().await;
  let created = s.create_opus(full_opus("Ponyo")).await.unwrap();

  let patch = OpusPatch {
    creator: Some(None),
    rating: Some(None),
    status: Some(Status::InProgress),
    ..OpusPatch::default()
  };
  let updated = s.update_opus(created.id, patch).await.unwrap().unwrap();

  assert_eq!(updated.creator, None);
  assert_eq!(updated.rating, None);
  assert_eq!(updated.status, Status::InProgress);
  assert_eq!(updated.review.as_deref(), Some("Still holds up."));
}

#[tokio::test]
async fn noop_update_keeps_updated_at() {
  let s = store().await;
  let created = s.create_opus(full_opus("Mononoke")).await.unwrap();

  let patch = OpusPatch { status: Some(Status::Completed), ..OpusPatch::default() };
  let same = s.update_opus(created.id, patch).await.unwrap().unwrap();
  assert_eq!(same, created);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_updates_to_different_fields_both_land() {
  let s = store().await;

  for round in 0..100 {
    let id = s.create_opus(NewOpus::new(format!("round {round}"))).await.unwrap().id;

    let (a, b) = (s.clone(), s.clone());
    let creator = tokio::spawn(async move {
      let patch = OpusPatch { creator: Some(Some("C".into())), ..OpusPatch::default() };
      a.update_opus(id, patch).await
    });
    let review = tokio::spawn(async move {
      let patch = OpusPatch { review: Some(Some("R".into())), ..OpusPatch::default() };
      b.update_opus(id, patch).await
    });
    creator.await.unwrap().unwrap().unwrap();
    review.await.unwrap().unwrap().unwrap();

    let stored = s.get_opus(id).await.unwrap().unwrap();
    assert_eq!(stored.creator.as_deref(), Some("C"), "round {round}");
    assert_eq!(stored.review.as_deref(), Some("R"), "round {round}");
  }
}

#[tokio::test]
async fn update_missing_returns_none() {
  let s = store().await;
  let patch = OpusPatch { title: Some("x".into()), ..OpusPatch::default() };
  assert!(s.update_opus(9, patch).await.unwrap().is_none());
}

// ─── Delete ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn delete_removes_permanently() {
  let s = store().await;
  let a = s.create_opus(NewOpus::new("A")).await.unwrap();
  let b = s.create_opus(NewOpus::new("B")).await.unwrap();

  assert!(s.delete_opus(a.id).await.unwrap());
  assert!(s.get_opus(a.id).await.unwrap().is_none());

  let ids: Vec<_> = s.list_opuses().await.unwrap().into_iter().map(|o| o.id).collect();
  assert_eq!(ids, [b.id]);

  assert!(!s.delete_opus(a.id).await.unwrap());
}

#[tokio::test]
async fn ids_are_not_reused_after_delete() {
  let s = store().await;
  let first = s.create_opus(NewOpus::new("first")).await.unwrap();
  assert!(s.delete_opus(first.id).await.unwrap());

  let second = s.create_opus(NewOpus::new("second")).await.unwrap();
  assert!(second.id > first.id);
}

// ─── Schema constraints ──────────────────────────────────────────────────────

#[tokio::test]
async fn schema_rejects_values_outside_the_enums() {
  let s = store().await;

  let result = s
    .conn_for_tests()
    .call(|conn| {
      Ok(conn.execute(
        "INSERT INTO opuses (title, category, status, created_at, updated_at)
         VALUES ('x', 'podcast', 'planned', '2025-01-01T00:00:00Z', '2025-01-01T00:00:00Z')",
        [],
      )?)
    })
    .await;
  assert!(result.is_err());

  let result = s
    .conn_for_tests()
    .call(|conn| {
      Ok(conn.execute(
        "INSERT INTO opuses (title, category, status, created_at, updated_at)
         VALUES ('', 'book', 'planned', '2025-01-01T00:00:00Z', '2025-01-01T00:00:00Z')",
        [],
      )?)
    })
    .await;
  assert!(result.is_err());

  assert!(s.list_opuses().await.unwrap().is_empty());
}
