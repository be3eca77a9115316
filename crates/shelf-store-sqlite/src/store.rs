//! [`SqliteStore`]: the SQLite implementation of [`OpusStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::OptionalExtension as _;

use shelf_core::{
  opus::{NewOpus, Opus, OpusPatch},
  store::OpusStore,
};

use crate::{
  encode::{OPUS_COLUMNS, RawOpus, encode_dt},
  schema::SCHEMA,
  Error, Result,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A shelf catalog backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, mostly for tests.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── Row helpers ─────────────────────────────────────────────────────────────

fn select_opus(
  conn: &rusqlite::Connection,
  id: i64,
) -> rusqlite::Result<Option<RawOpus>> {
  conn
    .query_row(
      &format!("SELECT {OPUS_COLUMNS} FROM opuses WHERE id = ?1"),
      rusqlite::params![id],
      RawOpus::from_row,
    )
    .optional()
}

/// Overwrite every writable column and `updated_at` of `opus`.
fn write_opus(conn: &rusqlite::Connection, opus: &Opus) -> rusqlite::Result<usize> {
  conn.execute(
    "UPDATE opuses SET
       title = ?1, creator = ?2, category = ?3, sub_category = ?4,
       status = ?5, rating = ?6, review = ?7, updated_at = ?8
     WHERE id = ?9",
    rusqlite::params![
      opus.title,
      opus.creator,
      opus.category.as_ref(),
      opus.sub_category,
      opus.status.as_ref(),
      opus.rating.map(i64::from),
      opus.review,
      encode_dt(opus.updated_at),
      opus.id,
    ],
  )
}

#[cfg(test)]
impl SqliteStore {
  /// Raw connection, for tests that bypass the typed API.
  pub(crate) fn conn_for_tests(&self) -> &tokio_rusqlite::Connection { &self.conn }
}

// ─── OpusStore impl ──────────────────────────────────────────────────────────

impl OpusStore for SqliteStore {
  type Error = Error;

  async fn list_opuses(&self) -> Result<Vec<Opus>> {
    let raws: Vec<RawOpus> = self
      .conn
      .call(|conn| {
        let mut stmt = conn
          .prepare(&format!("SELECT {OPUS_COLUMNS} FROM opuses ORDER BY id"))?;
        let rows = stmt
          .query_map([], RawOpus::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawOpus::into_opus).collect()
  }

  async fn get_opus(&self, id: i64) -> Result<Option<Opus>> {
    let raw = self
      .conn
      .call(move |conn| Ok(select_opus(conn, id)?))
      .await?;

    raw.map(RawOpus::into_opus).transpose()
  }

  async fn create_opus(&self, input: NewOpus) -> Result<Opus> {
    let now = Utc::now();

    let title        = input.title.clone();
    let creator      = input.creator.clone();
    let category     = input.category.as_ref().to_owned();
    let sub_category = input.sub_category.clone();
    let status       = input.status.as_ref().to_owned();
    let rating       = input.rating.map(i64::from);
    let review       = input.review.clone();
    let at_str       = encode_dt(now);

    let id: i64 = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO opuses (
             title, creator, category, sub_category, status,
             rating, review, created_at, updated_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?8)",
          rusqlite::params![
            title,
            creator,
            category,
            sub_category,
            status,
            rating,
            review,
            at_str,
          ],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    Ok(Opus {
      id,
      title:        input.title,
      creator:      input.creator,
      category:     input.category,
      sub_category: input.sub_category,
      status:       input.status,
      rating:       input.rating,
      review:       input.review,
      created_at:   now,
      updated_at:   now,
    })
  }

  /// Read, patch and write back within one call on the connection thread,
  /// so overlapping updates to the same row never see each other's stale
  /// values.
  async fn update_opus(&self, id: i64, patch: OpusPatch) -> Result<Option<Opus>> {
    let opus = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;

        let Some(raw) = select_opus(&tx, id)? else {
          return Ok(None);
        };
        let mut opus = raw
          .into_opus()
          .map_err(|e| tokio_rusqlite::Error::Other(Box::new(e)))?;

        if patch.apply(&mut opus) {
          opus.updated_at = Utc::now();
          write_opus(&tx, &opus)?;
        }

        tx.commit()?;
        Ok(Some(opus))
      })
      .await?;

    Ok(opus)
  }

  async fn delete_opus(&self, id: i64) -> Result<bool> {
    let removed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute("DELETE FROM opuses WHERE id = ?1", rusqlite::params![id])?)
      })
      .await?;

    Ok(removed > 0)
  }
}
