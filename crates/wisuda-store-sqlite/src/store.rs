//! [`SqliteStore`]: the SQLite implementation of [`ParticipantStore`].

use std::path::Path;

use chrono::{DateTime, Utc};
use rusqlite::{OptionalExtension as _, params_from_iter, types::Value as SqlValue};

use wisuda_core::{
  column::Column,
  record::{Batch, NormalizedRecord, RawRecord},
  store::{ParticipantStore, Table},
};

use crate::{
  Result,
  encode::{RawRow, decode_dt, encode_dt, encode_text, encode_value},
  schema::SCHEMA,
};

// ─── SQL ─────────────────────────────────────────────────────────────────────

/// `npm, periode, <attributes…>` in storage order.
fn select_columns() -> String {
  let mut cols = vec!["npm", "periode"];
  cols.extend(Column::ALL.iter().map(|c| c.name()));
  cols.join(", ")
}

/// `INSERT … ON CONFLICT (npm, periode) DO UPDATE` replacing every non-key
/// column and `updated_at`.
fn upsert_sql(table: Table) -> String {
  let columns = format!("{}, updated_at", select_columns());
  let placeholders = (1..=Column::ALL.len() + 3)
    .map(|i| format!("?{i}"))
    .collect::<Vec<_>>()
    .join(", ");
  let updates = Column::ALL
    .iter()
    .map(|c| c.name())
    .chain(["updated_at"])
    .map(|name| format!("{name} = excluded.{name}"))
    .collect::<Vec<_>>()
    .join(", ");

  format!(
    "INSERT INTO {table} ({columns}) VALUES ({placeholders})
     ON CONFLICT (npm, periode) DO UPDATE SET {updates}",
    table = table.name(),
  )
}

fn row_params(
  npm: &str,
  periode: i64,
  values: impl IntoIterator<Item = SqlValue>,
  updated_at: &str,
) -> Vec<SqlValue> {
  let mut params = Vec::with_capacity(Column::ALL.len() + 3);
  params.push(SqlValue::Text(npm.to_owned()));
  params.push(SqlValue::Integer(periode));
  params.extend(values);
  params.push(SqlValue::Text(updated_at.to_owned()));
  params
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// A participant store backed by a single SQLite file.
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

  /// Open an in-memory store for tests.
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

  #[cfg(test)]
  pub(crate) fn conn_for_tests(&self) -> &tokio_rusqlite::Connection { &self.conn }

  /// Read one row from `table` as undecoded column values.
  async fn fetch_row(
    &self,
    table: Table,
    npm: &str,
    periode: i64,
  ) -> Result<Option<RawRow>> {
    let npm = npm.to_owned();
    let sql = format!(
      "SELECT {} FROM {} WHERE npm = ?1 AND periode = ?2",
      select_columns(),
      table.name(),
    );

    let row = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(&sql, rusqlite::params![npm, periode], RawRow::from_row)
            .optional()?,
        )
      })
      .await?;
    Ok(row)
  }
}

// ─── ParticipantStore impl ───────────────────────────────────────────────────

impl ParticipantStore for SqliteStore {
  type Error = crate::Error;

  async fn upsert_batch(&self, batch: Batch) -> Result<usize> {
    if batch.is_empty() {
      return Ok(0);
    }

    let count = batch.len();
    let updated_at = encode_dt(Utc::now());
    let raw_sql = upsert_sql(Table::Raw);
    let norm_sql = upsert_sql(Table::Normalized);

    self
      .conn
      .call(move |conn| {
        // Dropping `tx` without commit rolls back both tables.
        let tx = conn.transaction()?;
        {
          let mut stmt = tx.prepare(&raw_sql)?;
          for r in &batch.raw {
            let values = r.values().iter().map(encode_text);
            stmt.execute(params_from_iter(row_params(
              &r.npm,
              r.periode,
              values,
              &updated_at,
            )))?;
          }

          let mut stmt = tx.prepare(&norm_sql)?;
          for r in &batch.normalized {
            let values = r.values().iter().map(encode_value);
            stmt.execute(params_from_iter(row_params(
              &r.npm,
              r.periode,
              values,
              &updated_at,
            )))?;
          }
        }
        tx.commit()?;
        Ok(())
      })
      .await?;

    Ok(count)
  }

  async fn get_raw(&self, npm: &str, periode: i64) -> Result<Option<RawRecord>> {
    self
      .fetch_row(Table::Raw, npm, periode)
      .await?
      .map(RawRow::into_raw)
      .transpose()
  }

  async fn get_normalized(
    &self,
    npm: &str,
    periode: i64,
  ) -> Result<Option<NormalizedRecord>> {
    self
      .fetch_row(Table::Normalized, npm, periode)
      .await?
      .map(RawRow::into_normalized)
      .transpose()
  }

  async fn updated_at(
    &self,
    table: Table,
    npm: &str,
    periode: i64,
  ) -> Result<Option<DateTime<Utc>>> {
    let npm = npm.to_owned();
    let sql = format!(
      "SELECT updated_at FROM {} WHERE npm = ?1 AND periode = ?2",
      table.name()
    );

    let at: Option<String> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(&sql, rusqlite::params![npm, periode], |r| r.get(0))
            .optional()?,
        )
      })
      .await?;

    at.as_deref().map(decode_dt).transpose()
  }

  async fn list_periods(&self, table: Table) -> Result<Vec<i64>> {
    let sql = format!("SELECT DISTINCT periode FROM {} ORDER BY periode", table.name());

    let periods = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map([], |r| r.get(0))?
          .collect::<rusqlite::Result<Vec<i64>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(periods)
  }

  async fn count_by_period(&self, table: Table) -> Result<Vec<(i64, u64)>> {
    let sql = format!(
      "SELECT periode, COUNT(*) FROM {} GROUP BY periode ORDER BY periode",
      table.name()
    );

    let counts = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map([], |r| Ok((r.get::<_, i64>(0)?, r.get::<_, i64>(1)?)))?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    Ok(
      counts
        .into_iter()
        .map(|(periode, n)| (periode, n.max(0) as u64))
        .collect(),
    )
  }
}
