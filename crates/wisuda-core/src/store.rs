//! The `ParticipantStore` trait and the table selector used by reads.
//!
//! Implemented by storage backends (e.g. `wisuda-store-sqlite`). The loader
//! depends on this abstraction, not on a concrete backend.

use std::future::Future;

use chrono::{DateTime, Utc};

use crate::record::{Batch, NormalizedRecord, RawRecord};

// ─── Table selector ──────────────────────────────────────────────────────────

/// Which of the two parallel tables a read targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Table {
  /// Display text exactly as exported.
  Raw,
  /// Values coerced to their column types.
  Normalized,
}

impl Table {
  pub fn name(self) -> &'static str {
    match self {
      Table::Raw => "peserta_wisuda_raw",
      Table::Normalized => "peserta_wisuda",
    }
  }
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a participant store backend.
///
/// Records are only ever written by [`ParticipantStore::upsert_batch`]; there
/// is no update or delete path.
pub trait ParticipantStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Write both halves of `batch` in a single transaction, replacing every
  /// non-key column of rows that already exist for the same
  /// `(npm, periode)` and refreshing their `updated_at`. Either both tables
  /// change or neither does.
  ///
  /// Returns the number of rows written; an empty batch is a no-op.
  fn upsert_batch(
    &self,
    batch: Batch,
  ) -> impl Future<Output = Result<usize, Self::Error>> + Send + '_;

  /// Fetch one raw record. Returns `None` if not found.
  fn get_raw<'a>(
    &'a self,
    npm: &'a str,
    periode: i64,
  ) -> impl Future<Output = Result<Option<RawRecord>, Self::Error>> + Send + 'a;

  /// Fetch one normalized record. Returns `None` if not found.
  fn get_normalized<'a>(
    &'a self,
    npm: &'a str,
    periode: i64,
  ) -> impl Future<Output = Result<Option<NormalizedRecord>, Self::Error>> + Send + 'a;

  /// When the row was last written.
  fn updated_at<'a>(
    &'a self,
    table: Table,
    npm: &'a str,
    periode: i64,
  ) -> impl Future<Output = Result<Option<DateTime<Utc>>, Self::Error>> + Send + 'a;

  /// Distinct periods present in `table`, ascending.
  fn list_periods(
    &self,
    table: Table,
  ) -> impl Future<Output = Result<Vec<i64>, Self::Error>> + Send + '_;

  /// Row count per period in `table`, ascending by period.
  fn count_by_period(
    &self,
    table: Table,
  ) -> impl Future<Output = Result<Vec<(i64, u64)>, Self::Error>> + Send + '_;
}
