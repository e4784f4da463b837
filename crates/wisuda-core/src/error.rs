//! Error types for `wisuda-core`.

use thiserror::Error;

/// Fatal, per-file ingestion failures. Value-level problems never surface
/// here; they coerce to null instead.
#[derive(Debug, Error)]
pub enum Error {
  #[error("no period found in file name: {0:?}")]
  MissingPeriod(String),

  #[error("required column not found: npm")]
  MissingIdColumn,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
