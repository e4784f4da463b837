//! Error type for `wisuda-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  /// A stored value does not have the type its column declares.
  #[error("unexpected value in column {column}: {found}")]
  UnexpectedType {
    column: &'static str,
    found:  &'static str,
  },

  /// A row read back did not carry one value per attribute column.
  #[error("row has {0} attribute values")]
  ColumnCount(usize),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
