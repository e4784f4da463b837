//! Error types for the spreadsheet reader.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("spreadsheet error: {0}")]
  Calamine(#[from] calamine::Error),

  #[error("workbook has no sheets: {0}")]
  NoSheets(PathBuf),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
