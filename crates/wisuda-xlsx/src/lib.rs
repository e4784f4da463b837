//! Spreadsheet reader for participant exports.
//!
//! Opens `.xlsx`, `.xls` or `.ods` workbooks through [`calamine`] and returns
//! the first worksheet as a [`Sheet`] of typed cells. Pure synchronous; no
//! database dependencies.
//!
//! # Quick start
//!
//! ```no_run
//! let sheet = wisuda_xlsx::read_sheet("Data Periode 7.xlsx").unwrap();
//! println!("{} headers, {} rows", sheet.headers.len(), sheet.rows.len());
//! ```

pub mod error;
mod read;

use std::path::Path;

pub use error::{Error, Result};
use wisuda_core::ingest::Sheet;

/// Read the first worksheet of the workbook at `path`.
///
/// Row 1 becomes [`Sheet::headers`]; every following row, blank ones
/// included, becomes a data row. Numbers, booleans and date-formatted cells
/// keep their native types.
pub fn read_sheet(path: impl AsRef<Path>) -> Result<Sheet> {
  read::read_first_sheet(path.as_ref())
}
