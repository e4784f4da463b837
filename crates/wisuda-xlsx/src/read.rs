//! calamine → [`Cell`] conversion.

use std::path::Path;

use calamine::{Data, Range, Reader, open_workbook_auto};
use chrono::{NaiveDate, NaiveDateTime};
use wisuda_core::{ingest::Sheet, value::Cell};

use crate::error::{Error, Result};

pub(crate) fn read_first_sheet(path: &Path) -> Result<Sheet> {
  let mut workbook = open_workbook_auto(path)?;

  let sheet_name = workbook
    .sheet_names()
    .first()
    .cloned()
    .ok_or_else(|| Error::NoSheets(path.to_path_buf()))?;

  let range = workbook.worksheet_range(&sheet_name)?;
  Ok(range_to_sheet(&range))
}

/// Split a used range into header row and data rows.
///
/// calamine trims leading empty rows from the range; if that happened the
/// sheet's first row was blank, so there are no headers at all.
pub(crate) fn range_to_sheet(range: &Range<Data>) -> Sheet {
  let first_row_blank = range.start().is_some_and(|(row, _)| row > 0);
  let mut rows = range.rows().map(|row| row.iter().map(to_cell).collect::<Vec<_>>());

  let headers = if first_row_blank {
    Vec::new()
  } else {
    rows.next().unwrap_or_default()
  };

  Sheet { headers, rows: rows.collect() }
}

pub(crate) fn to_cell(data: &Data) -> Cell {
  match data {
    Data::Empty => Cell::Empty,
    Data::String(s) => Cell::Text(s.clone()),
    Data::Int(i) => Cell::Int(*i),
    Data::Float(f) => Cell::Float(*f),
    Data::Bool(b) => Cell::Bool(*b),
    Data::DateTime(dt) if dt.is_duration() => Cell::Float(dt.as_f64()),
    Data::DateTime(dt) => match dt.as_datetime() {
      Some(ndt) => Cell::DateTime(ndt),
      None => Cell::Float(dt.as_f64()),
    },
    Data::DateTimeIso(s) => parse_iso(s).unwrap_or_else(|| Cell::Text(s.clone())),
    Data::DurationIso(s) => Cell::Text(s.clone()),
    Data::Error(e) => Cell::Text(e.to_string()),
  }
}

fn parse_iso(s: &str) -> Option<Cell> {
  if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
    return Some(Cell::DateTime(dt));
  }
  NaiveDate::parse_from_str(s, "%Y-%m-%d").ok().map(Cell::Date)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn scalar_cells_convert() {
    assert_eq!(to_cell(&Data::Empty), Cell::Empty);
    assert_eq!(to_cell(&Data::String("Budi".into())), Cell::Text("Budi".into()));
    assert_eq!(to_cell(&Data::Float(3.5)), Cell::Float(3.5));
    assert_eq!(to_cell(&Data::Int(7)), Cell::Int(7));
    assert_eq!(to_cell(&Data::Bool(true)), Cell::Bool(true));
  }

  #[test]
  fn iso_dates_convert() {
    assert_eq!(
      to_cell(&Data::DateTimeIso("2023-03-15".into())),
      Cell::Date(NaiveDate::from_ymd_opt(2023, 3, 15).unwrap())
    );
    assert!(matches!(
      to_cell(&Data::DateTimeIso("2023-03-15T10:00:00".into())),
      Cell::DateTime(_)
    ));
    assert_eq!(
      to_cell(&Data::DateTimeIso("later".into())),
      Cell::Text("later".into())
    );
  }

  #[test]
  fn first_row_is_headers() {
    let mut range = Range::new((0, 0), (2, 1));
    range.set_value((0, 0), Data::String("NPM".into()));
    range.set_value((0, 1), Data::String("Nama".into()));
    range.set_value((1, 0), Data::Float(1.0));
    range.set_value((1, 1), Data::String("Ani".into()));
    range.set_value((2, 0), Data::Float(2.0));

    let sheet = range_to_sheet(&range);
    assert_eq!(sheet.headers, vec![Cell::from("NPM"), Cell::from("Nama")]);
    assert_eq!(sheet.rows.len(), 2);
    assert_eq!(sheet.rows[1], vec![Cell::Float(2.0), Cell::Empty]);
  }

  #[test]
  fn blank_first_row_means_no_headers() {
    let mut range = Range::new((1, 0), (2, 0));
    range.set_value((1, 0), Data::String("NPM".into()));
    range.set_value((2, 0), Data::Float(1.0));

    let sheet = range_to_sheet(&range);
    assert!(sheet.headers.is_empty());
    assert_eq!(sheet.rows.len(), 2);
  }
}
