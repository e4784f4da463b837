//! Spreadsheet-to-record normalization.
//!
//! Pipeline:
//!   file name ─ require_periode() → periode
//!   header row ─ HeaderMap::from_headers() → column index → Target
//!   data rows ─ extract_row() → (RawRecord, NormalizedRecord) or dropped
//!     └─ collected into a Batch, ready for one atomic upsert

use crate::{
  Error, Result,
  coerce::to_text,
  column::{Target, lookup, normalize_label},
  period::require_periode,
  record::{Batch, NormalizedRecord, RawRecord},
  value::Cell,
};

// ─── Sheet ───────────────────────────────────────────────────────────────────

/// The first worksheet of an export: header cells and the rows below them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sheet {
  pub headers: Vec<Cell>,
  pub rows:    Vec<Vec<Cell>>,
}

// ─── Header mapping ──────────────────────────────────────────────────────────

/// Column index → schema target for one sheet.
#[derive(Debug, Clone)]
pub struct HeaderMap {
  targets: Vec<Option<Target>>,
  unknown: Vec<String>,
}

impl HeaderMap {
  /// Map every header cell through the dictionary.
  ///
  /// Non-empty labels the dictionary does not know are collected in
  /// [`HeaderMap::unknown`] and their columns ignored. Fails if no column
  /// maps to `npm`.
  pub fn from_headers(headers: &[Cell]) -> Result<Self> {
    let mut targets = Vec::with_capacity(headers.len());
    let mut unknown = Vec::new();

    for cell in headers {
      let label = to_text(cell).unwrap_or_default();
      let key = normalize_label(&label);
      let target = lookup(&key);
      if target.is_none() && !key.is_empty() {
        unknown.push(label);
      }
      targets.push(target);
    }

    if !targets.contains(&Some(Target::Npm)) {
      return Err(Error::MissingIdColumn);
    }

    Ok(Self { targets, unknown })
  }

  /// Original labels of the headers that were skipped.
  pub fn unknown(&self) -> &[String] { &self.unknown }

  pub fn target(&self, index: usize) -> Option<Target> {
    self.targets.get(index).copied().flatten()
  }
}

// ─── Row extraction ──────────────────────────────────────────────────────────

/// Turn one data row into its raw and normalized records.
///
/// Returns `None` when the row has no usable `npm`. Cells past the last
/// header, and cells under unmapped headers, are ignored. When two headers
/// map to the same column the rightmost one wins.
pub fn extract_row(
  periode: i64,
  headers: &HeaderMap,
  row: &[Cell],
) -> Option<(RawRecord, NormalizedRecord)> {
  let mut npm: Option<String> = None;
  let mut raw = RawRecord::empty("", periode);
  let mut normalized = NormalizedRecord::empty("", periode);

  for (index, cell) in row.iter().enumerate() {
    match headers.target(index) {
      None => continue,
      Some(Target::Npm) => {
        npm = to_text(cell).map(|s| s.trim().to_owned());
      }
      Some(Target::Attr(column)) => {
        raw.set(column, to_text(cell));
        normalized.set(column, column.kind().coerce(cell));
      }
    }
  }

  let npm = npm.filter(|s| !s.is_empty())?;
  raw.npm = npm.clone();
  normalized.npm = npm;
  Some((raw, normalized))
}

// ─── Whole file ──────────────────────────────────────────────────────────────

/// Everything derived from one file before it touches the store.
#[derive(Debug, Clone)]
pub struct PreparedFile {
  pub periode:         i64,
  pub batch:           Batch,
  pub unknown_headers: Vec<String>,
  /// Data rows dropped for lacking an `npm`.
  pub dropped:         usize,
}

/// Run the whole normalization for one sheet named `file_name`.
pub fn prepare(file_name: &str, sheet: &Sheet) -> Result<PreparedFile> {
  let periode = require_periode(file_name)?;
  let headers = HeaderMap::from_headers(&sheet.headers)?;

  let mut batch = Batch::default();
  let mut dropped = 0;
  for row in &sheet.rows {
    match extract_row(periode, &headers, row) {
      Some((raw, normalized)) => batch.push(raw, normalized),
      None => dropped += 1,
    }
  }

  Ok(PreparedFile {
    periode,
    batch,
    unknown_headers: headers.unknown,
    dropped,
  })
}

#[cfg(test)]
mod tests {
  use chrono::NaiveDate;

  use super::*;
  use crate::{column::Column, value::Value};

  fn cells(values: &[&str]) -> Vec<Cell> {
    values.iter().map(|v| Cell::from(*v)).collect()
  }

  fn sheet(headers: &[&str], rows: Vec<Vec<Cell>>) -> Sheet {
    Sheet { headers: cells(headers), rows }
  }

  #[test]
  fn single_valid_participant() {
    let s = sheet(
      &["NPM", "Nama", "Peserta Valid"],
      vec![cells(&["12345", "Budi", "Valid"])],
    );
    let prepared = prepare("Data Periode 7.xlsx", &s).unwrap();

    assert_eq!(prepared.periode, 7);
    assert_eq!(prepared.batch.len(), 1);
    let raw = &prepared.batch.raw[0];
    let norm = &prepared.batch.normalized[0];
    assert_eq!(raw.npm, "12345");
    assert_eq!(norm.npm, "12345");
    assert_eq!(raw.periode, 7);
    assert_eq!(raw.get(Column::PesertaValid).as_deref(), Some("Valid"));
    assert_eq!(norm.get(Column::PesertaValid), &Value::Bool(true));
    assert_eq!(norm.is_valid_participant(), Some(true));
    assert_eq!(norm.get(Column::Nama), &Value::Text("Budi".into()));
    assert!(norm.get(Column::Ipk).is_null());
  }

  #[test]
  fn rows_without_npm_are_dropped() {
    let s = sheet(
      &["NPM", "Nama"],
      vec![
        cells(&["", "Kosong"]),
        cells(&["   ", "Spasi"]),
        vec![Cell::Empty, Cell::from("Tanpa")],
        cells(&["2001", "Ada"]),
        vec![],
      ],
    );
    let prepared = prepare("periode 1.xlsx", &s).unwrap();
    assert_eq!(prepared.batch.len(), 1);
    assert_eq!(prepared.dropped, 4);
    assert_eq!(prepared.batch.raw[0].npm, "2001");
  }

  #[test]
  fn npm_is_trimmed_and_numeric_npm_is_not_fractional() {
    let s = sheet(
      &["npm"],
      vec![cells(&["  A-77 "]), vec![Cell::Float(190001.0)]],
    );
    let prepared = prepare("periode 2.xlsx", &s).unwrap();
    assert_eq!(prepared.batch.raw[0].npm, "A-77");
    assert_eq!(prepared.batch.raw[1].npm, "190001");
    assert_eq!(prepared.batch.normalized[1].npm, "190001");
  }

  #[test]
  fn unknown_headers_are_reported_and_ignored() {
    let s = sheet(
      &["NPM", "No. Ijazah", "", "Nama"],
      vec![cells(&["1", "XYZ-9", "junk", "Ani"])],
    );
    let prepared = prepare("periode 3.xlsx", &s).unwrap();
    assert_eq!(prepared.unknown_headers, vec!["No. Ijazah".to_owned()]);
    let norm = &prepared.batch.normalized[0];
    assert_eq!(norm.get(Column::Nama), &Value::Text("Ani".into()));
    assert_eq!(
      norm.values().iter().filter(|v| !v.is_null()).count(),
      1,
      "only nama is set"
    );
  }

  #[test]
  fn missing_npm_column_is_fatal() {
    let s = sheet(&["Nama", "Prodi"], vec![cells(&["Budi", "TI"])]);
    let err = prepare("periode 3.xlsx", &s).unwrap_err();
    assert!(matches!(err, Error::MissingIdColumn));
  }

  #[test]
  fn missing_period_is_fatal() {
    let s = sheet(&["NPM"], vec![cells(&["1"])]);
    let err = prepare("wisuda.xlsx", &s).unwrap_err();
    assert!(matches!(err, Error::MissingPeriod(_)));
  }

  #[test]
  fn typed_columns_are_coerced() {
    let s = sheet(
      &[
        "NPM",
        "Tanggal Lahir",
        "SKS",
        "IPK",
        "Masa Studi Tahun",
        "Approve UPT",
        "Mhs Angkatan",
      ],
      vec![vec![
        Cell::from("9"),
        Cell::from("15/03/2001"),
        Cell::Float(144.0),
        Cell::from("3,41"),
        Cell::Float(4.5),
        Cell::from("x"),
        Cell::Float(2019.0),
      ]],
    );
    let prepared = prepare("periode 9.xlsx", &s).unwrap();
    let raw = &prepared.batch.raw[0];
    let norm = &prepared.batch.normalized[0];

    assert_eq!(
      norm.get(Column::TanggalLahir),
      &Value::Date(NaiveDate::from_ymd_opt(2001, 3, 15).unwrap())
    );
    assert_eq!(raw.get(Column::TanggalLahir).as_deref(), Some("15/03/2001"));
    assert_eq!(norm.get(Column::Sks), &Value::Int(144));
    assert_eq!(raw.get(Column::Sks).as_deref(), Some("144"));
    assert_eq!(norm.get(Column::Ipk), &Value::Float(3.41));
    assert_eq!(norm.get(Column::MasaStudiTahun), &Value::Float(4.5));
    assert_eq!(norm.get(Column::ApproveUpt), &Value::Bool(false));
    assert_eq!(norm.get(Column::MhsAngkatan), &Value::Text("2019".into()));
  }

  #[test]
  fn rightmost_duplicate_header_wins() {
    let s = sheet(&["NPM", "Angkatan", "Mhs Angkatan"], vec![cells(&["1", "2018", "2019"])]);
    let prepared = prepare("periode 1.xlsx", &s).unwrap();
    assert_eq!(
      prepared.batch.raw[0].get(Column::MhsAngkatan).as_deref(),
      Some("2019")
    );
  }

  #[test]
  fn header_only_sheet_yields_empty_batch() {
    let s = sheet(&["NPM", "Nama"], vec![]);
    let prepared = prepare("periode 5.xlsx", &s).unwrap();
    assert!(prepared.batch.is_empty());
    assert_eq!(prepared.dropped, 0);
  }
}
