//! End-to-end loading tests against an in-memory store.

use std::path::{Path, PathBuf};

use rust_xlsxwriter::{ExcelDateTime, Format, Workbook};
use wisuda_core::{
  column::Column,
  ingest::Sheet,
  store::{ParticipantStore, Table},
  value::{Cell, Value},
};
use wisuda_store_sqlite::SqliteStore;

use crate::{Error, LoaderConfig, discover_files, load_file, load_paths, load_sheet};

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn sheet(headers: &[&str], rows: &[&[&str]]) -> Sheet {
  Sheet {
    headers: headers.iter().map(|h| Cell::from(*h)).collect(),
    rows:    rows
      .iter()
      .map(|r| r.iter().map(|c| Cell::from(*c)).collect())
      .collect(),
  }
}

/// Write a one-sheet workbook of string cells.
fn write_xlsx(path: &Path, rows: &[&[&str]]) {
  let mut workbook = Workbook::new();
  let ws = workbook.add_worksheet();
  for (r, row) in rows.iter().enumerate() {
    for (c, value) in row.iter().enumerate() {
      if !value.is_empty() {
        ws.write_string(r as u32, c as u16, *value).unwrap();
      }
    }
  }
  workbook.save(path).unwrap();
}

// ─── Scenarios ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn valid_participant_lands_in_both_tables() {
  let s = store().await;
  let sh = sheet(&["NPM", "Nama", "Peserta Valid"], &[&["12345", "Budi", "Valid"]]);

  let report = load_sheet(&s, "Data Periode 7.xlsx", &sh).await.unwrap();
  assert_eq!(report.rows, 1);
  assert_eq!(report.periode, 7);

  let norm = s.get_normalized("12345", 7).await.unwrap().unwrap();
  assert_eq!(norm.get(Column::PesertaValid), &Value::Bool(true));
  let raw = s.get_raw("12345", 7).await.unwrap().unwrap();
  assert_eq!(raw.get(Column::PesertaValid).as_deref(), Some("Valid"));
  assert_eq!(raw.get(Column::Nama).as_deref(), Some("Budi"));
}

#[tokio::test]
async fn reloading_changed_file_overwrites() {
  let s = store().await;
  let headers = ["NPM", "Nama", "Peserta Valid"];

  load_sheet(&s, "Data Periode 7.xlsx", &sheet(&headers, &[&["12345", "Budi", "Valid"]]))
    .await
    .unwrap();
  load_sheet(
    &s,
    "Data Periode 7.xlsx",
    &sheet(&headers, &[&["12345", "Budi", "Tidak Valid"]]),
  )
  .await
  .unwrap();

  let norm = s.get_normalized("12345", 7).await.unwrap().unwrap();
  assert_eq!(norm.get(Column::PesertaValid), &Value::Bool(false));
  assert_eq!(s.count_by_period(Table::Normalized).await.unwrap(), vec![(7, 1)]);
  assert_eq!(s.count_by_period(Table::Raw).await.unwrap(), vec![(7, 1)]);
}

#[tokio::test]
async fn reloading_identical_file_is_idempotent() {
  let s = store().await;
  let sh = sheet(
    &["NPM", "Nama", "IPK", "Tanggal Lulus", "SKS"],
    &[
      &["1", "Ani", "3,75", "15/03/2023", "144"],
      &["2", "Budi", "x", "", "146,0"],
    ],
  );

  load_sheet(&s, "periode 3.xlsx", &sh).await.unwrap();
  let first = (
    s.get_raw("1", 3).await.unwrap(),
    s.get_normalized("1", 3).await.unwrap(),
    s.get_raw("2", 3).await.unwrap(),
    s.get_normalized("2", 3).await.unwrap(),
  );

  load_sheet(&s, "periode 3.xlsx", &sh).await.unwrap();
  let second = (
    s.get_raw("1", 3).await.unwrap(),
    s.get_normalized("1", 3).await.unwrap(),
    s.get_raw("2", 3).await.unwrap(),
    s.get_normalized("2", 3).await.unwrap(),
  );

  assert_eq!(first, second);
  assert_eq!(s.count_by_period(Table::Raw).await.unwrap(), vec![(3, 2)]);

  let budi = second.3.unwrap();
  assert!(budi.get(Column::Ipk).is_null());
  assert!(budi.get(Column::TanggalLulus).is_null());
  assert_eq!(budi.get(Column::Sks), &Value::Int(146));
}

#[tokio::test]
async fn blank_npm_row_is_absent_from_both_tables() {
  let s = store().await;
  let sh = sheet(&["NPM", "Nama"], &[&["", "Hantu"], &["5", "Ada"]]);

  let report = load_sheet(&s, "periode 2.xlsx", &sh).await.unwrap();
  assert_eq!(report.rows, 1);
  assert_eq!(report.dropped, 1);

  assert!(s.get_raw("", 2).await.unwrap().is_none());
  assert!(s.get_normalized("", 2).await.unwrap().is_none());
  assert_eq!(s.count_by_period(Table::Raw).await.unwrap(), vec![(2, 1)]);
  assert_eq!(s.count_by_period(Table::Normalized).await.unwrap(), vec![(2, 1)]);
}

#[tokio::test]
async fn file_without_survivors_is_not_an_error() {
  let s = store().await;
  let sh = sheet(&["NPM", "Nama"], &[&["", "Hantu"]]);

  let report = load_sheet(&s, "periode 2.xlsx", &sh).await.unwrap();
  assert_eq!(report.rows, 0);
  assert!(s.list_periods(Table::Raw).await.unwrap().is_empty());
}

#[tokio::test]
async fn unknown_headers_are_reported() {
  let s = store().await;
  let sh = sheet(&["NPM", "Nomor Ijazah"], &[&["1", "X-1"]]);

  let report = load_sheet(&s, "periode 1.xlsx", &sh).await.unwrap();
  assert_eq!(report.unknown_headers, vec!["Nomor Ijazah".to_owned()]);
  assert_eq!(report.rows, 1);
}

#[tokio::test]
async fn fatal_errors_write_nothing() {
  let s = store().await;

  let err = load_sheet(&s, "wisuda.xlsx", &sheet(&["NPM"], &[&["1"]]))
    .await
    .unwrap_err();
  assert!(matches!(err, Error::Ingest(wisuda_core::Error::MissingPeriod(_))));

  let err = load_sheet(&s, "periode 1.xlsx", &sheet(&["Nama"], &[&["Ani"]]))
    .await
    .unwrap_err();
  assert!(matches!(err, Error::Ingest(wisuda_core::Error::MissingIdColumn)));

  assert!(s.list_periods(Table::Raw).await.unwrap().is_empty());
}

// ─── Files on disk ───────────────────────────────────────────────────────────

#[tokio::test]
async fn load_file_reads_workbook() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("Data Periode 7.xlsx");
  write_xlsx(
    &path,
    &[&["NPM", "Nama", "Peserta Valid"], &["12345", "Budi", "Valid"], &["", "Kosong", ""]],
  );

  let s = store().await;
  let report = load_file(&s, &path).await.unwrap();
  assert_eq!(report.file, "Data Periode 7.xlsx");
  assert_eq!(report.rows, 1);

  let norm = s.get_normalized("12345", 7).await.unwrap().unwrap();
  assert_eq!(norm.is_valid_participant(), Some(true));
}

#[tokio::test]
async fn native_date_cells_keep_their_date() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("periode 4.xlsx");

  let mut workbook = Workbook::new();
  let ws = workbook.add_worksheet();
  ws.write_string(0, 0, "NPM").unwrap();
  ws.write_string(0, 1, "Tanggal Lulus").unwrap();
  ws.write_string(1, 0, "77").unwrap();
  let lulus = ExcelDateTime::from_ymd(2023, 3, 15).unwrap();
  ws.write_datetime_with_format(1, 1, &lulus, &Format::new().set_num_format("dd/mm/yyyy"))
    .unwrap();
  workbook.save(&path).unwrap();

  let s = store().await;
  load_file(&s, &path).await.unwrap();

  let raw = s.get_raw("77", 4).await.unwrap().unwrap();
  assert_eq!(raw.get(Column::TanggalLulus).as_deref(), Some("2023-03-15"));
  let norm = s.get_normalized("77", 4).await.unwrap().unwrap();
  assert_eq!(
    norm.get(Column::TanggalLulus),
    &Value::Date(chrono::NaiveDate::from_ymd_opt(2023, 3, 15).unwrap())
  );
}

#[tokio::test]
async fn load_file_checks_name_before_opening() {
  let s = store().await;
  let err = load_file(&s, Path::new("/does/not/exist.xlsx")).await.unwrap_err();
  assert!(matches!(err, Error::Ingest(wisuda_core::Error::MissingPeriod(_))));
}

#[tokio::test]
async fn load_paths_stops_or_continues_on_failure() {
  let dir = tempfile::tempdir().unwrap();
  let good_a = dir.path().join("periode 1.xlsx");
  let bad = dir.path().join("tanpa nomor.xlsx");
  let good_b = dir.path().join("periode 2.xlsx");
  write_xlsx(&good_a, &[&["NPM"], &["a"]]);
  write_xlsx(&bad, &[&["NPM"], &["b"]]);
  write_xlsx(&good_b, &[&["NPM"], &["c"], &["d"]]);
  let paths: Vec<PathBuf> = vec![good_a, bad, good_b];

  let s = store().await;
  assert!(load_paths(&s, &paths, false).await.is_err());
  assert_eq!(s.list_periods(Table::Raw).await.unwrap(), vec![1]);

  let s = store().await;
  let summary = load_paths(&s, &paths, true).await.unwrap();
  assert_eq!(summary.files.len(), 2);
  assert_eq!(summary.failed.len(), 1);
  assert_eq!(summary.total_rows(), 3);
  assert_eq!(s.list_periods(Table::Normalized).await.unwrap(), vec![1, 2]);
}

#[test]
fn discover_finds_sorted_xlsx_only() {
  let dir = tempfile::tempdir().unwrap();
  for name in [
    "periode 2.xlsx",
    "periode 1.XLSX",
    "~$periode 1.xlsx",
    "notes.txt",
    "periode 3.csv",
  ] {
    std::fs::write(dir.path().join(name), b"").unwrap();
  }
  std::fs::create_dir(dir.path().join("sub.xlsx")).unwrap();

  let found = discover_files(dir.path()).unwrap();
  let names: Vec<String> = found
    .iter()
    .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
    .collect();
  assert_eq!(names, vec!["periode 1.XLSX", "periode 2.xlsx"]);
}

#[test]
fn discover_missing_dir_is_an_error() {
  let err = discover_files(Path::new("/definitely/not/here")).unwrap_err();
  assert!(matches!(err, Error::ReadDir { .. }));
}

#[test]
fn config_file_overrides_defaults() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("wisuda.toml");
  std::fs::write(&path, "store_path = \"/tmp/w.db\"\nkeep_going = true\n").unwrap();

  let cfg = LoaderConfig::load(&path).unwrap();
  assert_eq!(cfg.store_path, PathBuf::from("/tmp/w.db"));
  assert!(cfg.keep_going);
  assert_eq!(cfg.data_dir, PathBuf::from("history_peserta_wisuda"));
}

#[test]
fn missing_config_file_uses_defaults() {
  let dir = tempfile::tempdir().unwrap();
  let cfg = LoaderConfig::load(&dir.path().join("absent.toml")).unwrap();
  assert_eq!(cfg.store_path, PathBuf::from("history_peserta_wisuda.db"));
  assert!(!cfg.keep_going);
}
