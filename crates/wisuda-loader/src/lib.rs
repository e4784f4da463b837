//! Batch loader for graduation participant exports.
//!
//! Reads each spreadsheet, normalizes it with [`wisuda_core::ingest`], and
//! writes the result through any [`ParticipantStore`]. Files are processed
//! one at a time; each file is its own transaction.

pub mod error;

pub use error::{Error, Result};

use std::path::{Path, PathBuf};

use serde::Deserialize;
use wisuda_core::{ingest::Sheet, store::ParticipantStore};

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime loader configuration, deserialised from `wisuda.toml` and
/// `WISUDA_*` environment variables.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
  /// SQLite database file.
  pub store_path: PathBuf,
  /// Directory scanned for `*.xlsx` exports when no files are named.
  pub data_dir:   PathBuf,
  /// Log and skip files that fail instead of stopping the run.
  pub keep_going: bool,
}

impl Default for LoaderConfig {
  fn default() -> Self {
    Self {
      store_path: PathBuf::from("history_peserta_wisuda.db"),
      data_dir:   PathBuf::from("history_peserta_wisuda"),
      keep_going: false,
    }
  }
}

impl LoaderConfig {
  /// Layer the optional TOML file at `path` under `WISUDA_*` variables.
  pub fn load(path: &Path) -> Result<Self> {
    let settings = config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(config::Environment::with_prefix("WISUDA"))
      .build()?;
    let mut cfg: LoaderConfig = settings.try_deserialize()?;
    cfg.store_path = expand_tilde(&cfg.store_path);
    cfg.data_dir = expand_tilde(&cfg.data_dir);
    Ok(cfg)
  }
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

// ─── Reports ──────────────────────────────────────────────────────────────────

/// Outcome of loading one file.
#[derive(Debug, Clone)]
pub struct FileReport {
  pub file:            String,
  pub periode:         i64,
  /// Rows written to each table.
  pub rows:            usize,
  /// Rows skipped for lacking an `npm`.
  pub dropped:         usize,
  pub unknown_headers: Vec<String>,
}

/// Outcome of a whole run.
#[derive(Debug, Default)]
pub struct RunSummary {
  pub files:  Vec<FileReport>,
  /// Files skipped under `keep_going`, with the reason.
  pub failed: Vec<(PathBuf, String)>,
}

impl RunSummary {
  pub fn total_rows(&self) -> usize { self.files.iter().map(|f| f.rows).sum() }
}

// ─── Loading ──────────────────────────────────────────────────────────────────

/// Normalize an already-read sheet and persist it.
///
/// `file_name` is only used for the period and for log messages.
pub async fn load_sheet<S>(store: &S, file_name: &str, sheet: &Sheet) -> Result<FileReport>
where
  S: ParticipantStore,
{
  let prepared = wisuda_core::ingest::prepare(file_name, sheet)?;

  if !prepared.unknown_headers.is_empty() {
    tracing::warn!(
      file = file_name,
      headers = ?prepared.unknown_headers,
      "unrecognised columns ignored"
    );
  }
  if prepared.dropped > 0 {
    tracing::debug!(file = file_name, dropped = prepared.dropped, "rows without npm skipped");
  }

  let rows = store
    .upsert_batch(prepared.batch)
    .await
    .map_err(Error::store)?;

  Ok(FileReport {
    file: file_name.to_owned(),
    periode: prepared.periode,
    rows,
    dropped: prepared.dropped,
    unknown_headers: prepared.unknown_headers,
  })
}

/// Read the spreadsheet at `path` and persist it.
pub async fn load_file<S>(store: &S, path: &Path) -> Result<FileReport>
where
  S: ParticipantStore,
{
  let file_name = path
    .file_name()
    .map(|n| n.to_string_lossy().into_owned())
    .ok_or_else(|| Error::NoFileName(path.to_path_buf()))?;

  // Fail on the name before paying for the read.
  wisuda_core::period::require_periode(&file_name)?;

  let sheet = wisuda_xlsx::read_sheet(path)?;
  load_sheet(store, &file_name, &sheet).await
}

/// Load `paths` in order.
///
/// Without `keep_going` the first failing file aborts the run; files before
/// it stay committed. With `keep_going` failures are logged and collected in
/// [`RunSummary::failed`].
pub async fn load_paths<S>(store: &S, paths: &[PathBuf], keep_going: bool) -> Result<RunSummary>
where
  S: ParticipantStore,
{
  let mut summary = RunSummary::default();

  for path in paths {
    match load_file(store, path).await {
      Ok(report) => {
        tracing::info!(
          file = %report.file,
          periode = report.periode,
          rows = report.rows,
          "loaded"
        );
        summary.files.push(report);
      }
      Err(e) if keep_going => {
        tracing::warn!(file = %path.display(), error = %e, "skipped");
        summary.failed.push((path.clone(), e.to_string()));
      }
      Err(e) => return Err(e),
    }
  }

  tracing::info!(
    files = summary.files.len(),
    rows = summary.total_rows(),
    "done"
  );
  Ok(summary)
}

/// Every `*.xlsx` file directly inside `dir`, sorted by path. Office lock
/// files (`~$…`) are skipped.
pub fn discover_files(dir: &Path) -> Result<Vec<PathBuf>> {
  let entries = std::fs::read_dir(dir).map_err(|source| Error::ReadDir {
    path: dir.to_path_buf(),
    source,
  })?;

  let mut files: Vec<PathBuf> = entries
    .filter_map(|entry| entry.ok().map(|e| e.path()))
    .filter(|p| p.is_file())
    .filter(|p| {
      p.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("xlsx"))
    })
    .filter(|p| {
      p.file_name()
        .is_some_and(|n| !n.to_string_lossy().starts_with("~$"))
    })
    .collect();

  files.sort();
  Ok(files)
}

#[cfg(test)]
mod tests;
