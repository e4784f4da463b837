//! Graduation period extraction from export file names.
//!
//! The period is part of every record's key but never appears inside the
//! spreadsheet, so a file whose name does not carry it cannot be loaded.

use std::sync::LazyLock;

use regex::Regex;

use crate::{Error, Result};

static PERIODE_RE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"(?i)periode\s*(\d+)").expect("static regex is valid")
});

/// Find `periode <n>` (any case, optional whitespace) in `file_name`.
pub fn parse_periode(file_name: &str) -> Option<i64> {
  PERIODE_RE
    .captures(file_name)
    .and_then(|caps| caps.get(1))
    .and_then(|m| m.as_str().parse().ok())
}

/// Like [`parse_periode`], but a missing period is an error.
pub fn require_periode(file_name: &str) -> Result<i64> {
  parse_periode(file_name).ok_or_else(|| Error::MissingPeriod(file_name.to_owned()))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn finds_period_in_typical_names() {
    assert_eq!(parse_periode("Data Periode 7.xlsx"), Some(7));
    assert_eq!(parse_periode("peserta wisuda PERIODE 112 final.xlsx"), Some(112));
    assert_eq!(parse_periode("periode12.xlsx"), Some(12));
    assert_eq!(parse_periode("Periode\t3 (revisi).xlsx"), Some(3));
  }

  #[test]
  fn first_match_wins() {
    assert_eq!(parse_periode("periode 4 - salinan periode 5.xlsx"), Some(4));
  }

  #[test]
  fn missing_period_is_none() {
    assert_eq!(parse_periode("Data Wisuda.xlsx"), None);
    assert_eq!(parse_periode("periode.xlsx"), None);
    assert_eq!(parse_periode("period 7.xlsx"), None);
  }

  #[test]
  fn require_reports_file_name() {
    let err = require_periode("Data Wisuda.xlsx").unwrap_err();
    assert!(matches!(err, Error::MissingPeriod(ref f) if f == "Data Wisuda.xlsx"));
  }
}
