//! Total conversions from spreadsheet cells to stored values.
//!
//! None of these functions fail: anything that cannot be interpreted becomes
//! `None` / [`Value::Null`]. Spreadsheet exports are dirty and a partially
//! filled record is still worth keeping.

use chrono::{NaiveDate, TimeDelta};

use crate::{
  column::ColumnKind,
  value::{Cell, Value},
};

/// Excel's day zero. Serial 1 is 1899-12-31 and serial 60 is the phantom
/// 1900-02-29, so counting from the 30th keeps every later date correct.
const EXCEL_EPOCH: (i32, u32, u32) = (1899, 12, 30);

const DATE_FORMATS: [&str; 3] = ["%Y-%m-%d", "%d/%m/%Y", "%d-%m-%Y"];

const UNKNOWN_TOKENS: [&str; 4] = ["", "-", "n/a", "na"];
const VALID_TOKENS: [&str; 1] = ["valid"];
const INVALID_TOKENS: [&str; 5] =
  ["tidak valid", "tdk valid", "invalid", "not valid", "tidak_valid"];
const YES_TOKENS: [&str; 10] =
  ["y", "yes", "ya", "true", "1", "t", "v", "ok", "✓", "✔"];
const NO_TOKENS: [&str; 7] = ["n", "no", "tidak", "false", "0", "f", "x"];

// ─── Text ────────────────────────────────────────────────────────────────────

/// Display form of a cell, as stored in the raw table.
///
/// Strings pass through untouched, dates render as `YYYY-MM-DD`, and
/// whole-number floats drop their fractional part (`12345`, not `12345.0`).
pub fn to_text(cell: &Cell) -> Option<String> {
  match cell {
    Cell::Empty => None,
    Cell::Text(s) => Some(s.clone()),
    Cell::Bool(true) => Some("True".to_owned()),
    Cell::Bool(false) => Some("False".to_owned()),
    Cell::Int(i) => Some(i.to_string()),
    Cell::Float(f) => Some(format_float(*f)),
    Cell::Date(d) => Some(d.format("%Y-%m-%d").to_string()),
    Cell::DateTime(dt) => Some(dt.format("%Y-%m-%d").to_string()),
  }
}

fn format_float(f: f64) -> String {
  if f.is_finite() && f.fract() == 0.0 && f.abs() < 1e15 {
    format!("{}", f as i64)
  } else {
    f.to_string()
  }
}

// ─── Boolean ─────────────────────────────────────────────────────────────────

/// Interpret a cell as a yes/no flag. Unrecognised tokens are unknown, not
/// false.
pub fn to_bool(cell: &Cell) -> Option<bool> {
  let text = match cell {
    Cell::Empty => return None,
    Cell::Bool(b) => return Some(*b),
    Cell::Int(i) => return Some(*i != 0),
    Cell::Float(f) => return Some(*f != 0.0),
    other => to_text(other)?,
  };

  let token = text.trim().to_lowercase();
  let token = token.as_str();
  if UNKNOWN_TOKENS.contains(&token) {
    None
  } else if VALID_TOKENS.contains(&token) || YES_TOKENS.contains(&token) {
    Some(true)
  } else if INVALID_TOKENS.contains(&token) || NO_TOKENS.contains(&token) {
    Some(false)
  } else {
    None
  }
}

// ─── Date ────────────────────────────────────────────────────────────────────

/// Interpret a cell as a calendar date.
///
/// Numbers are Excel serial dates (whole days after 1899-12-30); text is
/// tried as `YYYY-MM-DD`, `DD/MM/YYYY` and `DD-MM-YYYY` in that order.
pub fn to_date(cell: &Cell) -> Option<NaiveDate> {
  match cell {
    Cell::Date(d) => Some(*d),
    Cell::DateTime(dt) => Some(dt.date()),
    Cell::Int(i) => from_excel_serial(*i),
    Cell::Float(f) if f.is_finite() => from_excel_serial(f.trunc() as i64),
    Cell::Text(s) => {
      let text = s.trim();
      if text.is_empty() {
        return None;
      }
      DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(text, fmt).ok())
    }
    _ => None,
  }
}

fn from_excel_serial(days: i64) -> Option<NaiveDate> {
  let (y, m, d) = EXCEL_EPOCH;
  NaiveDate::from_ymd_opt(y, m, d)?.checked_add_signed(TimeDelta::try_days(days)?)
}

// ─── Numbers ─────────────────────────────────────────────────────────────────

/// Interpret a cell as a number, reading text with Indonesian separators:
/// `.` groups thousands and `,` marks the decimal (`"1.234,56"` → 1234.56).
pub fn to_number(cell: &Cell) -> Option<f64> {
  let parsed = match cell {
    Cell::Empty | Cell::Date(_) | Cell::DateTime(_) => return None,
    Cell::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
    Cell::Int(i) => Some(*i as f64),
    Cell::Float(f) => Some(*f),
    Cell::Text(s) => {
      let text = s.trim();
      if text.is_empty() {
        return None;
      }
      text.replace('.', "").replace(',', ".").parse::<f64>().ok()
    }
  };
  parsed.filter(|f| f.is_finite())
}

/// [`to_number`] truncated toward zero.
pub fn to_int(cell: &Cell) -> Option<i64> {
  to_number(cell).map(|f| f.trunc() as i64)
}

// ─── Dispatch ────────────────────────────────────────────────────────────────

impl ColumnKind {
  /// The coercer that produces this kind's normalized value.
  pub fn coercer(self) -> fn(&Cell) -> Value {
    match self {
      ColumnKind::Text => text_value,
      ColumnKind::Bool => bool_value,
      ColumnKind::Date => date_value,
      ColumnKind::Int => int_value,
      ColumnKind::Float => float_value,
    }
  }

  pub fn coerce(self, cell: &Cell) -> Value { (self.coercer())(cell) }
}

fn text_value(cell: &Cell) -> Value { to_text(cell).into() }

fn bool_value(cell: &Cell) -> Value { to_bool(cell).into() }

fn date_value(cell: &Cell) -> Value { to_date(cell).into() }

fn int_value(cell: &Cell) -> Value { to_int(cell).into() }

fn float_value(cell: &Cell) -> Value { to_number(cell).into() }
