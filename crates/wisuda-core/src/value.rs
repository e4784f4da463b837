//! Cell values as read from a spreadsheet, and typed values as stored in the
//! normalized table.

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

/// A spreadsheet cell with its native type preserved where the source format
/// has one.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
  Empty,
  Bool(bool),
  Int(i64),
  Float(f64),
  Text(String),
  Date(NaiveDate),
  DateTime(NaiveDateTime),
}

impl From<&str> for Cell {
  fn from(s: &str) -> Self { Cell::Text(s.to_owned()) }
}

impl From<String> for Cell {
  fn from(s: String) -> Self { Cell::Text(s) }
}

impl From<f64> for Cell {
  fn from(f: f64) -> Self { Cell::Float(f) }
}

impl From<i64> for Cell {
  fn from(i: i64) -> Self { Cell::Int(i) }
}

impl From<bool> for Cell {
  fn from(b: bool) -> Self { Cell::Bool(b) }
}

/// A coerced value in the normalized table. `Null` stands for "absent or
/// unparseable".
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
  #[default]
  Null,
  Text(String),
  Bool(bool),
  Int(i64),
  Float(f64),
  Date(NaiveDate),
}

impl Value {
  pub fn is_null(&self) -> bool { matches!(self, Value::Null) }

  pub fn as_bool(&self) -> Option<bool> {
    match self {
      Value::Bool(b) => Some(*b),
      _ => None,
    }
  }
}

impl<T: Into<Value>> From<Option<T>> for Value {
  fn from(opt: Option<T>) -> Self { opt.map_or(Value::Null, Into::into) }
}

impl From<String> for Value {
  fn from(s: String) -> Self { Value::Text(s) }
}

impl From<bool> for Value {
  fn from(b: bool) -> Self { Value::Bool(b) }
}

impl From<i64> for Value {
  fn from(i: i64) -> Self { Value::Int(i) }
}

impl From<f64> for Value {
  fn from(f: f64) -> Self { Value::Float(f) }
}

impl From<NaiveDate> for Value {
  fn from(d: NaiveDate) -> Self { Value::Date(d) }
}
