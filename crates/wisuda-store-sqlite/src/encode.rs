//! Encoding and decoding helpers between domain values and SQLite column
//! values.
//!
//! Timestamps are stored as RFC 3339 strings, dates as `YYYY-MM-DD`, booleans
//! as 0/1 integers.

use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::types::Value as SqlValue;
use wisuda_core::{
  column::{Column, ColumnKind},
  record::{NormalizedRecord, RawRecord},
  value::Value,
};

use crate::{Error, Result};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── NaiveDate ───────────────────────────────────────────────────────────────

pub fn encode_date(d: NaiveDate) -> String { d.format("%Y-%m-%d").to_string() }

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s, "%Y-%m-%d")
    .map_err(|e| Error::DateParse(format!("{s:?}: {e}")))
}

// ─── Value ───────────────────────────────────────────────────────────────────

pub fn encode_value(v: &Value) -> SqlValue {
  match v {
    Value::Null => SqlValue::Null,
    Value::Text(s) => SqlValue::Text(s.clone()),
    Value::Bool(b) => SqlValue::Integer(i64::from(*b)),
    Value::Int(i) => SqlValue::Integer(*i),
    Value::Float(f) => SqlValue::Real(*f),
    Value::Date(d) => SqlValue::Text(encode_date(*d)),
  }
}

pub fn encode_text(v: &Option<String>) -> SqlValue {
  v.clone().map_or(SqlValue::Null, SqlValue::Text)
}

fn type_name(v: &SqlValue) -> &'static str {
  match v {
    SqlValue::Null => "null",
    SqlValue::Integer(_) => "integer",
    SqlValue::Real(_) => "real",
    SqlValue::Text(_) => "text",
    SqlValue::Blob(_) => "blob",
  }
}

/// Decode a normalized column value according to the column's kind.
pub fn decode_value(column: Column, v: SqlValue) -> Result<Value> {
  let unexpected = |v: &SqlValue| Error::UnexpectedType {
    column: column.name(),
    found:  type_name(v),
  };

  Ok(match (column.kind(), v) {
    (_, SqlValue::Null) => Value::Null,
    (ColumnKind::Text, SqlValue::Text(s)) => Value::Text(s),
    (ColumnKind::Bool, SqlValue::Integer(i)) => Value::Bool(i != 0),
    (ColumnKind::Int, SqlValue::Integer(i)) => Value::Int(i),
    (ColumnKind::Float, SqlValue::Real(f)) => Value::Float(f),
    // REAL affinity stores whole numbers as integers when it can.
    (ColumnKind::Float, SqlValue::Integer(i)) => Value::Float(i as f64),
    (ColumnKind::Date, SqlValue::Text(s)) => Value::Date(decode_date(&s)?),
    (_, other) => return Err(unexpected(&other)),
  })
}

fn decode_text(column: Column, v: SqlValue) -> Result<Option<String>> {
  match v {
    SqlValue::Null => Ok(None),
    SqlValue::Text(s) => Ok(Some(s)),
    other => Err(Error::UnexpectedType {
      column: column.name(),
      found:  type_name(&other),
    }),
  }
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Column values read directly from either table, attributes in
/// [`Column::ALL`] order.
pub struct RawRow {
  pub npm:     String,
  pub periode: i64,
  pub values:  Vec<SqlValue>,
}

impl RawRow {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    let values = (0..Column::ALL.len())
      .map(|i| row.get::<_, SqlValue>(i + 2))
      .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(Self {
      npm: row.get(0)?,
      periode: row.get(1)?,
      values,
    })
  }

  pub fn into_raw(self) -> Result<RawRecord> {
    let count = self.values.len();
    let values = Column::ALL
      .into_iter()
      .zip(self.values)
      .map(|(column, v)| decode_text(column, v))
      .collect::<Result<Vec<_>>>()?;
    RawRecord::from_values(self.npm, self.periode, values)
      .ok_or(Error::ColumnCount(count))
  }

  pub fn into_normalized(self) -> Result<NormalizedRecord> {
    let count = self.values.len();
    let values = Column::ALL
      .into_iter()
      .zip(self.values)
      .map(|(column, v)| decode_value(column, v))
      .collect::<Result<Vec<_>>>()?;
    NormalizedRecord::from_values(self.npm, self.periode, values)
      .ok_or(Error::ColumnCount(count))
  }
}
