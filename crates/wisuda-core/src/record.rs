//! Participant records in their raw and normalized forms.
//!
//! Both forms share one shape: the `(npm, periode)` key plus one slot per
//! [`Column`]. Only the slot type differs.

use serde::Serialize;

use crate::{column::Column, value::Value};

/// One participant in one graduation period.
#[derive(Debug, Clone, PartialEq)]
pub struct ParticipantRecord<V> {
  pub npm:     String,
  pub periode: i64,
  values:      Vec<V>,
}

/// Display text exactly as exported.
pub type RawRecord = ParticipantRecord<Option<String>>;

/// Values coerced to their column types.
pub type NormalizedRecord = ParticipantRecord<Value>;

impl<V: Default + Clone> ParticipantRecord<V> {
  /// A record with every attribute unset.
  pub fn empty(npm: impl Into<String>, periode: i64) -> Self {
    Self {
      npm: npm.into(),
      periode,
      values: vec![V::default(); Column::ALL.len()],
    }
  }
}

impl<V> ParticipantRecord<V> {
  pub fn get(&self, column: Column) -> &V { &self.values[column.index()] }

  pub fn set(&mut self, column: Column, value: V) {
    self.values[column.index()] = value;
  }

  /// Attribute values in [`Column::ALL`] order.
  pub fn values(&self) -> &[V] { &self.values }

  /// Build a record from attribute values in [`Column::ALL`] order. Returns
  /// `None` if the count is wrong.
  pub fn from_values(npm: String, periode: i64, values: Vec<V>) -> Option<Self> {
    (values.len() == Column::ALL.len()).then_some(Self { npm, periode, values })
  }
}

impl<V: Serialize> ParticipantRecord<V> {
  /// Flatten to a JSON object keyed by column name.
  pub fn to_json(&self) -> serde_json::Result<serde_json::Value> {
    let mut map = serde_json::Map::new();
    map.insert("npm".into(), self.npm.clone().into());
    map.insert("periode".into(), self.periode.into());
    for (column, value) in Column::ALL.iter().zip(&self.values) {
      map.insert(column.name().into(), serde_json::to_value(value)?);
    }
    Ok(serde_json::Value::Object(map))
  }
}

impl NormalizedRecord {
  /// The `peserta_valid` flag, if known.
  pub fn is_valid_participant(&self) -> Option<bool> {
    self.get(Column::PesertaValid).as_bool()
  }
}

/// The surviving rows of one file, raw and normalized side by side.
///
/// `raw[i]` and `normalized[i]` always describe the same source row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Batch {
  pub raw:        Vec<RawRecord>,
  pub normalized: Vec<NormalizedRecord>,
}

impl Batch {
  pub fn push(&mut self, raw: RawRecord, normalized: NormalizedRecord) {
    debug_assert_eq!(raw.npm, normalized.npm);
    debug_assert_eq!(raw.periode, normalized.periode);
    self.raw.push(raw);
    self.normalized.push(normalized);
  }

  pub fn len(&self) -> usize { self.raw.len() }

  pub fn is_empty(&self) -> bool { self.raw.is_empty() }
}
