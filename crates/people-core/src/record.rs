//! People and their dated records.
//!
//! A [`Person`] is deduplicated by exact name. Each `add` appends one
//! [`DatedRecord`] pairing a birth value with the phone number supplied at
//! that time, so one person accumulates many records.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

// ─── Keys ────────────────────────────────────────────────────────────────────

/// Store-assigned key of a `people` row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersonId(pub i64);

/// Store-assigned key of a `dated_records` row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub i64);

impl fmt::Display for PersonId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.0) }
}

impl fmt::Display for RecordId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{}", self.0) }
}

// ─── Stored rows ─────────────────────────────────────────────────────────────

/// One deduplicated human, keyed by `name`.
///
/// `phone` is the number supplied on the person's first `add` and is never
/// updated afterwards. The current number for each event lives on the
/// corresponding [`DatedRecord`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
  pub id:    PersonId,
  pub name:  String,
  pub phone: i64,
}

/// A birth/phone pairing captured at add-time and owned by one [`Person`].
///
/// Returned by `add_record` and by per-person reads; listings use the
/// flatter [`RecordRow`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatedRecord {
  pub id:        RecordId,
  pub person_id: PersonId,
  /// Free-form date text; stored verbatim.
  pub birth:     String,
  pub phone:     i64,
}

// ─── Input / output shapes ───────────────────────────────────────────────────

/// Input to [`RecordStore::add_person`](crate::store::RecordStore::add_person).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRecord {
  pub name:  String,
  pub phone: i64,
  pub birth: String,
}

impl NewRecord {
  pub fn new(name: impl Into<String>, phone: i64, birth: impl Into<String>) -> Self {
    Self { name: name.into(), phone, birth: birth.into() }
  }

  /// Reject inputs that would break the name-keyed identity invariant.
  /// Birth and phone are deliberately accepted as-is.
  pub fn validate(&self) -> Result<()> { validate_name(&self.name) }
}

/// A dated record joined to its owner's name — the shape every read returns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordRow {
  pub name:  String,
  pub phone: i64,
  pub birth: String,
}

pub fn validate_name(name: &str) -> Result<()> {
  if name.is_empty() {
    return Err(Error::EmptyName);
  }
  Ok(())
}
