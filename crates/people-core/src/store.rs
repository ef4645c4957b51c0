//! The `RecordStore` trait.
//!
//! Implemented by storage backends (e.g. `people-store-sqlite`). The CLI
//! depends on this abstraction, not on any concrete backend.

use std::future::Future;

use crate::record::{DatedRecord, NewRecord, Person, PersonId, RecordRow};

/// Abstraction over a people record store backend.
///
/// People are created lazily and never updated or deleted. Dated records
/// are append-only.
///
/// All methods return `Send` futures so the trait can be used from a
/// multi-threaded tokio runtime.
pub trait RecordStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Schema ────────────────────────────────────────────────────────────

  /// Create both relations if they do not exist. Safe to call repeatedly.
  fn ensure_schema(&self) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  // ── Writes ────────────────────────────────────────────────────────────

  /// Resolve a person by exact `name`, creating them with `phone` if absent.
  ///
  /// An existing person is returned unchanged, even if `phone` differs.
  fn resolve_person<'a>(
    &'a self,
    name: &'a str,
    phone: i64,
  ) -> impl Future<Output = Result<PersonId, Self::Error>> + Send + 'a;

  /// Append one dated record for an existing person and return it. `birth`
  /// and `phone` are stored verbatim.
  fn add_record<'a>(
    &'a self,
    person_id: PersonId,
    phone: i64,
    birth: &'a str,
  ) -> impl Future<Output = Result<DatedRecord, Self::Error>> + Send + 'a;

  /// Resolve the person and append the record as one unit of work. On
  /// failure neither a new person nor a new record is left behind.
  fn add_person(
    &self,
    input: NewRecord,
  ) -> impl Future<Output = Result<PersonId, Self::Error>> + Send + '_;

  // ── Reads ─────────────────────────────────────────────────────────────

  /// All people, in creation order.
  fn list_people(&self) -> impl Future<Output = Result<Vec<Person>, Self::Error>> + Send + '_;

  /// One person's dated records, in insertion order. Empty for an unknown id.
  fn list_records(
    &self,
    person_id: PersonId,
  ) -> impl Future<Output = Result<Vec<DatedRecord>, Self::Error>> + Send + '_;

  /// Every dated record joined to its owner's name, in insertion order.
  fn list_all(&self) -> impl Future<Output = Result<Vec<RecordRow>, Self::Error>> + Send + '_;

  /// Like [`list_all`](Self::list_all), restricted to rows whose phone's
  /// decimal text contains `fragment`. The empty fragment matches all rows.
  fn search_by_phone_fragment<'a>(
    &'a self,
    fragment: &'a str,
  ) -> impl Future<Output = Result<Vec<RecordRow>, Self::Error>> + Send + 'a;
}
