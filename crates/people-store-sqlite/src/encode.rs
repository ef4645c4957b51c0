//! Decoding helpers from SQLite rows to domain types.
//!
//! Column order is fixed by the `SELECT` lists in [`crate::store`]; each
//! decoder documents the order it expects.

use people_core::record::{DatedRecord, Person, PersonId, RecordId, RecordRow};

/// Decode `(name, phone, birth)`.
pub fn decode_record_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RecordRow> {
  Ok(RecordRow {
    name:  row.get(0)?,
    phone: row.get(1)?,
    birth: row.get(2)?,
  })
}

/// Decode `(id, name, phone)`.
pub fn decode_person(row: &rusqlite::Row<'_>) -> rusqlite::Result<Person> {
  Ok(Person {
    id:    PersonId(row.get(0)?),
    name:  row.get(1)?,
    phone: row.get(2)?,
  })
}

/// Decode `(id, person_id, birth, phone)`.
pub fn decode_dated_record(row: &rusqlite::Row<'_>) -> rusqlite::Result<DatedRecord> {
  Ok(DatedRecord {
    id:        RecordId(row.get(0)?),
    person_id: PersonId(row.get(1)?),
    birth:     row.get(2)?,
    phone:     row.get(3)?,
  })
}

/// Whether `err` is SQLite rejecting a row for a missing parent key.
pub fn is_foreign_key_violation(err: &tokio_rusqlite::Error) -> bool {
  matches!(
    err,
    tokio_rusqlite::Error::Rusqlite(rusqlite::Error::SqliteFailure(e, _))
      if e.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY
  )
}
