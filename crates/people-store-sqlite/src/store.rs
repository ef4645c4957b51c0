//! [`SqliteStore`] — the SQLite implementation of [`RecordStore`].

use std::path::Path;

use rusqlite::{OptionalExtension as _, TransactionBehavior};

use people_core::{
  record::{DatedRecord, NewRecord, Person, PersonId, RecordId, RecordRow, validate_name},
  store::RecordStore,
};

use crate::{
  Error, Result,
  encode::{decode_dated_record, decode_person, decode_record_row, is_foreign_key_violation},
  schema::{CONNECTION_PRAGMAS, JOURNAL_PRAGMA, SCHEMA, find_incompatible_table},
};

const SELECT_ROWS: &str = "
  SELECT p.name, d.phone, d.birth
  FROM dated_records d
  INNER JOIN people p ON p.id = d.person_id";

// ─── Statement helpers ───────────────────────────────────────────────────────
//
// Plain synchronous functions over a borrowed connection, so the same code
// runs standalone or inside a transaction (`Transaction` derefs to
// `Connection`).

/// Look a person up by exact name, inserting them if absent.
///
/// Returns the id and whether a row was created.
fn find_or_insert_person(
  conn:  &rusqlite::Connection,
  name:  &str,
  phone: i64,
) -> rusqlite::Result<(PersonId, bool)> {
  let existing: Option<i64> = conn
    .query_row(
      "SELECT id FROM people WHERE name = ?1 ORDER BY id LIMIT 1",
      rusqlite::params![name],
      |r| r.get(0),
    )
    .optional()?;

  if let Some(id) = existing {
    return Ok((PersonId(id), false));
  }

  conn.execute(
    "INSERT INTO people (name, phone) VALUES (?1, ?2)",
    rusqlite::params![name, phone],
  )?;
  Ok((PersonId(conn.last_insert_rowid()), true))
}

fn insert_record(
  conn:      &rusqlite::Connection,
  person_id: PersonId,
  phone:     i64,
  birth:     &str,
) -> rusqlite::Result<RecordId> {
  conn.execute(
    "INSERT INTO dated_records (phone, person_id, birth) VALUES (?1, ?2, ?3)",
    rusqlite::params![phone, person_id.0, birth],
  )?;
  Ok(RecordId(conn.last_insert_rowid()))
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// A people record store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and ensure the schema.
  ///
  /// Fails with [`Error::Unavailable`] before any schema work if the file
  /// cannot be opened.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    let conn = tokio_rusqlite::Connection::open(path)
      .await
      .map_err(|source| Error::Unavailable { path: path.to_path_buf(), source })?;
    tracing::debug!(path = %path.display(), "opened store");

    let store = Self { conn };
    store.ensure_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.ensure_schema().await?;
    Ok(store)
  }

  /// Close the connection, surfacing any error SQLite reports on close.
  pub async fn close(self) -> Result<()> {
    self.conn.close().await?;
    tracing::debug!("closed store");
    Ok(())
  }

  async fn select_rows(&self, filter: Option<String>) -> Result<Vec<RecordRow>> {
    let rows = self
      .conn
      .call(move |conn| {
        let rows = if let Some(fragment) = filter {
          // `instr` is an exact substring test; LIKE would treat `%` and `_`
          // in the fragment as wildcards.
          let mut stmt = conn.prepare(&format!(
            "{SELECT_ROWS}
             WHERE ?1 = '' OR instr(CAST(d.phone AS TEXT), ?1) > 0
             ORDER BY d.id"
          ))?;
          stmt
            .query_map(rusqlite::params![fragment], decode_record_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?
        } else {
          let mut stmt = conn.prepare(&format!("{SELECT_ROWS} ORDER BY d.id"))?;
          stmt
            .query_map([], decode_record_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?
        };
        Ok(rows)
      })
      .await?;
    Ok(rows)
  }
}

// ─── RecordStore impl ────────────────────────────────────────────────────────

impl RecordStore for SqliteStore {
  type Error = Error;

  async fn ensure_schema(&self) -> Result<()> {
    let incompatible = self
      .conn
      .call(|conn| {
        conn.execute_batch(CONNECTION_PRAGMAS)?;

        // All-or-nothing: a rejected or failing file is left untouched.
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        if let Some(found) = find_incompatible_table(&tx)? {
          return Ok(Some(found));
        }
        tx.execute_batch(SCHEMA)?;
        tx.commit()?;

        conn.execute_batch(JOURNAL_PRAGMA)?;
        Ok(None)
      })
      .await?;

    if let Some((table, column)) = incompatible {
      return Err(Error::IncompatibleSchema { table, column });
    }
    Ok(())
  }

  // ── Writes ────────────────────────────────────────────────────────────────

  async fn resolve_person(&self, name: &str, phone: i64) -> Result<PersonId> {
    validate_name(name)?;
    let name = name.to_owned();

    // IMMEDIATE takes the write lock before the lookup, so two processes
    // cannot both miss and insert the same name.
    let (person_id, created) = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        let resolved = find_or_insert_person(&tx, &name, phone)?;
        tx.commit()?;
        Ok(resolved)
      })
      .await?;

    tracing::debug!(%person_id, created, "resolved person");
    Ok(person_id)
  }

  async fn add_record(
    &self,
    person_id: PersonId,
    phone: i64,
    birth: &str,
  ) -> Result<DatedRecord> {
    let birth = birth.to_owned();
    let stored_birth = birth.clone();

    let record_id = self
      .conn
      .call(move |conn| Ok(insert_record(conn, person_id, phone, &stored_birth)?))
      .await
      .map_err(|e| {
        if is_foreign_key_violation(&e) {
          Error::UnknownPerson(person_id)
        } else {
          Error::Database(e)
        }
      })?;

    tracing::debug!(%person_id, %record_id, "appended record");
    Ok(DatedRecord { id: record_id, person_id, birth, phone })
  }

  async fn add_person(&self, input: NewRecord) -> Result<PersonId> {
    input.validate()?;
    let NewRecord { name, phone, birth } = input;

    let (person_id, created, record_id) = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        let (person_id, created) = find_or_insert_person(&tx, &name, phone)?;
        let record_id = insert_record(&tx, person_id, phone, &birth)?;
        tx.commit()?;
        Ok((person_id, created, record_id))
      })
      .await?;

    tracing::info!(%person_id, %record_id, created, "added record");
    Ok(person_id)
  }

  // ── Reads ─────────────────────────────────────────────────────────────────

  async fn list_people(&self) -> Result<Vec<Person>> {
    let people = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare("SELECT id, name, phone FROM people ORDER BY id")?;
        let rows = stmt
          .query_map([], decode_person)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(people)
  }

  async fn list_records(&self, person_id: PersonId) -> Result<Vec<DatedRecord>> {
    let records = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT id, person_id, birth, phone FROM dated_records
           WHERE person_id = ?1
           ORDER BY id",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![person_id.0], decode_dated_record)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(records)
  }

  async fn list_all(&self) -> Result<Vec<RecordRow>> {
    let rows = self.select_rows(None).await?;
    tracing::debug!(count = rows.len(), "listed records");
    Ok(rows)
  }

  async fn search_by_phone_fragment(&self, fragment: &str) -> Result<Vec<RecordRow>> {
    let rows = self.select_rows(Some(fragment.to_owned())).await?;
    tracing::debug!(fragment, count = rows.len(), "searched records by phone");
    Ok(rows)
  }
}
