//! SQL schema for the people SQLite store.
//!
//! Executed on every connection open. There are no migrations; the version
//! is recorded in `PRAGMA user_version` for future use.
//!
//! Order matters: [`CONNECTION_PRAGMAS`], then the [`EXPECTED_COLUMNS`]
//! check, then [`SCHEMA`] inside one transaction, then
//! [`JOURNAL_PRAGMA`]. A file with foreign tables of the same name is
//! rejected before anything is written to it.

/// Per-connection settings; they change nothing in the file.
pub const CONNECTION_PRAGMAS: &str = "PRAGMA foreign_keys = ON;";

/// Table DDL; idempotent thanks to `CREATE ... IF NOT EXISTS`.
pub const SCHEMA: &str = "
-- Deduplicated by name in the registry, not by a UNIQUE constraint.
-- Rows are never updated or deleted.
CREATE TABLE IF NOT EXISTS people (
    id     INTEGER PRIMARY KEY AUTOINCREMENT,
    name   TEXT    NOT NULL,
    phone  INTEGER NOT NULL   -- phone from the first add; never updated
);

-- Append-only.
CREATE TABLE IF NOT EXISTS dated_records (
    id         INTEGER PRIMARY KEY AUTOINCREMENT,
    birth      TEXT    NOT NULL,  -- free-form, stored verbatim
    person_id  INTEGER NOT NULL,
    phone      INTEGER NOT NULL,
    FOREIGN KEY (person_id) REFERENCES people(id)
);

CREATE INDEX IF NOT EXISTS people_name_idx          ON people(name);
CREATE INDEX IF NOT EXISTS dated_records_person_idx ON dated_records(person_id);

PRAGMA user_version = 1;
";

/// Cannot run inside a transaction, so it goes last.
pub const JOURNAL_PRAGMA: &str = "PRAGMA journal_mode = WAL;";

/// Columns each table must have if it already exists.
pub const EXPECTED_COLUMNS: &[(&str, &[&str])] = &[
  ("people", &["id", "name", "phone"]),
  ("dated_records", &["id", "birth", "person_id", "phone"]),
];

/// Find the first existing table in `conn` that lacks an expected column.
///
/// Returns `(table, column)`. Tables that do not exist yet are fine.
pub fn find_incompatible_table(
  conn: &rusqlite::Connection,
) -> rusqlite::Result<Option<(String, String)>> {
  let mut stmt = conn.prepare("SELECT name FROM pragma_table_info(?1)")?;

  for &(table, expected) in EXPECTED_COLUMNS {
    let present = stmt
      .query_map(rusqlite::params![table], |r| r.get::<_, String>(0))?
      .collect::<rusqlite::Result<Vec<_>>>()?;

    if present.is_empty() {
      continue;
    }
    if let Some(missing) = expected.iter().copied().find(|c| !present.iter().any(|p| p == c)) {
      return Ok(Some((table.to_owned(), missing.to_owned())));
    }
  }
  Ok(None)
}
