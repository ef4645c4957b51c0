//! Error type for `people-store-sqlite`.

use std::path::PathBuf;

use people_core::record::PersonId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] people_core::Error),

  /// The backing file could not be opened or created.
  #[error("cannot open store at {}: {source}", .path.display())]
  Unavailable {
    path:   PathBuf,
    #[source]
    source: tokio_rusqlite::Error,
  },

  /// The file already holds a table of ours with a different layout, such
  /// as one written by another tool. Nothing was changed.
  #[error("store has a `{table}` table without a `{column}` column; refusing to modify it")]
  IncompatibleSchema { table: String, column: String },

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  /// A dated record referenced a person id with no `people` row.
  #[error("person not found: {0}")]
  UnknownPerson(PersonId),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
