//! Error types for `people-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// Person identity is keyed by name, so a name must have content.
  #[error("person name must not be empty")]
  EmptyName,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
