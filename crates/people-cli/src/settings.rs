//! Layered runtime settings.
//!
//! Precedence, lowest first: built-in defaults, the optional TOML file,
//! `PEOPLE_*` environment variables, then the `--db` flag.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Store file used when nothing else names one; relative to the working
/// directory.
pub const DEFAULT_DB: &str = "Data_ind.db";

#[derive(Debug, Deserialize)]
pub struct Settings {
  /// Path of the backing SQLite file.
  pub db: PathBuf,
}

impl Settings {
  /// Load settings from `config_file` (missing is fine) and the process
  /// environment.
  pub fn load(config_file: &Path, db_override: Option<PathBuf>) -> Result<Self> {
    Self::load_with(config_file, config::Environment::with_prefix("PEOPLE"), db_override)
  }

  fn load_with(
    config_file: &Path,
    environment: config::Environment,
    db_override: Option<PathBuf>,
  ) -> Result<Self> {
    let raw = config::Config::builder()
      .set_default("db", DEFAULT_DB)?
      .add_source(config::File::from(config_file).required(false))
      .add_source(environment)
      .set_override_option("db", db_override.map(|p| p.to_string_lossy().into_owned()))?
      .build()
      .with_context(|| format!("failed to read config file {}", config_file.display()))?;

    let mut settings: Settings = raw
      .try_deserialize()
      .context("failed to deserialise settings")?;
    settings.db = expand_tilde(&settings.db);
    Ok(settings)
  }
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

#[cfg(test)]
mod tests {
  use super::*;

  fn env(pairs: &[(&str, &str)]) -> config::Environment {
    let map = pairs
      .iter()
      .map(|(k, v)| (k.to_string(), v.to_string()))
      .collect();
    config::Environment::with_prefix("PEOPLE").source(Some(map))
  }

  #[test]
  fn defaults_to_data_ind_db() {
    let dir = tempfile::tempdir().unwrap();
    let s = Settings::load_with(&dir.path().join("people.toml"), env(&[]), None).unwrap();
    assert_eq!(s.db, PathBuf::from(DEFAULT_DB));
  }

  #[test]
  fn file_then_env_then_flag() {
    let dir = tempfile::tempdir().unwrap();
    let file = dir.path().join("people.toml");
    std::fs::write(&file, "db = \"from-file.db\"\n").unwrap();

    let s = Settings::load_with(&file, env(&[]), None).unwrap();
    assert_eq!(s.db, PathBuf::from("from-file.db"));

    let s = Settings::load_with(&file, env(&[("PEOPLE_DB", "from-env.db")]), None).unwrap();
    assert_eq!(s.db, PathBuf::from("from-env.db"));

    let s = Settings::load_with(
      &file,
      env(&[("PEOPLE_DB", "from-env.db")]),
      Some(PathBuf::from("from-flag.db")),
    )
    .unwrap();
    assert_eq!(s.db, PathBuf::from("from-flag.db"));
  }

  #[test]
  fn tilde_is_expanded() {
    let Ok(home) = std::env::var("HOME") else { return };
    assert_eq!(expand_tilde(Path::new("~/x.db")), PathBuf::from(home).join("x.db"));
    assert_eq!(expand_tilde(Path::new("x.db")), PathBuf::from("x.db"));
  }
}
