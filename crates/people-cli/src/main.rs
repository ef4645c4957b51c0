//! `people` — keep a small register of people and their dated records.
//!
//! # Usage
//!
//! ```
//! people add --name "Ivanov Ivan" --phone 89051234567 --birth 1990-01-01
//! people display
//! people find --phone 234 --db ~/contacts.db
//! ```

mod commands;
mod render;
mod settings;

use std::{io, path::PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use commands::Command;
use people_store_sqlite::SqliteStore;
use settings::Settings;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

// ─── CLI args ─────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "people", version, about = "Keep a register of people and their dated records")]
struct Cli {
  /// Path to a TOML config file.
  #[arg(short, long, value_name = "FILE", default_value = "people.toml", global = true)]
  config: PathBuf,

  /// The database file name (default: Data_ind.db in the working directory).
  #[arg(long, value_name = "PATH", global = true)]
  db: Option<PathBuf>,

  #[command(subcommand)]
  command: Option<Command>,
}

// ─── Entry point ──────────────────────────────────────────────────────────────

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
  // Logs go to stderr; stdout carries only command output.
  tracing_subscriber::fmt()
    .with_writer(io::stderr)
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();
  let settings = Settings::load(&cli.config, cli.db)?;

  let store = SqliteStore::open(&settings.db)
    .await
    .with_context(|| format!("failed to open store at {}", settings.db.display()))?;

  let mut stdout = io::stdout().lock();
  let result = match cli.command {
    Some(command) => commands::run(&store, command, &mut stdout).await,
    None => {
      tracing::debug!("no command given; schema ensured only");
      Ok(())
    }
  };

  // Close regardless of result; the command's own error wins.
  let closed = store.close().await.context("failed to close store");
  result?;
  closed
}

#[cfg(test)]
mod tests {
  use clap::error::ErrorKind;

  use super::*;

  fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
    Cli::try_parse_from(std::iter::once("people").chain(args.iter().copied()))
  }

  #[test]
  fn parses_add() {
    let cli = parse(&["add", "-n", "Ivanov Ivan", "-p", "89051234567", "-b", "1990-01-01"]).unwrap();
    assert_eq!(
      cli.command,
      Some(Command::Add {
        name:  "Ivanov Ivan".into(),
        phone: 89051234567,
        birth: "1990-01-01".into(),
      })
    );
    assert_eq!(cli.db, None);
    assert_eq!(cli.config, PathBuf::from("people.toml"));
  }

  #[test]
  fn db_is_accepted_before_or_after_the_verb() {
    let cli = parse(&["--db", "a.db", "display"]).unwrap();
    assert_eq!(cli.db, Some(PathBuf::from("a.db")));

    let cli = parse(&["find", "--phone", "234", "--db", "b.db"]).unwrap();
    assert_eq!(cli.db, Some(PathBuf::from("b.db")));
    assert_eq!(
      cli.command,
      Some(Command::Find { fragment: "234".into(), json: false })
    );
  }

  #[test]
  fn add_requires_phone() {
    let err = parse(&["add", "-n", "Ivanov Ivan", "-b", "1990-01-01"]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::MissingRequiredArgument);
  }

  #[test]
  fn add_rejects_non_numeric_phone_and_empty_name() {
    let err = parse(&["add", "-n", "X", "-p", "12ab", "-b", "1990"]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ValueValidation);

    let err = parse(&["add", "-n", "", "-p", "1", "-b", "1990"]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidValue);
  }

  #[test]
  fn unknown_verb_is_a_usage_error() {
    let err = parse(&["remove"]).unwrap_err();
    assert!(
      matches!(err.kind(), ErrorKind::InvalidSubcommand | ErrorKind::UnknownArgument),
      "{:?}",
      err.kind()
    );
    assert_eq!(err.exit_code(), 2);
  }

  #[test]
  fn no_verb_is_allowed() {
    assert_eq!(parse(&[]).unwrap().command, None);
  }

  #[test]
  fn version_flag() {
    let err = parse(&["--version"]).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::DisplayVersion);
  }
}
