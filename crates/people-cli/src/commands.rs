//! Subcommands and their dispatch against a [`RecordStore`].

use std::io::Write;

use anyhow::{Context, Result};
use clap::{Subcommand, builder::NonEmptyStringValueParser};
use people_core::{
  record::{NewRecord, RecordRow},
  store::RecordStore,
};

use crate::render::render_table;

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
  /// Add a new person, or a new record for an existing one.
  Add {
    /// The person's name; records with the same name share one person.
    #[arg(short, long, value_parser = NonEmptyStringValueParser::new())]
    name:  String,

    /// The phone number for this record.
    #[arg(short, long, allow_negative_numbers = true)]
    phone: i64,

    /// The birth date, stored as given.
    #[arg(short, long)]
    birth: String,
  },

  /// Display all records.
  Display {
    /// Print rows as JSON instead of a table.
    #[arg(long)]
    json: bool,
  },

  /// Select records whose phone number contains a fragment.
  Find {
    /// Digits to look for anywhere in the phone number.
    #[arg(short = 's', long = "phone", value_name = "FRAGMENT")]
    fragment: String,

    /// Print rows as JSON instead of a table.
    #[arg(long)]
    json: bool,
  },
}

/// Run one command against `store`, writing any listing to `out`.
pub async fn run<S: RecordStore>(store: &S, command: Command, out: &mut impl Write) -> Result<()> {
  match command {
    Command::Add { name, phone, birth } => {
      let person_id = store
        .add_person(NewRecord { name, phone, birth })
        .await
        .context("failed to add record")?;
      tracing::debug!(%person_id, "add complete");
    }

    Command::Display { json } => {
      let rows = store.list_all().await.context("failed to list records")?;
      emit(&rows, json, out)?;
    }

    Command::Find { fragment, json } => {
      let rows = store
        .search_by_phone_fragment(&fragment)
        .await
        .with_context(|| format!("failed to search for phone fragment {fragment:?}"))?;
      emit(&rows, json, out)?;
    }
  }
  Ok(())
}

fn emit(rows: &[RecordRow], json: bool, out: &mut impl Write) -> Result<()> {
  if json {
    serde_json::to_writer_pretty(&mut *out, rows).context("failed to encode rows")?;
    writeln!(out)?;
  } else {
    out.write_all(render_table(rows).as_bytes())?;
  }
  out.flush()?;
  Ok(())
}
