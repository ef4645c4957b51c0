//! Plain-text rendering of record rows.

use std::fmt::Write as _;

use people_core::record::RecordRow;

/// Shown instead of a table when there is nothing to list.
pub const EMPTY_MESSAGE: &str = "List is empty.";

const IDX_WIDTH: usize = 4;
const NAME_WIDTH: usize = 30;
const BIRTH_WIDTH: usize = 20;
const PHONE_WIDTH: usize = 15;

/// Render `rows` as a fixed-width, numbered table, or [`EMPTY_MESSAGE`]
/// when `rows` is empty. The result always ends with a newline.
pub fn render_table(rows: &[RecordRow]) -> String {
  if rows.is_empty() {
    return format!("{EMPTY_MESSAGE}\n");
  }

  let rule = format!(
    "+-{}-+-{}-+-{}-+-{}-+",
    "-".repeat(IDX_WIDTH),
    "-".repeat(NAME_WIDTH),
    "-".repeat(BIRTH_WIDTH),
    "-".repeat(PHONE_WIDTH),
  );

  let mut out = String::new();
  // Writing into a String cannot fail.
  let _ = writeln!(out, "{rule}");
  let _ = writeln!(
    out,
    "| {:^IDX_WIDTH$} | {:^NAME_WIDTH$} | {:^BIRTH_WIDTH$} | {:^PHONE_WIDTH$} |",
    "№", "Name", "Birth date", "Phone",
  );
  let _ = writeln!(out, "{rule}");

  for (idx, row) in rows.iter().enumerate() {
    let _ = writeln!(
      out,
      "| {:>IDX_WIDTH$} | {:<NAME_WIDTH$} | {:<BIRTH_WIDTH$} | {:<PHONE_WIDTH$} |",
      idx + 1,
      row.name,
      row.birth,
      row.phone,
    );
    let _ = writeln!(out, "{rule}");
  }

  out
}

#[cfg(test)]
mod tests {
  use super::*;

  fn row(name: &str, phone: i64, birth: &str) -> RecordRow {
    RecordRow { name: name.into(), phone, birth: birth.into() }
  }

  #[test]
  fn empty_renders_message_not_table() {
    let out = render_table(&[]);
    assert_eq!(out, "List is empty.\n");
    assert!(!out.contains('+'));
  }

  #[test]
  fn rows_are_numbered_in_order() {
    let out = render_table(&[
      row("Ivanov Ivan", 89051234567, "1990-01-01"),
      row("Ivanov Ivan", 89059999999, "1990-01-01"),
    ]);
    let lines: Vec<&str> = out.lines().collect();

    // rule, header, rule, then (row, rule) per record
    assert_eq!(lines.len(), 7);
    assert!(lines[1].starts_with("|  №   | "));
    assert!(lines[1].contains("Name"));
    assert!(lines[3].starts_with("|    1 | Ivanov Ivan "));
    assert!(lines[3].contains("89051234567"));
    assert!(lines[5].starts_with("|    2 | "));
    assert!(lines[5].contains("89059999999"));
  }

  #[test]
  fn columns_line_up() {
    let out = render_table(&[
      row("Иванов Иван", 1, "01.01.1990"),
      row("Petrov Petr", 79161112233, "1985-05-05"),
    ]);
    let widths: Vec<usize> = out.lines().map(|l| l.chars().count()).collect();
    assert!(widths.iter().all(|w| *w == widths[0]), "{widths:?}");
  }

  #[test]
  fn values_are_printed_verbatim() {
    let out = render_table(&[row("O'Brien", -5, "31/02/1990 (approx.)")]);
    assert!(out.contains("| O'Brien "));
    assert!(out.contains("| 31/02/1990 (approx.) "));
    assert!(out.contains("| -5 "));
  }
}
