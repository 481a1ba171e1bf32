//! Tables for records with compile-time columns.

use super::level::ICON_RUN;
use comfy_table::{ContentArrangement, Table, presets};
use std::io::{self, Write};

/// A record type that knows its columns.
pub trait Tabular {
    /// Column headers, in display order.
    const COLUMNS: &'static [&'static str];

    /// One cell per column, in the order of [`Tabular::COLUMNS`].
    fn cells(&self) -> Vec<String>;
}

/// Build the table for `rows`, constrained to `width` cells.
pub fn build_table<T: Tabular>(rows: &[T], width: usize) -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::ASCII_HORIZONTAL_ONLY)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(width.min(u16::MAX as usize) as u16)
        .set_header(T::COLUMNS.iter().copied());

    for row in rows {
        let mut cells = row.cells();
        // short rows are padded so every column lines up
        cells.resize(T::COLUMNS.len(), String::new());
        table.add_row(cells);
    }
    table
}

/// Write `"▶ <message>"` and, if there are rows, the table below it.
pub fn render_table<W: Write + ?Sized, T: Tabular>(
    out: &mut W,
    message: &str,
    rows: &[T],
    width: usize,
) -> io::Result<()> {
    writeln!(out, "{ICON_RUN} {message}")?;
    if rows.is_empty() {
        return Ok(());
    }
    writeln!(out, "{}", build_table(rows, width))
}
