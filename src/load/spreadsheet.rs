use anyhow::{anyhow, Context, Result};
use calamine::{open_workbook_auto_from_rs, Data, Reader};
use chrono::TimeDelta;
use std::io::Cursor;
use tracing::debug;

use super::headers::{is_missing, unique_headers};
use crate::table::{CellValue, Column, Table};

/// Largest magnitude at which every integer is exactly representable in an f64.
const MAX_EXACT_INTEGER: u64 = 1 << 53;

/// Parse the first worksheet of a workbook; its first used row is the header.
pub(crate) fn parse_spreadsheet(bytes: &[u8]) -> Result<Table> {
    let mut workbook =
        open_workbook_auto_from_rs(Cursor::new(bytes)).context("opening workbook")?;

    let sheet_name = workbook.sheet_names().first().cloned().unwrap_or_default();
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| anyhow!("workbook contains no worksheets"))?
        .with_context(|| format!("reading worksheet '{}'", sheet_name))?;

    let mut rows = range.rows();
    let Some(header) = rows.next() else {
        debug!(sheet = %sheet_name, "first worksheet is empty");
        return Ok(Table::new());
    };

    let names = unique_headers(header.iter().map(header_name));
    let mut values: Vec<Vec<CellValue>> = vec![Vec::new(); names.len()];
    for row in rows {
        for (i, column) in values.iter_mut().enumerate() {
            column.push(row.get(i).map_or(CellValue::Empty, cell_value));
        }
    }
    debug!(
        sheet = %sheet_name,
        rows = values.first().map_or(0, Vec::len),
        columns = names.len(),
        "parsed worksheet"
    );

    let columns = names
        .into_iter()
        .zip(values)
        .map(|(name, cells)| Column::new(name, cells))
        .collect();
    Ok(Table::from_columns(columns))
}

/// Header text as written; missing-value tokens are valid column names.
fn header_name(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.clone(),
        other => cell_value(other).as_field().into_owned(),
    }
}

fn cell_value(cell: &Data) -> CellValue {
    match cell {
        Data::Int(i) if i.unsigned_abs() > MAX_EXACT_INTEGER => CellValue::text(i.to_string()),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Float(f) => CellValue::Number(*f),
        Data::String(s) if is_missing(s) => CellValue::Empty,
        Data::String(s) => CellValue::text(s.as_str()),
        Data::Bool(true) => CellValue::text("True"),
        Data::Bool(false) => CellValue::text("False"),
        Data::DateTime(dt) if dt.is_duration() => dt
            .as_duration()
            .map_or(CellValue::Number(dt.as_f64()), |d| CellValue::text(format_duration(d))),
        Data::DateTime(dt) => dt.as_datetime().map_or(CellValue::Number(dt.as_f64()), |d| {
            CellValue::text(d.format("%Y-%m-%d %H:%M:%S").to_string())
        }),
        Data::DateTimeIso(s) | Data::DurationIso(s) => CellValue::text(s.as_str()),
        Data::Error(e) => CellValue::text(e.to_string()),
        Data::Empty => CellValue::Empty,
    }
}

/// `HH:MM:SS`, hours unbounded.
fn format_duration(d: TimeDelta) -> String {
    format!(
        "{:02}:{:02}:{:02}",
        d.num_hours(),
        d.num_minutes() % 60,
        d.num_seconds() % 60
    )
}
