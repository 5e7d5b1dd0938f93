use anyhow::{bail, Context, Result};
use csv::{ReaderBuilder, StringRecord};
use tracing::debug;

use super::headers::{is_missing, unique_headers};
use crate::table::{CellValue, Column, Table};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Parse comma-delimited text whose first line is the header.
///
/// A column whose non-missing cells all parse as numbers is read as numeric;
/// any other column keeps its cells as text, verbatim.
pub(crate) fn parse_delimited(bytes: &[u8]) -> Result<Table> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);

    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true) // short rows are padded below, long rows rejected
        .from_reader(bytes);

    let header = rdr.headers().context("reading header line")?.clone();
    if header.is_empty() {
        bail!("No columns to parse from file");
    }
    let width = header.len();

    let mut records: Vec<StringRecord> = Vec::new();
    for (idx, result) in rdr.records().enumerate() {
        let record = result.with_context(|| format!("CSV parse error at record {}", idx + 1))?;
        if width > 1 && record.len() == 1 && record[0].is_empty() {
            continue;
        }
        if record.len() > width {
            let line = record
                .position()
                .map_or(idx as u64 + 2, |pos| pos.line());
            bail!(
                "Expected {} fields in line {}, saw {}",
                width,
                line,
                record.len()
            );
        }
        records.push(record);
    }
    debug!(rows = records.len(), columns = width, "parsed delimited records");

    let columns = unique_headers(header.iter())
        .into_iter()
        .enumerate()
        .map(|(i, name)| {
            let raw: Vec<&str> = records.iter().map(|r| r.get(i).unwrap_or("")).collect();
            Column::new(name, typed_column(&raw))
        })
        .collect();

    Ok(Table::from_columns(columns))
}

/// A number only if it renders back to the same text, so long ids and
/// zero-padded codes are never altered.
fn parse_number(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    trimmed
        .parse::<f64>()
        .ok()
        .filter(|n| n.is_finite())
        .filter(|n| CellValue::Number(*n).as_field() == trimmed)
}

/// Numeric if every present cell is an exact number, otherwise text.
fn typed_column(raw: &[&str]) -> Vec<CellValue> {
    let numeric = raw
        .iter()
        .filter(|s| !is_missing(s))
        .all(|s| parse_number(s).is_some());

    raw.iter()
        .map(|s| {
            if is_missing(s) {
                CellValue::Empty
            } else if numeric {
                parse_number(s).map_or(CellValue::Empty, CellValue::Number)
            } else {
                CellValue::text(*s)
            }
        })
        .collect()
}
