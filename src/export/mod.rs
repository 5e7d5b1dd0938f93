//! CSV serialization of a [`Table`] and a plain-text preview.

mod preview;

pub use preview::render_preview;

use anyhow::{Context, Result};
use csv::WriterBuilder;
use std::{fs, io::Write, path::Path};
use tracing::info;

use crate::table::Table;

/// Write `table` as CSV: a header line of column names, then one record per row.
pub fn write_csv<W: Write>(table: &Table, writer: W) -> Result<()> {
    let mut wtr = WriterBuilder::new().has_headers(false).from_writer(writer);

    wtr.write_record(table.column_names())
        .context("writing CSV header")?;
    for (idx, row) in table.rows().enumerate() {
        wtr.write_record(row.iter().map(|cell| cell.as_field().into_owned()))
            .with_context(|| format!("writing CSV row {}", idx))?;
    }
    wtr.flush().context("flushing CSV writer")?;
    Ok(())
}

pub fn to_csv_bytes(table: &Table) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    write_csv(table, &mut buf)?;
    Ok(buf)
}

/// Serialize `table` to `path`, replacing any existing file.
pub fn write_csv_file(table: &Table, path: &Path) -> Result<u64> {
    let bytes = to_csv_bytes(table)?;
    fs::write(path, &bytes).with_context(|| format!("writing {}", path.display()))?;
    info!(path = %path.display(), bytes = bytes.len(), rows = table.num_rows(), "wrote CSV");
    Ok(bytes.len() as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::CellValue;
    use tempfile::tempdir;

    fn sample() -> Result<Table> {
        Table::new()
            .with_column("Name", [CellValue::text("Doe, Jane"), CellValue::text("Null")])?
            .with_column("Ref", [CellValue::Number(42.0), CellValue::Number(0.5)])?
            .with_column("Note", [CellValue::text("said \"hi\""), CellValue::Empty])
    }

    #[test]
    fn writes_header_and_quoted_rows() -> Result<()> {
        let bytes = to_csv_bytes(&sample()?)?;
        assert_eq!(
            String::from_utf8(bytes)?,
            "Name,Ref,Note\n\"Doe, Jane\",42,\"said \"\"hi\"\"\"\nNull,0.5,\n"
        );
        Ok(())
    }

    #[test]
    fn header_is_written_for_zero_rows() -> Result<()> {
        let table = Table::new()
            .with_column("Name", Vec::new())?
            .with_column("Phone Number", Vec::new())?;
        assert_eq!(String::from_utf8(to_csv_bytes(&table)?)?, "Name,Phone Number\n");
        Ok(())
    }

    #[test]
    fn writes_file_to_disk() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("converted_file.csv");
        let written = write_csv_file(&sample()?, &path)?;

        let on_disk = fs::read(&path)?;
        assert_eq!(on_disk.len() as u64, written);
        assert!(on_disk.starts_with(b"Name,Ref,Note\n"));
        Ok(())
    }
}
