//! Convert an uploaded spreadsheet or CSV file into the fixed lead-export
//! layout: load a [`Table`], map its columns onto the target schema with a
//! [`ColumnMapping`], reshape, and serialize the result back to CSV.

pub mod export;
pub mod load;
pub mod mapping;
pub mod prompt;
pub mod reshape;
pub mod schema;
pub mod table;

pub use load::{load, SourceFormat, UnreadableFileError};
pub use mapping::ColumnMapping;
pub use reshape::{convert, normalize, reshape};
pub use schema::Program;
pub use table::{CellValue, Column, Table};


#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::TARGET_FIELDS;
    use crate::test_support::init_test_logging;
    use anyhow::Result;
    use rust_xlsxwriter::Workbook;

    /// Expected output line: `values` for the named targets, `Null` elsewhere.
    fn csv_line(program: &str, values: &[(&str, &str)]) -> String {
        TARGET_FIELDS
            .iter()
            .map(|&field| {
                if field == schema::PROGRAM_FIELD {
                    return program;
                }
                values
                    .iter()
                    .find(|(f, _)| *f == field)
                    .map_or(schema::SENTINEL, |(_, v)| *v)
            })
            .collect::<Vec<_>>()
            .join(",")
            + "\n"
    }

    fn alice_mapping() -> ColumnMapping {
        ColumnMapping::new()
            .with("Name", "Full Name")
            .with("Phone Number", "Phone")
    }

    #[test]
    fn csv_upload_converts_to_expected_bytes() -> Result<()> {
        init_test_logging();
        let table = load(b"Full Name,Phone\nAlice,555-1111\n,\n", "leads.csv")?;

        let out = convert(&table, &alice_mapping(), Program::Idfc);
        let bytes = export::to_csv_bytes(&out)?;

        let expected = TARGET_FIELDS.join(",")
            + "\n"
            + &csv_line("IDFC", &[("Name", "Alice"), ("Phone Number", "555-1111")])
            + &csv_line("IDFC", &[]);
        assert_eq!(String::from_utf8(bytes)?, expected);
        Ok(())
    }

    #[test]
    fn workbook_upload_converts_to_expected_bytes() -> Result<()> {
        init_test_logging();
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.write_string(0, 0, "Full Name")?;
        sheet.write_string(0, 1, "Phone")?;
        sheet.write_string(0, 2, "Note")?;
        sheet.write_string(1, 0, "Alice")?;
        sheet.write_number(1, 1, 5551111.0)?;
        sheet.write_string(2, 2, "callback")?;
        let bytes = workbook.save_to_buffer()?;

        let table = load(&bytes, "leads.xlsx")?;
        let out = convert(&table, &alice_mapping(), Program::Bob);
        let csv = String::from_utf8(export::to_csv_bytes(&out)?)?;

        let expected = TARGET_FIELDS.join(",")
            + "\n"
            + &csv_line("BOB", &[("Name", "Alice"), ("Phone Number", "5551111")])
            + &csv_line("BOB", &[]);
        assert_eq!(csv, expected);
        Ok(())
    }

    #[test]
    fn long_numeric_ids_survive_conversion_unchanged() -> Result<()> {
        init_test_logging();
        let upload = concat!(
            "Ref,Phone\n",
            "20240115000012345,9876543210\n",
            "12345678901234567890,9876543211\n",
        );
        let table = load(upload.as_bytes(), "leads.csv")?;
        let mapping = ColumnMapping::new()
            .with("Application Ref. No.", "Ref")
            .with("Phone Number", "Phone");

        let out = convert(&table, &mapping, Program::Idfc);
        let csv = String::from_utf8(export::to_csv_bytes(&out)?)?;

        let expected = [
            csv_line(
                "IDFC",
                &[
                    ("Application Ref. No.", "20240115000012345"),
                    ("Phone Number", "9876543210"),
                ],
            ),
            csv_line(
                "IDFC",
                &[
                    ("Application Ref. No.", "12345678901234567890"),
                    ("Phone Number", "9876543211"),
                ],
            ),
        ];
        let rows: Vec<&str> = csv.lines().skip(1).collect();
        assert_eq!(
            rows,
            expected.iter().map(|l| l.trim_end()).collect::<Vec<_>>()
        );
        Ok(())
    }
}
