//! Reads an uploaded file into a [`Table`], picking the parser from the file
//! name's extension.

mod delimited;
mod headers;
mod spreadsheet;

use crate::table::Table;
use std::path::Path;
use thiserror::Error;
use tracing::{info, warn};

/// Extensions read as workbooks; everything else is read as CSV.
pub const SPREADSHEET_EXTENSIONS: [&str; 5] = ["xlsx", "xlsm", "xlsb", "xls", "ods"];

/// The upload could not be parsed under the format its name implies.
#[derive(Debug, Error)]
#[error("Error reading file: {message}")]
pub struct UnreadableFileError {
    pub file_name: String,
    pub message: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SourceFormat {
    /// First worksheet of a workbook.
    Spreadsheet,
    /// Comma-delimited text with a header line.
    Delimited,
}

impl SourceFormat {
    pub fn from_file_name(file_name: &str) -> Self {
        let is_sheet = Path::new(file_name)
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| {
                SPREADSHEET_EXTENSIONS
                    .iter()
                    .any(|known| ext.eq_ignore_ascii_case(known))
            })
            .unwrap_or(false);
        if is_sheet {
            SourceFormat::Spreadsheet
        } else {
            SourceFormat::Delimited
        }
    }
}

/// Parse `bytes` as a table. `file_name` only selects the format.
#[tracing::instrument(level = "info", skip(bytes), fields(size = bytes.len()))]
pub fn load(bytes: &[u8], file_name: &str) -> Result<Table, UnreadableFileError> {
    let format = SourceFormat::from_file_name(file_name);
    let parsed = match format {
        SourceFormat::Spreadsheet => spreadsheet::parse_spreadsheet(bytes),
        SourceFormat::Delimited => delimited::parse_delimited(bytes),
    };

    match parsed {
        Ok(table) => {
            info!(
                ?format,
                rows = table.num_rows(),
                columns = table.num_columns(),
                "file loaded"
            );
            Ok(table)
        }
        Err(err) => {
            let message = format!("{:#}", err);
            warn!(?format, error = %message, "failed to parse upload");
            Err(UnreadableFileError {
                file_name: file_name.to_string(),
                message,
            })
        }
    }
}
