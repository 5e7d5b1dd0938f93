//! Reshape a loaded table into the target layout.

use tracing::{debug, info, warn};

use crate::mapping::ColumnMapping;
use crate::schema::{Program, PROGRAM_FIELD, SENTINEL, TARGET_FIELDS};
use crate::table::{CellValue, Column, Table};

/// Replace every blank cell (`Empty` or `""`) with the sentinel. Idempotent.
pub fn normalize(table: &Table) -> Table {
    let columns = table
        .columns()
        .iter()
        .map(|col| {
            let values = col
                .values
                .iter()
                .map(|v| {
                    if v.is_blank() {
                        CellValue::text(SENTINEL)
                    } else {
                        v.clone()
                    }
                })
                .collect();
            Column::new(col.name.clone(), values)
        })
        .collect();
    Table::from_columns(columns)
}

/// Build a table with exactly `target_fields` as columns, in order.
///
/// Each target copies its mapped source column after [`normalize`]; targets
/// that are unmapped, or mapped to a column `table` does not have, are filled
/// with the sentinel. `program_field`, if present among the targets, is then
/// set to `program_value` in every row regardless of the mapping.
#[tracing::instrument(
    level = "debug",
    skip_all,
    fields(rows = table.num_rows(), mapped = mapping.len(), program = %program_value)
)]
pub fn reshape(
    table: &Table,
    mapping: &ColumnMapping,
    target_fields: &[&str],
    program_field: &str,
    program_value: &str,
) -> Table {
    let rows = table.num_rows();
    let normalized = normalize(table);

    let columns = target_fields
        .iter()
        .map(|&target| {
            if target == program_field {
                return Column::repeat(target, CellValue::text(program_value), rows);
            }
            match mapping.source_for(target).and_then(|s| normalized.column(s)) {
                Some(source) => Column::new(target, source.values.clone()),
                None => {
                    debug!(field = target, "filling unmapped target with sentinel");
                    Column::repeat(target, CellValue::text(SENTINEL), rows)
                }
            }
        })
        .collect();

    Table::from_columns(columns)
}

/// Reshape into the fixed lead-export layout with `program` as the program name.
///
/// Stale mapping entries and unknown targets do not stop the conversion; they
/// are logged as warnings and the affected targets come out as the sentinel.
pub fn convert(table: &Table, mapping: &ColumnMapping, program: Program) -> Table {
    for (target, source) in mapping.stale_entries(table) {
        warn!(
            field = target,
            source,
            "mapped source column not found; filling with sentinel"
        );
    }
    for target in mapping.unknown_targets(&TARGET_FIELDS) {
        warn!(field = target, "mapping key is not a target field; ignored");
    }
    if let Some(source) = mapping.source_for(PROGRAM_FIELD) {
        warn!(source, field = PROGRAM_FIELD, "mapping overridden by selected program");
    }

    let out = reshape(table, mapping, &TARGET_FIELDS, PROGRAM_FIELD, program.as_str());
    info!(
        rows = out.num_rows(),
        columns = out.num_columns(),
        program = %program,
        "conversion complete"
    );
    out
}
