pub mod cell;

pub use cell::CellValue;

use anyhow::{bail, Result};

/// A named column of cells.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    pub name: String,
    pub values: Vec<CellValue>,
}

impl Column {
    pub fn new(name: impl Into<String>, values: Vec<CellValue>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    /// A column holding `value` in each of `rows` rows.
    pub fn repeat(name: impl Into<String>, value: CellValue, rows: usize) -> Self {
        Self::new(name, vec![value; rows])
    }
}

/// In-memory table: ordered, uniquely named columns of equal length.
///
/// Row order is the order rows appeared in the source; column order is
/// first-seen order from the header.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<Column>,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a table from columns already known to be uniquely named and of
    /// equal length.
    pub(crate) fn from_columns(columns: Vec<Column>) -> Self {
        debug_assert!(
            columns
                .windows(2)
                .all(|w| w[0].values.len() == w[1].values.len()),
            "columns must have equal length"
        );
        Self { columns }
    }

    /// Appends a column, rejecting duplicate names and mismatched lengths.
    pub fn push_column(&mut self, column: Column) -> Result<()> {
        if self.column(&column.name).is_some() {
            bail!("duplicate column name '{}'", column.name);
        }
        if !self.columns.is_empty() && column.values.len() != self.num_rows() {
            bail!(
                "column '{}' has {} rows, table has {}",
                column.name,
                column.values.len(),
                self.num_rows()
            );
        }
        self.columns.push(column);
        Ok(())
    }

    /// Builder form of [`Table::push_column`].
    pub fn with_column(
        mut self,
        name: impl Into<String>,
        values: impl IntoIterator<Item = CellValue>,
    ) -> Result<Self> {
        self.push_column(Column::new(name, values.into_iter().collect()))?;
        Ok(self)
    }

    pub fn num_rows(&self) -> usize {
        self.columns.first().map_or(0, |c| c.values.len())
    }

    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    /// Cells of row `idx`, in column order.
    pub fn row(&self, idx: usize) -> Option<Vec<&CellValue>> {
        if idx >= self.num_rows() {
            return None;
        }
        Some(self.columns.iter().map(|c| &c.values[idx]).collect())
    }

    pub fn rows(&self) -> impl Iterator<Item = Vec<&CellValue>> + '_ {
        (0..self.num_rows()).map(move |i| self.columns.iter().map(|c| &c.values[i]).collect())
    }
}
