use crate::table::Table;

/// Widest a preview cell may get before it is cut with an ellipsis.
const MAX_CELL_WIDTH: usize = 24;

/// Render the first `max_rows` rows as an aligned text table followed by a
/// `N rows × M columns` line.
pub fn render_preview(table: &Table, max_rows: usize) -> String {
    let shown = table.num_rows().min(max_rows);

    let header: Vec<String> = table.column_names().map(truncate).collect();
    let body: Vec<Vec<String>> = table
        .rows()
        .take(shown)
        .map(|row| row.iter().map(|c| truncate(&c.as_field())).collect())
        .collect();

    let widths: Vec<usize> = header
        .iter()
        .enumerate()
        .map(|(i, h)| {
            body.iter()
                .map(|r| r[i].chars().count())
                .chain(std::iter::once(h.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    if !header.is_empty() {
        out.push_str(&format_line(&header, &widths));
        out.push_str(
            &widths
                .iter()
                .map(|w| "-".repeat(*w))
                .collect::<Vec<_>>()
                .join("-+-"),
        );
        out.push('\n');
        for row in &body {
            out.push_str(&format_line(row, &widths));
        }
    }
    out.push_str(&format!(
        "{} rows × {} columns\n",
        table.num_rows(),
        table.num_columns()
    ));
    out
}

fn truncate(s: &str) -> String {
    if s.chars().count() <= MAX_CELL_WIDTH {
        return s.to_string();
    }
    let mut cut: String = s.chars().take(MAX_CELL_WIDTH - 1).collect();
    cut.push('…');
    cut
}

fn format_line(cells: &[String], widths: &[usize]) -> String {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(c, w)| format!("{:<width$}", c, width = *w))
        .collect();
    let mut line = padded.join(" | ").trim_end().to_string();
    line.push('\n');
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::CellValue;
    use anyhow::Result;

    #[test]
    fn renders_aligned_head_and_shape() -> Result<()> {
        let table = Table::new()
            .with_column("id", (1..=3).map(|i| CellValue::Number(i as f64)))?
            .with_column("name", ["a", "bb", "ccc"].map(CellValue::from))?;

        let text = render_preview(&table, 2);
        assert_eq!(
            text,
            "id | name\n---+-----\n1  | a\n2  | bb\n3 rows × 2 columns\n"
        );
        Ok(())
    }

    #[test]
    fn truncates_long_cells() -> Result<()> {
        let long = "x".repeat(40);
        let table = Table::new().with_column("note", [CellValue::text(long)])?;

        let text = render_preview(&table, 5);
        let row = text.lines().nth(2).expect("data row");
        assert_eq!(row.chars().count(), MAX_CELL_WIDTH);
        assert!(row.ends_with('…'));
        Ok(())
    }

    #[test]
    fn empty_table_only_reports_shape() {
        assert_eq!(render_preview(&Table::new(), 5), "0 rows × 0 columns\n");
    }
}
