//! Column-aligned table output for `ls` and `images`.

use console::measure_text_width;

/// A borderless table with left-aligned columns.
///
/// Widths are measured on visible text, so cells may carry ANSI styling.
#[derive(Debug)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Create a table with the given headers.
    pub fn new(headers: &[&str]) -> Self {
        Self {
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    /// Add a row. Missing trailing cells render empty.
    pub fn add_row(&mut self, row: Vec<String>) {
        self.rows.push(row);
    }

    fn column_widths(&self) -> Vec<usize> {
        let mut widths: Vec<usize> = self.headers.iter().map(|h| measure_text_width(h)).collect();
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate().take(widths.len()) {
                widths[i] = widths[i].max(measure_text_width(cell));
            }
        }
        widths
    }

    /// Render header and rows, columns separated by two spaces.
    pub fn render(&self) -> String {
        let widths = self.column_widths();
        let mut lines = Vec::with_capacity(self.rows.len() + 1);

        lines.push(render_row(&self.headers, &widths));
        for row in &self.rows {
            lines.push(render_row(row, &widths));
        }

        lines.join("\n")
    }
}

fn render_row(row: &[String], widths: &[usize]) -> String {
    let mut line = String::new();
    for (i, width) in widths.iter().enumerate() {
        let cell = row.get(i).map(String::as_str).unwrap_or("");
        line.push_str(cell);
        if i + 1 < widths.len() {
            let pad = width.saturating_sub(measure_text_width(cell)) + 2;
            line.push_str(&" ".repeat(pad));
        }
    }
    line.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_aligned_columns() {
        let mut table = Table::new(&["NAME", "CPU", "STATUS"]);
        table.add_row(vec!["dev".into(), "4".into(), "running".into()]);
        table.add_row(vec!["build-box".into(), "16".into(), "stopped".into()]);

        let output = table.render();
        let lines: Vec<_> = output.lines().collect();
        assert_eq!(lines[0], "NAME       CPU  STATUS");
        assert_eq!(lines[1], "dev        4    running");
        assert_eq!(lines[2], "build-box  16   stopped");
    }

    #[test]
    fn empty_table_renders_header() {
        let table = Table::new(&["NAME"]);
        assert_eq!(table.render(), "NAME");
    }

    #[test]
    fn short_rows_are_padded() {
        let mut table = Table::new(&["A", "B"]);
        table.add_row(vec!["x".into()]);
        assert_eq!(table.render().lines().nth(1), Some("x"));
    }

    #[test]
    fn styled_cells_measure_visible_width() {
        let mut table = Table::new(&["S", "N"]);
        table.add_row(vec!["\u{1b}[32mon\u{1b}[0m".into(), "1".into()]);
        let output = table.render();
        assert!(output.lines().nth(1).unwrap().ends_with("on\u{1b}[0m  1"));
    }
}
