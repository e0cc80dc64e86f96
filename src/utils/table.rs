use std::collections::HashSet;
use std::fmt;
use std::iter;

use serde_json::Value;

use crate::api::blockscout::Record;

const ELLIPSIS: &str = "...";

/// Controls how much of a table is shown when rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Columns shown before the middle ones are elided, 0 shows all
    pub max_columns: usize,
    /// Cell width before truncation, 0 disables truncation
    pub max_colwidth: usize,
    /// Prefix each row with its 0-based position
    pub show_index: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            max_columns: 20,
            max_colwidth: 50,
            show_index: true,
        }
    }
}

/// A simple in-memory text table.
///
/// Rows are stored as already-formatted cells; a missing field is an empty cell.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Create a new table with the given headers
    pub fn new(headers: Vec<&str>) -> Self {
        Table {
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    /// Build a table with one row per record.
    ///
    /// The column set is the union of all record keys in first-seen order.
    pub fn from_records(records: &[Record]) -> Self {
        let mut seen = HashSet::new();
        let mut headers = Vec::new();
        for record in records {
            for key in record.keys() {
                if seen.insert(key.as_str()) {
                    headers.push(key.clone());
                }
            }
        }

        let rows = records
            .iter()
            .map(|record| {
                headers
                    .iter()
                    .map(|header| record.get(header).map(format_cell).unwrap_or_default())
                    .collect()
            })
            .collect();

        Table { headers, rows }
    }

    /// Add a row to the table, padding short rows with empty cells
    pub fn add_row(&mut self, row: Vec<&str>) {
        let mut row_strings: Vec<String> = row
            .iter()
            .take(self.headers.len())
            .map(|s| s.to_string())
            .collect();
        row_strings.resize(self.headers.len(), String::new());

        self.rows.push(row_strings);
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Copy of the first `n` rows with all columns kept
    pub fn head(&self, n: usize) -> Table {
        Table {
            headers: self.headers.clone(),
            rows: self.rows.iter().take(n).cloned().collect(),
        }
    }

    /// Render the table as aligned text
    pub fn render(&self, options: &RenderOptions) -> String {
        // No cells to lay out: list what the table does have instead
        if self.rows.is_empty() || self.headers.is_empty() {
            let index: Vec<String> = (0..self.rows.len()).map(|i| i.to_string()).collect();
            return format!(
                "Empty table\nColumns: [{}]\nIndex: [{}]",
                self.headers.join(", "),
                index.join(", ")
            );
        }

        let visible = self.visible_columns(options.max_columns);
        let elided = visible.len() < self.headers.len();

        // Each entry is one rendered column: header cell first, then one cell per row
        let mut columns: Vec<Vec<String>> = Vec::with_capacity(visible.len() + 1);
        if options.show_index {
            columns.push(
                iter::once(String::new())
                    .chain((0..self.rows.len()).map(|i| i.to_string()))
                    .collect(),
            );
        }
        for slot in &visible {
            let column = match slot {
                Some(col) => iter::once(self.headers[*col].clone())
                    .chain(
                        self.rows
                            .iter()
                            .map(|row| truncate_cell(&row[*col], options.max_colwidth)),
                    )
                    .collect(),
                None => vec![ELLIPSIS.to_string(); self.rows.len() + 1],
            };
            columns.push(column);
        }

        let col_widths: Vec<usize> = columns
            .iter()
            .map(|column| column.iter().map(|cell| cell.chars().count()).max().unwrap_or(0))
            .collect();

        let mut output = String::new();
        for line in 0..=self.rows.len() {
            let cells: Vec<&str> = columns.iter().map(|column| column[line].as_str()).collect();
            output.push_str(&render_row(&cells, &col_widths));
            output.push('\n');

            if line == 0 {
                output.push_str(&render_separator(&col_widths));
                output.push('\n');
            }
        }

        if elided {
            output.push_str(&format!(
                "\n[{} rows x {} columns]\n",
                self.rows.len(),
                self.headers.len()
            ));
        }

        output.truncate(output.trim_end().len());
        output
    }

    /// Indices of the columns to show, `None` marks the elided middle
    fn visible_columns(&self, max_columns: usize) -> Vec<Option<usize>> {
        let total = self.headers.len();
        if max_columns == 0 || total <= max_columns {
            return (0..total).map(Some).collect();
        }

        let front = (max_columns + 1) / 2;
        let back = max_columns / 2;
        (0..front)
            .map(Some)
            .chain(iter::once(None))
            .chain((total - back..total).map(Some))
            .collect()
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(&RenderOptions::default()))
    }
}

/// Text shown for a single JSON field value
pub fn format_cell(value: &Value) -> String {
    match value {
        Value::String(s) => s.chars().fold(String::with_capacity(s.len()), |mut out, c| {
            if c.is_control() {
                out.extend(c.escape_debug());
            } else {
                out.push(c);
            }
            out
        }),
        other => other.to_string(),
    }
}

fn truncate_cell(cell: &str, max_colwidth: usize) -> String {
    if max_colwidth == 0 || cell.chars().count() <= max_colwidth {
        return cell.to_string();
    }
    if max_colwidth <= ELLIPSIS.len() {
        return cell.chars().take(max_colwidth).collect();
    }
    let keep = max_colwidth - ELLIPSIS.len();
    let mut truncated: String = cell.chars().take(keep).collect();
    truncated.push_str(ELLIPSIS);
    truncated
}

/// Render a single row with proper spacing
fn render_row(cells: &[&str], col_widths: &[usize]) -> String {
    let line = cells
        .iter()
        .zip(col_widths)
        .map(|(cell, &width)| format!("{:<width$}", cell, width = width))
        .collect::<Vec<_>>()
        .join(" | ");
    line.trim_end().to_string()
}

/// Render a separator line
fn render_separator(col_widths: &[usize]) -> String {
    col_widths
        .iter()
        .map(|&width| "-".repeat(width))
        .collect::<Vec<_>>()
        .join("-+-")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> Record {
        match value {
            Value::Object(map) => map,
            _ => panic!("test record must be an object"),
        }
    }

    #[test]
    fn test_basic_table() {
        let mut table = Table::new(vec!["Name", "Age", "City"]);
        table.add_row(vec!["Alice", "30", "NYC"]);
        table.add_row(vec!["Bob", "25"]);

        let rendered = table.to_string();
        assert!(rendered.contains("Name"));
        assert!(rendered.contains("Alice"));
        assert!(rendered.contains("Bob"));
        assert_eq!(table.rows[1], vec!["Bob", "25", ""]);
    }

    #[test]
    fn test_columns_are_union_of_keys() {
        let records = vec![
            record(json!({"hash": "0x01", "value": "10"})),
            record(json!({"hash": "0x02", "status": "ok"})),
            record(json!({"fee": {"type": "actual", "value": "21000"}})),
        ];
        let table = Table::from_records(&records);

        assert_eq!(table.headers(), &["hash", "value", "status", "fee"]);
        assert_eq!(table.len(), 3);
        assert_eq!(table.rows[0], vec!["0x01", "10", "", ""]);
        assert_eq!(table.rows[1], vec!["0x02", "", "ok", ""]);
        assert_eq!(table.rows[2][3], r#"{"type":"actual","value":"21000"}"#);
    }

    #[test]
    fn test_cell_formatting() {
        assert_eq!(format_cell(&json!(null)), "null");
        assert_eq!(format_cell(&json!(true)), "true");
        assert_eq!(format_cell(&json!(17)), "17");
        assert_eq!(format_cell(&json!("a\nb")), "a\\nb");
        assert_eq!(format_cell(&json!("x\ry\tz")), "x\\ry\\tz");
        assert_eq!(format_cell(&json!("bell\u{7}")), "bell\\u{7}");
        assert_eq!(format_cell(&json!(["x", 1])), r#"["x",1]"#);
    }

    #[test]
    fn test_render_layout() {
        let mut table = Table::new(vec!["hash", "block"]);
        table.add_row(vec!["0xabc", "7"]);
        table.add_row(vec!["0xd", "12345"]);

        let expected = "  | hash  | block\n\
                        --+-------+------\n\
                        0 | 0xabc | 7\n\
                        1 | 0xd   | 12345";
        assert_eq!(table.to_string(), expected);
    }

    #[test]
    fn test_render_without_index() {
        let mut table = Table::new(vec!["a", "b"]);
        table.add_row(vec!["1", "2"]);
        let options = RenderOptions {
            show_index: false,
            ..RenderOptions::default()
        };

        assert_eq!(table.render(&options), "a | b\n--+--\n1 | 2");
    }

    #[test]
    fn test_head_limits_rows() {
        let mut table = Table::new(vec!["n"]);
        for n in ["0", "1", "2", "3", "4", "5", "6"] {
            table.add_row(vec![n]);
        }

        assert_eq!(table.head(5).len(), 5);
        assert_eq!(table.head(5).headers(), table.headers());
        assert_eq!(table.head(100).len(), 7);
    }

    #[test]
    fn test_empty_table() {
        let table = Table::from_records(&[]);
        assert!(table.is_empty());
        assert_eq!(table.to_string(), "Empty table\nColumns: []\nIndex: []");

        let table = Table::new(vec!["hash", "status"]);
        assert_eq!(table.to_string(), "Empty table\nColumns: [hash, status]\nIndex: []");
    }

    #[test]
    fn test_long_cells_truncated() {
        let mut table = Table::new(vec!["raw_input"]);
        let long = "0x".to_string() + &"ab".repeat(40);
        table.add_row(vec![long.as_str()]);
        let options = RenderOptions {
            max_colwidth: 10,
            ..RenderOptions::default()
        };

        let rendered = table.render(&options);
        assert!(rendered.contains("0 | 0xababa..."));
        assert!(!rendered.contains(&long));
    }

    #[test]
    fn test_wide_table_elides_middle_columns() {
        let headers: Vec<String> = (0..8).map(|i| format!("c{}", i)).collect();
        let mut table = Table::new(headers.iter().map(|h| h.as_str()).collect());
        table.add_row(vec!["v"; 8]);
        let options = RenderOptions {
            max_columns: 4,
            ..RenderOptions::default()
        };

        let rendered = table.render(&options);
        let header_line = rendered.lines().next().unwrap();
        assert_eq!(header_line, "  | c0 | c1 | ... | c6 | c7");
        assert!(rendered.ends_with("[1 rows x 8 columns]"));
    }

    #[test]
    fn test_records_without_fields() {
        let records = vec![record(json!({})), record(json!({}))];
        let table = Table::from_records(&records);

        assert_eq!(table.len(), 2);
        assert_eq!(table.to_string(), "Empty table\nColumns: []\nIndex: [0, 1]");
    }

    #[test]
    fn test_narrow_width_never_exceeds_limit() {
        let mut table = Table::new(vec!["h"]);
        table.add_row(vec!["abcdef"]);
        let options = RenderOptions {
            max_colwidth: 2,
            ..RenderOptions::default()
        };

        assert_eq!(table.render(&options), "  | h\n--+---\n0 | ab");
        assert_eq!(truncate_cell("abcdef", 3), "abc");
        assert_eq!(truncate_cell("abcdef", 4), "a...");
    }

    #[test]
    fn test_odd_max_columns_favours_front() {
        let mut table = Table::new(vec!["c0", "c1", "c2", "c3", "c4"]);
        table.add_row(vec!["v"; 5]);
        let options = RenderOptions {
            max_columns: 3,
            ..RenderOptions::default()
        };

        let rendered = table.render(&options);
        assert_eq!(rendered.lines().next(), Some("  | c0 | c1 | ... | c4"));
        assert!(rendered.ends_with("[1 rows x 5 columns]"));
    }
}
