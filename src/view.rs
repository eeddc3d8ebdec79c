//! List and show views
//!
//! Records are rendered without a fixed schema: columns are guessed from the
//! fields the records actually carry.

use serde_json::Value;

/// Widest a table cell may get before it is cut
const MAX_CELL_WIDTH: usize = 40;

/// Extract a value from JSON using a dot-notation path
pub fn extract_json_value(item: &Value, path: &str) -> String {
    let mut current = item;

    for part in path.split('.') {
        // Handle array index
        let next = match part.parse::<usize>() {
            Ok(idx) => current.get(idx),
            Err(_) => current.get(part),
        };
        current = match next {
            Some(v) => v,
            None => return "-".to_string(),
        };
    }

    display_value(current)
}

/// Single-cell rendering of a JSON value
fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "-".to_string(),
        Value::Array(arr) => format!("[{} items]", arr.len()),
        Value::Object(_) => "[object]".to_string(),
    }
}

/// Guess list columns from the records, in first-seen order.
/// Nested objects contribute their `name` field (e.g. `location.name`);
/// null fields are skipped until some record fills them in.
pub fn guess_columns(records: &[Value]) -> Vec<String> {
    let mut columns: Vec<String> = Vec::new();

    for record in records {
        let Some(map) = record.as_object() else {
            continue;
        };
        for (key, value) in map {
            let column = match value {
                Value::Object(inner) if inner.contains_key("name") => format!("{key}.name"),
                Value::Object(_) | Value::Null => continue,
                _ => key.clone(),
            };
            if !columns.contains(&column) {
                columns.push(column);
            }
        }
    }

    columns
}

fn truncate(cell: &str) -> String {
    if cell.chars().count() > MAX_CELL_WIDTH {
        let cut: String = cell.chars().take(MAX_CELL_WIDTH - 3).collect();
        format!("{cut}...")
    } else {
        cell.to_string()
    }
}

/// Render records as an aligned text table
pub fn render_list(records: &[Value]) -> String {
    if records.is_empty() {
        return "No records".to_string();
    }

    let columns = guess_columns(records);
    let rows: Vec<Vec<String>> = records
        .iter()
        .map(|r| columns.iter().map(|c| truncate(&extract_json_value(r, c))).collect())
        .collect();

    let widths: Vec<usize> = columns
        .iter()
        .enumerate()
        .map(|(i, header)| {
            rows.iter()
                .map(|row| row[i].chars().count())
                .chain(std::iter::once(header.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let format_row = |cells: &[String]| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, &width)| format!("{cell:<width$}"))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(format_row(&columns));
    lines.push(
        widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("  "),
    );
    lines.extend(rows.iter().map(|row| format_row(row)));

    lines.join("\n")
}

/// Render one record as indented `key: value` lines, nested records included
pub fn render_show(record: &Value) -> String {
    let mut lines = Vec::new();
    show_into(record, 0, &mut lines);
    lines.join("\n")
}

fn show_into(value: &Value, depth: usize, lines: &mut Vec<String>) {
    let indent = "  ".repeat(depth);
    let Some(map) = value.as_object() else {
        lines.push(format!("{indent}{}", display_value(value)));
        return;
    };

    let width = map.keys().map(|k| k.len()).max().unwrap_or(0);
    for (key, field) in map {
        match field {
            Value::Object(_) => {
                lines.push(format!("{indent}{key}:"));
                show_into(field, depth + 1, lines);
            }
            Value::Array(items) if items.iter().any(Value::is_object) => {
                lines.push(format!("{indent}{key}: [{} items]", items.len()));
                for (idx, item) in items.iter().enumerate() {
                    lines.push(format!("{indent}  - #{}", idx + 1));
                    show_into(item, depth + 2, lines);
                }
            }
            Value::Array(items) => {
                let rendered = items.iter().map(display_value).collect::<Vec<_>>().join(", ");
                lines.push(format!("{indent}{key:<width$}  [{rendered}]"));
            }
            other => {
                lines.push(format!("{indent}{key:<width$}  {}", display_value(other)));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn records() -> Vec<Value> {
        vec![
            json!({
                "id": "1",
                "name": "Beanie",
                "location": {"name": "Warehouse", "country_code": "UK"},
                "weight_kg": 0.1,
                "materials": [{"name": "Yarn"}]
            }),
            json!({
                "id": "2",
                "name": "Mug",
                "hs_code": "691200",
                "location": null,
                "materials": []
            }),
        ]
    }

    #[test]
    fn test_extract_json_value() {
        let item = &records()[0];
        assert_eq!(extract_json_value(item, "name"), "Beanie");
        assert_eq!(extract_json_value(item, "location.name"), "Warehouse");
        assert_eq!(extract_json_value(item, "weight_kg"), "0.1");
        assert_eq!(extract_json_value(item, "materials"), "[1 items]");
        assert_eq!(extract_json_value(item, "materials.0.name"), "Yarn");
        assert_eq!(extract_json_value(item, "location"), "[object]");
        assert_eq!(extract_json_value(item, "missing"), "-");
    }

    #[test]
    fn test_guess_columns_merges_records() {
        let mut columns = guess_columns(&records());
        columns.sort();
        assert_eq!(
            columns,
            vec!["hs_code", "id", "location.name", "materials", "name", "weight_kg"]
        );
    }

    #[test]
    fn test_render_list_aligns_columns() {
        let table = render_list(&records());
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines.len(), 4);
        for column in guess_columns(&records()) {
            assert!(lines[0].contains(&column));
        }
        assert!(lines[1].chars().all(|c| c == '-' || c == ' '));
        assert!(lines[2].contains("Warehouse"));
        assert!(lines[3].contains("Mug"));
        assert!(lines[3].contains("691200"));
    }

    #[test]
    fn test_render_list_empty() {
        assert_eq!(render_list(&[]), "No records");
    }

    #[test]
    fn test_long_cells_are_truncated() {
        let long = "x".repeat(100);
        let table = render_list(&[json!({"description": long})]);
        let row = table.lines().nth(2).unwrap();
        assert_eq!(row.chars().count(), MAX_CELL_WIDTH);
        assert!(row.ends_with("..."));
    }

    #[test]
    fn test_render_show_nests_materials() {
        let shown = render_show(&records()[0]);
        assert!(shown.contains("location:"));
        assert!(shown.contains("  name"));
        assert!(shown.contains("materials: [1 items]"));
        assert!(shown.contains("- #1"));
        assert!(shown.contains("Yarn"));
    }
}
