use serde::Serialize;
use serde_json::Value;

use crate::cli::OutputFormat;
use crate::ui;

pub mod table;

/// Render a serializable response in the requested format.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Table => render_table(&serde_json::to_value(value)?),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
    }
}

/// Print a serializable response in the requested format.
pub fn output<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render(value, format)?;
    println!("{rendered}");
    Ok(())
}

/// Objects become key/value tables, nested objects are flattened into dotted
/// keys, and arrays of objects become row tables.
fn render_table(value: &Value) -> anyhow::Result<String> {
    let max_width = ui::prefs().term_width;
    match value {
        Value::Array(items) => Ok(render_rows(items, max_width)),
        Value::Object(_) => {
            let mut entries = Vec::new();
            flatten("", value, &mut entries);
            let rows = entries
                .into_iter()
                .map(|(key, cell)| vec![key, cell])
                .collect::<Vec<_>>();
            Ok(table::render(&["key", "value"], &rows, max_width))
        }
        scalar => Ok(table::render(&["value"], &[vec![cell(scalar)]], max_width)),
    }
}

fn flatten(prefix: &str, value: &Value, out: &mut Vec<(String, String)>) {
    match value {
        Value::Object(map) if !map.is_empty() => {
            for (key, child) in map {
                let key = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{prefix}.{key}")
                };
                flatten(&key, child, out);
            }
        }
        Value::Array(items) if items.iter().all(Value::is_object) && !items.is_empty() => {
            for (index, item) in items.iter().enumerate() {
                flatten(&format!("{prefix}[{index}]"), item, out);
            }
        }
        other => out.push((prefix.to_string(), cell(other))),
    }
}

fn render_rows(items: &[Value], max_width: Option<usize>) -> String {
    if items.is_empty() {
        return String::from("(no rows)");
    }

    let mut headers = Vec::<&str>::new();
    for map in items.iter().filter_map(Value::as_object) {
        for key in map.keys() {
            if !headers.contains(&key.as_str()) {
                headers.push(key.as_str());
            }
        }
    }
    if headers.is_empty() {
        let rows = items.iter().map(|item| vec![cell(item)]).collect::<Vec<_>>();
        return table::render(&["value"], &rows, max_width);
    }

    let rows = items
        .iter()
        .map(|item| {
            headers
                .iter()
                .map(|header| item.get(header).map_or_else(|| String::from("-"), cell))
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();
    table::render(&headers, &rows, max_width)
}

fn cell(value: &Value) -> String {
    match value {
        Value::Null => String::from("-"),
        Value::String(text) => text.clone(),
        Value::Number(n) => n
            .as_f64()
            .filter(|_| n.is_f64())
            .map_or_else(|| n.to_string(), |f| format!("{f:.4}")),
        other => other.to_string(),
    }
}
