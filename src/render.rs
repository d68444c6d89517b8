//! Response presentation: flattened key/value tables and one-line statuses.

use anyhow::Result;
use clap::ValueEnum;
use colored::Colorize;
use serde_json::{Map, Value};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Flattened two-column table
    Pretty,
    /// Pretty-printed response JSON
    Json,
}

/// Renders one API response under a title. Objects become a two-column table
/// with dotted key paths; anything else falls back to raw output.
pub fn render(response: &Value, title: &str, output: OutputFormat) -> Result<()> {
    match output {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(response)?),
        OutputFormat::Pretty => match response {
            Value::Object(map) => print_table(map, title),
            Value::String(body) => println!("{body}"),
            other => println!("{}", serde_json::to_string_pretty(other)?),
        },
    }
    Ok(())
}

pub fn success(message: &str) {
    println!("{}", format!("Success: {message}").green());
}

pub fn note(message: &str) {
    println!("{}", message.yellow());
}

fn print_table(map: &Map<String, Value>, title: &str) {
    println!("{}", title.bold());
    let rows = flatten(map);
    if rows.is_empty() {
        println!("{}", "(empty response)".dimmed());
        return;
    }

    let key_width = rows.iter().map(|(key, _)| key.len()).max().unwrap_or(0);
    for (key, value) in rows {
        println!("{}  {}", format!("{key:<key_width$}").cyan(), value.green());
    }
}

/// Flattens a JSON object into dotted-path rows. Nested objects recurse;
/// every other value (including arrays) is stringified in place, one row per
/// leaf.
pub fn flatten(map: &Map<String, Value>) -> Vec<(String, String)> {
    let mut rows = Vec::new();
    flatten_into(map, "", &mut rows);
    rows
}

fn flatten_into(map: &Map<String, Value>, prefix: &str, rows: &mut Vec<(String, String)>) {
    for (key, value) in map {
        let path = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        match value {
            Value::Object(inner) => flatten_into(inner, &path, rows),
            leaf => rows.push((path, display_value(leaf))),
        }
    }
}

pub fn display_value(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        other => serde_json::to_string(other).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn rows_of(value: Value) -> Vec<(String, String)> {
        match value {
            Value::Object(map) => flatten(&map),
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn nested_objects_flatten_to_dotted_paths() {
        let rows = rows_of(json!({
            "instance": {"instanceName": "bot", "state": {"connection": "open"}},
            "count": 2,
        }));
        assert_eq!(
            rows,
            vec![
                ("count".to_string(), "2".to_string()),
                ("instance.instanceName".to_string(), "bot".to_string()),
                ("instance.state.connection".to_string(), "open".to_string()),
            ]
        );
    }

    #[test]
    fn arrays_stay_on_a_single_row() {
        let rows = rows_of(json!({"numbers": ["5511", "5522"]}));
        assert_eq!(
            rows,
            vec![("numbers".to_string(), "[\"5511\",\"5522\"]".to_string())]
        );
    }

    #[test]
    fn scalar_leaves_stringify_directly() {
        let rows = rows_of(json!({"a": null, "b": true, "c": 1.5, "d": "x"}));
        assert_eq!(
            rows,
            vec![
                ("a".to_string(), "null".to_string()),
                ("b".to_string(), "true".to_string()),
                ("c".to_string(), "1.5".to_string()),
                ("d".to_string(), "x".to_string()),
            ]
        );
    }
}
