pub mod csv_out;
pub mod json;
pub mod minimal;
pub mod table;

use crate::OutputFormat;
use serde_json::{Map, Value};

/// Dispatch output to the appropriate formatter.
pub fn format_output(format: &OutputFormat, value: &Value) {
    match format {
        OutputFormat::Json => json::print_json(value),
        OutputFormat::Table => table::print_table(value),
        OutputFormat::Csv => csv_out::print_csv(value),
        OutputFormat::Minimal => minimal::print_minimal(value),
    }
}

/// The `result` object inside the computation envelope, if present.
fn result_object(value: &Value) -> Option<&Map<String, Value>> {
    value.get("result").and_then(Value::as_object)
}

/// Per-strategy summaries: both sides of a comparison, or the single summary of a plan.
fn strategy_summaries(result: &Map<String, Value>) -> Vec<&Map<String, Value>> {
    if let Some(summary) = result.get("summary").and_then(Value::as_object) {
        return vec![summary];
    }
    ["avalanche", "snowball"]
        .iter()
        .filter_map(|key| result.get(*key).and_then(Value::as_object))
        .collect()
}

/// Month-by-month schedule rows, when the plan included them.
fn schedule_rows(result: &Map<String, Value>) -> Option<&Vec<Value>> {
    result
        .get("schedule")
        .and_then(Value::as_array)
        .filter(|rows| !rows.is_empty())
}

fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        Value::Array(arr) => {
            let items: Vec<String> = arr.iter().map(format_value).collect();
            items.join(", ")
        }
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}
