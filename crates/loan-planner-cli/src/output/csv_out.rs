use serde_json::{Map, Value};
use std::io;

use super::{format_value, result_object, schedule_rows, strategy_summaries};

/// Write output as CSV to stdout.
///
/// A schedule is written one row per month; otherwise one row per strategy,
/// falling back to two-column field/value pairs.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    let rows = csv_rows(value);
    for row in &rows {
        let _ = wtr.write_record(row);
    }

    let _ = wtr.flush();
}

fn csv_rows(value: &Value) -> Vec<Vec<String>> {
    let Some(result) = result_object(value) else {
        return field_value_rows(value.as_object());
    };

    if let Some(schedule) = schedule_rows(result) {
        let objects: Vec<&Map<String, Value>> =
            schedule.iter().filter_map(Value::as_object).collect();
        return object_rows(&objects);
    }

    let summaries = strategy_summaries(result);
    if !summaries.is_empty() {
        return object_rows(&summaries);
    }

    field_value_rows(Some(result))
}

/// Header from the first object's keys, then one row per object.
fn object_rows(objects: &[&Map<String, Value>]) -> Vec<Vec<String>> {
    let Some(first) = objects.first() else {
        return Vec::new();
    };
    let headers: Vec<String> = first.keys().cloned().collect();

    let mut rows = vec![headers.clone()];
    for obj in objects {
        rows.push(
            headers
                .iter()
                .map(|h| obj.get(h.as_str()).map(format_value).unwrap_or_default())
                .collect(),
        );
    }
    rows
}

fn field_value_rows(map: Option<&Map<String, Value>>) -> Vec<Vec<String>> {
    let mut rows = vec![vec!["field".to_string(), "value".to_string()]];
    if let Some(map) = map {
        for (key, val) in map {
            rows.push(vec![key.clone(), format_value(val)]);
        }
    }
    rows
}
