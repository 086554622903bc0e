use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

use super::{format_value, result_object, schedule_rows, strategy_summaries};

const SUMMARY_COLUMNS: [(&str, &str); 7] = [
    ("strategy", "Strategy"),
    ("months", "Months"),
    ("years", "Years"),
    ("rem_months", "+ Months"),
    ("total_interest", "Total Interest"),
    ("converged", "Paid Off"),
    ("payoff_date", "Payoff Date"),
];

const SCHEDULE_COLUMNS: [(&str, &str); 6] = [
    ("month", "Month"),
    ("interest", "Interest"),
    ("minimum_paid", "Minimums"),
    ("extra_paid", "Extra"),
    ("closing_balance", "Balance"),
    ("loans_remaining", "Open Loans"),
];

/// Format output as tables using the tabled crate.
pub fn print_table(value: &Value) {
    let Some(result) = result_object(value) else {
        print_flat_object(value);
        return;
    };

    let summaries = strategy_summaries(result);
    if summaries.is_empty() {
        print_flat_object(&Value::Object(result.clone()));
    } else {
        println!("{}", columns_table(&summaries, &SUMMARY_COLUMNS));
    }

    print_totals(result);

    if let Some(Value::Object(rec)) = result.get("recommendation") {
        println!("\nRecommendation:");
        for line in recommendation_lines(rec) {
            println!("  {}", line);
        }
    }

    if let Some(rows) = schedule_rows(result) {
        let rows: Vec<&Map<String, Value>> = rows.iter().filter_map(Value::as_object).collect();
        println!("\nSchedule:");
        println!("{}", columns_table(&rows, &SCHEDULE_COLUMNS));
    }

    if let Some(Value::Array(warnings)) = value.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings {
                if let Value::String(s) = w {
                    println!("  - {}", s);
                }
            }
        }
    }

    if let Some(Value::String(meth)) = value.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}

fn columns_table(rows: &[&Map<String, Value>], columns: &[(&str, &str)]) -> Table {
    let mut builder = Builder::default();
    builder.push_record(columns.iter().map(|(_, header)| header.to_string()));
    for row in rows {
        builder.push_record(
            columns
                .iter()
                .map(|(key, _)| row.get(*key).map(format_value).unwrap_or_default()),
        );
    }
    builder.build()
}

fn print_totals(result: &Map<String, Value>) {
    let totals: Vec<(&str, &Value)> = [
        ("Total Minimum Payments", "total_min_payments"),
        ("Extra Payment Applied Monthly", "extra_payment"),
        ("Total Paid", "total_paid"),
    ]
    .iter()
    .filter_map(|(label, key)| result.get(*key).map(|v| (*label, v)))
    .collect();

    if totals.is_empty() {
        return;
    }
    println!();
    for (label, val) in totals {
        println!("{}: {}", label, format_value(val));
    }
}

fn recommendation_lines(rec: &Map<String, Value>) -> Vec<String> {
    let mut lines = Vec::new();

    match rec.get("lower_interest").and_then(Value::as_str) {
        Some(strategy) => lines.push(format!(
            "{} saves {} in interest",
            strategy,
            rec.get("interest_savings").map(format_value).unwrap_or_default()
        )),
        None => lines.push("Both strategies pay the same total interest".to_string()),
    }

    match rec.get("faster").and_then(Value::as_str) {
        Some(strategy) => lines.push(format!(
            "{} pays off all loans {} months sooner",
            strategy,
            rec.get("months_saved").map(format_value).unwrap_or_default()
        )),
        None => lines.push("Both strategies take the same number of months".to_string()),
    }

    lines
}

fn print_flat_object(value: &Value) {
    if let Value::Object(map) = value {
        let mut builder = Builder::default();
        builder.push_record(["Field", "Value"]);
        for (key, val) in map {
            builder.push_record([key.as_str(), &format_value(val)]);
        }
        println!("{}", builder.build());
    } else {
        println!("{}", value);
    }
}
