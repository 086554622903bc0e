use serde_json::{Map, Value};

use super::{format_value, result_object, strategy_summaries};

/// Print just the headline answer: months and total interest per strategy,
/// followed by the recommended strategy when there is one.
pub fn print_minimal(value: &Value) {
    for line in minimal_lines(value) {
        println!("{}", line);
    }
}

fn minimal_lines(value: &Value) -> Vec<String> {
    let Some(result) = result_object(value) else {
        return vec![format_value(value)];
    };

    let mut lines: Vec<String> = strategy_summaries(result)
        .into_iter()
        .map(summary_line)
        .collect();

    if let Some(best) = result
        .get("recommendation")
        .and_then(|r| r.get("lower_interest"))
        .and_then(Value::as_str)
    {
        lines.push(format!("recommended: {}", best));
    }

    if lines.is_empty() {
        // Fall back to first field
        if let Some((key, val)) = result.iter().next() {
            lines.push(format!("{}: {}", key, format_value(val)));
        }
    }
    lines
}

fn summary_line(summary: &Map<String, Value>) -> String {
    let field = |key: &str| summary.get(key).map(format_value).unwrap_or_default();
    format!(
        "{}: {} months, {} interest",
        field("strategy"),
        field("months"),
        field("total_interest")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_comparison_lines() {
        let value = json!({
            "result": {
                "avalanche": {"strategy": "avalanche", "months": 32, "total_interest": "1474.57"},
                "snowball": {"strategy": "snowball", "months": 34, "total_interest": "2158.80"},
                "recommendation": {"lower_interest": "avalanche"}
            }
        });
        assert_eq!(
            minimal_lines(&value),
            vec![
                "avalanche: 32 months, 1474.57 interest",
                "snowball: 34 months, 2158.80 interest",
                "recommended: avalanche",
            ]
        );
    }

    #[test]
    fn test_no_recommendation_when_equal() {
        let value = json!({
            "result": {
                "avalanche": {"strategy": "avalanche", "months": 22, "total_interest": "191.06"},
                "snowball": {"strategy": "snowball", "months": 22, "total_interest": "191.06"},
                "recommendation": {"lower_interest": null}
            }
        });
        assert_eq!(minimal_lines(&value).len(), 2);
    }
}
