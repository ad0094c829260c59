use serde_json::Value;
use tabled::{builder::Builder, Table};

/// Render the computation envelope (or a bare array) as a table.
pub fn print_table(value: &Value) {
    match value {
        Value::Object(map) => {
            let result = map.get("result").unwrap_or(value);
            print_record(result);

            if let Some(Value::Array(warnings)) = map.get("warnings") {
                if !warnings.is_empty() {
                    println!("\nWarnings:");
                    for w in warnings {
                        if let Value::String(s) = w {
                            println!("  - {}", s);
                        }
                    }
                }
            }
            if let Some(Value::String(methodology)) = map.get("methodology") {
                println!("\nMethodology: {}", methodology);
            }
        }
        Value::Array(entries) => print_rows(entries),
        _ => println!("{}", value),
    }
}

/// One record as Field/Value rows. Nested arrays (donation comparisons) are
/// flattened to their descriptions.
fn print_record(record: &Value) {
    let Value::Object(fields) = record else {
        println!("{}", record);
        return;
    };

    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    for (key, value) in fields {
        builder.push_record([key.as_str(), &display_value(value)]);
    }
    println!("{}", Table::from(builder));
}

/// An array of uniform objects as one table, headers from the first entry.
fn print_rows(entries: &[Value]) {
    let Some(Value::Object(first)) = entries.first() else {
        println!("(empty)");
        return;
    };

    let headers: Vec<String> = first.keys().cloned().collect();
    let mut builder = Builder::default();
    builder.push_record(&headers);
    for entry in entries {
        if let Value::Object(fields) = entry {
            let row: Vec<String> = headers
                .iter()
                .map(|h| fields.get(h).map(display_value).unwrap_or_default())
                .collect();
            builder.push_record(row);
        }
    }
    println!("{}", Table::from(builder));
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => "null".to_string(),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Object(fields) => fields
                    .get("description")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string(),
                other => display_value(other),
            })
            .collect::<Vec<_>>()
            .join("; "),
        Value::Object(_) => serde_json::to_string(value).unwrap_or_default(),
    }
}
