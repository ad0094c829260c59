use serde_json::Value;
use std::io;

/// Write output as CSV to stdout: field/value rows for a single record,
/// one row per entry for arrays.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    match value {
        Value::Object(map) => {
            let result = map.get("result").unwrap_or(value);
            if let Value::Object(fields) = result {
                let _ = wtr.write_record(["field", "value"]);
                for (key, val) in fields {
                    let _ = wtr.write_record([key.as_str(), &cell(val)]);
                }
            }
        }
        Value::Array(entries) => {
            if let Some(Value::Object(first)) = entries.first() {
                let headers: Vec<&str> = first.keys().map(String::as_str).collect();
                let _ = wtr.write_record(&headers);
                for entry in entries {
                    if let Value::Object(fields) = entry {
                        let row: Vec<String> = headers
                            .iter()
                            .map(|h| fields.get(*h).map(cell).unwrap_or_default())
                            .collect();
                        let _ = wtr.write_record(&row);
                    }
                }
            }
        }
        _ => {
            let _ = wtr.write_record([&cell(value)]);
        }
    }

    let _ = wtr.flush();
}

fn cell(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        _ => serde_json::to_string(value).unwrap_or_default(),
    }
}
