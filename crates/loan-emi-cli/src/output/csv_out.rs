use serde_json::Value;
use std::io;

use super::{format_scalar, row_field};

/// Write output as CSV to stdout.
///
/// A schedule prints one row per installment; any other result prints as
/// two-column `field,value` records.
pub fn print_csv(value: &Value) {
    let stdout = io::stdout();
    let mut wtr = csv::Writer::from_writer(stdout.lock());

    match value {
        Value::Object(map) => {
            if let Some(Value::Object(result)) = map.get("result") {
                if let Some((_, rows)) = row_field(result) {
                    write_array_csv(&mut wtr, rows);
                } else {
                    let _ = wtr.write_record(["field", "value"]);
                    write_fields(&mut wtr, "", result);
                }
            } else {
                let _ = wtr.write_record(["field", "value"]);
                write_fields(&mut wtr, "", map);
            }
        }
        Value::Array(arr) => write_array_csv(&mut wtr, arr),
        _ => {
            let _ = wtr.write_record([&format_scalar(value)]);
        }
    }

    let _ = wtr.flush();
}

fn write_fields<W: io::Write>(
    wtr: &mut csv::Writer<W>,
    prefix: &str,
    map: &serde_json::Map<String, Value>,
) {
    for (key, val) in map {
        let name = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        match val {
            Value::Object(inner) => write_fields(wtr, &name, inner),
            _ => {
                let _ = wtr.write_record([name.as_str(), &format_scalar(val)]);
            }
        }
    }
}

fn write_array_csv<W: io::Write>(wtr: &mut csv::Writer<W>, arr: &[Value]) {
    if arr.is_empty() {
        return;
    }

    if let Some(Value::Object(first)) = arr.first() {
        let headers: Vec<&str> = first.keys().map(|k| k.as_str()).collect();
        let _ = wtr.write_record(&headers);

        for item in arr {
            if let Value::Object(map) = item {
                let row: Vec<String> = headers
                    .iter()
                    .map(|h| map.get(*h).map(format_scalar).unwrap_or_default())
                    .collect();
                let _ = wtr.write_record(&row);
            }
        }
    } else {
        for item in arr {
            let _ = wtr.write_record([&format_scalar(item)]);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_installment_rows() {
        let rows = vec![
            json!({"emi_amount": "1100", "installment_number": 1}),
            json!({"emi_amount": "1100", "installment_number": 2}),
        ];
        let mut wtr = csv::Writer::from_writer(Vec::new());
        write_array_csv(&mut wtr, &rows);
        let out = String::from_utf8(wtr.into_inner().unwrap()).unwrap();
        assert_eq!(out, "emi_amount,installment_number\n1100,1\n1100,2\n");
    }

    #[test]
    fn test_nested_fields_flatten() {
        let result = json!({"summary": {"first_emi": "8791.59"}, "max_principal": "10000"});
        let mut wtr = csv::Writer::from_writer(Vec::new());
        write_fields(&mut wtr, "", result.as_object().unwrap());
        let out = String::from_utf8(wtr.into_inner().unwrap()).unwrap();
        assert!(out.contains("summary.first_emi,8791.59\n"));
        assert!(out.contains("max_principal,10000\n"));
    }
}
