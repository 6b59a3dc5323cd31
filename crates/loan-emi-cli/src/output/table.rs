use serde_json::{Map, Value};
use tabled::{builder::Builder, Table};

use super::{format_scalar, row_field};

/// Format output as tables using the tabled crate.
pub fn print_table(value: &Value) {
    match value {
        Value::Object(map) => {
            if let Some(result) = map.get("result") {
                print_result_table(result, map);
            } else {
                print_fields(map);
            }
        }
        Value::Array(arr) => print_rows(arr),
        _ => println!("{}", value),
    }
}

fn print_result_table(result: &Value, envelope: &Map<String, Value>) {
    if let Value::Object(res_map) = result {
        print_fields(res_map);

        if let Some((name, rows)) = row_field(res_map) {
            println!("\n{}:", name);
            print_rows(rows);
        }
    } else {
        print_fields(envelope);
    }

    if let Some(Value::Array(warnings)) = envelope.get("warnings") {
        if !warnings.is_empty() {
            println!("\nWarnings:");
            for w in warnings {
                if let Value::String(s) = w {
                    println!("  - {}", s);
                }
            }
        }
    }

    if let Some(Value::String(meth)) = envelope.get("methodology") {
        println!("\nMethodology: {}", meth);
    }
}

/// Field/Value table. Nested objects are flattened to `parent.child`;
/// row arrays are left for `print_rows`.
fn print_fields(map: &Map<String, Value>) {
    let mut builder = Builder::default();
    builder.push_record(["Field", "Value"]);
    push_fields(&mut builder, "", map);
    println!("{}", Table::from(builder));
}

fn push_fields(builder: &mut Builder, prefix: &str, map: &Map<String, Value>) {
    for (key, val) in map {
        let name = if prefix.is_empty() {
            key.clone()
        } else {
            format!("{prefix}.{key}")
        };
        match val {
            Value::Object(inner) => push_fields(builder, &name, inner),
            Value::Array(arr) if arr.first().is_some_and(Value::is_object) => {}
            Value::Array(arr) => {
                let items: Vec<String> = arr.iter().map(format_scalar).collect();
                builder.push_record([name, items.join(", ")]);
            }
            _ => builder.push_record([name, format_scalar(val)]),
        }
    }
}

fn print_rows(arr: &[Value]) {
    if arr.is_empty() {
        println!("(empty)");
        return;
    }

    if let Some(Value::Object(first)) = arr.first() {
        let headers: Vec<String> = first.keys().cloned().collect();
        let mut builder = Builder::default();
        builder.push_record(&headers);

        for item in arr {
            if let Value::Object(map) = item {
                let row: Vec<String> = headers
                    .iter()
                    .map(|h| map.get(h.as_str()).map(format_scalar).unwrap_or_default())
                    .collect();
                builder.push_record(row);
            }
        }

        println!("{}", Table::from(builder));
    } else {
        for item in arr {
            println!("{}", format_scalar(item));
        }
    }
}
