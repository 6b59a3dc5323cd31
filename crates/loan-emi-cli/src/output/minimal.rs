use serde_json::Value;

use super::format_scalar;

/// Priority list of key output fields, as paths into the result object
const PRIORITY_PATHS: [&[&str]; 5] = [
    &["equivalent_reducing_rate"],
    &["max_principal"],
    &["interest_difference"],
    &["summary", "first_emi"],
    &["emi"],
];

/// Print just the key answer value from the output.
///
/// Looks for well-known result fields in order of priority, then falls back
/// to the first field of the result object.
pub fn print_minimal(value: &Value) {
    println!("{}", minimal_answer(value));
}

fn minimal_answer(value: &Value) -> String {
    let result_obj = value
        .as_object()
        .and_then(|m| m.get("result"))
        .unwrap_or(value);

    for path in PRIORITY_PATHS {
        let found = path
            .iter()
            .try_fold(result_obj, |node, key| node.get(*key))
            .filter(|v| !v.is_null());
        if let Some(val) = found {
            return format_scalar(val);
        }
    }

    if let Value::Object(map) = result_obj {
        if let Some((key, val)) = map.iter().next() {
            return format!("{}: {}", key, format_scalar(val));
        }
    }

    format_scalar(result_obj)
}
