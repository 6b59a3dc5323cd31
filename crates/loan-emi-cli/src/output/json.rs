use serde::Serialize;
use serde_json::Value;
use std::io::{self, Write};

/// Pretty JSON terminated by a newline.
pub fn render_json<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<String> {
    let mut rendered = serde_json::to_string_pretty(value)?;
    rendered.push('\n');
    Ok(rendered)
}

/// Write a command result to stdout as pretty JSON. A closed pipe is
/// reported on stderr rather than panicking.
pub fn print_json(value: &Value) {
    let written = render_json(value)
        .map_err(io::Error::from)
        .and_then(|rendered| io::stdout().lock().write_all(rendered.as_bytes()));
    if let Err(e) = written {
        eprintln!("Failed to write JSON output: {e}");
    }
}
