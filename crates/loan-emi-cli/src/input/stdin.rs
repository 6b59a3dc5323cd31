use serde::de::DeserializeOwned;
use std::io::{self, Read};

/// Typed loan input piped on stdin, if any.
///
/// An interactive terminal or an empty pipe yields `None` so the caller can
/// fall back to flags.
pub fn read_stdin<T: DeserializeOwned>() -> Result<Option<T>, Box<dyn std::error::Error>> {
    if atty::is(atty::Stream::Stdin) {
        return Ok(None);
    }

    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;
    parse_piped(&buffer)
}

fn parse_piped<T: DeserializeOwned>(buffer: &str) -> Result<Option<T>, Box<dyn std::error::Error>> {
    let trimmed = buffer.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    tracing::debug!(bytes = trimmed.len(), "read loan input from stdin");
    serde_json::from_str(trimmed)
        .map(Some)
        .map_err(|e| format!("Failed to parse stdin as JSON: {e}").into())
}
