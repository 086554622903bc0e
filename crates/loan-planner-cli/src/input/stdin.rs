use serde::de::DeserializeOwned;
use std::io::{self, Read};

use super::file::{parse_document, DocumentFormat};

/// Read a plan piped on stdin, as JSON (leading `{`) or YAML.
/// Returns None if stdin is a TTY (interactive) or empty.
pub fn read_stdin<T: DeserializeOwned>() -> Result<Option<T>, Box<dyn std::error::Error>> {
    if atty::is(atty::Stream::Stdin) {
        return Ok(None);
    }

    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;

    let trimmed = buffer.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    let value = parse_document(trimmed, detect_format(trimmed))
        .map_err(|e| format!("Failed to parse stdin: {}", e))?;
    Ok(Some(value))
}

fn detect_format(contents: &str) -> DocumentFormat {
    if contents.starts_with('{') {
        DocumentFormat::Json
    } else {
        DocumentFormat::Yaml
    }
}
