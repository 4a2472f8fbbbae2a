//! Parsing of field overrides supplied at runtime, either as `KEY=VALUE`
//! arguments or as a JSON object on stdin.

use crate::error::{Error, Result};
use crate::renderer::Fields;
use std::io::Read;

/// Parses a single `KEY=VALUE` override. Used as a clap value parser.
pub fn parse_field_override(s: &str) -> std::result::Result<(String, String), String> {
    let (key, value) =
        s.split_once('=').ok_or_else(|| format!("invalid field `{}`: expected KEY=VALUE", s))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("invalid field `{}`: empty key", s));
    }
    Ok((key.to_string(), value.to_string()))
}

/// Parses a JSON object of field values.
///
/// Empty input yields no fields. String, number and boolean values are
/// accepted; numbers and booleans are converted to their JSON text.
///
/// # Errors
/// * `Error::ConfigError` if the input is not a JSON object of scalars
pub fn parse_fields_json(content: &str) -> Result<Fields> {
    let content = content.trim();
    if content.is_empty() {
        return Ok(Fields::new());
    }

    let value: serde_json::Value = serde_json::from_str(content)
        .map_err(|e| Error::ConfigError(format!("Failed to parse fields as JSON: {}", e)))?;
    let serde_json::Value::Object(map) = value else {
        return Err(Error::ConfigError("fields on stdin must be a JSON object".to_string()));
    };

    map.into_iter()
        .map(|(key, value)| {
            let value = match value {
                serde_json::Value::String(s) => s,
                serde_json::Value::Number(n) => n.to_string(),
                serde_json::Value::Bool(b) => b.to_string(),
                _ => {
                    return Err(Error::ConfigError(format!(
                        "field `{}` on stdin must be a string, number or boolean",
                        key
                    )))
                }
            };
            Ok((key, value))
        })
        .collect()
}

/// Reads a JSON object of field values from stdin.
pub fn load_from_stdin() -> Result<Fields> {
    let mut buffer = String::new();
    std::io::stdin().read_to_string(&mut buffer).map_err(|e| Error::io("<stdin>", e))?;
    parse_fields_json(&buffer)
}

/// Merges runtime overrides; `--field` arguments win over stdin values.
pub fn get_overrides(take_from_stdin: bool, fields: &[(String, String)]) -> Result<Fields> {
    let mut overrides = if take_from_stdin { load_from_stdin()? } else { Fields::new() };
    overrides.extend(fields.iter().cloned());
    Ok(overrides)
}
