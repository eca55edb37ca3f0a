//! Response envelope navigation.
//!
//! Services wrap payloads as `{statusCode, message, data}` and the gateway
//! sometimes adds another `data` layer, so the depth differs per endpoint.
//! Each endpoint passes its own key path.

#[cfg(test)]
#[path = "envelope_test.rs"]
mod envelope_test;

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::error::ApiError;

/// Follow `path` through nested objects and return the value found there.
///
/// # Errors
///
/// Returns [`ApiError::MalformedEnvelope`] naming the first missing key.
pub fn descend(body: Value, path: &[&str]) -> Result<Value, ApiError> {
    let mut current = body;
    for (depth, key) in path.iter().enumerate() {
        current = match current {
            Value::Object(mut map) => map.remove(*key).ok_or_else(|| missing(path, depth))?,
            _ => return Err(missing(path, depth)),
        };
    }
    Ok(current)
}

/// [`descend`] then deserialize into `T`.
///
/// # Errors
///
/// Returns [`ApiError::MalformedEnvelope`] if a key is missing or the payload
/// does not match `T`.
pub fn extract<T: DeserializeOwned>(body: Value, path: &[&str]) -> Result<T, ApiError> {
    let payload = descend(body, path)?;
    serde_json::from_value(payload)
        .map_err(|e| ApiError::MalformedEnvelope(format!("payload at `{}`: {e}", dotted(path))))
}

/// Message the services put next to the payload, if any.
pub fn server_message(body: &Value) -> Option<String> {
    ["message", "detail", "error"]
        .iter()
        .find_map(|key| body.get(*key).and_then(Value::as_str))
        .map(str::to_owned)
}

fn missing(path: &[&str], depth: usize) -> ApiError {
    ApiError::MalformedEnvelope(format!("missing `{}`", dotted(&path[..=depth])))
}

fn dotted(path: &[&str]) -> String {
    if path.is_empty() { "<root>".to_owned() } else { path.join(".") }
}
