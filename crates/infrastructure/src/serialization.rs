//! JSON helpers for the files the client keeps on disk.
//!
//! Files are written pretty-printed with 2-space indentation and a trailing
//! newline so they stay readable when inspected by hand.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::ser::{PrettyFormatter, Serializer};

/// Error type for serialization operations.
#[derive(Debug, thiserror::Error)]
pub enum SerializationError {
    /// JSON serialization failed.
    #[error("JSON serialization failed: {0}")]
    Serialize(serde_json::Error),

    /// JSON deserialization failed.
    #[error("JSON deserialization failed: {0}")]
    Deserialize(serde_json::Error),
}

/// Serializes a value to pretty JSON bytes ending with a newline.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn to_json_file_bytes<T: Serialize>(value: &T) -> Result<Vec<u8>, SerializationError> {
    let mut buffer = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"  ");
    let mut serializer = Serializer::with_formatter(&mut buffer, formatter);
    value
        .serialize(&mut serializer)
        .map_err(SerializationError::Serialize)?;
    buffer.push(b'\n');
    Ok(buffer)
}

/// Deserializes JSON from file bytes.
///
/// # Errors
///
/// Returns an error if the JSON is invalid or doesn't match the expected type.
pub fn from_json_bytes<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, SerializationError> {
    serde_json::from_slice(bytes).map_err(SerializationError::Deserialize)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn file_bytes_are_indented_and_terminated() {
        let bytes = to_json_file_bytes(&json!({ "jwt": "T" })).unwrap();
        let text = String::from_utf8(bytes).unwrap();

        assert_eq!(text, "{\n  \"jwt\": \"T\"\n}\n");
    }

    #[test]
    fn invalid_bytes_are_rejected() {
        let result: Result<serde_json::Value, _> = from_json_bytes(b"{\"jwt\": }");
        assert!(matches!(result, Err(SerializationError::Deserialize(_))));
    }
}
