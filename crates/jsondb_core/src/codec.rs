//! Canonical document encoding.
//!
//! Documents are JSON, pretty-printed with tab indentation and terminated
//! by a single newline.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;

/// Serializes `value` into its on-disk form.
///
/// # Errors
///
/// Returns the serializer error if `value` cannot be represented as JSON
/// (for example a map with non-string keys).
pub fn encode<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<Vec<u8>> {
    let mut buf = Vec::with_capacity(128);
    let formatter = PrettyFormatter::with_indent(b"\t");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut serializer)?;
    buf.push(b'\n');
    Ok(buf)
}

/// Deserializes a document.
///
/// # Errors
///
/// Returns the deserializer error if `bytes` is not valid JSON or does not
/// match `T`.
pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> serde_json::Result<T> {
    serde_json::from_slice(bytes)
}
