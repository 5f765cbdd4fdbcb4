use crate::core::error::WebmodResult;
use serde::Serialize;

/// Serialize a value as JSON with 4-space indentation.
///
/// Import-map blocks and generated manifests are meant to be read and
/// hand-edited, so they use the same indentation npm writes.
pub fn to_pretty_json<T: Serialize>(value: &T) -> WebmodResult<String> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut serializer)?;
    Ok(String::from_utf8_lossy(&buf).into_owned())
}
