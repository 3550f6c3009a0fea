use serde::Serialize;

use crate::errors::CoreError;

/// Serialize `value` as pretty JSON indented with four spaces.
pub fn to_pretty_string<T: Serialize + ?Sized>(value: &T) -> Result<String, CoreError> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut serializer)?;
    // serde_json only ever emits valid UTF-8.
    Ok(String::from_utf8_lossy(&buf).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indents_with_four_spaces() {
        let out = to_pretty_string(&serde_json::json!({"a": [1]})).unwrap();
        assert_eq!(out, "{\n    \"a\": [\n        1\n    ]\n}");
    }
}
