//! JSON body encoding
//!
//! Response bodies use `", "` between items and `": "` after keys, so an error
//! body reads `{"error": "Method not allowed"}` byte for byte.

use std::io;

use serde::Serialize;
use serde_json::ser::Formatter;

/// Compact formatter with a space after every separator
#[derive(Debug, Default, Clone, Copy)]
pub struct SpacedFormatter;

impl Formatter for SpacedFormatter {
    #[inline]
    fn begin_array_value<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    #[inline]
    fn begin_object_key<W>(&mut self, writer: &mut W, first: bool) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        if first {
            Ok(())
        } else {
            writer.write_all(b", ")
        }
    }

    #[inline]
    fn begin_object_value<W>(&mut self, writer: &mut W) -> io::Result<()>
    where
        W: ?Sized + io::Write,
    {
        writer.write_all(b": ")
    }
}

/// Encode a value as a response body
pub fn to_body<T: Serialize + ?Sized>(value: &T) -> serde_json::Result<String> {
    let mut buf = Vec::with_capacity(128);
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, SpacedFormatter);
    value.serialize(&mut serializer)?;
    String::from_utf8(buf)
        .map_err(|e| serde_json::Error::io(io::Error::new(io::ErrorKind::InvalidData, e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_error_body_literal() {
        let body = to_body(&json!({"error": "Method not allowed"})).unwrap();
        assert_eq!(body, r#"{"error": "Method not allowed"}"#);
    }

    #[test]
    fn test_nested_separators() {
        let body = to_body(&json!({"items": [1, 2], "success": true})).unwrap();
        assert_eq!(body, r#"{"items": [1, 2], "success": true}"#);
    }

    #[test]
    fn test_empty_containers() {
        assert_eq!(to_body(&json!({"items": []})).unwrap(), r#"{"items": []}"#);
        assert_eq!(to_body(&json!({})).unwrap(), "{}");
    }

    #[test]
    fn test_output_is_valid_json() {
        let value = json!({"a": {"b": [null, "x, y: z"]}});
        let body = to_body(&value).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(parsed, value);
    }
}
