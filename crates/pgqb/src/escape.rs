//! Lexical encoding of identifiers and values.
//!
//! This module turns identifier paths and [`Value`]s into their PostgreSQL
//! textual forms:
//!
//! - Identifier parts are double-quoted with `"` doubled, dotted paths are
//!   split and rejoined, and the `*` wildcard passes through unquoted.
//! - Strings become `'...'` literals, or `E'...'` escape strings when they
//!   contain quotes, backslashes, or control whitespace.
//! - Arrays become `ARRAY[...]` literals (inner arrays are bare `[...]`),
//!   objects become JSON string literals.
//!
//! Both empty arrays and empty objects emit `'{}'`. The forms are
//! indistinguishable downstream; the behavior is deliberate and kept.

use crate::error::{QbError, QbResult};
use crate::value::Value;

/// Escape an identifier path.
///
/// Each input item is split on `.` and the surviving sub-parts are joined
/// with `.`, each double-quoted unless it is the `*` wildcard. Empty
/// sub-parts are silently dropped; an input with no surviving sub-parts
/// yields the empty string.
///
/// # Example
/// ```
/// use pgqb::escape_identifier;
///
/// assert_eq!(escape_identifier(["a.b", "c"]).unwrap(), r#""a"."b"."c""#);
/// assert_eq!(escape_identifier(["a", "*"]).unwrap(), r#""a".*"#);
/// ```
pub fn escape_identifier<I>(parts: I) -> QbResult<String>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let mut out = String::new();
    let mut first = true;
    for part in parts {
        for sub in part.as_ref().split('.') {
            if sub.is_empty() {
                continue;
            }
            if !first {
                out.push('.');
            }
            write_identifier_part(&mut out, sub)?;
            first = false;
        }
    }
    Ok(out)
}

/// Write one already-split identifier segment.
pub(crate) fn write_identifier_part(out: &mut String, part: &str) -> QbResult<()> {
    if part.contains('\0') {
        return Err(QbError::invalid_identifier(
            "identifier cannot contain NUL character",
        ));
    }
    if part == "*" {
        out.push('*');
        return Ok(());
    }
    out.push('"');
    for ch in part.chars() {
        if ch == '"' {
            out.push('"');
            out.push('"');
        } else {
            out.push(ch);
        }
    }
    out.push('"');
    Ok(())
}

/// Escape a value into its SQL literal form.
///
/// Dispatches on the value's shape; see the module docs for the full table.
/// Fails with `InvalidString` on NUL bytes and `UnsupportedValue` on binary
/// values.
pub fn escape_value(value: &Value) -> QbResult<String> {
    let mut out = String::new();
    write_value(&mut out, value)?;
    Ok(out)
}

pub(crate) fn write_value(out: &mut String, value: &Value) -> QbResult<()> {
    match value {
        Value::Null => out.push_str("NULL"),
        Value::Bool(true) => out.push_str("TRUE"),
        Value::Bool(false) => out.push_str("FALSE"),
        Value::Int(i) => {
            let mut buf = itoa_buf();
            out.push_str(write_i64(&mut buf, *i));
        }
        Value::Float(f) => write_float(out, *f),
        Value::Text(s) => write_string(out, s)?,
        Value::Bytes(_) => {
            return Err(QbError::unsupported_value(
                "binary values have no literal form",
            ));
        }
        Value::Array(items) => {
            if items.is_empty() {
                out.push_str("'{}'");
            } else {
                out.push_str("ARRAY[");
                write_array_items(out, items)?;
                out.push(']');
            }
        }
        Value::Object(pairs) => {
            if pairs.is_empty() {
                out.push_str("'{}'");
            } else {
                let json = serde_json::to_string(value)
                    .map_err(|e| QbError::unsupported_value(e.to_string()))?;
                write_string(out, &json)?;
            }
        }
    }
    Ok(())
}

/// Array elements, recursive. The `ARRAY` prefix only appears at the
/// outermost level; nested arrays emit bare brackets.
fn write_array_items(out: &mut String, items: &[Value]) -> QbResult<()> {
    for (i, item) in items.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        match item {
            Value::Array(inner) => {
                out.push('[');
                write_array_items(out, inner)?;
                out.push(']');
            }
            other => write_value(out, other)?,
        }
    }
    Ok(())
}

fn write_float(out: &mut String, f: f64) {
    if f.is_nan() {
        out.push_str("'NaN'");
    } else if f == f64::INFINITY {
        out.push_str("'Infinity'");
    } else if f == f64::NEG_INFINITY {
        out.push_str("'-Infinity'");
    } else {
        // Display for f64 is the shortest decimal that round-trips.
        out.push_str(&f.to_string());
    }
}

/// Write a string literal, choosing plain quotes or an E-string.
pub(crate) fn write_string(out: &mut String, s: &str) -> QbResult<()> {
    if s.contains('\0') {
        return Err(QbError::invalid_string(
            "string cannot contain NUL character",
        ));
    }
    if !s.chars().any(needs_escape) {
        out.push('\'');
        out.push_str(s);
        out.push('\'');
        return Ok(());
    }
    out.push_str("E'");
    for ch in s.chars() {
        match ch {
            '\'' => out.push_str("\\'"),
            '\\' => out.push_str("\\\\"),
            '\u{8}' => out.push_str("\\b"),
            '\u{c}' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            other => out.push(other),
        }
    }
    out.push('\'');
    Ok(())
}

fn needs_escape(ch: char) -> bool {
    matches!(ch, '\'' | '\\' | '\u{8}' | '\u{c}' | '\n' | '\r' | '\t')
}

// Stack formatting for i64, keeping the hot path off fmt machinery.
fn itoa_buf() -> [u8; 20] {
    [0u8; 20]
}

fn write_i64(buf: &mut [u8; 20], mut n: i64) -> &str {
    if n == 0 {
        return "0";
    }
    let negative = n < 0;
    let mut pos = buf.len();
    while n != 0 {
        pos -= 1;
        buf[pos] = b'0' + (n % 10).unsigned_abs() as u8;
        n /= 10;
    }
    if negative {
        pos -= 1;
        buf[pos] = b'-';
    }
    std::str::from_utf8(&buf[pos..]).unwrap_or("0")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ident_parts_join() {
        assert_eq!(
            escape_identifier(["a", "b", "c"]).unwrap(),
            r#""a"."b"."c""#
        );
    }

    #[test]
    fn ident_dotted_part_splits() {
        assert_eq!(escape_identifier(["a.b", "c"]).unwrap(), r#""a"."b"."c""#);
    }

    #[test]
    fn ident_wildcard_unquoted() {
        assert_eq!(escape_identifier(["a", "*"]).unwrap(), r#""a".*"#);
        assert_eq!(escape_identifier(["*", "a"]).unwrap(), r#"*."a""#);
    }

    #[test]
    fn ident_empty_parts_dropped() {
        assert_eq!(escape_identifier(["", "a", ""]).unwrap(), r#""a""#);
        assert_eq!(escape_identifier([""; 0]).unwrap(), "");
    }

    #[test]
    fn ident_quote_doubled() {
        assert_eq!(escape_identifier([r#"ta"ble"#]).unwrap(), r#""ta""ble""#);
    }

    #[test]
    fn ident_rejects_nul() {
        assert!(escape_identifier(["a\0b"]).unwrap_err().is_input_error());
    }

    #[test]
    fn ident_round_trip_plain() {
        for s in ["users", "CamelCase", "with space", "emoji✓"] {
            assert_eq!(escape_identifier([s]).unwrap(), format!("\"{s}\""));
        }
    }

    #[test]
    fn value_null_and_bools() {
        assert_eq!(escape_value(&Value::Null).unwrap(), "NULL");
        assert_eq!(escape_value(&Value::Bool(true)).unwrap(), "TRUE");
        assert_eq!(escape_value(&Value::Bool(false)).unwrap(), "FALSE");
    }

    #[test]
    fn value_numbers() {
        assert_eq!(escape_value(&Value::Int(0)).unwrap(), "0");
        assert_eq!(escape_value(&Value::Int(-42)).unwrap(), "-42");
        assert_eq!(escape_value(&Value::Int(i64::MIN)).unwrap(), i64::MIN.to_string());
        assert_eq!(escape_value(&Value::Float(1.5)).unwrap(), "1.5");
        assert_eq!(escape_value(&Value::Float(1.0)).unwrap(), "1");
    }

    #[test]
    fn value_nonfinite_floats() {
        assert_eq!(escape_value(&Value::Float(f64::NAN)).unwrap(), "'NaN'");
        assert_eq!(
            escape_value(&Value::Float(f64::INFINITY)).unwrap(),
            "'Infinity'"
        );
        assert_eq!(
            escape_value(&Value::Float(f64::NEG_INFINITY)).unwrap(),
            "'-Infinity'"
        );
    }

    #[test]
    fn numeric_fidelity() {
        for f in [0.1, -2.25, 1e300, 123456.789] {
            let text = escape_value(&Value::Float(f)).unwrap();
            assert_eq!(text.parse::<f64>().unwrap(), f);
        }
    }

    #[test]
    fn value_plain_string() {
        assert_eq!(escape_value(&"text".into()).unwrap(), "'text'");
    }

    #[test]
    fn value_string_with_quote_uses_estring() {
        assert_eq!(escape_value(&"'text'".into()).unwrap(), r"E'\'text\''");
    }

    #[test]
    fn value_string_escapes() {
        assert_eq!(escape_value(&"a\\b".into()).unwrap(), r"E'a\\b'");
        assert_eq!(escape_value(&"a\nb\tc".into()).unwrap(), r"E'a\nb\tc'");
        assert_eq!(
            escape_value(&"\u{8}\u{c}\r".into()).unwrap(),
            r"E'\b\f\r'"
        );
    }

    #[test]
    fn value_string_rejects_nul() {
        assert!(escape_value(&"a\0b".into()).is_err());
    }

    #[test]
    fn value_empty_array_and_object() {
        assert_eq!(escape_value(&Value::Array(vec![])).unwrap(), "'{}'");
        assert_eq!(escape_value(&Value::Object(vec![])).unwrap(), "'{}'");
    }

    #[test]
    fn value_array() {
        assert_eq!(
            escape_value(&vec![42, 23].into()).unwrap(),
            "ARRAY[42, 23]"
        );
    }

    #[test]
    fn value_nested_array_keeps_prefix_outermost() {
        let v: Value = vec![vec![0], vec![1]].into();
        assert_eq!(escape_value(&v).unwrap(), "ARRAY[[0], [1]]");
    }

    #[test]
    fn value_nested_empty_array() {
        let v = Value::Array(vec![Value::Array(vec![])]);
        assert_eq!(escape_value(&v).unwrap(), "ARRAY[[]]");
    }

    #[test]
    fn value_mixed_array() {
        let v = Value::Array(vec![Value::Int(1), "two".into(), Value::Null]);
        assert_eq!(escape_value(&v).unwrap(), "ARRAY[1, 'two', NULL]");
    }

    #[test]
    fn value_object_as_json() {
        let v = Value::object([("a", Value::Int(1)), ("b", "x".into())]);
        assert_eq!(escape_value(&v).unwrap(), r#"'{"a":1,"b":"x"}'"#);
    }

    #[test]
    fn value_object_with_quote_uses_estring() {
        let v = Value::object([("a", "it's")]);
        assert_eq!(escape_value(&v).unwrap(), r#"E'{"a":"it\'s"}'"#);
    }

    #[test]
    fn value_bytes_unsupported() {
        let err = escape_value(&Value::bytes([1u8, 2])).unwrap_err();
        assert!(matches!(err, QbError::UnsupportedValue(_)));
    }
}
