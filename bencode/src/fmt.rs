use std::fmt;

use crate::value::{Dictionary, Value};

/// Formats a byte string as a double-quoted, ASCII-escaped string.
pub(crate) struct EscapeAscii<'a>(pub(crate) &'a [u8]);

impl fmt::Debug for EscapeAscii<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\"", self.0.escape_ascii())
    }
}

impl fmt::Display for EscapeAscii<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

struct DebugDictionary<'a>(&'a Dictionary);

impl fmt::Debug for DebugDictionary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.0.iter().map(|(k, v)| (EscapeAscii(k), v)))
            .finish()
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ByteString(bytes) => f
                .debug_tuple("ByteString")
                .field(&EscapeAscii(bytes))
                .finish(),
            Self::Integer(integer) => f.debug_tuple("Integer").field(integer).finish(),
            Self::List(list) => f.debug_tuple("List").field(list).finish(),
            Self::Dictionary(dict) => f
                .debug_tuple("Dictionary")
                .field(&DebugDictionary(dict))
                .finish(),
        }
    }
}

/// Formats a value in a compact, human-readable notation, e.g., `{"bar": "spam", "foo": 42}`.
///
/// This is for diagnostics only, and the decoder does not accept it as input.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ByteString(bytes) => write!(f, "{}", EscapeAscii(bytes)),
            Self::Integer(integer) => write!(f, "{integer}"),
            Self::List(list) => {
                f.write_str("[")?;
                for (i, item) in list.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Self::Dictionary(dict) => {
                f.write_str("{")?;
                for (i, (key, value)) in dict.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}: {value}", EscapeAscii(key))?;
                }
                f.write_str("}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::testing::{vb, vd, vi, vl};

    use super::*;

    #[test]
    fn escape_ascii() {
        assert_eq!(format!("{:?}", EscapeAscii(b"")), "\"\"");
        assert_eq!(format!("{}", EscapeAscii(b"spam")), "\"spam\"");
        assert_eq!(
            format!("{}", EscapeAscii(b"\x00\"\xff\n")),
            "\"\\x00\\\"\\xff\\n\"",
        );
    }

    #[test]
    fn debug() {
        assert_eq!(format!("{:?}", vb(b"a\x80")), "ByteString(\"a\\x80\")");
        assert_eq!(format!("{:?}", vi(-1)), "Integer(-1)");
        assert_eq!(
            format!("{:?}", vl([vi(1), vb(b"x")])),
            "List([Integer(1), ByteString(\"x\")])",
        );
        assert_eq!(
            format!("{:?}", vd([(b"k", vl([]))])),
            "Dictionary({\"k\": List([])})",
        );
    }

    #[test]
    fn display() {
        fn test(value: Value, expect: &str) {
            assert_eq!(value.to_string(), expect);
        }

        test(vi(42), "42");
        test(vi(-3), "-3");
        test(vb(b"spam"), "\"spam\"");
        test(vb(b"\xde\xad"), "\"\\xde\\xad\"");
        test(vl([]), "[]");
        test(vd([]), "{}");
        test(vl([vi(1), vi(2), vb(b"foo")]), "[1, 2, \"foo\"]");
        test(
            vd([(b"foo", vi(42)), (b"bar", vb(b"spam"))]),
            "{\"bar\": \"spam\", \"foo\": 42}",
        );
        test(
            vd([(b"a", vl([vd([(b"b", vl([]))])]))]),
            "{\"a\": [{\"b\": []}]}",
        );
    }
}
