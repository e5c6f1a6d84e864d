use std::str::Utf8Error;

use bytes::Bytes;
use snafu::prelude::*;

use crate::value::Kind;

#[derive(Clone, Debug, Eq, PartialEq, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    //
    // Bencode errors.
    //

    // `Eof` (empty input) is a special case of `Incomplete` (partial input).  They are both what
    // callers would call truncated input.
    #[snafu(display("end of file"))]
    Eof,
    #[snafu(display("incomplete bencode data at offset {offset}"))]
    Incomplete { offset: usize },

    #[snafu(display("unknown prefix character at offset {offset}: '{}'", prefix.escape_ascii()))]
    Prefix { prefix: u8, offset: usize },

    #[snafu(display("invalid byte string length at offset {offset}: {length:?}"))]
    ByteStringLength { length: Bytes, offset: usize },

    // BEP 3 specifies that integers have unlimited precision, but we do not support this for
    // practical reasons.
    #[snafu(display("invalid integer at offset {offset}: {integer:?}"))]
    Integer { integer: Bytes, offset: usize },
    #[snafu(display("i64 overflow at offset {offset}: {integer:?}"))]
    IntegerOverflow { integer: Bytes, offset: usize },

    #[snafu(display(
        "expect byte string dictionary key at offset {offset}: '{}'",
        prefix.escape_ascii()
    ))]
    KeyType { prefix: u8, offset: usize },
    #[snafu(display("missing dictionary value at offset {offset}: {key:?}"))]
    MissingValue { key: Bytes, offset: usize },

    #[snafu(display("nesting depth limit {limit} exceeded at offset {offset}"))]
    DepthExceeded { limit: usize, offset: usize },

    // `trailing` holds at most `TRAILING_DATA_PREVIEW` bytes.
    #[snafu(display("unexpected trailing data at offset {offset}: {trailing:?}"))]
    TrailingData { offset: usize, trailing: Bytes },

    //
    // Strict Bencode errors.
    //
    #[snafu(display("expect strict integer at offset {offset}: {integer:?}"))]
    StrictInteger { integer: Bytes, offset: usize },
    #[snafu(display("duplicate dictionary key at offset {offset}: {key:?}"))]
    DuplicateKey { key: Bytes, offset: usize },
    #[snafu(display(
        "expect strictly increasing dictionary keys at offset {offset}: {last_key:?} >= {key:?}"
    ))]
    StrictDictionaryKey {
        last_key: Bytes,
        key: Bytes,
        offset: usize,
    },

    //
    // Value access errors.
    //
    #[snafu(display("expect {expect}: {actual}"))]
    TypeMismatch { expect: Kind, actual: Kind },
    #[snafu(display("expect utf-8 byte string"))]
    Utf8 { source: Utf8Error },
}

pub(crate) const TRAILING_DATA_PREVIEW: usize = 32;

impl Error {
    /// True when the input ended before a value was complete.
    pub fn is_incomplete(&self) -> bool {
        matches!(self, Self::Eof | Self::Incomplete { .. })
    }

    /// True when the input violates the grammar (or the configured strictness) at some offset.
    pub fn is_malformed(&self) -> bool {
        matches!(
            self,
            Self::Prefix { .. }
                | Self::ByteStringLength { .. }
                | Self::Integer { .. }
                | Self::IntegerOverflow { .. }
                | Self::KeyType { .. }
                | Self::MissingValue { .. }
                | Self::StrictInteger { .. }
                | Self::DuplicateKey { .. }
                | Self::StrictDictionaryKey { .. },
        )
    }

    pub fn is_strict(&self) -> bool {
        matches!(
            self,
            Self::StrictInteger { .. } | Self::DuplicateKey { .. } | Self::StrictDictionaryKey { .. },
        )
    }

    /// Returns the input offset at which decoding failed.
    pub fn offset(&self) -> Option<usize> {
        match self {
            Self::Eof => Some(0),
            Self::Incomplete { offset }
            | Self::Prefix { offset, .. }
            | Self::ByteStringLength { offset, .. }
            | Self::Integer { offset, .. }
            | Self::IntegerOverflow { offset, .. }
            | Self::KeyType { offset, .. }
            | Self::MissingValue { offset, .. }
            | Self::DepthExceeded { offset, .. }
            | Self::TrailingData { offset, .. }
            | Self::StrictInteger { offset, .. }
            | Self::DuplicateKey { offset, .. }
            | Self::StrictDictionaryKey { offset, .. } => Some(*offset),
            Self::TypeMismatch { .. } | Self::Utf8 { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display() {
        fn test(error: Error, expect: &str) {
            assert_eq!(error.to_string(), expect);
        }

        test(Error::Eof, "end of file");
        test(
            Error::Incomplete { offset: 3 },
            "incomplete bencode data at offset 3",
        );
        test(
            Error::Prefix {
                prefix: b'\n',
                offset: 0,
            },
            "unknown prefix character at offset 0: '\\n'",
        );
        test(
            Error::Integer {
                integer: Bytes::from_static(b"4x"),
                offset: 1,
            },
            "invalid integer at offset 1: b\"4x\"",
        );
        test(
            Error::StrictDictionaryKey {
                last_key: Bytes::from_static(b"foo"),
                key: Bytes::from_static(b"bar"),
                offset: 12,
            },
            "expect strictly increasing dictionary keys at offset 12: b\"foo\" >= b\"bar\"",
        );
        test(
            Error::TypeMismatch {
                expect: Kind::Integer,
                actual: Kind::ByteString,
            },
            "expect integer: byte string",
        );
    }

    #[test]
    fn classify() {
        let incomplete = Error::Incomplete { offset: 4 };
        assert!(incomplete.is_incomplete());
        assert!(!incomplete.is_malformed());
        assert_eq!(incomplete.offset(), Some(4));

        assert!(Error::Eof.is_incomplete());
        assert_eq!(Error::Eof.offset(), Some(0));

        let prefix = Error::Prefix {
            prefix: b'x',
            offset: 0,
        };
        assert!(prefix.is_malformed());
        assert!(!prefix.is_strict());

        let duplicate = Error::DuplicateKey {
            key: Bytes::from_static(b"a"),
            offset: 7,
        };
        assert!(duplicate.is_malformed());
        assert!(duplicate.is_strict());
        assert_eq!(duplicate.offset(), Some(7));

        let trailing = Error::TrailingData {
            offset: 3,
            trailing: Bytes::from_static(b"i2e"),
        };
        assert!(!trailing.is_malformed());
        assert!(!trailing.is_incomplete());

        let depth = Error::DepthExceeded {
            limit: 2,
            offset: 2,
        };
        assert!(!depth.is_malformed());
        assert_eq!(depth.offset(), Some(2));

        let mismatch = Error::TypeMismatch {
            expect: Kind::List,
            actual: Kind::Dictionary,
        };
        assert!(!mismatch.is_malformed());
        assert_eq!(mismatch.offset(), None);
    }
}
