//! Decoder Configuration

use std::str;

use bytes::Bytes;
use snafu::prelude::*;

use crate::error::{
    DuplicateKeySnafu, Error, IntegerSnafu, StrictDictionaryKeySnafu, StrictIntegerSnafu,
};
use crate::value::{ByteString, Dictionary, Integer};

/// Nesting depth limit of `DecodeConfig::default`.
pub const DEFAULT_MAX_DEPTH: usize = 512;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize),
    serde(default, deny_unknown_fields)
)]
pub struct DecodeConfig {
    /// Maximum number of nested lists and dictionaries.  The outermost container is at depth 1.
    pub max_depth: usize,
    pub integers: IntegerPolicy,
    pub keys: KeyPolicy,
}

/// How strictly the decoder treats the digits of an integer.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize),
    serde(rename_all = "kebab-case")
)]
pub enum IntegerPolicy {
    /// Only the unique representation is accepted: no `-0` and no leading zeros.
    #[default]
    Canonical,
    /// Any run of decimal digits with an optional leading `-` is accepted.
    Lenient,
}

/// How strictly the decoder treats dictionary keys.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Deserialize),
    serde(rename_all = "kebab-case")
)]
pub enum KeyPolicy {
    /// Keys may come in any order, and a duplicate key overwrites the earlier value.
    LastWins,
    /// Keys may come in any order, but must not repeat.
    #[default]
    Unique,
    /// Keys must be strictly increasing, i.e., already in canonical order.
    Sorted,
}

impl Default for DecodeConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            integers: IntegerPolicy::default(),
            keys: KeyPolicy::default(),
        }
    }
}

impl DecodeConfig {
    /// Accepts only input that is already in canonical form.
    pub fn strict() -> Self {
        Self {
            integers: IntegerPolicy::Canonical,
            keys: KeyPolicy::Sorted,
            ..Self::default()
        }
    }

    /// Accepts `-0`, leading zeros, and duplicate keys.
    pub fn lenient() -> Self {
        Self {
            integers: IntegerPolicy::Lenient,
            keys: KeyPolicy::LastWins,
            ..Self::default()
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_integers(mut self, integers: IntegerPolicy) -> Self {
        self.integers = integers;
        self
    }

    pub fn with_keys(mut self, keys: KeyPolicy) -> Self {
        self.keys = keys;
        self
    }
}

impl IntegerPolicy {
    fn ensure_integer(self, integer: &[u8], offset: usize) -> Result<(), Error> {
        ensure!(
            lazy_regex::regex_is_match!(r"(?x-u) ^ -? \d+ $ "B, integer),
            IntegerSnafu {
                integer: Bytes::copy_from_slice(integer),
                offset,
            },
        );
        if self == Self::Canonical {
            ensure!(
                lazy_regex::regex_is_match!(r#"(?x-u) ^ (?: 0 | -? [1-9] \d* ) $ "#B, integer),
                StrictIntegerSnafu {
                    integer: Bytes::copy_from_slice(integer),
                    offset,
                },
            );
        }
        Ok(())
    }

    /// Parses the digits between `i` and `e`; `offset` is where the digits start.
    pub(crate) fn parse_integer(self, integer: &[u8], offset: usize) -> Result<Integer, Error> {
        self.ensure_integer(integer, offset)?;
        // `ensure_integer` has checked that it is ASCII, and thus only overflow remains.
        str::from_utf8(integer)
            .ok()
            .and_then(|integer| integer.parse().ok())
            .ok_or_else(|| Error::IntegerOverflow {
                integer: Bytes::copy_from_slice(integer),
                offset,
            })
    }
}

impl KeyPolicy {
    /// Checks `key` against the entries decoded so far; `offset` is where the key starts.
    pub(crate) fn ensure_dictionary_key(
        self,
        dict: &Dictionary,
        key: &ByteString,
        offset: usize,
    ) -> Result<(), Error> {
        match self {
            Self::LastWins => {}
            Self::Unique => ensure!(
                !dict.contains_key(key),
                DuplicateKeySnafu {
                    key: key.clone(),
                    offset,
                },
            ),
            Self::Sorted => {
                if let Some((last_key, _)) = dict.last_key_value() {
                    ensure!(
                        last_key < key,
                        StrictDictionaryKeySnafu {
                            last_key: last_key.clone(),
                            key: key.clone(),
                            offset,
                        },
                    );
                }
            }
        }
        Ok(())
    }
}
