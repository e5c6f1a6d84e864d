use std::collections::BTreeMap;
use std::fmt;
use std::str;

use bytes::Bytes;
use snafu::prelude::*;

use crate::error::{Error, Utf8Snafu};

/// Bencode Value
///
/// A value exclusively owns its children.  Byte strings are `Bytes`, so a decoded byte string may
/// share the decoder's input buffer rather than copying it.
#[derive(Clone, Eq, Hash, PartialEq)]
pub enum Value {
    ByteString(ByteString),
    Integer(Integer),
    List(List),
    Dictionary(Dictionary),
}

pub type ByteString = Bytes;

// BEP 3 specifies integers as having unlimited precision.  For practical reasons, we restrict them
// to 64 bits instead of fully complying with BEP 3.
pub type Integer = i64;

pub type List = Vec<Value>;

// Use `BTreeMap` because BEP 3 requires dictionary keys to be sorted.
pub type Dictionary = BTreeMap<ByteString, Value>;

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Kind {
    ByteString,
    Integer,
    List,
    Dictionary,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::ByteString => "byte string",
            Self::Integer => "integer",
            Self::List => "list",
            Self::Dictionary => "dictionary",
        })
    }
}

impl Value {
    pub fn kind(&self) -> Kind {
        match self {
            Self::ByteString(_) => Kind::ByteString,
            Self::Integer(_) => Kind::Integer,
            Self::List(_) => Kind::List,
            Self::Dictionary(_) => Kind::Dictionary,
        }
    }

    fn mismatch(&self, expect: Kind) -> Error {
        Error::TypeMismatch {
            expect,
            actual: self.kind(),
        }
    }

    pub fn as_byte_string(&self) -> Result<&[u8], Error> {
        match self {
            Self::ByteString(bytes) => Ok(bytes),
            _ => Err(self.mismatch(Kind::ByteString)),
        }
    }

    pub fn as_byte_string_mut(&mut self) -> Result<&mut ByteString, Error> {
        match self {
            Self::ByteString(bytes) => Ok(bytes),
            _ => Err(self.mismatch(Kind::ByteString)),
        }
    }

    /// Views a byte string as UTF-8 text.
    ///
    /// Byte strings are not necessarily text, and this fails on non-UTF-8 contents as well as on
    /// the other kinds of values.
    pub fn as_str(&self) -> Result<&str, Error> {
        str::from_utf8(self.as_byte_string()?).context(Utf8Snafu)
    }

    pub fn as_integer(&self) -> Result<Integer, Error> {
        match self {
            Self::Integer(integer) => Ok(*integer),
            _ => Err(self.mismatch(Kind::Integer)),
        }
    }

    pub fn as_integer_mut(&mut self) -> Result<&mut Integer, Error> {
        match self {
            Self::Integer(integer) => Ok(integer),
            _ => Err(self.mismatch(Kind::Integer)),
        }
    }

    pub fn as_list(&self) -> Result<&[Self], Error> {
        match self {
            Self::List(list) => Ok(list),
            _ => Err(self.mismatch(Kind::List)),
        }
    }

    pub fn as_list_mut(&mut self) -> Result<&mut List, Error> {
        match self {
            Self::List(list) => Ok(list),
            _ => Err(self.mismatch(Kind::List)),
        }
    }

    pub fn as_dictionary(&self) -> Result<&Dictionary, Error> {
        match self {
            Self::Dictionary(dict) => Ok(dict),
            _ => Err(self.mismatch(Kind::Dictionary)),
        }
    }

    pub fn as_dictionary_mut(&mut self) -> Result<&mut Dictionary, Error> {
        match self {
            Self::Dictionary(dict) => Ok(dict),
            _ => Err(self.mismatch(Kind::Dictionary)),
        }
    }

    /// Looks up `key` in a dictionary value.
    pub fn get(&self, key: &[u8]) -> Result<Option<&Self>, Error> {
        Ok(self.as_dictionary()?.get(key))
    }
}

//
// Owned conversions hand the value back on mismatch so that the caller may try another kind.
//

impl TryFrom<Value> for ByteString {
    type Error = Value;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::ByteString(bytes) => Ok(bytes),
            _ => Err(value),
        }
    }
}

impl TryFrom<Value> for Integer {
    type Error = Value;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Integer(integer) => Ok(integer),
            _ => Err(value),
        }
    }
}

impl TryFrom<Value> for List {
    type Error = Value;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::List(list) => Ok(list),
            _ => Err(value),
        }
    }
}

impl TryFrom<Value> for Dictionary {
    type Error = Value;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Dictionary(dict) => Ok(dict),
            _ => Err(value),
        }
    }
}

impl From<ByteString> for Value {
    fn from(bytes: ByteString) -> Self {
        Self::ByteString(bytes)
    }
}

impl From<&[u8]> for Value {
    fn from(bytes: &[u8]) -> Self {
        Self::ByteString(Bytes::copy_from_slice(bytes))
    }
}

impl From<Vec<u8>> for Value {
    fn from(bytes: Vec<u8>) -> Self {
        Self::ByteString(bytes.into())
    }
}

impl From<&str> for Value {
    fn from(string: &str) -> Self {
        string.as_bytes().into()
    }
}

impl From<String> for Value {
    fn from(string: String) -> Self {
        string.into_bytes().into()
    }
}

impl From<Integer> for Value {
    fn from(integer: Integer) -> Self {
        Self::Integer(integer)
    }
}

impl From<List> for Value {
    fn from(list: List) -> Self {
        Self::List(list)
    }
}

impl From<Dictionary> for Value {
    fn from(dict: Dictionary) -> Self {
        Self::Dictionary(dict)
    }
}

impl FromIterator<Value> for Value {
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = Value>,
    {
        Self::List(iter.into_iter().collect())
    }
}

/// Collects into a dictionary.  Later entries overwrite earlier ones with the same key, and the
/// entries may come in any order.
impl<K> FromIterator<(K, Value)> for Value
where
    K: Into<ByteString>,
{
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = (K, Value)>,
    {
        Self::Dictionary(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}
