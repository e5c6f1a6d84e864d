use std::cmp;

use bytes::Bytes;
use snafu::prelude::*;

use crate::config::DecodeConfig;
use crate::error::{
    ByteStringLengthSnafu, DepthExceededSnafu, Error, IncompleteSnafu, TRAILING_DATA_PREVIEW,
    TrailingDataSnafu,
};
use crate::value::{ByteString, Dictionary, Integer, List, Value};

/// Decodes one value that must span the entire `data`.
pub fn decode(data: &[u8]) -> Result<Value, Error> {
    decode_with(data, &DecodeConfig::default())
}

pub fn decode_with(data: &[u8], config: &DecodeConfig) -> Result<Value, Error> {
    Decoder::new(Bytes::copy_from_slice(data), *config).decode()
}

/// Same as `decode`, except that decoded byte strings share `data` rather than copying it.
pub fn decode_bytes(data: Bytes) -> Result<Value, Error> {
    Decoder::new(data, DecodeConfig::default()).decode()
}

/// Recursive descent decoder.
///
/// The cursor only moves forward.  Once a method returns an error, the decoder state is
/// unspecified, and the decoder should be dropped.
#[derive(Debug)]
pub struct Decoder {
    input: Bytes,
    offset: usize,
    depth: usize,
    config: DecodeConfig,
}

impl Decoder {
    pub fn new(input: Bytes, config: DecodeConfig) -> Self {
        Self {
            input,
            offset: 0,
            depth: 0,
            config,
        }
    }

    pub fn config(&self) -> &DecodeConfig {
        &self.config
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn remaining(&self) -> usize {
        self.input.len() - self.offset
    }

    /// Decodes one value and then requires that the input is fully consumed.
    pub fn decode(mut self) -> Result<Value, Error> {
        tracing::trace!(size = self.input.len(), config = ?self.config, "decode");
        let value = self.decode_value()?;
        self.finish()?;
        Ok(value)
    }

    /// Checks that no input remains.
    pub fn finish(&self) -> Result<(), Error> {
        ensure!(
            self.remaining() == 0,
            TrailingDataSnafu {
                offset: self.offset,
                trailing: self.input.slice(
                    self.offset..cmp::min(self.input.len(), self.offset + TRAILING_DATA_PREVIEW),
                ),
            },
        );
        Ok(())
    }

    /// Decodes the next value and leaves the cursor right after it.
    pub fn decode_value(&mut self) -> Result<Value, Error> {
        match self.peek()? {
            b'0'..=b'9' => self.decode_byte_string().map(Value::ByteString),
            b'i' => self.decode_integer().map(Value::Integer),
            b'l' => self.decode_list().map(Value::List),
            b'd' => self.decode_dictionary().map(Value::Dictionary),
            prefix => Err(Error::Prefix {
                prefix,
                offset: self.offset,
            }),
        }
    }

    fn peek(&self) -> Result<u8, Error> {
        match self.input.get(self.offset) {
            Some(b) => Ok(*b),
            None if self.input.is_empty() => Err(Error::Eof),
            None => Err(Error::Incomplete {
                offset: self.offset,
            }),
        }
    }

    /// Returns the offset of the first byte at or after the cursor that does not match the
    /// `predicate`.
    fn scan<Predicate>(&self, mut predicate: Predicate) -> Result<usize, Error>
    where
        Predicate: FnMut(&u8) -> bool,
    {
        self.input[self.offset..]
            .iter()
            .position(|b| !predicate(b))
            .map(|n| self.offset + n)
            .ok_or(Error::Incomplete {
                offset: self.input.len(),
            })
    }

    fn decode_byte_string(&mut self) -> Result<ByteString, Error> {
        let start = self.offset;
        let end = self.scan(u8::is_ascii_digit)?;
        ensure!(
            self.input[end] == b':',
            ByteStringLengthSnafu {
                length: self.input.slice(start..=end),
                offset: start,
            },
        );
        let length = self.parse_length(start, end)?;
        self.offset = end + 1;

        // It is important to do the check before slicing (or allocating anything).
        ensure!(
            length <= self.remaining(),
            IncompleteSnafu {
                offset: self.input.len(),
            },
        );
        let bytes = self.input.slice(self.offset..self.offset + length);
        self.offset += length;
        Ok(bytes)
    }

    fn parse_length(&self, start: usize, end: usize) -> Result<usize, Error> {
        let to_error = || Error::ByteStringLength {
            length: self.input.slice(start..end),
            offset: start,
        };
        // Reuse the integer rules so that `Canonical` rejects leading zeros.  `scan` has already
        // ruled out the sign.
        match self.config.integers.parse_integer(&self.input[start..end], start) {
            Ok(length) => usize::try_from(length).map_err(|_| to_error()),
            Err(Error::IntegerOverflow { .. }) => Err(to_error()),
            Err(error) => Err(error),
        }
    }

    fn decode_integer(&mut self) -> Result<Integer, Error> {
        self.offset += 1; // 'i'
        let start = self.offset;
        let end = self.scan(|b| *b != b'e')?;
        let integer = self.config.integers.parse_integer(&self.input[start..end], start)?;
        self.offset = end + 1;
        Ok(integer)
    }

    fn decode_list(&mut self) -> Result<List, Error> {
        self.enter()?;
        self.offset += 1; // 'l'
        let mut list = List::new();
        while self.peek()? != b'e' {
            list.push(self.decode_value()?);
        }
        self.offset += 1;
        self.leave();
        Ok(list)
    }

    fn decode_dictionary(&mut self) -> Result<Dictionary, Error> {
        self.enter()?;
        self.offset += 1; // 'd'
        let mut dict = Dictionary::new();
        loop {
            let key_offset = self.offset;
            match self.peek()? {
                b'e' => break,
                b'0'..=b'9' => {}
                prefix => {
                    return Err(Error::KeyType {
                        prefix,
                        offset: key_offset,
                    });
                }
            }
            let key = self.decode_byte_string()?;
            self.config
                .keys
                .ensure_dictionary_key(&dict, &key, key_offset)?;
            if self.peek()? == b'e' {
                return Err(Error::MissingValue {
                    key,
                    offset: self.offset,
                });
            }
            let value = self.decode_value()?;
            if dict.insert(key.clone(), value).is_some() {
                tracing::debug!(offset = key_offset, ?key, "overwrite duplicate dictionary key");
            }
        }
        self.offset += 1;
        self.leave();
        Ok(dict)
    }

    fn enter(&mut self) -> Result<(), Error> {
        self.depth += 1;
        ensure!(
            self.depth <= self.config.max_depth,
            DepthExceededSnafu {
                limit: self.config.max_depth,
                offset: self.offset,
            },
        );
        Ok(())
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }
}
