//! Implementation of Bencode Format as Specified in BEP 3

pub mod config;
pub mod error;
pub mod value;

mod de;
mod fmt;
mod ser;

#[cfg(test)]
mod testing;

//
// Implementer's Notes:
//
// * The wire format has four kinds of values:
//
//   | Kind         | Wire                 | Example                 |
//   |--------------|----------------------|-------------------------|
//   | Integer      | `i<base10>e`         | `i-3e`                  |
//   | Byte string  | `<length>:<bytes>`   | `4:spam`                |
//   | List         | `l<values>e`         | `li1e3:fooe`            |
//   | Dictionary   | `d<key><value>...e`  | `d3:bar4:spam3:fooi42ee` |
//
// * The only canonicalization rule that the encoder has to enforce is the dictionary key order.
//   We get it for free from `BTreeMap`, whose iteration order is the lexicographic byte order of
//   the keys.  The decoder, on the other hand, accepts unsorted keys unless configured otherwise,
//   and thus decoding and then encoding unsorted input does not reproduce the input.
//
// * Decoding is recursive descent.  Each nested container costs one stack frame, and
//   `DecodeConfig::max_depth` caps that.
//

pub use crate::config::{DEFAULT_MAX_DEPTH, DecodeConfig, IntegerPolicy, KeyPolicy};
pub use crate::de::{Decoder, decode, decode_bytes, decode_with};
pub use crate::error::Error;
pub use crate::ser::{encode, encode_to};
pub use crate::value::{ByteString, Dictionary, Integer, Kind, List, Value};
