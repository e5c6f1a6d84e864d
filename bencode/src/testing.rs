use bytes::Bytes;

use crate::value::{Integer, Value};

pub(crate) fn vb(bytes: &[u8]) -> Value {
    Value::ByteString(Bytes::copy_from_slice(bytes))
}

pub(crate) fn vi(integer: Integer) -> Value {
    Value::Integer(integer)
}

pub(crate) fn vl<const N: usize>(items: [Value; N]) -> Value {
    Value::List(items.into())
}

pub(crate) fn vd<const N: usize>(items: [(&[u8], Value); N]) -> Value {
    Value::Dictionary(
        items
            .into_iter()
            .map(|(k, v)| (Bytes::copy_from_slice(k), v))
            .collect(),
    )
}

/// Returns `depth` nested empty lists, e.g., `llleee` for 3.
pub(crate) fn nested_lists(depth: usize) -> Vec<u8> {
    let mut data = vec![b'l'; depth];
    data.resize(depth * 2, b'e');
    data
}
