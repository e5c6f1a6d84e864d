use bytes::{BufMut, Bytes, BytesMut};

use crate::value::{Integer, Value};

/// Encodes `value` in canonical form.
pub fn encode(value: &Value) -> Bytes {
    let mut buf = BytesMut::with_capacity(value.encoded_len());
    value.encode(&mut buf);
    buf.freeze()
}

/// Appends the canonical encoding of `value` to `buf`.
pub fn encode_to<B>(value: &Value, buf: &mut B)
where
    B: BufMut,
{
    value.encode(buf);
}

impl Value {
    /// Appends the canonical encoding of `self` to `buf`.
    ///
    /// Encoding cannot fail: every value has exactly one canonical encoding, and `BufMut` grows
    /// (or panics when it cannot, as with a fixed-size slice).
    pub fn encode<B>(&self, buf: &mut B)
    where
        B: BufMut,
    {
        match self {
            Self::ByteString(bytes) => put_byte_string(buf, bytes),
            Self::Integer(integer) => {
                buf.put_u8(b'i');
                buf.put_slice(integer.to_string().as_bytes());
                buf.put_u8(b'e');
            }
            Self::List(list) => {
                buf.put_u8(b'l');
                for item in list {
                    item.encode(buf);
                }
                buf.put_u8(b'e');
            }
            Self::Dictionary(dict) => {
                buf.put_u8(b'd');
                // `BTreeMap` iterates in the lexicographic byte order of the keys.
                for (key, value) in dict {
                    put_byte_string(buf, key);
                    value.encode(buf);
                }
                buf.put_u8(b'e');
            }
        }
    }

    /// Returns the exact size of the canonical encoding of `self`.
    pub fn encoded_len(&self) -> usize {
        match self {
            Self::ByteString(bytes) => byte_string_len(bytes),
            Self::Integer(integer) => 2 + integer_len(*integer),
            Self::List(list) => 2 + list.iter().map(Self::encoded_len).sum::<usize>(),
            Self::Dictionary(dict) => {
                2 + dict
                    .iter()
                    .map(|(key, value)| byte_string_len(key) + value.encoded_len())
                    .sum::<usize>()
            }
        }
    }
}

fn put_byte_string<B>(buf: &mut B, bytes: &[u8])
where
    B: BufMut,
{
    buf.put_slice(bytes.len().to_string().as_bytes());
    buf.put_u8(b':');
    buf.put_slice(bytes);
}

fn byte_string_len(bytes: &[u8]) -> usize {
    decimal_len(bytes.len() as u64) + 1 + bytes.len()
}

fn integer_len(integer: Integer) -> usize {
    usize::from(integer < 0) + decimal_len(integer.unsigned_abs())
}

fn decimal_len(n: u64) -> usize {
    n.checked_ilog10().map_or(1, |log| log as usize + 1)
}

#[cfg(test)]
mod tests {
    use crate::testing::{vb, vd, vi, vl};

    use super::*;

    #[test]
    fn encode() {
        fn test(value: Value, expect: &[u8]) {
            assert_eq!(super::encode(&value), expect);
            assert_eq!(value.encoded_len(), expect.len());

            let mut buf = b"prefix:".to_vec();
            encode_to(&value, &mut buf);
            assert_eq!(&buf[..7], b"prefix:");
            assert_eq!(&buf[7..], expect);
        }

        test(vb(b""), b"0:");
        test(vb(b"spam"), b"4:spam");
        test(vb(&[b'x'; 10]), b"10:xxxxxxxxxx");
        test(vb(b"\x00\xff"), b"2:\x00\xff");

        test(vi(0), b"i0e");
        test(vi(42), b"i42e");
        test(vi(-3), b"i-3e");
        test(vi(10), b"i10e");
        test(vi(-10), b"i-10e");
        test(vi(i64::MAX), b"i9223372036854775807e");
        test(vi(i64::MIN), b"i-9223372036854775808e");

        test(vl([]), b"le");
        test(vl([vi(1), vi(2), vb(b"foo")]), b"li1ei2e3:fooe");
        test(vl([vl([]), vl([vl([])])]), b"llelleee");

        test(vd([]), b"de");
        test(
            vd([(b"foo", vi(42)), (b"bar", vb(b"spam"))]),
            b"d3:bar4:spam3:fooi42ee",
        );
        test(
            vd([(b"b", vi(2)), (b"a", vi(1)), (b"", vd([]))]),
            b"d0:de1:ai1e1:bi2ee",
        );
        // Byte order, not text order.
        test(
            vd([(b"a", vi(1)), (b"B", vi(2)), (b"\x80", vi(3)), (b"aa", vi(4))]),
            b"d1:Bi2e1:ai1e2:aai4e1:\x80i3ee",
        );
    }

    #[test]
    fn decimal_len() {
        for n in [0, 1, 9, 10, 99, 100, 12345, u64::MAX] {
            assert_eq!(super::decimal_len(n), n.to_string().len());
        }
        for n in [0, -1, -9, -10, 7, i64::MAX, i64::MIN] {
            assert_eq!(integer_len(n), n.to_string().len());
        }
    }
}
