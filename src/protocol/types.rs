use bytes::{Buf, BufMut, Bytes, BytesMut};

use super::error::DecodeError;

// https://kafka.apache.org/protocol.html#protocol_types

/// UNSIGNED_VARINT: little-endian base-128. Each byte carries 7 data bits in
/// its low bits; a set high bit means another byte follows.
pub struct Uvarint;

impl Uvarint {
    pub fn encode(dst: &mut BytesMut, mut value: u64) {
        loop {
            let mut byte = (value & 0x7F) as u8;
            value >>= 7;
            if value != 0 {
                byte |= 0x80;
            }
            dst.put_u8(byte);
            if value == 0 {
                break;
            }
        }
    }

    pub fn decode(src: &mut Bytes) -> Result<u64, DecodeError> {
        let mut value: u64 = 0;
        let mut shift = 0;
        loop {
            if !src.has_remaining() {
                return Err(DecodeError::TruncatedVarint);
            }
            if shift >= 64 {
                return Err(DecodeError::VarintOverflow);
            }
            let byte = src.get_u8();
            value |= ((byte & 0x7F) as u64) << shift;
            if byte & 0x80 == 0 {
                return Ok(value);
            }
            shift += 7;
        }
    }
}

fn ensure_remaining(src: &Bytes, needed: usize) -> Result<(), DecodeError> {
    if src.remaining() < needed {
        Err(DecodeError::Truncated {
            needed,
            remaining: src.remaining(),
        })
    } else {
        Ok(())
    }
}

/// Represents a sequence of characters. First the length N + 1 is given as an
/// UNSIGNED_VARINT. Then N bytes follow which are the UTF-8 encoding of the
/// character sequence. A length of 0 denotes a null string.
pub struct CompactString;

impl CompactString {
    pub fn serialize(s: &str) -> Bytes {
        let mut b = BytesMut::new();
        Uvarint::encode(&mut b, s.len() as u64 + 1);
        b.put(s.as_bytes());
        b.freeze()
    }

    /// Null decodes to the empty string; nothing in this protocol subset
    /// distinguishes the two.
    pub fn deserialize(src: &mut Bytes) -> Result<String, DecodeError> {
        let len = Uvarint::decode(src)?; // string length + 1
        let string_len = len.saturating_sub(1) as usize;
        ensure_remaining(src, string_len)?;
        let bytes = src.split_to(string_len);
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}

impl Deserialize<String> for CompactString {
    fn deserialize(src: &mut Bytes) -> Result<String, DecodeError> {
        Self::deserialize(src)
    }
}

/// Represents a sequence of objects of a given type T.
/// First, the length N + 1 is given as an UNSIGNED_VARINT. Then N instances
/// of type T follow. A null array is represented with a length of 0.
pub struct CompactArray;

impl CompactArray {
    pub fn serialize<T: Serialize>(items: &[T]) -> Bytes {
        let mut b = BytesMut::new();
        Uvarint::encode(&mut b, items.len() as u64 + 1);
        for item in items {
            b.put(item.serialize());
        }
        b.freeze()
    }

    /// Deserializes a compact array of tagged structs: each element is
    /// followed by its own tagged-fields byte.
    pub fn deserialize<T, U: Deserialize<T>>(src: &mut Bytes) -> Result<Vec<T>, DecodeError> {
        let len = Uvarint::decode(src)?; // array length + 1
        let items_len = len.saturating_sub(1) as usize;

        let mut items = Vec::with_capacity(items_len.min(1024));
        for _ in 0..items_len {
            items.push(U::deserialize(src)?);
            ensure_remaining(src, 1)?;
            _ = src.get_u8(); // tag buffer
        }
        Ok(items)
    }
}

pub trait Serialize {
    fn serialize(&self) -> Bytes;
}

pub trait Deserialize<T> {
    fn deserialize(src: &mut Bytes) -> Result<T, DecodeError>;
}
