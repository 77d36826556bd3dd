pub mod api_versions;
pub mod describe_topic_partitions;

use bytes::{Buf, Bytes};

use super::error::DecodeError;

/// Fixed request header: everything between the size prefix and the body.
// https://kafka.apache.org/protocol.html#protocol_messages
#[derive(Debug)]
pub struct RequestHeader {
    pub request_api_key: i16,
    pub request_api_version: i16,
    pub correlation_id: i32,
}

impl RequestHeader {
    pub const SIZE: usize = 8;

    /// Consumes the 8 header bytes; whatever remains in `src` is the request
    /// body. All fields are big-endian.
    pub fn from_bytes(src: &mut Bytes) -> Result<Self, DecodeError> {
        if src.remaining() < Self::SIZE {
            return Err(DecodeError::Truncated {
                needed: Self::SIZE,
                remaining: src.remaining(),
            });
        }

        let request_api_key = src.get_i16(); // https://kafka.apache.org/protocol.html#protocol_api_keys
        let request_api_version = src.get_i16();
        let correlation_id = src.get_i32();

        Ok(Self {
            request_api_key,
            request_api_version,
            correlation_id,
        })
    }
}
