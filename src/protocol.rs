pub mod error;
pub mod request;
pub mod response;
pub mod types;

use bytes::{BufMut, Bytes, BytesMut};
use num_enum::{IntoPrimitive, TryFromPrimitive};

use self::types::Serialize;

/// https://kafka.apache.org/protocol.html#protocol_api_keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoPrimitive, TryFromPrimitive)]
#[repr(i16)]
pub enum ApiKey {
    ApiVersions = 18,
    DescribeTopicPartitions = 75,
}

/// https://kafka.apache.org/protocol.html#protocol_error_codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, IntoPrimitive)]
#[repr(i16)]
pub enum ErrorCode {
    None = 0,
    UnknownTopicOrPartition = 3,
    UnsupportedVersion = 35,
}

/// One row of the version table this broker advertises via ApiVersions.
#[derive(Debug, Clone, Copy)]
pub struct ApiDescriptor {
    pub api_key: ApiKey,
    pub min_version: i16,
    pub max_version: i16,
}

/// Every API this broker speaks, in the order it is advertised.
pub const SUPPORTED_APIS: [ApiDescriptor; 2] = [
    ApiDescriptor {
        api_key: ApiKey::ApiVersions,
        min_version: 0,
        max_version: 4,
    },
    ApiDescriptor {
        api_key: ApiKey::DescribeTopicPartitions,
        min_version: 0,
        max_version: 0,
    },
];

impl ApiDescriptor {
    pub fn lookup(api_key: ApiKey) -> &'static ApiDescriptor {
        SUPPORTED_APIS
            .iter()
            .find(|d| d.api_key == api_key)
            .expect("every ApiKey variant has a table row")
    }

    pub fn supports(&self, version: i16) -> bool {
        (self.min_version..=self.max_version).contains(&version)
    }
}

/// Wire form of one ApiVersions table row: key, min, max, tagged fields.
impl Serialize for ApiDescriptor {
    fn serialize(&self) -> Bytes {
        let mut b = BytesMut::new();
        b.put_i16(self.api_key.into());
        b.put_i16(self.min_version);
        b.put_i16(self.max_version);
        b.put_u8(0); // _tagged_fields
        b.freeze()
    }
}

/// Response Message is a wrapper around an API response with prepended message size
// https://kafka.apache.org/protocol.html#protocol_common
pub struct ResponseMessage {
    bytes: BytesMut,
}

impl ResponseMessage {
    /// Prepends the 4-byte big-endian size of the source API response.
    pub fn from_bytes(src: &[u8]) -> Self {
        let mut bytes = BytesMut::with_capacity(src.len() + 4);
        bytes.put_i32(src.len() as i32);
        bytes.extend_from_slice(src);
        Self { bytes }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

pub trait Response {
    fn as_bytes(&self) -> &[u8];
}
