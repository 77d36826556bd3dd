use bytes::{BufMut, BytesMut};

use crate::protocol::types::CompactArray;
use crate::protocol::{ApiDescriptor, ApiKey, ErrorCode, Response, SUPPORTED_APIS};

use super::HeaderV0;

// https://kafka.apache.org/protocol.html#The_Messages_ApiVersions
pub struct ApiVersionsResponse {
    header: HeaderV0,
    requested_version: i16,
    throttle_time_ms: i32,
    bytes: BytesMut,
}

impl ApiVersionsResponse {
    pub fn new(correlation_id: i32, requested_version: i16) -> Self {
        let mut resp = Self {
            header: HeaderV0::new(correlation_id),
            requested_version,
            throttle_time_ms: 0,
            bytes: BytesMut::new(),
        };
        resp.serialize();
        resp
    }

    /// Fills the internal `bytes` field with the byte representation of the
    /// response. An out-of-range requested version gets a bare 2-byte error
    /// code body; the version table is advertised otherwise.
    fn serialize(&mut self) {
        // HEADER v0
        self.bytes.put_i32(self.header.correlation_id);

        let this_api = ApiDescriptor::lookup(ApiKey::ApiVersions);
        if !this_api.supports(self.requested_version) {
            self.bytes.put_i16(ErrorCode::UnsupportedVersion.into());
            return;
        }

        // BODY - ApiVersions Response
        self.bytes.put_i16(ErrorCode::None.into());
        self.bytes.put(CompactArray::serialize(&SUPPORTED_APIS));
        self.bytes.put_i32(self.throttle_time_ms);
        self.bytes.put_u8(0); // _tagged_fields
    }
}

impl Response for ApiVersionsResponse {
    fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}
