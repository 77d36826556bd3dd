use crate::protocol::response::api_versions::ApiVersionsResponse;

/// ApiVersions carries no fields of interest beyond the header; the body is
/// ignored and the negotiation runs off the requested version alone.
// https://kafka.apache.org/protocol.html#The_Messages_ApiVersions
#[derive(Debug)]
pub struct ApiVersionsRequest {
    api_version: i16,
    correlation_id: i32,
}

impl ApiVersionsRequest {
    pub fn new(api_version: i16, correlation_id: i32) -> Self {
        Self {
            api_version,
            correlation_id,
        }
    }

    pub fn process(self) -> ApiVersionsResponse {
        ApiVersionsResponse::new(self.correlation_id, self.api_version)
    }
}
