use bytes::Bytes;
use tracing::warn;

use crate::protocol::{
    request::{
        api_versions::ApiVersionsRequest,
        describe_topic_partitions::DescribeTopicPartitionsRequest, RequestHeader,
    },
    response::describe_topic_partitions::{DescribeTopicPartitionsResponse, Topic},
    ApiKey, Response,
};

/// Routes a decoded header and body to the handler for its api key.
///
/// Unknown keys produce no response at all; the connection loop just reads
/// the next frame.
pub fn process(header: &RequestHeader, body: &mut Bytes) -> Option<Box<dyn Response + Send>> {
    let api_key = match ApiKey::try_from(header.request_api_key) {
        Ok(key) => key,
        Err(_) => {
            warn!(
                api_key = header.request_api_key,
                correlation_id = header.correlation_id,
                "skipping request with unknown api key"
            );
            return None;
        }
    };

    let response: Box<dyn Response + Send> = match api_key {
        ApiKey::ApiVersions => {
            let req =
                ApiVersionsRequest::new(header.request_api_version, header.correlation_id);
            Box::new(req.process())
        }
        ApiKey::DescribeTopicPartitions => {
            let req = DescribeTopicPartitionsRequest::from_bytes(header.correlation_id, body);
            let topics = req.topics.into_iter().map(Topic::unknown).collect();
            Box::new(DescribeTopicPartitionsResponse::new(
                req.correlation_id,
                topics,
            ))
        }
    };

    Some(response)
}
