use bytes::Bytes;
use tracing::debug;

use crate::protocol::types::{CompactArray, CompactString};

/// DescribeTopicPartitions v0 request body: a compact array of topic names.
/// The trailing response_partition_limit and cursor fields are not used here.
// https://kafka.apache.org/protocol.html#The_Messages_DescribeTopicPartitions
#[derive(Debug)]
pub struct DescribeTopicPartitionsRequest {
    pub correlation_id: i32,
    pub topics: Vec<String>,
}

impl DescribeTopicPartitionsRequest {
    /// Lenient decode: a truncated or otherwise malformed body degrades to a
    /// single empty topic name so the connection still gets a response.
    pub fn from_bytes(correlation_id: i32, src: &mut Bytes) -> Self {
        let topics = match CompactArray::deserialize::<_, CompactString>(src) {
            Ok(topics) => topics,
            Err(e) => {
                debug!(error = %e, "malformed DescribeTopicPartitions body, substituting empty topic name");
                vec![String::new()]
            }
        };

        Self {
            correlation_id,
            topics,
        }
    }
}
