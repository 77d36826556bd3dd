use bytes::{BufMut, Bytes, BytesMut};

use crate::protocol::types::{CompactArray, CompactString, Serialize, Uvarint};
use crate::protocol::{ErrorCode, Response};

use super::HeaderV1;

/// Null pagination cursor.
const NULL_CURSOR: u8 = 0x00;

pub struct DescribeTopicPartitionsResponse {
    header: HeaderV1,
    throttle_time_ms: i32,
    topics: Vec<Topic>,
    next_cursor: u8,
    bytes: BytesMut,
}

impl DescribeTopicPartitionsResponse {
    pub fn new(correlation_id: i32, topics: Vec<Topic>) -> Self {
        let mut resp = Self {
            header: HeaderV1::new(correlation_id),
            throttle_time_ms: 0,
            topics,
            next_cursor: NULL_CURSOR,
            bytes: BytesMut::new(),
        };
        resp.serialize();
        resp
    }

    /// Fills the internal `bytes` field with the byte representation of the
    /// response.
    // https://kafka.apache.org/protocol.html#The_Messages_DescribeTopicPartitions
    fn serialize(&mut self) {
        // HEADER v1
        self.bytes.put_i32(self.header.correlation_id);
        self.bytes.put_u8(self.header.tag_buffer);

        // BODY
        self.bytes.put_i32(self.throttle_time_ms);
        self.bytes.put(CompactArray::serialize(&self.topics));
        self.bytes.put_u8(self.next_cursor);
        self.bytes.put_u8(0); // tag buffer
    }
}

impl Response for DescribeTopicPartitionsResponse {
    fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

pub struct Topic {
    pub error_code: ErrorCode,
    pub name: String,       // COMPACT_NULLABLE_STRING
    pub topic_id: [u8; 16], // UUID
    pub is_internal: bool,
    pub partitions: Vec<Partition>,
    pub authorized_operations: i32, // bitfield of the operations authorized on this topic
}

impl Topic {
    /// The descriptor this broker answers every query with: no metadata store
    /// backs it, so every topic is unknown.
    pub fn unknown(name: String) -> Self {
        Self {
            error_code: ErrorCode::UnknownTopicOrPartition,
            name,
            topic_id: [0; 16],
            is_internal: false,
            partitions: Vec::new(),
            authorized_operations: 0,
        }
    }
}

impl Serialize for Topic {
    fn serialize(&self) -> Bytes {
        let mut b = BytesMut::new();
        b.put_i16(self.error_code.into());
        b.put(CompactString::serialize(&self.name));
        b.put(&self.topic_id[..]);
        b.put_u8(self.is_internal.into());

        // partitions: COMPACT_ARRAY, always empty here
        Uvarint::encode(&mut b, self.partitions.len() as u64 + 1);

        b.put_i32(self.authorized_operations);
        b.put_u8(0); // tag buffer
        b.freeze()
    }
}

pub struct Partition;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_unknown_topic() {
        let resp = DescribeTopicPartitionsResponse::new(7, vec![Topic::unknown("foo".into())]);

        let mut expected = vec![
            0x00, 0x00, 0x00, 0x07, // correlation id
            0x00, // header tag buffer
            0x00, 0x00, 0x00, 0x00, // throttle time
            0x02, // 1 topic
            0x00, 0x03, // error code 3
            0x04, b'f', b'o', b'o', // name "foo"
        ];
        expected.extend_from_slice(&[0u8; 16]); // nil topic id
        expected.extend_from_slice(&[
            0x00, // is_internal = false
            0x01, // empty partitions array
            0x00, 0x00, 0x00, 0x00, // authorized operations
            0x00, // topic tag buffer
            0x00, // null cursor
            0x00, // tag buffer
        ]);

        assert_eq!(resp.as_bytes(), expected);
    }

    #[test]
    fn empty_query_encodes_zero_topics() {
        let resp = DescribeTopicPartitionsResponse::new(1, Vec::new());
        let expected = [
            0x00, 0x00, 0x00, 0x01, // correlation id
            0x00, // header tag buffer
            0x00, 0x00, 0x00, 0x00, // throttle time
            0x01, // 0 topics
            0x00, // null cursor
            0x00, // tag buffer
        ];
        assert_eq!(resp.as_bytes(), expected);
    }

    #[test]
    fn one_descriptor_per_requested_topic_in_order() {
        let resp = DescribeTopicPartitionsResponse::new(
            3,
            vec![Topic::unknown("a".into()), Topic::unknown("b".into())],
        );
        let bytes = resp.as_bytes();
        // 2 topics
        assert_eq!(bytes[9], 0x03);
        // first topic name "a" right after its error code
        assert_eq!(&bytes[12..14], &[0x02, b'a']);
    }
}
