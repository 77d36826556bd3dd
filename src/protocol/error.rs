use thiserror::Error;

/// Failures while decoding request bytes.
///
/// These are recoverable at the handler level (a malformed body degrades to a
/// default value); only transport-level I/O failures terminate a connection.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("varint ended before its terminating byte")]
    TruncatedVarint,
    #[error("varint exceeds 64 bits")]
    VarintOverflow,
    #[error("buffer too short: needed {needed} bytes, {remaining} remaining")]
    Truncated { needed: usize, remaining: usize },
}
