mod logic;
mod protocol;

use protocol::request::RequestHeader;
use protocol::ResponseMessage;

use anyhow::{bail, Context, Result};
use bytes::BytesMut;
use tokio::net::TcpListener;
use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::TcpStream,
};
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

const DEFAULT_ADDR: &str = "127.0.0.1:9092";

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let addr = std::env::var("MINIBROKER_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string());
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("bind {addr}"))?;
    info!(%addr, "listening");

    loop {
        let (stream, peer) = listener.accept().await?;

        tokio::spawn(async move {
            debug!(%peer, "accepted connection");
            if let Err(e) = handle_connection(stream).await {
                error!(%peer, "connection error: {e:#}");
            }
            debug!(%peer, "connection closed");
        });
    }
}

/// Drives one connection: read frame, dispatch, write response, repeat.
/// Strictly half-duplex; the loop ends on EOF or any I/O failure.
pub async fn handle_connection(mut stream: TcpStream) -> Result<()> {
    loop {
        let mut msg_size_buf = [0u8; 4];
        match stream.read_exact(&mut msg_size_buf).await {
            Ok(_) => {}
            // peer is done; clean close
            Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => return Ok(()),
            Err(e) => return Err(e).context("read message size"),
        }

        let msg_size = i32::from_be_bytes(msg_size_buf);
        if msg_size < RequestHeader::SIZE as i32 {
            bail!("malformed frame: declared size {msg_size} cannot hold a request header");
        }

        let mut msg = BytesMut::with_capacity(msg_size as usize);
        msg.resize(msg_size as usize, 0);
        stream
            .read_exact(&mut msg)
            .await
            .context("read message data")?;
        let mut msg = msg.freeze();

        let header = RequestHeader::from_bytes(&mut msg)
            .context("decode request header")?;
        debug!(
            api_key = header.request_api_key,
            api_version = header.request_api_version,
            correlation_id = header.correlation_id,
            "request"
        );

        // unknown api keys are skipped without a response
        let Some(resp) = logic::process(&header, &mut msg) else {
            continue;
        };

        let resp_message = ResponseMessage::from_bytes(resp.as_bytes());
        stream
            .write_all(resp_message.as_bytes())
            .await
            .context("write response")?;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::net::TcpListener;

    async fn spawn_server() -> std::net::SocketAddr {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            loop {
                let (stream, _) = listener.accept().await.unwrap();
                tokio::spawn(async move {
                    _ = handle_connection(stream).await;
                });
            }
        });
        addr
    }

    async fn read_frame(stream: &mut TcpStream) -> Vec<u8> {
        let mut size_buf = [0u8; 4];
        stream.read_exact(&mut size_buf).await.unwrap();
        let size = i32::from_be_bytes(size_buf) as usize;
        let mut payload = vec![0u8; size];
        stream.read_exact(&mut payload).await.unwrap();
        payload
    }

    #[tokio::test]
    async fn api_versions_round_trip() {
        let addr = spawn_server().await;
        let mut stream = TcpStream::connect(addr).await.unwrap();

        // ApiVersions, version 4, correlation id 7, empty body
        stream
            .write_all(&hex::decode("0000000800120004 00000007".replace(' ', "")).unwrap())
            .await
            .unwrap();

        let payload = read_frame(&mut stream).await;
        let expected = hex::decode(
            "00000007 0000 03 0012 0000 0004 00 004b 0000 0000 00 00000000 00".replace(' ', ""),
        )
        .unwrap();
        assert_eq!(payload, expected);
    }

    #[tokio::test]
    async fn unsupported_version_gets_two_byte_body() {
        let addr = spawn_server().await;
        let mut stream = TcpStream::connect(addr).await.unwrap();

        // version 9999
        stream
            .write_all(&hex::decode("000000080012270f0000002a").unwrap())
            .await
            .unwrap();

        let payload = read_frame(&mut stream).await;
        assert_eq!(payload, hex::decode("0000002a0023").unwrap());
    }

    #[tokio::test]
    async fn describe_topic_partitions_unknown_topic() {
        let addr = spawn_server().await;
        let mut stream = TcpStream::connect(addr).await.unwrap();

        // DescribeTopicPartitions v0, correlation id 5, one topic "foo"
        let body = hex::decode("02 04 666f6f 00".replace(' ', "")).unwrap();
        let mut frame = Vec::new();
        frame.extend_from_slice(&((8 + body.len()) as i32).to_be_bytes());
        frame.extend_from_slice(&hex::decode("004b000000000005").unwrap());
        frame.extend_from_slice(&body);
        stream.write_all(&frame).await.unwrap();

        let payload = read_frame(&mut stream).await;
        let expected = hex::decode(
            "00000005 00 00000000 02 0003 04666f6f 00000000000000000000000000000000 00 01 00000000 00 00 00"
                .replace(' ', ""),
        )
        .unwrap();
        assert_eq!(payload, expected);
    }

    #[tokio::test]
    async fn unknown_api_key_is_skipped_and_connection_survives() {
        let addr = spawn_server().await;
        let mut stream = TcpStream::connect(addr).await.unwrap();

        // api key 1 (Fetch) is not served; no response expected
        stream
            .write_all(&hex::decode("0000000800010000 00000001".replace(' ', "")).unwrap())
            .await
            .unwrap();
        // follow-up ApiVersions on the same connection still gets answered
        stream
            .write_all(&hex::decode("0000000800120000 00000002".replace(' ', "")).unwrap())
            .await
            .unwrap();

        let payload = read_frame(&mut stream).await;
        // the first (and only) response is for correlation id 2
        assert_eq!(&payload[..4], &[0x00, 0x00, 0x00, 0x02]);
    }

    #[tokio::test]
    async fn undersized_frame_closes_connection_silently() {
        let addr = spawn_server().await;
        let mut stream = TcpStream::connect(addr).await.unwrap();

        // declared size 4 cannot hold the 8-byte request header
        stream.write_all(&hex::decode("00000004").unwrap()).await.unwrap();

        let mut buf = [0u8; 1];
        let n = stream.read(&mut buf).await.unwrap();
        assert_eq!(n, 0, "server should close without writing");
    }
}
