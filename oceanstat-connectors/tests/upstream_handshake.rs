//! Collector handshake against a scripted listener

use std::net::SocketAddr;

use oceanstat_connectors::upstream::{UpstreamClient, UpstreamConfig, UpstreamError};
use oceanstat_connectors::AsyncConnector;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

/// Accept one session, answer each frame with the scripted replies and
/// return what the client sent
async fn scripted_collector(replies: Vec<&'static str>) -> (SocketAddr, JoinHandle<Vec<String>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut received = Vec::new();
        for reply in replies {
            let mut buf = [0u8; 1024];
            let n = socket.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            received.push(String::from_utf8_lossy(&buf[..n]).into_owned());
            socket.write_all(reply.as_bytes()).await.unwrap();
        }
        received
    });

    (addr, handle)
}

#[tokio::test]
async fn handshake_and_disconnect() {
    let (addr, collector) = scripted_collector(vec!["CONN_ACK|welcome|END", "DISC_ACK||END"]).await;

    let config = UpstreamConfig::new(addr.to_string()).client_id("probe-1").timeout_secs(5);
    let mut client = UpstreamClient::new(config);

    client.connect().await.unwrap();
    assert!(client.is_connected());
    assert_eq!(client.stats().connections, 1);

    client.disconnect().await.unwrap();
    assert!(!client.is_connected());

    let received = collector.await.unwrap();
    assert_eq!(received, ["CONN_REQ|probe-1|END", "DISC_REQ||END"]);
}

#[tokio::test]
async fn unterminated_ack_on_open_socket_connects() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let (release, released) = tokio::sync::oneshot::channel::<()>();

    let collector = tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut buf = [0u8; 1024];
        let n = socket.read(&mut buf).await.unwrap();
        socket.write_all(b"CONN_ACK|welcome").await.unwrap();
        // Socket stays open until the client is done
        let _ = released.await;
        String::from_utf8_lossy(&buf[..n]).into_owned()
    });

    let mut client = UpstreamClient::new(UpstreamConfig::new(addr.to_string()).timeout_secs(2));
    client.connect().await.unwrap();
    assert!(client.is_connected());
    assert_eq!(client.stats().connections, 1);

    let _ = release.send(());
    let received = collector.await.unwrap();
    assert!(received.starts_with("CONN_REQ|"));
}

#[tokio::test]
async fn missing_ack_is_rejected() {
    let (addr, collector) = scripted_collector(vec!["CONN_NAK|busy|END"]).await;

    let mut client = UpstreamClient::new(UpstreamConfig::new(addr.to_string()).timeout_secs(5));
    let err = client.connect().await.unwrap_err();

    assert!(matches!(err, UpstreamError::Rejected(ref reply) if reply.contains("CONN_NAK")));
    assert!(!client.is_connected());
    assert_eq!(client.stats().messages_failed, 1);

    collector.await.unwrap();
}

#[tokio::test]
async fn unreachable_collector_fails_to_connect() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let mut client = UpstreamClient::new(UpstreamConfig::new(addr.to_string()).timeout_secs(2));
    assert!(client.connect().await.is_err());
    assert!(!client.is_connected());
}

#[tokio::test]
async fn disconnect_without_session_is_noop() {
    let mut client = UpstreamClient::new(UpstreamConfig::default());
    client.disconnect().await.unwrap();
}
