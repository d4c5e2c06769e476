//! End-to-end test: real HTTP between the gateway client and the router
//!
//! The router is served on an ephemeral port with a stub provider behind it.

mod common;

use std::net::SocketAddr;

use tokio::net::TcpListener;

use flashgate::client::{ChatSession, GatewayClient};
use flashgate::error::FlashgateError;
use flashgate::request::Attachment;

use common::{router_with, StubProvider};

async fn spawn_gateway(stub: std::sync::Arc<StubProvider>) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = router_with(stub);
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

#[tokio::test]
async fn test_chat_round_trip_through_gateway() {
    let stub = StubProvider::replying("**Paris**");
    let addr = spawn_gateway(stub.clone()).await;

    let mut session = ChatSession::new(GatewayClient::new(format!("http://{}", addr)).unwrap());
    let reply = session.send("Capital of France?").await.unwrap();

    assert_eq!(reply, "**Paris**");
    assert_eq!(
        flashgate::format_reply(&reply),
        "<strong>Paris</strong>"
    );
    assert_eq!(session.history().len(), 2);
    assert_eq!(stub.requests().len(), 1);
}

#[tokio::test]
async fn test_file_upload_through_gateway() {
    let stub = StubProvider::replying("It says hello");
    let addr = spawn_gateway(stub.clone()).await;

    let client = GatewayClient::new(format!("http://{}", addr)).unwrap();
    let attachment = Attachment::new("text/plain", &b"hello"[..]);
    let reply = client
        .process_file("What does it say?", attachment, "hello.txt")
        .await
        .unwrap();

    assert_eq!(reply, "It says hello");
    let parts = stub.requests()[0].parts().to_vec();
    assert_eq!(parts.len(), 2);
    assert_eq!(parts[1].as_text(), Some("What does it say?"));
}

#[tokio::test]
async fn test_provider_failure_reaches_client_as_generic_error() {
    let addr = spawn_gateway(StubProvider::failing("quota exhausted")).await;

    let client = GatewayClient::new(format!("http://{}", addr)).unwrap();
    let err = client.generate_text("hi").await.unwrap_err();

    match err.downcast_ref::<FlashgateError>() {
        Some(FlashgateError::Client(message)) => {
            assert!(message.contains("500"));
            assert!(message.contains("Internal Server Error"));
            assert!(!message.contains("quota"));
        }
        other => panic!("expected client error, got {:?}", other),
    }
}
