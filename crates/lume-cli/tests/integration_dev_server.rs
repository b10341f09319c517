//! Integration tests for the development server.
//!
//! A real server on an ephemeral port with real WebSocket clients.

use futures::StreamExt;
use lume_bundler::testing::ScriptedCompiler;
use lume_bundler::{BuildMode, BuildOutcome, Diagnostic};
use lume_cli::assets::AssetSync;
use lume_cli::dev::{self, FileChange, LiveChannel, RebuildLoop};
use lume_runtime::ChannelMessage;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tokio::time::{Duration, sleep, timeout};
use tokio_tungstenite::connect_async;

const TIMEOUT: Duration = Duration::from_secs(5);

type WsStream =
    tokio_tungstenite::WebSocketStream<tokio_tungstenite::MaybeTlsStream<tokio::net::TcpStream>>;

async fn start_server(channel: Arc<LiveChannel>, out_dir: &Path) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(dev::serve(listener, dev::router(channel, out_dir)));
    addr
}

async fn connect(addr: SocketAddr) -> WsStream {
    let (ws, _) = connect_async(format!("ws://{addr}/ws")).await.unwrap();
    ws
}

/// Registration happens after the upgrade completes, on the server task.
async fn wait_for_clients(channel: &LiveChannel, count: usize) {
    timeout(TIMEOUT, async {
        while channel.client_count() < count {
            sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .expect("clients never registered");
}

async fn read_text(ws: &mut WsStream) -> String {
    let msg = timeout(TIMEOUT, ws.next())
        .await
        .expect("timeout waiting for message")
        .expect("stream closed")
        .expect("ws error");
    msg.to_text().unwrap().to_string()
}

#[tokio::test]
async fn test_update_reaches_every_client() {
    let temp = TempDir::new().unwrap();
    let channel = Arc::new(LiveChannel::new());
    let addr = start_server(channel.clone(), temp.path()).await;

    let mut first = connect(addr).await;
    let mut second = connect(addr).await;
    wait_for_clients(&channel, 2).await;

    let report = channel.broadcast(&ChannelMessage::Update);
    assert_eq!(report.delivered, 2);

    assert_eq!(read_text(&mut first).await, r#"{"type":"update"}"#);
    assert_eq!(read_text(&mut second).await, r#"{"type":"update"}"#);
}

#[tokio::test]
async fn test_late_client_sees_only_later_broadcasts() {
    let temp = TempDir::new().unwrap();
    let channel = Arc::new(LiveChannel::new());
    let addr = start_server(channel.clone(), temp.path()).await;

    let mut early = connect(addr).await;
    wait_for_clients(&channel, 1).await;
    channel.broadcast(&ChannelMessage::Update);

    let mut late = connect(addr).await;
    wait_for_clients(&channel, 2).await;
    channel.broadcast(&ChannelMessage::error("boom"));

    assert_eq!(read_text(&mut early).await, r#"{"type":"update"}"#);
    assert_eq!(
        read_text(&mut early).await,
        r#"{"type":"error","payload":"boom"}"#
    );
    assert_eq!(
        read_text(&mut late).await,
        r#"{"type":"error","payload":"boom"}"#
    );
}

#[tokio::test]
async fn test_closed_client_is_unregistered() {
    let temp = TempDir::new().unwrap();
    let channel = Arc::new(LiveChannel::new());
    let addr = start_server(channel.clone(), temp.path()).await;

    let mut ws = connect(addr).await;
    wait_for_clients(&channel, 1).await;
    ws.close(None).await.unwrap();

    timeout(TIMEOUT, async {
        while channel.client_count() > 0 {
            sleep(Duration::from_millis(10)).await;
        }
    })
    .await
    .expect("client never unregistered");
}

#[tokio::test]
async fn test_rebuild_results_stream_to_browser() {
    let temp = TempDir::new().unwrap();
    let out_dir = temp.path().join("dist");
    let compiler = Arc::new(ScriptedCompiler::new([
        BuildOutcome::success(out_dir.join("bundle.js")),
        BuildOutcome::failure(vec![Diagnostic::located(
            "main.jsx",
            10,
            3,
            "Expected \";\" but found \"}\"",
        )]),
    ]));
    let channel = Arc::new(LiveChannel::new());
    let mut rebuild = RebuildLoop::new(
        compiler.clone(),
        AssetSync::new(
            temp.path().join("src"),
            &out_dir,
            BuildMode::Development,
            "app",
        ),
        channel.clone(),
        temp.path(),
    );
    rebuild.initial_build().await.unwrap();

    let addr = start_server(channel.clone(), &out_dir).await;
    let mut ws = connect(addr).await;
    wait_for_clients(&channel, 1).await;

    let (tx, rx) = mpsc::channel(8);
    tokio::spawn(async move { rebuild.run(rx).await });
    let change = || FileChange::Modified(PathBuf::from("src/main.jsx"));

    tx.send(change()).await.unwrap();
    let frame = read_text(&mut ws).await;
    match ChannelMessage::from_json(&frame).unwrap() {
        ChannelMessage::Error { payload } => assert!(payload.starts_with("main.jsx:10:3")),
        other => panic!("expected error, got {other:?}"),
    }

    // The connection survives the failure and sees the fix.
    tx.send(change()).await.unwrap();
    assert_eq!(read_text(&mut ws).await, r#"{"type":"update"}"#);
    assert_eq!(channel.client_count(), 1);
    assert_eq!(compiler.call_count(), 3);
}
