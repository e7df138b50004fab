// Server bootstrap and WebSocket helpers shared by the integration tests.
// Each test binary uses a different subset.
#![allow(dead_code)]

use futures_util::{SinkExt, StreamExt};
use serde_json::Value;
use spacemmo_server::domain::tuning::{SimTuning, WorldTuning};
use spacemmo_server::use_cases::WorldSettings;
use std::{
    sync::{Arc, OnceLock},
    time::Duration,
};
use tokio::time::timeout;
use tokio_tungstenite::tungstenite::Message;

pub type Ws = tokio_tungstenite::WebSocketStream<
    tokio_tungstenite::MaybeTlsStream<tokio::net::TcpStream>,
>;

pub const WAIT: Duration = Duration::from_secs(5);

// Base ws URL published once the server thread has bound its port.
static SERVER_URL: OnceLock<String> = OnceLock::new();
static SERVER_READY: OnceLock<()> = OnceLock::new();

pub const TEST_SEED: u64 = 2024;

// Small seeded world so startup stays fast and runs are reproducible.
pub fn test_settings() -> WorldSettings {
    WorldSettings {
        world: WorldTuning {
            asteroid_count: 500,
            ..WorldTuning::default()
        },
        tuning: SimTuning::default(),
        seed: Some(TEST_SEED),
        input_channel_capacity: 256,
        game_tick: Duration::from_millis(1000 / 30),
        physics_tick: Duration::from_millis(1000 / 20),
        stats_interval: Duration::from_secs(5),
    }
}

// Ensure the test server is running and return its WebSocket URL.
pub fn ensure_server() -> &'static str {
    SERVER_READY.get_or_init(|| {
        let published_url = Arc::new(OnceLock::<String>::new());
        let published_url_thread = Arc::clone(&published_url);
        // Own thread and runtime so the server outlives individual `#[tokio::test]` runtimes.
        std::thread::spawn(move || {
            let runtime = tokio::runtime::Runtime::new().expect("test runtime");
            runtime.block_on(async move {
                let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
                    .await
                    .expect("bind ephemeral test port");
                let addr = listener.local_addr().expect("get local addr");
                let _ = published_url_thread.set(format!("ws://{}/ws", addr));
                spacemmo_server::run_with_settings(listener, test_settings())
                    .await
                    .expect("server failed");
            });
        });
        wait_for_server_url_and_readiness(published_url);
    });

    SERVER_URL
        .get()
        .expect("server url should be initialized")
        .as_str()
}

fn wait_for_server_url_and_readiness(published_url: Arc<OnceLock<String>>) {
    let url = loop {
        if let Some(url) = published_url.get() {
            break url.clone();
        }
        std::thread::sleep(Duration::from_millis(10));
    };

    let _ = SERVER_URL.set(url.clone());

    let addr = url
        .strip_prefix("ws://")
        .and_then(|rest| rest.strip_suffix("/ws"))
        .expect("url should look like ws://host:port/ws");

    for _ in 0..100 {
        if std::net::TcpStream::connect(addr).is_ok() {
            return;
        }
        std::thread::sleep(Duration::from_millis(20));
    }

    panic!("server did not become ready in time");
}

// Serves `settings` from the current runtime and returns the ws URL.
// The server lives as long as the calling test's runtime.
pub async fn spawn_server(settings: WorldSettings) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral test port");
    let addr = listener.local_addr().expect("get local addr");
    tokio::spawn(async move {
        let _ = spacemmo_server::run_with_settings(listener, settings).await;
    });
    format!("ws://{}/ws", addr)
}

pub async fn connect_to(url: &str) -> Ws {
    let (ws, _resp) = tokio_tungstenite::connect_async(url)
        .await
        .expect("websocket handshake should succeed");
    ws
}

pub async fn next_json(ws: &mut Ws) -> Value {
    loop {
        let msg = timeout(WAIT, ws.next())
            .await
            .expect("message before timeout")
            .expect("stream still open")
            .expect("websocket frame");
        if let Message::Text(text) = msg {
            return serde_json::from_str(text.as_str()).expect("server sends json");
        }
    }
}

pub async fn send_json(ws: &mut Ws, value: Value) {
    ws.send(Message::Text(value.to_string().into()))
        .await
        .expect("send should succeed");
}

pub async fn send_raw(ws: &mut Ws, text: &str) {
    ws.send(Message::Text(text.to_string().into()))
        .await
        .expect("send should succeed");
}
