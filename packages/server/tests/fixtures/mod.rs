//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::{
    collections::VecDeque,
    net::SocketAddr,
    sync::{Arc, Mutex},
    time::Duration,
};

use axum::{
    Router,
    extract::{Path, State},
    http::{HeaderMap, StatusCode, header::COOKIE},
    routing::{delete, get},
};
use maru_server::ServerConfig;
use serde_json::Value;
use tokio::{net::TcpListener, task::JoinHandle};

/// Maru server running in-process on an ephemeral port
pub struct TestServer {
    addr: SocketAddr,
    handle: JoinHandle<()>,
}

impl TestServer {
    /// Start with anonymous sessions.
    pub async fn start() -> Self {
        Self::start_with(ServerConfig {
            anonymous: true,
            ..ServerConfig::default()
        })
        .await
    }

    pub async fn start_with(config: ServerConfig) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Failed to read local address");

        let handle = tokio::spawn(async move {
            if let Err(e) = maru_server::serve(listener, config).await {
                eprintln!("Test server stopped: {e}");
            }
        });

        Self { addr, handle }
    }

    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Requests recorded by [`StubRestApi`]
#[derive(Default)]
pub struct Recorded {
    pub deleted_rooms: Mutex<Vec<String>>,
}

/// Stand-in for the REST collaborator
///
/// * `DELETE /room/{room_id}` records the id and answers `delete_status`
/// * `GET /api/user` answers `{"nickname":"alice"}` for `sid=alice`,
///   `401` without a cookie and `500` for `sid=boom`
pub struct StubRestApi {
    addr: SocketAddr,
    pub recorded: Arc<Recorded>,
    handle: JoinHandle<()>,
}

#[derive(Clone)]
struct StubState {
    recorded: Arc<Recorded>,
    delete_status: StatusCode,
}

impl StubRestApi {
    pub async fn start(delete_status: StatusCode) -> Self {
        let recorded = Arc::new(Recorded::default());
        let state = StubState {
            recorded: Arc::clone(&recorded),
            delete_status,
        };

        let app = Router::new()
            .route("/room/{room_id}", delete(delete_room))
            .route("/api/user", get(current_user))
            .with_state(state);

        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind stub listener");
        let addr = listener.local_addr().expect("Failed to read local address");
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        Self {
            addr,
            recorded,
            handle,
        }
    }

    pub fn origin(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn deleted_rooms(&self) -> Vec<String> {
        self.recorded.deleted_rooms.lock().unwrap().clone()
    }
}

impl Drop for StubRestApi {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn delete_room(State(state): State<StubState>, Path(room_id): Path<String>) -> StatusCode {
    state.recorded.deleted_rooms.lock().unwrap().push(room_id);
    state.delete_status
}

async fn current_user(headers: HeaderMap) -> Result<String, StatusCode> {
    let cookie = headers
        .get(COOKIE)
        .and_then(|v| v.to_str().ok())
        .ok_or(StatusCode::UNAUTHORIZED)?;

    match cookie {
        "sid=alice" => Ok(r#"{"nickname":"alice"}"#.to_string()),
        "sid=nobody" => Ok(r#"{}"#.to_string()),
        "sid=boom" => Err(StatusCode::INTERNAL_SERVER_ERROR),
        _ => Err(StatusCode::UNAUTHORIZED),
    }
}

/// Engine.IO v4 long-polling client speaking just enough Socket.IO for tests
///
/// One instance is one Engine.IO session; packets received while waiting for
/// something else are buffered.
pub struct PollingClient {
    http: reqwest::Client,
    endpoint: String,
    pending: VecDeque<String>,
}

const RECORD_SEPARATOR: char = '\u{1e}';

impl PollingClient {
    /// Open an Engine.IO session, sending `referer` and `cookie` with the
    /// handshake request.
    pub async fn handshake(base_url: &str, referer: Option<&str>, cookie: Option<&str>) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .expect("Failed to build HTTP client");

        let mut request = http.get(format!("{base_url}/socket.io/?EIO=4&transport=polling"));
        if let Some(referer) = referer {
            request = request.header(reqwest::header::REFERER, referer);
        }
        if let Some(cookie) = cookie {
            request = request.header(reqwest::header::COOKIE, cookie);
        }
        let body = request
            .send()
            .await
            .expect("Failed to send handshake")
            .text()
            .await
            .expect("Failed to read handshake");

        let open = body.strip_prefix('0').expect("Handshake is not an open packet");
        let open: Value = serde_json::from_str(open).expect("Open packet is not JSON");
        let sid = open["sid"].as_str().expect("Open packet has no sid");

        Self {
            http,
            endpoint: format!("{base_url}/socket.io/?EIO=4&transport=polling&sid={sid}"),
            pending: VecDeque::new(),
        }
    }

    async fn send(&self, packet: String) {
        let response = self
            .http
            .post(&self.endpoint)
            .body(packet)
            .send()
            .await
            .expect("Failed to post packet");
        assert!(response.status().is_success(), "post rejected: {}", response.status());
    }

    async fn next_packet(&mut self) -> String {
        loop {
            if let Some(packet) = self.pending.pop_front() {
                // Engine.IO ping; answer and keep waiting
                if packet == "2" {
                    self.send("3".to_string()).await;
                    continue;
                }
                return packet;
            }

            let body = self
                .http
                .get(&self.endpoint)
                .send()
                .await
                .expect("Failed to poll")
                .text()
                .await
                .expect("Failed to read poll");
            self.pending
                .extend(body.split(RECORD_SEPARATOR).map(str::to_string));
        }
    }

    /// Connect to `namespace` and return the server's answer: `40{ns},{..}`
    /// on success or `44{ns},{..}` when the middleware refused.
    pub async fn connect(&mut self, namespace: &str) -> String {
        self.send(format!("40{namespace},")).await;
        loop {
            let packet = self.next_packet().await;
            if packet.starts_with(&format!("40{namespace},"))
                || packet.starts_with(&format!("44{namespace},"))
            {
                return packet;
            }
        }
    }

    /// Next event received on `namespace` as `(name, data)`.
    pub async fn next_event(&mut self, namespace: &str) -> (String, Value) {
        let prefix = format!("42{namespace},");
        loop {
            let packet = self.next_packet().await;
            let Some(body) = packet.strip_prefix(&prefix) else {
                continue;
            };
            let Value::Array(mut items) = serde_json::from_str(body).expect("Event is not JSON")
            else {
                panic!("Event is not an array: {body}");
            };
            let data = if items.len() > 1 {
                items.remove(1)
            } else {
                Value::Null
            };
            let name = items[0].as_str().expect("Event has no name").to_string();
            return (name, data);
        }
    }

    pub async fn emit(&self, namespace: &str, event: &str, data: Value) {
        let body = serde_json::json!([event, data]);
        self.send(format!("42{namespace},{body}")).await;
    }

    /// Close the Engine.IO session, disconnecting every namespace.
    pub async fn close(&self) {
        self.send("1".to_string()).await;
    }
}

/// Poll `condition` until it holds or five seconds pass.
pub async fn wait_until(mut condition: impl FnMut() -> bool) -> bool {
    for _ in 0..50 {
        if condition() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(100)).await;
    }
    condition()
}
