//! Socket.IO subscriptions feeding the [`ChatStore`].
//!
//! The lobby socket (`/room`) carries `newRoom` and `removeRoom`; the room
//! socket (`/chat`) carries `chat`, `join` and `exit`. The room socket sends
//! the handshake a browser page would: a `Referer` naming the room and the
//! session cookie.

use std::sync::Arc;

use futures_util::FutureExt;
use rust_socketio::{
    Event, Payload,
    asynchronous::{Client, ClientBuilder},
};
use serde_json::Value;

use crate::{
    api::ChatApi,
    error::SocketError,
    model::{ChatData, RoomData},
    store::ChatStore,
};

pub const LOBBY_NAMESPACE: &str = "/room";
pub const CHAT_NAMESPACE: &str = "/chat";

const LOBBY_EVENTS: [&str; 2] = ["newRoom", "removeRoom"];
const CHAT_EVENTS: [&str; 3] = ["chat", "join", "exit"];

/// A socket event the store reacts to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    RoomCreated(RoomData),
    RoomRemoved(i64),
    Chat(ChatData),
}

impl StoreEvent {
    /// Decode the data of event `name`. Unknown events and payloads of the
    /// wrong shape yield `None`.
    pub fn decode(name: &str, data: Value) -> Option<Self> {
        match name {
            "newRoom" => serde_json::from_value(data).ok().map(Self::RoomCreated),
            "removeRoom" => room_id_of(&data).map(Self::RoomRemoved),
            "chat" | "join" | "exit" => serde_json::from_value(data).ok().map(Self::Chat),
            _ => None,
        }
    }

    pub fn apply<A: ChatApi>(self, store: &ChatStore<A>) {
        match self {
            Self::RoomCreated(room) => store.add_room_by_socket(room),
            Self::RoomRemoved(room_id) => store.remove_room_by_socket(room_id),
            Self::Chat(chat) => store.receive_chat(chat),
        }
    }
}

/// `removeRoom` carries the id bare or inside a room object.
fn room_id_of(data: &Value) -> Option<i64> {
    match data {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.parse().ok(),
        Value::Object(room) => room.get("id").and_then(room_id_of),
        _ => None,
    }
}

#[allow(deprecated)]
fn first_value(payload: Payload) -> Option<Value> {
    match payload {
        Payload::Text(values) => values.into_iter().next(),
        Payload::String(text) => serde_json::from_str(&text).ok(),
        Payload::Binary(_) => None,
    }
}

/// Connected namespace socket
pub struct LiveSocket {
    client: Client,
    namespace: &'static str,
}

impl LiveSocket {
    /// Subscribe the store to room creation and removal.
    pub async fn lobby<A: ChatApi + 'static>(
        url: &str,
        store: Arc<ChatStore<A>>,
    ) -> Result<Self, SocketError> {
        let builder = ClientBuilder::new(url.trim_end_matches('/')).namespace(LOBBY_NAMESPACE);
        Self::connect(builder, LOBBY_NAMESPACE, &LOBBY_EVENTS, store).await
    }

    /// Join room `room_id` and subscribe the store to its chat lines.
    ///
    /// The server reads the room from the `Referer` query parameter
    /// `room_param`.
    pub async fn room<A: ChatApi + 'static>(
        url: &str,
        room_param: &str,
        room_id: i64,
        cookie: Option<String>,
        store: Arc<ChatStore<A>>,
    ) -> Result<Self, SocketError> {
        let url = url.trim_end_matches('/');
        let mut builder = ClientBuilder::new(url)
            .namespace(CHAT_NAMESPACE)
            .opening_header("Referer", format!("{url}/room?{room_param}={room_id}"));
        if let Some(cookie) = cookie {
            builder = builder.opening_header("Cookie", cookie);
        }
        Self::connect(builder, CHAT_NAMESPACE, &CHAT_EVENTS, store).await
    }

    async fn connect<A: ChatApi + 'static>(
        mut builder: ClientBuilder,
        namespace: &'static str,
        events: &[&'static str],
        store: Arc<ChatStore<A>>,
    ) -> Result<Self, SocketError> {
        for &event in events {
            let store = Arc::clone(&store);
            builder = builder.on(event, move |payload: Payload, _: Client| {
                match first_value(payload).and_then(|data| StoreEvent::decode(event, data)) {
                    Some(update) => update.apply(&store),
                    None => tracing::warn!("Ignoring malformed '{}' event", event),
                }
                async {}.boxed()
            });
        }

        let client = builder
            .on(Event::Error, move |payload: Payload, _: Client| {
                tracing::warn!("Socket error on {}: {:?}", namespace, payload);
                async {}.boxed()
            })
            .connect()
            .await
            .map_err(|e| SocketError::new(namespace, e))?;

        tracing::info!("Connected to {}", namespace);
        Ok(Self { client, namespace })
    }

    /// Send a chat line to the other members of its room.
    pub async fn emit_chat(&self, chat: &ChatData) -> Result<(), SocketError> {
        let data = serde_json::to_value(chat).map_err(|e| SocketError::new(self.namespace, e))?;
        self.client
            .emit("chat", data)
            .await
            .map_err(|e| SocketError::new(self.namespace, e))
    }

    pub async fn disconnect(self) -> Result<(), SocketError> {
        self.client
            .disconnect()
            .await
            .map_err(|e| SocketError::new(self.namespace, e))
    }
}
