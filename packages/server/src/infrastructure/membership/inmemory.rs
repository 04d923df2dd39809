//! InMemory room registry
//!
//! A self-contained stand-in for the socket library's room book-keeping.
//! Every connected socket owns an unbounded channel; broadcasts are pushed
//! into the channels of the other members of a room.
//!
//! It backs the use case tests and any embedding that does not run behind
//! Socket.IO.

use std::{
    collections::{BTreeSet, HashMap},
    sync::{Arc, Mutex, MutexGuard},
};

use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};

use crate::domain::{MembershipError, RoomAssignment, RoomMembership};

/// An event delivered to one socket
#[derive(Debug, Clone, PartialEq)]
pub struct OutboundEvent {
    pub event: String,
    pub payload: serde_json::Value,
}

#[derive(Default)]
struct Registry {
    /// socket id -> delivery channel
    sockets: HashMap<String, UnboundedSender<OutboundEvent>>,
    /// channel key -> member socket ids
    rooms: HashMap<String, BTreeSet<String>>,
}

/// In-memory room registry shared by all sockets of a namespace
#[derive(Default)]
pub struct InMemoryRoomHub {
    registry: Mutex<Registry>,
}

impl InMemoryRoomHub {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Register a socket and return its handle together with its inbox.
    pub fn connect(
        self: &Arc<Self>,
        socket_id: impl Into<String>,
    ) -> Result<(InMemoryMembership, UnboundedReceiver<OutboundEvent>), MembershipError> {
        let socket_id = socket_id.into();
        let (tx, rx) = unbounded_channel();

        let mut registry = self.lock()?;
        if registry.sockets.contains_key(&socket_id) {
            return Err(MembershipError::Registry(format!(
                "socket '{socket_id}' is already connected"
            )));
        }
        registry.sockets.insert(socket_id.clone(), tx);

        Ok((
            InMemoryMembership {
                hub: Arc::clone(self),
                socket_id,
            },
            rx,
        ))
    }

    /// Drop the socket's delivery channel.
    ///
    /// Room membership is left untouched; callers leave their rooms first,
    /// the way a disconnect handler does.
    pub fn disconnect(&self, socket_id: &str) -> Result<(), MembershipError> {
        let mut registry = self.lock()?;
        registry
            .sockets
            .remove(socket_id)
            .map(|_| ())
            .ok_or_else(|| MembershipError::Registry(format!("socket '{socket_id}' is unknown")))
    }

    /// Socket ids joined to `room`, sorted.
    pub fn members(&self, room: &RoomAssignment) -> Result<Vec<String>, MembershipError> {
        let registry = self.lock()?;
        Ok(registry
            .rooms
            .get(room.channel())
            .map(|members| members.iter().cloned().collect())
            .unwrap_or_default())
    }

    /// Number of rooms with at least one member.
    pub fn room_count(&self) -> Result<usize, MembershipError> {
        Ok(self.lock()?.rooms.len())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Registry>, MembershipError> {
        self.registry
            .lock()
            .map_err(|_| MembershipError::Registry("room registry lock poisoned".to_string()))
    }
}

/// Handle of one socket on an [`InMemoryRoomHub`]
pub struct InMemoryMembership {
    hub: Arc<InMemoryRoomHub>,
    socket_id: String,
}

impl RoomMembership for InMemoryMembership {
    fn socket_id(&self) -> String {
        self.socket_id.clone()
    }

    fn join(&self, room: &RoomAssignment) -> Result<(), MembershipError> {
        let mut registry = self.hub.lock()?;
        registry
            .rooms
            .entry(room.channel().to_string())
            .or_default()
            .insert(self.socket_id.clone());
        Ok(())
    }

    fn leave(&self, room: &RoomAssignment) -> Result<(), MembershipError> {
        let mut registry = self.hub.lock()?;
        if let Some(members) = registry.rooms.get_mut(room.channel()) {
            members.remove(&self.socket_id);
            if members.is_empty() {
                registry.rooms.remove(room.channel());
            }
        }
        Ok(())
    }

    fn occupancy(&self, room: &RoomAssignment) -> Result<usize, MembershipError> {
        let registry = self.hub.lock()?;
        Ok(registry
            .rooms
            .get(room.channel())
            .map_or(0, BTreeSet::len))
    }

    fn broadcast(
        &self,
        room: &RoomAssignment,
        event: &str,
        payload: &serde_json::Value,
    ) -> Result<(), MembershipError> {
        let registry = self.hub.lock()?;
        let Some(members) = registry.rooms.get(room.channel()) else {
            return Ok(());
        };

        for member in members.iter().filter(|id| **id != self.socket_id) {
            let Some(sender) = registry.sockets.get(member) else {
                continue;
            };
            let outbound = OutboundEvent {
                event: event.to_string(),
                payload: payload.clone(),
            };
            if sender.send(outbound).is_err() {
                tracing::warn!("Failed to deliver '{}' to socket '{}'", event, member);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RoomId;
    use serde_json::json;

    // ========================================
    // テスト作業記録
    // ========================================
    // 【何をテストするか】
    // - InMemoryRoomHub の join / leave / occupancy / broadcast
    //
    // 【なぜこのテストが必要か】
    // - UseCase のテストはこのレジストリの正しさを前提にしている
    // - broadcast が送信元を除外し、ルーム外に漏れないことを保証する
    // ========================================

    fn room(id: &str) -> RoomAssignment {
        RoomAssignment::Room(RoomId::new(id.to_string()).unwrap())
    }

    #[tokio::test]
    async fn test_join_and_occupancy() {
        // テスト項目: join したソケット数が occupancy に反映される
        // given (前提条件):
        let hub = InMemoryRoomHub::new();
        let (alice, _rx_a) = hub.connect("alice").unwrap();
        let (bob, _rx_b) = hub.connect("bob").unwrap();

        // when (操作):
        alice.join(&room("42")).unwrap();
        bob.join(&room("42")).unwrap();

        // then (期待する結果):
        assert_eq!(alice.occupancy(&room("42")).unwrap(), 2);
        assert_eq!(hub.members(&room("42")).unwrap(), vec!["alice", "bob"]);
        assert_eq!(alice.occupancy(&room("7")).unwrap(), 0);
    }

    #[tokio::test]
    async fn test_leave_removes_empty_room() {
        // テスト項目: 最後のメンバーが leave するとルーム自体が消える
        // given (前提条件):
        let hub = InMemoryRoomHub::new();
        let (alice, _rx) = hub.connect("alice").unwrap();
        alice.join(&room("42")).unwrap();

        // when (操作):
        alice.leave(&room("42")).unwrap();

        // then (期待する結果):
        assert_eq!(alice.occupancy(&room("42")).unwrap(), 0);
        assert_eq!(hub.room_count().unwrap(), 0);
    }

    #[tokio::test]
    async fn test_broadcast_skips_sender_and_other_rooms() {
        // テスト項目: broadcast は送信元と別ルームのソケットには届かない
        // given (前提条件):
        let hub = InMemoryRoomHub::new();
        let (alice, mut rx_a) = hub.connect("alice").unwrap();
        let (bob, mut rx_b) = hub.connect("bob").unwrap();
        let (carol, mut rx_c) = hub.connect("carol").unwrap();
        alice.join(&room("42")).unwrap();
        bob.join(&room("42")).unwrap();
        carol.join(&room("7")).unwrap();

        // when (操作):
        alice
            .broadcast(&room("42"), "chat", &json!({ "text": "hi" }))
            .unwrap();

        // then (期待する結果):
        let received = rx_b.try_recv().unwrap();
        assert_eq!(received.event, "chat");
        assert_eq!(received.payload, json!({ "text": "hi" }));
        assert!(rx_a.try_recv().is_err());
        assert!(rx_c.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_duplicate_connect_is_rejected() {
        // テスト項目: 同じ socket id での二重接続はエラー
        let hub = InMemoryRoomHub::new();
        let (_alice, _rx) = hub.connect("alice").unwrap();

        let result = hub.connect("alice");

        assert!(matches!(result, Err(MembershipError::Registry(_))));
    }

    #[tokio::test]
    async fn test_disconnect_unknown_socket() {
        // テスト項目: 未接続ソケットの disconnect はエラー
        let hub = InMemoryRoomHub::new();

        assert!(hub.disconnect("ghost").is_err());
    }
}
