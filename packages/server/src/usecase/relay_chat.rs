//! UseCase: チャット中継処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - RelayChatUseCase::execute() メソッド
//! - ペイロードの RoomId が指すルームへの中継
//!
//! ### なぜこのテストが必要か
//! - ペイロードが一切変更されずに中継されることを保証
//! - 送信元と対象ルーム外のソケットには届かないことを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：同じルームのメンバーへの中継
//! - エッジケース：送信元が参加していないルームへの中継、RoomId なし

use crate::{
    domain::{ChatPayload, MembershipError, RoomAssignment, RoomMembership},
    infrastructure::dto::websocket::SocketEvent,
};

/// チャット中継のユースケース
#[derive(Debug, Default)]
pub struct RelayChatUseCase;

impl RelayChatUseCase {
    /// 新しい RelayChatUseCase を作成
    pub fn new() -> Self {
        Self
    }

    /// 中継を実行
    ///
    /// 検証も永続化もしない。配送は at-most-once。
    ///
    /// # Returns
    ///
    /// * `Ok(RoomAssignment)` - 中継先のルーム
    /// * `Err(MembershipError)` - ブロードキャストの失敗
    pub fn execute(
        &self,
        membership: &dyn RoomMembership,
        payload: &ChatPayload,
    ) -> Result<RoomAssignment, MembershipError> {
        let target = payload.target_room();
        if target.is_undefined() {
            tracing::warn!(
                "Chat from socket '{}' has no RoomId; relaying to the '{}' channel",
                membership.socket_id(),
                target
            );
        }

        membership.broadcast(&target, SocketEvent::Chat.as_str(), payload.as_value())?;
        tracing::debug!(
            "Relayed chat from socket '{}' to room '{}'",
            membership.socket_id(),
            target
        );
        Ok(target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{domain::RoomId, infrastructure::membership::InMemoryRoomHub};
    use serde_json::json;

    fn room(id: &str) -> RoomAssignment {
        RoomAssignment::Room(RoomId::new(id.to_string()).unwrap())
    }

    #[tokio::test]
    async fn test_relay_to_room_members() {
        // テスト項目: {RoomId: "42", text: "hi"} が同じルームの他メンバーにそのまま届く
        // given (前提条件):
        let hub = InMemoryRoomHub::new();
        let usecase = RelayChatUseCase::new();
        let (alice, mut rx_a) = hub.connect("alice").unwrap();
        let (bob, mut rx_b) = hub.connect("bob").unwrap();
        let (carol, mut rx_c) = hub.connect("carol").unwrap();
        alice.join(&room("42")).unwrap();
        bob.join(&room("42")).unwrap();
        carol.join(&room("7")).unwrap();
        let raw = json!({ "RoomId": "42", "text": "hi" });

        // when (操作):
        let target = usecase
            .execute(&alice, &ChatPayload::new(raw.clone()))
            .unwrap();

        // then (期待する結果):
        assert_eq!(target, room("42"));
        let received = rx_b.try_recv().unwrap();
        assert_eq!(received.event, "chat");
        assert_eq!(received.payload, raw);
        assert!(rx_a.try_recv().is_err());
        assert!(rx_c.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_relay_from_outside_the_room() {
        // テスト項目: 送信元が参加していないルームにも中継される
        // given (前提条件):
        let hub = InMemoryRoomHub::new();
        let usecase = RelayChatUseCase::new();
        let (outsider, mut rx_o) = hub.connect("outsider").unwrap();
        let (bob, mut rx_b) = hub.connect("bob").unwrap();
        bob.join(&room("42")).unwrap();
        let raw = json!({ "RoomId": 42, "text": "knock" });

        // when (操作):
        usecase
            .execute(&outsider, &ChatPayload::new(raw.clone()))
            .unwrap();

        // then (期待する結果):
        assert_eq!(rx_b.try_recv().unwrap().payload, raw);
        assert!(rx_o.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_relay_without_target_goes_to_undefined_channel() {
        // テスト項目: RoomId の無いペイロードは "undefined" チャンネルに中継される
        // given (前提条件):
        let hub = InMemoryRoomHub::new();
        let usecase = RelayChatUseCase::new();
        let (a, _rx_a) = hub.connect("a").unwrap();
        let (b, mut rx_b) = hub.connect("b").unwrap();
        let (c, mut rx_c) = hub.connect("c").unwrap();
        b.join(&RoomAssignment::Undefined).unwrap();
        c.join(&room("42")).unwrap();

        // when (操作):
        let target = usecase
            .execute(&a, &ChatPayload::new(json!({ "text": "lost" })))
            .unwrap();

        // then (期待する結果):
        assert!(target.is_undefined());
        assert!(rx_b.try_recv().is_ok());
        assert!(rx_c.try_recv().is_err());
    }
}
