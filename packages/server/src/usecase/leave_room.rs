//! UseCase: ルーム退室（切断）処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - LeaveRoomUseCase::execute() メソッド
//! - 退室後の人数再計算、exit 通知、空室時の削除リクエスト
//!
//! ### なぜこのテストが必要か
//! - 最後の一人が抜けたときだけ削除リクエストが一度だけ送られることを保証
//! - 人数は退室後にレジストリから数え直す（off-by-one の回帰防止）
//! - 削除リクエストの失敗が切断処理を止めないことを確認
//!
//! ### どのような状況を想定しているか
//! - 正常系：他のメンバーが残る退室
//! - 正常系：最後のメンバーの退室
//! - 異常系：削除リクエストの失敗

use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::{
    domain::{
        Locale, MembershipError, RoomAssignment, RoomDeletionNotifier, RoomMembership,
        SystemNotice, UserIdentity,
    },
    infrastructure::dto::websocket::SocketEvent,
};

/// Result of a disconnect
#[derive(Debug)]
pub enum LeaveOutcome {
    /// Members remain; they were sent an `exit` notice
    PeersNotified { remaining: usize },
    /// The room emptied; deletion runs on its own task
    RoomEmptied { deletion: JoinHandle<()> },
}

/// ルーム退室のユースケース
pub struct LeaveRoomUseCase {
    locale: Locale,
    notifier: Arc<dyn RoomDeletionNotifier>,
}

impl LeaveRoomUseCase {
    /// 新しい LeaveRoomUseCase を作成
    pub fn new(locale: Locale, notifier: Arc<dyn RoomDeletionNotifier>) -> Self {
        Self { locale, notifier }
    }

    /// 退室を実行
    ///
    /// 削除リクエストは spawn したタスクで送られ、結果はログにだけ残る。
    /// 呼び出し側は返された `JoinHandle` を待たずに捨ててよい。
    ///
    /// # Returns
    ///
    /// * `Ok(LeaveOutcome)` - 退室後の状態
    /// * `Err(MembershipError)` - レジストリ操作の失敗
    pub fn execute(
        &self,
        membership: &dyn RoomMembership,
        room: &RoomAssignment,
        user: Option<&UserIdentity>,
    ) -> Result<LeaveOutcome, MembershipError> {
        membership.leave(room)?;

        let remaining = membership.occupancy(room)?;
        if remaining == 0 {
            tracing::info!("Room '{}' is empty; requesting deletion", room);
            return Ok(LeaveOutcome::RoomEmptied {
                deletion: self.spawn_deletion(room.clone()),
            });
        }

        let notice = serde_json::to_value(SystemNotice::departure(self.locale, user)).map_err(|e| {
            MembershipError::Broadcast {
                room: room.to_string(),
                reason: e.to_string(),
            }
        })?;
        membership.broadcast(room, SocketEvent::Exit.as_str(), &notice)?;
        tracing::info!(
            "Socket '{}' left room '{}' ({} remaining)",
            membership.socket_id(),
            room,
            remaining
        );

        Ok(LeaveOutcome::PeersNotified { remaining })
    }

    fn spawn_deletion(&self, room: RoomAssignment) -> JoinHandle<()> {
        let notifier = Arc::clone(&self.notifier);
        tokio::spawn(async move {
            let channel = room.channel().to_string();
            match notifier.request_deletion(room).await {
                Ok(()) => tracing::info!("Room '{}' deletion request succeeded", channel),
                Err(e) => tracing::error!("Room '{}' deletion request failed: {}", channel, e),
            }
        })
    }
}
