//! UseCase: ルーム入室処理
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - JoinRoomUseCase::execute() メソッド
//! - ソケットのルーム参加と join 通知のブロードキャスト
//!
//! ### なぜこのテストが必要か
//! - join 通知が入室したソケット自身には届かないことを保証
//! - referer から room id を取れなかったソケットも "undefined" チャンネルに参加する現状の挙動を固定
//!
//! ### どのような状況を想定しているか
//! - 正常系：既存メンバーのいるルームへの入室
//! - エッジケース：ユーザー情報なし、undefined ルーム

use crate::{
    domain::{Locale, MembershipError, RoomAssignment, RoomMembership, SystemNotice, UserIdentity},
    infrastructure::dto::websocket::SocketEvent,
};

/// ルーム入室のユースケース
pub struct JoinRoomUseCase {
    locale: Locale,
}

impl JoinRoomUseCase {
    /// 新しい JoinRoomUseCase を作成
    pub fn new(locale: Locale) -> Self {
        Self { locale }
    }

    /// 入室を実行
    ///
    /// # Arguments
    ///
    /// * `membership` - 入室するソケットのハンドル
    /// * `room` - referer から解決したルーム
    /// * `user` - ハンドシェイクで解決したユーザー（匿名なら None）
    ///
    /// # Returns
    ///
    /// * `Ok(())` - 参加と join 通知が完了
    /// * `Err(MembershipError)` - レジストリ操作の失敗
    pub fn execute(
        &self,
        membership: &dyn RoomMembership,
        room: &RoomAssignment,
        user: Option<&UserIdentity>,
    ) -> Result<(), MembershipError> {
        if room.is_undefined() {
            tracing::warn!(
                "Socket '{}' has no room id; joining the '{}' channel",
                membership.socket_id(),
                room
            );
        }

        membership.join(room)?;

        let notice = serde_json::to_value(SystemNotice::arrival(self.locale, user)).map_err(|e| {
            MembershipError::Broadcast {
                room: room.to_string(),
                reason: e.to_string(),
            }
        })?;
        membership.broadcast(room, SocketEvent::Join.as_str(), &notice)?;

        tracing::info!("Socket '{}' joined room '{}'", membership.socket_id(), room);
        Ok(())
    }
}
