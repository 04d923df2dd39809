//! UseCase: ハンドシェイク時のセッション解決
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - AuthenticateUseCase::execute() メソッド
//!
//! ### なぜこのテストが必要か
//! - セッションが無い接続は匿名で通し、解決の失敗だけが接続を拒否することを保証

use std::sync::Arc;

use crate::domain::{SessionError, SessionResolver, UserIdentity};

/// ハンドシェイク認証のユースケース
pub struct AuthenticateUseCase {
    resolver: Arc<dyn SessionResolver>,
}

impl AuthenticateUseCase {
    /// 新しい AuthenticateUseCase を作成
    pub fn new(resolver: Arc<dyn SessionResolver>) -> Self {
        Self { resolver }
    }

    /// Cookie ヘッダからユーザーを解決する
    ///
    /// # Returns
    ///
    /// * `Ok(Some(UserIdentity))` - 認証済み
    /// * `Ok(None)` - 匿名で接続を続行
    /// * `Err(SessionError)` - 解決に失敗（接続は拒否される）
    pub async fn execute(
        &self,
        cookie: Option<String>,
    ) -> Result<Option<UserIdentity>, SessionError> {
        let identity = self.resolver.resolve(cookie).await?;
        match &identity {
            Some(user) => tracing::debug!("Handshake authenticated as '{}'", user.nickname),
            None => tracing::debug!("Handshake has no session; continuing anonymously"),
        }
        Ok(identity)
    }
}
