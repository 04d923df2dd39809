//! Chat store: room and chat state of one user.
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - ChatStore の同期的な更新メソッドと非同期アクション
//!
//! ### なぜこのテストが必要か
//! - 410 / 403 だけが個別のエラーとして扱われることを保証
//! - 失敗したアクションが対応するエラーフィールドに記録されることを確認
//! - 購読者に状態の変更が届くことを確認

use tokio::sync::watch;

use crate::{
    api::ChatApi,
    error::StoreError,
    model::{ChatData, ChatEntry, NewRoom, RoomData},
};

/// Snapshot of the store
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChatState {
    /// Room currently entered
    pub room: Option<RoomData>,
    /// Room list of the lobby
    pub rooms: Vec<RoomData>,
    /// Chat lines of the current room
    pub chats: Vec<ChatEntry>,
    pub load_room_error: Option<StoreError>,
    pub load_rooms_error: Option<StoreError>,
    pub add_room_error: Option<StoreError>,
    pub create_form_open: bool,
    pub enter_form_open: bool,
}

/// Outcome of a password check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordCheck {
    Correct,
    RoomGone,
    WrongPassword,
    ServerError,
}

impl PasswordCheck {
    /// Text shown to the user
    pub fn message(&self) -> &'static str {
        match self {
            Self::Correct => "성공",
            Self::RoomGone => "존재하지 않는 방입니다.",
            Self::WrongPassword => "비밀번호가 틀립니다.",
            Self::ServerError => "서버오류",
        }
    }
}

/// State container synchronized with the REST backend
pub struct ChatStore<A: ChatApi> {
    api: A,
    state: watch::Sender<ChatState>,
}

impl<A: ChatApi> ChatStore<A> {
    pub fn new(api: A) -> Self {
        let (state, _) = watch::channel(ChatState::default());
        Self { api, state }
    }

    /// Receive every subsequent state change.
    pub fn subscribe(&self) -> watch::Receiver<ChatState> {
        self.state.subscribe()
    }

    /// Current snapshot.
    pub fn snapshot(&self) -> ChatState {
        self.state.borrow().clone()
    }

    fn update(&self, apply: impl FnOnce(&mut ChatState)) {
        self.state.send_modify(apply);
    }

    pub fn open_create_form(&self) {
        self.update(|s| s.create_form_open = true);
    }

    pub fn close_create_form(&self) {
        self.update(|s| s.create_form_open = false);
    }

    pub fn open_enter_form(&self) {
        self.update(|s| s.enter_form_open = true);
    }

    pub fn close_enter_form(&self) {
        self.update(|s| s.enter_form_open = false);
    }

    /// A room was created elsewhere (socket event).
    pub fn add_room_by_socket(&self, room: RoomData) {
        self.update(|s| s.rooms.push(room));
    }

    /// A room was removed elsewhere (socket event).
    pub fn remove_room_by_socket(&self, room_id: i64) {
        self.update(|s| s.rooms.retain(|room| room.id != room_id));
    }

    /// A chat line arrived over the socket. It is stamped with the current
    /// time and loses any gif attachment.
    pub fn receive_chat(&self, mut data: ChatData) {
        data.gif = None;
        let entry = ChatEntry {
            data,
            created_at: maru_shared::time::now_kst(),
        };
        self.update(|s| s.chats.push(entry));
    }

    pub async fn is_password_correct(&self, password: &str, room_id: i64) -> PasswordCheck {
        match self
            .api
            .check_password(password.to_string(), room_id)
            .await
        {
            Ok(()) => PasswordCheck::Correct,
            Err(StoreError::RoomGone) => PasswordCheck::RoomGone,
            Err(StoreError::WrongPassword) => PasswordCheck::WrongPassword,
            Err(e) => {
                tracing::debug!("Password check failed: {}", e);
                PasswordCheck::ServerError
            }
        }
    }

    /// Enter a room: load its metadata and chat history.
    pub async fn load_room(&self, room_id: i64, password: &str) -> Result<(), StoreError> {
        self.update(|s| s.load_room_error = None);

        match self.api.fetch_room(room_id, password.to_string()).await {
            Ok(detail) => {
                let loaded_at = maru_shared::time::now_kst();
                self.update(|s| {
                    s.room = Some(detail.room);
                    s.chats = detail
                        .chats
                        .into_iter()
                        .map(|data| {
                            let created_at = data
                                .created_at
                                .as_deref()
                                .and_then(maru_shared::time::parse_kst)
                                .unwrap_or(loaded_at);
                            ChatEntry { data, created_at }
                        })
                        .collect();
                });
                tracing::info!("Loaded room {}", room_id);
                Ok(())
            }
            Err(e) => {
                self.update(|s| s.load_room_error = Some(e.clone()));
                Err(e)
            }
        }
    }

    pub async fn load_rooms(&self) -> Result<(), StoreError> {
        self.update(|s| s.load_rooms_error = None);

        match self.api.fetch_rooms().await {
            Ok(rooms) => {
                self.update(|s| s.rooms = rooms);
                Ok(())
            }
            Err(e) => {
                self.update(|s| s.load_rooms_error = Some(e.clone()));
                Err(e)
            }
        }
    }

    pub async fn add_room(
        &self,
        title: &str,
        max: u32,
        password: &str,
    ) -> Result<RoomData, StoreError> {
        self.update(|s| s.add_room_error = None);

        let new_room = NewRoom {
            title: title.to_string(),
            max,
            password: password.to_string(),
        };
        self.api.create_room(new_room).await.inspect_err(|e| {
            self.update(|s| s.add_room_error = Some(e.clone()));
        })
    }

    /// Post a chat line to the current room.
    pub async fn send_chat(&self, message: &str) -> Result<(), StoreError> {
        let room_id = self
            .state
            .borrow()
            .room
            .as_ref()
            .map(|room| room.id)
            .ok_or(StoreError::NoRoom)?;

        self.api.post_chat(room_id, message.to_string()).await
    }
}
