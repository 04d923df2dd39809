//! UseCase 層
//!
//! ビジネスロジックを実装するレイヤー。
//! UI 層（Socket.IO ハンドラ）から呼び出され、Domain 層のポートを操作します。

pub mod authenticate;
pub mod join_room;
pub mod leave_room;
pub mod relay_chat;

pub use authenticate::AuthenticateUseCase;
pub use join_room::JoinRoomUseCase;
pub use leave_room::{LeaveOutcome, LeaveRoomUseCase};
pub use relay_chat::RelayChatUseCase;
