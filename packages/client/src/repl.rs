//! Interactive command loop driving the [`ChatStore`].

use std::sync::Arc;

use rustyline::{DefaultEditor, error::ReadlineError};
use tokio::sync::{mpsc, watch};

use crate::{
    api::HttpChatApi,
    command::{Command, CommandError, HELP},
    config::ClientConfig,
    error::ClientError,
    model::ChatData,
    socket::LiveSocket,
    store::{ChatState, ChatStore},
};

/// Sockets held by the session
struct Session {
    config: ClientConfig,
    api: HttpChatApi,
    store: Arc<ChatStore<HttpChatApi>>,
    lobby: Option<LiveSocket>,
    room: Option<LiveSocket>,
}

/// Run the interactive client until `quit` or end of input.
pub async fn run_client(config: ClientConfig) -> Result<(), ClientError> {
    let api = HttpChatApi::new(&config.backend_url)
        .map_err(|e| ClientError::HttpClient(e.to_string()))?;
    let store = Arc::new(ChatStore::new(api.clone()));
    spawn_chat_printer(store.subscribe());

    let lobby = match LiveSocket::lobby(config.socket_url(), Arc::clone(&store)).await {
        Ok(socket) => Some(socket),
        Err(e) => {
            tracing::warn!("Room list will not update live: {}", e);
            None
        }
    };

    let mut session = Session {
        config,
        api,
        store,
        lobby,
        room: None,
    };

    let mut lines = spawn_line_reader()?;
    println!(
        "Connected to {}. Type 'help' for commands.",
        session.config.backend_url
    );

    while let Some(line) = lines.recv().await {
        match Command::parse(&line) {
            Ok(Command::Quit) => break,
            Ok(command) => session.execute(command).await,
            Err(CommandError::Empty) => {}
            Err(e) => println!("{e}"),
        }
    }

    session.close().await;
    Ok(())
}

impl Session {
    async fn execute(&mut self, command: Command) {
        let store = &self.store;
        match command {
            Command::Rooms => match store.load_rooms().await {
                Ok(()) => {
                    let rooms = store.snapshot().rooms;
                    if rooms.is_empty() {
                        println!("(no rooms)");
                    }
                    for room in rooms {
                        println!("#{:<5} {} (max {})", room.id, room.title, room.max);
                    }
                }
                Err(e) => println!("Failed to load rooms: {e}"),
            },
            Command::Create {
                title,
                max,
                password,
            } => match store.add_room(&title, max, &password).await {
                Ok(room) => println!("Created room #{} {}", room.id, room.title),
                Err(e) => println!("Failed to create room: {e}"),
            },
            Command::Check { room_id, password } => {
                let result = store.is_password_correct(&password, room_id).await;
                println!("{}", result.message());
            }
            Command::Enter { room_id, password } => {
                match store.load_room(room_id, &password).await {
                    Ok(()) => self.join_room(room_id).await,
                    Err(e) => println!("Failed to enter room: {e}"),
                }
            }
            Command::Say(message) => self.say(message).await,
            Command::Help => println!("{HELP}"),
            Command::Quit => {}
        }
    }

    /// Swap the room socket for one joined to `room_id`.
    async fn join_room(&mut self, room_id: i64) {
        if let Some(previous) = self.room.take()
            && let Err(e) = previous.disconnect().await
        {
            tracing::warn!("{}", e);
        }

        let url = self.config.socket_url();
        let cookie = self.api.cookie_header(url);
        match LiveSocket::room(
            url,
            &self.config.room_param,
            room_id,
            cookie,
            Arc::clone(&self.store),
        )
        .await
        {
            Ok(socket) => self.room = Some(socket),
            Err(e) => println!("Live chat unavailable: {e}"),
        }
    }

    /// Persist the line, then hand it to the room's other members.
    async fn say(&self, message: String) {
        if let Err(e) = self.store.send_chat(&message).await {
            println!("Failed to send: {e}");
            return;
        }

        let line = ChatData {
            room_id: self.store.snapshot().room.map(|room| room.id),
            user: self.config.nickname.clone(),
            chat: message,
            gif: None,
            created_at: None,
        };
        if let Some(socket) = &self.room
            && let Err(e) = socket.emit_chat(&line).await
        {
            tracing::warn!("{}", e);
        }
        // The server relays to the others only.
        self.store.receive_chat(line);
    }

    async fn close(self) {
        for socket in [self.room, self.lobby].into_iter().flatten() {
            if let Err(e) = socket.disconnect().await {
                tracing::debug!("{}", e);
            }
        }
    }
}

/// Print chat lines as they reach the store. Entering a room prints its
/// history.
fn spawn_chat_printer(mut changes: watch::Receiver<ChatState>) {
    tokio::spawn(async move {
        let mut room_id = None;
        let mut printed = 0;

        while changes.changed().await.is_ok() {
            let state = changes.borrow_and_update();
            let current = state.room.as_ref().map(|room| room.id);
            if current != room_id || state.chats.len() < printed {
                room_id = current;
                printed = 0;
                if let Some(room) = &state.room {
                    println!("Entered #{} {}", room.id, room.title);
                }
            }

            for entry in state.chats.iter().skip(printed) {
                println!(
                    "[{}] {}: {}",
                    entry.created_at.format("%H:%M"),
                    entry.data.user,
                    entry.data.chat
                );
            }
            printed = state.chats.len();
        }
    });
}

/// Read lines on a dedicated thread; the line editor blocks.
fn spawn_line_reader() -> Result<mpsc::UnboundedReceiver<String>, ClientError> {
    let mut editor = DefaultEditor::new().map_err(|e| ClientError::Editor(e.to_string()))?;
    let (tx, rx) = mpsc::unbounded_channel();

    std::thread::spawn(move || {
        loop {
            match editor.readline("maru> ") {
                Ok(line) => {
                    let _ = editor.add_history_entry(line.as_str());
                    if tx.send(line).is_err() {
                        break;
                    }
                }
                Err(ReadlineError::Interrupted | ReadlineError::Eof) => break,
                Err(e) => {
                    tracing::error!("Failed to read input: {}", e);
                    break;
                }
            }
        }
    });

    Ok(rx)
}
