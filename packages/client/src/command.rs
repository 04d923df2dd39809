//! Commands accepted by the interactive client.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List rooms
    Rooms,
    /// Create a room
    Create {
        title: String,
        max: u32,
        password: String,
    },
    /// Check a room password
    Check { room_id: i64, password: String },
    /// Enter a room and show its history
    Enter { room_id: i64, password: String },
    /// Post a chat line to the current room
    Say(String),
    Help,
    Quit,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("Empty input")]
    Empty,

    #[error("Unknown command: {0} (try 'help')")]
    Unknown(String),

    #[error("Usage: {0}")]
    Usage(&'static str),
}

pub const HELP: &str = "\
Commands:
  rooms                            list rooms
  create <title> <max> <password>  create a room
  check <id> <password>            check a room password
  enter <id> <password>            enter a room
  say <message>                    post to the current room
  help                             show this help
  quit                             exit";

impl Command {
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let line = line.trim();
        let (name, rest) = match line.split_once(char::is_whitespace) {
            Some((name, rest)) => (name, rest.trim()),
            None => (line, ""),
        };
        let args: Vec<&str> = rest.split_whitespace().collect();

        match name {
            "" => Err(CommandError::Empty),
            "rooms" | "ls" => Ok(Self::Rooms),
            "create" => match args.as_slice() {
                [title, max, password] => Ok(Self::Create {
                    title: title.to_string(),
                    max: max
                        .parse()
                        .map_err(|_| CommandError::Usage("create <title> <max> <password>"))?,
                    password: password.to_string(),
                }),
                _ => Err(CommandError::Usage("create <title> <max> <password>")),
            },
            "check" => parse_room_and_password(&args, "check <id> <password>")
                .map(|(room_id, password)| Self::Check { room_id, password }),
            "enter" => parse_room_and_password(&args, "enter <id> <password>")
                .map(|(room_id, password)| Self::Enter { room_id, password }),
            "say" if !rest.is_empty() => Ok(Self::Say(rest.to_string())),
            "say" => Err(CommandError::Usage("say <message>")),
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" => Ok(Self::Quit),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

fn parse_room_and_password(
    args: &[&str],
    usage: &'static str,
) -> Result<(i64, String), CommandError> {
    match args {
        [id, password] => {
            let room_id = id.parse().map_err(|_| CommandError::Usage(usage))?;
            Ok((room_id, password.to_string()))
        }
        _ => Err(CommandError::Usage(usage)),
    }
}
