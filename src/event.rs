use std::fmt;

use crate::algebraic::Move;
use crate::force::Force;


// One inbound protocol line, parsed. Tag and payload are separated by the
// first space; unknown trailing tokens within a known tag are ignored so the
// server can extend payloads compatibly.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum ServerEvent {
    Ack,
    Queued,
    RoomCreated { key: String },
    RoomExpired,
    RoomCancelled,
    GameStarted { my_force: Force, side_to_move: Force, snapshot: String },
    BoardUpdate { side_to_move: Force, snapshot: String },
    MoveRequested { side_to_move: Force, snapshot: String },
    OpponentMoved { last_move: String, side_to_move: Force, snapshot: String },
    ServerError { message: String },
    GameEnded { message: String },
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum ProtocolError {
    UnknownTag { tag: String },
    BadPayload { tag: &'static str, reason: String },
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProtocolError::UnknownTag { tag } => write!(f, "unknown message tag \"{tag}\""),
            ProtocolError::BadPayload { tag, reason } => {
                write!(f, "bad {tag} payload: {reason}")
            }
        }
    }
}

impl std::error::Error for ProtocolError {}

impl ServerEvent {
    pub fn parse(line: &str) -> Result<Self, ProtocolError> {
        let line = line.trim_end();
        let (tag, payload) = match line.split_once(' ') {
            Some((tag, payload)) => (tag, payload),
            None => (line, ""),
        };
        match tag {
            "OK" => Ok(ServerEvent::Ack),
            "QUEUE" => Ok(ServerEvent::Queued),
            "ROOM" => {
                let key = first_token("ROOM", payload)?;
                Ok(ServerEvent::RoomCreated { key })
            }
            "ROOM_EXPIRED" => Ok(ServerEvent::RoomExpired),
            "CANCELLED" => Ok(ServerEvent::RoomCancelled),
            "START" => {
                let mut tokens = payload.split_whitespace();
                let my_force = force_from_name("START", tokens.next())?;
                let side_to_move = force_from_indicator("START", tokens.next())?;
                let snapshot = snapshot_token("START", tokens.next())?;
                Ok(ServerEvent::GameStarted { my_force, side_to_move, snapshot })
            }
            "BOARD" => {
                let (side_to_move, snapshot) = turn_and_snapshot("BOARD", payload)?;
                Ok(ServerEvent::BoardUpdate { side_to_move, snapshot })
            }
            "YOURMOVE" => {
                let (side_to_move, snapshot) = turn_and_snapshot("YOURMOVE", payload)?;
                Ok(ServerEvent::MoveRequested { side_to_move, snapshot })
            }
            "OPPONENT_MOVE" => {
                let mut tokens = payload.split_whitespace();
                let last_move = first_token("OPPONENT_MOVE", tokens.next().unwrap_or(""))?;
                let side_to_move = force_from_indicator("OPPONENT_MOVE", tokens.next())?;
                let snapshot = snapshot_token("OPPONENT_MOVE", tokens.next())?;
                Ok(ServerEvent::OpponentMoved { last_move, side_to_move, snapshot })
            }
            "ERROR" => Ok(ServerEvent::ServerError { message: payload.to_owned() }),
            "END" => Ok(ServerEvent::GameEnded { message: payload.to_owned() }),
            _ => Err(ProtocolError::UnknownTag { tag: tag.to_owned() }),
        }
    }
}

fn first_token(tag: &'static str, payload: &str) -> Result<String, ProtocolError> {
    payload
        .split_whitespace()
        .next()
        .map(str::to_owned)
        .ok_or(ProtocolError::BadPayload { tag, reason: "payload is empty".to_owned() })
}

fn force_from_name(tag: &'static str, token: Option<&str>) -> Result<Force, ProtocolError> {
    match token {
        Some("WHITE") => Ok(Force::White),
        Some("BLACK") => Ok(Force::Black),
        other => Err(ProtocolError::BadPayload {
            tag,
            reason: format!("expected WHITE or BLACK, got {other:?}"),
        }),
    }
}

fn force_from_indicator(
    tag: &'static str, token: Option<&str>,
) -> Result<Force, ProtocolError> {
    match token {
        Some("w") => Ok(Force::White),
        Some("b") => Ok(Force::Black),
        other => Err(ProtocolError::BadPayload {
            tag,
            reason: format!("expected turn indicator w or b, got {other:?}"),
        }),
    }
}

fn snapshot_token(tag: &'static str, token: Option<&str>) -> Result<String, ProtocolError> {
    token.map(str::to_owned).ok_or(ProtocolError::BadPayload {
        tag,
        reason: "missing board snapshot".to_owned(),
    })
}

fn turn_and_snapshot(
    tag: &'static str, payload: &str,
) -> Result<(Force, String), ProtocolError> {
    let mut tokens = payload.split_whitespace();
    let side_to_move = force_from_indicator(tag, tokens.next())?;
    let snapshot = snapshot_token(tag, tokens.next())?;
    Ok((side_to_move, snapshot))
}


// One outbound protocol line. `Display` renders the exact wire form,
// newline excluded.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum ClientEvent {
    Register { name: String },
    FindMatch,
    CreateRoom { key: Option<String> },
    JoinRoom { key: String },
    PlayComputer,
    MakeMove { mv: Move },
    Forfeit,
    Quit,
}

impl fmt::Display for ClientEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientEvent::Register { name } => write!(f, "NAME {name}"),
            ClientEvent::FindMatch => write!(f, "FIND"),
            ClientEvent::CreateRoom { key: Some(key) } => write!(f, "CREATE {key}"),
            ClientEvent::CreateRoom { key: None } => write!(f, "CREATE"),
            ClientEvent::JoinRoom { key } => write!(f, "JOIN {key}"),
            ClientEvent::PlayComputer => write!(f, "COMPUTER"),
            ClientEvent::MakeMove { mv } => write!(f, "MOVE {}", mv.to_wire()),
            ClientEvent::Forfeit => write!(f, "FF"),
            ClientEvent::Quit => write!(f, "QUIT"),
        }
    }
}
