use std::fmt;
use std::sync::mpsc;

use crate::algebraic::{resolve_notation, MoveError, PieceHintMismatch};
use crate::board::{BoardState, SnapshotError};
use crate::display::DisplayPrefs;
use crate::event::{ClientEvent, ServerEvent};
use crate::force::Force;


#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SessionState {
    Connecting,
    AwaitingNameAck,
    InMenu,
    WaitingForOpponent,
    MyTurn,
    OpponentTurn,
    GameOver,
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum GameMode {
    QuickMatch,
    CreateRoom { key: Option<String> },
    JoinRoom { key: String },
    Computer,
}

// What the UI should react to after processing a server event. Events the UI
// has nothing to do with map to `None`.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum NotableEvent {
    None,
    NameAccepted,
    Queued,
    RoomCreated { key: String },
    RoomClosed { message: String },
    GameStarted,
    BoardUpdated { last_move: Option<String> },
    MoveRejected { message: String },
    ServerError { message: String },
    GameEnded { message: String },
}

#[derive(Clone, PartialEq, Eq, Debug)]
pub enum EventError {
    CannotApplyEvent { message: String },
    MalformedSnapshot(SnapshotError),
}

impl fmt::Display for EventError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EventError::CannotApplyEvent { message } => write!(f, "{message}"),
            EventError::MalformedSnapshot(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for EventError {}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TurnCommandError {
    IllegalMove(MoveError),
    NotYourTurn,
    NoGameInProgress,
}

impl fmt::Display for TurnCommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TurnCommandError::IllegalMove(err) => write!(f, "{err}"),
            TurnCommandError::NotYourTurn => write!(f, "it is not your turn"),
            TurnCommandError::NoGameInProgress => write!(f, "no game in progress"),
        }
    }
}

impl std::error::Error for TurnCommandError {}


// Owns everything the client knows: session phase, the board mirror and
// rendering preferences. Lives on the main thread; server lines and terminal
// input reach it through one consumer loop.
pub struct ClientState {
    my_name: String,
    mode: GameMode,
    session_state: SessionState,
    board: Option<BoardState>,
    display_prefs: DisplayPrefs,
    // Set between sending MOVE and the next board-bearing or error reply.
    move_pending: bool,
    events_tx: mpsc::Sender<ClientEvent>,
}

impl ClientState {
    pub fn new(my_name: String, mode: GameMode, events_tx: mpsc::Sender<ClientEvent>) -> Self {
        ClientState {
            my_name,
            mode,
            session_state: SessionState::Connecting,
            board: None,
            display_prefs: DisplayPrefs::default(),
            move_pending: false,
            events_tx,
        }
    }

    pub fn session_state(&self) -> SessionState { self.session_state }
    pub fn board(&self) -> Option<&BoardState> { self.board.as_ref() }
    pub fn display_prefs(&self) -> DisplayPrefs { self.display_prefs }
    pub fn display_prefs_mut(&mut self) -> &mut DisplayPrefs { &mut self.display_prefs }

    pub fn register(&mut self) {
        self.send(ClientEvent::Register { name: self.my_name.clone() });
        self.session_state = SessionState::AwaitingNameAck;
    }

    pub fn process_server_event(
        &mut self, event: ServerEvent,
    ) -> Result<NotableEvent, EventError> {
        use SessionState::*;
        match event {
            ServerEvent::Ack => {
                if self.session_state == AwaitingNameAck {
                    self.session_state = InMenu;
                    self.request_game();
                    Ok(NotableEvent::NameAccepted)
                } else {
                    Ok(NotableEvent::None)
                }
            }
            ServerEvent::Queued => Ok(NotableEvent::Queued),
            ServerEvent::RoomCreated { key } => Ok(NotableEvent::RoomCreated { key }),
            ServerEvent::RoomExpired => {
                self.session_state = InMenu;
                Ok(NotableEvent::RoomClosed { message: "room expired".to_owned() })
            }
            ServerEvent::RoomCancelled => {
                self.session_state = InMenu;
                Ok(NotableEvent::RoomClosed { message: "room cancelled".to_owned() })
            }
            ServerEvent::GameStarted { my_force, side_to_move, snapshot } => {
                let board = BoardState::from_snapshot(my_force, side_to_move, &snapshot)
                    .map_err(EventError::MalformedSnapshot)?;
                self.board = Some(board);
                self.display_prefs.orientation = my_force;
                self.move_pending = false;
                self.session_state =
                    if side_to_move == my_force { MyTurn } else { OpponentTurn };
                Ok(NotableEvent::GameStarted)
            }
            ServerEvent::BoardUpdate { side_to_move, snapshot } => {
                self.apply_board_update(side_to_move, &snapshot)?;
                Ok(NotableEvent::BoardUpdated { last_move: None })
            }
            ServerEvent::MoveRequested { side_to_move, snapshot } => {
                self.apply_board_update(side_to_move, &snapshot)?;
                Ok(NotableEvent::BoardUpdated { last_move: None })
            }
            ServerEvent::OpponentMoved { last_move, side_to_move, snapshot } => {
                self.apply_board_update(side_to_move, &snapshot)?;
                Ok(NotableEvent::BoardUpdated { last_move: Some(last_move) })
            }
            ServerEvent::ServerError { message } => {
                if self.move_pending && self.session_state == OpponentTurn {
                    // The move we sent was refused; the board never changed,
                    // so it is still our turn.
                    self.move_pending = false;
                    self.session_state = MyTurn;
                    Ok(NotableEvent::MoveRejected { message })
                } else {
                    Ok(NotableEvent::ServerError { message })
                }
            }
            ServerEvent::GameEnded { message } => {
                self.session_state = GameOver;
                Ok(NotableEvent::GameEnded { message })
            }
        }
    }

    // Resolves user move text and ships it. The board is not touched here:
    // it only changes when the next snapshot arrives.
    pub fn make_turn(
        &mut self, notation: &str,
    ) -> Result<Option<PieceHintMismatch>, TurnCommandError> {
        match self.session_state {
            SessionState::MyTurn => {}
            SessionState::OpponentTurn => return Err(TurnCommandError::NotYourTurn),
            _ => return Err(TurnCommandError::NoGameInProgress),
        }
        let board = self.board.as_ref().ok_or(TurnCommandError::NoGameInProgress)?;
        let resolved =
            resolve_notation(board, notation).map_err(TurnCommandError::IllegalMove)?;
        self.send(ClientEvent::MakeMove { mv: resolved.mv });
        self.move_pending = true;
        self.session_state = SessionState::OpponentTurn;
        Ok(resolved.piece_hint_mismatch)
    }

    pub fn forfeit(&mut self) {
        // The server replies with END; state flips to GameOver there.
        self.send(ClientEvent::Forfeit);
    }

    pub fn quit(&mut self) {
        self.send(ClientEvent::Quit);
        self.session_state = SessionState::GameOver;
    }

    fn request_game(&mut self) {
        let request = match &self.mode {
            GameMode::QuickMatch => ClientEvent::FindMatch,
            GameMode::CreateRoom { key } => ClientEvent::CreateRoom { key: key.clone() },
            GameMode::JoinRoom { key } => ClientEvent::JoinRoom { key: key.clone() },
            GameMode::Computer => ClientEvent::PlayComputer,
        };
        self.send(request);
        self.session_state = SessionState::WaitingForOpponent;
    }

    fn apply_board_update(
        &mut self, side_to_move: Force, snapshot: &str,
    ) -> Result<(), EventError> {
        if self.session_state == SessionState::GameOver {
            return Ok(());
        }
        let board = self.board.as_mut().ok_or_else(|| EventError::CannotApplyEvent {
            message: "got a board update before the game started".to_owned(),
        })?;
        board
            .apply_snapshot(side_to_move, snapshot)
            .map_err(EventError::MalformedSnapshot)?;
        self.move_pending = false;
        self.session_state = if side_to_move == board.my_force() {
            SessionState::MyTurn
        } else {
            SessionState::OpponentTurn
        };
        Ok(())
    }

    fn send(&mut self, event: ClientEvent) {
        // If the writer thread is gone, a connection error is already on its
        // way to the main loop; dropping the event here is fine.
        let _ = self.events_tx.send(event);
    }
}
