use std::sync::mpsc;

use pretty_assertions::assert_eq;
use termchess::client::{
    ClientState, EventError, GameMode, NotableEvent, SessionState, TurnCommandError,
};
use termchess::coord::Coord;
use termchess::event::{ClientEvent, ServerEvent};
use termchess::force::Force;
use termchess::piece::{PieceKind, PieceOnBoard};
use termchess::test_util::{snapshot, STARTING_SNAPSHOT};


struct Session {
    state: ClientState,
    outbound_rx: mpsc::Receiver<ClientEvent>,
}

impl Session {
    fn new(mode: GameMode) -> Self {
        let (tx, rx) = mpsc::channel();
        let state = ClientState::new("alice".to_owned(), mode, tx);
        Session { state, outbound_rx: rx }
    }

    // Everything sent to the server since the last call, as wire lines.
    fn outbound(&mut self) -> Vec<String> {
        self.outbound_rx.try_iter().map(|event| event.to_string()).collect()
    }

    fn process(&mut self, line: &str) -> NotableEvent {
        let event = ServerEvent::parse(line).unwrap();
        self.state.process_server_event(event).unwrap()
    }
}

fn after_e4() -> String {
    snapshot([
        "rnbqkbnr",
        "pppppppp",
        "........",
        "........",
        "....P...",
        "........",
        "PPPP.PPP",
        "RNBQKBNR",
    ])
}

fn after_e4_e5() -> String {
    snapshot([
        "rnbqkbnr",
        "pppp.ppp",
        "........",
        "....p...",
        "....P...",
        "........",
        "PPPP.PPP",
        "RNBQKBNR",
    ])
}

#[test]
fn quick_match_happy_path() {
    let mut session = Session::new(GameMode::QuickMatch);

    session.state.register();
    assert_eq!(session.state.session_state(), SessionState::AwaitingNameAck);
    assert_eq!(session.outbound(), ["NAME alice"]);

    // Name acknowledged: matchmaking starts right away.
    assert_eq!(session.process("OK"), NotableEvent::NameAccepted);
    assert_eq!(session.state.session_state(), SessionState::WaitingForOpponent);
    assert_eq!(session.outbound(), ["FIND"]);

    assert_eq!(session.process("QUEUE"), NotableEvent::Queued);

    let start = format!("START WHITE w {STARTING_SNAPSHOT}");
    assert_eq!(session.process(&start), NotableEvent::GameStarted);
    assert_eq!(session.state.session_state(), SessionState::MyTurn);
    assert_eq!(session.state.display_prefs().orientation, Force::White);

    assert_eq!(session.state.make_turn("e4"), Ok(None));
    assert_eq!(session.outbound(), ["MOVE e2e4"]);
    assert_eq!(session.state.session_state(), SessionState::OpponentTurn);
    // The board only changes when the next snapshot arrives.
    assert_eq!(
        session.state.board().unwrap().piece_at(Coord::E2),
        Some(PieceOnBoard::new(PieceKind::Pawn, Force::White))
    );

    let reply = format!("OPPONENT_MOVE e7e5 w {}", after_e4_e5());
    assert_eq!(
        session.process(&reply),
        NotableEvent::BoardUpdated { last_move: Some("e7e5".to_owned()) }
    );
    assert_eq!(session.state.session_state(), SessionState::MyTurn);
    let board = session.state.board().unwrap();
    assert_eq!(board.piece_at(Coord::E2), None);
    assert_eq!(
        board.piece_at(Coord::E5),
        Some(PieceOnBoard::new(PieceKind::Pawn, Force::Black))
    );

    assert_eq!(
        session.process("END checkmate, White wins"),
        NotableEvent::GameEnded { message: "checkmate, White wins".to_owned() }
    );
    assert_eq!(session.state.session_state(), SessionState::GameOver);
}

#[test]
fn playing_black_starts_with_opponents_turn() {
    let mut session = Session::new(GameMode::Computer);
    session.state.register();
    session.process("OK");
    assert_eq!(session.outbound(), ["NAME alice", "COMPUTER"]);

    let start = format!("START BLACK w {STARTING_SNAPSHOT}");
    assert_eq!(session.process(&start), NotableEvent::GameStarted);
    assert_eq!(session.state.session_state(), SessionState::OpponentTurn);
    assert_eq!(session.state.display_prefs().orientation, Force::Black);
    assert_eq!(session.state.make_turn("e5"), Err(TurnCommandError::NotYourTurn));

    let update = format!("OPPONENT_MOVE e2e4 b {}", after_e4());
    session.process(&update);
    assert_eq!(session.state.session_state(), SessionState::MyTurn);
    assert_eq!(session.state.make_turn("e5"), Ok(None));
    assert_eq!(session.outbound(), ["MOVE e7e5"]);
}

#[test]
fn rejected_move_returns_the_turn() {
    let mut session = Session::new(GameMode::QuickMatch);
    session.state.register();
    session.process("OK");
    let start = format!("START WHITE w {STARTING_SNAPSHOT}");
    session.process(&start);

    session.state.make_turn("a1h8").unwrap();
    assert_eq!(session.state.session_state(), SessionState::OpponentTurn);
    assert_eq!(
        session.process("ERROR illegal move"),
        NotableEvent::MoveRejected { message: "illegal move".to_owned() }
    );
    assert_eq!(session.state.session_state(), SessionState::MyTurn);

    // The turn is back: a correct move goes through.
    session.outbound();
    assert_eq!(session.state.make_turn("e4"), Ok(None));
    assert_eq!(session.outbound(), ["MOVE e2e4"]);
}

#[test]
fn unsolicited_error_changes_nothing() {
    let mut session = Session::new(GameMode::QuickMatch);
    session.state.register();
    session.process("OK");
    let start = format!("START WHITE w {STARTING_SNAPSHOT}");
    session.process(&start);

    assert_eq!(
        session.process("ERROR server hiccup"),
        NotableEvent::ServerError { message: "server hiccup".to_owned() }
    );
    assert_eq!(session.state.session_state(), SessionState::MyTurn);
}

#[test]
fn moves_require_a_game() {
    let mut session = Session::new(GameMode::QuickMatch);
    assert_eq!(session.state.make_turn("e4"), Err(TurnCommandError::NoGameInProgress));
    session.state.register();
    session.process("OK");
    assert_eq!(session.state.make_turn("e4"), Err(TurnCommandError::NoGameInProgress));
}

#[test]
fn board_update_before_start_is_an_error() {
    let mut session = Session::new(GameMode::QuickMatch);
    session.state.register();
    session.process("OK");

    let line = format!("BOARD w {STARTING_SNAPSHOT}");
    let event = ServerEvent::parse(&line).unwrap();
    assert_eq!(
        session.state.process_server_event(event),
        Err(EventError::CannotApplyEvent {
            message: "got a board update before the game started".to_owned(),
        })
    );
}

#[test]
fn malformed_snapshot_keeps_the_board() {
    let mut session = Session::new(GameMode::QuickMatch);
    session.state.register();
    session.process("OK");
    let start = format!("START WHITE w {STARTING_SNAPSHOT}");
    session.process(&start);

    let event = ServerEvent::parse("BOARD b short").unwrap();
    assert!(matches!(
        session.state.process_server_event(event),
        Err(EventError::MalformedSnapshot(_))
    ));
    // The previous mirror stays authoritative.
    assert_eq!(
        session.state.board().unwrap().piece_at(Coord::E2),
        Some(PieceOnBoard::new(PieceKind::Pawn, Force::White))
    );
    assert_eq!(session.state.session_state(), SessionState::MyTurn);
}

#[test]
fn room_lifecycle_notices() {
    let mut session = Session::new(GameMode::CreateRoom { key: None });
    session.state.register();
    session.process("OK");
    assert_eq!(session.outbound(), ["NAME alice", "CREATE"]);

    assert_eq!(
        session.process("ROOM k7f2"),
        NotableEvent::RoomCreated { key: "k7f2".to_owned() }
    );
    assert_eq!(
        session.process("ROOM_EXPIRED"),
        NotableEvent::RoomClosed { message: "room expired".to_owned() }
    );
    assert_eq!(session.state.session_state(), SessionState::InMenu);
}

#[test]
fn forfeit_waits_for_the_server_verdict() {
    let mut session = Session::new(GameMode::JoinRoom { key: "k7f2".to_owned() });
    session.state.register();
    session.process("OK");
    assert_eq!(session.outbound(), ["NAME alice", "JOIN k7f2"]);

    let start = format!("START WHITE w {STARTING_SNAPSHOT}");
    session.process(&start);
    session.state.forfeit();
    assert_eq!(session.outbound(), ["FF"]);
    assert_eq!(session.state.session_state(), SessionState::MyTurn);

    assert_eq!(
        session.process("END Black wins by forfeit"),
        NotableEvent::GameEnded { message: "Black wins by forfeit".to_owned() }
    );
    assert_eq!(session.state.session_state(), SessionState::GameOver);
}
