use std::io::{self, BufRead, BufReader};
use std::net::{Shutdown, TcpStream, ToSocketAddrs};
use std::sync::mpsc;
use std::thread;

use anyhow::{bail, Context};
use console::{Style, Term};
use itertools::Itertools;
use log::{info, warn};
use scopeguard::defer;
use termchess::client::{ClientState, GameMode, NotableEvent, SessionState, TurnCommandError};
use termchess::display::Charset;
use termchess::event::{ClientEvent, ProtocolError, ServerEvent};
use termchess::force::Force;

use crate::network::{self, CommunicationError};
use crate::tui;


pub struct ClientConfig {
    pub server_address: String,
    pub player_name: String,
    pub mode: GameMode,
    pub charset: Charset,
}

enum IncomingEvent {
    Network(Result<String, CommunicationError>),
    Terminal(String),
    Interrupt,
}

fn notice() -> Style { Style::new().green() }
fn alert() -> Style { Style::new().red() }

pub fn run(config: ClientConfig) -> anyhow::Result<()> {
    let address = network::parse_address(&config.server_address);
    let addrs = address
        .to_socket_addrs()
        .with_context(|| format!("cannot resolve server address {address:?}"))?
        .collect_vec();
    info!("Connecting to {addrs:?}...");
    let stream = TcpStream::connect(&addrs[..]).context("cannot connect to the server")?;
    let reader_stream = stream.try_clone().context("cannot clone the connection")?;
    let mut writer_stream = stream.try_clone().context("cannot clone the connection")?;
    defer! { let _ = stream.shutdown(Shutdown::Both); }

    let (tx, rx) = mpsc::channel();
    let tx_net = tx.clone();
    let tx_interrupt = tx.clone();
    let tx_local = tx;
    thread::spawn(move || {
        let mut reader = BufReader::new(reader_stream);
        loop {
            let line = network::read_line(&mut reader);
            let finished = line.is_err();
            if tx_net.send(IncomingEvent::Network(line)).is_err() || finished {
                return;
            }
        }
    });
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else {
                return;
            };
            if tx_local.send(IncomingEvent::Terminal(line)).is_err() {
                return;
            }
        }
    });
    ctrlc::set_handler(move || {
        let _ = tx_interrupt.send(IncomingEvent::Interrupt);
    })
    .context("cannot install the interrupt handler")?;

    let (outgoing_tx, outgoing_rx) = mpsc::channel::<ClientEvent>();
    thread::spawn(move || {
        for command in outgoing_rx {
            if let Err(err) = network::write_command(&mut writer_stream, &command.to_string()) {
                warn!("Failed to send a command: {err}");
                return;
            }
        }
    });

    let term = Term::stdout();
    let mut client_state =
        ClientState::new(config.player_name.trim().to_owned(), config.mode, outgoing_tx);
    client_state.display_prefs_mut().charset = config.charset;
    client_state.register();

    for event in rx {
        match event {
            IncomingEvent::Network(Ok(line)) => match ServerEvent::parse(&line) {
                Ok(server_event) => {
                    let notable = client_state
                        .process_server_event(server_event)
                        .with_context(|| format!("cannot process server message {line:?}"))?;
                    if handle_notable_event(&term, &client_state, notable)? {
                        return Ok(());
                    }
                }
                Err(ProtocolError::UnknownTag { .. }) => {
                    // Unknown tags are shown verbatim so that new server
                    // messages degrade gracefully.
                    println!("{line}");
                }
                Err(err @ ProtocolError::BadPayload { .. }) => {
                    bail!("malformed server message {line:?}: {err}");
                }
            },
            IncomingEvent::Network(Err(err)) => {
                if client_state.session_state() == SessionState::GameOver {
                    // The server hangs up after the game verdict.
                    return Ok(());
                }
                bail!("connection lost: {err}");
            }
            IncomingEvent::Terminal(line) => {
                if handle_input_line(&term, &mut client_state, line.trim())? {
                    return Ok(());
                }
            }
            IncomingEvent::Interrupt => {
                client_state.quit();
                return Ok(());
            }
        }
    }
    bail!("event channel closed unexpectedly");
}

// Returns true when the session is over and the process should exit.
fn handle_notable_event(
    term: &Term, client_state: &ClientState, event: NotableEvent,
) -> anyhow::Result<bool> {
    match event {
        NotableEvent::None => {}
        NotableEvent::NameAccepted => {
            println!("{}", notice().apply_to("Name accepted."));
        }
        NotableEvent::Queued => {
            println!("{}", notice().apply_to("Waiting for an opponent..."));
        }
        NotableEvent::RoomCreated { key } => {
            println!(
                "{}",
                notice().apply_to(format!(
                    "Room created. Ask your opponent to join with key {key}."
                ))
            );
        }
        NotableEvent::RoomClosed { message } => {
            println!("{}", alert().apply_to(format!("Room closed: {message}.")));
            return Ok(true);
        }
        NotableEvent::GameStarted => {
            redraw(term, client_state)?;
            if let Some(board) = client_state.board() {
                let color = match board.my_force() {
                    Force::White => "White",
                    Force::Black => "Black",
                };
                println!("{}", notice().apply_to(format!("Game started. You play {color}.")));
            }
            if client_state.session_state() == SessionState::MyTurn {
                println!("Your move.");
            }
        }
        NotableEvent::BoardUpdated { last_move } => {
            redraw(term, client_state)?;
            if let Some(mv) = last_move {
                println!("Opponent played {mv}.");
            }
            if client_state.session_state() == SessionState::MyTurn {
                println!("Your move.");
            }
        }
        NotableEvent::MoveRejected { message } => {
            println!(
                "{}",
                alert().apply_to(format!("Move rejected: {message}. Try another move."))
            );
        }
        NotableEvent::ServerError { message } => {
            println!("{}", alert().apply_to(format!("Server error: {message}")));
        }
        NotableEvent::GameEnded { message } => {
            println!("{}", notice().apply_to(format!("Game over: {message}")));
            return Ok(true);
        }
    }
    Ok(false)
}

fn handle_input_line(
    term: &Term, client_state: &mut ClientState, input: &str,
) -> anyhow::Result<bool> {
    match input {
        "" => {}
        "quit" | "exit" => {
            client_state.quit();
            return Ok(true);
        }
        "ff" | "forfeit" => client_state.forfeit(),
        "ascii" => {
            client_state.display_prefs_mut().charset = Charset::Ascii;
            redraw(term, client_state)?;
        }
        "unicode" => {
            client_state.display_prefs_mut().charset = Charset::Unicode;
            redraw(term, client_state)?;
        }
        "redraw" => redraw(term, client_state)?,
        _ => match client_state.make_turn(input) {
            Ok(None) => {}
            Ok(Some(mismatch)) => {
                let actual = match mismatch.actual {
                    Some(kind) => format!("a {kind:?}"),
                    None => "an empty square".to_owned(),
                };
                println!(
                    "{}",
                    alert().apply_to(format!(
                        "Note: the move names a {:?}, but the source square holds {}. \
                         Sent anyway.",
                        mismatch.claimed, actual
                    ))
                );
            }
            Err(TurnCommandError::IllegalMove(err)) => {
                println!(
                    "{}",
                    alert().apply_to(format!(
                        "Cannot play {input:?}: {err}. \
                         Moves look like \"e4\", \"exd5\" or \"e2e4\"."
                    ))
                );
            }
            Err(err) => {
                println!("{}", alert().apply_to(format!("Cannot play {input:?}: {err}.")));
            }
        },
    }
    Ok(false)
}

fn redraw(term: &Term, client_state: &ClientState) -> anyhow::Result<()> {
    let Some(board) = client_state.board() else {
        return Ok(());
    };
    term.clear_screen().context("cannot clear the terminal")?;
    print!("{}", tui::render_board(board, client_state.display_prefs()));
    Ok(())
}
