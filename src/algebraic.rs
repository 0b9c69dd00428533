use std::fmt;

use lazy_static::lazy_static;
use regex_lite::Regex;

use crate::board::BoardState;
use crate::coord::{Col, Coord, Row};
use crate::piece::{PieceKind, PieceOnBoard};
use crate::util::as_single_char;


// A fully specified move, ready for transmission. Produced only by
// `resolve_notation`; carries no legality promise beyond geometry and
// occupancy — the server has the final say.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Move {
    pub from: Coord,
    pub to: Coord,
    pub promote_to: Option<PieceKind>,
}

impl Move {
    pub fn to_wire(&self) -> String {
        let mut s = format!("{}{}", self.from, self.to);
        if let Some(kind) = self.promote_to.and_then(PieceKind::to_promotion_char) {
            s.push(kind);
        }
        s
    }
}

// The advisory piece letter (e.g. the "N" in "Nb1c3") disagreed with what is
// actually on the source square. Reported to the user, never blocking.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct PieceHintMismatch {
    pub claimed: PieceKind,
    pub actual: Option<PieceKind>,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct ResolvedMove {
    pub mv: Move,
    pub piece_hint_mismatch: Option<PieceHintMismatch>,
}

impl ResolvedMove {
    fn plain(mv: Move) -> Self {
        ResolvedMove { mv, piece_hint_mismatch: None }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum MoveError {
    // Input matches no notation rule.
    InvalidNotation,
    // Well-formed shorthand, but no piece can make the move.
    NoCandidate,
    // More than one piece matches; explicit coordinates required.
    AmbiguousNotation,
}

impl fmt::Display for MoveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MoveError::InvalidNotation => write!(f, "unrecognized move notation"),
            MoveError::NoCandidate => write!(f, "no piece can make that move"),
            MoveError::AmbiguousNotation => {
                write!(f, "more than one piece can make that move")
            }
        }
    }
}

impl std::error::Error for MoveError {}


// Resolves user move text against the current board, in priority order:
// explicit coordinates ("e2e4", optionally "Ne2e4" / "e7e8q"), then pawn push
// shorthand ("e4"), then pawn capture shorthand ("exd5").
pub fn resolve_notation(
    board: &BoardState, notation: &str,
) -> Result<ResolvedMove, MoveError> {
    let notation = notation.trim();
    lazy_static! {
        static ref COORD_RE: Regex =
            Regex::new(r"^([NBRQK])?([a-h][1-8])([a-h][1-8])([nbrqNBRQ])?$").unwrap();
        static ref PUSH_RE: Regex = Regex::new(r"^([a-h])([1-8])$").unwrap();
        static ref CAPTURE_RE: Regex = Regex::new(r"^([a-h])x([a-h][1-8])$").unwrap();
    }
    if let Some(cap) = COORD_RE.captures(notation) {
        let from = Coord::from_algebraic(cap.get(2).unwrap().as_str()).unwrap();
        let to = Coord::from_algebraic(cap.get(3).unwrap().as_str()).unwrap();
        let promote_to = cap
            .get(4)
            .map(|m| {
                PieceKind::from_promotion_char(as_single_char(m.as_str()).unwrap()).unwrap()
            })
            .or_else(|| auto_promotion(board, from, to));
        let piece_hint_mismatch = cap.get(1).and_then(|m| {
            let claimed =
                PieceKind::from_algebraic_char(as_single_char(m.as_str()).unwrap()).unwrap();
            let actual = board.piece_at(from).map(|piece| piece.kind);
            (actual != Some(claimed)).then_some(PieceHintMismatch { claimed, actual })
        });
        Ok(ResolvedMove { mv: Move { from, to, promote_to }, piece_hint_mismatch })
    } else if let Some(cap) = PUSH_RE.captures(notation) {
        let col = Col::from_algebraic(as_single_char(cap.get(1).unwrap().as_str()).unwrap())
            .unwrap();
        let row = Row::from_algebraic(as_single_char(cap.get(2).unwrap().as_str()).unwrap())
            .unwrap();
        resolve_pawn_push(board, Coord::new(row, col)).map(ResolvedMove::plain)
    } else if let Some(cap) = CAPTURE_RE.captures(notation) {
        let from_col =
            Col::from_algebraic(as_single_char(cap.get(1).unwrap().as_str()).unwrap()).unwrap();
        let to = Coord::from_algebraic(cap.get(2).unwrap().as_str()).unwrap();
        resolve_pawn_capture(board, from_col, to).map(ResolvedMove::plain)
    } else {
        Err(MoveError::InvalidNotation)
    }
}

// Pushes never capture: an occupied destination means the user must spell the
// capture out ("exd5").
fn resolve_pawn_push(board: &BoardState, to: Coord) -> Result<Move, MoveError> {
    if board.piece_at(to).is_some() {
        return Err(MoveError::NoCandidate);
    }
    let force = board.side_to_move();
    let dir = force.forward();
    let candidates = board
        .pieces_of(force, PieceKind::Pawn)
        .filter(|&from| {
            if from.col != to.col {
                return false;
            }
            let single_step = from.row.shifted(dir) == Some(to.row);
            let double_step = from.row == force.pawn_home_row()
                && from.row.shifted(2 * dir) == Some(to.row)
                && from.row.shifted(dir).is_some_and(|mid| {
                    board.piece_at(Coord::new(mid, from.col)).is_none()
                });
            single_step || double_step
        })
        .collect::<Vec<_>>();
    let from = pick_single(candidates)?;
    Ok(pawn_move(board, from, to))
}

fn resolve_pawn_capture(
    board: &BoardState, from_col: Col, to: Coord,
) -> Result<Move, MoveError> {
    let force = board.side_to_move();
    let target_is_enemy =
        board.piece_at(to).is_some_and(|piece| piece.force == force.opponent());
    if !target_is_enemy {
        return Err(MoveError::NoCandidate);
    }
    let file_distance =
        (from_col.to_zero_based() as i8 - to.col.to_zero_based() as i8).abs();
    if file_distance != 1 {
        return Err(MoveError::NoCandidate);
    }
    let dir = force.forward();
    let candidates = board
        .pieces_of(force, PieceKind::Pawn)
        .filter(|&from| from.col == from_col && from.row.shifted(dir) == Some(to.row))
        .collect::<Vec<_>>();
    let from = pick_single(candidates)?;
    Ok(pawn_move(board, from, to))
}

fn pick_single(candidates: Vec<Coord>) -> Result<Coord, MoveError> {
    match candidates.as_slice() {
        [] => Err(MoveError::NoCandidate),
        [only] => Ok(*only),
        _ => Err(MoveError::AmbiguousNotation),
    }
}

fn pawn_move(board: &BoardState, from: Coord, to: Coord) -> Move {
    Move { from, to, promote_to: auto_promotion(board, from, to) }
}

// A pawn landing on the farthest rank without an explicit promotion letter
// gets queen promotion appended.
fn auto_promotion(board: &BoardState, from: Coord, to: Coord) -> Option<PieceKind> {
    let force = board.side_to_move();
    let is_my_pawn =
        board.piece_at(from) == Some(PieceOnBoard::new(PieceKind::Pawn, force));
    (is_my_pawn && to.row == force.promotion_row()).then_some(PieceKind::Queen)
}
