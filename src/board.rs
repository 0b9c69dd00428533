use std::fmt;

use crate::coord::{Col, Coord, Row, NUM_COLS, NUM_ROWS};
use crate::force::Force;
use crate::grid::Grid;
use crate::piece::{piece_from_ascii, PieceKind, PieceOnBoard};


pub const SNAPSHOT_LEN: usize = (NUM_ROWS as usize) * (NUM_COLS as usize);
pub const EMPTY_SQUARE_TOKEN: char = '.';

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SnapshotError {
    BadLength { actual: usize },
    BadToken { token: char, index: usize },
}

impl fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnapshotError::BadLength { actual } => {
                write!(f, "board snapshot must contain {SNAPSHOT_LEN} cells, got {actual}")
            }
            SnapshotError::BadToken { token, index } => {
                write!(f, "unrecognized board token {token:?} at cell {index}")
            }
        }
    }
}

impl std::error::Error for SnapshotError {}


// Local mirror of the server's board. Always equal to the most recent full
// snapshot; never updated piecewise and never updated speculatively after a
// locally resolved move.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct BoardState {
    grid: Grid,
    side_to_move: Force,
    my_force: Force,
}

impl BoardState {
    pub fn from_snapshot(
        my_force: Force, side_to_move: Force, payload: &str,
    ) -> Result<Self, SnapshotError> {
        let grid = decode_snapshot(payload)?;
        Ok(BoardState { grid, side_to_move, my_force })
    }

    // Replaces the whole board. A payload that fails to decode leaves the
    // previous state untouched.
    pub fn apply_snapshot(
        &mut self, side_to_move: Force, payload: &str,
    ) -> Result<(), SnapshotError> {
        let grid = decode_snapshot(payload)?;
        self.grid = grid;
        self.side_to_move = side_to_move;
        Ok(())
    }

    pub fn piece_at(&self, pos: Coord) -> Option<PieceOnBoard> { self.grid[pos] }

    pub fn pieces_of(
        &self, force: Force, kind: PieceKind,
    ) -> impl Iterator<Item = Coord> + '_ {
        let target = PieceOnBoard::new(kind, force);
        Coord::all().filter(move |&pos| self.grid[pos] == Some(target))
    }

    pub fn side_to_move(&self) -> Force { self.side_to_move }
    pub fn my_force(&self) -> Force { self.my_force }
    pub fn grid(&self) -> &Grid { &self.grid }
}

// Rank-major: rank 8 first, files a..h within each rank; '.' marks an empty
// square, pieces use FEN letters (uppercase White, lowercase Black).
fn decode_snapshot(payload: &str) -> Result<Grid, SnapshotError> {
    let tokens: Vec<char> = payload.chars().collect();
    if tokens.len() != SNAPSHOT_LEN {
        return Err(SnapshotError::BadLength { actual: tokens.len() });
    }
    let mut grid = Grid::new();
    for (index, &token) in tokens.iter().enumerate() {
        if token == EMPTY_SQUARE_TOKEN {
            continue;
        }
        let piece =
            piece_from_ascii(token).ok_or(SnapshotError::BadToken { token, index })?;
        let row = Row::from_zero_based(NUM_ROWS - 1 - index as u8 / NUM_COLS);
        let col = Col::from_zero_based(index as u8 % NUM_COLS);
        grid[Coord::new(row, col)] = Some(piece);
    }
    Ok(grid)
}
