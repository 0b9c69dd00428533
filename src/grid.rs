use std::{fmt, ops};

use crate::coord::{Coord, NUM_COLS, NUM_ROWS};
use crate::piece::{piece_to_ascii, PieceOnBoard};


// Fixed 8x8 piece container. Row 0 is White's first rank.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    data: [[Option<PieceOnBoard>; NUM_COLS as usize]; NUM_ROWS as usize],
}

impl Grid {
    pub fn new() -> Self {
        Grid { data: [[None; NUM_COLS as usize]; NUM_ROWS as usize] }
    }

    pub fn is_empty(&self, pos: Coord) -> bool { self[pos].is_none() }
}

impl ops::Index<Coord> for Grid {
    type Output = Option<PieceOnBoard>;
    fn index(&self, pos: Coord) -> &Self::Output {
        &self.data[pos.row.to_zero_based() as usize][pos.col.to_zero_based() as usize]
    }
}

impl ops::IndexMut<Coord> for Grid {
    fn index_mut(&mut self, pos: Coord) -> &mut Self::Output {
        &mut self.data[pos.row.to_zero_based() as usize][pos.col.to_zero_based() as usize]
    }
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Grid ")?;
        f.debug_map()
            .entries(Coord::all().filter_map(|coord| {
                self[coord].map(|piece| (coord.to_algebraic(), piece_to_ascii(piece)))
            }))
            .finish()
    }
}
