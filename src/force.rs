use strum::EnumIter;

use crate::coord::Row;


#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, EnumIter)]
pub enum Force {
    White,
    Black,
}

impl Force {
    pub fn opponent(self) -> Force {
        match self {
            Force::White => Force::Black,
            Force::Black => Force::White,
        }
    }

    // Direction of pawn movement, in row increments.
    pub fn forward(self) -> i8 {
        match self {
            Force::White => 1,
            Force::Black => -1,
        }
    }

    // The row where this force's pawns start, i.e. where a double step is allowed.
    pub fn pawn_home_row(self) -> Row {
        match self {
            Force::White => Row::_2,
            Force::Black => Row::_7,
        }
    }

    // The farthest row for this force; a pawn arriving here must promote.
    pub fn promotion_row(self) -> Row {
        match self {
            Force::White => Row::_8,
            Force::Black => Row::_1,
        }
    }
}
