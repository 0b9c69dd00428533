use crate::coord::{Col, Coord, Row, NUM_COLS, NUM_ROWS};
use crate::force::Force;


#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Charset {
    Ascii,
    Unicode,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum BoardOrientation {
    Normal,  // White at the bottom
    Rotated, // Black at the bottom
}

// Purely local rendering preferences; never transmitted.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct DisplayPrefs {
    pub orientation: Force,
    pub charset: Charset,
}

impl Default for DisplayPrefs {
    fn default() -> Self {
        DisplayPrefs { orientation: Force::White, charset: Charset::Unicode }
    }
}

// Screen coordinates: (0, 0) is the top-left square regardless of which force
// sits at the bottom.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct DisplayCoord {
    pub x: i8,
    pub y: i8,
}

pub fn get_board_orientation(viewer: Force) -> BoardOrientation {
    match viewer {
        Force::White => BoardOrientation::Normal,
        Force::Black => BoardOrientation::Rotated,
    }
}

pub fn to_display_coord(coord: Coord, orientation: BoardOrientation) -> DisplayCoord {
    match orientation {
        BoardOrientation::Normal => DisplayCoord {
            x: coord.col.to_zero_based() as i8,
            y: NUM_ROWS as i8 - coord.row.to_zero_based() as i8 - 1,
        },
        BoardOrientation::Rotated => DisplayCoord {
            x: NUM_COLS as i8 - coord.col.to_zero_based() as i8 - 1,
            y: coord.row.to_zero_based() as i8,
        },
    }
}

pub fn from_display_row(y: i8, orientation: BoardOrientation) -> Option<Row> {
    if !(0..NUM_ROWS as i8).contains(&y) {
        return None;
    }
    let idx = match orientation {
        BoardOrientation::Normal => NUM_ROWS as i8 - y - 1,
        BoardOrientation::Rotated => y,
    };
    Some(Row::from_zero_based(idx as u8))
}

pub fn from_display_col(x: i8, orientation: BoardOrientation) -> Option<Col> {
    if !(0..NUM_COLS as i8).contains(&x) {
        return None;
    }
    let idx = match orientation {
        BoardOrientation::Normal => x,
        BoardOrientation::Rotated => NUM_COLS as i8 - x - 1,
    };
    Some(Col::from_zero_based(idx as u8))
}

pub fn from_display_coord(q: DisplayCoord, orientation: BoardOrientation) -> Option<Coord> {
    Some(Coord {
        row: from_display_row(q.y, orientation)?,
        col: from_display_col(q.x, orientation)?,
    })
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_transform_is_inverse() {
        for orientation in [BoardOrientation::Normal, BoardOrientation::Rotated] {
            for coord in Coord::all() {
                let q = to_display_coord(coord, orientation);
                assert_eq!(from_display_coord(q, orientation), Some(coord));
            }
        }
    }

    // The rotated view is the normal view with both axes reversed; it never
    // reads different squares.
    #[test]
    fn rotation_reverses_both_axes() {
        for coord in Coord::all() {
            let normal = to_display_coord(coord, BoardOrientation::Normal);
            let rotated = to_display_coord(coord, BoardOrientation::Rotated);
            assert_eq!(rotated.x, NUM_COLS as i8 - normal.x - 1);
            assert_eq!(rotated.y, NUM_ROWS as i8 - normal.y - 1);
        }
    }

    #[test]
    fn out_of_range_display_coords() {
        for orientation in [BoardOrientation::Normal, BoardOrientation::Rotated] {
            assert_eq!(from_display_row(-1, orientation), None);
            assert_eq!(from_display_row(NUM_ROWS as i8, orientation), None);
            assert_eq!(from_display_col(-1, orientation), None);
            assert_eq!(from_display_col(NUM_COLS as i8, orientation), None);
        }
    }
}
