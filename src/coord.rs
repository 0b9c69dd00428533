use std::fmt;

use itertools::Itertools;


pub const NUM_ROWS: u8 = 8;
pub const NUM_COLS: u8 = 8;


// Row ('1'..'8'), 0-based internally.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Row {
    idx: u8,
}

impl Row {
    pub const fn from_zero_based(idx: u8) -> Self {
        assert!(idx < NUM_ROWS);
        Self { idx }
    }
    pub fn from_algebraic(ch: char) -> Option<Self> {
        let idx = (ch as u32).wrapping_sub('1' as u32);
        (idx < NUM_ROWS as u32).then(|| Self::from_zero_based(idx as u8))
    }
    pub const fn to_zero_based(self) -> u8 { self.idx }
    pub const fn to_algebraic(self) -> char { (self.idx + b'1') as char }
    // In-bounds shift, `None` when the result would leave the board.
    pub fn shifted(self, delta: i8) -> Option<Self> {
        let idx = self.idx as i16 + delta as i16;
        (0..NUM_ROWS as i16).contains(&idx).then(|| Self::from_zero_based(idx as u8))
    }
    pub fn all() -> impl Iterator<Item = Self> + Clone {
        (0..NUM_ROWS).map(Self::from_zero_based)
    }
}


// Column ('a'..'h'), 0-based internally.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Col {
    idx: u8,
}

impl Col {
    pub const fn from_zero_based(idx: u8) -> Self {
        assert!(idx < NUM_COLS);
        Self { idx }
    }
    pub fn from_algebraic(ch: char) -> Option<Self> {
        let idx = (ch as u32).wrapping_sub('a' as u32);
        (idx < NUM_COLS as u32).then(|| Self::from_zero_based(idx as u8))
    }
    pub const fn to_zero_based(self) -> u8 { self.idx }
    pub const fn to_algebraic(self) -> char { (self.idx + b'a') as char }
    pub fn shifted(self, delta: i8) -> Option<Self> {
        let idx = self.idx as i16 + delta as i16;
        (0..NUM_COLS as i16).contains(&idx).then(|| Self::from_zero_based(idx as u8))
    }
    pub fn all() -> impl Iterator<Item = Self> + Clone {
        (0..NUM_COLS).map(Self::from_zero_based)
    }
}


#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Coord {
    pub row: Row,
    pub col: Col,
}

impl Coord {
    pub const fn new(row: Row, col: Col) -> Self { Self { row, col } }
    pub fn from_algebraic(s: &str) -> Option<Self> {
        let (col, row) = s.chars().collect_tuple()?;
        Some(Coord {
            row: Row::from_algebraic(row)?,
            col: Col::from_algebraic(col)?,
        })
    }
    pub fn to_algebraic(self) -> String {
        format!("{}{}", self.col.to_algebraic(), self.row.to_algebraic())
    }
    pub fn all() -> impl Iterator<Item = Coord> {
        Row::all().cartesian_product(Col::all()).map(|(row, col)| Coord { row, col })
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.col.to_algebraic(), self.row.to_algebraic())
    }
}

impl fmt::Debug for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Coord({self})")
    }
}


impl Row {
    #![allow(dead_code)]
    pub const _1: Row = Row::from_zero_based(0);
    pub const _2: Row = Row::from_zero_based(1);
    pub const _3: Row = Row::from_zero_based(2);
    pub const _4: Row = Row::from_zero_based(3);
    pub const _5: Row = Row::from_zero_based(4);
    pub const _6: Row = Row::from_zero_based(5);
    pub const _7: Row = Row::from_zero_based(6);
    pub const _8: Row = Row::from_zero_based(7);
}

impl Col {
    #![allow(dead_code)]
    pub const A: Col = Col::from_zero_based(0);
    pub const B: Col = Col::from_zero_based(1);
    pub const C: Col = Col::from_zero_based(2);
    pub const D: Col = Col::from_zero_based(3);
    pub const E: Col = Col::from_zero_based(4);
    pub const F: Col = Col::from_zero_based(5);
    pub const G: Col = Col::from_zero_based(6);
    pub const H: Col = Col::from_zero_based(7);
}

impl Coord {
    #![allow(dead_code)]
    pub const A1: Coord = Coord::new(Row::_1, Col::A);
    pub const A2: Coord = Coord::new(Row::_2, Col::A);
    pub const A7: Coord = Coord::new(Row::_7, Col::A);
    pub const A8: Coord = Coord::new(Row::_8, Col::A);
    pub const B1: Coord = Coord::new(Row::_1, Col::B);
    pub const B8: Coord = Coord::new(Row::_8, Col::B);
    pub const C3: Coord = Coord::new(Row::_3, Col::C);
    pub const C6: Coord = Coord::new(Row::_6, Col::C);
    pub const D1: Coord = Coord::new(Row::_1, Col::D);
    pub const D4: Coord = Coord::new(Row::_4, Col::D);
    pub const D5: Coord = Coord::new(Row::_5, Col::D);
    pub const D8: Coord = Coord::new(Row::_8, Col::D);
    pub const E1: Coord = Coord::new(Row::_1, Col::E);
    pub const E2: Coord = Coord::new(Row::_2, Col::E);
    pub const E3: Coord = Coord::new(Row::_3, Col::E);
    pub const E4: Coord = Coord::new(Row::_4, Col::E);
    pub const E5: Coord = Coord::new(Row::_5, Col::E);
    pub const E7: Coord = Coord::new(Row::_7, Col::E);
    pub const E8: Coord = Coord::new(Row::_8, Col::E);
    pub const F3: Coord = Coord::new(Row::_3, Col::F);
    pub const F7: Coord = Coord::new(Row::_7, Col::F);
    pub const G1: Coord = Coord::new(Row::_1, Col::G);
    pub const G8: Coord = Coord::new(Row::_8, Col::G);
    pub const H1: Coord = Coord::new(Row::_1, Col::H);
    pub const H8: Coord = Coord::new(Row::_8, Col::H);
}
