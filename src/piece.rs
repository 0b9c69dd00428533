use derive_new::new;
use strum::EnumIter;

use crate::force::Force;


#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, EnumIter)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, new)]
pub struct PieceOnBoard {
    pub kind: PieceKind,
    pub force: Force,
}

impl PieceKind {
    pub fn to_full_algebraic(self) -> char {
        match self {
            PieceKind::Pawn => 'P',
            PieceKind::Knight => 'N',
            PieceKind::Bishop => 'B',
            PieceKind::Rook => 'R',
            PieceKind::Queen => 'Q',
            PieceKind::King => 'K',
        }
    }

    pub fn from_algebraic_char(notation: char) -> Option<Self> {
        match notation {
            'P' => Some(PieceKind::Pawn),
            'N' => Some(PieceKind::Knight),
            'B' => Some(PieceKind::Bishop),
            'R' => Some(PieceKind::Rook),
            'Q' => Some(PieceKind::Queen),
            'K' => Some(PieceKind::King),
            _ => None,
        }
    }

    // Promotion target letter as transmitted on the wire ("e7e8q").
    pub fn to_promotion_char(self) -> Option<char> {
        match self {
            PieceKind::Knight | PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen => {
                Some(self.to_full_algebraic().to_ascii_lowercase())
            }
            PieceKind::Pawn | PieceKind::King => None,
        }
    }

    pub fn from_promotion_char(notation: char) -> Option<Self> {
        let kind = Self::from_algebraic_char(notation.to_ascii_uppercase())?;
        kind.to_promotion_char().map(|_| kind)
    }
}

// Snapshot token: White pieces are uppercase, Black pieces lowercase.
pub fn piece_to_ascii(piece: PieceOnBoard) -> char {
    let ch = piece.kind.to_full_algebraic();
    match piece.force {
        Force::White => ch,
        Force::Black => ch.to_ascii_lowercase(),
    }
}

pub fn piece_from_ascii(ch: char) -> Option<PieceOnBoard> {
    let force = if ch.is_ascii_uppercase() { Force::White } else { Force::Black };
    let kind = PieceKind::from_algebraic_char(ch.to_ascii_uppercase())?;
    Some(PieceOnBoard::new(kind, force))
}

pub fn piece_to_pictogram(piece_kind: PieceKind, force: Force) -> char {
    use self::Force::*;
    use self::PieceKind::*;
    match (force, piece_kind) {
        (White, Pawn) => '♙',
        (White, Knight) => '♘',
        (White, Bishop) => '♗',
        (White, Rook) => '♖',
        (White, Queen) => '♕',
        (White, King) => '♔',
        (Black, Pawn) => '♟',
        (Black, Knight) => '♞',
        (Black, Bishop) => '♝',
        (Black, Rook) => '♜',
        (Black, Queen) => '♛',
        (Black, King) => '♚',
    }
}
