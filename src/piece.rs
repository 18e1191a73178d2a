use derive_new::new;

use crate::side::Side;


const ALL_DIAGONALS: [(i8, i8); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum PieceKind {
    Man,
    King,
}

// A square holds `Option<Piece>`; together with `None` this gives the five possible occupants:
// empty, local man, local king, remote man, remote king.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, new)]
pub struct Piece {
    pub kind: PieceKind,
    pub side: Side,
}

impl Piece {
    pub fn man(side: Side) -> Self { Self::new(PieceKind::Man, side) }
    pub fn king(side: Side) -> Self { Self::new(PieceKind::King, side) }

    pub fn is_king(self) -> bool { self.kind == PieceKind::King }

    // Diagonal directions as (row, col) deltas. Men only go forward, kings go anywhere.
    pub fn directions(self) -> Vec<(i8, i8)> {
        match self.kind {
            PieceKind::Man => {
                let forward = self.side.forward();
                vec![(forward, -1), (forward, 1)]
            }
            PieceKind::King => ALL_DIAGONALS.to_vec(),
        }
    }

    pub fn promoted(self) -> Self { Self { kind: PieceKind::King, ..self } }
}

pub fn piece_to_ascii(piece: Piece) -> char {
    use PieceKind::*;
    use Side::*;
    match (piece.side, piece.kind) {
        (Local, Man) => 'o',
        (Local, King) => 'O',
        (Remote, Man) => 'x',
        (Remote, King) => 'X',
    }
}

pub fn piece_from_ascii(ch: char) -> Option<Piece> {
    match ch {
        'o' => Some(Piece::man(Side::Local)),
        'O' => Some(Piece::king(Side::Local)),
        'x' => Some(Piece::man(Side::Remote)),
        'X' => Some(Piece::king(Side::Remote)),
        _ => None,
    }
}

pub fn piece_to_pictogram(piece: Piece) -> char {
    use PieceKind::*;
    use Side::*;
    match (piece.side, piece.kind) {
        (Local, Man) => '⛀',
        (Local, King) => '⛁',
        (Remote, Man) => '⛂',
        (Remote, King) => '⛃',
    }
}
