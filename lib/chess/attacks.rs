use crate::chess::{movegen, Bitboard, Board, Color};

/// The set of squares threatened by the pieces of one side.
///
/// Pawns threaten their forward diagonals only and castling threatens nothing.
pub fn attacks(board: &Board, side: Color) -> Bitboard {
    board
        .by_color(side)
        .map(|(sq, p)| movegen::threats(board, sq, p))
        .fold(Bitboard::empty(), |acc, bb| acc | bb)
}
