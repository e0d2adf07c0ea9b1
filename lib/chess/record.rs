use crate::chess::{Piece, Special, Square};

/// What a committed [`Move`][`crate::chess::Move`] did to the board.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct MoveRecord {
    /// The source [`Square`].
    pub whence: Square,
    /// The destination [`Square`].
    pub whither: Square,
    /// The piece that landed on the destination, after promotion.
    pub piece: Piece,
    /// The piece that was captured, if any.
    pub captured: Option<Piece>,
    pub special: Option<Special>,
}

impl MoveRecord {
    /// Whether a pawn was promoted.
    #[inline(always)]
    pub fn is_promotion(&self) -> bool {
        self.special == Some(Special::Promotion)
    }

    /// Whether this was an en passant capture.
    #[inline(always)]
    pub fn is_en_passant(&self) -> bool {
        self.special == Some(Special::EnPassant)
    }
}
