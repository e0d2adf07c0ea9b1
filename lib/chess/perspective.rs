use crate::chess::Color;

/// Trait for board coordinates that mirror between the two sides.
///
/// White's view is canonical, so e.g. [`Rank::First`][`crate::chess::Rank::First`] seen by
/// black is the eighth rank.
pub trait Perspective: Copy {
    /// Mirrors across the middle of the board.
    fn flip(&self) -> Self;

    /// The equivalent from `side`'s point of view.
    #[inline(always)]
    fn perspective(&self, side: Color) -> Self {
        match side {
            Color::White => *self,
            Color::Black => self.flip(),
        }
    }
}
