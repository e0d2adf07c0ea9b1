use crate::chess::{File, Rank, Square};
use crate::util::Integer;
use derive_more::*;
use std::fmt::{self, Write};

/// A set of squares on a chess board.
#[derive(
    Default,
    Copy,
    Clone,
    Eq,
    PartialEq,
    Hash,
    Constructor,
    BitAnd,
    BitAndAssign,
    BitOr,
    BitOrAssign,
    BitXor,
    BitXorAssign,
    Not,
)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[repr(transparent)]
pub struct Bitboard(u64);

impl fmt::Debug for Bitboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_char('\n')?;
        for rank in Rank::iter().rev() {
            for file in File::iter() {
                let sq = Square::new(file, rank);
                f.write_char(if self.contains(sq) { '■' } else { '◻' })?;
                f.write_char(if file < File::H { ' ' } else { '\n' })?;
            }
        }

        Ok(())
    }
}

impl Bitboard {
    /// An empty board.
    #[inline(always)]
    pub const fn empty() -> Self {
        Bitboard(0)
    }

    /// A full board.
    #[inline(always)]
    pub const fn full() -> Self {
        Bitboard(0xFFFFFFFFFFFFFFFF)
    }

    /// The number of [`Square`]s in the set.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.0.count_ones() as _
    }

    /// Whether the board is empty.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    /// Whether this [`Square`] is in the set.
    #[inline(always)]
    pub fn contains(&self, sq: Square) -> bool {
        !(*self & sq.bitboard()).is_empty()
    }

    /// Adds a [`Square`] to the set.
    #[inline(always)]
    pub fn with(self, sq: Square) -> Self {
        self | sq.bitboard()
    }

    /// Removes a [`Square`] from the set.
    #[inline(always)]
    pub fn without(self, sq: Square) -> Self {
        self & !sq.bitboard()
    }
}

impl FromIterator<Square> for Bitboard {
    #[inline(always)]
    fn from_iter<I: IntoIterator<Item = Square>>(iter: I) -> Self {
        iter.into_iter().fold(Bitboard::empty(), Bitboard::with)
    }
}

impl Extend<Square> for Bitboard {
    #[inline(always)]
    fn extend<I: IntoIterator<Item = Square>>(&mut self, iter: I) {
        *self = iter.into_iter().fold(*self, Bitboard::with);
    }
}

/// An iterator over the [`Square`]s in a [`Bitboard`].
#[derive(Debug)]
pub struct Squares(Bitboard);

impl Iterator for Squares {
    type Item = Square;

    #[inline(always)]
    fn next(&mut self) -> Option<Self::Item> {
        if self.0.is_empty() {
            None
        } else {
            let sq = <Square as Integer>::new(self.0 .0.trailing_zeros() as _);
            self.0 = self.0.without(sq);
            Some(sq)
        }
    }

    #[inline(always)]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.0.len(), Some(self.0.len()))
    }
}

impl ExactSizeIterator for Squares {}

impl IntoIterator for Bitboard {
    type Item = Square;
    type IntoIter = Squares;

    #[inline(always)]
    fn into_iter(self) -> Self::IntoIter {
        Squares(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use test_strategy::proptest;

    #[proptest]
    fn len_counts_squares(bb: Bitboard) {
        assert_eq!(bb.len(), bb.into_iter().count());
    }

    #[proptest]
    fn is_empty_only_for_the_empty_set(bb: Bitboard) {
        assert_eq!(bb.is_empty(), bb == Bitboard::empty());
    }

    #[proptest]
    fn contains_agrees_with_iteration(bb: Bitboard, sq: Square) {
        assert_eq!(bb.contains(sq), bb.into_iter().any(|s| s == sq));
    }

    #[proptest]
    fn with_adds_square(bb: Bitboard, sq: Square) {
        assert!(bb.with(sq).contains(sq));
    }

    #[proptest]
    fn without_removes_square(bb: Bitboard, sq: Square) {
        assert!(!bb.without(sq).contains(sq));
    }

    #[proptest]
    fn iterating_yields_unique_squares_in_order(bb: Bitboard) {
        let squares: Vec<_> = bb.into_iter().collect();
        let unique: HashSet<_> = squares.iter().copied().collect();
        assert_eq!(unique.len(), squares.len());
        assert!(squares.windows(2).all(|w| w[0] < w[1]));
    }

    #[proptest]
    fn collecting_squares_is_an_identity(bb: Bitboard) {
        assert_eq!(Bitboard::from_iter(bb), bb);
    }

    #[test]
    fn full_contains_every_square() {
        assert_eq!(Bitboard::full().len(), 64);
        assert_eq!(Bitboard::empty().len(), 0);
    }
}
