use crate::chess::{Bitboard, File, ParseFileError, ParseRankError, Perspective, Rank};
use crate::util::Integer;
use derive_more::{Display, Error, From};
use std::{fmt, str::FromStr};

/// A square on the chess board.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
#[repr(i8)]
#[rustfmt::skip]
pub enum Square {
    A1, B1, C1, D1, E1, F1, G1, H1,
    A2, B2, C2, D2, E2, F2, G2, H2,
    A3, B3, C3, D3, E3, F3, G3, H3,
    A4, B4, C4, D4, E4, F4, G4, H4,
    A5, B5, C5, D5, E5, F5, G5, H5,
    A6, B6, C6, D6, E6, F6, G6, H6,
    A7, B7, C7, D7, E7, F7, G7, H7,
    A8, B8, C8, D8, E8, F8, G8, H8,
}

impl Square {
    /// Constructs [`Square`] from a pair of [`File`] and [`Rank`].
    #[inline(always)]
    pub fn new(f: File, r: Rank) -> Self {
        <Self as Integer>::new(f.get() | r.get() << 3)
    }

    /// This square's [`File`].
    #[inline(always)]
    pub fn file(&self) -> File {
        File::new(self.get() & 0b111)
    }

    /// This square's [`Rank`].
    #[inline(always)]
    pub fn rank(&self) -> Rank {
        Rank::new(self.get() >> 3)
    }

    /// The square reached by stepping `df` files and `dr` ranks, if still on the board.
    #[inline(always)]
    pub fn offset(&self, df: i8, dr: i8) -> Option<Self> {
        let f = File::try_new(self.file().get() + df)?;
        let r = Rank::try_new(self.rank().get() + dr)?;
        Some(Square::new(f, r))
    }

    /// This square's row on the grid, where row `0` is the eighth rank.
    #[inline(always)]
    pub fn row(&self) -> usize {
        (Rank::MAX - self.rank().get()) as usize
    }

    /// This square's column on the grid, where column `0` is the a-file.
    #[inline(always)]
    pub fn col(&self) -> usize {
        self.file().get() as usize
    }

    /// Constructs [`Square`] from grid coordinates, if in range.
    ///
    /// Row `0` is the eighth rank and column `0` is the a-file.
    pub fn from_coords(row: usize, col: usize) -> Option<Self> {
        let r = Rank::try_new(Rank::MAX - i8::try_from(row).ok()?)?;
        let f = File::try_new(i8::try_from(col).ok()?)?;
        Some(Square::new(f, r))
    }

    /// Returns a [`Bitboard`] that only contains this square.
    #[inline(always)]
    pub fn bitboard(self) -> Bitboard {
        Bitboard::new(1 << self.get())
    }
}

unsafe impl Integer for Square {
    type Repr = i8;
    const MIN: Self::Repr = Square::A1 as _;
    const MAX: Self::Repr = Square::H8 as _;
}

impl Perspective for Square {
    /// Flips this square's [`Rank`].
    #[inline(always)]
    fn flip(&self) -> Self {
        <Self as Integer>::new(self.get() ^ Square::A8.get())
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.file(), f)?;
        fmt::Display::fmt(&self.rank(), f)?;
        Ok(())
    }
}

/// The reason why parsing [`Square`] failed.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error, From)]
pub enum ParseSquareError {
    #[display(fmt = "failed to parse square")]
    InvalidFile(ParseFileError),
    #[display(fmt = "failed to parse square")]
    InvalidRank(ParseRankError),
}

impl FromStr for Square {
    type Err = ParseSquareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let i = s.char_indices().nth(1).map_or_else(|| s.len(), |(i, _)| i);
        Ok(Square::new(s[..i].parse()?, s[i..].parse()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::mem::size_of;
    use test_strategy::proptest;

    #[test]
    fn square_guarantees_zero_value_optimization() {
        assert_eq!(size_of::<Option<Square>>(), size_of::<Square>());
    }

    #[proptest]
    fn new_constructs_square_from_pair_of_file_and_rank(sq: Square) {
        assert_eq!(Square::new(sq.file(), sq.rank()), sq);
    }

    #[proptest]
    fn square_has_an_equivalent_bitboard(sq: Square) {
        assert_eq!(Vec::from_iter(sq.bitboard()), vec![sq]);
    }

    #[proptest]
    fn flipping_square_preserves_file_and_flips_rank(sq: Square) {
        assert_eq!(sq.flip(), Square::new(sq.file(), sq.rank().flip()));
    }

    #[proptest]
    fn offset_is_reversible(
        sq: Square,
        #[strategy(-7i8..=7)] df: i8,
        #[strategy(-7i8..=7)] dr: i8,
    ) {
        if let Some(to) = sq.offset(df, dr) {
            assert_eq!(to.offset(-df, -dr), Some(sq));
            assert_eq!(to.file() - sq.file(), df);
            assert_eq!(to.rank() - sq.rank(), dr);
        }
    }

    #[test]
    fn offset_fails_off_the_board() {
        assert_eq!(Square::H4.offset(1, 0), None);
        assert_eq!(Square::A1.offset(0, -1), None);
        assert_eq!(Square::B8.offset(-1, 1), None);
    }

    #[proptest]
    fn grid_coordinates_are_an_identity(sq: Square) {
        assert_eq!(Square::from_coords(sq.row(), sq.col()), Some(sq));
    }

    #[test]
    fn row_zero_is_the_eighth_rank() {
        assert_eq!(Square::from_coords(0, 0), Some(Square::A8));
        assert_eq!(Square::from_coords(7, 7), Some(Square::H1));
        assert_eq!(Square::from_coords(8, 0), None);
        assert_eq!(Square::from_coords(0, 8), None);
    }

    #[proptest]
    fn parsing_printed_square_is_an_identity(sq: Square) {
        assert_eq!(sq.to_string().parse(), Ok(sq));
    }

    #[proptest]
    fn parsing_square_fails_if_file_invalid(
        #[filter(!('a'..='h').contains(&#c))] c: char,
        r: Rank,
    ) {
        assert_eq!(
            [c.to_string(), r.to_string()].concat().parse::<Square>(),
            Err(ParseSquareError::InvalidFile(ParseFileError))
        );
    }

    #[proptest]
    fn parsing_square_fails_if_rank_invalid(
        f: File,
        #[filter(!('1'..='8').contains(&#c))] c: char,
    ) {
        assert_eq!(
            [f.to_string(), c.to_string()].concat().parse::<Square>(),
            Err(ParseSquareError::InvalidRank(ParseRankError))
        );
    }

    #[proptest]
    fn parsing_square_fails_if_length_not_two(#[filter(#s.len() != 2)] s: String) {
        assert_eq!(s.parse::<Square>().ok(), None);
    }
}
