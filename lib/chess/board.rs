use crate::chess::{Color, File, ParsePieceError, Piece, Rank, Role, Square};
use crate::util::Integer;
use derive_more::{Display, Error, From};
use std::fmt::{self, Write};
use std::{ops::Index, str::FromStr};

/// The arrangement of [`Piece`]s on the chess board.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct Board([Option<Piece>; 64]);

impl Default for Board {
    /// The initial arrangement.
    fn default() -> Self {
        use Role::*;

        let mut board = Board::empty();
        let back = [Rook, Knight, Bishop, Queen, King, Bishop, Knight, Rook];

        for (f, &r) in File::iter().zip(&back) {
            board.set(Square::new(f, Rank::First), Some(Piece::new(r, Color::White)));
            board.set(Square::new(f, Rank::Second), Some(Piece::new(Pawn, Color::White)));
            board.set(Square::new(f, Rank::Seventh), Some(Piece::new(Pawn, Color::Black)));
            board.set(Square::new(f, Rank::Eighth), Some(Piece::new(r, Color::Black)));
        }

        board
    }
}

impl Board {
    /// A board without any pieces.
    #[inline(always)]
    pub const fn empty() -> Self {
        Board([None; 64])
    }

    /// Places a piece on a square, or clears it, returning what was there before.
    #[inline(always)]
    pub fn set(&mut self, sq: Square, p: Option<Piece>) -> Option<Piece> {
        std::mem::replace(&mut self.0[sq.get() as usize], p)
    }

    /// Removes the piece on a square, if any.
    #[inline(always)]
    pub fn take(&mut self, sq: Square) -> Option<Piece> {
        self.set(sq, None)
    }

    /// An iterator over the occupied squares and their pieces.
    pub fn iter(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::iter().filter_map(|sq| Some((sq, self[sq]?)))
    }

    /// The pieces of one side.
    pub fn by_color(&self, c: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.iter().filter(move |(_, p)| p.color() == c)
    }

    /// The square of a side's king, if there is one.
    pub fn king(&self, c: Color) -> Option<Square> {
        let king = Piece::new(Role::King, c);
        self.iter().find_map(|(sq, p)| (p == king).then_some(sq))
    }

    /// The piece placement field of the board in [FEN] notation.
    ///
    /// [FEN]: https://www.chessprogramming.org/Forsyth-Edwards_Notation
    pub fn placement(&self) -> String {
        let mut s = String::with_capacity(64 + 7);

        for r in Rank::iter().rev() {
            let mut gap = 0;

            for f in File::iter() {
                match self[Square::new(f, r)] {
                    None => gap += 1,
                    Some(p) => {
                        if gap > 0 {
                            s.push(char::from(b'0' + gap));
                            gap = 0;
                        }

                        s.push_str(&p.to_string());
                    }
                }
            }

            if gap > 0 {
                s.push(char::from(b'0' + gap));
            }

            if r != Rank::First {
                s.push('/');
            }
        }

        s
    }
}

impl Index<Square> for Board {
    type Output = Option<Piece>;

    #[inline(always)]
    fn index(&self, sq: Square) -> &Self::Output {
        &self.0[sq.get() as usize]
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Board({})", self.placement())
    }
}

/// Prints the board as a grid of figurines, eighth rank first.
impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in Rank::iter().rev() {
            write!(f, "{r} ")?;
            for file in File::iter() {
                match self[Square::new(file, r)] {
                    Some(p) => f.write_char(p.figurine())?,
                    None => f.write_char('·')?,
                }

                if file != File::H {
                    f.write_char(' ')?;
                }
            }

            f.write_char('\n')?;
        }

        f.write_str("  a b c d e f g h")
    }
}

/// The reason why parsing [`Board`] failed.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error, From)]
pub enum ParseBoardError {
    #[display(fmt = "failed to parse board, expected 8 ranks separated by `/`")]
    #[from(ignore)]
    InvalidRankCount,
    #[display(fmt = "failed to parse board, expected 8 squares per rank")]
    #[from(ignore)]
    InvalidFileCount,
    #[display(fmt = "failed to parse board")]
    InvalidPiece(ParsePieceError),
}

/// Parses the piece placement field of a [FEN] string.
///
/// [FEN]: https://www.chessprogramming.org/Forsyth-Edwards_Notation
impl FromStr for Board {
    type Err = ParseBoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let ranks: Vec<&str> = s.split('/').collect();

        if ranks.len() != 8 {
            return Err(ParseBoardError::InvalidRankCount);
        }

        let mut board = Board::empty();

        for (r, row) in Rank::iter().rev().zip(ranks) {
            let mut f = 0;

            for c in row.chars() {
                if let Some(gap) = c.to_digit(10).filter(|d| (1..=8).contains(d)) {
                    f += gap as i8;
                } else {
                    let file = File::try_new(f).ok_or(ParseBoardError::InvalidFileCount)?;
                    board.set(Square::new(file, r), Some(c.to_string().parse()?));
                    f += 1;
                }

                if f > 8 {
                    return Err(ParseBoardError::InvalidFileCount);
                }
            }

            if f != 8 {
                return Err(ParseBoardError::InvalidFileCount);
            }
        }

        Ok(board)
    }
}
