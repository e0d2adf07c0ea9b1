use crate::chess::{Color, Square};
use bitflags::bitflags;
use derive_more::{Display, Error};
use std::{fmt, str::FromStr};

bitflags! {
    /// The castling rights in a chess [`Position`][`crate::chess::Position`].
    pub struct Castles: u8 {
        const WHITE_SHORT = 0b0001;
        const WHITE_LONG =  0b0010;
        const BLACK_SHORT = 0b0100;
        const BLACK_LONG =  0b1000;
    }
}

impl Castles {
    /// The kingside castling right of the given side.
    #[inline(always)]
    pub fn short(side: Color) -> Self {
        match side {
            Color::White => Castles::WHITE_SHORT,
            Color::Black => Castles::BLACK_SHORT,
        }
    }

    /// The queenside castling right of the given side.
    #[inline(always)]
    pub fn long(side: Color) -> Self {
        match side {
            Color::White => Castles::WHITE_LONG,
            Color::Black => Castles::BLACK_LONG,
        }
    }

    /// Whether the given side has kingside castling rights.
    #[inline(always)]
    pub fn has_short(&self, side: Color) -> bool {
        self.contains(Castles::short(side))
    }

    /// Whether the given side has queenside castling rights.
    #[inline(always)]
    pub fn has_long(&self, side: Color) -> bool {
        self.contains(Castles::long(side))
    }
}

impl Default for Castles {
    #[inline(always)]
    fn default() -> Self {
        Castles::all()
    }
}

/// The castling rights that depend on a piece standing on this [`Square`].
///
/// Moving from or capturing on one of these squares revokes them.
impl From<Square> for Castles {
    #[inline(always)]
    fn from(sq: Square) -> Self {
        match sq {
            Square::A1 => Castles::WHITE_LONG,
            Square::H1 => Castles::WHITE_SHORT,
            Square::E1 => Castles::WHITE_LONG | Castles::WHITE_SHORT,
            Square::A8 => Castles::BLACK_LONG,
            Square::H8 => Castles::BLACK_SHORT,
            Square::E8 => Castles::BLACK_LONG | Castles::BLACK_SHORT,
            _ => Castles::empty(),
        }
    }
}

impl fmt::Display for Castles {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return f.write_str("-");
        }

        for (right, c) in [
            (Castles::WHITE_SHORT, "K"),
            (Castles::WHITE_LONG, "Q"),
            (Castles::BLACK_SHORT, "k"),
            (Castles::BLACK_LONG, "q"),
        ] {
            if self.contains(right) {
                f.write_str(c)?;
            }
        }

        Ok(())
    }
}

/// The reason why parsing [`Castles`] failed.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error)]
#[display(fmt = "failed to parse castling rights")]
pub struct ParseCastlesError;

impl FromStr for Castles {
    type Err = ParseCastlesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "-" {
            return Ok(Castles::empty());
        }

        let mut castles = Castles::empty();

        for c in s.chars() {
            let right = match c {
                'K' => Castles::WHITE_SHORT,
                'Q' => Castles::WHITE_LONG,
                'k' => Castles::BLACK_SHORT,
                'q' => Castles::BLACK_LONG,
                _ => return Err(ParseCastlesError),
            };

            if castles.contains(right) {
                return Err(ParseCastlesError);
            }

            castles |= right;
        }

        match castles.is_empty() {
            true => Err(ParseCastlesError),
            false => Ok(castles),
        }
    }
}

#[cfg(test)]
impl proptest::arbitrary::Arbitrary for Castles {
    type Parameters = ();
    type Strategy = proptest::strategy::Map<std::ops::Range<u8>, fn(u8) -> Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        use proptest::strategy::Strategy;
        (0u8..16).prop_map(Castles::from_bits_truncate as fn(u8) -> Self)
    }
}
