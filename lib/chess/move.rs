use crate::chess::{ParsePromotionError, ParseSquareError, Promotion, Square};
use derive_more::{Display, Error, From};
use std::{fmt, str::FromStr};

/// The rule a [`Move`] follows besides ordinary piece movement.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Special {
    #[display(fmt = "O-O")]
    CastleShort,
    #[display(fmt = "O-O-O")]
    CastleLong,
    #[display(fmt = "e.p.")]
    EnPassant,
    #[display(fmt = "promotion")]
    Promotion,
}

/// A chess move.
///
/// A move is a pure description, see [`Position::play`][`crate::chess::Position::play`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Move {
    whence: Square,
    whither: Square,
    capture: bool,
    special: Option<Special>,
}

impl Move {
    #[inline(always)]
    pub(crate) fn new(
        whence: Square,
        whither: Square,
        capture: bool,
        special: Option<Special>,
    ) -> Self {
        Move {
            whence,
            whither,
            capture,
            special,
        }
    }

    /// The source [`Square`].
    #[inline(always)]
    pub fn whence(&self) -> Square {
        self.whence
    }

    /// The destination [`Square`].
    #[inline(always)]
    pub fn whither(&self) -> Square {
        self.whither
    }

    /// Whether this move captures a piece.
    #[inline(always)]
    pub fn is_capture(&self) -> bool {
        self.capture
    }

    /// The special rule this move follows, if any.
    #[inline(always)]
    pub fn special(&self) -> Option<Special> {
        self.special
    }

    /// Whether this move is a castle.
    #[inline(always)]
    pub fn is_castle(&self) -> bool {
        matches!(
            self.special,
            Some(Special::CastleShort | Special::CastleLong)
        )
    }

    /// Whether this move is an en passant capture.
    #[inline(always)]
    pub fn is_en_passant(&self) -> bool {
        self.special == Some(Special::EnPassant)
    }

    /// Whether this move requires a [`Promotion`] choice.
    #[inline(always)]
    pub fn is_promotion(&self) -> bool {
        self.special == Some(Special::Promotion)
    }
}

/// Prints the move in pure coordinate notation.
impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.whence, self.whither)
    }
}

/// A move request in pure coordinate notation, e.g. `e2e4` or `e7e8n`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub struct Coordinates {
    pub whence: Square,
    pub whither: Square,
    pub promotion: Option<Promotion>,
}

impl Coordinates {
    /// Whether this request designates the given [`Move`].
    #[inline(always)]
    pub fn matches(&self, m: &Move) -> bool {
        self.whence == m.whence() && self.whither == m.whither()
    }
}

impl From<Move> for Coordinates {
    fn from(m: Move) -> Self {
        Coordinates {
            whence: m.whence(),
            whither: m.whither(),
            promotion: None,
        }
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.whence, self.whither)?;

        if let Some(p) = self.promotion {
            fmt::Display::fmt(&p, f)?;
        }

        Ok(())
    }
}

/// The reason why parsing [`Coordinates`] failed.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error, From)]
pub enum ParseCoordinatesError {
    #[display(fmt = "failed to parse move, expected `<square><square>[<promotion>]`")]
    #[from(ignore)]
    InvalidSyntax,
    #[display(fmt = "failed to parse move")]
    InvalidSquare(ParseSquareError),
    #[display(fmt = "failed to parse move")]
    InvalidPromotion(ParsePromotionError),
}

impl FromStr for Coordinates {
    type Err = ParseCoordinatesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if !s.is_ascii() || !(4..=5).contains(&s.len()) {
            return Err(ParseCoordinatesError::InvalidSyntax);
        }

        Ok(Coordinates {
            whence: s[..2].parse()?,
            whither: s[2..4].parse()?,
            promotion: match &s[4..] {
                "" => None,
                p => Some(p.parse()?),
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_strategy::proptest;

    #[proptest]
    fn move_is_printed_in_pure_coordinate_notation(
        a: Square,
        b: Square,
        capture: bool,
    ) {
        assert_eq!(Move::new(a, b, capture, None).to_string(), format!("{a}{b}"));
    }

    #[proptest]
    fn only_castles_are_castles(a: Square, b: Square) {
        assert!(Move::new(a, b, false, Some(Special::CastleShort)).is_castle());
        assert!(Move::new(a, b, false, Some(Special::CastleLong)).is_castle());
        assert!(!Move::new(a, b, true, Some(Special::EnPassant)).is_castle());
        assert!(!Move::new(a, b, false, None).is_castle());
    }

    #[proptest]
    fn coordinates_match_moves_with_same_squares(a: Square, b: Square, capture: bool) {
        let m = Move::new(a, b, capture, None);
        assert!(Coordinates::from(m).matches(&m));
    }

    #[proptest]
    fn parsing_printed_coordinates_is_an_identity(c: Coordinates) {
        assert_eq!(c.to_string().parse(), Ok(c));
    }

    #[proptest]
    fn parsing_coordinates_fails_if_length_is_wrong(
        #[filter(!(4..=5).contains(&#s.len()))] s: String,
    ) {
        assert_eq!(s.parse::<Coordinates>().ok(), None);
    }

    #[proptest]
    fn parsing_coordinates_fails_for_invalid_promotion(
        a: Square,
        b: Square,
        #[filter(!"nbrq".contains(#c))]
        #[strategy(proptest::char::range('a', 'z'))]
        c: char,
    ) {
        assert_eq!(
            format!("{a}{b}{c}").parse::<Coordinates>(),
            Err(ParseCoordinatesError::InvalidPromotion(ParsePromotionError))
        );
    }
}
