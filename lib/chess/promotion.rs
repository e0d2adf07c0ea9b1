use crate::chess::Role;
use derive_more::{Display, Error};
use std::str::FromStr;

/// The [`Role`] a pawn is promoted to upon reaching the farthest rank.
#[derive(Debug, Display, Default, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(test, derive(test_strategy::Arbitrary))]
pub enum Promotion {
    #[display(fmt = "n")]
    Knight,
    #[display(fmt = "b")]
    Bishop,
    #[display(fmt = "r")]
    Rook,
    #[default]
    #[display(fmt = "q")]
    Queen,
}

impl Promotion {
    /// Every possible promotion.
    pub const ALL: [Promotion; 4] = [
        Promotion::Knight,
        Promotion::Bishop,
        Promotion::Rook,
        Promotion::Queen,
    ];
}

impl From<Promotion> for Role {
    #[inline(always)]
    fn from(p: Promotion) -> Self {
        match p {
            Promotion::Knight => Role::Knight,
            Promotion::Bishop => Role::Bishop,
            Promotion::Rook => Role::Rook,
            Promotion::Queen => Role::Queen,
        }
    }
}

/// The reason why parsing [`Promotion`] failed.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error)]
#[display(fmt = "failed to parse promotion, expected one of `[nbrq]`")]
pub struct ParsePromotionError;

impl FromStr for Promotion {
    type Err = ParsePromotionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "n" => Ok(Promotion::Knight),
            "b" => Ok(Promotion::Bishop),
            "r" => Ok(Promotion::Rook),
            "q" => Ok(Promotion::Queen),
            _ => Err(ParsePromotionError),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_strategy::proptest;

    #[test]
    fn promotion_defaults_to_queen() {
        assert_eq!(Promotion::default(), Promotion::Queen);
    }

    #[proptest]
    fn parsing_printed_promotion_is_an_identity(p: Promotion) {
        assert_eq!(p.to_string().parse(), Ok(p));
    }

    #[proptest]
    fn promotion_is_never_to_pawn_or_king(p: Promotion) {
        assert_ne!(Role::from(p), Role::Pawn);
        assert_ne!(Role::from(p), Role::King);
    }

    #[proptest]
    fn parsing_promotion_fails_except_for_one_of_four_letters(#[strategy("[^nbrq]*")] s: String) {
        assert_eq!(s.parse::<Promotion>(), Err(ParsePromotionError));
    }
}
