use derive_more::{Display, Error};
use rand::Rng;
use std::{fmt, str::FromStr};

/// The unique code of a [`Room`][`crate::sync::Room`].
///
/// Codes are made of 6 uppercase letters, excluding `I` and `O` which are easily confused.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct RoomId([u8; RoomId::LEN]);

impl RoomId {
    /// The number of letters in a code.
    pub const LEN: usize = 6;

    /// The letters codes are made of.
    pub const ALPHABET: &'static [u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ";

    /// Generates a code with the given source of randomness.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut code = [0; RoomId::LEN];
        for c in &mut code {
            *c = RoomId::ALPHABET[rng.gen_range(0..RoomId::ALPHABET.len())];
        }

        RoomId(code)
    }

    /// Generates a random code.
    pub fn random() -> Self {
        Self::generate(&mut rand::thread_rng())
    }

    #[inline(always)]
    pub fn as_str(&self) -> &str {
        // Only ever holds ASCII letters.
        std::str::from_utf8(&self.0).unwrap_or_default()
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The reason why parsing [`RoomId`] failed.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error)]
pub enum ParseRoomIdError {
    #[display(fmt = "expected a code of {} letters", RoomId::LEN)]
    InvalidLength,
    #[display(fmt = "unexpected character in room code")]
    InvalidCharacter,
}

/// Parses a code regardless of case and surrounding whitespace.
impl FromStr for RoomId {
    type Err = ParseRoomIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();

        if s.chars().count() != RoomId::LEN {
            return Err(ParseRoomIdError::InvalidLength);
        }

        let mut code = [0; RoomId::LEN];
        for (c, b) in code.iter_mut().zip(s.bytes()) {
            let b = b.to_ascii_uppercase();
            if !RoomId::ALPHABET.contains(&b) {
                return Err(ParseRoomIdError::InvalidCharacter);
            }

            *c = b;
        }

        Ok(RoomId(code))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};
    use test_strategy::proptest;

    #[proptest]
    fn generated_codes_use_the_alphabet(seed: u64) {
        let id = RoomId::generate(&mut StdRng::seed_from_u64(seed));
        assert_eq!(id.as_str().len(), RoomId::LEN);
        assert!(id.as_str().bytes().all(|b| RoomId::ALPHABET.contains(&b)));
    }

    #[proptest]
    fn parsing_printed_code_is_an_identity(seed: u64) {
        let id = RoomId::generate(&mut StdRng::seed_from_u64(seed));
        assert_eq!(id.to_string().parse(), Ok(id));
    }

    #[proptest]
    fn parsing_code_ignores_case(seed: u64) {
        let id = RoomId::generate(&mut StdRng::seed_from_u64(seed));
        assert_eq!(format!("  {}\n", id.as_str().to_lowercase()).parse(), Ok(id));
    }

    #[proptest]
    fn parsing_code_fails_if_length_is_wrong(#[filter(#s.trim().chars().count() != 6)] s: String) {
        assert_eq!(s.parse::<RoomId>(), Err(ParseRoomIdError::InvalidLength));
    }

    #[test]
    fn parsing_code_fails_for_confusable_letters() {
        assert_eq!("ABCDEO".parse::<RoomId>(), Err(ParseRoomIdError::InvalidCharacter));
        assert_eq!("ABCDEI".parse::<RoomId>(), Err(ParseRoomIdError::InvalidCharacter));
        assert_eq!("ABC1EF".parse::<RoomId>(), Err(ParseRoomIdError::InvalidCharacter));
    }

    #[test]
    fn parsing_code_fails_for_non_ascii() {
        assert_eq!("ABCDEÉ".parse::<RoomId>(), Err(ParseRoomIdError::InvalidCharacter));
    }
}
