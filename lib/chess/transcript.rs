use crate::chess::San;
use std::fmt;

/// The move log of a game, as numbered pairs of white and black moves one per line.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Transcript<'a>(pub &'a [San]);

impl fmt::Display for Transcript<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, pair) in self.0.chunks(2).enumerate() {
            write!(f, "{}. {}", i + 1, pair[0])?;

            if let Some(black) = pair.get(1) {
                write!(f, " {black}")?;
            }

            writeln!(f)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn log(moves: &[&str]) -> Vec<San> {
        moves.iter().map(|s| s.parse().unwrap()).collect()
    }

    #[test]
    fn empty_log_has_empty_transcript() {
        assert_eq!(Transcript(&[]).to_string(), "");
    }

    #[test]
    fn moves_are_numbered_in_pairs() {
        let log = log(&["e4", "e5", "Nf3", "Nc6", "Bb5"]);
        assert_eq!(
            Transcript(&log).to_string(),
            "1. e4 e5\n2. Nf3 Nc6\n3. Bb5\n"
        );
    }
}
