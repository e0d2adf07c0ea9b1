use crate::chess::{Move, Position, Promotion, Role, Special};
use derive_more::{Deref, Display, Error};
use std::{fmt::Write, str::FromStr};

/// A move in [standard algebraic notation].
///
/// [standard algebraic notation]: https://www.chessprogramming.org/Algebraic_Chess_Notation#Standard_Algebraic_Notation_.28SAN.29
#[derive(Debug, Display, Clone, Eq, PartialEq, Hash, Deref)]
#[deref(forward)]
pub struct San(String);

impl San {
    /// Wraps notation received from elsewhere as is, without checking it.
    pub fn verbatim(s: impl Into<String>) -> Self {
        San(s.into())
    }

    /// Describes a legal move about to be played in a position.
    pub fn new(pos: &Position, m: Move, promotion: Option<Promotion>) -> Self {
        let piece = pos.board()[m.whence()].expect("expected piece on the source square");
        let mut s = String::with_capacity(8);

        match m.special() {
            Some(Special::CastleShort) => s.push_str("O-O"),
            Some(Special::CastleLong) => s.push_str("O-O-O"),
            _ => {
                if piece.role() == Role::Pawn {
                    if m.is_capture() {
                        write!(s, "{}", m.whence().file()).ok();
                    }
                } else {
                    s.push(letter(piece.role()));

                    let rivals: Vec<_> = pos
                        .moves()
                        .filter(|n| n.whither() == m.whither() && n.whence() != m.whence())
                        .filter(|n| pos.board()[n.whence()] == Some(piece))
                        .map(|n| n.whence())
                        .collect();

                    if !rivals.is_empty() {
                        let (f, r) = (m.whence().file(), m.whence().rank());
                        if rivals.iter().all(|sq| sq.file() != f) {
                            write!(s, "{f}").ok();
                        } else if rivals.iter().all(|sq| sq.rank() != r) {
                            write!(s, "{r}").ok();
                        } else {
                            write!(s, "{f}{r}").ok();
                        }
                    }
                }

                if m.is_capture() {
                    s.push('x');
                }

                write!(s, "{}", m.whither()).ok();

                if m.is_promotion() {
                    s.push('=');
                    s.push(letter(promotion.unwrap_or_default().into()));
                }
            }
        }

        let mut next = *pos;
        next.play(m, promotion);

        if next.is_check() {
            match next.outcome() {
                Some(_) => s.push('#'),
                None => s.push('+'),
            }
        }

        San(s)
    }
}

fn letter(role: Role) -> char {
    match role {
        Role::Pawn => 'P',
        Role::Knight => 'N',
        Role::Bishop => 'B',
        Role::Rook => 'R',
        Role::Queen => 'Q',
        Role::King => 'K',
    }
}

/// The reason why parsing [`San`] failed.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error)]
#[display(fmt = "failed to parse move in standard algebraic notation")]
pub struct ParseSanError;

fn is_file(b: u8) -> bool {
    (b'a'..=b'h').contains(&b)
}

fn is_rank(b: u8) -> bool {
    (b'1'..=b'8').contains(&b)
}

impl FromStr for San {
    type Err = ParseSanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let body = s.strip_suffix(|c| c == '+' || c == '#').unwrap_or(s);

        if body == "O-O" || body == "O-O-O" {
            return Ok(San(s.into()));
        }

        let mut b = body.as_bytes();

        if let [rest @ .., b'=', p] = b {
            if !b"NBRQ".contains(p) {
                return Err(ParseSanError);
            }

            b = rest;
        }

        let [rest @ .., f, r] = b else {
            return Err(ParseSanError);
        };

        if !is_file(*f) || !is_rank(*r) {
            return Err(ParseSanError);
        }

        let rest = match rest {
            [p, rest @ ..] if b"NBRQK".contains(p) => rest,
            rest => rest,
        };

        let rest = rest.strip_suffix(b"x").unwrap_or(rest);

        let valid = match rest {
            [] => true,
            [a] => is_file(*a) || is_rank(*a),
            [a, b] => is_file(*a) && is_rank(*b),
            _ => false,
        };

        if valid {
            Ok(San(s.into()))
        } else {
            Err(ParseSanError)
        }
    }
}
