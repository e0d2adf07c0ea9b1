use crate::chess::{Coordinates, Move, MoveRecord, Outcome, Position, Promotion, San, Square};
use crate::chess::Transcript;
use derive_more::{Display, Error};

/// Represents an illegal move request in a given [`GameState`].
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Error)]
#[display(fmt = "move `{_0}` is illegal in this position")]
pub struct IllegalMove(#[error(not(source))] pub Coordinates);

/// The complete state of a game: the current [`Position`], the last move and the move log.
#[derive(Debug, Default, Clone, Eq, PartialEq, Hash)]
pub struct GameState {
    position: Position,
    last_move: Option<MoveRecord>,
    notation: Vec<San>,
}

impl GameState {
    /// Assembles a state out of its parts.
    pub fn new(position: Position, last_move: Option<MoveRecord>, notation: Vec<San>) -> Self {
        GameState {
            position,
            last_move,
            notation,
        }
    }

    /// The current position.
    #[inline(always)]
    pub fn position(&self) -> &Position {
        &self.position
    }

    /// What the last committed move did, if any.
    #[inline(always)]
    pub fn last_move(&self) -> Option<&MoveRecord> {
        self.last_move.as_ref()
    }

    /// The notation of every move played so far.
    #[inline(always)]
    pub fn notation(&self) -> &[San] {
        &self.notation
    }

    #[inline(always)]
    pub fn transcript(&self) -> Transcript<'_> {
        Transcript(&self.notation)
    }

    /// The legal moves of the piece on a square.
    pub fn moves_from(&self, whence: Square) -> impl Iterator<Item = Move> + '_ {
        self.position.moves_from(whence)
    }

    /// The [`Outcome`] of the game if it has ended.
    pub fn outcome(&self) -> Option<Outcome> {
        self.position.outcome()
    }

    fn commit(&mut self, m: Move, promotion: Option<Promotion>) -> (MoveRecord, San) {
        let san = San::new(&self.position, m, promotion);
        let record = self.position.play(m, promotion);
        self.notation.push(san.clone());
        self.last_move = Some(record);
        (record, san)
    }

    /// Commits a legal move, recording its notation.
    pub fn apply(&mut self, m: Move, promotion: Option<Promotion>) -> MoveRecord {
        self.commit(m, promotion).0
    }

    /// Commits a move requested in coordinate notation, if legal.
    pub fn make(&mut self, c: Coordinates) -> Result<San, IllegalMove> {
        let m = self.position.find(&c).ok_or(IllegalMove(c))?;
        Ok(self.commit(m, c.promotion).1)
    }
}

#[cfg(test)]
use proptest::{prelude::*, sample::{Selector, SelectorStrategy}};

#[cfg(test)]
impl Arbitrary for GameState {
    type Parameters = ();
    type Strategy = proptest::strategy::Map<
        (std::ops::Range<usize>, SelectorStrategy),
        fn((usize, Selector)) -> GameState,
    >;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (0..80usize, any::<Selector>()).prop_map(|(plies, selector)| {
            let mut state = GameState::default();

            for _ in 0..plies {
                match selector.try_select(state.position().moves()) {
                    None => break,
                    Some(m) => {
                        state.apply(m, Some(selector.select(Promotion::ALL)));
                    }
                }
            }

            state
        })
    }
}
