use crate::chess::{Coordinates, GameState, IllegalMove, Move, MoveRecord, Outcome, Promotion};
use crate::chess::Square;
use crate::game::{History, HistoryError, Mode, Observer};
use derive_more::{Display, Error, From};
use tracing::{debug, info, instrument};

/// The reason why a move was rejected by the [`Session`].
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Error, From)]
#[error(ignore)]
pub enum SessionError {
    #[display(fmt = "the game has already ended, {_0}")]
    GameHasEnded(Outcome),

    #[display(fmt = "it's not your turn")]
    #[from(ignore)]
    NotYourTurn,

    #[display(fmt = "{_0}")]
    IllegalMove(IllegalMove),

    #[display(fmt = "choose a piece to promote to")]
    #[from(ignore)]
    PromotionRequired,
}

/// A game in progress.
///
/// The session is the single owner of the [`GameState`], every change goes through it.
#[derive(Debug)]
pub struct Session<O = ()> {
    state: GameState,
    history: History,
    mode: Mode,
    observer: O,
}

impl Default for Session {
    fn default() -> Self {
        Session::new(Mode::default(), ())
    }
}

impl<O: Observer> Session<O> {
    /// Starts a new game.
    pub fn new(mode: Mode, observer: O) -> Self {
        Session {
            state: GameState::default(),
            history: History::default(),
            mode,
            observer,
        }
    }

    /// The current state of the game.
    #[inline(always)]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[inline(always)]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    #[inline(always)]
    pub fn history(&self) -> &History {
        &self.history
    }

    #[inline(always)]
    pub fn observer(&self) -> &O {
        &self.observer
    }

    #[inline(always)]
    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    /// Switches how the game is played.
    ///
    /// Joining a remote game forgets the local history.
    #[instrument(level = "debug", skip(self))]
    pub fn set_mode(&mut self, mode: Mode) {
        if mode.is_remote() {
            self.history.clear();
        }

        self.mode = mode;
    }

    /// Whether the local participant may move now.
    pub fn can_move(&self) -> bool {
        if self.state.outcome().is_some() {
            return false;
        }

        match self.mode {
            Mode::Local => true,
            Mode::Remote(seat) => seat.color() == Some(self.state.position().turn()),
        }
    }

    /// The moves the local participant may play with the piece on a square.
    pub fn moves_from(&self, whence: Square) -> impl Iterator<Item = Move> + '_ {
        self.can_move()
            .then(|| self.state.moves_from(whence))
            .into_iter()
            .flatten()
    }

    /// Plays a move.
    ///
    /// In local games, a promotion must be chosen explicitly,
    /// whereas in remote games it defaults to a queen.
    #[instrument(level = "debug", skip(self), err)]
    pub fn play(
        &mut self,
        m: Move,
        promotion: Option<Promotion>,
    ) -> Result<MoveRecord, SessionError> {
        if let Some(o) = self.state.outcome() {
            return Err(SessionError::GameHasEnded(o));
        }

        if let Mode::Remote(seat) = self.mode {
            if seat.color() != Some(self.state.position().turn()) {
                return Err(SessionError::NotYourTurn);
            }
        }

        if !self.state.position().is_legal(&m) {
            return Err(IllegalMove(Coordinates { promotion, ..Coordinates::from(m) }).into());
        }

        let promotion = match (m.is_promotion(), promotion, self.mode) {
            (true, None, Mode::Local) => return Err(SessionError::PromotionRequired),
            (true, None, Mode::Remote(_)) => Some(Promotion::Queen),
            (_, p, _) => p,
        };

        if !self.mode.is_remote() {
            self.history.push(self.state.clone());
        }

        let record = self.state.apply(m, promotion);

        match self.state.notation().last() {
            Some(san) => info!(%san, turn = %self.state.position().turn(), "move committed"),
            None => debug!(?record, "move committed"),
        }

        if let Some(o) = self.state.outcome() {
            info!(outcome = %o, "game over");
        }

        self.observer.on_commit(&self.state);
        Ok(record)
    }

    /// Plays a move requested in coordinate notation.
    #[instrument(level = "debug", skip(self, c), fields(%c), err)]
    pub fn make(&mut self, c: Coordinates) -> Result<MoveRecord, SessionError> {
        match self.state.position().find(&c) {
            Some(m) => self.play(m, c.promotion),
            None => match self.state.outcome() {
                Some(o) => Err(SessionError::GameHasEnded(o)),
                None => Err(IllegalMove(c).into()),
            },
        }
    }

    /// Starts over from the initial position.
    #[instrument(level = "debug", skip(self))]
    pub fn reset(&mut self) {
        self.state = GameState::default();
        self.history.clear();
        info!("new game");
        self.observer.on_commit(&self.state);
    }

    /// Replaces the whole state, as received from elsewhere.
    ///
    /// The observer is not notified, so that the state is not echoed back to where it came from.
    #[instrument(level = "debug", skip(self, state), fields(position = %state.position()))]
    pub fn replace(&mut self, state: GameState) {
        self.state = state;
        self.history.clear();
    }

    /// Takes back the last move.
    #[instrument(level = "debug", skip(self), err)]
    pub fn undo(&mut self) -> Result<(), HistoryError> {
        if self.mode.is_remote() {
            return Err(HistoryError::Disabled);
        }

        self.history.undo(&mut self.state)?;
        self.observer.on_commit(&self.state);
        Ok(())
    }

    /// Plays again the last move taken back.
    #[instrument(level = "debug", skip(self), err)]
    pub fn redo(&mut self) -> Result<(), HistoryError> {
        if self.mode.is_remote() {
            return Err(HistoryError::Disabled);
        }

        self.history.redo(&mut self.state)?;
        self.observer.on_commit(&self.state);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chess::{Castles, Color, Piece, Position};
    use crate::util::Integer;
    use crate::game::{MockObserver, Seat};
    use test_strategy::proptest;

    fn find(s: &Session<impl Observer>, whence: Square, whither: Square) -> Move {
        s.state()
            .position()
            .moves_from(whence)
            .find(|m| m.whither() == whither)
            .unwrap()
    }

    fn coords(s: &str) -> Coordinates {
        s.parse().unwrap()
    }

    fn promotion_ready(mode: Mode) -> Session {
        let board = "k7/6P1/8/8/8/8/8/K7".parse().unwrap();
        let pos = Position::try_new(board, Color::White, Castles::empty(), None).unwrap();
        let mut s = Session::new(mode, ());
        s.replace(GameState::new(pos, None, Vec::new()));
        s
    }

    #[test]
    fn opening_offers_twenty_moves() {
        let s = Session::default();
        let n: usize = Square::iter().map(|sq| s.moves_from(sq).count()).sum();
        assert_eq!(n, 20);
    }

    #[test]
    fn every_commit_notifies_the_observer_once() {
        let mut observer = MockObserver::new();
        observer.expect_on_commit().times(3).return_const(());

        let mut s = Session::new(Mode::Local, observer);
        s.make(coords("e2e4")).unwrap();
        s.make(coords("e7e5")).unwrap();
        s.reset();
    }

    #[test]
    fn rejected_moves_do_not_notify_the_observer() {
        let mut observer = MockObserver::new();
        observer.expect_on_commit().never();

        let mut s = Session::new(Mode::Local, observer);
        assert_eq!(
            s.make(coords("e2e5")),
            Err(SessionError::IllegalMove(IllegalMove(coords("e2e5"))))
        );
    }

    #[test]
    fn undo_then_redo_restores_the_state() {
        let mut s = Session::default();
        s.make(coords("e2e4")).unwrap();
        let after = s.state().clone();

        assert_eq!(s.undo(), Ok(()));
        assert_eq!(s.state(), &GameState::default());

        assert_eq!(s.redo(), Ok(()));
        assert_eq!(s.state(), &after);
    }

    #[test]
    fn undo_fails_without_history() {
        assert_eq!(Session::default().undo(), Err(HistoryError::Empty));
        assert_eq!(Session::default().redo(), Err(HistoryError::Empty));
    }

    #[test]
    fn new_move_clears_redo() {
        let mut s = Session::default();
        s.make(coords("e2e4")).unwrap();
        s.undo().unwrap();
        s.make(coords("d2d4")).unwrap();
        assert_eq!(s.redo(), Err(HistoryError::Empty));
    }

    #[proptest]
    fn history_is_disabled_in_remote_games(seat: Seat) {
        let mut s = Session::new(Mode::Remote(seat), ());
        assert_eq!(s.undo(), Err(HistoryError::Disabled));
        assert_eq!(s.redo(), Err(HistoryError::Disabled));
    }

    #[proptest]
    fn apply_then_undo_restores_the_state(
        #[filter(#state.outcome().is_none())] state: GameState,
        #[strategy(0usize..64)] n: usize,
    ) {
        let mut s = Session::default();
        s.replace(state.clone());

        let moves: Vec<_> = state.position().moves().collect();
        let m = moves[n % moves.len()];
        s.play(m, Some(Promotion::Knight))?;
        s.undo()?;
        assert_eq!(s.state(), &state);
    }

    #[test]
    fn local_promotion_requires_a_choice() {
        let mut s = promotion_ready(Mode::Local);
        let m = find(&s, Square::G7, Square::G8);
        assert_eq!(s.play(m, None), Err(SessionError::PromotionRequired));
        assert_eq!(s.play(m, Some(Promotion::Knight)).map(|r| r.piece), Ok(Piece::WhiteKnight));
    }

    #[test]
    fn remote_promotion_defaults_to_queen() {
        let mut s = promotion_ready(Mode::Remote(Seat::White));
        let m = find(&s, Square::G7, Square::G8);
        assert_eq!(s.play(m, None).map(|r| r.piece), Ok(Piece::WhiteQueen));
    }

    #[test]
    fn remote_players_may_only_move_in_their_turn() {
        let mut s = Session::new(Mode::Remote(Seat::Black), ());
        assert!(!s.can_move());
        assert_eq!(s.moves_from(Square::E2).count(), 0);

        let m = find(&s, Square::E2, Square::E4);
        assert_eq!(s.play(m, None), Err(SessionError::NotYourTurn));
    }

    #[test]
    fn spectators_may_never_move() {
        let s = Session::new(Mode::Remote(Seat::Spectator), ());
        assert!(!s.can_move());
    }

    #[test]
    fn no_moves_after_checkmate() {
        let mut s = Session::default();
        for m in ["e2e4", "e7e5", "f1c4", "b8c6", "d1h5", "g8f6", "h5f7"] {
            s.make(coords(m)).unwrap();
        }

        let o = Outcome::Checkmate(Color::White);
        assert_eq!(s.state().outcome(), Some(o));
        assert!(!s.can_move());
        assert_eq!(s.make(coords("e8e7")), Err(SessionError::GameHasEnded(o)));
    }

    #[test]
    fn replace_takes_the_state_whole_and_clears_history() {
        let mut observer = MockObserver::new();
        observer.expect_on_commit().times(1).return_const(());

        let mut s = Session::new(Mode::Local, observer);
        s.make(coords("e2e4")).unwrap();

        let mut other = Session::default();
        other.make(coords("d2d4")).unwrap();

        s.replace(other.state().clone());
        assert_eq!(s.state(), other.state());
        assert_eq!(s.undo(), Err(HistoryError::Empty));
    }

    #[test]
    fn joining_a_remote_game_forgets_history() {
        let mut s = Session::default();
        s.make(coords("e2e4")).unwrap();
        s.set_mode(Mode::Remote(Seat::Black));
        assert_eq!(s.history().undoable(), 0);
        assert!(s.can_move());
    }

    #[test]
    fn reset_starts_over() {
        let mut s = Session::default();
        s.make(coords("e2e4")).unwrap();
        s.reset();
        assert_eq!(s.state(), &GameState::default());
        assert_eq!(s.state().position(), &Position::default());
        assert_eq!(s.history().undoable(), 0);
    }
}
