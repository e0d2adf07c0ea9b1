use crate::chess::{attacks, movegen, Bitboard, Board, Castles, Color, Coordinates, File};
use crate::chess::{Move, MoveRecord, Outcome, Perspective, Piece, Promotion, Rank, Role};
use crate::chess::{ParseBoardError, ParseCastlesError, ParseSquareError, Special, Square};
use derive_more::{Display, Error, From};
use std::{fmt, str::FromStr};

/// The reason why a [`Position`] is impossible.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Error)]
pub enum IllegalPosition {
    #[display(fmt = "expected exactly one {_0} king")]
    KingCount(#[error(not(source))] Color),
    #[display(fmt = "unexpected pawn on back rank square `{_0}`")]
    PawnOnBackRank(#[error(not(source))] Square),
    #[display(fmt = "castling rights `{_0}` disagree with the placement of kings and rooks")]
    InconsistentCastles(#[error(not(source))] Castles),
    #[display(fmt = "`{_0}` is not a valid en passant square")]
    InvalidEnPassant(#[error(not(source))] Square),
    #[display(fmt = "the {_0} king is in check but it's not their turn")]
    OpponentInCheck(#[error(not(source))] Color),
}

/// The state of the chess board at a point in time.
///
/// Positions are cheap to copy, which is how moves are tried out before being committed.
#[derive(Copy, Clone, Eq, PartialEq, Hash)]
pub struct Position {
    board: Board,
    turn: Color,
    castles: Castles,
    en_passant: Option<Square>,
}

impl Default for Position {
    fn default() -> Self {
        Position {
            board: Board::default(),
            turn: Color::White,
            castles: Castles::all(),
            en_passant: None,
        }
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Position({self})")
    }
}

/// Prints the position in [FEN] notation, without move counters.
///
/// [FEN]: https://www.chessprogramming.org/Forsyth-Edwards_Notation
impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let turn = match self.turn {
            Color::White => 'w',
            Color::Black => 'b',
        };

        write!(f, "{} {} {} ", self.board.placement(), turn, self.castles)?;

        match self.en_passant {
            Some(sq) => write!(f, "{sq}"),
            None => f.write_str("-"),
        }
    }
}

/// The reason why parsing [`Position`] failed.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error, From)]
pub enum ParseFenError {
    #[display(fmt = "expected FEN with 4 or 6 fields")]
    #[from(ignore)]
    InvalidSyntax,
    #[display(fmt = "failed to parse piece placement")]
    InvalidPlacement(ParseBoardError),
    #[display(fmt = "failed to parse side to move")]
    #[from(ignore)]
    InvalidTurn,
    #[display(fmt = "failed to parse castling rights")]
    InvalidCastles(ParseCastlesError),
    #[display(fmt = "failed to parse en passant square")]
    InvalidEnPassant(ParseSquareError),
    #[display(fmt = "illegal position")]
    IllegalPosition(IllegalPosition),
}

/// Parses a position in [FEN] notation, move counters are accepted but ignored.
///
/// [FEN]: https://www.chessprogramming.org/Forsyth-Edwards_Notation
impl FromStr for Position {
    type Err = ParseFenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let fields: Vec<_> = s.split_whitespace().collect();

        let [placement, turn, castles, en_passant, ..] = fields[..] else {
            return Err(ParseFenError::InvalidSyntax);
        };

        if !matches!(fields.len(), 4 | 6) {
            return Err(ParseFenError::InvalidSyntax);
        }

        let turn = match turn {
            "w" => Color::White,
            "b" => Color::Black,
            _ => return Err(ParseFenError::InvalidTurn),
        };

        let en_passant = match en_passant {
            "-" => None,
            sq => Some(sq.parse()?),
        };

        Ok(Position::try_new(
            placement.parse()?,
            turn,
            castles.parse()?,
            en_passant,
        )?)
    }
}

impl Position {
    /// Sets up a position, provided it could arise in a game of chess.
    pub fn try_new(
        board: Board,
        turn: Color,
        castles: Castles,
        en_passant: Option<Square>,
    ) -> Result<Self, IllegalPosition> {
        for side in [Color::White, Color::Black] {
            let king = Piece::new(Role::King, side);
            if board.iter().filter(|&(_, p)| p == king).count() != 1 {
                return Err(IllegalPosition::KingCount(side));
            }
        }

        if let Some((sq, _)) = board.iter().find(|&(sq, p)| {
            p.role() == Role::Pawn && matches!(sq.rank(), Rank::First | Rank::Eighth)
        }) {
            return Err(IllegalPosition::PawnOnBackRank(sq));
        }

        for side in [Color::White, Color::Black] {
            let rank = Rank::First.perspective(side);
            let king = board[Square::new(File::E, rank)] == Some(Piece::new(Role::King, side));
            let rook = |f| board[Square::new(f, rank)] == Some(Piece::new(Role::Rook, side));

            if castles.has_short(side) && !(king && rook(File::H))
                || castles.has_long(side) && !(king && rook(File::A))
            {
                return Err(IllegalPosition::InconsistentCastles(castles));
            }
        }

        if let Some(ep) = en_passant {
            let valid = ep.rank() == Rank::Sixth.perspective(turn)
                && board[ep].is_none()
                && ep
                    .offset(0, turn.forward())
                    .map_or(false, |sq| board[sq].is_none())
                && ep
                    .offset(0, -turn.forward())
                    .map_or(false, |sq| board[sq] == Some(Piece::new(Role::Pawn, !turn)));

            if !valid {
                return Err(IllegalPosition::InvalidEnPassant(ep));
            }
        }

        let pos = Position {
            board,
            turn,
            castles,
            en_passant,
        };

        if pos.is_attacked(!turn) {
            return Err(IllegalPosition::OpponentInCheck(!turn));
        }

        Ok(pos)
    }

    /// The arrangement of pieces on the board.
    #[inline(always)]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The side to move.
    #[inline(always)]
    pub fn turn(&self) -> Color {
        self.turn
    }

    /// The castling rights still held by either side.
    #[inline(always)]
    pub fn castles(&self) -> Castles {
        self.castles
    }

    /// The square skipped by a pawn that advanced two squares on the previous ply, if any.
    #[inline(always)]
    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }

    /// The squares threatened by the given side.
    pub fn attacks(&self, side: Color) -> Bitboard {
        attacks::attacks(&self.board, side)
    }

    fn is_attacked(&self, side: Color) -> bool {
        match self.board.king(side) {
            Some(k) => self.attacks(!side).contains(k),
            None => false,
        }
    }

    /// Whether the king of the side to move is attacked.
    ///
    /// A side without a king is never in check.
    #[inline(always)]
    pub fn is_check(&self) -> bool {
        self.is_attacked(self.turn)
    }

    /// Whether the mover's king survives a pseudo-legal move.
    fn is_safe(&self, m: &Move) -> bool {
        if m.is_castle() {
            let threats = self.attacks(!self.turn);
            let step = (m.whither().file() - m.whence().file()).signum();
            let path = [Some(m.whence()), m.whence().offset(step, 0), Some(m.whither())];
            if path.into_iter().flatten().any(|sq| threats.contains(sq)) {
                return false;
            }
        }

        let mut next = *self;
        next.apply(*m, None);
        !next.is_attacked(self.turn)
    }

    /// Whether a move may be played in this position.
    pub fn is_legal(&self, m: &Move) -> bool {
        matches!(self.board[m.whence()], Some(p) if p.color() == self.turn)
            && movegen::pseudo_moves(self, m.whence()).contains(m)
            && self.is_safe(m)
    }

    /// The legal moves of the piece on a square.
    ///
    /// Yields nothing unless the piece belongs to the side to move.
    pub fn moves_from(&self, whence: Square) -> impl Iterator<Item = Move> + '_ {
        let moves = match self.board[whence] {
            Some(p) if p.color() == self.turn => movegen::pseudo_moves(self, whence),
            _ => Default::default(),
        };

        moves.into_iter().filter(move |m| self.is_safe(m))
    }

    /// All legal moves of the side to move.
    pub fn moves(&self) -> impl Iterator<Item = Move> + '_ {
        self.board
            .by_color(self.turn)
            .flat_map(move |(sq, _)| self.moves_from(sq))
    }

    /// The legal move designated by a pair of squares, if any.
    pub fn find(&self, c: &Coordinates) -> Option<Move> {
        self.moves_from(c.whence).find(|m| c.matches(m))
    }

    /// The [`Outcome`] of the game if it has ended.
    pub fn outcome(&self) -> Option<Outcome> {
        if self.moves().next().is_some() {
            None
        } else if self.is_check() {
            Some(Outcome::Checkmate(!self.turn))
        } else {
            Some(Outcome::Stalemate)
        }
    }

    /// Plays a legal move, promoting to a queen unless another [`Promotion`] is given.
    ///
    /// The promotion is ignored for moves other than promotions.
    pub fn play(&mut self, m: Move, promotion: Option<Promotion>) -> MoveRecord {
        debug_assert!(self.is_legal(&m), "move `{m}` is illegal in `{self}`");
        self.apply(m, promotion)
    }

    fn apply(&mut self, m: Move, promotion: Option<Promotion>) -> MoveRecord {
        let (whence, whither) = (m.whence(), m.whither());
        let rank = whence.rank();

        let mut piece = self
            .board
            .take(whence)
            .expect("expected piece on the source square");

        let mut captured = self.board.take(whither);

        match m.special() {
            Some(Special::CastleShort) => {
                let rook = self.board.take(Square::new(File::H, rank));
                self.board.set(Square::new(File::F, rank), rook);
            }

            Some(Special::CastleLong) => {
                let rook = self.board.take(Square::new(File::A, rank));
                self.board.set(Square::new(File::D, rank), rook);
            }

            Some(Special::EnPassant) => {
                captured = self.board.take(Square::new(whither.file(), rank));
            }

            Some(Special::Promotion) => {
                let role = promotion.unwrap_or_default().into();
                piece = Piece::new(role, piece.color());
            }

            None => {}
        }

        self.board.set(whither, Some(piece));
        self.castles -= Castles::from(whence) | Castles::from(whither);

        self.en_passant = match piece.role() {
            Role::Pawn if (whither.rank() - rank).abs() == 2 => whence.offset(0, self.turn.forward()),
            _ => None,
        };

        self.turn = !self.turn;

        MoveRecord {
            whence,
            whither,
            piece,
            captured,
            special: m.special(),
        }
    }
}

#[cfg(test)]
use proptest::{prelude::*, sample::{Selector, SelectorStrategy}};

#[cfg(test)]
impl Arbitrary for Position {
    type Parameters = ();
    type Strategy = proptest::strategy::Map<
        (std::ops::Range<usize>, SelectorStrategy),
        fn((usize, Selector)) -> Position,
    >;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (0..160usize, any::<Selector>()).prop_map(|(plies, selector)| {
            let mut pos = Position::default();

            for _ in 0..plies {
                match selector.try_select(pos.moves()) {
                    None => break,
                    Some(m) => {
                        pos.play(m, Some(selector.select(Promotion::ALL)));
                    }
                }
            }

            pos
        })
    }
}
