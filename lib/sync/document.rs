use crate::chess::{Board, Castles, Color, GameState, IllegalPosition, MoveRecord};
use crate::chess::{Position, San, Special, Square};
use derive_more::{Display, Error, From};
use serde::{Deserialize, Serialize};

/// A square as a pair of grid coordinates, where row `0` is the eighth rank.
#[derive(Debug, Display, Copy, Clone, Eq, PartialEq, Hash, Deserialize, Serialize)]
#[display(fmt = "({r}, {c})")]
pub struct Coord {
    pub r: usize,
    pub c: usize,
}

impl From<Square> for Coord {
    fn from(sq: Square) -> Self {
        Coord {
            r: sq.row(),
            c: sq.col(),
        }
    }
}

impl TryFrom<Coord> for Square {
    type Error = InvalidDocument;

    fn try_from(coord: Coord) -> Result<Self, Self::Error> {
        Square::from_coords(coord.r, coord.c).ok_or(InvalidDocument::OffBoard(coord))
    }
}

/// The castling rights as independent flags, `K` and `Q` for white, `k` and `q` for black.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Deserialize, Serialize)]
pub struct CastleRights {
    #[serde(rename = "K")]
    pub white_short: bool,
    #[serde(rename = "Q")]
    pub white_long: bool,
    #[serde(rename = "k")]
    pub black_short: bool,
    #[serde(rename = "q")]
    pub black_long: bool,
}

impl Default for CastleRights {
    fn default() -> Self {
        Castles::all().into()
    }
}

impl From<Castles> for CastleRights {
    fn from(c: Castles) -> Self {
        CastleRights {
            white_short: c.contains(Castles::WHITE_SHORT),
            white_long: c.contains(Castles::WHITE_LONG),
            black_short: c.contains(Castles::BLACK_SHORT),
            black_long: c.contains(Castles::BLACK_LONG),
        }
    }
}

impl From<CastleRights> for Castles {
    fn from(r: CastleRights) -> Self {
        let mut c = Castles::empty();
        c.set(Castles::WHITE_SHORT, r.white_short);
        c.set(Castles::WHITE_LONG, r.white_long);
        c.set(Castles::BLACK_SHORT, r.black_short);
        c.set(Castles::BLACK_LONG, r.black_long);
        c
    }
}

/// What the last move did, as needed to highlight it.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LastMove {
    pub from: Coord,
    pub to: Coord,
    /// The letter of the piece that landed.
    pub piece: String,
    /// The letter of the captured piece, empty if none.
    #[serde(default)]
    pub captured: String,
    #[serde(default)]
    pub promo: bool,
    /// One of `K`, `Q`, `k` or `q` if the move was a castle.
    #[serde(default)]
    pub castle: Option<String>,
    #[serde(default)]
    pub en_passant: bool,
}

impl From<&MoveRecord> for LastMove {
    fn from(r: &MoveRecord) -> Self {
        let castle = match (r.special, r.piece.color()) {
            (Some(Special::CastleShort), Color::White) => Some("K"),
            (Some(Special::CastleLong), Color::White) => Some("Q"),
            (Some(Special::CastleShort), Color::Black) => Some("k"),
            (Some(Special::CastleLong), Color::Black) => Some("q"),
            _ => None,
        };

        LastMove {
            from: r.whence.into(),
            to: r.whither.into(),
            piece: r.piece.to_string(),
            captured: r.captured.map(|p| p.to_string()).unwrap_or_default(),
            promo: r.is_promotion(),
            castle: castle.map(String::from),
            en_passant: r.is_en_passant(),
        }
    }
}

impl TryFrom<LastMove> for MoveRecord {
    type Error = InvalidDocument;

    fn try_from(m: LastMove) -> Result<Self, Self::Error> {
        let piece = m.piece.parse().map_err(|_| InvalidDocument::Piece(m.piece))?;

        let captured = match m.captured.as_str() {
            "" => None,
            p => Some(p.parse().map_err(|_| InvalidDocument::Piece(m.captured))?),
        };

        let special = match m.castle.as_deref() {
            Some("K" | "k") => Some(Special::CastleShort),
            Some("Q" | "q") => Some(Special::CastleLong),
            Some(c) => return Err(InvalidDocument::Castle(c.into())),
            None if m.en_passant => Some(Special::EnPassant),
            None if m.promo => Some(Special::Promotion),
            None => None,
        };

        Ok(MoveRecord {
            whence: m.from.try_into()?,
            whither: m.to.try_into()?,
            piece,
            captured,
            special,
        })
    }
}

fn white_to_move() -> bool {
    true
}

/// The game state as it is replicated.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StateDocument {
    /// The board as 8 rows of piece letters, empty strings for empty squares.
    #[serde(rename = "S")]
    pub squares: [[String; 8]; 8],
    #[serde(default = "white_to_move")]
    pub white_to_move: bool,
    #[serde(default)]
    pub last_move: Option<LastMove>,
    #[serde(default)]
    pub moves_notation: Vec<String>,
    #[serde(default)]
    pub castle_rights: CastleRights,
    #[serde(default)]
    pub ep_target: Option<Coord>,
}

/// The reason why a [`StateDocument`] does not describe a valid [`GameState`].
#[derive(Debug, Display, Clone, Eq, PartialEq, Error, From)]
pub enum InvalidDocument {
    #[display(fmt = "`{_0}` is not a piece")]
    #[from(ignore)]
    Piece(#[error(not(source))] String),
    #[display(fmt = "square {_0} is off the board")]
    #[from(ignore)]
    OffBoard(#[error(not(source))] Coord),
    #[display(fmt = "`{_0}` is not a castling side")]
    #[from(ignore)]
    Castle(#[error(not(source))] String),
    #[display(fmt = "illegal position")]
    Position(IllegalPosition),
}

impl From<&GameState> for StateDocument {
    fn from(state: &GameState) -> Self {
        let pos = state.position();
        let mut squares: [[String; 8]; 8] = Default::default();

        for (sq, p) in pos.board().iter() {
            squares[sq.row()][sq.col()] = p.to_string();
        }

        StateDocument {
            squares,
            white_to_move: pos.turn() == Color::White,
            last_move: state.last_move().map(LastMove::from),
            moves_notation: state.notation().iter().map(|s| s.to_string()).collect(),
            castle_rights: pos.castles().into(),
            ep_target: pos.en_passant().map(Coord::from),
        }
    }
}

/// Validates the document, so that it is either taken whole or discarded whole.
impl TryFrom<StateDocument> for GameState {
    type Error = InvalidDocument;

    fn try_from(doc: StateDocument) -> Result<Self, Self::Error> {
        let mut board = Board::empty();

        for (r, row) in doc.squares.into_iter().enumerate() {
            for (c, p) in row.into_iter().enumerate() {
                if !p.is_empty() {
                    let sq = Square::try_from(Coord { r, c })?;
                    let piece = p.parse().map_err(|_| InvalidDocument::Piece(p))?;
                    board.set(sq, Some(piece));
                }
            }
        }

        let turn = match doc.white_to_move {
            true => Color::White,
            false => Color::Black,
        };

        let en_passant = doc.ep_target.map(Square::try_from).transpose()?;
        let pos = Position::try_new(board, turn, doc.castle_rights.into(), en_passant)?;

        // Notation is display only and taken as is.
        let notation = doc.moves_notation.into_iter().map(San::verbatim).collect();

        let last_move = doc.last_move.map(MoveRecord::try_from).transpose()?;

        Ok(GameState::new(pos, last_move, notation))
    }
}
