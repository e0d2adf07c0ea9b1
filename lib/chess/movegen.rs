use crate::chess::{Bitboard, Board, Color, File, Move, Perspective, Piece, Position};
use crate::chess::{Rank, Role, Special, Square};
use arrayvec::ArrayVec;

const KNIGHT: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

const KING: [(i8, i8); 8] = [
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];

const DIAGONAL: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, -1), (-1, 1)];
const ORTHOGONAL: [(i8, i8); 4] = [(0, 1), (1, 0), (0, -1), (-1, 0)];

/// The most moves a single piece can ever have.
pub const MAX_MOVES: usize = 32;

fn leaps(board: &Board, whence: Square, side: Color, offsets: &[(i8, i8)]) -> Bitboard {
    offsets
        .iter()
        .filter_map(|&(df, dr)| whence.offset(df, dr))
        .filter(|&sq| board[sq].map_or(true, |p| p.color() != side))
        .collect()
}

fn slides(board: &Board, whence: Square, side: Color, directions: &[(i8, i8)]) -> Bitboard {
    let mut bb = Bitboard::empty();

    for &(df, dr) in directions {
        let mut sq = whence;
        while let Some(next) = sq.offset(df, dr) {
            match board[next] {
                None => bb = bb.with(next),
                Some(p) => {
                    if p.color() != side {
                        bb = bb.with(next);
                    }

                    break;
                }
            }

            sq = next;
        }
    }

    bb
}

/// The squares a pawn of the given color attacks from a square.
///
/// Both forward diagonals are attacked whether occupied or not.
pub fn pawn_attacks(whence: Square, side: Color) -> Bitboard {
    [-1, 1]
        .into_iter()
        .filter_map(|df| whence.offset(df, side.forward()))
        .collect()
}

/// The squares a piece threatens from a square.
///
/// Except for pawns, these are exactly the destinations of its ordinary moves.
pub fn threats(board: &Board, whence: Square, piece: Piece) -> Bitboard {
    let side = piece.color();

    match piece.role() {
        Role::Pawn => pawn_attacks(whence, side),
        Role::Knight => leaps(board, whence, side, &KNIGHT),
        Role::Bishop => slides(board, whence, side, &DIAGONAL),
        Role::Rook => slides(board, whence, side, &ORTHOGONAL),
        Role::Queen => {
            slides(board, whence, side, &DIAGONAL) | slides(board, whence, side, &ORTHOGONAL)
        }
        Role::King => leaps(board, whence, side, &KING),
    }
}

fn pawn_moves(pos: &Position, whence: Square, side: Color, moves: &mut ArrayVec<Move, MAX_MOVES>) {
    let board = pos.board();
    let last = Rank::Eighth.perspective(side);
    let start = Rank::Second.perspective(side);
    let promotion = |sq: Square| (sq.rank() == last).then_some(Special::Promotion);

    if let Some(one) = whence.offset(0, side.forward()).filter(|&sq| board[sq].is_none()) {
        moves.push(Move::new(whence, one, false, promotion(one)));

        if whence.rank() == start {
            if let Some(two) = one.offset(0, side.forward()).filter(|&sq| board[sq].is_none()) {
                moves.push(Move::new(whence, two, false, None));
            }
        }
    }

    for whither in pawn_attacks(whence, side) {
        match board[whither] {
            Some(p) if p.color() != side => {
                moves.push(Move::new(whence, whither, true, promotion(whither)));
            }

            None if pos.en_passant() == Some(whither) && pos.turn() == side => {
                moves.push(Move::new(whence, whither, true, Some(Special::EnPassant)));
            }

            _ => {}
        }
    }
}

fn castles(pos: &Position, whence: Square, side: Color, moves: &mut ArrayVec<Move, MAX_MOVES>) {
    let board = pos.board();
    let rank = Rank::First.perspective(side);

    if whence != Square::new(File::E, rank) {
        return;
    }

    let rook = Some(Piece::new(Role::Rook, side));
    let vacant = |files: &[File]| files.iter().all(|&f| board[Square::new(f, rank)].is_none());

    if pos.castles().has_short(side)
        && board[Square::new(File::H, rank)] == rook
        && vacant(&[File::F, File::G])
    {
        let whither = Square::new(File::G, rank);
        moves.push(Move::new(whence, whither, false, Some(Special::CastleShort)));
    }

    if pos.castles().has_long(side)
        && board[Square::new(File::A, rank)] == rook
        && vacant(&[File::B, File::C, File::D])
    {
        let whither = Square::new(File::C, rank);
        moves.push(Move::new(whence, whither, false, Some(Special::CastleLong)));
    }
}

/// The moves the piece on a square could make, ignoring whether its own king is left in check.
///
/// An empty square yields nothing.
pub fn pseudo_moves(pos: &Position, whence: Square) -> ArrayVec<Move, MAX_MOVES> {
    let mut moves = ArrayVec::new();

    let Some(piece) = pos.board()[whence] else {
        return moves;
    };

    let side = piece.color();

    match piece.role() {
        Role::Pawn => pawn_moves(pos, whence, side, &mut moves),
        role => {
            for whither in threats(pos.board(), whence, piece) {
                let capture = pos.board()[whither].is_some();
                moves.push(Move::new(whence, whither, capture, None));
            }

            if role == Role::King {
                castles(pos, whence, side, &mut moves);
            }
        }
    }

    moves
}
