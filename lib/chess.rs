/// Attack sets.
pub mod attacks;
/// Pseudo-legal move generation.
pub mod movegen;

mod bitboard;
mod board;
mod castles;
mod color;
mod file;
mod r#move;
mod outcome;
mod perspective;
mod piece;
mod position;
mod promotion;
mod rank;
mod record;
mod role;
mod san;
mod square;
mod state;
mod transcript;

pub use bitboard::*;
pub use board::*;
pub use castles::*;
pub use color::*;
pub use file::*;
pub use outcome::*;
pub use perspective::*;
pub use piece::*;
pub use position::*;
pub use promotion::*;
pub use r#move::*;
pub use rank::*;
pub use record::*;
pub use role::*;
pub use san::*;
pub use square::*;
pub use state::*;
pub use transcript::*;
