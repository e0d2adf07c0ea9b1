/// Chess rules.
pub mod chess;
/// Game sessions and their history.
pub mod game;
/// Replication of games through shared rooms.
pub mod sync;
/// Assorted utilities.
pub mod util;
