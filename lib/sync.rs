mod document;
mod id;
mod memory;
mod options;
mod replica;
mod room;
mod store;

pub use document::*;
pub use id::*;
pub use memory::*;
pub use options::*;
pub use replica::*;
pub use room::*;
pub use store::*;
