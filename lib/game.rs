mod history;
mod mode;
mod observer;
mod session;

pub use history::*;
pub use mode::*;
pub use observer::*;
pub use session::*;
