mod helper;
mod format;

pub use helper::*;
pub use format::*;
