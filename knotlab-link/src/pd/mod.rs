mod entity;
mod pd;
mod parse;
mod export;
mod transform;

pub use entity::*;
pub use pd::*;
pub use parse::*;
pub use export::*;
pub use transform::*;
