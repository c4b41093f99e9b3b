mod abst;
mod types;
mod misc;
mod matrix;

pub use abst::*;
pub use types::*;
pub use misc::*;
pub use matrix::*;

pub mod algo;
pub mod util;
