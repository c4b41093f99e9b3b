mod free_group;
mod wirtinger;
mod alexander;

pub use free_group::*;
pub use wirtinger::*;
pub use alexander::*;
