mod tangle;
mod tl;
mod atl;
mod bracket;

pub use tangle::*;
pub use tl::*;
pub use atl::*;
pub use bracket::*;
