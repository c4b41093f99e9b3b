mod sign;
mod union_find;

pub use sign::*;
pub use union_find::*;
