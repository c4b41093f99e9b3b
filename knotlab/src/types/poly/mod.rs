mod poly;
mod laurent;
mod mdeg;
mod mlaurent;

pub use poly::*;
pub use laurent::*;
pub use mdeg::*;
pub use mlaurent::*;
