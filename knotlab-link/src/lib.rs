mod pd;
mod alg;
mod group;
mod graph;

pub use pd::*;
pub use alg::*;
pub use group::*;
pub use graph::*;

pub mod seifert;
