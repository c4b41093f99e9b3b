mod det;

pub use det::*;
