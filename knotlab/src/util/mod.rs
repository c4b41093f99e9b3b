pub mod log;
pub mod format;
