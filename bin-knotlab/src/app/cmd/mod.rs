pub mod inv;
pub mod export;
pub mod identify;
