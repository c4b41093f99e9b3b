use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvariantError {
    #[error("computation cancelled.")]
    Cancelled,

    #[error("unsupported: {0}")]
    Unsupported(String),

    #[error("unknown invariant: {0}")]
    UnknownInvariant(String),

    #[error("invalid arguments: {0}")]
    InvalidArgs(String),

    #[error("cyclic request: {0}")]
    Cyclic(String),

    #[error("computation failed: {0}")]
    Failed(String),
}

impl InvariantError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}
