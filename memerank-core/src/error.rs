use thiserror::Error;

/// Errors surfaced by the rating engine. All are synchronous and leave the
/// engine state untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// Fewer than two items: no comparison is possible.
    #[error("need at least 2 items to compare, got {found}")]
    InsufficientItems { found: usize },

    /// Operation invoked before `initialize`.
    #[error("engine not initialized: load a catalog first")]
    NotReady,

    #[error("unknown item id: {0}")]
    UnknownItem(String),

    #[error("duplicate item id in catalog: {0}")]
    DuplicateItem(String),

    /// Both sides of a recorded pair name the same item.
    #[error("cannot compare item {0} against itself")]
    SelfComparison(String),
}

pub type Result<T> = std::result::Result<T, EngineError>;
