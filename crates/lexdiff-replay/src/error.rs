use lexdiff_types::ChangeKind;

/// Errors produced while applying a change set.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApplyError {
    #[error("{change} target not found: {article}")]
    ArticleNotFound { article: String, change: ChangeKind },

    #[error("inserted article already exists: {0}")]
    DuplicateArticle(String),

    #[error("insert anchor {anchor} not found for {article}")]
    AnchorNotFound { article: String, anchor: String },
}

/// Broad classification of an [`ApplyError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyErrorKind {
    /// The change set does not fit the state it is applied to.
    StructuralInconsistency,
    /// The change set is wrong on its own terms.
    MalformedChangeSet,
}

impl ApplyError {
    pub fn kind(&self) -> ApplyErrorKind {
        match self {
            Self::ArticleNotFound { .. } | Self::DuplicateArticle(_) => {
                ApplyErrorKind::StructuralInconsistency
            }
            Self::AnchorNotFound { .. } => ApplyErrorKind::MalformedChangeSet,
        }
    }
}

/// Failure of one change set within a chain.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("change set {index} failed: {source}")]
pub struct ChainError {
    pub index: usize,
    pub source: ApplyError,
}

/// Errors produced by document stores.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("document store lock poisoned")]
    LockPoisoned,

    #[error("document store backend error: {0}")]
    Backend(String),
}

/// Errors produced by timeline replay.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReplayError {
    #[error("step {target} out of range: timeline has {len} steps")]
    StepOutOfRange { target: usize, len: usize },

    #[error("step {index} ({reference}) does not apply: {source}")]
    Inconsistent {
        index: usize,
        reference: String,
        source: ApplyError,
    },

    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("replay of step {target} panicked")]
    WorkerPanicked { target: usize },
}
