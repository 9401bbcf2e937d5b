use thiserror::Error;

/// Failures reported by container operations.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TreeError {
    /// The operation needs at least one element.
    #[error("container is empty")]
    EmptyContainer,

    /// No entry has the requested key.
    #[error("key not found")]
    KeyNotFound,
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, TreeError>;

/// A broken structural invariant, as found by `check()`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvariantError {
    /// An in-order walk produced keys that are not strictly increasing.
    #[error("keys are not in strictly increasing order")]
    Unordered,

    /// A node's subtree heights differ by more than one.
    #[error("balance factor {factor} is outside -1..=1")]
    Unbalanced {
        /// Left subtree height minus right subtree height.
        factor: i16,
    },

    /// A node caches the wrong height.
    #[error("cached height {cached} but subtree height is {actual}")]
    StaleHeight {
        /// The height stored in the node.
        cached: u8,
        /// The height recomputed from the children.
        actual: u8,
    },

    /// A node caches the wrong subtree size.
    #[error("cached size {cached} but subtree holds {actual} nodes")]
    StaleLen {
        /// The size stored in the node.
        cached: usize,
        /// The number of nodes actually in the subtree.
        actual: usize,
    },

    /// The container's count disagrees with the tree.
    #[error("container records {recorded} entries but holds {actual}")]
    LenMismatch {
        /// The count kept by the container.
        recorded: usize,
        /// The number of nodes in the tree.
        actual: usize,
    },
}
