//! Error type shared by the search, evaluators and samplers.

use thiserror::Error;

use crate::mcts::NodeId;

/// Errors raised by tree search.
///
/// Most variants are caller-contract violations (asking a leaf for its
/// visit distribution, searching from a terminal state). None of them are
/// retried internally.
#[derive(Debug, Error)]
pub enum MctsError {
    #[error("{0} is a leaf and has no children to choose from")]
    LeafNode(NodeId),

    #[error("{0} has not been explored yet (explore count is zero)")]
    ZeroExploreCount(NodeId),

    #[error("parent of {0} has no cached state; nodes must be visited top-down")]
    MissingParentState(NodeId),

    #[error("{0} is neither terminal nor expanded and cannot be solved")]
    UnsolvableNode(NodeId),

    #[error("invalid node ID: {0}")]
    InvalidNode(NodeId),

    #[error("terminal position cannot be searched")]
    TerminalRoot,

    #[error("evaluator returned no action with positive prior")]
    EmptyPrior,

    #[error("search requires at least one simulation")]
    NoSimulations,

    #[error("distribution error: {0}")]
    Distribution(String),

    #[error("evaluation failed: {0}")]
    EvaluationFailed(String),
}

pub type Result<T> = std::result::Result<T, MctsError>;
