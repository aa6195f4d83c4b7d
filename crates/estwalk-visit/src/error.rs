// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Walk errors and the early-exit signal.

use estwalk_core::NodeError;
use thiserror::Error;

/// A structural failure: the tree does not have the shape the registry
/// expects. The walker does no recovery, so this always ends the walk.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WalkError {
    /// The registry has no rule for a node type or category.
    #[error("no walk rule for node type `{kind}`")]
    UnknownKind { kind: String },

    /// A rule read a field that is missing or has the wrong shape.
    #[error(transparent)]
    Node(#[from] NodeError),
}

/// Why a walk step stopped early.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Halt {
    /// Unwind to the entry point and finish normally. Searches use this once
    /// they have a match; a `recursive` rule may return it to end the walk.
    Stop,
    /// Unwind to the entry point and report the error.
    Malformed(WalkError),
}

/// Result of walking one node.
pub type Step = Result<(), Halt>;

impl From<WalkError> for Halt {
    fn from(err: WalkError) -> Self {
        Halt::Malformed(err)
    }
}

impl From<NodeError> for Halt {
    fn from(err: NodeError) -> Self {
        Halt::Malformed(WalkError::Node(err))
    }
}

/// Converts the outcome of a whole walk into its public form.
pub(crate) fn finish(step: Step) -> Result<(), WalkError> {
    match step {
        Ok(()) | Err(Halt::Stop) => Ok(()),
        Err(Halt::Malformed(err)) => Err(err),
    }
}
