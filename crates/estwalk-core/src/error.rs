// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Error type for node access and node construction.

use thiserror::Error;

/// Errors raised while reading node fields or building nodes.
///
/// Field errors are never recovered inside the library: a grammar rule that
/// hits one hands it straight back to whoever started the traversal.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NodeError {
    /// A required child field is absent (or `null`).
    #[error("{kind} node is missing required field `{field}`")]
    MissingField { kind: String, field: String },

    /// A field holds something other than what the grammar expects.
    #[error("field `{field}` of {kind} node is not {expected}")]
    UnexpectedShape {
        kind: String,
        field: String,
        expected: &'static str,
    },

    /// Location tracking is on but the caller supplied no location.
    #[error("location tracking is enabled but no location was given for offset {offset}")]
    MissingLocation { offset: usize },

    /// The legacy `(offset, location)` pair was used under the strict policy.
    #[error("{api}: passing an (offset, location) pair is deprecated, pass the offset and location separately")]
    Deprecated { api: &'static str },
}

impl NodeError {
    pub(crate) fn missing(kind: &str, field: &str) -> Self {
        NodeError::MissingField {
            kind: kind.to_string(),
            field: field.to_string(),
        }
    }

    pub(crate) fn shape(kind: &str, field: &str, expected: &'static str) -> Self {
        NodeError::UnexpectedShape {
            kind: kind.to_string(),
            field: field.to_string(),
            expected,
        }
    }
}
