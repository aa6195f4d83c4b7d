// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Error types and exit codes for the `estwalk` command line.
//!
//! Exit codes:
//! - `2`: Invalid arguments (option combinations the command cannot honor)
//! - `3`: Input errors (file missing or unreadable, not ESTree JSON)
//! - `4`: Walk errors (the tree has a shape the grammar does not accept)
//! - `10`: Internal errors

use std::fmt;
use std::io;

use estwalk_visit::WalkError;
use thiserror::Error;

/// Stable error codes, used both as the process exit code and in the JSON
/// error response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputErrorCode {
    InvalidArguments = 2,
    InputError = 3,
    WalkError = 4,
    InternalError = 10,
}

impl OutputErrorCode {
    pub fn code(&self) -> u8 {
        *self as u8
    }
}

impl fmt::Display for OutputErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Everything a CLI command can fail with.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("invalid arguments: {message}")]
    InvalidArguments { message: String },

    #[error("cannot read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("{path} is not an ESTree JSON tree: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("walk failed: {0}")]
    Walk(#[from] WalkError),

    #[error("internal error: {message}")]
    Internal { message: String },
}

impl CliError {
    pub fn invalid_args(message: impl Into<String>) -> Self {
        CliError::InvalidArguments {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        CliError::Internal {
            message: message.into(),
        }
    }
}

impl From<&CliError> for OutputErrorCode {
    fn from(err: &CliError) -> Self {
        match err {
            CliError::InvalidArguments { .. } => OutputErrorCode::InvalidArguments,
            CliError::Read { .. } | CliError::Parse { .. } => OutputErrorCode::InputError,
            CliError::Walk(_) => OutputErrorCode::WalkError,
            CliError::Internal { .. } => OutputErrorCode::InternalError,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes() {
        assert_eq!(
            OutputErrorCode::from(&CliError::invalid_args("x")).code(),
            2
        );
        let err = CliError::Walk(WalkError::UnknownKind {
            kind: "JSXText".to_string(),
        });
        assert_eq!(OutputErrorCode::from(&err).code(), 4);
        assert_eq!(err.to_string(), "walk failed: no walk rule for node type `JSXText`");
        assert_eq!(OutputErrorCode::InternalError.to_string(), "10");
    }
}
