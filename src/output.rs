// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! JSON output types for the `estwalk` command line.
//!
//! Every response is a single JSON object on stdout with `status` first,
//! then `schema_version`. Successful responses use `"ok"`; failures use
//! `"error"` and carry an [`ErrorInfo`].

use std::collections::BTreeMap;
use std::io::{self, Write};

use estwalk_core::Node;
use serde::{Deserialize, Serialize};

use crate::error::{CliError, OutputErrorCode};

/// Current output schema version.
pub const SCHEMA_VERSION: &str = "1";

/// A node reference in output: its type and offsets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeSummary {
    #[serde(rename = "type")]
    pub kind: String,
    pub start: usize,
    pub end: usize,
}

impl From<&Node> for NodeSummary {
    fn from(node: &Node) -> Self {
        NodeSummary {
            kind: node.kind.clone(),
            start: node.start,
            end: node.end,
        }
    }
}

/// Response for `estwalk kinds`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KindsResponse {
    pub status: String,
    pub schema_version: String,
    /// Number of nodes walked.
    pub total: usize,
    /// Node count per type, sorted by type name.
    pub kinds: BTreeMap<String, usize>,
}

impl KindsResponse {
    pub fn new(kinds: BTreeMap<String, usize>) -> Self {
        KindsResponse {
            status: "ok".to_string(),
            schema_version: SCHEMA_VERSION.to_string(),
            total: kinds.values().sum(),
            kinds,
        }
    }
}

/// Response for `estwalk find`. `node` is `null` when nothing matched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FindResponse {
    pub status: String,
    pub schema_version: String,
    pub mode: String,
    pub node: Option<NodeSummary>,
}

impl FindResponse {
    pub fn new(mode: impl Into<String>, node: Option<NodeSummary>) -> Self {
        FindResponse {
            status: "ok".to_string(),
            schema_version: SCHEMA_VERSION.to_string(),
            mode: mode.into(),
            node,
        }
    }
}

/// Response for `estwalk ancestors`: node types from the root down to the
/// innermost node containing `pos`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AncestorsResponse {
    pub status: String,
    pub schema_version: String,
    pub pos: usize,
    pub ancestors: Vec<NodeSummary>,
}

impl AncestorsResponse {
    pub fn new(pos: usize, ancestors: Vec<NodeSummary>) -> Self {
        AncestorsResponse {
            status: "ok".to_string(),
            schema_version: SCHEMA_VERSION.to_string(),
            pos,
            ancestors,
        }
    }
}

/// Error details.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorInfo {
    pub code: u8,
    pub message: String,
}

/// Error response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub status: String,
    pub schema_version: String,
    pub error: ErrorInfo,
}

impl ErrorResponse {
    pub fn from_error(err: &CliError) -> Self {
        ErrorResponse {
            status: "error".to_string(),
            schema_version: SCHEMA_VERSION.to_string(),
            error: ErrorInfo {
                code: OutputErrorCode::from(err).code(),
                message: err.to_string(),
            },
        }
    }
}

/// Writes a response as pretty-printed JSON followed by a newline.
pub fn emit_response<T: Serialize>(response: &T, writer: &mut impl Write) -> io::Result<()> {
    let json = serde_json::to_string_pretty(response)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    writeln!(writer, "{}", json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn test_status_comes_first() {
        let response = FindResponse::new("around", None);
        let mut out = Vec::new();
        emit_response(&response, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.trim_start().starts_with("{\n  \"status\": \"ok\""));

        let json: Value = serde_json::from_str(&text).unwrap();
        assert!(json["node"].is_null());
    }

    #[test]
    fn test_kinds_total() {
        let kinds = BTreeMap::from([("Identifier".to_string(), 3), ("Program".to_string(), 1)]);
        assert_eq!(KindsResponse::new(kinds).total, 4);
    }

    #[test]
    fn test_error_response() {
        let response = ErrorResponse::from_error(&CliError::invalid_args("bad"));
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["status"], "error");
        assert_eq!(json["error"]["code"], 2);
        assert_eq!(json["error"]["message"], "invalid arguments: bad");
    }
}
