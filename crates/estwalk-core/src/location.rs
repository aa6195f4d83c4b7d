// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Line/column value objects attached to nodes when location tracking is on.

use serde::{Deserialize, Serialize};

/// A line/column pair. Lines are 1-based, columns are 0-based.
/// Ordering compares lines, then columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Position {
    pub const fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self { line: 1, column: 0 }
    }
}

/// The `loc` of a closed node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLocation {
    pub start: Position,
    pub end: Position,
    /// Set from `ParseOptions::source_file`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl SourceLocation {
    pub fn new(start: Position, end: Position) -> Self {
        Self {
            start,
            end,
            source: None,
        }
    }

    /// Returns true if `pos` lies inside `[start, end]`.
    pub fn contains(&self, pos: Position) -> bool {
        self.start <= pos && pos <= self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_ordering() {
        assert!(Position::new(1, 9) < Position::new(2, 0));
        assert!(Position::new(3, 1) < Position::new(3, 2));
        assert_eq!(Position::default(), Position::new(1, 0));
    }

    #[test]
    fn test_location_contains() {
        let loc = SourceLocation::new(Position::new(2, 4), Position::new(4, 1));
        assert!(loc.contains(Position::new(3, 80)));
        assert!(loc.contains(Position::new(4, 1)));
        assert!(!loc.contains(Position::new(2, 3)));
    }

    #[test]
    fn test_location_json_shape() {
        let mut loc = SourceLocation::new(Position::new(1, 0), Position::new(1, 5));
        let json = serde_json::to_value(&loc).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"start": {"line": 1, "column": 0}, "end": {"line": 1, "column": 5}})
        );

        loc.source = Some("main.js".to_string());
        let json = serde_json::to_value(&loc).unwrap();
        assert_eq!(json["source"], "main.js");
    }
}
