// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Node lifecycle: opening and closing nodes on behalf of a parser.
//!
//! A parser opens a node when it sees the first token of a construct, attaches
//! children while it parses the rest, and closes the node once the last token
//! is consumed. Opening stamps `start` (plus `loc.start`, `range[0]` and
//! `sourceFile` when enabled); closing stamps `type` and `end` (plus `loc.end`
//! and `range[1]`).
//!
//! The two stages are separate types. An [`OpenNode`] has no `type` and no
//! `end`, and the only way to get a [`Node`] out of it is one of the
//! `finish_*` methods, so an unfinished node can never reach a walker.
//!
//! ```
//! use estwalk_core::{Cursor, NodeFactory, ParseOptions, Position};
//!
//! let factory = NodeFactory::new(ParseOptions::new().with_ranges(true));
//! let mut cursor = Cursor::new();
//!
//! // `foo` at 0..3
//! cursor.advance(0, Position::new(1, 0), 3, Position::new(1, 3));
//! let open = factory.start_node(&cursor).with("name", "foo");
//! cursor.advance(3, Position::new(1, 3), 3, Position::new(1, 3));
//! let ident = factory.finish_node(&cursor, open, "Identifier");
//!
//! assert_eq!((ident.start, ident.end), (0, 3));
//! assert_eq!(ident.range, Some([0, 3]));
//! ```

use std::backtrace::Backtrace;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::NodeError;
use crate::location::{Position, SourceLocation};
use crate::node::{Field, Node};
use crate::options::{DeprecationPolicy, ParseOptions};

const PAIR_DEPRECATED: &str =
    "passing an (offset, location) pair is deprecated, pass the offset and location separately";

/// Token positions the factory reads when opening and closing nodes.
///
/// Implemented by the parser's tokenizer state.
pub trait TokenCursor {
    /// Offset and position where the current token starts.
    fn token_start(&self) -> (usize, Position);
    /// Offset and position where the previously consumed token ended.
    fn last_token_end(&self) -> (usize, Position);
}

/// A minimal [`TokenCursor`] for parsers that do not keep their own.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cursor {
    pub start: usize,
    pub start_loc: Position,
    pub end: usize,
    pub end_loc: Position,
    pub last_end: usize,
    pub last_end_loc: Position,
}

impl Cursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Moves to the next token. The end of the current token becomes the
    /// previous-token end.
    pub fn advance(&mut self, start: usize, start_loc: Position, end: usize, end_loc: Position) {
        self.last_end = self.end;
        self.last_end_loc = self.end_loc;
        self.start = start;
        self.start_loc = start_loc;
        self.end = end;
        self.end_loc = end_loc;
    }
}

impl TokenCursor for Cursor {
    fn token_start(&self) -> (usize, Position) {
        (self.start, self.start_loc)
    }

    fn last_token_end(&self) -> (usize, Position) {
        (self.last_end, self.last_end_loc)
    }
}

/// Position argument of [`NodeFactory::start_node_at`] and
/// [`NodeFactory::finish_node_at`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    /// A bare offset; the location is passed separately.
    Offset(usize),
    /// Deprecated: offset and location bundled together. Subject to the
    /// factory's [`DeprecationPolicy`].
    Pair(usize, Position),
}

impl From<usize> for Anchor {
    fn from(offset: usize) -> Self {
        Anchor::Offset(offset)
    }
}

impl From<(usize, Position)> for Anchor {
    fn from((offset, loc): (usize, Position)) -> Self {
        Anchor::Pair(offset, loc)
    }
}

/// A node between `start_*` and `finish_*`.
#[derive(Debug, Clone, PartialEq)]
pub struct OpenNode {
    start: usize,
    loc_start: Option<Position>,
    ranged: bool,
    source_file: Option<String>,
    pub fields: BTreeMap<String, Field>,
}

impl OpenNode {
    pub fn start(&self) -> usize {
        self.start
    }

    pub fn loc_start(&self) -> Option<Position> {
        self.loc_start
    }

    /// Sets a field, returning the previous value.
    pub fn set(&mut self, name: impl Into<String>, field: impl Into<Field>) -> Option<Field> {
        self.fields.insert(name.into(), field.into())
    }

    #[must_use]
    pub fn with(mut self, name: impl Into<String>, field: impl Into<Field>) -> Self {
        self.set(name, field);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Field> {
        self.fields.get(name)
    }
}

/// Opens and closes nodes according to a fixed set of [`ParseOptions`].
#[derive(Debug)]
pub struct NodeFactory {
    options: ParseOptions,
    warned: AtomicBool,
}

impl NodeFactory {
    pub fn new(options: ParseOptions) -> Self {
        Self {
            options,
            warned: AtomicBool::new(false),
        }
    }

    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Opens a node at the start of the current token.
    pub fn start_node(&self, cursor: &impl TokenCursor) -> OpenNode {
        let (start, loc) = cursor.token_start();
        self.open(start, loc)
    }

    /// Opens a node at an explicit offset.
    ///
    /// `loc` is required when location tracking is on. With the deprecated
    /// [`Anchor::Pair`] form the location comes from the pair and `loc` is
    /// ignored.
    pub fn start_node_at(
        &self,
        pos: impl Into<Anchor>,
        loc: Option<Position>,
    ) -> Result<OpenNode, NodeError> {
        let (start, loc) = self.resolve("start_node_at", pos.into(), loc)?;
        Ok(self.open(start, loc))
    }

    /// Opens a node where `node` starts, e.g. to wrap it in a binary
    /// expression discovered after the fact.
    pub fn start_node_at_node(&self, node: &Node) -> Result<OpenNode, NodeError> {
        let loc = node.loc.as_ref().map(|loc| loc.start);
        self.start_node_at(node.start, loc)
    }

    /// Closes a node at the end of the previously consumed token.
    pub fn finish_node(
        &self,
        cursor: &impl TokenCursor,
        node: OpenNode,
        kind: impl Into<String>,
    ) -> Node {
        let (end, loc) = cursor.last_token_end();
        self.close(node, kind.into(), end, loc)
    }

    /// Closes a node at an explicit offset.
    pub fn finish_node_at(
        &self,
        node: OpenNode,
        kind: impl Into<String>,
        pos: impl Into<Anchor>,
        loc: Option<Position>,
    ) -> Result<Node, NodeError> {
        let (end, loc) = self.resolve("finish_node_at", pos.into(), loc)?;
        Ok(self.close(node, kind.into(), end, loc))
    }

    fn open(&self, start: usize, loc: Position) -> OpenNode {
        OpenNode {
            start,
            loc_start: self.options.locations.then_some(loc),
            ranged: self.options.ranges,
            source_file: self.options.direct_source_file.clone(),
            fields: BTreeMap::new(),
        }
    }

    fn close(&self, node: OpenNode, kind: String, end: usize, loc: Position) -> Node {
        let loc = node.loc_start.map(|start| SourceLocation {
            start,
            end: loc,
            source: self.options.source_file.clone(),
        });
        Node {
            kind,
            start: node.start,
            end,
            loc,
            range: node.ranged.then_some([node.start, end]),
            source_file: node.source_file,
            fields: node.fields,
        }
    }

    /// Unpacks an anchor into an offset and a location.
    fn resolve(
        &self,
        api: &'static str,
        anchor: Anchor,
        loc: Option<Position>,
    ) -> Result<(usize, Position), NodeError> {
        let (offset, loc) = match anchor {
            Anchor::Offset(offset) => (offset, loc),
            Anchor::Pair(offset, loc) => {
                self.deprecated(api)?;
                (offset, Some(loc))
            }
        };
        match loc {
            Some(loc) => Ok((offset, loc)),
            None if self.options.locations => Err(NodeError::MissingLocation { offset }),
            None => Ok((offset, Position::default())),
        }
    }

    fn deprecated(&self, api: &'static str) -> Result<(), NodeError> {
        match self.options.deprecation {
            DeprecationPolicy::Silent => {}
            DeprecationPolicy::Strict => return Err(NodeError::Deprecated { api }),
            DeprecationPolicy::WarnOnce => {
                if self.first_warning() {
                    tracing::warn!(api, "{PAIR_DEPRECATED}");
                }
            }
            DeprecationPolicy::Trace => {
                if self.first_warning() {
                    let backtrace = Backtrace::force_capture();
                    tracing::warn!(api, %backtrace, "{PAIR_DEPRECATED}");
                }
            }
        }
        Ok(())
    }

    fn first_warning(&self) -> bool {
        !self.warned.swap(true, Ordering::Relaxed)
    }
}
