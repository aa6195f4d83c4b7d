// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! The ESTree node model.
//!
//! A [`Node`] carries the common header every ESTree node has (`type`,
//! `start`, `end` and the optional `loc`/`range`/`sourceFile`) plus an open
//! map of type-specific fields. Children are owned by their parent, so a
//! tree of `Node`s is always a tree: no sharing, no cycles.
//!
//! Field values are one of three shapes (see [`Field`]): a single child node,
//! a list of child nodes (with holes, for array elisions), or plain JSON data
//! for everything else (operators, flags, literal values).
//!
//! # JSON
//!
//! `Node` reads and writes the ESTree JSON produced by JavaScript parsers:
//!
//! ```
//! use estwalk_core::Node;
//!
//! let json = r#"{"type":"Identifier","start":0,"end":3,"name":"foo"}"#;
//! let node: Node = serde_json::from_str(json).unwrap();
//! assert_eq!(node.kind, "Identifier");
//! assert_eq!(node.str_value("name"), Some("foo"));
//! ```

use std::collections::BTreeMap;
use std::slice;

use serde::{Deserialize, Serialize};

use crate::error::NodeError;
use crate::location::SourceLocation;

/// A closed syntax tree node.
///
/// `kind` is the ESTree `type` tag. Note that some node types also have an
/// ESTree field literally called `kind` (e.g. `VariableDeclaration`); that one
/// lives in [`fields`](Self::fields) like any other type-specific field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    #[serde(rename = "type")]
    pub kind: String,
    pub start: usize,
    pub end: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loc: Option<SourceLocation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub range: Option<[usize; 2]>,
    #[serde(
        rename = "sourceFile",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub source_file: Option<String>,
    #[serde(flatten)]
    pub fields: BTreeMap<String, Field>,
}

/// A type-specific field value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Field {
    /// A single child node.
    Node(Box<Node>),
    /// A list of child nodes; `None` marks a hole (`[a, , b]`).
    List(Vec<Option<Node>>),
    /// Anything that is not a node: strings, numbers, flags, `null`.
    Value(serde_json::Value),
}

impl Node {
    /// Creates a closed node with no fields.
    pub fn new(kind: impl Into<String>, start: usize, end: usize) -> Self {
        Self {
            kind: kind.into(),
            start,
            end,
            loc: None,
            range: None,
            source_file: None,
            fields: BTreeMap::new(),
        }
    }

    /// Builder form of [`set`](Self::set).
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, field: impl Into<Field>) -> Self {
        self.set(name, field);
        self
    }

    /// Sets a field, returning the previous value.
    pub fn set(&mut self, name: impl Into<String>, field: impl Into<Field>) -> Option<Field> {
        self.fields.insert(name.into(), field.into())
    }

    pub fn get(&self, name: &str) -> Option<&Field> {
        self.fields.get(name)
    }

    pub fn is(&self, kind: &str) -> bool {
        self.kind == kind
    }

    /// Returns true if `pos` lies inside `[start, end]`.
    pub fn contains(&self, pos: usize) -> bool {
        self.start <= pos && pos <= self.end
    }

    /// A required child node.
    pub fn child(&self, name: &str) -> Result<&Node, NodeError> {
        self.opt_child(name)?
            .ok_or_else(|| NodeError::missing(&self.kind, name))
    }

    /// An optional child node; absent and `null` both read as `None`.
    pub fn opt_child(&self, name: &str) -> Result<Option<&Node>, NodeError> {
        match self.fields.get(name) {
            None | Some(Field::Value(serde_json::Value::Null)) => Ok(None),
            Some(Field::Node(node)) => Ok(Some(node.as_ref())),
            Some(_) => Err(NodeError::shape(&self.kind, name, "a node")),
        }
    }

    /// A required list of child nodes. Holes are reported as errors when
    /// the iterator reaches them.
    pub fn children<'n>(&'n self, name: &'n str) -> Result<Children<'n>, NodeError> {
        let items = self
            .list(name)?
            .ok_or_else(|| NodeError::missing(&self.kind, name))?;
        Ok(Children::new(self, name, items))
    }

    /// Like [`children`](Self::children), but an absent list is empty.
    pub fn opt_children<'n>(&'n self, name: &'n str) -> Result<Children<'n>, NodeError> {
        let items = self.list(name)?.unwrap_or(&[]);
        Ok(Children::new(self, name, items))
    }

    /// A required list of child nodes with holes skipped.
    pub fn elements(&self, name: &str) -> Result<impl Iterator<Item = &Node>, NodeError> {
        let items = self
            .list(name)?
            .ok_or_else(|| NodeError::missing(&self.kind, name))?;
        Ok(items.iter().flatten())
    }

    /// Reads a boolean flag such as `computed` or `expression`. Anything but
    /// `true` reads as false.
    pub fn flag(&self, name: &str) -> bool {
        matches!(
            self.fields.get(name),
            Some(Field::Value(serde_json::Value::Bool(true)))
        )
    }

    /// Reads a string field such as `name` or `operator`.
    pub fn str_value(&self, name: &str) -> Option<&str> {
        match self.fields.get(name) {
            Some(Field::Value(serde_json::Value::String(s))) => Some(s.as_str()),
            _ => None,
        }
    }

    fn list(&self, name: &str) -> Result<Option<&[Option<Node>]>, NodeError> {
        match self.fields.get(name) {
            None | Some(Field::Value(serde_json::Value::Null)) => Ok(None),
            Some(Field::List(items)) => Ok(Some(items.as_slice())),
            Some(_) => Err(NodeError::shape(&self.kind, name, "a list of nodes")),
        }
    }
}

/// Iterator over a node list that refuses holes.
#[derive(Debug, Clone)]
pub struct Children<'n> {
    parent: &'n Node,
    name: &'n str,
    items: slice::Iter<'n, Option<Node>>,
}

impl<'n> Children<'n> {
    fn new(parent: &'n Node, name: &'n str, items: &'n [Option<Node>]) -> Self {
        Self {
            parent,
            name,
            items: items.iter(),
        }
    }
}

impl<'n> Iterator for Children<'n> {
    type Item = Result<&'n Node, NodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.items.next()?;
        Some(
            item.as_ref()
                .ok_or_else(|| NodeError::shape(&self.parent.kind, self.name, "free of holes")),
        )
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.items.size_hint()
    }
}

impl From<Node> for Field {
    fn from(node: Node) -> Self {
        Field::Node(Box::new(node))
    }
}

impl From<Option<Node>> for Field {
    fn from(node: Option<Node>) -> Self {
        match node {
            Some(node) => Field::Node(Box::new(node)),
            None => Field::Value(serde_json::Value::Null),
        }
    }
}

impl From<Vec<Node>> for Field {
    fn from(nodes: Vec<Node>) -> Self {
        Field::List(nodes.into_iter().map(Some).collect())
    }
}

impl From<Vec<Option<Node>>> for Field {
    fn from(nodes: Vec<Option<Node>>) -> Self {
        Field::List(nodes)
    }
}

impl From<serde_json::Value> for Field {
    fn from(value: serde_json::Value) -> Self {
        Field::Value(value)
    }
}

impl From<bool> for Field {
    fn from(value: bool) -> Self {
        Field::Value(value.into())
    }
}

impl From<&str> for Field {
    fn from(value: &str) -> Self {
        Field::Value(value.into())
    }
}

impl From<String> for Field {
    fn from(value: String) -> Self {
        Field::Value(value.into())
    }
}

impl From<f64> for Field {
    fn from(value: f64) -> Self {
        Field::Value(value.into())
    }
}
