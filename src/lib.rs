// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! estwalk: walk, search and build ESTree syntax trees.
//!
//! This crate is the facade over the workspace:
//! - [`estwalk_core`]: the node model and the node factory parsers use to
//!   open and close nodes
//! - [`estwalk_visit`]: the base grammar, registry derivation, traversal
//!   primitives and position search
//!
//! plus the command-line front end ([`cli`], [`output`], [`error`]).

// Tree contract and node lifecycle - re-exported from estwalk-core
pub use estwalk_core::{
    Anchor, Children, Cursor, DeprecationPolicy, Field, Node, NodeError, NodeFactory, OpenNode,
    ParseOptions, Position, SourceLocation, TokenCursor, UnknownPolicy, DEPRECATION_ENV,
};

// Walking and search - re-exported from estwalk-visit
pub use estwalk_visit::{
    ancestor, category, find_node_after, find_node_around, find_node_at, find_node_before, full,
    full_ancestor, make, recursive, simple, AncestorVisitors, Base, Derived, Found, Halt,
    NodeTest, Registry, RuleFn, Rules, Step, Visitors, Walk, WalkError, Walker,
};

// Front door
pub mod cli;
pub mod error;
pub mod output;
