// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Walking ESTree trees.
//!
//! This crate provides:
//! - The base grammar ([`Base`]): how every ESTree node type and category
//!   reports its children
//! - Registry derivation ([`make`], [`Rules`], [`Derived`]): caller rules
//!   layered over a base, falling through for everything else
//! - Traversal primitives ([`simple`], [`ancestor`], [`recursive`], [`full`],
//!   [`full_ancestor`]) and the [`Walker`] that runs them over any registry
//! - Position search ([`find_node_at`], [`find_node_around`],
//!   [`find_node_after`], [`find_node_before`])
//!
//! # Example
//!
//! ```
//! use estwalk_core::Node;
//! use estwalk_visit::find_node_around;
//!
//! // f(g(x))
//! let inner = Node::new("CallExpression", 2, 6)
//!     .with("callee", Node::new("Identifier", 2, 3).with("name", "g"))
//!     .with("arguments", vec![Node::new("Identifier", 4, 5).with("name", "x")]);
//! let outer = Node::new("CallExpression", 0, 10)
//!     .with("callee", Node::new("Identifier", 0, 1).with("name", "f"))
//!     .with("arguments", vec![inner]);
//!
//! let found = find_node_around(&outer, 4, "CallExpression", ()).unwrap().unwrap();
//! assert_eq!((found.node.start, found.node.end), (2, 6));
//! ```

pub mod error;
pub mod find;
pub mod grammar;
pub mod registry;
pub mod walk;

pub use error::{Halt, Step, WalkError};
pub use find::{find_node_after, find_node_around, find_node_at, find_node_before, Found, NodeTest};
pub use grammar::{category, Base};
pub use registry::{make, BoxedRule, Derived, Registry, RuleFn, Rules, Walk};
pub use walk::{ancestor, full, full_ancestor, recursive, simple, AncestorVisitors, Visitors, Walker};
