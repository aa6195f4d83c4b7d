// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Core infrastructure for estwalk.
//!
//! This crate provides the pieces shared by parsers that build ESTree trees
//! and tools that walk them:
//! - The node model ([`Node`], [`Field`]) with ESTree JSON (de)serialization
//! - Location value objects ([`Position`], [`SourceLocation`])
//! - Parser options ([`ParseOptions`], [`DeprecationPolicy`])
//! - The node lifecycle manager ([`NodeFactory`]) that opens and closes
//!   nodes with consistent offsets, locations and ranges
//! - The error type for malformed nodes and rejected calls ([`NodeError`])

pub mod error;
pub mod factory;
pub mod location;
pub mod node;
pub mod options;

pub use error::NodeError;
pub use factory::{Anchor, Cursor, NodeFactory, OpenNode, TokenCursor};
pub use location::{Position, SourceLocation};
pub use node::{Children, Field, Node};
pub use options::{DeprecationPolicy, ParseOptions, UnknownPolicy, DEPRECATION_ENV};
