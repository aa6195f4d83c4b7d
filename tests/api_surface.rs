// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Compile-only test to verify public API surface.
//!
//! This file serves as a compile-time contract for the public API.
//! If this file fails to compile, the public API has regressed.
//!
//! Run with: cargo test -p estwalk -- api_surface

// Allow unused imports - this test is about compile-time verification, not runtime usage
#![allow(unused_imports)]

// ============================================================================
// Tree Contract and Node Lifecycle
// ============================================================================

use estwalk::{
    Anchor, Children, Cursor, DeprecationPolicy, Field, Node, NodeError, NodeFactory, OpenNode,
    ParseOptions, Position, SourceLocation, TokenCursor, UnknownPolicy, DEPRECATION_ENV,
};

// ============================================================================
// Registries and Traversal
// ============================================================================

use estwalk::{
    ancestor, category, find_node_after, find_node_around, find_node_at, find_node_before, full,
    full_ancestor, make, recursive, simple, AncestorVisitors, Base, Derived, Found, Halt,
    NodeTest, Registry, RuleFn, Rules, Step, Visitors, Walk, WalkError, Walker,
};

// ============================================================================
// Front Door
// ============================================================================

use estwalk::cli::{load_tree, run_ancestors, run_find, run_kinds, FindMode, FindQuery};
use estwalk::error::{CliError, OutputErrorCode};
use estwalk::output::{
    emit_response, AncestorsResponse, ErrorInfo, ErrorResponse, FindResponse, KindsResponse,
    NodeSummary, SCHEMA_VERSION,
};

/// Registries and walkers can be shared across threads.
#[test]
fn api_surface_compiles() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Base>();
    assert_send_sync::<Walker>();
    assert_send_sync::<Node>();
    assert_send_sync::<NodeFactory>();
    assert_send_sync::<Derived<'static, (), Base>>();
}
