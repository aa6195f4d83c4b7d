// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Position-based node search.
//!
//! Each search walks the tree through a registry, pruning subtrees whose
//! interval cannot hold a match, and tests nodes with a [`NodeTest`] against
//! the type label they were dispatched under. A test for `"Expression"`
//! therefore matches any node walked as an expression, and a test for
//! `"Identifier"` matches identifiers wherever they appear.
//!
//! | Search | Matches | Tie-break |
//! |--------|---------|-----------|
//! | [`find_node_at`] | exact `start`/`end` (either may be a wildcard) | innermost |
//! | [`find_node_around`] | interval contains `pos` | innermost |
//! | [`find_node_after`] | starts at or after `pos` | outermost, earliest |
//! | [`find_node_before`] | ends at or before `pos` | largest `end`, outermost |
//!
//! The first three stop as soon as they have a match. `find_node_before`
//! has to see the whole tree and keeps the best candidate so far.

use std::fmt;

use estwalk_core::Node;
use tracing::{debug, trace};

use crate::error::{finish, Halt, Step, WalkError};
use crate::registry::{Registry, Walk};
use crate::walk::Walker;

/// Which nodes a search accepts.
#[derive(Clone, Copy, Default)]
pub enum NodeTest<'t> {
    /// Every node.
    #[default]
    Any,
    /// Nodes dispatched under this type or category name.
    Kind(&'t str),
    /// Nodes for which the predicate, given the dispatch type and the node,
    /// returns true.
    Matches(&'t dyn Fn(&str, &Node) -> bool),
}

impl NodeTest<'_> {
    pub fn matches(&self, kind: &str, node: &Node) -> bool {
        match self {
            NodeTest::Any => true,
            NodeTest::Kind(want) => *want == kind,
            NodeTest::Matches(pred) => pred(kind, node),
        }
    }
}

impl fmt::Debug for NodeTest<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeTest::Any => f.write_str("Any"),
            NodeTest::Kind(kind) => f.debug_tuple("Kind").field(kind).finish(),
            NodeTest::Matches(_) => f.write_str("Matches(..)"),
        }
    }
}

impl<'t> From<&'t str> for NodeTest<'t> {
    fn from(kind: &'t str) -> Self {
        NodeTest::Kind(kind)
    }
}

impl<'t> From<Option<&'t str>> for NodeTest<'t> {
    fn from(kind: Option<&'t str>) -> Self {
        kind.map_or(NodeTest::Any, NodeTest::Kind)
    }
}

/// A search hit: the node and the walk state at the moment it matched.
#[derive(Debug, Clone, PartialEq)]
pub struct Found<'a, S> {
    pub node: &'a Node,
    pub state: S,
}

impl<R> Walker<R> {
    /// Finds a node with the given bounds. `None` for a bound matches any
    /// value. Only subtrees covering `[start, end]` are searched, and a node is
    /// tested after its children, so the innermost match wins.
    pub fn find_node_at<'a, 't, S>(
        &self,
        node: &'a Node,
        start: Option<usize>,
        end: Option<usize>,
        test: impl Into<NodeTest<'t>>,
        mut st: S,
    ) -> Result<Option<Found<'a, S>>, WalkError>
    where
        R: Registry<S>,
    {
        let test = test.into();
        trace!(?start, ?end, ?test, "find_node_at");
        let mut hit = None;
        let step = at_step(&self.registry, start, end, &test, &mut hit, node, &mut st, None);
        conclude("find_node_at", step, hit, st)
    }

    /// Finds the innermost node whose interval contains `pos`.
    pub fn find_node_around<'a, 't, S>(
        &self,
        node: &'a Node,
        pos: usize,
        test: impl Into<NodeTest<'t>>,
        mut st: S,
    ) -> Result<Option<Found<'a, S>>, WalkError>
    where
        R: Registry<S>,
    {
        let test = test.into();
        trace!(pos, ?test, "find_node_around");
        let mut hit = None;
        let step = around_step(&self.registry, pos, &test, &mut hit, node, &mut st, None);
        conclude("find_node_around", step, hit, st)
    }

    /// Finds the outermost node starting at or after `pos`. Nodes are tested
    /// before their children, so nothing below a match is searched.
    pub fn find_node_after<'a, 't, S>(
        &self,
        node: &'a Node,
        pos: usize,
        test: impl Into<NodeTest<'t>>,
        mut st: S,
    ) -> Result<Option<Found<'a, S>>, WalkError>
    where
        R: Registry<S>,
    {
        let test = test.into();
        trace!(pos, ?test, "find_node_after");
        let mut hit = None;
        let step = after_step(&self.registry, pos, &test, &mut hit, node, &mut st, None);
        conclude("find_node_after", step, hit, st)
    }

    /// Finds the node ending at or before `pos` with the largest end offset.
    ///
    /// Walks every node that starts at or before `pos`. On equal end offsets
    /// the first node reached, which is the outermost, is kept. The returned
    /// state is a copy taken when the winning node was tested.
    pub fn find_node_before<'a, 't, S>(
        &self,
        node: &'a Node,
        pos: usize,
        test: impl Into<NodeTest<'t>>,
        mut st: S,
    ) -> Result<Option<Found<'a, S>>, WalkError>
    where
        R: Registry<S>,
        S: Clone,
    {
        let test = test.into();
        trace!(pos, ?test, "find_node_before");
        let mut best = None;
        finish(before_step(
            &self.registry,
            pos,
            &test,
            &mut best,
            node,
            &mut st,
            None,
        ))?;
        let found = best.map(|(node, state)| Found { node, state });
        debug!(found = ?found.as_ref().map(|f| describe(f.node)), "find_node_before");
        Ok(found)
    }
}

fn describe(node: &Node) -> (&str, usize, usize) {
    (node.kind.as_str(), node.start, node.end)
}

/// Turns the outcome of a stopping search into its result. The state has not
/// been touched since the hit, so it is handed back as is.
fn conclude<'a, S>(
    search: &str,
    step: Step,
    hit: Option<&'a Node>,
    state: S,
) -> Result<Option<Found<'a, S>>, WalkError> {
    finish(step)?;
    debug!(found = ?hit.map(describe), "{search}");
    Ok(hit.map(|node| Found { node, state }))
}

#[allow(clippy::too_many_arguments)]
fn at_step<'a, S, R: Registry<S>>(
    registry: &R,
    start: Option<usize>,
    end: Option<usize>,
    test: &NodeTest<'_>,
    hit: &mut Option<&'a Node>,
    node: &'a Node,
    st: &mut S,
    kind: Option<&str>,
) -> Step {
    let kind = kind.unwrap_or(&node.kind);
    let covers = start.is_none_or(|s| node.start <= s) && end.is_none_or(|e| node.end >= e);
    if covers {
        registry.dispatch(
            kind,
            node,
            st,
            &mut Walk::new(&mut |child, st, sub| {
                at_step(registry, start, end, test, hit, child, st, sub)
            }),
        )?;
    }
    let exact = start.is_none_or(|s| node.start == s) && end.is_none_or(|e| node.end == e);
    if exact && test.matches(kind, node) {
        *hit = Some(node);
        return Err(Halt::Stop);
    }
    Ok(())
}

fn around_step<'a, S, R: Registry<S>>(
    registry: &R,
    pos: usize,
    test: &NodeTest<'_>,
    hit: &mut Option<&'a Node>,
    node: &'a Node,
    st: &mut S,
    kind: Option<&str>,
) -> Step {
    if !node.contains(pos) {
        return Ok(());
    }
    let kind = kind.unwrap_or(&node.kind);
    registry.dispatch(
        kind,
        node,
        st,
        &mut Walk::new(&mut |child, st, sub| around_step(registry, pos, test, hit, child, st, sub)),
    )?;
    if test.matches(kind, node) {
        *hit = Some(node);
        return Err(Halt::Stop);
    }
    Ok(())
}

fn after_step<'a, S, R: Registry<S>>(
    registry: &R,
    pos: usize,
    test: &NodeTest<'_>,
    hit: &mut Option<&'a Node>,
    node: &'a Node,
    st: &mut S,
    kind: Option<&str>,
) -> Step {
    if node.end < pos {
        return Ok(());
    }
    let kind = kind.unwrap_or(&node.kind);
    if node.start >= pos && test.matches(kind, node) {
        *hit = Some(node);
        return Err(Halt::Stop);
    }
    registry.dispatch(
        kind,
        node,
        st,
        &mut Walk::new(&mut |child, st, sub| after_step(registry, pos, test, hit, child, st, sub)),
    )
}

fn before_step<'a, S: Clone, R: Registry<S>>(
    registry: &R,
    pos: usize,
    test: &NodeTest<'_>,
    best: &mut Option<(&'a Node, S)>,
    node: &'a Node,
    st: &mut S,
    kind: Option<&str>,
) -> Step {
    if node.start > pos {
        return Ok(());
    }
    let kind = kind.unwrap_or(&node.kind);
    let improves = match best {
        Some((prev, _)) => prev.end < node.end,
        None => true,
    };
    if node.end <= pos && improves && test.matches(kind, node) {
        *best = Some((node, st.clone()));
    }
    registry.dispatch(
        kind,
        node,
        st,
        &mut Walk::new(&mut |child, st, sub| before_step(registry, pos, test, best, child, st, sub)),
    )
}

/// [`Walker::find_node_at`] over the base grammar.
pub fn find_node_at<'a, 't, S>(
    node: &'a Node,
    start: Option<usize>,
    end: Option<usize>,
    test: impl Into<NodeTest<'t>>,
    st: S,
) -> Result<Option<Found<'a, S>>, WalkError> {
    Walker::new().find_node_at(node, start, end, test, st)
}

/// [`Walker::find_node_around`] over the base grammar.
pub fn find_node_around<'a, 't, S>(
    node: &'a Node,
    pos: usize,
    test: impl Into<NodeTest<'t>>,
    st: S,
) -> Result<Option<Found<'a, S>>, WalkError> {
    Walker::new().find_node_around(node, pos, test, st)
}

/// [`Walker::find_node_after`] over the base grammar.
pub fn find_node_after<'a, 't, S>(
    node: &'a Node,
    pos: usize,
    test: impl Into<NodeTest<'t>>,
    st: S,
) -> Result<Option<Found<'a, S>>, WalkError> {
    Walker::new().find_node_after(node, pos, test, st)
}

/// [`Walker::find_node_before`] over the base grammar.
pub fn find_node_before<'a, 't, S: Clone>(
    node: &'a Node,
    pos: usize,
    test: impl Into<NodeTest<'t>>,
    st: S,
) -> Result<Option<Found<'a, S>>, WalkError> {
    Walker::new().find_node_before(node, pos, test, st)
}
