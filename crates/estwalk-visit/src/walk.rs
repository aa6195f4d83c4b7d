// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Traversal primitives.
//!
//! All primitives drive a [`Registry`] the same way: look up the rule for the
//! node's type (or the category it was handed down under), run it, and walk
//! whatever children the rule reports. They differ in what they do around
//! that step:
//!
//! - [`simple`](Walker::simple) calls a visitor keyed by type or category
//!   after the node's children have been walked.
//! - [`ancestor`](Walker::ancestor) does the same and also hands the visitor
//!   the chain of enclosing nodes, outermost first, current node last.
//! - [`recursive`](Walker::recursive) does nothing automatically. Descent
//!   happens only where a rule calls its continuation, so caller rules layered
//!   with [`make`](crate::make) decide what gets visited.
//! - [`full`](Walker::full) and [`full_ancestor`](Walker::full_ancestor) call
//!   one callback exactly once per node.
//!
//! ```
//! use estwalk_core::Node;
//! use estwalk_visit::{simple, Visitors};
//!
//! let tree = Node::new("ExpressionStatement", 0, 2)
//!     .with("expression", Node::new("Identifier", 0, 1).with("name", "x"));
//!
//! let mut names = Vec::new();
//! let mut visitors = Visitors::new().on("Identifier", |node, names: &mut Vec<String>| {
//!     names.extend(node.str_value("name").map(str::to_string));
//! });
//! simple(&tree, &mut visitors, &mut names).unwrap();
//! assert_eq!(names, ["x"]);
//! ```

use std::collections::HashMap;
use std::fmt;
use std::ptr;

use estwalk_core::Node;

use crate::error::{finish, Step, WalkError};
use crate::grammar::Base;
use crate::registry::{make, Registry, Rules, Walk};

type VisitFn<'v, S> = Box<dyn FnMut(&Node, &mut S) + 'v>;
type AncestorVisitFn<'v, S> = Box<dyn FnMut(&Node, &mut S, &[&Node]) + 'v>;

/// Callbacks for [`Walker::simple`], keyed by node type or category.
pub struct Visitors<'v, S> {
    map: HashMap<String, VisitFn<'v, S>>,
}

impl<'v, S> Visitors<'v, S> {
    pub fn new() -> Self {
        Self {
            map: HashMap::new(),
        }
    }

    #[must_use]
    pub fn on(mut self, kind: impl Into<String>, visit: impl FnMut(&Node, &mut S) + 'v) -> Self {
        self.insert(kind, visit);
        self
    }

    pub fn insert(&mut self, kind: impl Into<String>, visit: impl FnMut(&Node, &mut S) + 'v) {
        self.map.insert(kind.into(), Box::new(visit));
    }

    pub fn contains(&self, kind: &str) -> bool {
        self.map.contains_key(kind)
    }
}

impl<S> Default for Visitors<'_, S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> fmt::Debug for Visitors<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut kinds: Vec<_> = self.map.keys().collect();
        kinds.sort();
        f.debug_struct("Visitors").field("kinds", &kinds).finish()
    }
}

/// Callbacks for [`Walker::ancestor`]. Each receives the ancestor chain,
/// outermost first and the visited node last.
pub struct AncestorVisitors<'v, S> {
    map: HashMap<String, AncestorVisitFn<'v, S>>,
}

impl<'v, S> AncestorVisitors<'v, S> {
    pub fn new() -> Self {
        Self {
            map: HashMap::new(),
        }
    }

    #[must_use]
    pub fn on(
        mut self,
        kind: impl Into<String>,
        visit: impl FnMut(&Node, &mut S, &[&Node]) + 'v,
    ) -> Self {
        self.insert(kind, visit);
        self
    }

    pub fn insert(
        &mut self,
        kind: impl Into<String>,
        visit: impl FnMut(&Node, &mut S, &[&Node]) + 'v,
    ) {
        self.map.insert(kind.into(), Box::new(visit));
    }

    pub fn contains(&self, kind: &str) -> bool {
        self.map.contains_key(kind)
    }
}

impl<S> Default for AncestorVisitors<'_, S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> fmt::Debug for AncestorVisitors<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut kinds: Vec<_> = self.map.keys().collect();
        kinds.sort();
        f.debug_struct("AncestorVisitors")
            .field("kinds", &kinds)
            .finish()
    }
}

/// Runs traversals over a fixed registry.
///
/// `Walker::new()` uses the base grammar. Any [`Registry`] works, including
/// one built with [`make`](crate::make) or a reference to one.
#[derive(Debug, Clone, Copy, Default)]
pub struct Walker<R = Base> {
    pub(crate) registry: R,
}

impl Walker {
    pub fn new() -> Self {
        Self { registry: Base }
    }
}

impl<R> Walker<R> {
    pub fn with_registry(registry: R) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &R {
        &self.registry
    }

    /// Walks `node`, calling the matching visitor for each dispatch after the
    /// node's children are done.
    ///
    /// A node handed down under a category fires the category's visitor and
    /// then, on re-dispatch, its own type's visitor.
    pub fn simple<S>(
        &self,
        node: &Node,
        visitors: &mut Visitors<'_, S>,
        st: &mut S,
    ) -> Result<(), WalkError>
    where
        R: Registry<S>,
    {
        finish(simple_step(&self.registry, visitors, node, st, None))
    }

    /// Like [`simple`](Self::simple), treating the root as `kind`.
    pub fn simple_as<S>(
        &self,
        node: &Node,
        kind: &str,
        visitors: &mut Visitors<'_, S>,
        st: &mut S,
    ) -> Result<(), WalkError>
    where
        R: Registry<S>,
    {
        finish(simple_step(&self.registry, visitors, node, st, Some(kind)))
    }

    /// Like [`simple`](Self::simple), also passing the ancestor chain.
    ///
    /// A node re-dispatched under another category is pushed only once.
    pub fn ancestor<S>(
        &self,
        node: &Node,
        visitors: &mut AncestorVisitors<'_, S>,
        st: &mut S,
    ) -> Result<(), WalkError>
    where
        R: Registry<S>,
    {
        let mut ancestors = Vec::new();
        finish(ancestor_step(
            &self.registry,
            visitors,
            &mut ancestors,
            node,
            st,
            None,
        ))
    }

    /// Runs the registry's rules with no automatic descent.
    ///
    /// A rule returning [`Halt::Stop`](crate::Halt::Stop) ends the walk and
    /// this returns `Ok`.
    pub fn recursive<S>(&self, node: &Node, st: &mut S) -> Result<(), WalkError>
    where
        R: Registry<S>,
    {
        finish(recursive_step(&self.registry, node, st, None))
    }

    /// Like [`recursive`](Self::recursive), treating the root as `kind`.
    pub fn recursive_as<S>(&self, node: &Node, kind: &str, st: &mut S) -> Result<(), WalkError>
    where
        R: Registry<S>,
    {
        finish(recursive_step(&self.registry, node, st, Some(kind)))
    }

    /// Layers `rules` over this walker's registry and runs
    /// [`recursive`](Self::recursive) with the result.
    pub fn recursive_with<S>(
        &self,
        node: &Node,
        rules: Rules<'_, S>,
        st: &mut S,
    ) -> Result<(), WalkError>
    where
        R: Registry<S>,
    {
        let registry = make(rules, &self.registry);
        finish(recursive_step(&registry, node, st, None))
    }

    /// Calls `callback(node, state, type)` once per node, after its children,
    /// with the node's most specific type.
    pub fn full<S, F>(&self, node: &Node, mut callback: F, st: &mut S) -> Result<(), WalkError>
    where
        R: Registry<S>,
        F: FnMut(&Node, &mut S, &str),
    {
        let mut last = None;
        finish(full_step(
            &self.registry,
            &mut callback,
            &mut last,
            node,
            st,
            None,
        ))
    }

    /// Like [`full`](Self::full), also passing the ancestor chain.
    pub fn full_ancestor<S, F>(
        &self,
        node: &Node,
        mut callback: F,
        st: &mut S,
    ) -> Result<(), WalkError>
    where
        R: Registry<S>,
        F: FnMut(&Node, &mut S, &[&Node], &str),
    {
        let mut walk = FullAncestor {
            callback: &mut callback,
            ancestors: Vec::new(),
            last: None,
        };
        finish(walk.step(&self.registry, node, st, None))
    }
}

fn simple_step<'a, S, R: Registry<S>>(
    registry: &R,
    visitors: &mut Visitors<'_, S>,
    node: &'a Node,
    st: &mut S,
    kind: Option<&str>,
) -> Step {
    let kind = kind.unwrap_or(&node.kind);
    registry.dispatch(
        kind,
        node,
        st,
        &mut Walk::new(&mut |child, st, sub| simple_step(registry, visitors, child, st, sub)),
    )?;
    if let Some(visit) = visitors.map.get_mut(kind) {
        visit(node, st);
    }
    Ok(())
}

fn is_top(ancestors: &[&Node], node: &Node) -> bool {
    matches!(ancestors.last(), Some(top) if ptr::eq(*top, node))
}

fn ancestor_step<'a, S, R: Registry<S>>(
    registry: &R,
    visitors: &mut AncestorVisitors<'_, S>,
    ancestors: &mut Vec<&'a Node>,
    node: &'a Node,
    st: &mut S,
    kind: Option<&str>,
) -> Step {
    let kind = kind.unwrap_or(&node.kind);
    let is_new = !is_top(ancestors, node);
    if is_new {
        ancestors.push(node);
    }
    registry.dispatch(
        kind,
        node,
        st,
        &mut Walk::new(&mut |child, st, sub| {
            ancestor_step(registry, visitors, ancestors, child, st, sub)
        }),
    )?;
    if let Some(visit) = visitors.map.get_mut(kind) {
        visit(node, st, ancestors.as_slice());
    }
    if is_new {
        ancestors.pop();
    }
    Ok(())
}

pub(crate) fn recursive_step<'a, S, R: Registry<S>>(
    registry: &R,
    node: &'a Node,
    st: &mut S,
    kind: Option<&str>,
) -> Step {
    let kind = kind.unwrap_or(&node.kind);
    registry.dispatch(
        kind,
        node,
        st,
        &mut Walk::new(&mut |child, st, sub| recursive_step(registry, child, st, sub)),
    )
}

fn full_step<'a, S, R, F>(
    registry: &R,
    callback: &mut F,
    last: &mut Option<&'a Node>,
    node: &'a Node,
    st: &mut S,
    kind: Option<&str>,
) -> Step
where
    R: Registry<S>,
    F: FnMut(&Node, &mut S, &str),
{
    let kind = kind.unwrap_or(&node.kind);
    registry.dispatch(
        kind,
        node,
        st,
        &mut Walk::new(&mut |child, st, sub| full_step(registry, callback, last, child, st, sub)),
    )?;
    if !matches!(*last, Some(prev) if ptr::eq(prev, node)) {
        callback(node, st, kind);
        *last = Some(node);
    }
    Ok(())
}

struct FullAncestor<'f, 'a, F> {
    callback: &'f mut F,
    ancestors: Vec<&'a Node>,
    last: Option<&'a Node>,
}

impl<'a, F> FullAncestor<'_, 'a, F> {
    fn step<S, R>(&mut self, registry: &R, node: &'a Node, st: &mut S, kind: Option<&str>) -> Step
    where
        R: Registry<S>,
        F: FnMut(&Node, &mut S, &[&Node], &str),
    {
        let kind = kind.unwrap_or(&node.kind);
        let is_new = !is_top(&self.ancestors, node);
        if is_new {
            self.ancestors.push(node);
        }
        registry.dispatch(
            kind,
            node,
            st,
            &mut Walk::new(&mut |child, st, sub| self.step(registry, child, st, sub)),
        )?;
        if !matches!(self.last, Some(prev) if ptr::eq(prev, node)) {
            (self.callback)(node, st, self.ancestors.as_slice(), kind);
            self.last = Some(node);
        }
        if is_new {
            self.ancestors.pop();
        }
        Ok(())
    }
}

/// [`Walker::simple`] over the base grammar.
pub fn simple<S>(node: &Node, visitors: &mut Visitors<'_, S>, st: &mut S) -> Result<(), WalkError> {
    Walker::new().simple(node, visitors, st)
}

/// [`Walker::ancestor`] over the base grammar.
pub fn ancestor<S>(
    node: &Node,
    visitors: &mut AncestorVisitors<'_, S>,
    st: &mut S,
) -> Result<(), WalkError> {
    Walker::new().ancestor(node, visitors, st)
}

/// [`Walker::recursive`] over `rules` layered on the base grammar.
pub fn recursive<S>(node: &Node, st: &mut S, rules: Rules<'_, S>) -> Result<(), WalkError> {
    Walker::new().recursive_with(node, rules, st)
}

/// [`Walker::full`] over the base grammar.
pub fn full<S>(
    node: &Node,
    callback: impl FnMut(&Node, &mut S, &str),
    st: &mut S,
) -> Result<(), WalkError> {
    Walker::new().full(node, callback, st)
}

/// [`Walker::full_ancestor`] over the base grammar.
pub fn full_ancestor<S>(
    node: &Node,
    callback: impl FnMut(&Node, &mut S, &[&Node], &str),
    st: &mut S,
) -> Result<(), WalkError> {
    Walker::new().full_ancestor(node, callback, st)
}
