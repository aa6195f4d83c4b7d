// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Registries: maps from node type (or category) to walk rule.
//!
//! A walk rule receives a node, the caller's state and a [`Walk`]
//! continuation. It reports each child by calling the continuation, in the
//! order the construct defines, optionally under a category name instead of
//! the child's own type. Rules never return data; a rule's only effect is the
//! sequence of continuation calls it makes.
//!
//! The base grammar lives in [`Base`](crate::Base). [`make`] layers caller
//! rules over any registry, falling back to it for every type the caller does
//! not mention:
//!
//! ```
//! use estwalk_visit::{category, make, Base, Registry, Rules};
//!
//! // Skip the `alternate` branch of every `if`.
//! let rules = Rules::<()>::new().on("IfStatement", |node, st, walk| {
//!     walk.visit_as(node.child("test")?, st, category::EXPRESSION)?;
//!     walk.visit_as(node.child("consequent")?, st, category::STATEMENT)
//! });
//! let registry = make(rules, Base);
//! assert!(registry.handles("IfStatement"));
//! assert!(registry.handles("WhileStatement"));
//! ```

use std::collections::HashMap;
use std::fmt;

use estwalk_core::Node;

use crate::error::Step;

/// The continuation handed to walk rules.
pub struct Walk<'c, 'a, S> {
    next: &'c mut dyn FnMut(&'a Node, &mut S, Option<&str>) -> Step,
}

impl<'c, 'a, S> Walk<'c, 'a, S> {
    pub fn new(next: &'c mut dyn FnMut(&'a Node, &mut S, Option<&str>) -> Step) -> Self {
        Self { next }
    }

    /// Walks `node` under its own type.
    pub fn visit(&mut self, node: &'a Node, st: &mut S) -> Step {
        (self.next)(node, st, None)
    }

    /// Walks `node` under `kind` instead of its own type.
    pub fn visit_as(&mut self, node: &'a Node, st: &mut S, kind: &str) -> Step {
        (self.next)(node, st, Some(kind))
    }

    /// Walks `node` under `kind` when given, else under its own type.
    pub fn visit_with(&mut self, node: &'a Node, st: &mut S, kind: Option<&str>) -> Step {
        (self.next)(node, st, kind)
    }
}

/// A walk rule as a plain function pointer. Every base rule has this type.
pub type RuleFn<S> = for<'a, 'c> fn(&'a Node, &mut S, &mut Walk<'c, 'a, S>) -> Step;

/// A caller-supplied walk rule.
pub type BoxedRule<'r, S> =
    Box<dyn for<'a, 'c> Fn(&'a Node, &mut S, &mut Walk<'c, 'a, S>) -> Step + Send + Sync + 'r>;

/// Lookup from type name to walk rule.
///
/// Registries are read-only once built and can be shared by any number of
/// walks at once.
pub trait Registry<S> {
    /// Runs the rule for `kind` on `node`.
    ///
    /// Fails with [`WalkError::UnknownKind`](crate::WalkError::UnknownKind)
    /// when there is no such rule.
    fn dispatch<'a>(
        &self,
        kind: &str,
        node: &'a Node,
        st: &mut S,
        walk: &mut Walk<'_, 'a, S>,
    ) -> Step;

    /// Returns true if `kind` has a rule.
    fn handles(&self, kind: &str) -> bool;
}

impl<S, R: Registry<S> + ?Sized> Registry<S> for &R {
    fn dispatch<'a>(
        &self,
        kind: &str,
        node: &'a Node,
        st: &mut S,
        walk: &mut Walk<'_, 'a, S>,
    ) -> Step {
        (**self).dispatch(kind, node, st, walk)
    }

    fn handles(&self, kind: &str) -> bool {
        (**self).handles(kind)
    }
}

/// A set of caller rules keyed by type name.
pub struct Rules<'r, S> {
    map: HashMap<String, BoxedRule<'r, S>>,
}

impl<'r, S> Rules<'r, S> {
    pub fn new() -> Self {
        Self {
            map: HashMap::new(),
        }
    }

    /// Builder form of [`insert`](Self::insert).
    #[must_use]
    pub fn on<F>(mut self, kind: impl Into<String>, rule: F) -> Self
    where
        F: for<'a, 'c> Fn(&'a Node, &mut S, &mut Walk<'c, 'a, S>) -> Step + Send + Sync + 'r,
    {
        self.insert(kind, rule);
        self
    }

    /// Registers `rule` for `kind`, replacing any earlier rule for it.
    pub fn insert<F>(&mut self, kind: impl Into<String>, rule: F)
    where
        F: for<'a, 'c> Fn(&'a Node, &mut S, &mut Walk<'c, 'a, S>) -> Step + Send + Sync + 'r,
    {
        self.map.insert(kind.into(), Box::new(rule));
    }

    pub fn contains(&self, kind: &str) -> bool {
        self.map.contains_key(kind)
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl<S> Default for Rules<'_, S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> fmt::Debug for Rules<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut kinds: Vec<_> = self.map.keys().collect();
        kinds.sort();
        f.debug_struct("Rules").field("kinds", &kinds).finish()
    }
}

/// Caller rules layered over a base registry.
///
/// Lookups check the caller rules first and fall through to the base for
/// everything else, categories included. The base is never modified; deriving
/// from a `Derived` stacks another layer.
pub struct Derived<'r, S, B> {
    rules: Rules<'r, S>,
    base: B,
}

impl<'r, S, B> Derived<'r, S, B> {
    pub fn base(&self) -> &B {
        &self.base
    }

    pub fn rules(&self) -> &Rules<'r, S> {
        &self.rules
    }
}

impl<S, B: Registry<S>> Registry<S> for Derived<'_, S, B> {
    fn dispatch<'a>(
        &self,
        kind: &str,
        node: &'a Node,
        st: &mut S,
        walk: &mut Walk<'_, 'a, S>,
    ) -> Step {
        match self.rules.map.get(kind) {
            Some(rule) => rule(node, st, walk),
            None => self.base.dispatch(kind, node, st, walk),
        }
    }

    fn handles(&self, kind: &str) -> bool {
        self.rules.contains(kind) || self.base.handles(kind)
    }
}

impl<S, B: fmt::Debug> fmt::Debug for Derived<'_, S, B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Derived")
            .field("rules", &self.rules)
            .field("base", &self.base)
            .finish()
    }
}

/// Builds a registry that overlays `rules` on `base`.
pub fn make<'r, S, B: Registry<S>>(rules: Rules<'r, S>, base: B) -> Derived<'r, S, B> {
    Derived { rules, base }
}
