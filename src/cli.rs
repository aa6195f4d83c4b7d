// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Command implementations for the `estwalk` binary.
//!
//! Each command takes an already loaded tree and returns its response value;
//! `main.rs` handles argument parsing and printing. Trees are read with
//! [`load_tree`] from a file path, or from stdin when the path is `-`.

use std::collections::BTreeMap;
use std::fs;
use std::io::{self, Read};

use clap::ValueEnum;
use estwalk_core::Node;
use serde::Deserialize;
use estwalk_visit::{
    find_node_after, find_node_around, find_node_at, find_node_before, full, full_ancestor,
    NodeTest,
};
use tracing::{debug, info};

use crate::error::CliError;
use crate::output::{AncestorsResponse, FindResponse, KindsResponse, NodeSummary};

/// Which search `estwalk find` runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum FindMode {
    /// Exact bounds: `--pos` is the start, `--end` the end (either may be omitted).
    At,
    /// Innermost node containing `--pos`.
    Around,
    /// Outermost node starting at or after `--pos`.
    After,
    /// Node ending at or before `--pos` with the largest end.
    Before,
}

impl FindMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            FindMode::At => "at",
            FindMode::Around => "around",
            FindMode::After => "after",
            FindMode::Before => "before",
        }
    }
}

/// Arguments of `estwalk find`.
#[derive(Debug, Clone)]
pub struct FindQuery {
    pub mode: FindMode,
    pub pos: Option<usize>,
    pub end: Option<usize>,
    pub kind: Option<String>,
}

/// Reads an ESTree JSON tree from `path`, or from stdin for `-`.
pub fn load_tree(path: &str) -> Result<Node, CliError> {
    let text = if path == "-" {
        let mut text = String::new();
        io::stdin()
            .read_to_string(&mut text)
            .map_err(|source| CliError::Read {
                path: "<stdin>".to_string(),
                source,
            })?;
        text
    } else {
        fs::read_to_string(path).map_err(|source| CliError::Read {
            path: path.to_string(),
            source,
        })?
    };
    let tree = parse_tree(&text).map_err(|source| CliError::Parse {
        path: path.to_string(),
        source,
    })?;
    info!(path, root = %tree.kind, "loaded tree");
    Ok(tree)
}

/// Stack reserved for deserializing a tree.
const PARSE_STACK: usize = 256 * 1024 * 1024;

/// Parses ESTree JSON without serde_json's nesting limit.
///
/// Every nesting level costs several deserializer frames, so the parse runs
/// on a dedicated stack segment instead of the caller's.
fn parse_tree(text: &str) -> serde_json::Result<Node> {
    stacker::grow(PARSE_STACK, || {
        let mut de = serde_json::Deserializer::from_str(text);
        de.disable_recursion_limit();
        let tree = Node::deserialize(&mut de)?;
        de.end()?;
        Ok(tree)
    })
}

/// Counts nodes by type.
pub fn run_kinds(tree: &Node) -> Result<KindsResponse, CliError> {
    let mut kinds = BTreeMap::new();
    full(
        tree,
        |_, kinds: &mut BTreeMap<String, usize>, kind| {
            *kinds.entry(kind.to_string()).or_default() += 1;
        },
        &mut kinds,
    )?;
    debug!(distinct = kinds.len(), "counted node types");
    Ok(KindsResponse::new(kinds))
}

/// Runs one of the position searches.
pub fn run_find(tree: &Node, query: &FindQuery) -> Result<FindResponse, CliError> {
    let test = NodeTest::from(query.kind.as_deref());
    let found = match query.mode {
        FindMode::At => {
            if query.pos.is_none() && query.end.is_none() {
                return Err(CliError::invalid_args(
                    "--mode at needs --pos, --end or both",
                ));
            }
            find_node_at(tree, query.pos, query.end, test, ())?
        }
        mode => {
            if query.end.is_some() {
                return Err(CliError::invalid_args(format!(
                    "--end only applies to --mode at, not --mode {}",
                    mode.as_str()
                )));
            }
            let pos = query.pos.ok_or_else(|| {
                CliError::invalid_args(format!("--mode {} needs --pos", mode.as_str()))
            })?;
            match mode {
                FindMode::Around => find_node_around(tree, pos, test, ())?,
                FindMode::After => find_node_after(tree, pos, test, ())?,
                _ => find_node_before(tree, pos, test, ())?,
            }
        }
    };
    let node = found.map(|found| NodeSummary::from(found.node));
    Ok(FindResponse::new(query.mode.as_str(), node))
}

/// Lists the chain of nodes from the root down to the innermost node that
/// contains `pos`. The chain is empty when the root does not contain `pos`.
pub fn run_ancestors(tree: &Node, pos: usize) -> Result<AncestorsResponse, CliError> {
    let mut deepest: Vec<NodeSummary> = Vec::new();
    full_ancestor(
        tree,
        |_, deepest: &mut Vec<NodeSummary>, chain, _| {
            if chain.len() > deepest.len() && chain.iter().all(|n| n.contains(pos)) {
                *deepest = chain.iter().map(|n| NodeSummary::from(*n)).collect();
            }
        },
        &mut deepest,
    )?;
    Ok(AncestorsResponse::new(pos, deepest))
}
