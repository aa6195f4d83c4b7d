// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Walks and searches over ESTree JSON fixtures.

#![recursion_limit = "256"]

use std::collections::{HashMap, HashSet};

use estwalk_core::{Node, NodeError};
use estwalk_visit::{
    ancestor, category, find_node_after, find_node_around, find_node_at, find_node_before, full,
    full_ancestor, recursive, simple, AncestorVisitors, Base, NodeTest, Rules, Visitors,
    WalkError,
};
use serde_json::{json, Value};

fn tree(value: Value) -> Node {
    serde_json::from_value(value).expect("fixture should deserialize")
}

fn id(name: &str, start: usize) -> Value {
    json!({"type": "Identifier", "start": start, "end": start + name.len(), "name": name})
}

fn addr(node: &Node) -> usize {
    node as *const Node as usize
}

// ============================================================================
// Fixtures
// ============================================================================

/// ```js
/// function f(a, b = 1) { if (a) { return [a, , b]; } else throw new Error(`x${b}`); }
/// ```
fn function_fixture() -> Node {
    tree(json!({
        "type": "Program", "start": 0, "end": 86, "sourceType": "script",
        "body": [{
            "type": "FunctionDeclaration", "start": 0, "end": 86,
            "id": id("f", 9),
            "params": [
                id("a", 11),
                {"type": "AssignmentPattern", "start": 14, "end": 19,
                 "left": id("b", 14),
                 "right": {"type": "Literal", "start": 18, "end": 19, "value": 1, "raw": "1"}}
            ],
            "generator": false, "async": false, "expression": false,
            "body": {
                "type": "BlockStatement", "start": 21, "end": 86,
                "body": [{
                    "type": "IfStatement", "start": 23, "end": 84,
                    "test": id("a", 27),
                    "consequent": {
                        "type": "BlockStatement", "start": 30, "end": 50,
                        "body": [{
                            "type": "ReturnStatement", "start": 32, "end": 48,
                            "argument": {
                                "type": "ArrayExpression", "start": 39, "end": 47,
                                "elements": [id("a", 40), null, id("b", 45)]
                            }
                        }]
                    },
                    "alternate": {
                        "type": "ThrowStatement", "start": 56, "end": 84,
                        "argument": {
                            "type": "NewExpression", "start": 62, "end": 83,
                            "callee": id("Error", 66),
                            "arguments": [{
                                "type": "TemplateLiteral", "start": 72, "end": 82,
                                "quasis": [
                                    {"type": "TemplateElement", "start": 73, "end": 74,
                                     "value": {"raw": "x", "cooked": "x"}, "tail": false},
                                    {"type": "TemplateElement", "start": 78, "end": 78,
                                     "value": {"raw": "", "cooked": ""}, "tail": true}
                                ],
                                "expressions": [id("b", 76)]
                            }]
                        }
                    }
                }]
            }
        }]
    }))
}

/// ```js
/// f(a, bcde, g);
/// ```
fn call_fixture() -> Node {
    tree(json!({
        "type": "Program", "start": 0, "end": 14, "sourceType": "script",
        "body": [{
            "type": "ExpressionStatement", "start": 0, "end": 14,
            "expression": {
                "type": "CallExpression", "start": 0, "end": 13, "optional": false,
                "callee": id("f", 0),
                "arguments": [id("a", 2), id("bcde", 5), id("g", 11)]
            }
        }]
    }))
}

/// ```js
/// f(g(x), y)
/// ```
fn nested_call_fixture() -> Node {
    tree(json!({
        "type": "CallExpression", "start": 0, "end": 10, "optional": false,
        "callee": id("f", 0),
        "arguments": [
            {"type": "CallExpression", "start": 2, "end": 6, "optional": false,
             "callee": id("g", 2), "arguments": [id("x", 4)]},
            id("y", 8)
        ]
    }))
}

/// ```js
/// abcd; bcdef; ghijkl;
/// ```
fn statements_fixture() -> Node {
    let stmt = |name: &str, start: usize| {
        json!({"type": "ExpressionStatement", "start": start, "end": start + name.len() + 1,
               "expression": id(name, start)})
    };
    tree(json!({
        "type": "Program", "start": 0, "end": 20, "sourceType": "script",
        "body": [stmt("abcd", 0), stmt("bcdef", 6), stmt("ghijkl", 13)]
    }))
}

/// Every node reachable through fields, with its depth (root = 1).
fn depths(node: &Node, depth: usize, out: &mut HashMap<usize, usize>) {
    out.insert(addr(node), depth);
    for field in node.fields.values() {
        match field {
            estwalk_core::Field::Node(child) => depths(child, depth + 1, out),
            estwalk_core::Field::List(items) => {
                for child in items.iter().flatten() {
                    depths(child, depth + 1, out);
                }
            }
            estwalk_core::Field::Value(_) => {}
        }
    }
}

fn every_label() -> impl Iterator<Item = &'static str> {
    Base::NODE_KINDS.iter().chain(category::ALL).copied()
}

// ============================================================================
// simple / ancestor / recursive
// ============================================================================

#[test]
fn simple_visits_each_dispatch_once_children_first() {
    let program = function_fixture();

    let mut visitors = Visitors::new();
    for label in every_label() {
        visitors.insert(label, move |n: &Node, seen: &mut Vec<(usize, &'static str)>| {
            seen.push((addr(n), label))
        });
    }
    let mut seen = Vec::new();
    simple(&program, &mut visitors, &mut seen).unwrap();

    let unique: HashSet<_> = seen.iter().collect();
    assert_eq!(unique.len(), seen.len(), "a (node, type) pair fired twice");

    // The root fires last, after everything below it.
    assert_eq!(seen.last(), Some(&(addr(&program), "Program")));

    // Every node fires after all of its descendants.
    let mut chains: Vec<(usize, Vec<usize>)> = Vec::new();
    full_ancestor(
        &program,
        |n, chains: &mut Vec<(usize, Vec<usize>)>, chain, _| {
            chains.push((addr(n), chain.iter().map(|a| addr(a)).collect()))
        },
        &mut chains,
    )
    .unwrap();
    let first = |node: usize| seen.iter().position(|(a, _)| *a == node).unwrap();
    let last = |node: usize| seen.iter().rposition(|(a, _)| *a == node).unwrap();
    for (node, chain) in &chains {
        for outer in &chain[..chain.len() - 1] {
            assert!(last(*node) < first(*outer));
        }
    }

    // The array hole is skipped; both `b` references and the template text are reached.
    let identifiers = seen.iter().filter(|(_, label)| *label == "Identifier").count();
    assert_eq!(identifiers, 8);
    assert_eq!(seen.iter().filter(|(_, l)| *l == "TemplateElement").count(), 2);
}

#[test]
fn ancestor_chain_length_is_depth() {
    let program = function_fixture();
    let mut expected = HashMap::new();
    depths(&program, 1, &mut expected);

    let mut visitors = AncestorVisitors::new();
    for label in every_label() {
        visitors.insert(label, |n: &Node, checked: &mut usize, chain: &[&Node]| {
            assert!(std::ptr::eq(*chain.last().unwrap(), n));
            *checked += 1;
        });
    }
    let mut checked = 0;
    ancestor(&program, &mut visitors, &mut checked).unwrap();
    assert!(checked > 0);

    let mut lengths = Vec::new();
    full_ancestor(
        &program,
        |n, lengths: &mut Vec<(usize, usize)>, chain, _| lengths.push((addr(n), chain.len())),
        &mut lengths,
    )
    .unwrap();
    for (node, len) in lengths {
        assert_eq!(expected[&node], len);
    }
}

#[test]
fn recursive_skips_branches_the_rule_does_not_continue_into() {
    let program = tree(json!({
        "type": "Program", "start": 0, "end": 40, "sourceType": "script",
        "body": [{
            "type": "IfStatement", "start": 0, "end": 40,
            "test": id("cond", 4),
            "consequent": {"type": "ExpressionStatement", "start": 10, "end": 15,
                           "expression": id("kept", 10)},
            "alternate": {"type": "ExpressionStatement", "start": 21, "end": 40,
                          "expression": {"type": "CallExpression", "start": 21, "end": 39,
                                         "callee": id("skipped", 21),
                                         "arguments": [id("deeper", 29)]}}
        }]
    }));

    let rules = Rules::new()
        .on("IfStatement", |node, names: &mut Vec<String>, walk| {
            walk.visit_as(node.child("test")?, names, category::EXPRESSION)?;
            walk.visit_as(node.child("consequent")?, names, category::STATEMENT)
        })
        .on("Identifier", |node, names, _| {
            names.extend(node.str_value("name").map(str::to_string));
            Ok(())
        });
    let mut names = Vec::new();
    recursive(&program, &mut names, rules).unwrap();
    assert_eq!(names, ["cond", "kept"]);
}

#[test]
fn full_counts_node_types() {
    let mut counts: HashMap<String, usize> = HashMap::new();
    full(
        &call_fixture(),
        |_, counts: &mut HashMap<String, usize>, kind| {
            *counts.entry(kind.to_string()).or_default() += 1
        },
        &mut counts,
    )
    .unwrap();
    assert_eq!(counts["Identifier"], 4);
    assert_eq!(counts["CallExpression"], 1);
    assert_eq!(counts["Program"], 1);
    assert!(!counts.contains_key(category::EXPRESSION));
}

// ============================================================================
// find*
// ============================================================================

#[test]
fn find_node_at_exact_bounds() {
    let program = call_fixture();
    let found = find_node_at(&program, Some(5), Some(9), "Identifier", ())
        .unwrap()
        .expect("bcde");
    assert_eq!((found.node.start, found.node.end), (5, 9));
    assert_eq!(found.node.str_value("name"), Some("bcde"));

    assert!(find_node_at(&program, Some(5), Some(8), "Identifier", ())
        .unwrap()
        .is_none());
}

#[test]
fn find_node_around_prefers_inner_call() {
    let outer = nested_call_fixture();
    let found = find_node_around(&outer, 4, "CallExpression", ())
        .unwrap()
        .expect("inner call");
    assert_eq!((found.node.start, found.node.end), (2, 6));

    let found = find_node_around(&outer, 8, "CallExpression", ())
        .unwrap()
        .expect("outer call");
    assert_eq!((found.node.start, found.node.end), (0, 10));
}

#[test]
fn find_node_before_keeps_largest_end() {
    let program = statements_fixture();
    let found = find_node_before(&program, 15, category::STATEMENT, ())
        .unwrap()
        .expect("statement");
    assert_eq!((found.node.start, found.node.end), (6, 12));

    assert!(find_node_before(&program, 3, category::STATEMENT, ())
        .unwrap()
        .is_none());
}

#[test]
fn find_node_after_outermost_first() {
    let program = statements_fixture();
    let found = find_node_after(&program, 6, NodeTest::Any, ())
        .unwrap()
        .expect("second statement");
    assert_eq!(found.node.kind, "ExpressionStatement");
    assert_eq!(found.node.start, 6);

    let found = find_node_after(&program, 6, "Identifier", ())
        .unwrap()
        .expect("identifier");
    assert_eq!(found.node.str_value("name"), Some("bcdef"));

    assert!(find_node_after(&program, 21, NodeTest::Any, ())
        .unwrap()
        .is_none());
}

#[test]
fn find_with_predicate() {
    let program = call_fixture();
    let long_name = |_: &str, n: &Node| n.str_value("name").is_some_and(|s| s.len() > 1);
    let found = find_node_after(&program, 0, NodeTest::Matches(&long_name), ())
        .unwrap()
        .expect("bcde");
    assert_eq!(found.node.start, 5);
}

// ============================================================================
// Malformed trees
// ============================================================================

#[test]
fn missing_required_field_is_structural_failure() {
    let program = tree(json!({
        "type": "Program", "start": 0, "end": 6, "sourceType": "script",
        "body": [{"type": "IfStatement", "start": 0, "end": 6, "test": id("a", 4)}]
    }));
    let err = simple(&program, &mut Visitors::<()>::new(), &mut ()).unwrap_err();
    assert_eq!(
        err,
        WalkError::Node(NodeError::MissingField {
            kind: "IfStatement".to_string(),
            field: "consequent".to_string(),
        })
    );

    // Offset 5 is inside `a`, which matches before `consequent` is read.
    let found = find_node_around(&program, 5, NodeTest::Any, ())
        .unwrap()
        .expect("identifier");
    assert_eq!(found.node.kind, "Identifier");

    // Offset 6 skips `a`, so the search reaches the missing field and fails
    // instead of reporting "no match".
    assert_eq!(
        find_node_around(&program, 6, NodeTest::Any, ()).unwrap_err(),
        err
    );
}

#[test]
fn unknown_node_type_is_structural_failure() {
    let program = tree(json!({
        "type": "Program", "start": 0, "end": 5, "sourceType": "script",
        "body": [{"type": "JSXText", "start": 0, "end": 5}]
    }));
    let err = find_node_before(&program, 5, NodeTest::Any, ()).unwrap_err();
    assert_eq!(
        err,
        WalkError::UnknownKind {
            kind: "JSXText".to_string()
        }
    );
}
