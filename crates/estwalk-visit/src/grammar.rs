// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! The base grammar: one walk rule per ESTree node type and per category.
//!
//! Each rule reports a node's children to the continuation in source order.
//! Most children are reported under a **category** rather than their own
//! type, so callers can hook every expression, every statement or every
//! binding pattern with a single entry:
//!
//! | Category | Routes to |
//! |----------|-----------|
//! | `Statement` | `Declaration` for declarations, otherwise the node's own type |
//! | `Declaration` | the node's own type |
//! | `ModuleDeclaration` | the node's own type |
//! | `Expression` | the node's own type |
//! | `Pattern` | `Expression` for identifiers and member targets, otherwise own type |
//! | `ForInit` | own type for a `VariableDeclaration`, otherwise `Expression` |
//! | `Function` | id (`Pattern`), params (`Pattern`), body (`ScopeBody`/`ScopeExpression`) |
//! | `Class` | id (`Pattern`), superclass (`Expression`), body |
//! | `ScopeBody` | `Statement` |
//! | `ScopeExpression` | `Expression` |
//!
//! A node re-dispatched through a category is the same node each time; only
//! the type label changes. Leaf types (identifiers, literals, template text,
//! `this`, `super`, jumps, `debugger`, empty statements) have rules that do
//! nothing. Optional children are skipped when absent; a missing required
//! child is a [`NodeError`](estwalk_core::NodeError) and ends the walk.

use estwalk_core::Node;

use crate::error::{Step, WalkError};
use crate::registry::{Registry, RuleFn, Walk};

use self::category::*;

/// Category names used by the base grammar.
pub mod category {
    pub const STATEMENT: &str = "Statement";
    pub const DECLARATION: &str = "Declaration";
    pub const MODULE_DECLARATION: &str = "ModuleDeclaration";
    pub const EXPRESSION: &str = "Expression";
    pub const PATTERN: &str = "Pattern";
    pub const FOR_INIT: &str = "ForInit";
    pub const FUNCTION: &str = "Function";
    pub const CLASS: &str = "Class";
    pub const SCOPE_BODY: &str = "ScopeBody";
    pub const SCOPE_EXPRESSION: &str = "ScopeExpression";

    pub const ALL: &[&str] = &[
        STATEMENT,
        DECLARATION,
        MODULE_DECLARATION,
        EXPRESSION,
        PATTERN,
        FOR_INIT,
        FUNCTION,
        CLASS,
        SCOPE_BODY,
        SCOPE_EXPRESSION,
    ];
}

/// The default registry: the full ESTree grammar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Base;

impl Base {
    /// Every concrete node type the base grammar knows.
    pub const NODE_KINDS: &'static [&'static str] = &[
        "Program",
        "BlockStatement",
        "StaticBlock",
        "EmptyStatement",
        "ExpressionStatement",
        "ParenthesizedExpression",
        "ChainExpression",
        "IfStatement",
        "LabeledStatement",
        "BreakStatement",
        "ContinueStatement",
        "WithStatement",
        "SwitchStatement",
        "SwitchCase",
        "ReturnStatement",
        "YieldExpression",
        "AwaitExpression",
        "ThrowStatement",
        "SpreadElement",
        "TryStatement",
        "CatchClause",
        "WhileStatement",
        "DoWhileStatement",
        "ForStatement",
        "ForInStatement",
        "ForOfStatement",
        "DebuggerStatement",
        "FunctionDeclaration",
        "FunctionExpression",
        "ArrowFunctionExpression",
        "VariableDeclaration",
        "VariableDeclarator",
        "RestElement",
        "ArrayPattern",
        "ObjectPattern",
        "AssignmentPattern",
        "ThisExpression",
        "Super",
        "MetaProperty",
        "ArrayExpression",
        "ObjectExpression",
        "SequenceExpression",
        "TemplateLiteral",
        "TemplateElement",
        "UnaryExpression",
        "UpdateExpression",
        "BinaryExpression",
        "LogicalExpression",
        "AssignmentExpression",
        "ConditionalExpression",
        "CallExpression",
        "NewExpression",
        "MemberExpression",
        "ExportNamedDeclaration",
        "ExportDefaultDeclaration",
        "ExportAllDeclaration",
        "ImportDeclaration",
        "ImportExpression",
        "ImportSpecifier",
        "ImportDefaultSpecifier",
        "ImportNamespaceSpecifier",
        "ExportSpecifier",
        "Identifier",
        "PrivateIdentifier",
        "Literal",
        "TaggedTemplateExpression",
        "ClassDeclaration",
        "ClassExpression",
        "ClassBody",
        "MethodDefinition",
        "PropertyDefinition",
        "Property",
    ];

    /// The base rule for a node type or category.
    pub fn rule<S>(kind: &str) -> Option<RuleFn<S>> {
        let rule: RuleFn<S> = match kind {
            // Categories
            STATEMENT => statement,
            DECLARATION | MODULE_DECLARATION | EXPRESSION => skip_through,
            PATTERN => pattern,
            FOR_INIT => for_init,
            FUNCTION => function,
            CLASS => class,
            SCOPE_BODY => scope_body,
            SCOPE_EXPRESSION => scope_expression,

            // Statements
            "Program" => program,
            "BlockStatement" | "StaticBlock" => block,
            "ExpressionStatement" | "ParenthesizedExpression" | "ChainExpression" => {
                expression_of
            }
            "IfStatement" => if_statement,
            "LabeledStatement" => labeled,
            "WithStatement" => with_statement,
            "SwitchStatement" => switch_statement,
            "SwitchCase" => switch_case,
            "ReturnStatement" | "YieldExpression" | "AwaitExpression" => optional_argument,
            "ThrowStatement" | "SpreadElement" => argument,
            "TryStatement" => try_statement,
            "CatchClause" => catch_clause,
            "WhileStatement" | "DoWhileStatement" => while_loop,
            "ForStatement" => for_statement,
            "ForInStatement" | "ForOfStatement" => for_in,

            // Declarations
            "FunctionDeclaration" | "FunctionExpression" | "ArrowFunctionExpression" => {
                as_function
            }
            "VariableDeclaration" => variable_declaration,
            "VariableDeclarator" => variable_declarator,
            "ClassDeclaration" | "ClassExpression" => as_class,
            "ClassBody" => class_body,
            "MethodDefinition" | "PropertyDefinition" | "Property" => property,

            // Patterns
            "RestElement" => rest_element,
            "ArrayPattern" => array_pattern,
            "ObjectPattern" => object_pattern,
            "AssignmentPattern" | "AssignmentExpression" => assignment,

            // Expressions
            "ArrayExpression" => array_expression,
            "ObjectExpression" => object_expression,
            "SequenceExpression" => sequence,
            "TemplateLiteral" => template_literal,
            "UnaryExpression" | "UpdateExpression" => operand,
            "BinaryExpression" | "LogicalExpression" => binary,
            "ConditionalExpression" => conditional,
            "CallExpression" | "NewExpression" => call,
            "MemberExpression" => member,
            "TaggedTemplateExpression" => tagged_template,

            // Modules
            "ExportNamedDeclaration" | "ExportDefaultDeclaration" => export_declaration,
            "ExportAllDeclaration" => export_all,
            "ImportDeclaration" => import_declaration,
            "ImportExpression" => import_expression,

            // Leaves
            "EmptyStatement"
            | "BreakStatement"
            | "ContinueStatement"
            | "DebuggerStatement"
            | "ThisExpression"
            | "Super"
            | "MetaProperty"
            | "TemplateElement"
            | "ImportSpecifier"
            | "ImportDefaultSpecifier"
            | "ImportNamespaceSpecifier"
            | "ExportSpecifier"
            | "Identifier"
            | "PrivateIdentifier"
            | "Literal" => ignore,

            _ => return None,
        };
        Some(rule)
    }
}

impl<S> Registry<S> for Base {
    fn dispatch<'a>(
        &self,
        kind: &str,
        node: &'a Node,
        st: &mut S,
        walk: &mut Walk<'_, 'a, S>,
    ) -> Step {
        match Base::rule::<S>(kind) {
            Some(rule) => rule(node, st, walk),
            None => Err(WalkError::UnknownKind {
                kind: kind.to_string(),
            }
            .into()),
        }
    }

    fn handles(&self, kind: &str) -> bool {
        Base::rule::<()>(kind).is_some()
    }
}

fn is_declaration(node: &Node) -> bool {
    matches!(
        node.kind.as_str(),
        "FunctionDeclaration" | "VariableDeclaration" | "ClassDeclaration"
    )
}

fn is_module_declaration(node: &Node) -> bool {
    matches!(
        node.kind.as_str(),
        "ImportDeclaration"
            | "ExportNamedDeclaration"
            | "ExportDefaultDeclaration"
            | "ExportAllDeclaration"
    )
}

// ============================================================================
// Shared rules
// ============================================================================

fn skip_through<'a, S>(node: &'a Node, st: &mut S, c: &mut Walk<'_, 'a, S>) -> Step {
    c.visit(node, st)
}

fn ignore<'a, S>(_node: &'a Node, _st: &mut S, _c: &mut Walk<'_, 'a, S>) -> Step {
    Ok(())
}

fn statement<'a, S>(node: &'a Node, st: &mut S, c: &mut Walk<'_, 'a, S>) -> Step {
    if is_declaration(node) {
        c.visit_as(node, st, DECLARATION)
    } else {
        c.visit(node, st)
    }
}

fn pattern<'a, S>(node: &'a Node, st: &mut S, c: &mut Walk<'_, 'a, S>) -> Step {
    match node.kind.as_str() {
        "Identifier" | "MemberExpression" => c.visit_as(node, st, EXPRESSION),
        _ => c.visit(node, st),
    }
}

fn scope_body<'a, S>(node: &'a Node, st: &mut S, c: &mut Walk<'_, 'a, S>) -> Step {
    c.visit_as(node, st, STATEMENT)
}

fn scope_expression<'a, S>(node: &'a Node, st: &mut S, c: &mut Walk<'_, 'a, S>) -> Step {
    c.visit_as(node, st, EXPRESSION)
}

fn expression_of<'a, S>(node: &'a Node, st: &mut S, c: &mut Walk<'_, 'a, S>) -> Step {
    c.visit_as(node.child("expression")?, st, EXPRESSION)
}

fn argument<'a, S>(node: &'a Node, st: &mut S, c: &mut Walk<'_, 'a, S>) -> Step {
    c.visit_as(node.child("argument")?, st, EXPRESSION)
}

fn optional_argument<'a, S>(node: &'a Node, st: &mut S, c: &mut Walk<'_, 'a, S>) -> Step {
    if let Some(arg) = node.opt_child("argument")? {
        c.visit_as(arg, st, EXPRESSION)?;
    }
    Ok(())
}

// ============================================================================
// Statements
// ============================================================================

fn program<'a, S>(node: &'a Node, st: &mut S, c: &mut Walk<'_, 'a, S>) -> Step {
    for stmt in node.children("body")? {
        let stmt = stmt?;
        let kind = if is_module_declaration(stmt) {
            MODULE_DECLARATION
        } else {
            STATEMENT
        };
        c.visit_as(stmt, st, kind)?;
    }
    Ok(())
}

fn block<'a, S>(node: &'a Node, st: &mut S, c: &mut Walk<'_, 'a, S>) -> Step {
    for stmt in node.children("body")? {
        c.visit_as(stmt?, st, STATEMENT)?;
    }
    Ok(())
}

fn if_statement<'a, S>(node: &'a Node, st: &mut S, c: &mut Walk<'_, 'a, S>) -> Step {
    c.visit_as(node.child("test")?, st, EXPRESSION)?;
    c.visit_as(node.child("consequent")?, st, STATEMENT)?;
    if let Some(alternate) = node.opt_child("alternate")? {
        c.visit_as(alternate, st, STATEMENT)?;
    }
    Ok(())
}

fn labeled<'a, S>(node: &'a Node, st: &mut S, c: &mut Walk<'_, 'a, S>) -> Step {
    c.visit_as(node.child("body")?, st, STATEMENT)
}

fn with_statement<'a, S>(node: &'a Node, st: &mut S, c: &mut Walk<'_, 'a, S>) -> Step {
    c.visit_as(node.child("object")?, st, EXPRESSION)?;
    c.visit_as(node.child("body")?, st, STATEMENT)
}

fn switch_statement<'a, S>(node: &'a Node, st: &mut S, c: &mut Walk<'_, 'a, S>) -> Step {
    c.visit_as(node.child("discriminant")?, st, EXPRESSION)?;
    for case in node.children("cases")? {
        c.visit(case?, st)?;
    }
    Ok(())
}

fn switch_case<'a, S>(node: &'a Node, st: &mut S, c: &mut Walk<'_, 'a, S>) -> Step {
    if let Some(test) = node.opt_child("test")? {
        c.visit_as(test, st, EXPRESSION)?;
    }
    for stmt in node.children("consequent")? {
        c.visit_as(stmt?, st, STATEMENT)?;
    }
    Ok(())
}

fn try_statement<'a, S>(node: &'a Node, st: &mut S, c: &mut Walk<'_, 'a, S>) -> Step {
    c.visit_as(node.child("block")?, st, STATEMENT)?;
    if let Some(handler) = node.opt_child("handler")? {
        c.visit(handler, st)?;
    }
    if let Some(finalizer) = node.opt_child("finalizer")? {
        c.visit_as(finalizer, st, STATEMENT)?;
    }
    Ok(())
}

fn catch_clause<'a, S>(node: &'a Node, st: &mut S, c: &mut Walk<'_, 'a, S>) -> Step {
    if let Some(param) = node.opt_child("param")? {
        c.visit_as(param, st, PATTERN)?;
    }
    c.visit_as(node.child("body")?, st, SCOPE_BODY)
}

fn while_loop<'a, S>(node: &'a Node, st: &mut S, c: &mut Walk<'_, 'a, S>) -> Step {
    c.visit_as(node.child("test")?, st, EXPRESSION)?;
    c.visit_as(node.child("body")?, st, STATEMENT)
}

fn for_statement<'a, S>(node: &'a Node, st: &mut S, c: &mut Walk<'_, 'a, S>) -> Step {
    if let Some(init) = node.opt_child("init")? {
        c.visit_as(init, st, FOR_INIT)?;
    }
    if let Some(test) = node.opt_child("test")? {
        c.visit_as(test, st, EXPRESSION)?;
    }
    if let Some(update) = node.opt_child("update")? {
        c.visit_as(update, st, EXPRESSION)?;
    }
    c.visit_as(node.child("body")?, st, STATEMENT)
}

fn for_in<'a, S>(node: &'a Node, st: &mut S, c: &mut Walk<'_, 'a, S>) -> Step {
    c.visit_as(node.child("left")?, st, FOR_INIT)?;
    c.visit_as(node.child("right")?, st, EXPRESSION)?;
    c.visit_as(node.child("body")?, st, STATEMENT)
}

fn for_init<'a, S>(node: &'a Node, st: &mut S, c: &mut Walk<'_, 'a, S>) -> Step {
    if node.is("VariableDeclaration") {
        c.visit(node, st)
    } else {
        c.visit_as(node, st, EXPRESSION)
    }
}

// ============================================================================
// Declarations, functions and classes
// ============================================================================

fn as_function<'a, S>(node: &'a Node, st: &mut S, c: &mut Walk<'_, 'a, S>) -> Step {
    c.visit_as(node, st, FUNCTION)
}

fn function<'a, S>(node: &'a Node, st: &mut S, c: &mut Walk<'_, 'a, S>) -> Step {
    if let Some(id) = node.opt_child("id")? {
        c.visit_as(id, st, PATTERN)?;
    }
    for param in node.children("params")? {
        c.visit_as(param?, st, PATTERN)?;
    }
    let body = node.child("body")?;
    let kind = if body.is("BlockStatement") {
        SCOPE_BODY
    } else {
        SCOPE_EXPRESSION
    };
    c.visit_as(body, st, kind)
}

fn variable_declaration<'a, S>(node: &'a Node, st: &mut S, c: &mut Walk<'_, 'a, S>) -> Step {
    for decl in node.children("declarations")? {
        c.visit(decl?, st)?;
    }
    Ok(())
}

fn variable_declarator<'a, S>(node: &'a Node, st: &mut S, c: &mut Walk<'_, 'a, S>) -> Step {
    c.visit_as(node.child("id")?, st, PATTERN)?;
    if let Some(init) = node.opt_child("init")? {
        c.visit_as(init, st, EXPRESSION)?;
    }
    Ok(())
}

fn as_class<'a, S>(node: &'a Node, st: &mut S, c: &mut Walk<'_, 'a, S>) -> Step {
    c.visit_as(node, st, CLASS)
}

fn class<'a, S>(node: &'a Node, st: &mut S, c: &mut Walk<'_, 'a, S>) -> Step {
    if let Some(id) = node.opt_child("id")? {
        c.visit_as(id, st, PATTERN)?;
    }
    if let Some(super_class) = node.opt_child("superClass")? {
        c.visit_as(super_class, st, EXPRESSION)?;
    }
    c.visit(node.child("body")?, st)
}

fn class_body<'a, S>(node: &'a Node, st: &mut S, c: &mut Walk<'_, 'a, S>) -> Step {
    for element in node.children("body")? {
        c.visit(element?, st)?;
    }
    Ok(())
}

fn property<'a, S>(node: &'a Node, st: &mut S, c: &mut Walk<'_, 'a, S>) -> Step {
    if node.flag("computed") {
        c.visit_as(node.child("key")?, st, EXPRESSION)?;
    }
    if let Some(value) = node.opt_child("value")? {
        c.visit_as(value, st, EXPRESSION)?;
    }
    Ok(())
}

// ============================================================================
// Patterns
// ============================================================================

fn rest_element<'a, S>(node: &'a Node, st: &mut S, c: &mut Walk<'_, 'a, S>) -> Step {
    c.visit_as(node.child("argument")?, st, PATTERN)
}

fn array_pattern<'a, S>(node: &'a Node, st: &mut S, c: &mut Walk<'_, 'a, S>) -> Step {
    for element in node.elements("elements")? {
        c.visit_as(element, st, PATTERN)?;
    }
    Ok(())
}

fn object_pattern<'a, S>(node: &'a Node, st: &mut S, c: &mut Walk<'_, 'a, S>) -> Step {
    for prop in node.children("properties")? {
        let prop = prop?;
        match prop.kind.as_str() {
            "Property" => {
                if prop.flag("computed") {
                    c.visit_as(prop.child("key")?, st, EXPRESSION)?;
                }
                c.visit_as(prop.child("value")?, st, PATTERN)?;
            }
            "RestElement" => c.visit_as(prop.child("argument")?, st, PATTERN)?,
            _ => {}
        }
    }
    Ok(())
}

fn assignment<'a, S>(node: &'a Node, st: &mut S, c: &mut Walk<'_, 'a, S>) -> Step {
    c.visit_as(node.child("left")?, st, PATTERN)?;
    c.visit_as(node.child("right")?, st, EXPRESSION)
}

// ============================================================================
// Expressions
// ============================================================================

fn array_expression<'a, S>(node: &'a Node, st: &mut S, c: &mut Walk<'_, 'a, S>) -> Step {
    for element in node.elements("elements")? {
        c.visit_as(element, st, EXPRESSION)?;
    }
    Ok(())
}

fn object_expression<'a, S>(node: &'a Node, st: &mut S, c: &mut Walk<'_, 'a, S>) -> Step {
    for prop in node.children("properties")? {
        c.visit(prop?, st)?;
    }
    Ok(())
}

fn sequence<'a, S>(node: &'a Node, st: &mut S, c: &mut Walk<'_, 'a, S>) -> Step {
    for expr in node.children("expressions")? {
        c.visit_as(expr?, st, EXPRESSION)?;
    }
    Ok(())
}

fn template_literal<'a, S>(node: &'a Node, st: &mut S, c: &mut Walk<'_, 'a, S>) -> Step {
    for quasi in node.children("quasis")? {
        c.visit(quasi?, st)?;
    }
    for expr in node.children("expressions")? {
        c.visit_as(expr?, st, EXPRESSION)?;
    }
    Ok(())
}

fn operand<'a, S>(node: &'a Node, st: &mut S, c: &mut Walk<'_, 'a, S>) -> Step {
    c.visit_as(node.child("argument")?, st, EXPRESSION)
}

fn binary<'a, S>(node: &'a Node, st: &mut S, c: &mut Walk<'_, 'a, S>) -> Step {
    c.visit_as(node.child("left")?, st, EXPRESSION)?;
    c.visit_as(node.child("right")?, st, EXPRESSION)
}

fn conditional<'a, S>(node: &'a Node, st: &mut S, c: &mut Walk<'_, 'a, S>) -> Step {
    c.visit_as(node.child("test")?, st, EXPRESSION)?;
    c.visit_as(node.child("consequent")?, st, EXPRESSION)?;
    c.visit_as(node.child("alternate")?, st, EXPRESSION)
}

fn call<'a, S>(node: &'a Node, st: &mut S, c: &mut Walk<'_, 'a, S>) -> Step {
    c.visit_as(node.child("callee")?, st, EXPRESSION)?;
    for arg in node.opt_children("arguments")? {
        c.visit_as(arg?, st, EXPRESSION)?;
    }
    Ok(())
}

fn member<'a, S>(node: &'a Node, st: &mut S, c: &mut Walk<'_, 'a, S>) -> Step {
    c.visit_as(node.child("object")?, st, EXPRESSION)?;
    if node.flag("computed") {
        c.visit_as(node.child("property")?, st, EXPRESSION)?;
    }
    Ok(())
}

fn tagged_template<'a, S>(node: &'a Node, st: &mut S, c: &mut Walk<'_, 'a, S>) -> Step {
    c.visit_as(node.child("tag")?, st, EXPRESSION)?;
    c.visit_as(node.child("quasi")?, st, EXPRESSION)
}

// ============================================================================
// Modules
// ============================================================================

fn export_declaration<'a, S>(node: &'a Node, st: &mut S, c: &mut Walk<'_, 'a, S>) -> Step {
    if let Some(decl) = node.opt_child("declaration")? {
        // `export default` of an anonymous function or class is an expression.
        let kind = if node.is("ExportNamedDeclaration") || decl.opt_child("id")?.is_some() {
            STATEMENT
        } else {
            EXPRESSION
        };
        c.visit_as(decl, st, kind)?;
    }
    if let Some(source) = node.opt_child("source")? {
        c.visit_as(source, st, EXPRESSION)?;
    }
    Ok(())
}

fn export_all<'a, S>(node: &'a Node, st: &mut S, c: &mut Walk<'_, 'a, S>) -> Step {
    if let Some(exported) = node.opt_child("exported")? {
        c.visit(exported, st)?;
    }
    c.visit_as(node.child("source")?, st, EXPRESSION)
}

fn import_declaration<'a, S>(node: &'a Node, st: &mut S, c: &mut Walk<'_, 'a, S>) -> Step {
    for spec in node.children("specifiers")? {
        c.visit(spec?, st)?;
    }
    c.visit_as(node.child("source")?, st, EXPRESSION)
}

fn import_expression<'a, S>(node: &'a Node, st: &mut S, c: &mut Walk<'_, 'a, S>) -> Step {
    c.visit_as(node.child("source")?, st, EXPRESSION)
}
