// Copyright (c) Ken Kocienda and other contributors.
//
// This source code is licensed under the MIT license found in the
// LICENSE file in the root directory of this source tree.

//! Builds a small tree the way a parser would and checks the metadata every
//! node ends up with.

use estwalk_core::{Cursor, Node, NodeFactory, ParseOptions, Position};

/// Token stream for `a + b;` on a single line.
const TOKENS: &[(usize, usize)] = &[(0, 1), (2, 3), (4, 5), (5, 6), (6, 6)];

struct MiniParser {
    factory: NodeFactory,
    cursor: Cursor,
    next: usize,
}

impl MiniParser {
    fn new(options: ParseOptions) -> Self {
        let mut parser = Self {
            factory: NodeFactory::new(options),
            cursor: Cursor::new(),
            next: 0,
        };
        parser.bump();
        parser
    }

    fn bump(&mut self) {
        let (start, end) = TOKENS[self.next.min(TOKENS.len() - 1)];
        self.cursor.advance(
            start,
            Position::new(1, start as u32),
            end,
            Position::new(1, end as u32),
        );
        self.next += 1;
    }

    fn ident(&mut self, name: &str) -> Node {
        let open = self.factory.start_node(&self.cursor).with("name", name);
        self.bump();
        self.factory.finish_node(&self.cursor, open, "Identifier")
    }

    fn program(&mut self) -> Node {
        let program = self.factory.start_node(&self.cursor);
        let statement = self.factory.start_node(&self.cursor);

        let left = self.ident("a");
        let binary = self
            .factory
            .start_node_at_node(&left)
            .expect("start at left operand")
            .with("left", left)
            .with("operator", "+");
        self.bump(); // +
        let right = self.ident("b");
        let binary = self
            .factory
            .finish_node(&self.cursor, binary.with("right", right), "BinaryExpression");

        self.bump(); // ;
        let statement = self.factory.finish_node(
            &self.cursor,
            statement.with("expression", binary),
            "ExpressionStatement",
        );
        self.factory.finish_node(
            &self.cursor,
            program
                .with("body", vec![statement])
                .with("sourceType", "script"),
            "Program",
        )
    }
}

fn assert_closed(node: &Node) {
    assert!(node.start <= node.end, "{} has start > end", node.kind);
    assert_eq!(node.range, Some([node.start, node.end]), "{}", node.kind);
    let loc = node.loc.as_ref().expect("loc");
    assert_eq!(loc.start.column as usize, node.start);
    assert_eq!(loc.end.column as usize, node.end);
}

#[test]
fn parser_built_tree_has_consistent_offsets() {
    let mut parser = MiniParser::new(ParseOptions::new().with_locations(true).with_ranges(true));
    let program = parser.program();

    assert_eq!((program.start, program.end), (0, 6));
    assert_closed(&program);

    let statement = program.children("body").unwrap().next().unwrap().unwrap();
    assert_eq!((statement.start, statement.end), (0, 6));
    assert_closed(statement);

    let binary = statement.child("expression").unwrap();
    assert_eq!(binary.kind, "BinaryExpression");
    assert_eq!((binary.start, binary.end), (0, 5));
    assert_closed(binary);

    for (field, span) in [("left", (0, 1)), ("right", (4, 5))] {
        let operand = binary.child(field).unwrap();
        assert_eq!((operand.start, operand.end), span);
        assert_closed(operand);
        assert!(binary.start <= operand.start && operand.end <= binary.end);
    }
}

#[test]
fn parser_built_tree_serializes_as_estree() {
    let mut parser = MiniParser::new(ParseOptions::new().with_ranges(true));
    let program = parser.program();

    let json = serde_json::to_value(&program).unwrap();
    assert_eq!(json["type"], "Program");
    assert_eq!(json["range"], serde_json::json!([0, 6]));
    assert!(json.get("loc").is_none());
    assert_eq!(json["body"][0]["expression"]["operator"], "+");
    assert_eq!(json["body"][0]["expression"]["right"]["name"], "b");

    let back: Node = serde_json::from_value(json).unwrap();
    assert_eq!(back, program);
}
