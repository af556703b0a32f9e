//! Property tests for the brace converter.

use gqls_syntax::{convert, convert_with_options, ConvertOptions};
use proptest::prelude::*;

/// A well-formed shorthand tree.
#[derive(Debug, Clone)]
enum Node {
    Leaf(String),
    /// A whitespace-only line at the current indentation.
    Blank,
    Block(String, Vec<Node>),
    List(String, Vec<Node>),
}

fn node() -> impl Strategy<Value = Node> {
    let leaf = prop_oneof![
        3 => "[a-z][a-zA-Z0-9_]{0,8}".prop_map(Node::Leaf),
        1 => Just(Node::Blank),
    ];
    leaf.prop_recursive(4, 48, 4, |inner| {
        prop_oneof![
            ("[a-z][a-z0-9]{0,8}", prop::collection::vec(inner.clone(), 0..4))
                .prop_map(|(name, children)| Node::Block(name, children)),
            ("[a-z][a-z0-9]{0,8}", prop::collection::vec(inner, 0..4))
                .prop_map(|(name, children)| Node::List(name, children)),
        ]
    })
}

/// Documents are trimmed as a whole, so they start and end on a leaf.
fn document() -> impl Strategy<Value = Vec<Node>> {
    prop::collection::vec(node(), 1..5).prop_map(|nodes| {
        let mut document = vec![Node::Leaf("first".to_string())];
        document.extend(nodes);
        document.push(Node::Leaf("last".to_string()));
        document
    })
}

fn shorthand(nodes: &[Node], level: usize, unit: &str, out: &mut String) {
    for node in nodes {
        let pad = unit.repeat(level);
        match node {
            Node::Leaf(name) => out.push_str(&format!("{pad}{name}\n")),
            Node::Blank => out.push_str(&format!("{pad}\n")),
            Node::Block(name, children) => {
                out.push_str(&format!("{pad}{name}:\n"));
                shorthand(children, level + 1, unit, out);
            }
            Node::List(name, children) => {
                out.push_str(&format!("{pad}{name} [\n"));
                shorthand(children, level + 1, unit, out);
                out.push_str(&format!("{pad}]\n"));
            }
        }
    }
}

fn braces(nodes: &[Node], depth: usize, out: &mut String) {
    for node in nodes {
        let pad = "  ".repeat(depth);
        match node {
            Node::Leaf(name) => out.push_str(&format!("{pad}{name}\n")),
            Node::Blank => out.push_str(&format!("{pad}\n")),
            Node::Block(name, children) => {
                out.push_str(&format!("{pad}{name} {{\n"));
                braces(children, depth + 1, out);
                out.push_str(&format!("{pad}}}\n"));
            }
            Node::List(name, children) => {
                out.push_str(&format!("{pad}{name} [\n"));
                braces(children, depth + 1, out);
                out.push_str(&format!("{pad}]\n"));
            }
        }
    }
}

fn render(nodes: &[Node], unit: &str) -> String {
    let mut out = String::new();
    shorthand(nodes, 0, unit, &mut out);
    out
}

proptest! {
    #[test]
    fn well_formed_output_is_balanced(nodes in document(), width in 1usize..=4) {
        let output = convert(&render(&nodes, &" ".repeat(width)));

        prop_assert_eq!(output.matches('{').count(), output.matches('}').count());
        prop_assert_eq!(output.matches('[').count(), output.matches(']').count());
    }

    #[test]
    fn well_formed_output_matches_tree(nodes in document(), width in 1usize..=4) {
        let mut expected = String::new();
        braces(&nodes, 0, &mut expected);

        let result = convert_with_options(&render(&nodes, &" ".repeat(width)), ConvertOptions::default());
        prop_assert_eq!(result.output, expected);
        prop_assert!(result.diagnostics.is_empty());
    }

    #[test]
    fn output_indentation_tracks_nesting(nodes in document(), tabs in any::<bool>()) {
        let unit = if tabs { "\t" } else { "  " };
        let output = convert(&render(&nodes, unit));

        let mut depth = 0usize;
        for line in output.lines() {
            let content = line.trim_start();
            let indent = line.len() - content.len();
            prop_assert_eq!(indent % 2, 0);

            if content == "}" || content == "]" {
                depth -= 1;
            }
            prop_assert_eq!(indent / 2, depth, "line {:?}", line);
            if content.ends_with('{') || content.ends_with('[') {
                depth += 1;
            }
        }
        prop_assert_eq!(depth, 0);
    }

    #[test]
    fn arbitrary_input_never_panics(source in "[ a-z:\\[\\]\t\n]{0,200}") {
        let result = convert_with_options(&source, ConvertOptions::default());
        prop_assert_eq!(result.output.is_empty(), source.trim().is_empty());
    }
}
