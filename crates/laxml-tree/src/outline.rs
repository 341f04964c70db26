//! Indented text rendering of a [`TokenTree`].

use std::fmt::Write;

use laxml_tokenizer::{Token, TokenData};

use crate::{NodeId, NodeKind, TokenTree};

/// Render the subtree at `id`, two spaces per level.
///
/// ```
/// use laxml_tokenizer::Tokenizer;
/// use laxml_tree::{outline, NodeId, TreeBuilder};
///
/// let tree = TreeBuilder::build(Tokenizer::from_markup("<p>hi</p>").map_while(Result::ok));
/// assert_eq!(outline(&tree, NodeId::ROOT), "Document\n  <p>\n    \"hi\"\n");
/// ```
#[must_use]
pub fn outline(tree: &TokenTree, id: NodeId) -> String {
    let mut out = String::new();
    write_node(tree, id, 0, &mut out);
    out
}

/// Print the subtree at `id` to stdout.
pub fn print_tree(tree: &TokenTree, id: NodeId) {
    print!("{}", outline(tree, id));
}

fn write_node(tree: &TokenTree, id: NodeId, indent: usize, out: &mut String) {
    let Some(node) = tree.get(id) else {
        return;
    };
    let prefix = "  ".repeat(indent);
    let line = match &node.kind {
        NodeKind::Document => "Document".to_string(),
        NodeKind::Token(token) => describe(token),
    };
    let _ = writeln!(out, "{prefix}{line}");
    for &child in &node.children {
        write_node(tree, child, indent + 1, out);
    }
}

fn describe(token: &Token) -> String {
    match token.data() {
        TokenData::Text { text } => {
            let display = text.replace('\n', "\\n");
            format!("\"{display}\"")
        }
        _ => token.to_string(),
    }
}
