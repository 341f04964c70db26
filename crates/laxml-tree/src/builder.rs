//! Nests a flat token stream into a [`TokenTree`].
//!
//! Start tags open an element, end tags close the nearest open element with
//! the same name, and everything else is a leaf. Nothing is rejected: an end
//! tag with no open match is dropped and one that skips over open elements
//! closes them too.

use laxml_common::warning::warn_once;
use laxml_tokenizer::Token;
use tracing::debug;

use crate::{NodeId, TokenTree};

/// Stack of open elements over a tree under construction.
#[derive(Debug)]
pub struct TreeBuilder {
    tree: TokenTree,
    open: Vec<NodeId>,
}

impl TreeBuilder {
    /// Empty builder with only the document open.
    #[must_use]
    pub fn new() -> Self {
        Self {
            tree: TokenTree::new(),
            open: vec![NodeId::ROOT],
        }
    }

    /// Build a tree from a whole token stream.
    #[must_use]
    pub fn build(tokens: impl IntoIterator<Item = Token>) -> TokenTree {
        let mut builder = Self::new();
        for token in tokens {
            let _ = builder.push(token);
        }
        builder.finish()
    }

    /// Node that new tokens are appended to.
    #[must_use]
    pub fn current(&self) -> NodeId {
        self.open.last().copied().unwrap_or(NodeId::ROOT)
    }

    /// Add one token. Returns the new node, or `None` for end tags, which
    /// only close elements and are not stored.
    pub fn push(&mut self, token: Token) -> Option<NodeId> {
        if token.is_end_tag() {
            self.close(token.name());
            return None;
        }

        let opens = token.is_start_tag();
        let parent = self.current();
        let id = self.tree.alloc(token);
        self.tree.append_child(parent, id);
        if opens {
            self.open.push(id);
        }
        Some(id)
    }

    fn close(&mut self, name: Option<&str>) {
        let matching = self
            .open
            .iter()
            .rposition(|&id| self.tree.token(id).is_some_and(|open| open.name() == name));

        let label = name.unwrap_or_default();
        match matching {
            Some(index) => {
                let implied = self.open.len() - index - 1;
                if implied > 0 {
                    warn_once(
                        "tree",
                        &format!("</{label}> closed {implied} unclosed element(s)"),
                    );
                }
                self.open.truncate(index);
                debug!(name = label, depth = index, "closed element");
            }
            None => warn_once("tree", &format!("ignoring unmatched end tag </{label}>")),
        }
    }

    /// Finish building. Elements still open stay nested where they are.
    #[must_use]
    pub fn finish(self) -> TokenTree {
        self.tree
    }
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}
