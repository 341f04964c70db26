//! Token tree for laxml.
//!
//! The tokenizer emits flat tokens. This crate nests them into an arena with
//! [`NodeId`] handles for every relationship, so parent and child links need
//! no shared ownership.
//!
//! ```
//! use laxml_tokenizer::Tokenizer;
//! use laxml_tree::{NodeId, TreeBuilder};
//!
//! let tokens = Tokenizer::from_markup("<a><b/>text</a>").map_while(Result::ok);
//! let tree = TreeBuilder::build(tokens);
//! let a = tree.children(NodeId::ROOT)[0];
//! assert_eq!(tree.children(a).len(), 2);
//! ```

pub mod builder;
pub mod outline;

pub use builder::TreeBuilder;
pub use outline::{outline, print_tree};

use laxml_tokenizer::Token;

/// A type-safe index into a [`TokenTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub usize);

impl NodeId {
    /// The document node is always at index 0.
    pub const ROOT: Self = Self(0);
}

/// What a node holds.
#[derive(Debug, Clone)]
pub enum NodeKind {
    /// The synthetic document node at [`NodeId::ROOT`].
    Document,
    /// A token from the tokenizer.
    Token(Token),
}

/// One arena slot with its structural links.
#[derive(Debug, Clone)]
pub struct Node {
    /// Contents of this node.
    pub kind: NodeKind,
    /// Owning node, `None` for the root and for detached nodes.
    pub parent: Option<NodeId>,
    /// Children in document order.
    pub children: Vec<NodeId>,
    /// Following child of the same parent.
    pub next_sibling: Option<NodeId>,
    /// Preceding child of the same parent.
    pub prev_sibling: Option<NodeId>,
}

impl Node {
    const fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            parent: None,
            children: Vec::new(),
            next_sibling: None,
            prev_sibling: None,
        }
    }
}

/// Arena of nodes. Nodes are never freed; removing a child only detaches it.
#[derive(Debug, Clone)]
pub struct TokenTree {
    nodes: Vec<Node>,
}

impl TokenTree {
    /// A tree holding only the document node.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::new(NodeKind::Document)],
        }
    }

    /// The document node.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        NodeId::ROOT
    }

    /// Look up a node.
    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0)
    }

    /// Token stored at `id`, `None` for the document node or a bad id.
    #[must_use]
    pub fn token(&self, id: NodeId) -> Option<&Token> {
        match &self.get(id)?.kind {
            NodeKind::Token(token) => Some(token),
            NodeKind::Document => None,
        }
    }

    /// Mutable access to the token stored at `id`.
    pub fn token_mut(&mut self, id: NodeId) -> Option<&mut Token> {
        match &mut self.nodes.get_mut(id.0)?.kind {
            NodeKind::Token(token) => Some(token),
            NodeKind::Document => None,
        }
    }

    /// Number of nodes, including the document node and detached nodes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: the document node exists from construction.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Store a token as a detached node.
    pub fn alloc(&mut self, token: Token) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::new(NodeKind::Token(token)));
        id
    }

    /// Append `child` as the last child of `parent`.
    ///
    /// A child that is still attached elsewhere is detached first.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        if let Some(old_parent) = self.parent(child) {
            self.remove_child(old_parent, child);
        }

        let prev_last_child = self.nodes[parent.0].children.last().copied();
        self.nodes[parent.0].children.push(child);
        self.nodes[child.0].parent = Some(parent);

        if let Some(prev_id) = prev_last_child {
            self.nodes[prev_id.0].next_sibling = Some(child);
            self.nodes[child.0].prev_sibling = Some(prev_id);
        }
    }

    /// Detach `child` from `parent`, relinking its siblings.
    ///
    /// Does nothing if `child` is not a child of `parent`.
    pub fn remove_child(&mut self, parent: NodeId, child: NodeId) {
        let Some(index) = self.nodes[parent.0].children.iter().position(|&c| c == child) else {
            return;
        };
        let _ = self.nodes[parent.0].children.remove(index);

        let prev = self.nodes[child.0].prev_sibling.take();
        let next = self.nodes[child.0].next_sibling.take();
        if let Some(prev_id) = prev {
            self.nodes[prev_id.0].next_sibling = next;
        }
        if let Some(next_id) = next {
            self.nodes[next_id.0].prev_sibling = prev;
        }
        self.nodes[child.0].parent = None;
    }

    /// Parent of a node.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.parent)
    }

    /// Children of a node.
    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map_or(&[], |n| n.children.as_slice())
    }

    /// Following sibling of a node.
    #[must_use]
    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.next_sibling)
    }

    /// Preceding sibling of a node.
    #[must_use]
    pub fn prev_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(|n| n.prev_sibling)
    }

    /// Iterate from the parent of `id` up to the root.
    #[must_use]
    pub fn ancestors(&self, id: NodeId) -> AncestorIterator<'_> {
        AncestorIterator {
            tree: self,
            current: self.parent(id),
        }
    }

    /// Number of ancestors of `id`.
    #[must_use]
    pub fn depth(&self, id: NodeId) -> usize {
        self.ancestors(id).count()
    }
}

impl Default for TokenTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Iterator over the ancestors of a node, nearest first.
pub struct AncestorIterator<'a> {
    tree: &'a TokenTree,
    current: Option<NodeId>,
}

impl Iterator for AncestorIterator<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        self.current = self.tree.parent(id);
        Some(id)
    }
}
