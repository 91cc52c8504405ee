//! Owning wrapper returned by the crate's entry points.
//!
//! `Node<'a>` borrows both the arena and the source text, so a function
//! returning a borrowed `Node` cannot also own the data it borrows from.
//! `Document` is the usual answer to that shape (the same pattern as
//! `roxmltree::Document` or `markup5ever_rcdom`'s owned trees): it holds
//! the arena and source together and hands out a `Node<'_>` root borrowed
//! from itself.

use crate::arena::NodeArena;
use crate::node::Node;

pub struct Document {
    pub(crate) arena: NodeArena,
    pub(crate) source: String,
    pub(crate) root: u32,
}

impl Document {
    pub(crate) fn new(arena: NodeArena, source: String, root: u32) -> Self {
        Document { arena, source, root }
    }

    /// The root node of this parse. For a full stylesheet this is the
    /// `Stylesheet` node; for `parse_declaration` it is the `Declaration`
    /// itself; for `parse_value`/`parse_atrule_prelude` it is a synthetic
    /// container whose children are the parsed sequence.
    pub fn root(&self) -> Node<'_> {
        Node::new(&self.arena, &self.source, self.root)
    }

    pub fn source(&self) -> &str {
        &self.source
    }
}
