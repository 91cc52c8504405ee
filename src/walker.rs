//! A depth-first walker that tracks ancestor context (nearest enclosing
//! rule, at-rule, declaration, value, selector) while visiting nodes.
//!
//! Grounded on the teacher's `walker.rs`, which reconstructs ancestor
//! relationships with an explicit stack rather than a stored `parent`
//! pointer on each node — this crate's arena makes the same design
//! choice (see the design notes on tree cycles), so the walker here is
//! the only place ancestry is ever materialized.

use crate::arena::NodeKind;
use crate::node::Node;

#[derive(Clone, Copy, Default)]
pub struct Context<'a> {
    pub rule: Option<Node<'a>>,
    pub at_rule: Option<Node<'a>>,
    pub declaration: Option<Node<'a>>,
    pub value: Option<Node<'a>>,
    pub selector: Option<Node<'a>>,
}

impl<'a> Context<'a> {
    fn enter(mut self, node: Node<'a>) -> Self {
        match node.kind() {
            NodeKind::StyleRule => self.rule = Some(node),
            NodeKind::AtRule => self.at_rule = Some(node),
            NodeKind::Declaration => self.declaration = Some(node),
            // Once inside a Value or Selector subtree, nested descendants
            // inherit the same ancestor rather than shadowing it.
            NodeKind::Value if self.value.is_none() => self.value = Some(node),
            NodeKind::Selector if self.selector.is_none() => self.selector = Some(node),
            _ => {}
        }
        self
    }
}

/// Visits `root` and every descendant in depth-first, source order,
/// calling `visit(node, context)` for each. `context` reflects the
/// ancestor state *as of* visiting `node` — it does not yet include
/// `node` itself unless `node` is a context-defining kind, consistent
/// with "frozen once entered" semantics in the design notes.
pub fn walk<'a, F>(root: Node<'a>, mut visit: F)
where
    F: FnMut(Node<'a>, &Context<'a>),
{
    fn recurse<'a, F>(node: Node<'a>, context: Context<'a>, visit: &mut F)
    where
        F: FnMut(Node<'a>, &Context<'a>),
    {
        visit(node, &context);
        let child_context = context.enter(node);
        for child in node.children() {
            recurse(child, child_context, visit);
        }
    }

    recurse(root, Context::default(), &mut visit);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{parse, ParserOptions};

    #[test]
    fn tracks_enclosing_rule_and_declaration() {
        let source = "body { color: red; }";
        let doc = parse(source, &mut ParserOptions::default()).expect("parses");
        let mut saw_declaration_with_rule = false;
        walk(doc.root(), |node, ctx| {
            if node.kind() == NodeKind::Declaration {
                saw_declaration_with_rule = ctx.rule.is_some();
            }
        });
        assert!(saw_declaration_with_rule);
    }
}
