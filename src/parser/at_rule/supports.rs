//! `@supports` prelude: `supports-condition`.
//!
//! Grounded on the teacher's `parser/at_rule/supports.rs` and
//! `parser/at_rule/condition.rs` for the `not` / `and`-chain / `or`-chain
//! shape of a boolean condition tree, and reusing the declaration parser
//! for a parenthesized `(property: value)` feature test rather than
//! duplicating its logic.

use crate::arena::{flags, NodeKind};
use crate::token::TokenKind;

use super::super::Parser;

impl<'a> Parser<'a> {
    pub(crate) fn parse_supports_condition(&mut self) -> u32 {
        self.skip_trivia();
        let start = self.current();

        if self.current().kind == TokenKind::Ident && self.current().text(self.source).eq_ignore_ascii_case("not") {
            let not_tok = self.current();
            self.bump_raw();
            self.skip_trivia();
            let inner = self.parse_supports_in_parens();
            let op = self.arena.create_node(NodeKind::PreludeOperator, not_tok.start, not_tok.len(), not_tok.line, not_tok.column);
            let end = self.node_end(inner);
            let node = self.arena.create_node(NodeKind::SupportsQuery, start.start, end - start.start, start.line, start.column);
            self.arena.append_children(node, &[op, inner]);
            return node;
        }

        let mut children = vec![self.parse_supports_in_parens()];
        self.skip_trivia();
        while self.current().kind == TokenKind::Ident
            && (self.current().text(self.source).eq_ignore_ascii_case("and") || self.current().text(self.source).eq_ignore_ascii_case("or"))
        {
            let t = self.current();
            self.bump_raw();
            children.push(self.arena.create_node(NodeKind::PreludeOperator, t.start, t.len(), t.line, t.column));
            self.skip_trivia();
            children.push(self.parse_supports_in_parens());
            self.skip_trivia();
        }

        let end = self.node_end(*children.last().expect("at least one supports-in-parens"));
        let node = self.arena.create_node(NodeKind::SupportsQuery, start.start, end - start.start, start.line, start.column);
        self.arena.append_children(node, &children);
        node
    }

    /// `'(' (supports-condition | declaration) ')'`. Tries the
    /// declaration form first (the common case, `(display: grid)`) and
    /// falls back to a nested condition on failure.
    fn parse_supports_in_parens(&mut self) -> u32 {
        if self.current().kind != TokenKind::LeftParen {
            let t = self.current();
            self.bump_raw();
            let node = self.arena.create_node(NodeKind::SupportsQuery, t.start, t.len(), t.line, t.column);
            self.arena.set_flag(node, flags::HAS_ERROR);
            return node;
        }

        let open = self.current();
        let snapshot = self.save();
        self.bump_raw();
        self.skip_trivia();

        if let Some(decl) = self.parse_declaration() {
            self.skip_trivia();
            if self.current().kind == TokenKind::RightParen {
                let close = self.current();
                self.bump_raw();
                let node = self.arena.create_node(NodeKind::SupportsQuery, open.start, close.end - open.start, open.line, open.column);
                self.arena.append_children(node, &[decl]);
                return node;
            }
        }

        self.restore(snapshot);
        self.bump_raw();
        self.skip_trivia();
        let inner = self.parse_supports_condition();
        self.skip_trivia();
        let end = if self.current().kind == TokenKind::RightParen {
            let close = self.current();
            self.bump_raw();
            close.end
        } else {
            self.current().start
        };
        let node = self.arena.create_node(NodeKind::SupportsQuery, open.start, end - open.start, open.line, open.column);
        self.arena.append_children(node, &[inner]);
        node
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::ParserOptions;

    #[test]
    fn simple_feature_test() {
        let mut parser = Parser::new("(display: grid)", ParserOptions::default());
        let node = parser.parse_supports_condition();
        assert_eq!(parser.arena.kind(node), NodeKind::SupportsQuery);
        let child = parser.arena.first_child(node).expect("declaration");
        assert_eq!(parser.arena.kind(child), NodeKind::Declaration);
    }

    #[test]
    fn not_condition() {
        let mut parser = Parser::new("not (display: grid)", ParserOptions::default());
        let node = parser.parse_supports_condition();
        let kinds: Vec<_> = parser.arena.children(node).map(|c| parser.arena.kind(c)).collect();
        assert_eq!(kinds, vec![NodeKind::PreludeOperator, NodeKind::SupportsQuery]);
    }

    #[test]
    fn and_chain() {
        let mut parser = Parser::new("(display: grid) and (gap: 1px)", ParserOptions::default());
        let node = parser.parse_supports_condition();
        assert_eq!(parser.arena.children(node).count(), 3);
    }
}
