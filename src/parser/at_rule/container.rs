//! `@container` prelude: `<container-name>? <container-condition>`.
//!
//! The teacher has no `@container` support (it predates the feature
//! reaching wide interoperability); this grammar is grounded on
//! `parser/at_rule/supports.rs`'s condition-tree shape and reuses
//! `parse_media_feature_or_range` for the individual size/style/scroll-
//! state feature tests, since a container query's `(width > 400px)` and
//! a media query's `(width > 400px)` are the same grammar production.
//! `style(<declaration>)` is handled separately: grammar-wise it is the
//! same declaration-or-nested-condition shape `@supports`'s parenthesized
//! feature test uses, so it reuses that node shape (`SupportsQuery`)
//! rather than inventing a new one.

use crate::arena::{flags, NodeKind};
use crate::token::TokenKind;

use super::super::Parser;

impl<'a> Parser<'a> {
    pub(crate) fn parse_container_prelude(&mut self) -> Vec<u32> {
        self.skip_trivia();
        let mut items = Vec::new();

        if self.current().kind == TokenKind::Ident && !self.current().text(self.source).eq_ignore_ascii_case("not") {
            let t = self.current();
            self.bump_raw();
            items.push(self.arena.create_node(NodeKind::Identifier, t.start, t.len(), t.line, t.column));
            self.skip_trivia();
        }

        if !matches!(self.current().kind, TokenKind::LeftBrace | TokenKind::Semicolon | TokenKind::Eof) {
            items.push(self.parse_container_condition());
        }
        items
    }

    fn parse_container_condition(&mut self) -> u32 {
        let start = self.current();

        if self.current().kind == TokenKind::Ident && self.current().text(self.source).eq_ignore_ascii_case("not") {
            let not_tok = self.current();
            self.bump_raw();
            self.skip_trivia();
            let inner = self.parse_container_in_parens();
            let op = self.arena.create_node(NodeKind::PreludeOperator, not_tok.start, not_tok.len(), not_tok.line, not_tok.column);
            let end = self.node_end(inner);
            let node = self.arena.create_node(NodeKind::ContainerQuery, start.start, end - start.start, start.line, start.column);
            self.arena.append_children(node, &[op, inner]);
            return node;
        }

        let mut children = vec![self.parse_container_in_parens()];
        self.skip_trivia();
        while self.current().kind == TokenKind::Ident
            && (self.current().text(self.source).eq_ignore_ascii_case("and") || self.current().text(self.source).eq_ignore_ascii_case("or"))
        {
            let t = self.current();
            self.bump_raw();
            children.push(self.arena.create_node(NodeKind::PreludeOperator, t.start, t.len(), t.line, t.column));
            self.skip_trivia();
            children.push(self.parse_container_in_parens());
            self.skip_trivia();
        }

        let end = self.node_end(*children.last().expect("at least one container-in-parens"));
        let node = self.arena.create_node(NodeKind::ContainerQuery, start.start, end - start.start, start.line, start.column);
        self.arena.append_children(node, &children);
        node
    }

    fn parse_container_in_parens(&mut self) -> u32 {
        if self.current().kind == TokenKind::LeftParen {
            self.parse_media_feature_or_range()
        } else if self.current().kind == TokenKind::Function
            && self.current().text(self.source)[..self.current().len() as usize - 1].eq_ignore_ascii_case("style")
        {
            self.parse_style_function()
        } else {
            let t = self.current();
            self.bump_raw();
            let node = self.arena.create_node(NodeKind::ContainerQuery, t.start, t.len(), t.line, t.column);
            self.arena.set_flag(node, flags::HAS_ERROR);
            node
        }
    }

    /// `style(<declaration>)`: a container style query. Grammar-wise this
    /// is the same declaration-or-nested-condition shape as `@supports`'s
    /// parenthesized feature test, so this mirrors `import.rs`'s
    /// `parse_supports_function` rather than inventing a new combinator.
    fn parse_style_function(&mut self) -> u32 {
        let func = self.current();
        self.bump_raw();
        self.skip_trivia();

        let snapshot = self.save();
        let inner = if let Some(decl) = self.parse_declaration() {
            decl
        } else {
            self.restore(snapshot);
            self.parse_container_condition()
        };
        self.skip_trivia();

        let end = if self.current().kind == TokenKind::RightParen {
            let close = self.current();
            self.bump_raw();
            close.end
        } else {
            self.current().start
        };
        let node = self.arena.create_node(NodeKind::SupportsQuery, func.start, end - func.start, func.line, func.column);
        self.arena.set_flag(node, flags::HAS_PARENS);
        self.arena.append_children(node, &[inner]);
        node
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::ParserOptions;

    #[test]
    fn named_container_query() {
        let mut parser = Parser::new("sidebar (min-width: 400px)", ParserOptions::default());
        let items = parser.parse_container_prelude();
        assert_eq!(items.len(), 2);
        assert_eq!(parser.arena.kind(items[0]), NodeKind::Identifier);
        assert_eq!(parser.arena.kind(items[1]), NodeKind::ContainerQuery);
    }

    #[test]
    fn anonymous_container_query() {
        let mut parser = Parser::new("(min-width: 400px)", ParserOptions::default());
        let items = parser.parse_container_prelude();
        assert_eq!(items.len(), 1);
        assert_eq!(parser.arena.kind(items[0]), NodeKind::ContainerQuery);
    }

    #[test]
    fn style_query() {
        let mut parser = Parser::new("style(--accent: blue)", ParserOptions::default());
        let items = parser.parse_container_prelude();
        assert_eq!(items.len(), 1);
        assert_eq!(parser.arena.kind(items[0]), NodeKind::ContainerQuery);
        let style_node = parser.arena.first_child(items[0]).expect("style() node");
        assert_eq!(parser.arena.kind(style_node), NodeKind::SupportsQuery);
        let decl = parser.arena.first_child(style_node).expect("declaration");
        assert_eq!(parser.arena.kind(decl), NodeKind::Declaration);
    }
}
