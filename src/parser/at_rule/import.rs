//! `@import` prelude: `<url> <layer>? <supports()>? <media-query-list>?`,
//! and `@charset`'s single-string prelude.
//!
//! Grounded on the teacher's `parser/at_rule/mod.rs` handling of
//! `@import`/`@charset` as the two string-leading at-rules, generalized
//! here to the full modern `@import` grammar (layer/supports/media
//! tail) by reusing `parse_one_value_item` for the url-or-string head,
//! `parse_supports_condition` for the `supports(...)` clause's interior,
//! and `parse_media_prelude` for the trailing media-query list.

use crate::arena::{flags, NodeKind};
use crate::token::TokenKind;

use super::super::Parser;

impl<'a> Parser<'a> {
    pub(crate) fn parse_import_prelude(&mut self) -> Vec<u32> {
        self.skip_trivia();
        let mut items = Vec::new();

        match self.current().kind {
            TokenKind::String | TokenKind::Url | TokenKind::BadUrl | TokenKind::Function => {
                if let Some(n) = self.parse_one_value_item() {
                    items.push(n);
                }
            }
            _ => {
                let t = self.current();
                self.bump_raw();
                let n = self.arena.create_node(NodeKind::Value, t.start, t.len(), t.line, t.column);
                self.arena.set_flag(n, flags::HAS_ERROR);
                items.push(n);
            }
        }
        self.skip_trivia();

        if self.current().kind == TokenKind::Ident && self.current().text(self.source).eq_ignore_ascii_case("layer") {
            let t = self.current();
            self.bump_raw();
            items.push(self.arena.create_node(NodeKind::Identifier, t.start, t.len(), t.line, t.column));
            self.skip_trivia();
        } else if self.current().kind == TokenKind::Function && self.current().text(self.source)[..self.current().len() as usize - 1].eq_ignore_ascii_case("layer") {
            items.push(self.parse_layer_function());
            self.skip_trivia();
        }

        if self.current().kind == TokenKind::Function && self.current().text(self.source)[..self.current().len() as usize - 1].eq_ignore_ascii_case("supports") {
            items.push(self.parse_supports_function());
            self.skip_trivia();
        }

        if !matches!(self.current().kind, TokenKind::Semicolon | TokenKind::Eof) {
            items.extend(self.parse_media_prelude());
        }

        items
    }

    pub(crate) fn parse_charset_prelude(&mut self) -> Vec<u32> {
        self.skip_trivia();
        if self.current().kind != TokenKind::String {
            return Vec::new();
        }
        match self.parse_one_value_item() {
            Some(n) => vec![n],
            None => Vec::new(),
        }
    }

    fn parse_layer_function(&mut self) -> u32 {
        let func = self.current();
        self.bump_raw();
        self.skip_trivia();
        let name = if self.current().kind != TokenKind::RightParen {
            Some(self.parse_layer_name_inner())
        } else {
            None
        };
        self.skip_trivia();
        let end = if self.current().kind == TokenKind::RightParen {
            let close = self.current();
            self.bump_raw();
            close.end
        } else {
            self.current().start
        };
        let node = self.arena.create_node(NodeKind::LayerName, func.start, end - func.start, func.line, func.column);
        self.arena.set_flag(node, flags::HAS_PARENS);
        if let Some(n) = name {
            self.arena.append_children(node, &[n]);
        }
        node
    }

    fn parse_layer_name_inner(&mut self) -> u32 {
        let start = self.current();
        self.bump_raw();
        let mut end = start.end;
        loop {
            if self.current().kind.is_delim('.') && self.tokenizer.lookahead(0).kind == TokenKind::Ident {
                self.bump_raw();
                let ident = self.current();
                self.bump_raw();
                end = ident.end;
            } else {
                break;
            }
        }
        self.arena.create_node(NodeKind::LayerName, start.start, end - start.start, start.line, start.column)
    }

    fn parse_supports_function(&mut self) -> u32 {
        let func = self.current();
        self.bump_raw();
        self.skip_trivia();

        let snapshot = self.save();
        let inner = if let Some(decl) = self.parse_declaration() {
            decl
        } else {
            self.restore(snapshot);
            self.parse_supports_condition()
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
    use crate::arena::NodeKind;
    use crate::options::ParserOptions;

    #[test]
    fn url_only() {
        let mut parser = Parser::new("\"theme.css\";", ParserOptions::default());
        let items = parser.parse_import_prelude();
        assert_eq!(items.len(), 1);
    }

    #[test]
    fn url_with_layer_and_media() {
        let mut parser = Parser::new("url(theme.css) layer(base) screen and (min-width: 600px)", ParserOptions::default());
        let items = parser.parse_import_prelude();
        assert!(items.len() >= 3);
    }

    #[test]
    fn charset_string() {
        let mut parser = Parser::new("\"utf-8\"", ParserOptions::default());
        let items = parser.parse_charset_prelude();
        assert_eq!(items.len(), 1);
        assert_eq!(parser.arena.kind(items[0]), NodeKind::String);
    }
}
