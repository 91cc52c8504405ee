//! `@layer` prelude: one or more dotted layer names, comma-separated
//! (`@layer base, components.buttons;`), or none at all for an anonymous
//! layer block (`@layer { ... }`).
//!
//! The teacher has no cascade-layers support; this grammar is grounded
//! on the general comma-list shape of `parser/at_rule/media.rs`'s
//! `parse_media_query_list`, applied to dotted identifiers instead of
//! media queries.

use crate::arena::NodeKind;
use crate::token::TokenKind;

use super::super::Parser;

impl<'a> Parser<'a> {
    pub(crate) fn parse_layer_prelude(&mut self) -> Vec<u32> {
        self.skip_trivia();
        if self.current().kind != TokenKind::Ident {
            return Vec::new();
        }
        let mut items = vec![self.parse_layer_name()];
        self.skip_trivia();
        while self.current().kind == TokenKind::Comma {
            let comma = self.current();
            items.push(self.make_operator_node(comma));
            self.bump_raw();
            self.skip_trivia();
            items.push(self.parse_layer_name());
            self.skip_trivia();
        }
        items
    }

    /// A layer name is a run of idents joined by `.` with no whitespace
    /// around the dots (`a.b.c`); the tokenizer never fuses the dots into
    /// the idents, so this reassembles the run as one `LayerName` span.
    fn parse_layer_name(&mut self) -> u32 {
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
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::ParserOptions;

    #[test]
    fn single_name() {
        let mut parser = Parser::new("base", ParserOptions::default());
        let items = parser.parse_layer_prelude();
        assert_eq!(items.len(), 1);
        assert_eq!(parser.arena.kind(items[0]), NodeKind::LayerName);
    }

    #[test]
    fn dotted_name() {
        let mut parser = Parser::new("components.buttons", ParserOptions::default());
        let items = parser.parse_layer_prelude();
        assert_eq!(items.len(), 1);
        let start = parser.arena.start_offset(items[0]) as usize;
        let end = parser.arena.end_offset(items[0]) as usize;
        assert_eq!(&"components.buttons"[start..end], "components.buttons");
    }

    #[test]
    fn comma_separated_names() {
        let mut parser = Parser::new("base, components.buttons", ParserOptions::default());
        let items = parser.parse_layer_prelude();
        assert_eq!(items.len(), 3);
    }

    #[test]
    fn anonymous_layer_has_no_names() {
        let mut parser = Parser::new("", ParserOptions::default());
        assert!(parser.parse_layer_prelude().is_empty());
    }
}
