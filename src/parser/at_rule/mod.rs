//! At-rule parsing: `@name prelude ('{' body '}' | ';')`.
//!
//! The dispatch-by-name shape is grounded on the teacher's
//! `parser/at_rule/mod.rs` (`parse_at_rule`, matching the at-keyword
//! against a fixed set of known names); the individual prelude grammars
//! are grounded on their teacher counterparts in `parser/at_rule/*.rs`
//! and are named the same way here (`media`, `supports`, `container`,
//! `layer`, `import`).

mod container;
mod import;
mod layer;
mod media;
mod supports;

use crate::arena::{flags, NodeKind};
use crate::error::ParseResult;
use crate::token::TokenKind;

use super::declaration::is_vendor_prefixed_name;
use super::Parser;

/// Vendor-prefixed at-rules (`-webkit-keyframes`, `-moz-document`, ...)
/// dispatch to their unprefixed handler (§4.7's case-folding rule); the
/// prefix itself is still recorded on the `AtRule` node's
/// `VENDOR_PREFIXED` flag by `parse_at_rule`.
fn strip_known_vendor_prefix(name: &str) -> &str {
    for prefix in ["-webkit-", "-moz-", "-ms-", "-o-"] {
        if let Some(rest) = name.strip_prefix(prefix) {
            return rest;
        }
    }
    name
}

impl<'a> Parser<'a> {
    pub(crate) fn parse_at_rule(&mut self) -> ParseResult<u32> {
        log::trace!("parse_at_rule");
        let at_tok = self.current();
        self.bump_raw();
        let name = at_tok.text(self.source)[1..].to_string();
        self.skip_trivia();

        let prelude = self.parse_at_rule_prelude_nodes(&name);
        self.skip_trivia();

        let mut children = prelude;
        let mut has_block = false;

        match self.current().kind {
            TokenKind::LeftBrace => {
                has_block = true;
                let brace = self.current();
                self.bump_raw();
                let body = self.parse_block_contents(true)?;
                let mut end = brace.end;
                if self.current().kind == TokenKind::RightBrace {
                    end = self.current().end;
                    self.bump_raw();
                }
                let block = self.arena.create_node(NodeKind::Block, brace.start, end - brace.start, brace.line, brace.column);
                self.arena.append_children(block, &body);
                children.push(block);
            }
            TokenKind::Semicolon => {
                self.bump_raw();
            }
            TokenKind::Eof => {}
            _ => {
                log::warn!("expected ';' or '{{' after @{} prelude, found {:?}", name, self.current().kind);
                self.resync();
            }
        }

        let end = children.last().map(|&c| self.node_end(c)).unwrap_or(at_tok.end);
        let node = self.arena.create_node(NodeKind::AtRule, at_tok.start, end.max(at_tok.end) - at_tok.start, at_tok.line, at_tok.column);
        self.arena.set_content_span(node, 1, (name.len()) as u16);
        self.arena.append_children(node, &children);
        if has_block {
            self.arena.set_flag(node, flags::HAS_BLOCK);
        }
        if is_vendor_prefixed_name(&name) {
            self.arena.set_flag(node, flags::VENDOR_PREFIXED);
        }
        Ok(node)
    }

    /// Dispatches an at-rule's prelude grammar by name. When
    /// `parse_atrule_preludes` is disabled, every at-rule's prelude is
    /// captured as a flat, unstructured sequence of value-like nodes
    /// instead. Vendor-prefixed variants (`-webkit-keyframes`) dispatch to
    /// the same handler as their unprefixed name.
    pub(crate) fn parse_at_rule_prelude_nodes(&mut self, name: &str) -> Vec<u32> {
        if !self.options.parse_atrule_preludes {
            return self.parse_raw_prelude_tokens();
        }
        let lower = name.to_ascii_lowercase();
        let unprefixed = strip_known_vendor_prefix(&lower);
        match unprefixed {
            "media" => self.parse_media_prelude(),
            "supports" => vec![self.parse_supports_condition()],
            "container" => self.parse_container_prelude(),
            "layer" => self.parse_layer_prelude(),
            "import" => self.parse_import_prelude(),
            "charset" => self.parse_charset_prelude(),
            "nest" => vec![self.parse_selector_list(true)],
            // `keyframes`, `font-face`, `page`, `counter-style`, `property`,
            // `viewport`, `namespace`, `document`: a bare identifier or
            // nothing, which the raw-token fallback already produces
            // faithfully (an empty Vec for an empty prelude, a single
            // Identifier node for a bare name).
            _ => self.parse_raw_prelude_tokens(),
        }
    }

    fn parse_raw_prelude_tokens(&mut self) -> Vec<u32> {
        self.skip_trivia();
        let mut items = Vec::new();
        while !matches!(self.current().kind, TokenKind::LeftBrace | TokenKind::Semicolon | TokenKind::Eof) {
            match self.parse_one_value_item() {
                Some(n) => items.push(n),
                None => {
                    self.bump_raw();
                }
            }
            self.skip_trivia();
        }
        items
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::ParserOptions;

    #[test]
    fn charset_at_rule() {
        let mut parser = Parser::new("@charset \"utf-8\";", ParserOptions::default());
        let node = parser.parse_at_rule().expect("parses");
        assert_eq!(parser.arena.kind(node), NodeKind::AtRule);
        assert!(!parser.arena.has_flag(node, flags::HAS_BLOCK));
    }

    #[test]
    fn media_at_rule_has_block() {
        let mut parser = Parser::new("@media (min-width: 600px) { a { color: red; } }", ParserOptions::default());
        let node = parser.parse_at_rule().expect("parses");
        assert!(parser.arena.has_flag(node, flags::HAS_BLOCK));
    }

    #[test]
    fn unknown_at_rule_falls_back_to_raw_tokens() {
        let mut parser = Parser::new("@unknown foo bar;", ParserOptions::default());
        let node = parser.parse_at_rule().expect("parses");
        assert!(parser.arena.has_children(node));
    }

    #[test]
    fn keyframes_prelude_is_single_identifier() {
        let mut parser = Parser::new("@keyframes spin { }", ParserOptions::default());
        let node = parser.parse_at_rule().expect("parses");
        let name_child = parser.arena.first_child(node).expect("animation name");
        assert_eq!(parser.arena.kind(name_child), NodeKind::Identifier);
    }

    #[test]
    fn nest_prelude_is_a_selector_list() {
        let mut parser = Parser::new("@nest & > .child { color: red; }", ParserOptions::default());
        let node = parser.parse_at_rule().expect("parses");
        let prelude = parser.arena.first_child(node).expect("selector list");
        assert_eq!(parser.arena.kind(prelude), NodeKind::SelectorList);
    }

    #[test]
    fn vendor_prefixed_keyframes_sets_flag_and_dispatches() {
        let mut parser = Parser::new("@-webkit-keyframes spin { }", ParserOptions::default());
        let node = parser.parse_at_rule().expect("parses");
        assert!(parser.arena.has_flag(node, flags::VENDOR_PREFIXED));
        let name_child = parser.arena.first_child(node).expect("animation name");
        assert_eq!(parser.arena.kind(name_child), NodeKind::Identifier);
    }
}
