//! Declaration parsing: `property: value !important`.
//!
//! Grounded on the teacher's `parse_declaration`/`parse_declaration_internal`
//! (`parser/declaration.rs`): browser-hack prefix detection ahead of the
//! property name, value accumulation up to `;`/`}`/EOF, and the trailing
//! `!important` check, each kept but rebuilt against the arena instead of
//! an owned `CssValue`/`Declaration` struct.

use crate::arena::{flags, NodeKind};
use crate::token::TokenKind;

use super::Parser;

/// True for a vendor-prefixed property name, e.g. `-webkit-transform`,
/// `-moz-box-sizing`: starts with a single `-`, followed by an alphabetic
/// character, with another `-` somewhere later in the name. This crate
/// has no teacher precedent for the check (`gosub_css3` doesn't flag
/// vendor prefixes at declaration level at all); the shape here is
/// derived directly from how vendor-prefixed properties are actually
/// written.
pub(crate) fn is_vendor_prefixed_name(name: &str) -> bool {
    name.starts_with('-')
        && name.len() > 1
        && name[1..].chars().next().is_some_and(|c| c.is_ascii_alphabetic())
        && name[1..].contains('-')
}

/// Delimiter characters that, standing alone just before an identifier,
/// mark a browser-hack-prefixed property (`*zoom: 1`, `+color: red`).
/// Most of this set tokenizes as a bare `Delim`; `,`, `(`, `)`, `[`, `]`,
/// and `:` are their own dedicated token kinds and are matched
/// separately in `consume_browserhack_prefix`. `@` and `#` never reach
/// here as a standalone prefix — the tokenizer folds them into an
/// `AtKeyword`/`Hash` token together with the following ident — and `_`/
/// `-` fold into the identifier itself; all four are detected from the
/// property name's own text instead, once it's been consumed.
const BROWSERHACK_DELIMS: [char; 14] = ['*', '$', '&', '=', '%', '+', '.', '/', '\\', '~', '?', '<', '>', '|'];

impl<'a> Parser<'a> {
    /// Speculatively parses one declaration starting at the current
    /// token. Returns `None` (without needing to restore the cursor —
    /// callers snapshot before calling this) the moment the input fails
    /// to look like `ident ':' ...`, so the caller can retry the same
    /// span as a style rule.
    pub(crate) fn parse_declaration(&mut self) -> Option<u32> {
        let start = self.current();
        let mut browserhack = false;

        let name_tok = if let TokenKind::Hash { .. } = start.kind {
            // `#foo: red` — the `#` and the ident fold into one Hash
            // token, so there is no separate ident to consume; the hash
            // itself is both prefix and name.
            browserhack = true;
            self.bump_raw();
            start
        } else {
            if self.consume_browserhack_prefix() {
                browserhack = true;
            }
            let t = self.current();
            if t.kind != TokenKind::Ident {
                return None;
            }
            self.bump_raw();
            t
        };

        let raw_name = name_tok.text(self.source);
        let name_text = if matches!(name_tok.kind, TokenKind::Hash { .. }) { &raw_name[1..] } else { raw_name };

        if !browserhack
            && (name_text.starts_with('_')
                || (name_text.starts_with('-') && !name_text.starts_with("--") && !is_vendor_prefixed_name(name_text)))
        {
            browserhack = true;
        }
        let vendor_prefixed = is_vendor_prefixed_name(name_text);

        self.skip_trivia();
        if self.current().kind != TokenKind::Colon {
            return None;
        }
        self.bump_raw();
        self.skip_trivia();

        let value_start = self.current().start;
        let mut value_children = Vec::new();
        let mut value_end = value_start;
        let mut important = false;

        loop {
            match self.current().kind {
                TokenKind::Eof | TokenKind::Semicolon | TokenKind::RightBrace => break,
                TokenKind::LeftBrace => {
                    // A declaration's value never legitimately contains an
                    // opening brace; this is actually a nested rule.
                    return None;
                }
                TokenKind::Delim('!') => {
                    let snapshot = self.save();
                    self.bump_raw();
                    self.skip_trivia();
                    let is_important = matches!(self.current().kind, TokenKind::Ident)
                        && self.current().text(self.source).eq_ignore_ascii_case("important");
                    if is_important {
                        self.bump_raw();
                        important = true;
                        self.skip_trivia();
                        continue;
                    }
                    self.restore(snapshot);
                    match self.parse_one_value_item() {
                        Some(node) => {
                            value_end = self.node_end(node);
                            value_children.push(node);
                        }
                        None => {
                            self.bump_raw();
                        }
                    }
                }
                _ => match self.parse_one_value_item() {
                    Some(node) => {
                        value_end = self.node_end(node);
                        value_children.push(node);
                    }
                    None => {
                        self.bump_raw();
                    }
                },
            }
            self.skip_trivia();
        }

        // The property span includes the browser-hack prefix character(s)
        // when present, not just the identifier after them.
        let content_delta = 0u16;
        let content_len = (name_tok.end - start.start) as u16;
        let value_delta = (value_start.saturating_sub(start.start)).min(u16::MAX as u32) as u16;
        let value_len = (value_end.saturating_sub(value_start)).min(u16::MAX as u32) as u16;

        if self.current().kind == TokenKind::Semicolon {
            self.bump_raw();
        }

        let node_end = value_end.max(name_tok.end);
        let node = self.arena.create_node(NodeKind::Declaration, start.start, node_end - start.start, start.line, start.column);
        self.arena.set_content_span(node, content_delta, content_len);
        self.arena.set_value_span(node, value_delta, value_len);
        if important {
            self.arena.set_flag(node, flags::IMPORTANT);
        }
        if browserhack {
            self.arena.set_flag(node, flags::BROWSERHACK);
        }
        if vendor_prefixed {
            self.arena.set_flag(node, flags::VENDOR_PREFIXED);
        }

        if self.options.parse_values && !value_children.is_empty() {
            let value_node = self.arena.create_node(
                NodeKind::Value,
                value_start,
                value_end - value_start,
                name_tok.line,
                name_tok.column,
            );
            self.arena.append_children(value_node, &value_children);
            self.arena.append_children(node, &[value_node]);
        }

        Some(node)
    }

    /// Consumes a single standalone browser-hack prefix token (one of
    /// `BROWSERHACK_DELIMS`, or one of the dedicated single-char tokens
    /// the tokenizer produces for `,`, `(`, `)`, `[`, `]`, `:`), if the
    /// current token is one. Returns whether it consumed anything.
    fn consume_browserhack_prefix(&mut self) -> bool {
        let consumed = matches!(
            self.current().kind,
            TokenKind::Comma | TokenKind::LeftParen | TokenKind::RightParen | TokenKind::LeftBracket | TokenKind::RightBracket | TokenKind::Colon
        ) || matches!(self.current().kind, TokenKind::Delim(c) if BROWSERHACK_DELIMS.contains(&c));
        if consumed {
            self.bump_raw();
        }
        consumed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Node;
    use crate::options::ParserOptions;

    fn parse_one(source: &str) -> Option<u32> {
        let mut parser = Parser::new(source, ParserOptions::default());
        parser.parse_declaration()
    }

    #[test]
    fn simple_declaration() {
        let idx = parse_one("color: red").expect("parses");
        assert!(idx > 0);
    }

    #[test]
    fn important_flag() {
        let mut parser = Parser::new("color: red !important", ParserOptions::default());
        let idx = parser.parse_declaration().expect("parses");
        assert!(parser.arena.has_flag(idx, flags::IMPORTANT));
    }

    #[test]
    fn rejects_non_declaration() {
        assert!(parse_one(".foo { }").is_none());
    }

    #[test]
    fn vendor_prefixed_name_flag() {
        let mut parser = Parser::new("-webkit-transform: none", ParserOptions::default());
        let idx = parser.parse_declaration().expect("parses");
        assert!(parser.arena.has_flag(idx, flags::VENDOR_PREFIXED));
    }

    #[test]
    fn single_hyphen_name_is_browserhack_not_vendor_prefixed() {
        let mut parser = Parser::new("-foo: none", ParserOptions::default());
        let idx = parser.parse_declaration().expect("parses");
        assert!(parser.arena.has_flag(idx, flags::BROWSERHACK));
        assert!(!parser.arena.has_flag(idx, flags::VENDOR_PREFIXED));
    }

    #[test]
    fn custom_property_is_neither_hack_nor_vendor_prefixed() {
        let mut parser = Parser::new("--my-var: none", ParserOptions::default());
        let idx = parser.parse_declaration().expect("parses");
        assert!(!parser.arena.has_flag(idx, flags::BROWSERHACK));
        assert!(!parser.arena.has_flag(idx, flags::VENDOR_PREFIXED));
    }

    #[test]
    fn underscore_prefixed_name_is_browserhack() {
        let mut parser = Parser::new("_color: red", ParserOptions::default());
        let idx = parser.parse_declaration().expect("parses");
        assert!(parser.arena.has_flag(idx, flags::BROWSERHACK));
        assert_eq!(Node::new(&parser.arena, parser.source, idx).property(), "_color");
    }

    #[test]
    fn delim_browserhack_prefixes() {
        for source in ["*zoom: 1", "+color: red", "$color: red", "&color: red", "~color: red"] {
            let mut parser = Parser::new(source, ParserOptions::default());
            let idx = parser.parse_declaration().expect("parses");
            assert!(parser.arena.has_flag(idx, flags::BROWSERHACK), "{source}");
        }
    }

    #[test]
    fn hash_browserhack_prefix() {
        let mut parser = Parser::new("#color: red", ParserOptions::default());
        let idx = parser.parse_declaration().expect("parses");
        assert!(parser.arena.has_flag(idx, flags::BROWSERHACK));
        assert_eq!(Node::new(&parser.arena, parser.source, idx).property(), "#color");
    }
}
