//! Value-sequence parsing: the right-hand side of a declaration, or a
//! bare value passed to the standalone `parse_value` entry point.
//!
//! Grounded on the teacher's `parse_value_sequence`/`parse_value`
//! (`parser/value.rs`): the token-kind dispatch over
//! Hash/Comma/String/Dimension/Percentage/Number/Url/Function/Ident/Delim,
//! rebuilt to emit arena nodes instead of owned `CssValue` variants. The
//! teacher's MS-filter `progid:` special-casing inside `Ident` has no
//! counterpart here and is not reproduced.

use crate::arena::{flags, NodeKind};
use crate::token::TokenKind;

use super::Parser;

impl<'a> Parser<'a> {
    /// Parses a run of value components up to EOF. Used by the
    /// standalone `parse_value` entry point; declarations instead call
    /// `parse_one_value_item` in a loop so they can interleave the
    /// `!important` check between items.
    pub(crate) fn parse_value_sequence(&mut self) -> Vec<u32> {
        self.skip_trivia();
        let mut nodes = Vec::new();
        while self.current().kind != TokenKind::Eof {
            match self.parse_one_value_item() {
                Some(node) => nodes.push(node),
                None => {
                    self.bump_raw();
                }
            }
            self.skip_trivia();
        }
        nodes
    }

    /// Parses exactly one value component and leaves the cursor
    /// positioned just past it (trivia not yet skipped). Returns `None`
    /// for a token that cannot start a value (e.g. a stray `}`), in
    /// which case the caller should advance past it itself.
    pub(crate) fn parse_one_value_item(&mut self) -> Option<u32> {
        let t = self.current();
        let node = match t.kind {
            TokenKind::Hash { .. } => {
                self.bump_raw();
                self.arena.create_node(NodeKind::Hash, t.start, t.len(), t.line, t.column)
            }
            TokenKind::Comma | TokenKind::Colon => {
                self.bump_raw();
                self.make_operator_node(t)
            }
            TokenKind::String => {
                self.bump_raw();
                self.arena.create_node(NodeKind::String, t.start, t.len(), t.line, t.column)
            }
            TokenKind::BadString => {
                self.bump_raw();
                let n = self.arena.create_node(NodeKind::String, t.start, t.len(), t.line, t.column);
                self.arena.set_flag(n, flags::HAS_ERROR);
                n
            }
            TokenKind::Number => {
                self.bump_raw();
                self.arena.create_node(NodeKind::Number, t.start, t.len(), t.line, t.column)
            }
            TokenKind::Percentage | TokenKind::Dimension => {
                self.bump_raw();
                self.arena.create_node(NodeKind::Dimension, t.start, t.len(), t.line, t.column)
            }
            TokenKind::Url => {
                self.bump_raw();
                self.arena.create_node(NodeKind::Url, t.start, t.len(), t.line, t.column)
            }
            TokenKind::BadUrl => {
                self.bump_raw();
                let n = self.arena.create_node(NodeKind::Url, t.start, t.len(), t.line, t.column);
                self.arena.set_flag(n, flags::HAS_ERROR);
                n
            }
            TokenKind::Function => return Some(self.parse_function_value()),
            TokenKind::LeftParen => return Some(self.parse_parenthesis_value()),
            TokenKind::Ident => {
                self.bump_raw();
                self.arena.create_node(NodeKind::Identifier, t.start, t.len(), t.line, t.column)
            }
            TokenKind::Delim(c) if matches!(c, '+' | '-' | '*' | '/') => {
                self.bump_raw();
                self.make_operator_node(t)
            }
            _ => return None,
        };
        Some(node)
    }

    /// `Function` token: either a quoted `url(` (the tokenizer stops the
    /// Function token right at `(` when the next non-whitespace
    /// character is a quote — see the tokenizer's `finish_ident_like`)
    /// or a generic function whose arguments are a nested value
    /// sequence up to the matching `)`. `url(`/`src(` is special-cased to
    /// produce a `Url` node (with the quoted string as its one child)
    /// rather than a generic `Function` node, so the quoted and
    /// unquoted spellings of `url(...)` both yield the same node kind.
    fn parse_function_value(&mut self) -> u32 {
        let t = self.current();
        let name = &t.text(self.source)[..t.len() as usize - 1];
        let is_url = name.eq_ignore_ascii_case("url") || name.eq_ignore_ascii_case("src");
        self.bump_raw();
        let kind = if is_url { NodeKind::Url } else { NodeKind::Function };
        let node = self.arena.create_node(kind, t.start, t.len(), t.line, t.column);
        self.arena.set_content_span(node, 0, (t.len() - 1) as u16);

        self.skip_trivia();
        let mut args = Vec::new();
        loop {
            match self.current().kind {
                TokenKind::RightParen | TokenKind::Eof => break,
                _ => match self.parse_one_value_item() {
                    Some(arg) => args.push(arg),
                    None => {
                        self.bump_raw();
                    }
                },
            }
            self.skip_trivia();
        }
        let end = if self.current().kind == TokenKind::RightParen {
            let close = self.current();
            self.bump_raw();
            close.end
        } else {
            self.current().start
        };
        self.arena.set_flag(node, flags::HAS_PARENS);
        self.arena.append_children(node, &args);
        self.arena.set_length(node, end - t.start);
        node
    }

    /// A bare `(...)` group used as grouping inside a value (not preceded
    /// by a function name), e.g. `calc((1px + 2px) * 2)`'s inner group.
    fn parse_parenthesis_value(&mut self) -> u32 {
        let open = self.current();
        self.bump_raw();
        let node = self.arena.create_node(NodeKind::Parenthesis, open.start, open.len(), open.line, open.column);
        self.skip_trivia();
        let mut items = Vec::new();
        loop {
            match self.current().kind {
                TokenKind::RightParen | TokenKind::Eof => break,
                _ => match self.parse_one_value_item() {
                    Some(item) => items.push(item),
                    None => {
                        self.bump_raw();
                    }
                },
            }
            self.skip_trivia();
        }
        let end = if self.current().kind == TokenKind::RightParen {
            let close = self.current();
            self.bump_raw();
            close.end
        } else {
            self.current().start
        };
        self.arena.set_flag(node, flags::HAS_PARENS);
        self.arena.append_children(node, &items);
        self.arena.set_length(node, end - open.start);
        node
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::arena::NodeKind;
    use crate::options::ParserOptions;

    fn kinds(source: &str) -> Vec<NodeKind> {
        let mut parser = Parser::new(source, ParserOptions::default());
        parser.parse_value_sequence().iter().map(|&i| parser.arena.kind(i)).collect()
    }

    #[test]
    fn simple_list() {
        assert_eq!(kinds("1px solid red"), vec![NodeKind::Dimension, NodeKind::Identifier, NodeKind::Identifier]);
    }

    #[test]
    fn function_with_args() {
        let mut parser = Parser::new("rgba(0, 0, 0, 0.5)", ParserOptions::default());
        let nodes = parser.parse_value_sequence();
        assert_eq!(nodes.len(), 1);
        assert_eq!(parser.arena.kind(nodes[0]), NodeKind::Function);
        assert!(parser.arena.has_children(nodes[0]));
    }

    #[test]
    fn url_token_is_single_node() {
        assert_eq!(kinds("url(foo.png)"), vec![NodeKind::Url]);
    }

    #[test]
    fn quoted_url_is_url_node_with_string_child() {
        let mut parser = Parser::new("url(\"foo.png\")", ParserOptions::default());
        let nodes = parser.parse_value_sequence();
        assert_eq!(nodes.len(), 1);
        assert_eq!(parser.arena.kind(nodes[0]), NodeKind::Url);
        let child = parser.arena.first_child(nodes[0]).expect("has string child");
        assert_eq!(parser.arena.kind(child), NodeKind::String);
    }

    #[test]
    fn quoted_src_is_also_a_url_node() {
        let mut parser = Parser::new("src(\"font.woff2\")", ParserOptions::default());
        let nodes = parser.parse_value_sequence();
        assert_eq!(nodes.len(), 1);
        assert_eq!(parser.arena.kind(nodes[0]), NodeKind::Url);
    }
}
