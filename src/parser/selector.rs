//! Selector-list, compound-selector, and pseudo-class/element parsing.
//!
//! Grounded on the teacher's `parser/selector.rs` for the
//! combinator/compound loop and `parser/pseudo.rs` for the functional
//! pseudo-class dispatch table (`parse_pseudo_function`): the name-keyed
//! match over `dir`/`has`/`matches`/`is`/`-moz-any`/`-webkit-any`/`where`/
//! `not` (selector-list argument), `nth-child`/`nth-last-child`/
//! `nth-of-type`/`nth-last-of-type`/`nth-col`/`nth-last-col` (An+B
//! argument, optionally with an `of <selector-list>` suffix),
//! `slotted`/`host`/`host-context` (single selector argument), and `lang`
//! (comma-separated string/ident arguments, each wrapped as `LangSelector`).
//!
//! The tokenizer always fuses a pseudo function's name and its opening
//! `(` into one `Function` token (see `tokenizer.rs::finish_ident_like`),
//! so a functional pseudo-class is recognized by the token *after* the
//! colon being `Function`, not by a separate `Ident` + `LeftParen` pair.

use crate::arena::{flags, AttrFlag, AttrOperator, NodeKind};
use crate::token::TokenKind;

use super::declaration::is_vendor_prefixed_name;
use super::Parser;

impl<'a> Parser<'a> {
    /// `SelectorList = Selector (',' Selector)*`. `allow_relative` tracks
    /// whether a leading combinator (`> a`, `+ a`) is permitted, which it
    /// is for nested style rules but not for a stylesheet's top-level
    /// rules.
    pub(crate) fn parse_selector_list(&mut self, allow_relative: bool) -> u32 {
        let start = self.current();
        let mut items = vec![self.parse_selector(allow_relative)];
        loop {
            self.skip_trivia();
            if self.current().kind != TokenKind::Comma {
                break;
            }
            self.bump_raw();
            self.skip_trivia();
            items.push(self.parse_selector(allow_relative));
        }
        let end = self.node_end(*items.last().expect("at least one selector"));
        let node = self.arena.create_node(NodeKind::SelectorList, start.start, end - start.start, start.line, start.column);
        self.arena.append_children(node, &items);
        node
    }

    /// One selector: a sequence of compound selectors joined by explicit
    /// (`>`, `+`, `~`, `||`) or implicit (descendant, whitespace) combinators.
    fn parse_selector(&mut self, allow_relative: bool) -> u32 {
        let start = self.current();
        let mut parts = Vec::new();

        if allow_relative {
            if let Some(combinator) = self.try_parse_leading_combinator() {
                parts.push(combinator);
            }
        }

        parts.push(self.parse_compound_selector());

        loop {
            let trivia = self.skip_trivia_capture();
            match self.current().kind {
                TokenKind::Delim('>') | TokenKind::Delim('+') | TokenKind::Delim('~') => {
                    let t = self.current();
                    self.bump_raw();
                    self.skip_trivia();
                    parts.push(self.arena.create_node(NodeKind::Combinator, t.start, t.len(), t.line, t.column));
                    if !self.starts_compound_selector() {
                        break;
                    }
                    parts.push(self.parse_compound_selector());
                }
                _ if self.starts_compound_selector() && trivia.is_some() => {
                    // Descendant combinator: whitespace with no explicit
                    // combinator token. The combinator node's span is the
                    // whitespace gap itself.
                    let t = trivia.expect("checked above");
                    parts.push(self.arena.create_node(NodeKind::Combinator, t.start, t.len(), t.line, t.column));
                    parts.push(self.parse_compound_selector());
                }
                _ => break,
            }
        }

        if parts.len() == 1 {
            return parts[0];
        }
        let end = self.node_end(*parts.last().expect("at least one part"));
        let node = self.arena.create_node(NodeKind::Selector, start.start, end - start.start, start.line, start.column);
        self.arena.append_children(node, &parts);
        node
    }

    fn try_parse_leading_combinator(&mut self) -> Option<u32> {
        self.skip_trivia();
        match self.current().kind {
            TokenKind::Delim('>') | TokenKind::Delim('+') | TokenKind::Delim('~') => {
                let t = self.current();
                self.bump_raw();
                self.skip_trivia();
                Some(self.arena.create_node(NodeKind::Combinator, t.start, t.len(), t.line, t.column))
            }
            _ => None,
        }
    }

    fn starts_compound_selector(&self) -> bool {
        matches!(
            self.current().kind,
            TokenKind::Ident
                | TokenKind::Hash { .. }
                | TokenKind::Colon
                | TokenKind::LeftBracket
                | TokenKind::Delim('*')
                | TokenKind::Delim('.')
                | TokenKind::Delim('&')
        )
    }

    /// A compound selector is a flat run of simple selectors with no
    /// separator between them (`div.foo#bar:hover`); each call to
    /// `parse_simple_selector` consumes exactly one. The first simple
    /// selector is always consumed, even when the current token isn't one
    /// `starts_compound_selector` recognizes (e.g. a stray keyframe
    /// percentage) — `parse_simple_selector`'s fallback arm turns that
    /// into an `HAS_ERROR` node rather than leaving nothing to return.
    fn parse_compound_selector(&mut self) -> u32 {
        let start = self.current();
        let mut simples = vec![self.parse_simple_selector()];
        while self.starts_compound_selector() {
            simples.push(self.parse_simple_selector());
            if matches!(self.current().kind, TokenKind::Whitespace | TokenKind::Comment) {
                break;
            }
        }
        if simples.len() == 1 {
            return simples[0];
        }
        let end = self.node_end(*simples.last().expect("just pushed at least one"));
        let node = self.arena.create_node(NodeKind::Selector, start.start, end - start.start, start.line, start.column);
        self.arena.append_children(node, &simples);
        node
    }

    fn parse_simple_selector(&mut self) -> u32 {
        match self.current().kind {
            TokenKind::Delim('*') => self.finish_universal_selector(),
            TokenKind::Delim('&') => {
                let t = self.current();
                self.bump_raw();
                self.arena.create_node(NodeKind::NestingSelector, t.start, t.len(), t.line, t.column)
            }
            TokenKind::Delim('.') => self.parse_class_selector(),
            TokenKind::Hash { .. } => self.parse_id_selector(),
            TokenKind::LeftBracket => self.parse_attribute_selector(),
            TokenKind::Colon => self.parse_pseudo_selector(),
            TokenKind::Ident => self.finish_type_selector(),
            _ => {
                let t = self.current();
                self.bump_raw();
                let n = self.arena.create_node(NodeKind::TypeSelector, t.start, t.len(), t.line, t.column);
                self.arena.set_flag(n, flags::HAS_ERROR);
                n
            }
        }
    }

    fn finish_universal_selector(&mut self) -> u32 {
        let t = self.current();
        self.bump_raw();
        self.arena.create_node(NodeKind::UniversalSelector, t.start, t.len(), t.line, t.column)
    }

    fn finish_type_selector(&mut self) -> u32 {
        let t = self.current();
        self.bump_raw();
        let vendor = is_vendor_prefixed_name(t.text(self.source));
        let n = self.arena.create_node(NodeKind::TypeSelector, t.start, t.len(), t.line, t.column);
        if vendor {
            self.arena.set_flag(n, flags::VENDOR_PREFIXED);
        }
        n
    }

    fn parse_class_selector(&mut self) -> u32 {
        let dot = self.current();
        self.bump_raw();
        let name_end = if self.current().kind == TokenKind::Ident {
            let name = self.current();
            self.bump_raw();
            name.end
        } else {
            dot.end
        };
        let n = self.arena.create_node(NodeKind::ClassSelector, dot.start, name_end - dot.start, dot.line, dot.column);
        self.arena.set_content_span(n, 1, (name_end - dot.start - 1) as u16);
        n
    }

    fn parse_id_selector(&mut self) -> u32 {
        let t = self.current();
        self.bump_raw();
        let n = self.arena.create_node(NodeKind::IdSelector, t.start, t.len(), t.line, t.column);
        self.arena.set_content_span(n, 1, (t.len() - 1) as u16);
        n
    }

    /// `'[' wq-name (attr-operator (string | ident) flag?)? ']'`
    fn parse_attribute_selector(&mut self) -> u32 {
        let open = self.current();
        self.bump_raw();
        self.skip_trivia();

        let name_tok = self.current();
        let has_name = name_tok.kind == TokenKind::Ident;
        if has_name {
            self.bump_raw();
        }
        self.skip_trivia();

        let mut operator = AttrOperator::None;
        let mut error = !has_name;

        let op_start = self.current();
        match self.current().kind {
            TokenKind::Delim('=') => {
                operator = AttrOperator::Equals;
                self.bump_raw();
            }
            TokenKind::Delim('~') if self.peek_delim_pair('=') => {
                operator = AttrOperator::Includes;
                self.bump_raw();
                self.bump_raw();
            }
            TokenKind::Delim('|') if self.peek_delim_pair('=') => {
                operator = AttrOperator::DashMatch;
                self.bump_raw();
                self.bump_raw();
            }
            TokenKind::Delim('^') if self.peek_delim_pair('=') => {
                operator = AttrOperator::PrefixMatch;
                self.bump_raw();
                self.bump_raw();
            }
            TokenKind::Delim('$') if self.peek_delim_pair('=') => {
                operator = AttrOperator::SuffixMatch;
                self.bump_raw();
                self.bump_raw();
            }
            TokenKind::Delim('*') if self.peek_delim_pair('=') => {
                operator = AttrOperator::SubstringMatch;
                self.bump_raw();
                self.bump_raw();
            }
            TokenKind::RightBracket | TokenKind::Eof => {}
            _ => error = true,
        }
        let _ = op_start;

        let mut value_tok = None;
        if operator != AttrOperator::None {
            self.skip_trivia();
            match self.current().kind {
                TokenKind::String | TokenKind::Ident => {
                    value_tok = Some(self.current());
                    self.bump_raw();
                }
                _ => error = true,
            }
            self.skip_trivia();
        }

        let mut flag = AttrFlag::None;
        if matches!(self.current().kind, TokenKind::Ident) {
            let text = self.current().text(self.source);
            if text.eq_ignore_ascii_case("i") {
                flag = AttrFlag::IgnoreCase;
                self.bump_raw();
            } else if text.eq_ignore_ascii_case("s") {
                flag = AttrFlag::CaseSensitive;
                self.bump_raw();
            }
            self.skip_trivia();
        }

        let end = if self.current().kind == TokenKind::RightBracket {
            let close = self.current();
            self.bump_raw();
            close.end
        } else {
            error = true;
            self.current().start
        };

        let node = self.arena.create_node(NodeKind::AttributeSelector, open.start, end - open.start, open.line, open.column);
        if has_name {
            self.arena.set_content_span(node, (name_tok.start - open.start) as u16, name_tok.len() as u16);
        }
        if let Some(tok) = value_tok {
            self.arena.set_value_span(node, (tok.start - open.start) as u16, tok.len() as u16);
        }
        self.arena.set_attr(node, operator, flag);
        if error {
            self.arena.set_flag(node, flags::HAS_ERROR);
        }
        node
    }

    /// True if the token immediately following the current one (with no
    /// intervening whitespace, since e.g. `~=` requires adjacency) is
    /// `Delim(expected)` — a pure lookahead that does not move the cursor.
    fn peek_delim_pair(&self, expected: char) -> bool {
        self.tokenizer.lookahead(0).kind.is_delim(expected)
    }

    fn parse_pseudo_selector(&mut self) -> u32 {
        let first_colon = self.current();
        self.bump_raw();
        let mut double = false;
        if self.current().kind == TokenKind::Colon {
            double = true;
            self.bump_raw();
        }
        let kind = if double { NodeKind::PseudoElementSelector } else { NodeKind::PseudoClassSelector };

        match self.current().kind {
            TokenKind::Ident => {
                let name = self.current();
                self.bump_raw();
                let start_tok = if double { first_colon } else { first_colon };
                let node = self.arena.create_node(kind, start_tok.start, name.end - start_tok.start, start_tok.line, start_tok.column);
                let name_delta = (name.start - start_tok.start) as u16;
                self.arena.set_content_span(node, name_delta, name.len() as u16);
                if is_vendor_prefixed_name(name.text(self.source)) {
                    self.arena.set_flag(node, flags::VENDOR_PREFIXED);
                }
                node
            }
            TokenKind::Function => {
                let func = self.current();
                self.bump_raw();
                let fn_name = &func.text(self.source)[..func.len() as usize - 1];
                let fn_name_owned = fn_name.to_string();
                let vendor_prefixed = is_vendor_prefixed_name(&fn_name_owned);

                self.skip_trivia();
                let children = self.parse_pseudo_function_args(&fn_name_owned);
                self.skip_trivia();
                let end = if self.current().kind == TokenKind::RightParen {
                    let close = self.current();
                    self.bump_raw();
                    close.end
                } else {
                    self.current().start
                };

                let node = self.arena.create_node(kind, first_colon.start, end - first_colon.start, first_colon.line, first_colon.column);
                let name_delta = (func.start - first_colon.start) as u16;
                self.arena.set_content_span(node, name_delta, func.len() as u16 - 1);
                self.arena.set_flag(node, flags::HAS_PARENS);
                if vendor_prefixed {
                    self.arena.set_flag(node, flags::VENDOR_PREFIXED);
                }
                self.arena.append_children(node, &children);
                node
            }
            _ => {
                let node = self.arena.create_node(kind, first_colon.start, first_colon.len(), first_colon.line, first_colon.column);
                self.arena.set_flag(node, flags::HAS_ERROR);
                node
            }
        }
    }

    /// Dispatches a functional pseudo-class's argument grammar by name,
    /// mirroring the teacher's `parse_pseudo_function` match. Unknown
    /// names fall back to a bare value sequence, since the surrounding
    /// `PseudoClassSelector` node is flagged `HAS_ERROR` by neither this
    /// function nor its caller — an unrecognized but well-formed argument
    /// list is not itself a syntax error.
    fn parse_pseudo_function_args(&mut self, name: &str) -> Vec<u32> {
        match name {
            // `:has()` is the one functional pseudo-class whose argument
            // grammar is a <relative-selector-list> — a leading
            // combinator (`> .foo`) is valid there and nowhere else
            // inside `:is()`/`:where()`/`:not()`/`:matches()`.
            "has" => vec![self.parse_selector_list(true)],
            "matches" | "is" | "-moz-any" | "-webkit-any" | "where" | "not" => {
                vec![self.parse_selector_list(false)]
            }
            "slotted" | "host" | "host-context" => {
                vec![self.parse_selector(false)]
            }
            "nth-child" | "nth-last-child" | "nth-of-type" | "nth-last-of-type" | "nth-col" | "nth-last-col" => {
                self.parse_nth_argument()
            }
            "dir" => {
                if self.current().kind == TokenKind::Ident {
                    let t = self.current();
                    self.bump_raw();
                    vec![self.arena.create_node(NodeKind::Identifier, t.start, t.len(), t.line, t.column)]
                } else {
                    Vec::new()
                }
            }
            "lang" => self.parse_lang_arguments(),
            _ => self.parse_value_sequence_until_rparen(),
        }
    }

    /// `:lang()` takes one or more comma-separated string or ident
    /// arguments, each wrapped as a `LangSelector`.
    fn parse_lang_arguments(&mut self) -> Vec<u32> {
        let mut items = Vec::new();
        loop {
            let t = self.current();
            match t.kind {
                TokenKind::Ident | TokenKind::String => {
                    self.bump_raw();
                    items.push(self.arena.create_node(NodeKind::LangSelector, t.start, t.len(), t.line, t.column));
                }
                _ => break,
            }
            self.skip_trivia();
            if self.current().kind != TokenKind::Comma {
                break;
            }
            self.bump_raw();
            self.skip_trivia();
        }
        items
    }

    fn parse_nth_argument(&mut self) -> Vec<u32> {
        let nth = self.parse_anplusb();
        self.skip_trivia();
        if self.current().kind == TokenKind::Ident && self.current().text(self.source).eq_ignore_ascii_case("of") {
            self.bump_raw();
            self.skip_trivia();
            let selector_list = self.parse_selector_list(true);
            let start = self.node_start(nth);
            let end = self.node_end(selector_list);
            let of_node = self.arena.create_node(NodeKind::NthOfSelector, start, end - start, self.node_line(nth), self.node_column(nth));
            self.arena.append_children(of_node, &[nth, selector_list]);
            return vec![of_node];
        }
        vec![nth]
    }

    /// Used only for an unrecognized pseudo-function name's argument
    /// list, where we still want to build *some* tree rather than
    /// discard the tokens.
    fn parse_value_sequence_until_rparen(&mut self) -> Vec<u32> {
        let mut items = Vec::new();
        self.skip_trivia();
        while !matches!(self.current().kind, TokenKind::RightParen | TokenKind::Eof) {
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

    fn parse(source: &str) -> (Parser<'_>, u32) {
        let mut parser = Parser::new(source, ParserOptions::default());
        let node = parser.parse_selector_list(false);
        (parser, node)
    }

    #[test]
    fn simple_type_selector() {
        let (parser, node) = parse("div");
        let child = parser.arena.first_child(node).expect("selector");
        assert_eq!(parser.arena.kind(child), NodeKind::TypeSelector);
    }

    #[test]
    fn compound_class_and_id() {
        let (parser, node) = parse("div.foo#bar");
        let selector = parser.arena.first_child(node).expect("selector");
        let kinds: Vec<_> = parser.arena.children(selector).map(|c| parser.arena.kind(c)).collect();
        assert_eq!(kinds, vec![NodeKind::TypeSelector, NodeKind::ClassSelector, NodeKind::IdSelector]);
    }

    #[test]
    fn descendant_combinator() {
        let (parser, node) = parse("div p");
        let selector = parser.arena.first_child(node).expect("selector");
        let kinds: Vec<_> = parser.arena.children(selector).map(|c| parser.arena.kind(c)).collect();
        assert_eq!(kinds, vec![NodeKind::TypeSelector, NodeKind::Combinator, NodeKind::TypeSelector]);
    }

    #[test]
    fn child_combinator() {
        let (parser, node) = parse("div > p");
        let selector = parser.arena.first_child(node).expect("selector");
        let kinds: Vec<_> = parser.arena.children(selector).map(|c| parser.arena.kind(c)).collect();
        assert_eq!(kinds, vec![NodeKind::TypeSelector, NodeKind::Combinator, NodeKind::TypeSelector]);
    }

    #[test]
    fn attribute_selector_with_operator() {
        let (parser, node) = parse("a[href^=\"https\"]");
        let selector = parser.arena.first_child(node).expect("selector");
        let kinds: Vec<_> = parser.arena.children(selector).map(|c| parser.arena.kind(c)).collect();
        assert_eq!(kinds, vec![NodeKind::TypeSelector, NodeKind::AttributeSelector]);
        let attr = parser.arena.children(selector).nth(1).expect("attribute selector");
        assert_eq!(parser.arena.attr_operator(attr), AttrOperator::PrefixMatch as u8);
        let (value_delta, value_len) = parser.arena.value_span(attr);
        let value_start = (parser.arena.start_offset(attr) + value_delta as u32) as usize;
        let value_text = &parser.source[value_start..value_start + value_len as usize];
        assert_eq!(value_text, "\"https\"");
    }

    #[test]
    fn nth_child_of_selector() {
        let (parser, node) = parse(":nth-child(2n+1 of .foo)");
        let pseudo = parser.arena.first_child(node).expect("pseudo");
        assert_eq!(parser.arena.kind(pseudo), NodeKind::PseudoClassSelector);
        let of_node = parser.arena.first_child(pseudo).expect("nth-of");
        assert_eq!(parser.arena.kind(of_node), NodeKind::NthOfSelector);
    }

    #[test]
    fn selector_list_with_comma() {
        let (parser, node) = parse("div, p");
        assert_eq!(parser.arena.children(node).count(), 2);
    }
}
