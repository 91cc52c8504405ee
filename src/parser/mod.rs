//! Top-level orchestration: rule/declaration/at-rule dispatch and the
//! shared cursor helpers every sub-parser builds on.
//!
//! Grounded on the teacher's `Css3` parser (`lib.rs`, `parser.rs`): the
//! split between a thin token-consumption layer (`consume`, `consume_any`,
//! `consume_whitespace_comments`, ...) and the per-construct parse
//! functions, and on `parser/block.rs`'s `parse_block`/`BlockParseMode`
//! split between style-rule bodies and generic at-rule bodies.

mod anplusb;
pub mod at_rule;
mod declaration;
mod selector;
mod value;

use crate::arena::{flags, NodeArena, NodeKind};
use crate::document::Document;
use crate::error::{ParseError, ParseResult};
use crate::options::ParserOptions;
use crate::token::{Token, TokenKind};
use crate::tokenizer::{Snapshot, Tokenizer};

pub(crate) struct Parser<'a> {
    tokenizer: Tokenizer<'a>,
    arena: NodeArena,
    source: &'a str,
    options: ParserOptions<'a>,
}

impl<'a> Parser<'a> {
    pub(crate) fn new(source: &'a str, options: ParserOptions<'a>) -> Self {
        let mut tokenizer = Tokenizer::new(source);
        tokenizer.next_raw();
        Parser {
            tokenizer,
            arena: NodeArena::with_capacity_hint(source.len()),
            source,
            options,
        }
    }

    pub(crate) fn into_arena(self) -> NodeArena {
        self.arena
    }

    fn current(&self) -> Token {
        self.tokenizer.current()
    }

    fn bump_raw(&mut self) -> Token {
        self.tokenizer.next_raw()
    }

    fn save(&self) -> Snapshot {
        self.tokenizer.save_position()
    }

    fn restore(&mut self, snap: Snapshot) {
        self.tokenizer.restore_position(snap);
    }

    fn node_start(&self, idx: u32) -> u32 {
        self.arena.start_offset(idx)
    }

    fn node_end(&self, idx: u32) -> u32 {
        self.arena.end_offset(idx)
    }

    fn node_line(&self, idx: u32) -> u32 {
        self.arena.start_line(idx)
    }

    fn node_column(&self, idx: u32) -> u32 {
        self.arena.start_column(idx)
    }

    fn fire_comment(&mut self, t: Token) {
        if let Some(cb) = self.options.on_comment.as_mut() {
            cb(t.start, t.end, t.len(), t.line, t.column);
        }
    }

    /// Skips whitespace and comments, firing `on_comment` for each
    /// comment seen, without creating Comment nodes. Used inside
    /// selectors/values/preludes where comments are pure separators.
    fn skip_trivia(&mut self) {
        self.skip_trivia_capture();
    }

    /// Same as `skip_trivia` but returns the first trivia token consumed
    /// (if any), so callers can compute the span of the gap — used by
    /// the selector parser to build descendant-combinator nodes.
    fn skip_trivia_capture(&mut self) -> Option<Token> {
        let mut first = None;
        loop {
            match self.current().kind {
                TokenKind::Whitespace => {
                    if first.is_none() {
                        first = Some(self.current());
                    }
                    self.bump_raw();
                }
                TokenKind::Comment => {
                    if first.is_none() {
                        first = Some(self.current());
                    }
                    let t = self.current();
                    self.fire_comment(t);
                    self.bump_raw();
                }
                _ => break,
            }
        }
        first
    }

    fn create_comment_node(&mut self, t: Token) -> u32 {
        self.fire_comment(t);
        self.arena.create_node(NodeKind::Comment, t.start, t.len(), t.line, t.column)
    }

    /// Scans forward to (but not past) the next unnested `;` or matching
    /// `}`, or EOF — the resynchronization point after a structural
    /// error. Grounded on `parse_until_rule_end`/`parse_until_declaration_end`.
    fn resync(&mut self) {
        let mut depth: i32 = 0;
        loop {
            match self.current().kind {
                TokenKind::Eof => break,
                TokenKind::LeftBrace | TokenKind::LeftParen | TokenKind::LeftBracket => {
                    depth += 1;
                    self.bump_raw();
                }
                TokenKind::RightBrace if depth == 0 => break,
                TokenKind::RightBrace | TokenKind::RightParen | TokenKind::RightBracket => {
                    depth -= 1;
                    self.bump_raw();
                }
                TokenKind::Semicolon if depth == 0 => {
                    self.bump_raw();
                    break;
                }
                _ => {
                    self.bump_raw();
                }
            }
        }
    }

    pub(crate) fn parse_stylesheet(&mut self) -> ParseResult<u32> {
        let stylesheet = self.arena.create_node(NodeKind::Stylesheet, 0, self.source.len() as u32, 1, 1);
        let children = self.parse_block_contents(false)?;
        self.arena.append_children(stylesheet, &children);
        if self.arena.is_overflowed() {
            return Err(ParseError::ArenaExhausted(format!("exceeded {} nodes", u32::MAX)));
        }
        Ok(stylesheet)
    }

    /// Parses the contents of a style-rule or at-rule block, or the
    /// top-level of the stylesheet when `in_block` is false. Stops at an
    /// unmatched `}` (block) or EOF (top level).
    fn parse_block_contents(&mut self, in_block: bool) -> ParseResult<Vec<u32>> {
        let mut children = Vec::new();
        loop {
            match self.current().kind {
                TokenKind::Eof => break,
                TokenKind::RightBrace if in_block => break,
                TokenKind::Whitespace => {
                    self.bump_raw();
                }
                TokenKind::Comment => {
                    let t = self.current();
                    children.push(self.create_comment_node(t));
                    self.bump_raw();
                }
                TokenKind::Semicolon => {
                    // Stray semicolon; tolerated.
                    self.bump_raw();
                }
                TokenKind::AtKeyword => {
                    children.push(self.parse_at_rule()?);
                }
                _ => {
                    let snapshot = self.save();
                    match self.parse_declaration() {
                        Some(node) => children.push(node),
                        None => {
                            self.restore(snapshot);
                            children.push(self.parse_rule(in_block)?);
                        }
                    }
                }
            }
        }
        Ok(children)
    }

    /// Parses one style rule: `SelectorList Block`. Error-tolerant:
    /// malformed rules are marked `HAS_ERROR` and resynchronized rather
    /// than aborting the whole parse, mirroring `parse_rule`/`parse_rule_internal`.
    fn parse_rule(&mut self, allow_relative: bool) -> ParseResult<u32> {
        log::trace!("parse_rule");
        let start = self.current();
        let prelude = self.parse_selector_list(allow_relative);

        if self.current().kind != TokenKind::LeftBrace {
            log::warn!("expected '{{' after selector list, found {:?}", self.current().kind);
            self.arena.set_flag(prelude, flags::HAS_ERROR);
            self.resync();
            let end = self.current().start.max(self.node_end(prelude));
            let node = self.arena.create_node(NodeKind::StyleRule, start.start, end - start.start, start.line, start.column);
            self.arena.append_children(node, &[prelude]);
            self.arena.set_flag(node, flags::HAS_ERROR);
            return Ok(node);
        }

        let brace = self.current();
        self.bump_raw();
        let block_children = self.parse_block_contents(true)?;
        let mut block_end = brace.end;
        if self.current().kind == TokenKind::RightBrace {
            block_end = self.current().end;
            self.bump_raw();
        }
        let block = self.arena.create_node(NodeKind::Block, brace.start, block_end - brace.start, brace.line, brace.column);
        self.arena.append_children(block, &block_children);

        let has_declarations = block_children.iter().any(|&c| self.arena.kind(c) == NodeKind::Declaration);

        let node = self.arena.create_node(NodeKind::StyleRule, start.start, block_end - start.start, start.line, start.column);
        self.arena.append_children(node, &[prelude, block]);
        self.arena.set_flag(node, flags::HAS_BLOCK);
        if has_declarations {
            self.arena.set_flag(node, flags::HAS_DECLARATIONS);
        }
        Ok(node)
    }

    fn make_operator_node(&mut self, t: Token) -> u32 {
        self.arena.create_node(NodeKind::Operator, t.start, t.len(), t.line, t.column)
    }
}

/// Parses a complete stylesheet, producing a `Document` rooted at the
/// `Stylesheet` node. The only fallible condition is arena exhaustion
/// (see the error handling design notes); every structural error in the
/// input is recorded on the tree instead of propagated.
///
/// `options` is taken by mutable reference rather than by value so a
/// caller can keep using the same `ParserOptions` (and its `on_comment`
/// callback) across several calls; the callback itself is moved into
/// this one parse rather than cloned, since `Box<dyn FnMut>` isn't
/// `Clone` and a comment callback has no meaningful "shared" semantics.
pub fn parse<'a>(source: &'a str, options: &mut ParserOptions<'a>) -> ParseResult<Document> {
    let opts = ParserOptions {
        parse_values: options.parse_values,
        parse_selectors: options.parse_selectors,
        parse_atrule_preludes: options.parse_atrule_preludes,
        on_comment: options.on_comment.take(),
    };
    let mut parser = Parser::new(source, opts);
    let root = parser.parse_stylesheet()?;
    let arena = parser.into_arena();
    Ok(Document::new(arena, source.to_string(), root))
}

/// Parses a single declaration. Infallible by construction: unrecognizable
/// input yields an empty Declaration at offset 0 flagged `HAS_ERROR`
/// rather than propagating a failure, matching the other three entry
/// points in the programmatic surface.
pub fn parse_declaration(source: &str) -> Document {
    let mut parser = Parser::new(source, ParserOptions::default());
    let node = match parser.parse_declaration() {
        Some(n) => n,
        None => {
            let n = parser.arena.create_node(NodeKind::Declaration, 0, 0, 1, 1);
            parser.arena.set_flag(n, flags::HAS_ERROR);
            n
        }
    };
    let arena = parser.into_arena();
    Document::new(arena, source.to_string(), node)
}

/// Parses a bare value sequence (no surrounding declaration). The
/// returned document's root is a synthetic `Value` node whose children
/// are the parsed value components, in source order.
pub fn parse_value(source: &str) -> Document {
    let mut parser = Parser::new(source, ParserOptions::default());
    let children = parser.parse_value_sequence();
    let root = parser.arena.create_node(NodeKind::Value, 0, source.len() as u32, 1, 1);
    parser.arena.append_children(root, &children);
    let arena = parser.into_arena();
    Document::new(arena, source.to_string(), root)
}

/// Parses the prelude of a named at-rule in isolation. The returned
/// document's root is a synthetic `AtRule` node (name span empty — the
/// name was supplied by the caller, not present in `source`) whose
/// children are the prelude's component nodes.
pub fn parse_atrule_prelude(name: &str, source: &str) -> Document {
    let mut parser = Parser::new(source, ParserOptions::default());
    let children = parser.parse_at_rule_prelude_nodes(name);
    let root = parser.arena.create_node(NodeKind::AtRule, 0, source.len() as u32, 1, 1);
    parser.arena.append_children(root, &children);
    let arena = parser.into_arena();
    Document::new(arena, source.to_string(), root)
}
