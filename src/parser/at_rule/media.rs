//! `@media` prelude: a comma-separated media query list.
//!
//! Grounded on the teacher's `parser/at_rule/media.rs`
//! (`parse_media_query_list`/`parse_media_query`/
//! `parse_media_feature_or_range`/`parse_media_feature_range`): the
//! lookahead-based feature-vs-range disambiguation in particular comes
//! straight from `parse_media_feature_or_range`'s save/restore shape,
//! since both forms start with `'('` and can't be told apart without
//! scanning past the feature name.

use crate::arena::{flags, NodeKind};
use crate::token::{Token, TokenKind};

use super::super::Parser;

impl<'a> Parser<'a> {
    pub(crate) fn parse_media_prelude(&mut self) -> Vec<u32> {
        self.skip_trivia();
        let mut items = Vec::new();
        loop {
            items.push(self.parse_media_query());
            self.skip_trivia();
            if self.current().kind != TokenKind::Comma {
                break;
            }
            let comma = self.current();
            items.push(self.make_operator_node(comma));
            self.bump_raw();
            self.skip_trivia();
        }
        items
    }

    fn parse_media_query(&mut self) -> u32 {
        let start = self.current();
        let mut children = Vec::new();

        if self.current().kind == TokenKind::Ident {
            let text = self.current().text(self.source).to_ascii_lowercase();
            if text == "not" || text == "only" {
                let t = self.current();
                self.bump_raw();
                children.push(self.arena.create_node(NodeKind::PreludeOperator, t.start, t.len(), t.line, t.column));
                self.skip_trivia();
            }
        }

        if self.current().kind == TokenKind::Ident {
            let t = self.current();
            self.bump_raw();
            children.push(self.arena.create_node(NodeKind::MediaType, t.start, t.len(), t.line, t.column));
            self.skip_trivia();
        }

        loop {
            if self.current().kind == TokenKind::Ident && self.current().text(self.source).eq_ignore_ascii_case("and") {
                let t = self.current();
                self.bump_raw();
                children.push(self.arena.create_node(NodeKind::PreludeOperator, t.start, t.len(), t.line, t.column));
                self.skip_trivia();
            } else if self.current().kind == TokenKind::LeftParen {
                children.push(self.parse_media_feature_or_range());
                self.skip_trivia();
            } else {
                break;
            }
        }

        let end = children.last().map_or(start.end, |&n| self.node_end(n));
        let node = self.arena.create_node(NodeKind::MediaQuery, start.start, end - start.start, start.line, start.column);
        self.arena.append_children(node, &children);
        node
    }

    /// `'(' <ident> ':' <value> ')'` or a range comparison like
    /// `'(' <value> ('<' | '<=' | '>' | '>=' | '=') <ident> [('<' | '<=' | ...)
    /// <value>] ')'`. Both start with `(`; we speculatively try the range
    /// form first since it is the more specific shape, and fall back to
    /// a plain feature on failure.
    pub(crate) fn parse_media_feature_or_range(&mut self) -> u32 {
        let open = self.current();
        self.bump_raw();
        self.skip_trivia();

        let snapshot = self.save();
        if let Some(range) = self.try_parse_media_range(open) {
            return range;
        }
        self.restore(snapshot);

        let name_tok = self.current();
        let has_name = name_tok.kind == TokenKind::Ident;
        let mut error = !has_name;
        if has_name {
            self.bump_raw();
        }
        self.skip_trivia();

        let mut value_children = Vec::new();
        if self.current().kind == TokenKind::Colon {
            self.bump_raw();
            self.skip_trivia();
            if let Some(v) = self.parse_one_value_item() {
                value_children.push(v);
            } else {
                error = true;
            }
            self.skip_trivia();
        }

        let end = if self.current().kind == TokenKind::RightParen {
            let close = self.current();
            self.bump_raw();
            close.end
        } else {
            error = true;
            self.current().start
        };

        let node = self.arena.create_node(NodeKind::MediaFeature, open.start, end - open.start, open.line, open.column);
        if has_name {
            self.arena.set_content_span(node, (name_tok.start - open.start) as u16, name_tok.len() as u16);
        }
        self.arena.append_children(node, &value_children);
        if error {
            self.arena.set_flag(node, flags::HAS_ERROR);
        }
        node
    }

    fn try_parse_media_range(&mut self, open: Token) -> Option<u32> {
        let first = self.parse_one_value_item()?;
        self.skip_trivia();
        let cmp1 = self.parse_comparison_operator()?;
        self.skip_trivia();
        let mid = self.parse_one_value_item()?;
        self.skip_trivia();

        let mut children = vec![first, cmp1, mid];
        if matches!(self.current().kind, TokenKind::Delim('<') | TokenKind::Delim('>') | TokenKind::Delim('=')) {
            let cmp2 = self.parse_comparison_operator()?;
            self.skip_trivia();
            let last = self.parse_one_value_item()?;
            children.push(cmp2);
            children.push(last);
            self.skip_trivia();
        }

        if self.current().kind != TokenKind::RightParen {
            return None;
        }
        let close = self.current();
        self.bump_raw();

        let node = self.arena.create_node(NodeKind::FeatureRange, open.start, close.end - open.start, open.line, open.column);
        if let Some(&name_child) = children.iter().find(|&&c| self.arena.kind(c) == NodeKind::Identifier) {
            let delta = (self.node_start(name_child) - open.start) as u16;
            let len = self.arena.length(name_child) as u16;
            self.arena.set_content_span(node, delta, len);
        }
        self.arena.append_children(node, &children);
        Some(node)
    }

    fn parse_comparison_operator(&mut self) -> Option<u32> {
        let t = self.current();
        match t.kind {
            TokenKind::Delim('<') | TokenKind::Delim('>') => {
                self.bump_raw();
                let mut end = t.end;
                if self.current().kind == TokenKind::Delim('=') {
                    end = self.current().end;
                    self.bump_raw();
                }
                Some(self.arena.create_node(NodeKind::PreludeOperator, t.start, end - t.start, t.line, t.column))
            }
            TokenKind::Delim('=') => {
                self.bump_raw();
                Some(self.arena.create_node(NodeKind::PreludeOperator, t.start, t.len(), t.line, t.column))
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::ParserOptions;

    #[test]
    fn plain_feature() {
        let mut parser = Parser::new("(min-width: 600px)", ParserOptions::default());
        let node = parser.parse_media_feature_or_range();
        assert_eq!(parser.arena.kind(node), NodeKind::MediaFeature);
    }

    #[test]
    fn range_feature() {
        let mut parser = Parser::new("(400px <= width <= 700px)", ParserOptions::default());
        let node = parser.parse_media_feature_or_range();
        assert_eq!(parser.arena.kind(node), NodeKind::FeatureRange);
        assert_eq!(parser.arena.children(node).count(), 5);
        let (delta, len) = parser.arena.content_span(node);
        let start = (parser.arena.start_offset(node) + delta as u32) as usize;
        assert_eq!(&parser.source[start..start + len as usize], "width");
    }

    #[test]
    fn query_list_with_type_and_feature() {
        let mut parser = Parser::new("screen and (min-width: 600px), print", ParserOptions::default());
        let items = parser.parse_media_prelude();
        // [MediaQuery, Operator(','), MediaQuery]
        assert_eq!(items.len(), 3);
        assert_eq!(parser.arena.kind(items[0]), NodeKind::MediaQuery);
        assert_eq!(parser.arena.kind(items[2]), NodeKind::MediaQuery);
    }
}
