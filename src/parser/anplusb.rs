//! An+B parsing for `nth-child()`, `nth-of-type()`, and friends.
//!
//! The teacher's `parser/anplusb.rs` reconstructs the `a`/`b` integers
//! token-by-token during parsing (`do_dimension_block`/`do_negative_block`)
//! and stores them as an owned `AnPlusB { a, b }`. This parser instead
//! only records the span of the whole expression — an `NthSelector` node
//! — and leaves splitting it into its `a`/`b` parts to the façade
//! (`Node::nth_a`/`Node::nth_b`, `crate::node::anplusb_parts`), since the
//! grammar's own token shapes (`"even"`, `"-n+3"`, a lone `Dimension`, a
//! `Number` followed by a separate signed `Number`) don't need to be
//! distinguished again once the text is available for re-splitting.

use crate::arena::NodeKind;
use crate::token::TokenKind;

use super::Parser;

fn starts_with_sign(text: &str) -> bool {
    text.starts_with('+') || text.starts_with('-')
}

impl<'a> Parser<'a> {
    /// Parses the An+B expression starting at the current token and
    /// returns the `NthSelector` node. Accepts the keyword forms
    /// (`odd`, `even`), a single `Dimension`/`Number` token (`"2n"`,
    /// `"3"`), or a `Dimension` followed by a separately-tokenized signed
    /// offset (`"2n" "+1"` — CSS syntax tokenizes `2n+1` as one
    /// `Dimension` only when there's no space before the sign; with a
    /// space, `2n + 1`, the sign is tokenized on its own).
    pub(crate) fn parse_anplusb(&mut self) -> u32 {
        let start = self.current();

        if matches!(start.kind, TokenKind::Ident)
            && (start.text(self.source).eq_ignore_ascii_case("odd") || start.text(self.source).eq_ignore_ascii_case("even"))
        {
            self.bump_raw();
            return self.arena.create_node(NodeKind::NthSelector, start.start, start.len(), start.line, start.column);
        }

        self.bump_raw();
        let mut end = start.end;

        // A trailing `+1`/`-1` offset is fused into a single signed
        // `Number` token by the tokenizer whenever no whitespace
        // separates the sign from its digit (`2n+1`, `2n +1`); with
        // whitespace on both sides (`2n + 1`) the sign tokenizes as its
        // own `Delim` and the digit as an unsigned `Number`. Only a
        // bare `n`/`-n`/`Nn`-style dimension or ident can carry this
        // tail — a lone `Number` like `"3"` never does.
        let looks_like_an = matches!(start.kind, TokenKind::Dimension | TokenKind::Ident)
            && start.text(self.source).trim_end_matches(|c: char| c.is_ascii_digit() || c == '.').to_ascii_lowercase().ends_with('n');

        if looks_like_an {
            let snapshot = self.save();
            self.skip_trivia();
            match self.current().kind {
                TokenKind::Number if starts_with_sign(self.current().text(self.source)) => {
                    end = self.current().end;
                    self.bump_raw();
                }
                TokenKind::Delim('+') | TokenKind::Delim('-') => {
                    self.bump_raw();
                    self.skip_trivia();
                    if self.current().kind == TokenKind::Number && !starts_with_sign(self.current().text(self.source)) {
                        end = self.current().end;
                        self.bump_raw();
                    } else {
                        self.restore(snapshot);
                    }
                }
                _ => {
                    self.restore(snapshot);
                }
            }
        }

        self.arena.create_node(NodeKind::NthSelector, start.start, end - start.start, start.line, start.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::ParserOptions;

    fn text_of(source: &str) -> String {
        let mut parser = Parser::new(source, ParserOptions::default());
        let node = parser.parse_anplusb();
        let start = parser.arena.start_offset(node) as usize;
        let end = parser.arena.end_offset(node) as usize;
        source[start..end].to_string()
    }

    #[test]
    fn keyword_forms() {
        assert_eq!(text_of("odd"), "odd");
        assert_eq!(text_of("even"), "even");
    }

    #[test]
    fn fused_dimension() {
        assert_eq!(text_of("2n+1"), "2n+1");
        assert_eq!(text_of("-n+3"), "-n+3");
    }

    #[test]
    fn split_sign_and_number() {
        assert_eq!(text_of("2n + 1"), "2n + 1");
    }

    #[test]
    fn bare_number() {
        assert_eq!(text_of("3"), "3");
    }
}
