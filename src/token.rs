//! Token kinds produced by the tokenizer.
//!
//! Unlike the teacher's `TokenType` (`tokenizer.rs`), which owns a `String`
//! or `f32` payload per variant, tokens here carry only a `(kind, start,
//! end, line, column)` span into the source. Numeric/textual values are
//! recovered on demand by slicing `source[start..end]` and reparsing —
//! the whole point of the arena design is that nothing is copied out of
//! the source until a caller actually asks for it.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TokenKind {
    Ident,
    Function,
    AtKeyword,
    Hash { is_id: bool },
    String,
    BadString,
    Url,
    BadUrl,
    Delim(char),
    Number,
    Percentage,
    Dimension,
    Whitespace,
    Cdo,
    Cdc,
    Colon,
    Semicolon,
    Comma,
    LeftBracket,
    RightBracket,
    LeftParen,
    RightParen,
    LeftBrace,
    RightBrace,
    Comment,
    UnicodeRange,
    Eof,
}

impl TokenKind {
    pub fn is_whitespace_or_comment(&self) -> bool {
        matches!(self, TokenKind::Whitespace | TokenKind::Comment)
    }

    pub fn is_delim(&self, ch: char) -> bool {
        matches!(self, TokenKind::Delim(c) if *c == ch)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub start: u32,
    pub end: u32,
    pub line: u32,
    pub column: u32,
}

impl Token {
    pub fn len(&self) -> u32 {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.end == self.start
    }

    pub fn text<'a>(&self, source: &'a str) -> &'a str {
        &source[self.start as usize..self.end as usize]
    }
}
