//! CSS Syntax Level 3 tokenizer.
//!
//! Grounded on the teacher's `Tokenizer` (`tokenizer.rs`): the dispatch
//! table in `consume_token`, the escape-handling rules in
//! `consume_escaped_token`, the number/dimension/percentage
//! disambiguation in `consume_numeric_token`, and the `url(`
//! special-casing in `consume_ident_like_seq`/`consume_url`. The
//! departure from the teacher is structural: tokens here are spans, not
//! owned `String`/`f32` payloads, and the cursor is a pure function of
//! `(pos, line, column)` rather than a stateful `ByteStream` so that
//! lookahead never needs to buffer or rewind a shared mutable stream.

use crate::classifier::{is_digit, is_hex_digit, is_ident_char, is_ident_start, is_newline, is_non_printable, is_whitespace};
use crate::token::{Token, TokenKind};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Snapshot {
    pos: u32,
    line: u32,
    column: u32,
    current: Token,
}

pub struct Tokenizer<'a> {
    source: &'a str,
    pos: u32,
    line: u32,
    column: u32,
    current: Token,
}

fn eof_token(pos: u32, line: u32, column: u32) -> Token {
    Token { kind: TokenKind::Eof, start: pos, end: pos, line, column }
}

impl<'a> Tokenizer<'a> {
    pub fn new(source: &'a str) -> Self {
        let start = eof_token(0, 1, 1);
        Tokenizer { source, pos: 0, line: 1, column: 1, current: start }
    }

    pub fn source(&self) -> &'a str {
        self.source
    }

    pub fn current(&self) -> Token {
        self.current
    }

    pub fn eof(&self) -> bool {
        self.current.kind == TokenKind::Eof
    }

    pub fn save_position(&self) -> Snapshot {
        Snapshot { pos: self.pos, line: self.line, column: self.column, current: self.current }
    }

    pub fn restore_position(&mut self, snap: Snapshot) {
        self.pos = snap.pos;
        self.line = snap.line;
        self.column = snap.column;
        self.current = snap.current;
    }

    /// Advances past the current token and returns the next one, including
    /// whitespace and comments.
    pub fn next_raw(&mut self) -> Token {
        let (tok, pos, line, column) = scan_one(self.source, self.pos, self.line, self.column);
        self.pos = pos;
        self.line = line;
        self.column = column;
        self.current = tok;
        tok
    }

    /// Advances to the next non-trivia token, skipping whitespace and comments.
    pub fn next_significant(&mut self) -> Token {
        loop {
            let tok = self.next_raw();
            if !tok.kind.is_whitespace_or_comment() {
                return tok;
            }
        }
    }

    pub fn next(&mut self, skip_trivia: bool) -> Token {
        if skip_trivia {
            self.next_significant()
        } else {
            self.next_raw()
        }
    }

    /// Looks ahead `n` raw tokens (0 = current un-advanced position's next
    /// token) without consuming whitespace/comments and without mutating
    /// tokenizer state.
    pub fn lookahead(&self, n: usize) -> Token {
        let mut pos = self.pos;
        let mut line = self.line;
        let mut column = self.column;
        let mut tok = eof_token(pos, line, column);
        for _ in 0..=n {
            let (t, p, l, c) = scan_one(self.source, pos, line, column);
            tok = t;
            pos = p;
            line = l;
            column = c;
            if t.kind == TokenKind::Eof {
                break;
            }
        }
        tok
    }

    /// Looks ahead `n` significant (non-trivia) tokens.
    pub fn lookahead_sc(&self, n: usize) -> Token {
        let mut pos = self.pos;
        let mut line = self.line;
        let mut column = self.column;
        let mut seen = 0usize;
        loop {
            let (t, p, l, c) = scan_one(self.source, pos, line, column);
            pos = p;
            line = l;
            column = c;
            if t.kind.is_whitespace_or_comment() {
                continue;
            }
            if seen == n || t.kind == TokenKind::Eof {
                return t;
            }
            seen += 1;
        }
    }
}

fn char_at(source: &str, pos: u32) -> Option<char> {
    source[pos as usize..].chars().next()
}

fn nth_char(source: &str, pos: u32, n: usize) -> Option<char> {
    source[pos as usize..].chars().nth(n)
}

fn advance(source: &str, pos: u32, line: u32, column: u32) -> (u32, u32, u32) {
    match char_at(source, pos) {
        None => (pos, line, column),
        Some(ch) => {
            let new_pos = pos + ch.len_utf8() as u32;
            if ch == '\r' {
                // CRLF counts as a single newline; the LF is absorbed on the next call.
                if nth_char(source, new_pos, 0) == Some('\n') {
                    return (new_pos + 1, line + 1, 1);
                }
                (new_pos, line + 1, 1)
            } else if is_newline(ch) {
                (new_pos, line + 1, 1)
            } else {
                (new_pos, line, column + 1)
            }
        }
    }
}

/// Whether the three code points starting at `pos` begin an identifier,
/// per CSS Syntax "would start an identifier".
fn starts_ident_sequence(source: &str, pos: u32) -> bool {
    match nth_char(source, pos, 0) {
        None => false,
        Some('-') => match nth_char(source, pos, 1) {
            Some(c2) if is_ident_start(c2) || c2 == '-' => true,
            Some('\\') => nth_char(source, pos, 2).is_some_and(|c| c != '\n'),
            _ => false,
        },
        Some('\\') => nth_char(source, pos, 1).is_some_and(|c| c != '\n'),
        Some(c) => is_ident_start(c),
    }
}

fn starts_number(source: &str, pos: u32) -> bool {
    match nth_char(source, pos, 0) {
        Some(c) if is_digit(c) => true,
        Some('.') => nth_char(source, pos, 1).is_some_and(is_digit),
        Some('+') | Some('-') => match nth_char(source, pos, 1) {
            Some(c) if is_digit(c) => true,
            Some('.') => nth_char(source, pos, 2).is_some_and(is_digit),
            _ => false,
        },
        _ => false,
    }
}

/// Consumes one escape sequence starting at the backslash; returns the
/// advanced cursor. Assumes the backslash has already been validated as
/// starting a real escape (not followed by a newline).
fn consume_escape(source: &str, mut pos: u32, mut line: u32, mut column: u32) -> (u32, u32, u32) {
    // consume the backslash
    (pos, line, column) = advance(source, pos, line, column);
    let mut hex_count = 0;
    while hex_count < 6 {
        match char_at(source, pos) {
            Some(c) if is_hex_digit(c) => {
                (pos, line, column) = advance(source, pos, line, column);
                hex_count += 1;
            }
            _ => break,
        }
    }
    if hex_count > 0 {
        if let Some(c) = char_at(source, pos) {
            if is_whitespace(c) || is_newline(c) {
                (pos, line, column) = advance(source, pos, line, column);
            }
        }
        return (pos, line, column);
    }
    // any single non-newline character
    if char_at(source, pos).is_some() {
        (pos, line, column) = advance(source, pos, line, column);
    }
    (pos, line, column)
}

fn consume_ident_sequence(source: &str, mut pos: u32, mut line: u32, mut column: u32) -> (u32, u32, u32) {
    loop {
        match char_at(source, pos) {
            Some(c) if is_ident_char(c) => {
                (pos, line, column) = advance(source, pos, line, column);
            }
            Some('\\') if nth_char(source, pos, 1).is_some_and(|c| c != '\n') => {
                (pos, line, column) = advance(source, pos, line, column);
                (pos, line, column) = consume_escape(source, pos, line, column);
            }
            _ => break,
        }
    }
    (pos, line, column)
}

fn consume_number(source: &str, mut pos: u32, mut line: u32, mut column: u32) -> (u32, u32, u32) {
    if matches!(char_at(source, pos), Some('+') | Some('-')) {
        (pos, line, column) = advance(source, pos, line, column);
    }
    while char_at(source, pos).is_some_and(is_digit) {
        (pos, line, column) = advance(source, pos, line, column);
    }
    if char_at(source, pos) == Some('.') && nth_char(source, pos, 1).is_some_and(is_digit) {
        (pos, line, column) = advance(source, pos, line, column);
        while char_at(source, pos).is_some_and(is_digit) {
            (pos, line, column) = advance(source, pos, line, column);
        }
    }
    if matches!(char_at(source, pos), Some('e') | Some('E')) {
        let exp_digit_offset = if matches!(nth_char(source, pos, 1), Some('+') | Some('-')) { 2 } else { 1 };
        if nth_char(source, pos, exp_digit_offset).is_some_and(is_digit) {
            (pos, line, column) = advance(source, pos, line, column); // e/E
            if matches!(char_at(source, pos), Some('+') | Some('-')) {
                (pos, line, column) = advance(source, pos, line, column);
            }
            while char_at(source, pos).is_some_and(is_digit) {
                (pos, line, column) = advance(source, pos, line, column);
            }
        }
    }
    (pos, line, column)
}

fn consume_whitespace_run(source: &str, mut pos: u32, mut line: u32, mut column: u32) -> (u32, u32, u32) {
    while char_at(source, pos).is_some_and(|c| is_whitespace(c) || is_newline(c)) {
        (pos, line, column) = advance(source, pos, line, column);
    }
    (pos, line, column)
}

fn consume_string(source: &str, quote: char, mut pos: u32, mut line: u32, mut column: u32) -> (TokenKind, u32, u32, u32) {
    loop {
        match char_at(source, pos) {
            None => return (TokenKind::String, pos, line, column),
            Some(c) if c == quote => {
                (pos, line, column) = advance(source, pos, line, column);
                return (TokenKind::String, pos, line, column);
            }
            Some(c) if is_newline(c) => return (TokenKind::BadString, pos, line, column),
            Some('\\') => {
                match nth_char(source, pos, 1) {
                    None => {
                        (pos, line, column) = advance(source, pos, line, column);
                    }
                    Some(c) if is_newline(c) => {
                        (pos, line, column) = advance(source, pos, line, column);
                        (pos, line, column) = advance(source, pos, line, column);
                    }
                    Some(_) => {
                        (pos, line, column) = advance(source, pos, line, column);
                        (pos, line, column) = consume_escape(source, pos, line, column);
                    }
                }
            }
            Some(_) => {
                (pos, line, column) = advance(source, pos, line, column);
            }
        }
    }
}

fn consume_bad_url_remnants(source: &str, mut pos: u32, mut line: u32, mut column: u32) -> (u32, u32, u32) {
    loop {
        match char_at(source, pos) {
            None => return (pos, line, column),
            Some(')') => {
                (pos, line, column) = advance(source, pos, line, column);
                return (pos, line, column);
            }
            Some('\\') if nth_char(source, pos, 1).is_some_and(|c| c != '\n') => {
                (pos, line, column) = advance(source, pos, line, column);
                (pos, line, column) = consume_escape(source, pos, line, column);
            }
            Some(_) => {
                (pos, line, column) = advance(source, pos, line, column);
            }
        }
    }
}

fn consume_url(source: &str, mut pos: u32, mut line: u32, mut column: u32) -> (TokenKind, u32, u32, u32) {
    (pos, line, column) = consume_whitespace_run(source, pos, line, column);
    loop {
        match char_at(source, pos) {
            None => return (TokenKind::Url, pos, line, column),
            Some(')') => {
                (pos, line, column) = advance(source, pos, line, column);
                return (TokenKind::Url, pos, line, column);
            }
            Some(c) if is_whitespace(c) || is_newline(c) => {
                (pos, line, column) = consume_whitespace_run(source, pos, line, column);
                match char_at(source, pos) {
                    Some(')') | None => {
                        if char_at(source, pos).is_some() {
                            (pos, line, column) = advance(source, pos, line, column);
                        }
                        return (TokenKind::Url, pos, line, column);
                    }
                    _ => {
                        let (pos2, line2, column2) = consume_bad_url_remnants(source, pos, line, column);
                        return (TokenKind::BadUrl, pos2, line2, column2);
                    }
                }
            }
            Some('"') | Some('\'') | Some('(') => {
                let (pos2, line2, column2) = consume_bad_url_remnants(source, pos, line, column);
                return (TokenKind::BadUrl, pos2, line2, column2);
            }
            Some(c) if is_non_printable(c) => {
                let (pos2, line2, column2) = consume_bad_url_remnants(source, pos, line, column);
                return (TokenKind::BadUrl, pos2, line2, column2);
            }
            Some('\\') if nth_char(source, pos, 1).is_some_and(|c| c != '\n') => {
                (pos, line, column) = advance(source, pos, line, column);
                (pos, line, column) = consume_escape(source, pos, line, column);
            }
            Some('\\') => {
                let (pos2, line2, column2) = consume_bad_url_remnants(source, pos, line, column);
                return (TokenKind::BadUrl, pos2, line2, column2);
            }
            Some(_) => {
                (pos, line, column) = advance(source, pos, line, column);
            }
        }
    }
}

fn consume_comment(source: &str, mut pos: u32, mut line: u32, mut column: u32) -> (u32, u32, u32) {
    // `/*` already known to be present.
    (pos, line, column) = advance(source, pos, line, column);
    (pos, line, column) = advance(source, pos, line, column);
    loop {
        match char_at(source, pos) {
            None => return (pos, line, column),
            Some('*') if nth_char(source, pos, 1) == Some('/') => {
                (pos, line, column) = advance(source, pos, line, column);
                (pos, line, column) = advance(source, pos, line, column);
                return (pos, line, column);
            }
            Some(_) => {
                (pos, line, column) = advance(source, pos, line, column);
            }
        }
    }
}

fn is_unicode_range_lead(source: &str, pos: u32) -> bool {
    matches!(char_at(source, pos), Some('u') | Some('U'))
        && nth_char(source, pos, 1) == Some('+')
        && matches!(nth_char(source, pos, 2), Some(c) if is_hex_digit(c) || c == '?')
}

fn consume_unicode_range(source: &str, mut pos: u32, mut line: u32, mut column: u32) -> (u32, u32, u32) {
    // consume "u+"
    (pos, line, column) = advance(source, pos, line, column);
    (pos, line, column) = advance(source, pos, line, column);
    let mut digits = 0;
    while digits < 6 {
        match char_at(source, pos) {
            Some(c) if is_hex_digit(c) => {
                (pos, line, column) = advance(source, pos, line, column);
                digits += 1;
            }
            _ => break,
        }
    }
    let mut questions = 0;
    while digits + questions < 6 && char_at(source, pos) == Some('?') {
        (pos, line, column) = advance(source, pos, line, column);
        questions += 1;
    }
    if questions == 0 && char_at(source, pos) == Some('-') && nth_char(source, pos, 1).is_some_and(is_hex_digit) {
        (pos, line, column) = advance(source, pos, line, column);
        let mut more = 0;
        while more < 6 {
            match char_at(source, pos) {
                Some(c) if is_hex_digit(c) => {
                    (pos, line, column) = advance(source, pos, line, column);
                    more += 1;
                }
                _ => break,
            }
        }
    }
    (pos, line, column)
}

/// Produces exactly one token starting at `pos`. This is a pure function
/// of the source text and cursor, which lets `lookahead`/`lookahead_sc`
/// scan forward without mutating or cloning the tokenizer.
fn scan_one(source: &str, pos: u32, line: u32, column: u32) -> (Token, u32, u32, u32) {
    let start = pos;
    let start_line = line;
    let start_column = column;

    let Some(c) = char_at(source, pos) else {
        let t = eof_token(pos, line, column);
        return (t, pos, line, column);
    };

    macro_rules! single {
        ($kind:expr) => {{
            let (p, l, col) = advance(source, pos, line, column);
            let t = Token { kind: $kind, start, end: p, line: start_line, column: start_column };
            return (t, p, l, col);
        }};
    }

    if is_whitespace(c) || is_newline(c) {
        let (p, l, col) = consume_whitespace_run(source, pos, line, column);
        let t = Token { kind: TokenKind::Whitespace, start, end: p, line: start_line, column: start_column };
        return (t, p, l, col);
    }

    match c {
        '/' if nth_char(source, pos, 1) == Some('*') => {
            let (p, l, col) = consume_comment(source, pos, line, column);
            let t = Token { kind: TokenKind::Comment, start, end: p, line: start_line, column: start_column };
            return (t, p, l, col);
        }
        '"' | '\'' => {
            let (p0, l0, c0) = advance(source, pos, line, column);
            let (kind, p, l, col) = consume_string(source, c, p0, l0, c0);
            let t = Token { kind, start, end: p, line: start_line, column: start_column };
            return (t, p, l, col);
        }
        '#' => {
            let (p0, l0, c0) = advance(source, pos, line, column);
            if char_at(source, p0).is_some_and(is_ident_char) || matches!(char_at(source, p0), Some('\\')) {
                let is_id = starts_ident_sequence(source, p0);
                let (p, l, col) = consume_ident_sequence(source, p0, l0, c0);
                let t = Token { kind: TokenKind::Hash { is_id }, start, end: p, line: start_line, column: start_column };
                return (t, p, l, col);
            }
            single!(TokenKind::Delim('#'));
        }
        '(' => single!(TokenKind::LeftParen),
        ')' => single!(TokenKind::RightParen),
        '[' => single!(TokenKind::LeftBracket),
        ']' => single!(TokenKind::RightBracket),
        '{' => single!(TokenKind::LeftBrace),
        '}' => single!(TokenKind::RightBrace),
        ':' => single!(TokenKind::Colon),
        ';' => single!(TokenKind::Semicolon),
        ',' => single!(TokenKind::Comma),
        '+' | '.' if starts_number(source, pos) => {
            let (p, l, col) = consume_number(source, pos, line, column);
            return finish_numeric(source, start, start_line, start_column, p, l, col);
        }
        '-' => {
            if starts_number(source, pos) {
                let (p, l, col) = consume_number(source, pos, line, column);
                return finish_numeric(source, start, start_line, start_column, p, l, col);
            }
            if nth_char(source, pos, 1) == Some('-') && nth_char(source, pos, 2) == Some('>') {
                let (p, l, col) = advance(source, pos, line, column);
                let (p, l, col) = advance(source, p, l, col);
                let (p, l, col) = advance(source, p, l, col);
                let t = Token { kind: TokenKind::Cdc, start, end: p, line: start_line, column: start_column };
                return (t, p, l, col);
            }
            if starts_ident_sequence(source, pos) {
                return finish_ident_like(source, start, start_line, start_column, pos, line, column);
            }
            single!(TokenKind::Delim('-'));
        }
        '<' if nth_char(source, pos, 1) == Some('!') && nth_char(source, pos, 2) == Some('-') && nth_char(source, pos, 3) == Some('-') => {
            let mut p = pos;
            let mut l = line;
            let mut col = column;
            for _ in 0..4 {
                (p, l, col) = advance(source, p, l, col);
            }
            let t = Token { kind: TokenKind::Cdo, start, end: p, line: start_line, column: start_column };
            return (t, p, l, col);
        }
        '@' if starts_ident_sequence(source, pos + 1) => {
            let (p0, l0, c0) = advance(source, pos, line, column);
            let (p, l, col) = consume_ident_sequence(source, p0, l0, c0);
            let t = Token { kind: TokenKind::AtKeyword, start, end: p, line: start_line, column: start_column };
            return (t, p, l, col);
        }
        '@' => single!(TokenKind::Delim('@')),
        '\\' if nth_char(source, pos, 1).is_some_and(|c| c != '\n') => {
            return finish_ident_like(source, start, start_line, start_column, pos, line, column);
        }
        c if is_digit(c) => {
            let (p, l, col) = consume_number(source, pos, line, column);
            return finish_numeric(source, start, start_line, start_column, p, l, col);
        }
        c if (c == 'u' || c == 'U') && is_unicode_range_lead(source, pos) => {
            let (p, l, col) = consume_unicode_range(source, pos, line, column);
            let t = Token { kind: TokenKind::UnicodeRange, start, end: p, line: start_line, column: start_column };
            return (t, p, l, col);
        }
        c if is_ident_start(c) => {
            return finish_ident_like(source, start, start_line, start_column, pos, line, column);
        }
        other => single!(TokenKind::Delim(other)),
    }
}

fn finish_numeric(source: &str, start: u32, start_line: u32, start_column: u32, mut p: u32, mut l: u32, mut col: u32) -> (Token, u32, u32, u32) {
    if char_at(source, p) == Some('%') {
        (p, l, col) = advance(source, p, l, col);
        let t = Token { kind: TokenKind::Percentage, start, end: p, line: start_line, column: start_column };
        return (t, p, l, col);
    }
    if starts_ident_sequence(source, p) {
        (p, l, col) = consume_ident_sequence(source, p, l, col);
        let t = Token { kind: TokenKind::Dimension, start, end: p, line: start_line, column: start_column };
        return (t, p, l, col);
    }
    let t = Token { kind: TokenKind::Number, start, end: p, line: start_line, column: start_column };
    (t, p, l, col)
}

fn finish_ident_like(source: &str, start: u32, start_line: u32, start_column: u32, pos: u32, line: u32, column: u32) -> (Token, u32, u32, u32) {
    let (p, l, col) = consume_ident_sequence(source, pos, line, column);
    if char_at(source, p) != Some('(') {
        let t = Token { kind: TokenKind::Ident, start, end: p, line: start_line, column: start_column };
        return (t, p, l, col);
    }
    let name = &source[start as usize..p as usize];
    if name.eq_ignore_ascii_case("url") {
        // Look past `(` and any whitespace; a quote means this is really
        // a function call whose sole argument is a string token, not a
        // raw url() token (teacher: `consume_ident_like_seq`).
        let (p_paren, l_paren, col_paren) = advance(source, p, l, col);
        let (p_ws, l_ws, col_ws) = consume_whitespace_run(source, p_paren, l_paren, col_paren);
        match char_at(source, p_ws) {
            Some('"') | Some('\'') => {
                let t = Token { kind: TokenKind::Function, start, end: p_paren, line: start_line, column: start_column };
                (t, p_paren, l_paren, col_paren)
            }
            _ => {
                let (kind, p2, l2, col2) = consume_url(source, p_paren, l_paren, col_paren);
                let t = Token { kind, start, end: p2, line: start_line, column: start_column };
                (t, p2, l2, col2)
            }
        }
    } else {
        let (p2, l2, col2) = advance(source, p, l, col);
        let t = Token { kind: TokenKind::Function, start, end: p2, line: start_line, column: start_column };
        (t, p2, l2, col2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(src: &str) -> Vec<TokenKind> {
        let mut tz = Tokenizer::new(src);
        let mut out = Vec::new();
        loop {
            let t = tz.next_raw();
            if t.kind == TokenKind::Eof {
                break;
            }
            out.push(t.kind);
        }
        out
    }

    #[test]
    fn basic_rule() {
        let ks = kinds("body { color: red; }");
        assert_eq!(
            ks,
            vec![
                TokenKind::Ident,
                TokenKind::Whitespace,
                TokenKind::LeftBrace,
                TokenKind::Whitespace,
                TokenKind::Ident,
                TokenKind::Colon,
                TokenKind::Whitespace,
                TokenKind::Ident,
                TokenKind::Semicolon,
                TokenKind::Whitespace,
                TokenKind::RightBrace,
            ]
        );
    }

    #[test]
    fn numbers_and_dimensions() {
        let mut tz = Tokenizer::new("10px 50% -3.5e2 .5");
        let t1 = tz.next_raw();
        assert_eq!(t1.kind, TokenKind::Dimension);
        assert_eq!(t1.text("10px 50% -3.5e2 .5"), "10px");
        tz.next_raw(); // whitespace
        let t2 = tz.next_raw();
        assert_eq!(t2.kind, TokenKind::Percentage);
        tz.next_raw();
        let t3 = tz.next_raw();
        assert_eq!(t3.kind, TokenKind::Number);
        tz.next_raw();
        let t4 = tz.next_raw();
        assert_eq!(t4.kind, TokenKind::Number);
    }

    #[test]
    fn function_and_url() {
        let src = "rgba(0,0,0,.5) url(foo.png) url(\"foo.png\")";
        let mut tz = Tokenizer::new(src);
        assert_eq!(tz.next_raw().kind, TokenKind::Function);
        while tz.current().kind != TokenKind::RightParen {
            tz.next_raw();
        }
        tz.next_raw(); // whitespace
        let url_tok = tz.next_raw();
        assert_eq!(url_tok.kind, TokenKind::Url);
        assert_eq!(url_tok.text(src), "url(foo.png)");
        tz.next_raw(); // whitespace
        let fn_tok = tz.next_raw();
        assert_eq!(fn_tok.kind, TokenKind::Function);
    }

    #[test]
    fn bad_string_on_newline() {
        let src = "\"unterminated\nrest";
        let mut tz = Tokenizer::new(src);
        let t = tz.next_raw();
        assert_eq!(t.kind, TokenKind::BadString);
    }

    #[test]
    fn cdo_cdc() {
        let ks = kinds("<!-- -->");
        assert_eq!(ks, vec![TokenKind::Cdo, TokenKind::Whitespace, TokenKind::Cdc]);
    }

    #[test]
    fn hash_id_vs_unrestricted() {
        let mut tz = Tokenizer::new("#main #123");
        let t1 = tz.next_raw();
        assert_eq!(t1.kind, TokenKind::Hash { is_id: true });
        tz.next_raw();
        let t2 = tz.next_raw();
        assert_eq!(t2.kind, TokenKind::Hash { is_id: false });
    }

    #[test]
    fn line_and_column_tracking() {
        let mut tz = Tokenizer::new("a\nb");
        let t1 = tz.next_raw();
        assert_eq!((t1.line, t1.column), (1, 1));
        let t2 = tz.next_raw();
        assert_eq!(t2.kind, TokenKind::Whitespace);
        let t3 = tz.next_raw();
        assert_eq!((t3.line, t3.column), (2, 1));
    }

    #[test]
    fn lookahead_does_not_mutate() {
        let mut tz = Tokenizer::new("a b c");
        let before = tz.save_position();
        let la = tz.lookahead_sc(1);
        assert_eq!(la.kind, TokenKind::Ident);
        assert_eq!(tz.save_position(), before);
    }
}
