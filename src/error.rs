//! Crate error type.
//!
//! Almost nothing in this crate is fallible by design (see the error
//! handling section of the design notes): the tokenizer cannot fail and
//! sub-parsers fail locally by restoring the tokenizer and returning "no
//! node". `ParseError` exists for the one genuinely fatal condition the
//! arena can hit, mirroring `gosub_shared::errors::CssError`'s shape
//! (a message plus an optional source location) without needing its
//! location field, since arena exhaustion has no single source position.

use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("node arena exhausted: {0}")]
    ArenaExhausted(String),
}

pub type ParseResult<T> = Result<T, ParseError>;
