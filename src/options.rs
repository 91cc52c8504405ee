//! Parser configuration.
//!
//! Grounded on `gosub_shared::traits::ParserConfig`/`Context`: a small,
//! all-on-by-default options struct the top-level parser consults before
//! descending into each sub-parser. Unlike the teacher's `ParserConfig`,
//! this one carries no `ignore_errors` toggle — a tolerant,
//! location-preserving parser that can be told to stop recovering would
//! contradict its own purpose, so recovery here is unconditional (see the
//! error handling design notes).

pub type CommentCallback<'a> = dyn FnMut(u32, u32, u32, u32, u32) + 'a;

pub struct ParserOptions<'a> {
    pub parse_values: bool,
    pub parse_selectors: bool,
    pub parse_atrule_preludes: bool,
    pub on_comment: Option<Box<CommentCallback<'a>>>,
}

impl<'a> Default for ParserOptions<'a> {
    fn default() -> Self {
        ParserOptions {
            parse_values: true,
            parse_selectors: true,
            parse_atrule_preludes: true,
            on_comment: None,
        }
    }
}

impl<'a> ParserOptions<'a> {
    pub fn new() -> Self {
        Self::default()
    }
}
