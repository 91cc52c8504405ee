//! The read-only node façade.
//!
//! Grounded on the teacher's `Node`/`NodeType` in `node.rs`, which pairs
//! `is_*`/`as_*` accessor methods with a boxed enum variant the node
//! owns. This façade keeps that accessor-pair feel but reads every field
//! out of the arena on demand instead of owning anything: `Node<'a>` is
//! a cheap `(arena, source, index)` triple, `Copy`, and safe to hand out
//! freely to callers since neither field it holds is mutable.
//!
//! Ancestor-aware traversal (the "inside a value", "inside a selector"
//! context a consumer needs while walking) is grounded on `walker.rs`
//! and lives in `crate::walker`, built on top of this façade rather than
//! inside it, matching the teacher's split between the node type and its
//! separate walker.

use crate::arena::{flags, AttrFlag, AttrOperator, NodeArena, NodeKind};

#[derive(Clone, Copy)]
pub struct Node<'a> {
    arena: &'a NodeArena,
    source: &'a str,
    index: u32,
}

impl<'a> Node<'a> {
    pub(crate) fn new(arena: &'a NodeArena, source: &'a str, index: u32) -> Self {
        Node { arena, source, index }
    }

    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn kind(&self) -> NodeKind {
        self.arena.kind(self.index)
    }

    pub fn kind_name(&self) -> &'static str {
        kind_name(self.kind())
    }

    pub fn offset(&self) -> u32 {
        self.arena.start_offset(self.index)
    }

    pub fn length(&self) -> u32 {
        self.arena.length(self.index)
    }

    pub fn end(&self) -> u32 {
        self.arena.end_offset(self.index)
    }

    pub fn line(&self) -> u32 {
        self.arena.start_line(self.index)
    }

    pub fn column(&self) -> u32 {
        self.arena.start_column(self.index)
    }

    pub fn text(&self) -> &'a str {
        &self.source[self.offset() as usize..self.end() as usize]
    }

    fn span_text(&self, start_delta: u16, span_len: u16) -> &'a str {
        let start = (self.offset() + start_delta as u32) as usize;
        let end = start + span_len as usize;
        &self.source[start..end]
    }

    pub fn content_text(&self) -> &'a str {
        let (start_delta, len) = self.arena.content_span(self.index);
        self.span_text(start_delta, len)
    }

    pub fn value_text(&self) -> &'a str {
        let (start_delta, len) = self.arena.value_span(self.index);
        self.span_text(start_delta, len)
    }

    /// Declaration property name. Alias of `content_text` for readability
    /// at call sites.
    pub fn property(&self) -> &'a str {
        self.content_text()
    }

    /// The generic "name" sub-span: at-rule name, class/id name without
    /// its leading punctuation, pseudo name, attribute name.
    pub fn name(&self) -> &'a str {
        self.content_text()
    }

    pub fn is_important(&self) -> bool {
        self.arena.has_flag(self.index, flags::IMPORTANT)
    }

    pub fn has_error(&self) -> bool {
        self.arena.has_flag(self.index, flags::HAS_ERROR)
    }

    pub fn has_block(&self) -> bool {
        self.arena.has_flag(self.index, flags::HAS_BLOCK)
    }

    pub fn has_declarations(&self) -> bool {
        self.arena.has_flag(self.index, flags::HAS_DECLARATIONS)
    }

    pub fn has_parens(&self) -> bool {
        self.arena.has_flag(self.index, flags::HAS_PARENS)
    }

    pub fn is_vendor_prefixed(&self) -> bool {
        self.arena.has_flag(self.index, flags::VENDOR_PREFIXED)
    }

    pub fn is_browserhack(&self) -> bool {
        self.arena.has_flag(self.index, flags::BROWSERHACK)
    }

    pub fn attr_operator(&self) -> AttrOperator {
        attr_operator_from_tag(self.arena.attr_operator(self.index))
    }

    pub fn attr_flag(&self) -> AttrFlag {
        attr_flag_from_tag(self.arena.attr_flags(self.index))
    }

    pub fn has_children(&self) -> bool {
        self.arena.has_children(self.index)
    }

    /// True if this node has at least one child that isn't its `Block`
    /// (a `StyleRule`'s selector list, an `AtRule`'s prelude pieces).
    /// There's no dedicated flag for this — it falls out of the same
    /// child-kind scan `value_node`/`nth`/`selector_list` already do.
    pub fn has_prelude(&self) -> bool {
        self.children().any(|c| c.kind() != NodeKind::Block)
    }

    pub fn first_child(&self) -> Option<Node<'a>> {
        self.arena.first_child(self.index).map(|i| Node::new(self.arena, self.source, i))
    }

    pub fn next_sibling(&self) -> Option<Node<'a>> {
        self.arena.next_sibling(self.index).map(|i| Node::new(self.arena, self.source, i))
    }

    pub fn has_next(&self) -> bool {
        self.arena.next_sibling(self.index).is_some()
    }

    pub fn children(&self) -> impl Iterator<Item = Node<'a>> + 'a {
        let arena = self.arena;
        let source = self.source;
        arena.children(self.index).map(move |i| Node::new(arena, source, i))
    }

    pub fn child_at(&self, n: usize) -> Option<Node<'a>> {
        self.children().nth(n)
    }

    pub fn nth_child_of_kind(&self, kind: NodeKind) -> Option<Node<'a>> {
        self.children().find(|c| c.kind() == kind)
    }

    /// For a Declaration: the parsed `Value` child, if value-parsing was
    /// enabled and the value was non-empty.
    pub fn value_node(&self) -> Option<Node<'a>> {
        self.nth_child_of_kind(NodeKind::Value)
    }

    /// For a Dimension node: the unit suffix after the numeric prefix.
    pub fn unit(&self) -> &'a str {
        let text = self.text();
        let digits_end = numeric_prefix_len(text);
        &text[digits_end..]
    }

    /// For a Dimension or Number node: the leading numeric literal,
    /// parsed as `f64`. `0.0` for text with no parseable numeric prefix,
    /// which never happens for a well-tokenized Number/Dimension.
    pub fn numeric_value(&self) -> f64 {
        let text = self.text();
        let digits_end = numeric_prefix_len(text);
        text[..digits_end].parse().unwrap_or(0.0)
    }

    /// For an NthSelector node: the `a` portion of its An+B expression,
    /// including the trailing `n` (or the whole keyword for `odd`/`even`),
    /// e.g. `"2n"` out of `"2n+1"`, `""` out of a bare `"3"`. Computed from
    /// `text()` at access time rather than stored during parsing — see the
    /// design notes on An+B.
    pub fn nth_a(&self) -> &'a str {
        anplusb_parts(self.text()).0
    }

    /// For an NthSelector node: the `b` portion of its An+B expression
    /// (sign and digits, e.g. `"+1"`, `"-1"`), or `""` when absent.
    pub fn nth_b(&self) -> &'a str {
        anplusb_parts(self.text()).1
    }

    /// For an NthOfSelector: the nested An+B node.
    pub fn nth(&self) -> Option<Node<'a>> {
        self.nth_child_of_kind(NodeKind::NthSelector)
    }

    /// For an NthOfSelector or functional pseudo-class: the nested
    /// selector list.
    pub fn selector_list(&self) -> Option<Node<'a>> {
        self.nth_child_of_kind(NodeKind::SelectorList)
    }

    /// For a Url node: the URL content with its surrounding `url(` `)`
    /// and any whitespace trimmed. Recomputed from `text()` rather than
    /// a stored span, since `text()` is already overflow-safe (the
    /// arena's length sidecar) while a stored delta/length pair would
    /// have been limited to 16 bits — see the design notes on the
    /// inline-data-URL scenario.
    pub fn url_value(&self) -> &'a str {
        let text = self.text();
        let after_paren = text.find('(').map(|i| i + 1).unwrap_or(text.len());
        let mut inner = &text[after_paren..];
        if inner.ends_with(')') {
            inner = &inner[..inner.len() - 1];
        }
        inner.trim_matches(|c: char| c.is_whitespace())
    }
}

impl<'a> std::fmt::Debug for Node<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Node")
            .field("kind", &self.kind_name())
            .field("offset", &self.offset())
            .field("length", &self.length())
            .field("line", &self.line())
            .field("column", &self.column())
            .finish()
    }
}

fn numeric_prefix_len(text: &str) -> usize {
    let bytes = text.as_bytes();
    let mut i = 0;
    if i < bytes.len() && (bytes[i] == b'+' || bytes[i] == b'-') {
        i += 1;
    }
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    if i < bytes.len() && bytes[i] == b'.' {
        let mut j = i + 1;
        let mut saw_digit = false;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
            saw_digit = true;
        }
        if saw_digit {
            i = j;
        }
    }
    if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
        let mut j = i + 1;
        if j < bytes.len() && (bytes[j] == b'+' || bytes[j] == b'-') {
            j += 1;
        }
        let mut saw_digit = false;
        let start = j;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
            saw_digit = true;
        }
        if saw_digit && start < j {
            i = j;
        }
    }
    i
}

/// Splits an An+B expression's raw text into its `a` (through the `n`,
/// or the whole keyword) and `b` (sign + digits) sub-strings, mirroring
/// the content/value sub-span split the spec describes for a stored
/// `NthSelector` node. Returns slices of `text` rather than normalized
/// numbers — `"2n+1"` yields `("2n", "+1")`, not `("2", "1")` — so a
/// caller gets back exactly the source bytes, consistent with every
/// other façade accessor in this module.
fn anplusb_parts(text: &str) -> (&str, &str) {
    let trimmed = text.trim();
    if trimmed.eq_ignore_ascii_case("even") || trimmed.eq_ignore_ascii_case("odd") {
        return (trimmed, "");
    }
    match trimmed.find(|c: char| c == 'n' || c == 'N') {
        Some(n_pos) => (&trimmed[..=n_pos], trimmed[n_pos + 1..].trim()),
        None => ("", trimmed),
    }
}

fn attr_operator_from_tag(tag: u8) -> AttrOperator {
    match tag {
        1 => AttrOperator::Equals,
        2 => AttrOperator::Includes,
        3 => AttrOperator::DashMatch,
        4 => AttrOperator::PrefixMatch,
        5 => AttrOperator::SuffixMatch,
        6 => AttrOperator::SubstringMatch,
        _ => AttrOperator::None,
    }
}

fn attr_flag_from_tag(tag: u8) -> AttrFlag {
    match tag {
        1 => AttrFlag::IgnoreCase,
        2 => AttrFlag::CaseSensitive,
        _ => AttrFlag::None,
    }
}

#[cfg(test)]
mod tests {
    use super::anplusb_parts;
    use crate::options::ParserOptions;

    #[test]
    fn anplusb_keywords() {
        assert_eq!(anplusb_parts("even"), ("even", ""));
        assert_eq!(anplusb_parts("odd"), ("odd", ""));
    }

    #[test]
    fn anplusb_general_forms() {
        assert_eq!(anplusb_parts("2n+1"), ("2n", "+1"));
        assert_eq!(anplusb_parts("2n-1"), ("2n", "-1"));
        assert_eq!(anplusb_parts("2n + 1"), ("2n", "+ 1"));
        assert_eq!(anplusb_parts("-n+3"), ("-n", "+3"));
        assert_eq!(anplusb_parts("n"), ("n", ""));
        assert_eq!(anplusb_parts("3"), ("", "3"));
    }

    #[test]
    fn dimension_numeric_value() {
        let doc = crate::parse(".t { margin: -1.5em; }", &mut ParserOptions::default()).expect("parses");
        let decl = doc.root().first_child().expect("rule").child_at(1).expect("block").first_child().expect("decl");
        let dim = decl.value_node().expect("value").first_child().expect("dimension");
        assert_eq!(dim.kind(), super::NodeKind::Dimension);
        assert_eq!(dim.numeric_value(), -1.5);
        assert_eq!(dim.unit(), "em");
    }

    #[test]
    fn style_rule_has_prelude_at_rule_does_not() {
        let doc = crate::parser::parse("a {} @layer base {}", &mut ParserOptions::default()).expect("parses");
        let rule = doc.root().first_child().expect("style rule");
        assert!(rule.has_prelude());

        let empty_block = rule.child_at(1).expect("block");
        assert!(!empty_block.has_prelude());
    }
}

pub fn kind_name(kind: NodeKind) -> &'static str {
    use NodeKind::*;
    match kind {
        Stylesheet => "Stylesheet",
        StyleRule => "StyleRule",
        AtRule => "AtRule",
        Declaration => "Declaration",
        Selector => "Selector",
        Comment => "Comment",
        Block => "Block",
        Identifier => "Identifier",
        Number => "Number",
        Dimension => "Dimension",
        String => "String",
        Hash => "Hash",
        Function => "Function",
        Operator => "Operator",
        Parenthesis => "Parenthesis",
        Url => "Url",
        Value => "Value",
        SelectorList => "SelectorList",
        TypeSelector => "TypeSelector",
        ClassSelector => "ClassSelector",
        IdSelector => "IdSelector",
        AttributeSelector => "AttributeSelector",
        PseudoClassSelector => "PseudoClassSelector",
        PseudoElementSelector => "PseudoElementSelector",
        Combinator => "Combinator",
        UniversalSelector => "UniversalSelector",
        NestingSelector => "NestingSelector",
        NthSelector => "NthSelector",
        NthOfSelector => "NthOfSelector",
        MediaQuery => "MediaQuery",
        MediaFeature => "MediaFeature",
        MediaType => "MediaType",
        ContainerQuery => "ContainerQuery",
        SupportsQuery => "SupportsQuery",
        LayerName => "LayerName",
        PreludeOperator => "PreludeOperator",
        FeatureRange => "FeatureRange",
        LangSelector => "LangSelector",
    }
}
