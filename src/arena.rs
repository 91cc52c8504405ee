//! The node arena: every syntax-tree node lives in one contiguous buffer,
//! addressed by 32-bit index, in a fixed 36-byte record.
//!
//! This is the central departure from the teacher's `node.rs`, which
//! builds a tree of `Node { node_type: Box<NodeType>, location }` with
//! each variant owning its own `Vec<Node>`/`String` fields. The teacher's
//! `NodeType` enumeration is the source of truth for *which* fields each
//! kind of node needs; this module inverts the ownership so that no node
//! allocates independently and every reference is a `u32` index rather
//! than a pointer, which keeps growth index-stable (see `grow`).

use std::collections::HashMap;

pub const NULL: u32 = 0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum NodeKind {
    Stylesheet = 1,
    StyleRule = 2,
    AtRule = 3,
    Declaration = 4,
    Selector = 5,
    Comment = 6,
    Block = 7,

    Identifier = 10,
    Number = 11,
    Dimension = 12,
    String = 13,
    Hash = 14,
    Function = 15,
    Operator = 16,
    Parenthesis = 17,
    Url = 18,
    Value = 19,

    SelectorList = 20,
    TypeSelector = 21,
    ClassSelector = 22,
    IdSelector = 23,
    AttributeSelector = 24,
    PseudoClassSelector = 25,
    PseudoElementSelector = 26,
    Combinator = 27,
    UniversalSelector = 28,
    NestingSelector = 29,
    NthSelector = 30,
    NthOfSelector = 31,

    MediaQuery = 32,
    MediaFeature = 33,
    MediaType = 34,
    ContainerQuery = 35,
    SupportsQuery = 36,
    LayerName = 37,
    PreludeOperator = 38,
    FeatureRange = 39,

    LangSelector = 56,
}

impl NodeKind {
    pub fn is_value_content(self) -> bool {
        (10..=18).contains(&(self as u8))
    }

    pub fn is_selector_component(self) -> bool {
        (20..=31).contains(&(self as u8))
    }

    pub fn is_prelude_component(self) -> bool {
        (32..=39).contains(&(self as u8))
    }

    /// Reconstructs a `NodeKind` from the raw tag byte stored in a node
    /// record. The tag set is closed and every record is written only via
    /// `create_node(kind, ..)`, so every tag a record can carry has a match
    /// arm here.
    pub(crate) fn from_tag(tag: u8) -> NodeKind {
        match tag {
            1 => NodeKind::Stylesheet,
            2 => NodeKind::StyleRule,
            3 => NodeKind::AtRule,
            4 => NodeKind::Declaration,
            5 => NodeKind::Selector,
            6 => NodeKind::Comment,
            7 => NodeKind::Block,
            10 => NodeKind::Identifier,
            11 => NodeKind::Number,
            12 => NodeKind::Dimension,
            13 => NodeKind::String,
            14 => NodeKind::Hash,
            15 => NodeKind::Function,
            16 => NodeKind::Operator,
            17 => NodeKind::Parenthesis,
            18 => NodeKind::Url,
            19 => NodeKind::Value,
            20 => NodeKind::SelectorList,
            21 => NodeKind::TypeSelector,
            22 => NodeKind::ClassSelector,
            23 => NodeKind::IdSelector,
            24 => NodeKind::AttributeSelector,
            25 => NodeKind::PseudoClassSelector,
            26 => NodeKind::PseudoElementSelector,
            27 => NodeKind::Combinator,
            28 => NodeKind::UniversalSelector,
            29 => NodeKind::NestingSelector,
            30 => NodeKind::NthSelector,
            31 => NodeKind::NthOfSelector,
            32 => NodeKind::MediaQuery,
            33 => NodeKind::MediaFeature,
            34 => NodeKind::MediaType,
            35 => NodeKind::ContainerQuery,
            36 => NodeKind::SupportsQuery,
            37 => NodeKind::LayerName,
            38 => NodeKind::PreludeOperator,
            39 => NodeKind::FeatureRange,
            56 => NodeKind::LangSelector,
            _ => NodeKind::Comment,
        }
    }
}

pub mod flags {
    pub const IMPORTANT: u8 = 1 << 0;
    pub const HAS_ERROR: u8 = 1 << 1;
    pub const LENGTH_OVERFLOW: u8 = 1 << 2;
    pub const HAS_BLOCK: u8 = 1 << 3;
    pub const VENDOR_PREFIXED: u8 = 1 << 4;
    pub const HAS_DECLARATIONS: u8 = 1 << 5;
    pub const HAS_PARENS: u8 = 1 << 6;
    pub const BROWSERHACK: u8 = 1 << 7;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum AttrOperator {
    None = 0,
    Equals = 1,
    Includes = 2,
    DashMatch = 3,
    PrefixMatch = 4,
    SuffixMatch = 5,
    SubstringMatch = 6,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum AttrFlag {
    None = 0,
    IgnoreCase = 1,
    CaseSensitive = 2,
}

/// Fixed 36-byte per-node record. Field order matches the byte layout
/// in the design notes; Rust is not asked to pack this to the byte for
/// real (there is no on-disk format to match), but the field set and
/// widths are exactly those the design calls for.
#[derive(Clone, Copy, Debug)]
pub(crate) struct NodeRecord {
    pub kind: u8,
    pub flags: u8,
    pub length: u16,
    pub first_child: u32,
    pub next_sibling: u32,
    pub start_offset: u32,
    pub content_start_delta: u16,
    pub value_start_delta: u16,
    pub content_length: u16,
    pub value_length: u16,
    pub start_line: u32,
    pub start_column: u32,
    pub attr_operator: u8,
    pub attr_flags: u8,
}

impl Default for NodeRecord {
    fn default() -> Self {
        NodeRecord {
            kind: 0,
            flags: 0,
            length: 0,
            first_child: NULL,
            next_sibling: NULL,
            start_offset: 0,
            content_start_delta: 0,
            value_start_delta: 0,
            content_length: 0,
            value_length: 0,
            start_line: 0,
            start_column: 0,
            attr_operator: AttrOperator::None as u8,
            attr_flags: AttrFlag::None as u8,
        }
    }
}

/// Owns every node produced by a single parse. Indices are stable across
/// growth: `records` only ever grows by copying into a larger buffer,
/// never by relocating through a pointer a caller might have cached.
pub struct NodeArena {
    records: Vec<NodeRecord>,
    /// True lengths for nodes whose length exceeds the 16-bit inline field.
    overflow_lengths: HashMap<u32, u32>,
    growths: u32,
    /// Set once `create_node` would need an index past `u32::MAX`. The
    /// crate's only genuinely fatal condition; checked once at the end
    /// of `parse_stylesheet` rather than threaded through every
    /// sub-parser's return type.
    overflowed: bool,
}

impl NodeArena {
    pub fn with_capacity_hint(source_len: usize) -> Self {
        let estimated = (source_len / 1024) * 325 * 12 / 10;
        let capacity = estimated.max(16);
        let mut records = Vec::with_capacity(capacity + 1);
        // Index 0 is the null sentinel; push a dummy record to occupy it.
        records.push(NodeRecord::default());
        NodeArena { records, overflow_lengths: HashMap::new(), growths: 0, overflowed: false }
    }

    pub fn len(&self) -> usize {
        self.records.len() - 1
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn growth_count(&self) -> u32 {
        self.growths
    }

    /// True once a `create_node` call has hit the `u32`-index ceiling.
    /// Every node created after this point is the null sentinel; callers
    /// upstream should stop trusting the tree and surface
    /// `ParseError::ArenaExhausted`.
    pub fn is_overflowed(&self) -> bool {
        self.overflowed
    }

    fn grow_if_needed(&mut self) {
        if self.records.len() == self.records.capacity() {
            let new_capacity = (self.records.capacity() as f64 * 1.3).ceil() as usize;
            self.records.reserve(new_capacity - self.records.capacity());
            self.growths += 1;
        }
    }

    pub fn create_node(&mut self, kind: NodeKind, start_offset: u32, length: u32, start_line: u32, start_column: u32) -> u32 {
        if self.overflowed || self.records.len() >= u32::MAX as usize {
            self.overflowed = true;
            return NULL;
        }
        self.grow_if_needed();
        let index = self.records.len() as u32;
        let record = NodeRecord {
            kind: kind as u8,
            start_offset,
            start_line,
            start_column,
            ..NodeRecord::default()
        };
        self.records.push(record);
        self.set_length(index, length);
        index
    }

    fn record(&self, index: u32) -> &NodeRecord {
        debug_assert!(index != NULL, "index 0 is the null sentinel");
        &self.records[index as usize]
    }

    fn record_mut(&mut self, index: u32) -> &mut NodeRecord {
        debug_assert!(index != NULL, "index 0 is the null sentinel");
        &mut self.records[index as usize]
    }

    pub fn set_length(&mut self, index: u32, length: u32) {
        let overflow = length > u16::MAX as u32;
        {
            let record = self.record_mut(index);
            if overflow {
                record.length = u16::MAX;
                record.flags |= flags::LENGTH_OVERFLOW;
            } else {
                record.length = length as u16;
                record.flags &= !flags::LENGTH_OVERFLOW;
            }
        }
        if overflow {
            self.overflow_lengths.insert(index, length);
        } else {
            self.overflow_lengths.remove(&index);
        }
    }

    pub fn kind(&self, index: u32) -> NodeKind {
        NodeKind::from_tag(self.record(index).kind)
    }

    pub fn start_offset(&self, index: u32) -> u32 {
        self.record(index).start_offset
    }

    pub fn length(&self, index: u32) -> u32 {
        let record = self.record(index);
        if record.flags & flags::LENGTH_OVERFLOW != 0 {
            *self.overflow_lengths.get(&index).unwrap_or(&(record.length as u32))
        } else {
            record.length as u32
        }
    }

    pub fn end_offset(&self, index: u32) -> u32 {
        self.start_offset(index) + self.length(index)
    }

    pub fn start_line(&self, index: u32) -> u32 {
        self.record(index).start_line
    }

    pub fn start_column(&self, index: u32) -> u32 {
        self.record(index).start_column
    }

    pub fn flags(&self, index: u32) -> u8 {
        self.record(index).flags
    }

    pub fn set_flag(&mut self, index: u32, flag: u8) {
        self.record_mut(index).flags |= flag;
    }

    pub fn clear_flag(&mut self, index: u32, flag: u8) {
        self.record_mut(index).flags &= !flag;
    }

    pub fn has_flag(&self, index: u32, flag: u8) -> bool {
        self.flags(index) & flag != 0
    }

    pub fn set_content_span(&mut self, index: u32, start_delta: u16, length: u16) {
        let record = self.record_mut(index);
        record.content_start_delta = start_delta;
        record.content_length = length;
    }

    pub fn content_span(&self, index: u32) -> (u16, u16) {
        let record = self.record(index);
        (record.content_start_delta, record.content_length)
    }

    pub fn set_value_span(&mut self, index: u32, start_delta: u16, length: u16) {
        let record = self.record_mut(index);
        record.value_start_delta = start_delta;
        record.value_length = length;
    }

    pub fn value_span(&self, index: u32) -> (u16, u16) {
        let record = self.record(index);
        (record.value_start_delta, record.value_length)
    }

    pub fn set_attr(&mut self, index: u32, op: AttrOperator, flag: AttrFlag) {
        let record = self.record_mut(index);
        record.attr_operator = op as u8;
        record.attr_flags = flag as u8;
    }

    pub fn attr_operator(&self, index: u32) -> u8 {
        self.record(index).attr_operator
    }

    pub fn attr_flags(&self, index: u32) -> u8 {
        self.record(index).attr_flags
    }

    pub fn first_child(&self, index: u32) -> Option<u32> {
        let c = self.record(index).first_child;
        (c != NULL).then_some(c)
    }

    pub fn next_sibling(&self, index: u32) -> Option<u32> {
        let s = self.record(index).next_sibling;
        (s != NULL).then_some(s)
    }

    pub fn has_children(&self, index: u32) -> bool {
        self.record(index).first_child != NULL
    }

    /// Links `children` as the ordered child list of `parent`. `O(n)` in
    /// the list length, `O(1)` per child — no allocation beyond the
    /// caller-owned scratch slice.
    pub fn append_children(&mut self, parent: u32, children: &[u32]) {
        if children.is_empty() {
            return;
        }
        self.record_mut(parent).first_child = children[0];
        for window in children.windows(2) {
            self.record_mut(window[0]).next_sibling = window[1];
        }
    }

    pub fn children(&self, index: u32) -> ChildIter<'_> {
        ChildIter { arena: self, next: self.first_child(index) }
    }
}

pub struct ChildIter<'a> {
    arena: &'a NodeArena,
    next: Option<u32>,
}

impl<'a> Iterator for ChildIter<'a> {
    type Item = u32;

    fn next(&mut self) -> Option<u32> {
        let current = self.next?;
        self.next = self.arena.next_sibling(current);
        Some(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_and_read_back() {
        let mut arena = NodeArena::with_capacity_hint(100);
        let idx = arena.create_node(NodeKind::Identifier, 5, 10, 1, 6);
        assert_eq!(arena.kind(idx), NodeKind::Identifier);
        assert_eq!(arena.start_offset(idx), 5);
        assert_eq!(arena.length(idx), 10);
        assert_eq!(arena.end_offset(idx), 15);
    }

    #[test]
    fn length_overflow_uses_sidecar() {
        let mut arena = NodeArena::with_capacity_hint(10);
        let idx = arena.create_node(NodeKind::Declaration, 0, 70_000, 1, 1);
        assert!(arena.has_flag(idx, flags::LENGTH_OVERFLOW));
        assert_eq!(arena.length(idx), 70_000);
    }

    #[test]
    fn children_chain_in_order() {
        let mut arena = NodeArena::with_capacity_hint(10);
        let parent = arena.create_node(NodeKind::SelectorList, 0, 10, 1, 1);
        let a = arena.create_node(NodeKind::Selector, 0, 3, 1, 1);
        let b = arena.create_node(NodeKind::Selector, 4, 3, 1, 5);
        arena.append_children(parent, &[a, b]);
        let collected: Vec<u32> = arena.children(parent).collect();
        assert_eq!(collected, vec![a, b]);
        assert_eq!(arena.next_sibling(a), Some(b));
        assert_eq!(arena.next_sibling(b), None);
    }

    #[test]
    fn growth_preserves_indices() {
        let mut arena = NodeArena::with_capacity_hint(0);
        let mut indices = Vec::new();
        for i in 0..200 {
            indices.push(arena.create_node(NodeKind::Identifier, i, 1, 1, 1));
        }
        assert!(arena.growth_count() > 0);
        for (i, idx) in indices.iter().enumerate() {
            assert_eq!(arena.start_offset(*idx), i as u32);
        }
    }
}
