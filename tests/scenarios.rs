//! Scenario-level integration tests, asserting against the public façade
//! (`Document`/`Node`) rather than against arena internals, the way a
//! downstream consumer of this crate would.

use css_syntax::{parse, AttrOperator, NodeKind, ParserOptions};

#[test]
fn basic_rule() {
    let doc = parse("body { color: red; }", &mut ParserOptions::default()).expect("parses");
    let root = doc.root();
    assert_eq!(root.kind_name(), "Stylesheet");

    let rule = root.first_child().expect("style rule");
    assert_eq!(rule.kind(), NodeKind::StyleRule);
    assert!(rule.has_declarations());

    let selector_list = rule.first_child().expect("selector list");
    assert_eq!(selector_list.kind(), NodeKind::SelectorList);
    let type_selector = selector_list.first_child().expect("type selector");
    assert_eq!(type_selector.kind(), NodeKind::TypeSelector);
    assert_eq!(type_selector.name(), "body");

    let block = selector_list.next_sibling().expect("block");
    assert_eq!(block.kind(), NodeKind::Block);
    let decl = block.first_child().expect("declaration");
    assert_eq!(decl.kind(), NodeKind::Declaration);
    assert_eq!(decl.property(), "color");
    assert_eq!(decl.value_text(), "red");
    assert!(!decl.is_important());
}

#[test]
fn nested_rule_with_at_rule_and_media() {
    let source = ".card { color: red; @media (min-width: 768px) { padding: 2rem; } }";
    let doc = parse(source, &mut ParserOptions::default()).expect("parses");
    let rule = doc.root().first_child().expect("style rule");
    let block = rule.child_at(1).expect("block");

    let decl = block.first_child().expect("color declaration");
    assert_eq!(decl.property(), "color");
    assert_eq!(decl.value_text(), "red");

    let at_rule = decl.next_sibling().expect("@media");
    assert_eq!(at_rule.kind(), NodeKind::AtRule);
    assert_eq!(at_rule.name(), "media");
    assert!(at_rule.has_block());

    let inner_block = at_rule.nth_child_of_kind(NodeKind::Block).expect("inner block");
    let inner_decl = inner_block.first_child().expect("padding declaration");
    assert_eq!(inner_decl.property(), "padding");
    assert_eq!(inner_decl.value_text(), "2rem");
}

#[test]
fn long_inline_data_url_is_not_truncated() {
    let body = "A".repeat(70_000);
    let data_uri = format!("data:image/png;base64,{body}");
    let source = format!(".t {{ background-image: url({data_uri}); }}");
    let doc = parse(&source, &mut ParserOptions::default()).expect("parses");

    let rule = doc.root().first_child().expect("style rule");
    let block = rule.child_at(1).expect("block");
    let decl = block.first_child().expect("declaration");
    assert_eq!(decl.property(), "background-image");
    assert!(decl.length() as usize > u16::MAX as usize);

    let value = decl.value_node().expect("value subtree");
    let url = value.first_child().expect("url node");
    assert_eq!(url.kind(), NodeKind::Url);
    assert_eq!(url.url_value(), data_uri);
}

#[test]
fn attribute_selector_with_dash_match() {
    let doc = parse("[root|=\"test\"] {}", &mut ParserOptions::default()).expect("parses");
    let rule = doc.root().first_child().expect("style rule");
    let selector_list = rule.first_child().expect("selector list");
    let attr = selector_list.first_child().expect("attribute selector");
    assert_eq!(attr.kind(), NodeKind::AttributeSelector);
    assert_eq!(attr.name(), "root");
    assert_eq!(attr.attr_operator(), AttrOperator::DashMatch);
    assert_eq!(attr.value_text(), "\"test\"");
}

#[test]
fn nth_of_selector_with_raw_anplusb_text() {
    let doc = parse(":nth-child(2n+1 of .active) {}", &mut ParserOptions::default()).expect("parses");
    let rule = doc.root().first_child().expect("style rule");
    let selector_list = rule.first_child().expect("selector list");
    let pseudo = selector_list.first_child().expect("pseudo selector");
    assert_eq!(pseudo.kind(), NodeKind::PseudoClassSelector);
    assert_eq!(pseudo.name(), "nth-child");

    let nth_of = pseudo.first_child().expect("nth-of selector");
    assert_eq!(nth_of.kind(), NodeKind::NthOfSelector);

    let nth = nth_of.nth().expect("an+b node");
    assert_eq!(nth.kind(), NodeKind::NthSelector);
    assert_eq!(nth.nth_a(), "2n");
    assert_eq!(nth.nth_b(), "+1");

    let inner_list = nth_of.selector_list().expect("nested selector list");
    let class_selector = inner_list.first_child().expect("class selector");
    assert_eq!(class_selector.kind(), NodeKind::ClassSelector);
    assert_eq!(class_selector.name(), "active");
}

#[test]
fn range_media_feature() {
    let doc = parse("@media (200px <= width <= 600px) {}", &mut ParserOptions::default()).expect("parses");
    let at_rule = doc.root().first_child().expect("@media rule");
    assert_eq!(at_rule.kind(), NodeKind::AtRule);

    let media_query = at_rule.nth_child_of_kind(NodeKind::MediaQuery).expect("media query");
    let range = media_query.nth_child_of_kind(NodeKind::FeatureRange).expect("feature range");

    let kinds: Vec<_> = range.children().map(|c| c.kind()).collect();
    assert_eq!(
        kinds,
        vec![
            NodeKind::Dimension,
            NodeKind::PreludeOperator,
            NodeKind::Identifier,
            NodeKind::PreludeOperator,
            NodeKind::Dimension,
        ]
    );
    assert_eq!(range.name(), "width");
}

#[test]
fn on_comment_callback_fires_for_every_comment() {
    let source = "/* one */ a { color: red; /* two */ }";
    let mut seen = Vec::new();
    let mut options = ParserOptions {
        on_comment: Some(Box::new(|start, end, len, _line, _column| {
            seen.push((start, end, len));
        })),
        ..ParserOptions::default()
    };
    let doc = parse(source, &mut options).expect("parses");
    drop(options);
    assert_eq!(seen.len(), 2);
    for (start, end, len) in &seen {
        assert_eq!(end - start, *len);
        assert!(source[*start as usize..*end as usize].starts_with("/*"));
    }
    // Comments are still recorded as nodes independent of the callback —
    // both mechanisms fire from the same comment.
    assert!(doc.root().children().any(|c| c.kind() == NodeKind::Comment));
    let rule = doc.root().nth_child_of_kind(NodeKind::StyleRule).expect("style rule");
    let block = rule.child_at(1).expect("block");
    assert!(block.children().any(|c| c.kind() == NodeKind::Comment));
}
