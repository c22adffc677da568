//! Property-based tests using proptest.
//!
//! These check that the engine never panics on arbitrary input and that
//! rendering maps each known element to exactly one node while keeping every
//! piece of text in document order.

use docml_engine::ui::walk_all;
use docml_engine::{DocumentCache, Node, ParseOptions, UiNode, parse_document};
use proptest::prelude::*;

/// A generated document fragment built only from tags that render one-to-one.
#[derive(Debug, Clone)]
enum Fragment {
    Text(String),
    Element(&'static str, Vec<Fragment>),
}

impl Fragment {
    fn write(&self, out: &mut String) {
        match self {
            Fragment::Text(text) => out.push_str(text),
            Fragment::Element(name, children) => {
                out.push('<');
                out.push_str(name);
                out.push('>');
                for child in children {
                    child.write(out);
                }
                out.push_str("</");
                out.push_str(name);
                out.push('>');
            }
        }
    }

    fn texts(&self, out: &mut String) {
        match self {
            Fragment::Text(text) => out.push_str(text),
            Fragment::Element(_, children) => children.iter().for_each(|c| c.texts(out)),
        }
    }
}

fn fragment() -> impl Strategy<Value = Fragment> {
    let leaf = "[a-z]{1,8}".prop_map(Fragment::Text);
    leaf.prop_recursive(4, 48, 4, |inner| {
        (
            prop::sample::select(vec!["section", "p", "b", "i", "col", "grid"]),
            prop::collection::vec(inner, 0..4),
        )
            .prop_map(|(name, children)| Fragment::Element(name, children))
    })
}

fn source_of(fragments: &[Fragment]) -> String {
    let mut out = String::new();
    for f in fragments {
        f.write(&mut out);
    }
    out
}

/// Text nodes of a parsed document in pre-order.
fn document_texts(nodes: &[Node]) -> Vec<String> {
    let mut out = Vec::new();
    let mut stack: Vec<&Node> = nodes.iter().rev().collect();
    while let Some(node) = stack.pop() {
        match node {
            Node::Text { text } => out.push(text.clone()),
            Node::Element(el) => stack.extend(el.children.iter().rev()),
            Node::Comment { .. } => {}
        }
    }
    out
}

proptest! {
    /// Any random string fed to the engine should never cause a panic.
    #[test]
    fn any_input_no_panic(input in "\\PC{0,400}") {
        let nodes = docml_engine::render_source(&input);
        let _ = walk_all(&nodes).count();
        let _ = docml_engine::navigation_for(&input);
    }

    /// Tag soup is either a document or an error panel, never a panic.
    #[test]
    fn tag_soup_no_panic(input in "[<>/a-z &;=\"!-]{0,200}") {
        let nodes = DocumentCache::unbounded()
            .parse(&input)
            .map(|doc| doc.render())
            .unwrap_or_else(|err| vec![UiNode::error_panel(&err)]);
        let _ = docml_engine::render_html::to_html(&nodes);
    }

    /// Every known element becomes exactly one node and text order survives.
    #[test]
    fn rendering_flattens_nothing_and_loses_no_text(
        fragments in prop::collection::vec(fragment(), 0..4)
    ) {
        let source = source_of(&fragments);
        let doc = parse_document(&source, &ParseOptions::default()).expect("generated markup is well formed");
        let nodes = doc.render();

        let rendered_elements = walk_all(&nodes)
            .filter(|n| !matches!(n, UiNode::Text { .. }))
            .count();
        prop_assert_eq!(rendered_elements, doc.elements().count());

        let rendered_texts: Vec<String> = walk_all(&nodes)
            .filter_map(|n| match n {
                UiNode::Text { text } => Some(text.clone()),
                _ => None,
            })
            .collect();
        prop_assert_eq!(&rendered_texts, &document_texts(doc.children()));

        let mut expected = String::new();
        fragments.iter().for_each(|f| f.texts(&mut expected));
        prop_assert_eq!(rendered_texts.concat(), expected);
    }

    /// Navigation lists one entry per section, in source order.
    #[test]
    fn navigation_counts_sections(fragments in prop::collection::vec(fragment(), 0..4)) {
        let source = source_of(&fragments);
        let doc = parse_document(&source, &ParseOptions::default()).expect("generated markup is well formed");
        let sections = doc.elements().filter(|e| e.name == "section").count();
        prop_assert_eq!(doc.navigation().len(), sections);
    }

    /// Cached and uncached rendering agree, and repeated renders are identical.
    #[test]
    fn rendering_is_deterministic(fragments in prop::collection::vec(fragment(), 0..4)) {
        let source = source_of(&fragments);
        let cache = DocumentCache::unbounded();
        let first = cache.parse(&source).expect("parses").render();
        let second = cache.parse(&source).expect("parses").render();
        let fresh = parse_document(&source, &ParseOptions::default()).expect("parses").render();
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(&first, &fresh);
        prop_assert_eq!(cache.stats().misses, 1);
    }
}
