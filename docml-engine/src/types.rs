use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Name of the implicit element wrapped around every source string.
pub const ROOT_TAG: &str = "root";

/// A parsed DocML document.
///
/// Immutable once produced. The tree always hangs off a synthetic `root`
/// element; renderers and the navigation extractor only look at its children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    root: Element,
}

impl Document {
    /// Wrap already-built top-level nodes in the synthetic root.
    pub fn from_nodes(children: Vec<Node>) -> Self {
        Self {
            root: Element {
                name: ROOT_TAG.to_string(),
                attrs: Attrs::new(),
                children,
            },
        }
    }

    /// The synthetic root element.
    pub fn root(&self) -> &Element {
        &self.root
    }

    /// Top-level nodes of the authored source, in document order.
    pub fn children(&self) -> &[Node] {
        &self.root.children
    }

    /// Pre-order iterator over every element below the root.
    pub fn elements(&self) -> Elements<'_> {
        Elements {
            stack: self.root.children.iter().rev().collect(),
        }
    }
}

/// A node of the parsed tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Node {
    /// Literal character data (entities already resolved).
    Text { text: String },
    /// A tag with attributes and children.
    Element(Element),
    /// A markup comment. Kept for fidelity, never rendered.
    Comment { text: String },
}

impl Node {
    pub fn text(text: impl Into<String>) -> Self {
        Node::Text { text: text.into() }
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(el) => Some(el),
            _ => None,
        }
    }

    /// True for text that only exists because the author indented the source.
    ///
    /// The rule is deliberately narrow: whitespace-only text is discarded only
    /// when it also contains a newline. A lone space between two inline tags is
    /// real spacing and must survive.
    pub fn is_formatting_whitespace(&self) -> bool {
        match self {
            Node::Text { text } => text.trim().is_empty() && text.contains('\n'),
            _ => false,
        }
    }
}

/// An element node: lowercase tag name, attributes and ordered children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Element {
    pub name: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub attrs: Attrs,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Node>,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into().to_ascii_lowercase(),
            attrs: Attrs::new(),
            children: Vec::new(),
        }
    }

    /// Builder helper, mostly for tests and hand-built documents.
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(key.into(), value.into());
        self
    }

    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attrs.get(key).map(String::as_str)
    }

    /// Element children only, skipping text and comments.
    pub fn child_elements(&self) -> impl Iterator<Item = &Element> {
        self.children.iter().filter_map(Node::as_element)
    }

    /// Concatenated text of every descendant text node.
    ///
    /// Iterative so that pathological nesting cannot exhaust the stack.
    pub fn text_content(&self) -> String {
        text_content(&self.children)
    }
}

impl From<Element> for Node {
    fn from(el: Element) -> Self {
        Node::Element(el)
    }
}

/// Concatenated descendant text of a node slice, in document order.
pub fn text_content(nodes: &[Node]) -> String {
    let mut out = String::new();
    let mut stack: Vec<&Node> = nodes.iter().rev().collect();
    while let Some(node) = stack.pop() {
        match node {
            Node::Text { text } => out.push_str(text),
            Node::Element(el) => stack.extend(el.children.iter().rev()),
            Node::Comment { .. } => {}
        }
    }
    out
}

/// Pre-order element iterator returned by [`Document::elements`].
pub struct Elements<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Iterator for Elements<'a> {
    type Item = &'a Element;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(node) = self.stack.pop() {
            if let Node::Element(el) = node {
                self.stack.extend(el.children.iter().rev());
                return Some(el);
            }
        }
        None
    }
}

/// Attribute map. Keys are unique; ordering carries no meaning.
pub type Attrs = BTreeMap<String, String>;

/// A table-of-contents entry derived from a `section` element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavEntry {
    pub id: String,
    pub title: String,
    pub icon: String,
}

/// Location in the author's source (before the synthetic root is added).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    /// 1-based line number.
    pub line: usize,
    /// 1-based column, counted in characters.
    pub column: usize,
    /// 0-based byte offset.
    pub offset: usize,
}

impl Position {
    /// Resolve a byte offset in `source` into line and column.
    ///
    /// Offsets past the end clamp to the end of the source.
    pub fn locate(source: &str, offset: usize) -> Self {
        let mut offset = offset.min(source.len());
        while !source.is_char_boundary(offset) {
            offset -= 1;
        }
        let before = &source[..offset];
        let line = before.matches('\n').count() + 1;
        let line_start = before.rfind('\n').map(|i| i + 1).unwrap_or(0);
        let column = before[line_start..].chars().count() + 1;
        Self {
            line,
            column,
            offset,
        }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}, column {}", self.line, self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn newline_whitespace_is_formatting() {
        assert!(Node::text("\n   \n").is_formatting_whitespace());
        assert!(Node::text("\n").is_formatting_whitespace());
    }

    #[test]
    fn single_space_is_kept() {
        assert!(!Node::text(" ").is_formatting_whitespace());
        assert!(!Node::text("\t  ").is_formatting_whitespace());
        assert!(!Node::text("\n word \n").is_formatting_whitespace());
    }

    #[test]
    fn text_content_walks_descendants_in_order() {
        let el = Element::new("p")
            .with_child(Node::text("a"))
            .with_child(
                Element::new("b")
                    .with_child(Node::text("b"))
                    .with_child(Node::Comment {
                        text: "skip".into(),
                    })
                    .into(),
            )
            .with_child(Node::text("c"));
        assert_eq!(el.text_content(), "abc");
    }

    #[test]
    fn elements_iterates_pre_order() {
        let doc = Document::from_nodes(vec![
            Element::new("section")
                .with_child(Element::new("h1").into())
                .with_child(Element::new("p").into())
                .into(),
            Element::new("section").into(),
        ]);
        let names: Vec<&str> = doc.elements().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["section", "h1", "p", "section"]);
    }

    #[test]
    fn element_names_are_lowercased() {
        assert_eq!(Element::new("Grid").name, "grid");
    }

    #[test]
    fn position_locate() {
        let src = "ab\ncd\nef";
        assert_eq!(
            Position::locate(src, 4),
            Position {
                line: 2,
                column: 2,
                offset: 4
            }
        );
        assert_eq!(Position::locate(src, 0).line, 1);
        assert_eq!(Position::locate(src, 999).offset, src.len());
    }
}
