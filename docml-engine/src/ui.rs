//! The rendered UI element tree.
//!
//! [`UiNode`] is what the render engine produces and what every output surface
//! consumes: the HTML and terminal renderers, or a browser host reading the
//! JSON form. Attribute values are already interpreted (defaults applied) so
//! consumers never look at raw attributes.

use serde::Serialize;

use crate::attrs::{Align, AlertKind, BadgeColor, HttpMethod, Icon, ImageWidth, VideoKind};
use crate::error::MarkupError;
use crate::widgets::{Collapsible, CopyButton, TabsBlock};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "node", rename_all = "camelCase")]
pub enum UiNode {
    /// A literal text span.
    Text { text: String },

    Section {
        id: Option<String>,
        children: Vec<UiNode>,
    },
    Grid {
        columns: usize,
        children: Vec<UiNode>,
    },
    Column { children: Vec<UiNode> },
    Divider,

    Heading {
        level: u8,
        icon: Option<Icon>,
        children: Vec<UiNode>,
    },
    Paragraph { children: Vec<UiNode> },
    /// The footer is only shown when `author` is present.
    Quote {
        author: Option<String>,
        children: Vec<UiNode>,
    },

    Image {
        src: Option<String>,
        alt: String,
        caption: Option<String>,
        align: Align,
        width: ImageWidth,
        shadow: bool,
    },
    Video {
        src: Option<String>,
        player: VideoKind,
        title: String,
    },

    List {
        ordered: bool,
        children: Vec<UiNode>,
    },
    ListItem { children: Vec<UiNode> },
    Checklist { items: Vec<CheckItem> },

    Table {
        part: TablePart,
        children: Vec<UiNode>,
    },

    CodeBlock {
        lang: String,
        title: Option<String>,
        code: String,
        copy: CopyButton,
    },
    /// Collapsible command reference. Children are always present; the state
    /// only controls visibility.
    Command {
        name: Option<String>,
        desc: Option<String>,
        tag: Option<String>,
        state: Collapsible,
        children: Vec<UiNode>,
    },
    Usage {
        copy: CopyButton,
        children: Vec<UiNode>,
    },
    Api {
        method: HttpMethod,
        /// The method exactly as authored, shown as the label.
        label: Option<String>,
        url: Option<String>,
        children: Vec<UiNode>,
    },

    Tabs(TabsBlock),
    /// A `tab` outside of a tab strip.
    Panel {
        title: Option<String>,
        children: Vec<UiNode>,
    },
    Details {
        summary: Option<String>,
        state: Collapsible,
        children: Vec<UiNode>,
    },

    Alert {
        level: AlertKind,
        children: Vec<UiNode>,
    },
    Card {
        title: Option<String>,
        href: Option<String>,
        children: Vec<UiNode>,
    },
    /// Number and title are shown verbatim.
    Step {
        num: Option<String>,
        title: Option<String>,
        children: Vec<UiNode>,
    },

    Mark {
        mark: Mark,
        children: Vec<UiNode>,
    },
    Link {
        href: Option<String>,
        children: Vec<UiNode>,
    },
    Badge {
        color: BadgeColor,
        children: Vec<UiNode>,
    },
    Tooltip {
        text: Option<String>,
        children: Vec<UiNode>,
    },
    Param {
        name: Option<String>,
        #[serde(rename = "type")]
        type_name: Option<String>,
        required: bool,
        children: Vec<UiNode>,
    },

    /// Shown in place of a document that failed to parse.
    ErrorPanel {
        message: String,
        line: usize,
        column: usize,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckItem {
    pub text: String,
    pub checked: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum TablePart {
    Table,
    Head,
    Body,
    Row,
    HeaderCell,
    Cell,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Mark {
    Bold,
    Italic,
    Underline,
    Kbd,
    Code,
}

pub const ERROR_PANEL_TITLE: &str = "Failed to render documentation";

impl UiNode {
    pub fn text(text: impl Into<String>) -> Self {
        UiNode::Text { text: text.into() }
    }

    pub fn error_panel(err: &MarkupError) -> Self {
        let at = err.position();
        UiNode::ErrorPanel {
            message: err.to_string(),
            line: at.line,
            column: at.column,
        }
    }

    /// Rendered children. For a tab strip this is the active panel.
    pub fn children(&self) -> &[UiNode] {
        match self {
            UiNode::Section { children, .. }
            | UiNode::Grid { children, .. }
            | UiNode::Column { children }
            | UiNode::Heading { children, .. }
            | UiNode::Paragraph { children }
            | UiNode::Quote { children, .. }
            | UiNode::List { children, .. }
            | UiNode::ListItem { children }
            | UiNode::Table { children, .. }
            | UiNode::Command { children, .. }
            | UiNode::Usage { children, .. }
            | UiNode::Api { children, .. }
            | UiNode::Panel { children, .. }
            | UiNode::Details { children, .. }
            | UiNode::Alert { children, .. }
            | UiNode::Card { children, .. }
            | UiNode::Step { children, .. }
            | UiNode::Mark { children, .. }
            | UiNode::Link { children, .. }
            | UiNode::Badge { children, .. }
            | UiNode::Tooltip { children, .. }
            | UiNode::Param { children, .. } => children,
            UiNode::Tabs(tabs) => tabs.panel(),
            UiNode::Text { .. }
            | UiNode::Divider
            | UiNode::Image { .. }
            | UiNode::Video { .. }
            | UiNode::Checklist { .. }
            | UiNode::CodeBlock { .. }
            | UiNode::ErrorPanel { .. } => &[],
        }
    }

    /// Move the rendered children out, leaving the node empty.
    pub(crate) fn take_children(&mut self) -> Vec<UiNode> {
        match self {
            UiNode::Section { children, .. }
            | UiNode::Grid { children, .. }
            | UiNode::Column { children }
            | UiNode::Heading { children, .. }
            | UiNode::Paragraph { children }
            | UiNode::Quote { children, .. }
            | UiNode::List { children, .. }
            | UiNode::ListItem { children }
            | UiNode::Table { children, .. }
            | UiNode::Command { children, .. }
            | UiNode::Usage { children, .. }
            | UiNode::Api { children, .. }
            | UiNode::Panel { children, .. }
            | UiNode::Details { children, .. }
            | UiNode::Alert { children, .. }
            | UiNode::Card { children, .. }
            | UiNode::Step { children, .. }
            | UiNode::Mark { children, .. }
            | UiNode::Link { children, .. }
            | UiNode::Badge { children, .. }
            | UiNode::Tooltip { children, .. }
            | UiNode::Param { children, .. } => std::mem::take(children),
            UiNode::Tabs(tabs) => tabs.take_panel(),
            UiNode::Text { .. }
            | UiNode::Divider
            | UiNode::Image { .. }
            | UiNode::Video { .. }
            | UiNode::Checklist { .. }
            | UiNode::CodeBlock { .. }
            | UiNode::ErrorPanel { .. } => Vec::new(),
        }
    }

    /// Pre-order traversal of this node and everything below it.
    pub fn walk(&self) -> Walk<'_> {
        Walk { stack: vec![self] }
    }

    /// Concatenated text of every `Text` node below this one.
    pub fn plain_text(&self) -> String {
        self.walk()
            .filter_map(|n| match n {
                UiNode::Text { text } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

/// Pre-order iterator returned by [`UiNode::walk`].
pub struct Walk<'a> {
    stack: Vec<&'a UiNode>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = &'a UiNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.stack.extend(node.children().iter().rev());
        Some(node)
    }
}

/// Pre-order traversal over a rendered sequence.
pub fn walk_all(nodes: &[UiNode]) -> impl Iterator<Item = &UiNode> {
    nodes.iter().flat_map(UiNode::walk)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn walk_is_pre_order() {
        let tree = UiNode::Section {
            id: Some("s".into()),
            children: vec![
                UiNode::Paragraph {
                    children: vec![UiNode::text("a"), UiNode::text("b")],
                },
                UiNode::Divider,
                UiNode::text("c"),
            ],
        };
        assert_eq!(tree.walk().count(), 6);
        assert_eq!(tree.plain_text(), "abc");
    }

    #[test]
    fn serializes_with_node_tag() {
        let json = serde_json::to_value(UiNode::Badge {
            color: BadgeColor::Blue,
            children: vec![UiNode::text("new")],
        })
        .unwrap();
        assert_eq!(json["node"], "badge");
        assert_eq!(json["color"], "blue");
        assert_eq!(json["children"][0]["text"], "new");
    }

    #[test]
    fn param_type_field_is_named_type() {
        let json = serde_json::to_value(UiNode::Param {
            name: Some("id".into()),
            type_name: Some("string".into()),
            required: true,
            children: Vec::new(),
        })
        .unwrap();
        assert_eq!(json["type"], "string");
        assert_eq!(json["required"], true);
    }
}
