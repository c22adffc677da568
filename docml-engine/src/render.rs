//! The render engine: `Document` → `Vec<UiNode>`.
//!
//! Walks the children of the synthetic root in document order and maps every
//! element through a single exhaustive `match` over [`Tag`]. Tag renderers get
//! the attributes and a [`Children`] handle that renders the element's children
//! on demand, so a renderer decides whether to render them, read them as raw
//! text, or inspect them unrendered.

use std::sync::{Arc, LazyLock};

use crate::attrs::{
    self, AlertKind, Align, AttrEnum, BadgeColor, HttpMethod, Icon, ImageWidth, ListKind,
    VideoKind, attr_string,
};
use crate::cache::{DocumentCache, EngineConfig};
use crate::error::MarkupError;
use crate::parse::DEFAULT_MAX_DEPTH;
use crate::tags::Tag;
use crate::types::{Attrs, Document, Element, NavEntry, Node, text_content};
use crate::ui::{CheckItem, Mark, TablePart, UiNode};
use crate::widgets::{Collapsible, CopyButton, TabsBlock};

/// Stateless tree transformer. Cheap to copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Renderer {
    max_depth: usize,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_DEPTH)
    }
}

/// Lazy access to an element's children.
pub struct Children<'a> {
    renderer: Renderer,
    nodes: &'a [Node],
    depth: usize,
}

impl<'a> Children<'a> {
    /// Render every child node.
    pub fn render(&self) -> Vec<UiNode> {
        self.renderer.render_nodes(self.nodes, self.depth)
    }

    /// The children as parsed.
    pub fn nodes(&self) -> &'a [Node] {
        self.nodes
    }

    /// Text for a copy payload.
    ///
    /// A lone text child is used as-is; anything else is the concatenated text
    /// of all descendants. Never fails; no text at all gives `""`.
    pub fn raw_text(&self) -> String {
        match self.nodes {
            [Node::Text { text }] => text.clone(),
            nodes => text_content(nodes),
        }
    }

    /// Element children only, unrendered.
    pub fn elements(&self) -> impl Iterator<Item = &'a Element> {
        self.nodes.iter().filter_map(Node::as_element)
    }
}

impl Renderer {
    /// `max_depth` bounds element nesting. Anything deeper is dropped with a
    /// warning.
    pub fn new(max_depth: usize) -> Self {
        Self { max_depth }
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Render the children of the document root.
    pub fn render(&self, doc: &Document) -> Vec<UiNode> {
        self.render_nodes(doc.children(), 0)
    }

    pub(crate) fn render_nodes(&self, nodes: &[Node], depth: usize) -> Vec<UiNode> {
        let mut out = Vec::with_capacity(nodes.len());
        for node in nodes {
            self.render_node(node, depth, &mut out);
        }
        out
    }

    fn render_node(&self, node: &Node, depth: usize, out: &mut Vec<UiNode>) {
        match node {
            Node::Text { .. } if node.is_formatting_whitespace() => {}
            Node::Text { text } => out.push(UiNode::text(text.clone())),
            Node::Comment { .. } => {}
            Node::Element(el) => {
                if depth >= self.max_depth {
                    log::warn!(
                        "<{}> is nested deeper than {} levels; dropping it",
                        el.name,
                        self.max_depth
                    );
                    return;
                }
                let children = Children {
                    renderer: *self,
                    nodes: &el.children,
                    depth: depth + 1,
                };
                match Tag::from_name(&el.name) {
                    Some(tag) => out.extend(self.render_tag(tag, &el.attrs, children)),
                    // Unknown tags are transparent.
                    None => out.extend(children.render()),
                }
            }
        }
    }

    fn render_tag(&self, tag: Tag, attrs: &Attrs, children: Children<'_>) -> Option<UiNode> {
        let get = |key: &str| attrs.get(key).map(String::as_str);

        let node = match tag {
            Tag::Section => UiNode::Section {
                id: attr_string(attrs, "id"),
                children: children.render(),
            },
            Tag::Grid => UiNode::Grid {
                columns: attrs::grid_columns(get("cols")),
                children: children.render(),
            },
            Tag::Col => UiNode::Column {
                children: children.render(),
            },
            Tag::Separator => UiNode::Divider,

            Tag::H1 | Tag::H2 | Tag::H3 => UiNode::Heading {
                level: match tag {
                    Tag::H1 => 1,
                    Tag::H2 => 2,
                    _ => 3,
                },
                icon: match tag {
                    Tag::H2 => get("icon")
                        .filter(|v| !v.is_empty())
                        .map(|v| Icon::from_attr(Some(v))),
                    _ => None,
                },
                children: children.render(),
            },
            Tag::P => UiNode::Paragraph {
                children: children.render(),
            },
            Tag::Quote => UiNode::Quote {
                author: attr_string(attrs, "author"),
                children: children.render(),
            },

            Tag::Img => UiNode::Image {
                src: attr_string(attrs, "src"),
                alt: get("alt")
                    .filter(|a| !a.is_empty())
                    .unwrap_or(attrs::DEFAULT_IMAGE_ALT)
                    .to_string(),
                caption: attr_string(attrs, "caption"),
                align: Align::from_attr(get("align")),
                width: ImageWidth::from_attr(get("width")),
                shadow: attrs::image_shadow(get("shadow")),
            },
            Tag::Video => UiNode::Video {
                src: attr_string(attrs, "src"),
                player: VideoKind::from_attr(get("type")),
                title: get("title")
                    .filter(|t| !t.is_empty())
                    .unwrap_or(attrs::DEFAULT_VIDEO_TITLE)
                    .to_string(),
            },

            Tag::List => match ListKind::from_attr(get("type")) {
                ListKind::Check => UiNode::Checklist {
                    items: checklist_items(&children),
                },
                kind => UiNode::List {
                    ordered: kind == ListKind::Ordered,
                    children: children.render(),
                },
            },
            Tag::Li => UiNode::ListItem {
                children: children.render(),
            },

            Tag::Table | Tag::Thead | Tag::Tbody | Tag::Tr | Tag::Th | Tag::Td => UiNode::Table {
                part: match tag {
                    Tag::Table => TablePart::Table,
                    Tag::Thead => TablePart::Head,
                    Tag::Tbody => TablePart::Body,
                    Tag::Tr => TablePart::Row,
                    Tag::Th => TablePart::HeaderCell,
                    _ => TablePart::Cell,
                },
                children: children.render(),
            },

            Tag::Codeblock => {
                let code = children.raw_text();
                UiNode::CodeBlock {
                    lang: get("lang")
                        .filter(|l| !l.is_empty())
                        .unwrap_or(attrs::DEFAULT_CODE_LANG)
                        .to_string(),
                    title: attr_string(attrs, "title"),
                    copy: CopyButton::new(code.clone()),
                    code,
                }
            }
            Tag::Cmd => UiNode::Command {
                name: attr_string(attrs, "name"),
                desc: attr_string(attrs, "desc"),
                tag: attr_string(attrs, "tag"),
                state: Collapsible::default(),
                children: children.render(),
            },
            Tag::Usage => UiNode::Usage {
                copy: CopyButton::new(children.raw_text()),
                children: children.render(),
            },
            Tag::Api => UiNode::Api {
                method: HttpMethod::from_attr(get("method")),
                label: attr_string(attrs, "method"),
                url: attr_string(attrs, "url"),
                children: children.render(),
            },

            Tag::Tabs => {
                let sources = children.elements().cloned().collect();
                return TabsBlock::new(*self, children.depth, sources).map(UiNode::Tabs);
            }
            Tag::Tab => UiNode::Panel {
                title: attr_string(attrs, "title"),
                children: children.render(),
            },
            Tag::Details => UiNode::Details {
                summary: attr_string(attrs, "summary"),
                state: Collapsible::default(),
                children: children.render(),
            },

            Tag::Alert => UiNode::Alert {
                level: AlertKind::from_attr(get("type")),
                children: children.render(),
            },
            Tag::Card => UiNode::Card {
                title: attr_string(attrs, "title"),
                href: attr_string(attrs, "href"),
                children: children.render(),
            },
            Tag::Step => UiNode::Step {
                num: attr_string(attrs, "num"),
                title: attr_string(attrs, "title"),
                children: children.render(),
            },

            Tag::B | Tag::I | Tag::U | Tag::Kbd | Tag::Code => UiNode::Mark {
                mark: match tag {
                    Tag::B => Mark::Bold,
                    Tag::I => Mark::Italic,
                    Tag::U => Mark::Underline,
                    Tag::Kbd => Mark::Kbd,
                    _ => Mark::Code,
                },
                children: children.render(),
            },
            Tag::Link => UiNode::Link {
                href: attr_string(attrs, "href"),
                children: children.render(),
            },
            Tag::Badge => UiNode::Badge {
                color: BadgeColor::from_attr(get("color")),
                children: children.render(),
            },
            Tag::Tooltip => UiNode::Tooltip {
                text: attr_string(attrs, "text"),
                children: children.render(),
            },
            Tag::Param => UiNode::Param {
                name: attr_string(attrs, "name"),
                type_name: attr_string(attrs, "type"),
                required: attrs::is_true(get("req")),
                children: children.render(),
            },
        };
        Some(node)
    }
}

/// `li` children of a checklist; everything else is skipped.
fn checklist_items(children: &Children<'_>) -> Vec<CheckItem> {
    children
        .elements()
        .filter(|el| Tag::from_name(&el.name) == Some(Tag::Li))
        .map(|li| CheckItem {
            text: li.text_content(),
            checked: attrs::is_true(li.attr("checked")),
        })
        .collect()
}

/// Parse cache plus renderer: the boundary hosts talk to.
pub struct Engine {
    cache: DocumentCache,
    renderer: Renderer,
}

impl Engine {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            cache: DocumentCache::new(config),
            renderer: Renderer::new(config.parse.max_depth),
        }
    }

    pub fn cache(&self) -> &DocumentCache {
        &self.cache
    }

    pub fn renderer(&self) -> Renderer {
        self.renderer
    }

    pub fn parse(&self, source: &str) -> Result<Arc<Document>, MarkupError> {
        self.cache.parse(source)
    }

    /// Render `source`, handing markup errors back to the caller.
    pub fn try_render(&self, source: &str) -> Result<Vec<UiNode>, MarkupError> {
        let doc = self.cache.parse(source)?;
        Ok(self.renderer.render(&doc))
    }

    /// Render `source`. A markup error is logged and replaced by a single
    /// error panel; this never fails.
    pub fn render_source(&self, source: &str) -> Vec<UiNode> {
        match self.try_render(source) {
            Ok(nodes) => nodes,
            Err(err) => {
                log::error!("failed to parse document: {err}");
                vec![UiNode::error_panel(&err)]
            }
        }
    }

    pub fn navigation(&self, source: &str) -> Vec<NavEntry> {
        self.cache.navigation(source)
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

static ENGINE: LazyLock<Engine> = LazyLock::new(Engine::default);

/// The process-wide engine behind the free functions.
pub fn engine() -> &'static Engine {
    &ENGINE
}

/// Render `source` with the process-wide engine.
pub fn render_source(source: &str) -> Vec<UiNode> {
    engine().render_source(source)
}
