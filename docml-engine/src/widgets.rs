//! Local interaction state carried by rendered blocks.
//!
//! None of this is shared: every block owns its own copy indicator, open flag
//! or active tab. Time is passed in by the host so the feedback window can be
//! driven deterministically.

use std::time::{Duration, Instant};

use serde::ser::{Serialize, SerializeStruct, Serializer};

use crate::render::Renderer;
use crate::tags::Tag;
use crate::types::{Element, Node};
use crate::ui::UiNode;

/// How long the "copied" indicator stays on after a copy.
pub const COPY_FEEDBACK: Duration = Duration::from_secs(2);

/// The host's clipboard-write primitive.
pub trait Clipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("clipboard write failed: {message}")]
pub struct ClipboardError {
    pub message: String,
}

impl ClipboardError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Copy affordance of code and usage blocks.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct CopyButton {
    payload: String,
    #[serde(skip)]
    copied_at: Option<Instant>,
}

impl CopyButton {
    pub fn new(payload: impl Into<String>) -> Self {
        Self {
            payload: payload.into(),
            copied_at: None,
        }
    }

    /// The text handed to the clipboard.
    pub fn payload(&self) -> &str {
        &self.payload
    }

    /// Write the payload and turn the indicator on.
    ///
    /// The indicator flips whether or not the write succeeds. A failed write
    /// is logged and handed back so the host may surface it.
    pub fn copy(&mut self, clipboard: &mut dyn Clipboard, now: Instant) -> Result<(), ClipboardError> {
        self.copied_at = Some(now);
        clipboard
            .write_text(&self.payload)
            .inspect_err(|err| log::warn!("{err}"))
    }

    pub fn is_copied(&self, now: Instant) -> bool {
        self.copied_at
            .is_some_and(|at| now.saturating_duration_since(at) < COPY_FEEDBACK)
    }
}

/// Open/closed flag of a command block or disclosure. Starts collapsed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, serde::Serialize)]
pub struct Collapsible {
    open: bool,
}

impl Collapsible {
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn toggle(&mut self) {
        self.open = !self.open;
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
    }
}

/// One tab: the title shown in the strip and the unrendered source node.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Tab {
    pub title: String,
    #[serde(skip)]
    source: Element,
}

/// A tab strip with exactly one active panel.
///
/// Titles are read from the source elements, so only the selected panel is
/// rendered in memory. Switching tabs re-renders from source. The serialized
/// form carries every panel so that a host can switch without calling back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabsBlock {
    tabs: Vec<Tab>,
    active: usize,
    panel: Vec<UiNode>,
    renderer: Renderer,
    depth: usize,
}

impl Serialize for TabsBlock {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let panels: Vec<Vec<UiNode>> = (0..self.tabs.len())
            .map(|i| {
                if i == self.active {
                    self.panel.clone()
                } else {
                    self.render_panel(i)
                }
            })
            .collect();
        let mut state = serializer.serialize_struct("TabsBlock", 3)?;
        state.serialize_field("tabs", &self.tabs)?;
        state.serialize_field("active", &self.active)?;
        state.serialize_field("panels", &panels)?;
        state.end()
    }
}

impl TabsBlock {
    /// Build from the element children of a `tabs` tag. `None` when there are
    /// no elements to show.
    pub(crate) fn new(renderer: Renderer, depth: usize, sources: Vec<Element>) -> Option<Self> {
        if sources.is_empty() {
            return None;
        }
        let tabs: Vec<Tab> = sources
            .into_iter()
            .enumerate()
            .map(|(i, source)| Tab {
                title: source
                    .attr("title")
                    .filter(|t| !t.is_empty())
                    .map(str::to_string)
                    .unwrap_or_else(|| format!("Tab {}", i + 1)),
                source,
            })
            .collect();
        let mut block = Self {
            tabs,
            active: 0,
            panel: Vec::new(),
            renderer,
            depth,
        };
        block.panel = block.render_panel(0);
        Some(block)
    }

    pub fn tabs(&self) -> &[Tab] {
        &self.tabs
    }

    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.tabs.iter().map(|t| t.title.as_str())
    }

    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    pub fn active(&self) -> usize {
        self.active
    }

    /// The rendered content of the active tab.
    pub fn panel(&self) -> &[UiNode] {
        &self.panel
    }

    pub(crate) fn take_panel(&mut self) -> Vec<UiNode> {
        std::mem::take(&mut self.panel)
    }

    /// Make tab `index` active. Out-of-range indices are ignored.
    pub fn select(&mut self, index: usize) -> bool {
        if index >= self.tabs.len() {
            return false;
        }
        if index != self.active {
            self.active = index;
            self.panel = self.render_panel(index);
        }
        true
    }

    /// Render any tab's panel without selecting it.
    ///
    /// A `tab` element contributes its children; any other element renders as
    /// itself.
    pub fn render_panel(&self, index: usize) -> Vec<UiNode> {
        let Some(tab) = self.tabs.get(index) else {
            return Vec::new();
        };
        if Tag::from_name(&tab.source.name) == Some(Tag::Tab) {
            self.renderer
                .render_nodes(&tab.source.children, self.depth + 1)
        } else {
            self.renderer
                .render_nodes(&[Node::Element(tab.source.clone())], self.depth)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    struct MemoryClipboard {
        contents: Option<String>,
        fail: bool,
    }

    impl Clipboard for MemoryClipboard {
        fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
            if self.fail {
                return Err(ClipboardError::new("insecure context"));
            }
            self.contents = Some(text.to_string());
            Ok(())
        }
    }

    #[test]
    fn copy_indicator_lasts_two_seconds() {
        let mut clipboard = MemoryClipboard {
            contents: None,
            fail: false,
        };
        let mut button = CopyButton::new("cargo run");
        let t0 = Instant::now();
        assert!(!button.is_copied(t0));

        button.copy(&mut clipboard, t0).unwrap();
        assert_eq!(clipboard.contents.as_deref(), Some("cargo run"));
        assert!(button.is_copied(t0));
        assert!(button.is_copied(t0 + Duration::from_millis(1999)));
        assert!(!button.is_copied(t0 + COPY_FEEDBACK));
    }

    #[test]
    fn failed_write_still_flips_indicator() {
        let mut clipboard = MemoryClipboard {
            contents: None,
            fail: true,
        };
        let mut button = CopyButton::new("x");
        let t0 = Instant::now();
        let err = button.copy(&mut clipboard, t0).unwrap_err();
        assert_eq!(err, ClipboardError::new("insecure context"));
        assert!(button.is_copied(t0));
    }

    #[test]
    fn collapsible_starts_closed() {
        let mut state = Collapsible::default();
        assert!(!state.is_open());
        state.toggle();
        assert!(state.is_open());
        state.toggle();
        assert!(!state.is_open());
        state.open();
        state.close();
        assert!(!state.is_open());
    }

    fn tab(title: Option<&str>, body: &str) -> Element {
        let el = Element::new("tab").with_child(Node::text(body));
        match title {
            Some(t) => el.with_attr("title", t),
            None => el,
        }
    }

    #[test]
    fn tabs_number_missing_titles() {
        let block = TabsBlock::new(
            Renderer::default(),
            0,
            vec![tab(Some("Linux"), "a"), tab(None, "b"), tab(None, "c")],
        )
        .unwrap();
        assert_eq!(block.titles().collect::<Vec<_>>(), vec!["Linux", "Tab 2", "Tab 3"]);
    }

    #[test]
    fn empty_title_counts_as_missing() {
        let block = TabsBlock::new(Renderer::default(), 0, vec![tab(Some(""), "a"), tab(Some("B"), "b")]).unwrap();
        assert_eq!(block.titles().collect::<Vec<_>>(), vec!["Tab 1", "B"]);
    }

    #[test]
    fn serialized_form_carries_every_panel() {
        let mut block = TabsBlock::new(
            Renderer::default(),
            0,
            vec![tab(Some("A"), "alpha"), tab(Some("B"), "bravo")],
        )
        .unwrap();
        block.select(1);
        let value = serde_json::to_value(&block).unwrap();
        assert_eq!(value["active"], 1);
        assert_eq!(value["tabs"][0]["title"], "A");
        assert_eq!(value["panels"][0][0]["text"], "alpha");
        assert_eq!(value["panels"][1][0]["text"], "bravo");
        assert!(value.get("panel").is_none());
    }

    #[test]
    fn select_switches_the_rendered_panel() {
        let mut block = TabsBlock::new(
            Renderer::default(),
            0,
            vec![tab(Some("A"), "first"), tab(Some("B"), "second")],
        )
        .unwrap();
        assert_eq!(block.active(), 0);
        assert_eq!(block.panel(), &[UiNode::text("first")]);

        assert!(block.select(1));
        assert_eq!(block.active(), 1);
        assert_eq!(block.panel(), &[UiNode::text("second")]);

        assert!(!block.select(5));
        assert_eq!(block.active(), 1);
    }

    #[test]
    fn non_tab_child_renders_itself() {
        let block = TabsBlock::new(
            Renderer::default(),
            0,
            vec![Element::new("p").with_attr("title", "Para").with_child(Node::text("x"))],
        )
        .unwrap();
        assert_eq!(block.titles().collect::<Vec<_>>(), vec!["Para"]);
        assert_eq!(
            block.panel(),
            &[UiNode::Paragraph {
                children: vec![UiNode::text("x")]
            }]
        );
    }

    #[test]
    fn no_sources_no_block() {
        assert!(TabsBlock::new(Renderer::default(), 0, Vec::new()).is_none());
    }
}
