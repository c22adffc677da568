//! `docml-engine`: parser and render engine for DocML.
//!
//! DocML is a small XML dialect for authoring documentation pages: sections,
//! grids, headings, code blocks with copy buttons, collapsible command
//! references, tab strips, checklists, API descriptions and a handful of
//! inline marks. This crate parses a source string into a [`Document`],
//! renders it into a tree of [`UiNode`]s, and extracts the section list used
//! for page navigation.
//!
//! # Quick start
//!
//! ```
//! let nodes = docml_engine::render_source(r#"<section id="intro" title="Intro"><p>Hello</p></section>"#);
//! assert_eq!(nodes.len(), 1);
//!
//! let nav = docml_engine::navigation_for(r#"<section id="intro" title="Intro"/>"#);
//! assert_eq!(nav[0].title, "Intro");
//! ```

pub mod attrs;
pub mod cache;
pub mod error;
pub mod nav;
pub mod parse;
pub mod render;
pub mod render_html;
#[cfg(feature = "terminal")]
pub mod render_term;
pub mod tags;
pub mod types;
pub mod ui;
pub mod validate;
pub mod widgets;

pub use cache::{CacheStats, DocumentCache, EngineConfig};
pub use error::*;
pub use nav::{Navigation, ScrollError, Scroller, extract_navigation, navigation_for};
pub use parse::{ParseOptions, parse, parse_document};
pub use render::{Engine, Renderer, engine, render_source};
pub use tags::Tag;
pub use types::*;
pub use ui::UiNode;
pub use widgets::{COPY_FEEDBACK, Clipboard, ClipboardError, Collapsible, CopyButton, TabsBlock};

pub use render_html::PageConfig;

impl Document {
    /// Render this document with the default renderer.
    pub fn render(&self) -> Vec<UiNode> {
        Renderer::default().render(self)
    }

    /// Section entries for a jump list.
    pub fn navigation(&self) -> Vec<NavEntry> {
        nav::extract_navigation(self)
    }

    /// Render this document as an HTML fragment with `docml-*` CSS classes.
    pub fn to_html(&self) -> String {
        render_html::to_html(&self.render())
    }

    /// Render this document as a complete HTML page with a section sidebar.
    pub fn to_html_page(&self, config: &PageConfig) -> String {
        render_html::to_html_page(&self.render(), &self.navigation(), config)
    }

    /// Render this document as ANSI-colored terminal text.
    #[cfg(feature = "terminal")]
    pub fn to_terminal(&self) -> String {
        render_term::to_terminal(&self.render())
    }

    /// Validate this document and return any diagnostics.
    pub fn validate(&self) -> Vec<Diagnostic> {
        validate::validate(self)
    }
}

/// Serialize rendered nodes as pretty-printed JSON for a browser host.
pub fn to_json(nodes: &[UiNode]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(nodes)
}
