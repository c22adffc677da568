//! Navigation extraction and the active-entry tracker behind a jump list.

use crate::tags::Tag;
use crate::types::{Document, NavEntry};

pub const UNTITLED: &str = "Untitled";
pub const DEFAULT_NAV_ICON: &str = "hash";

/// One entry per `section` element at any depth, in document order.
///
/// Missing or empty attributes fall back to an empty id, "Untitled" and "hash".
pub fn extract_navigation(doc: &Document) -> Vec<NavEntry> {
    doc.elements()
        .filter(|el| Tag::from_name(&el.name) == Some(Tag::Section))
        .map(|section| {
            let non_empty = |key: &str| section.attr(key).filter(|v| !v.is_empty());
            NavEntry {
                id: section.attr("id").unwrap_or_default().to_string(),
                title: non_empty("title").unwrap_or(UNTITLED).to_string(),
                icon: non_empty("icon").unwrap_or(DEFAULT_NAV_ICON).to_string(),
            }
        })
        .collect()
}

/// Navigation entries for a raw source string.
///
/// A source that fails to parse yields no entries rather than an error.
pub fn navigation_for(source: &str) -> Vec<NavEntry> {
    crate::engine().navigation(source)
}

/// The smooth-scroll primitive of the host UI.
pub trait Scroller {
    fn scroll_into_view(&mut self, id: &str) -> Result<(), ScrollError>;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("no element with id '{id}' to scroll to")]
pub struct ScrollError {
    pub id: String,
}

/// Jump-list state: the entries plus which one is active.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    entries: Vec<NavEntry>,
    active: Option<String>,
}

impl Navigation {
    /// The first entry starts out active.
    pub fn new(entries: Vec<NavEntry>) -> Self {
        let active = entries.first().map(|e| e.id.clone());
        Self { entries, active }
    }

    pub fn entries(&self) -> &[NavEntry] {
        &self.entries
    }

    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    pub fn is_active(&self, id: &str) -> bool {
        self.active.as_deref() == Some(id)
    }

    /// Mark `id` active and ask the host to scroll to it.
    ///
    /// Ids that are not in the list are ignored. The entry becomes active even
    /// if the host fails to scroll; the failure is returned to the caller.
    pub fn scroll_to(&mut self, id: &str, scroller: &mut dyn Scroller) -> Result<bool, ScrollError> {
        if !self.entries.iter().any(|e| e.id == id) {
            return Ok(false);
        }
        self.active = Some(id.to_string());
        scroller.scroll_into_view(id)?;
        Ok(true)
    }
}
