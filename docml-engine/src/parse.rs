//! Parser adapter: raw DocML source → [`Document`].
//!
//! The source is wrapped in a synthetic `<root>` element and fed to
//! `quick-xml`, whose events are assembled into an owned tree with an explicit
//! stack. Parsing is strict: any well-formedness problem aborts with a
//! [`MarkupError`] and no tree is returned.

use std::sync::Arc;

use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;
use serde::{Deserialize, Serialize};

use crate::error::MarkupError;
use crate::types::{Attrs, Document, Element, Node, Position, ROOT_TAG};

/// Default bound on element nesting below the synthetic root.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Knobs for the underlying parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParseOptions {
    /// Documents nested deeper than this are rejected.
    pub max_depth: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Parse through the process-wide cache.
///
/// Identical source text is parsed once; later calls share the same
/// [`Document`] (or the same error).
pub fn parse(source: &str) -> Result<Arc<Document>, MarkupError> {
    crate::engine().parse(source)
}

/// Parse a source string without consulting any cache.
///
/// Most callers want [`crate::parse`] or [`crate::DocumentCache::parse`],
/// which memoize this by exact source text.
pub fn parse_document(source: &str, options: &ParseOptions) -> Result<Document, MarkupError> {
    TreeBuilder::new(source, options).build()
}

/// An element whose end tag has not been seen yet.
struct OpenElement {
    element: Element,
    /// Tag name exactly as written, for end-tag matching.
    raw_name: String,
    at: Position,
}

struct TreeBuilder<'a> {
    source: &'a str,
    wrapped: String,
    prefix_len: usize,
    max_depth: usize,
}

impl<'a> TreeBuilder<'a> {
    fn new(source: &'a str, options: &ParseOptions) -> Self {
        let prefix = format!("<{ROOT_TAG}>");
        Self {
            source,
            wrapped: format!("{prefix}{source}</{ROOT_TAG}>"),
            prefix_len: prefix.len(),
            max_depth: options.max_depth,
        }
    }

    /// Map an offset in the wrapped text back onto the author's source.
    fn locate(&self, wrapped_offset: usize) -> Position {
        Position::locate(self.source, wrapped_offset.saturating_sub(self.prefix_len))
    }

    fn build(self) -> Result<Document, MarkupError> {
        let mut reader = Reader::from_str(&self.wrapped);
        let config = reader.config_mut();
        config.trim_text(false);
        config.check_end_names = false;
        config.expand_empty_elements = false;

        let mut stack: Vec<OpenElement> = Vec::new();
        let mut finished: Option<Element> = None;

        loop {
            let event_offset = reader.buffer_position() as usize;
            let event = match reader.read_event() {
                Ok(event) => event,
                Err(err) => {
                    return Err(MarkupError::Syntax {
                        message: err.to_string(),
                        at: self.locate(reader.error_position() as usize),
                    });
                }
            };
            let at = self.locate(event_offset);

            if finished.is_some() {
                match event {
                    Event::Eof => break,
                    Event::Text(ref e) if e.iter().all(u8::is_ascii_whitespace) => continue,
                    Event::Comment(_) => continue,
                    _ => return Err(MarkupError::TrailingContent { at }),
                }
            }

            match event {
                Event::Start(e) => {
                    let element = self.open(&e, at)?;
                    // The synthetic root sits at depth 0.
                    if stack.len() > self.max_depth {
                        return Err(MarkupError::TooDeep {
                            limit: self.max_depth,
                            at,
                        });
                    }
                    stack.push(OpenElement {
                        raw_name: String::from_utf8_lossy(e.name().as_ref()).into_owned(),
                        element,
                        at,
                    });
                }
                Event::Empty(e) => {
                    let element = self.open(&e, at)?;
                    if stack.len() > self.max_depth {
                        return Err(MarkupError::TooDeep {
                            limit: self.max_depth,
                            at,
                        });
                    }
                    attach(&mut stack, Node::Element(element), at)?;
                }
                Event::End(e) => {
                    let found = String::from_utf8_lossy(e.name().as_ref()).into_owned();
                    let Some(open) = stack.pop() else {
                        return Err(MarkupError::Syntax {
                            message: format!("closing tag </{found}> has no matching opening tag"),
                            at,
                        });
                    };
                    if open.raw_name != found {
                        // Closing an outer element while this one is still open
                        // means this one was never closed.
                        if stack.iter().any(|o| o.raw_name == found) {
                            return Err(MarkupError::UnclosedTag {
                                name: open.element.name,
                                at: open.at,
                            });
                        }
                        return Err(MarkupError::MismatchedTag {
                            expected: open.raw_name,
                            found,
                            at,
                        });
                    }
                    if stack.is_empty() {
                        finished = Some(open.element);
                    } else {
                        attach(&mut stack, Node::Element(open.element), at)?;
                    }
                }
                Event::Text(e) => {
                    let text = e.unescape().map_err(|err| MarkupError::Entity {
                        message: err.to_string(),
                        at,
                    })?;
                    if !text.is_empty() {
                        attach(&mut stack, Node::text(text.into_owned()), at)?;
                    }
                }
                Event::CData(e) => {
                    let text = String::from_utf8_lossy(&e.into_inner()).into_owned();
                    attach(&mut stack, Node::text(text), at)?;
                }
                Event::Comment(e) => {
                    let text = String::from_utf8_lossy(&e.into_inner()).into_owned();
                    attach(&mut stack, Node::Comment { text }, at)?;
                }
                Event::Decl(_) | Event::PI(_) | Event::DocType(_) => {}
                Event::Eof => break,
            }
        }

        if let Some(open) = stack.pop() {
            return Err(MarkupError::UnclosedTag {
                name: open.element.name,
                at: open.at,
            });
        }

        match finished {
            Some(root) => Ok(Document::from_nodes(root.children)),
            None => Err(MarkupError::Syntax {
                message: "document is empty".into(),
                at: self.locate(0),
            }),
        }
    }

    /// Build an element (without children) from a start or empty tag.
    fn open(&self, start: &BytesStart<'_>, at: Position) -> Result<Element, MarkupError> {
        let raw_name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
        if !is_valid_name(&raw_name) {
            return Err(MarkupError::Syntax {
                message: format!("invalid tag name '{raw_name}' (escape a literal '<' as &lt;)"),
                at,
            });
        }

        let mut attrs = Attrs::new();
        for attr in start.attributes().with_checks(false) {
            let attr = attr.map_err(|err| MarkupError::Syntax {
                message: format!("malformed attribute in <{raw_name}>: {err}"),
                at,
            })?;
            let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
            let value = attr.unescape_value().map_err(|err| MarkupError::Entity {
                message: format!("attribute '{key}': {err}"),
                at,
            })?;
            if attrs.insert(key.clone(), value.into_owned()).is_some() {
                return Err(MarkupError::DuplicateAttribute { name: key, at });
            }
        }

        Ok(Element {
            name: raw_name.to_ascii_lowercase(),
            attrs,
            children: Vec::new(),
        })
    }
}

fn attach(stack: &mut [OpenElement], node: Node, at: Position) -> Result<(), MarkupError> {
    match stack.last_mut() {
        Some(parent) => {
            parent.element.children.push(node);
            Ok(())
        }
        None => Err(MarkupError::TrailingContent { at }),
    }
}

fn is_valid_name(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || matches!(c, '-' | '_' | '.' | ':'))
}
