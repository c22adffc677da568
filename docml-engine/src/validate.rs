//! Lint pass over parsed DocML documents.
//!
//! The renderer silently absorbs anything odd (unknown tags, out-of-range
//! attribute values, stray children). This pass reports those same cases as
//! non-fatal `Diagnostic` items so authors can find them.

use std::collections::HashSet;

use crate::attrs::{
    AlertKind, Align, AttrEnum, BadgeColor, HttpMethod, Icon, ImageWidth, ListKind,
    parse_grid_columns,
};
use crate::error::{Diagnostic, Severity};
use crate::parse::{ParseOptions, parse_document};
use crate::tags::Tag;
use crate::types::{Document, Element};

/// Validate a parsed document and return any diagnostics.
///
/// Never modifies the document.
pub fn validate(doc: &Document) -> Vec<Diagnostic> {
    let mut diagnostics = Vec::new();
    let mut section_ids = HashSet::new();

    for el in doc.elements() {
        match Tag::from_name(&el.name) {
            Some(tag) => validate_element(tag, el, &mut section_ids, &mut diagnostics),
            None => diagnostics.push(Diagnostic::new(
                Severity::Info,
                "V001",
                format!("Unknown tag <{}> is rendered as its children", el.name),
            )),
        }
    }

    diagnostics
}

/// Parse and validate in one step. A parse failure is the only diagnostic.
pub fn validate_source(source: &str, options: &ParseOptions) -> Vec<Diagnostic> {
    match parse_document(source, options) {
        Ok(doc) => validate(&doc),
        Err(err) => vec![Diagnostic::from(&err)],
    }
}

fn validate_element(
    tag: Tag,
    el: &Element,
    section_ids: &mut HashSet<String>,
    diagnostics: &mut Vec<Diagnostic>,
) {
    match tag {
        Tag::Section => match el.attr("id") {
            None | Some("") => diagnostics.push(Diagnostic::new(
                Severity::Warning,
                "V004",
                "Section has no id and cannot be linked from navigation",
            )),
            Some(id) => {
                if !section_ids.insert(id.to_string()) {
                    diagnostics.push(Diagnostic::new(
                        Severity::Warning,
                        "V005",
                        format!("Duplicate section id '{id}'"),
                    ));
                }
            }
        },

        Tag::Grid => {
            if let Some(cols) = el.attr("cols") {
                if parse_grid_columns(Some(cols)).is_none() {
                    diagnostics.push(Diagnostic::new(
                        Severity::Warning,
                        "V003",
                        format!("Grid cols '{cols}' is not a positive integer; using 2"),
                    ));
                }
            }
        }

        Tag::H2 => check_enum::<Icon>(el, "icon", diagnostics),

        Tag::Img => {
            check_enum::<Align>(el, "align", diagnostics);
            check_enum::<ImageWidth>(el, "width", diagnostics);
            require(el, "src", diagnostics);
        }
        Tag::Video => require(el, "src", diagnostics),
        Tag::Link | Tag::Card => require(el, "href", diagnostics),

        Tag::List => {
            check_enum::<ListKind>(el, "type", diagnostics);
            if ListKind::from_attr(el.attr("type")) == ListKind::Check {
                for child in el.child_elements() {
                    if Tag::from_name(&child.name) != Some(Tag::Li) {
                        diagnostics.push(Diagnostic::new(
                            Severity::Warning,
                            "V006",
                            format!("Checklist child <{}> is not <li> and is skipped", child.name),
                        ));
                    }
                }
            }
        }

        Tag::Api => check_enum::<HttpMethod>(el, "method", diagnostics),
        Tag::Alert => check_enum::<AlertKind>(el, "type", diagnostics),
        Tag::Badge => check_enum::<BadgeColor>(el, "color", diagnostics),

        Tag::Param => {
            if let Some(req) = el.attr("req") {
                let near_miss = req != "true"
                    && req != "false"
                    && (req.eq_ignore_ascii_case("true") || req.eq_ignore_ascii_case("false"));
                if near_miss {
                    diagnostics.push(Diagnostic::new(
                        Severity::Warning,
                        "V007",
                        format!("Param req=\"{req}\" is case-sensitive; only \"true\" marks it required"),
                    ));
                }
            }
        }

        Tag::Tabs => {
            for (i, tab) in el.child_elements().enumerate() {
                if tab.attr("title").is_none_or(str::is_empty) {
                    diagnostics.push(Diagnostic::new(
                        Severity::Info,
                        "V008",
                        format!("Tab {} has no title; it is shown as \"Tab {}\"", i + 1, i + 1),
                    ));
                }
            }
        }

        // Everything else has no attribute contract worth checking.
        _ => {}
    }
}

fn check_enum<T: AttrEnum>(el: &Element, key: &str, diagnostics: &mut Vec<Diagnostic>) {
    let Some(value) = el.attr(key) else {
        return;
    };
    if T::parse(value).is_none() {
        diagnostics.push(Diagnostic::new(
            Severity::Warning,
            "V002",
            format!(
                "<{}> {key}=\"{value}\" is not one of {}; using \"{}\"",
                el.name,
                T::KEYWORDS.join(", "),
                T::default().as_str(),
            ),
        ));
    }
}

fn require(el: &Element, key: &str, diagnostics: &mut Vec<Diagnostic>) {
    if el.attr(key).is_none_or(str::is_empty) {
        diagnostics.push(Diagnostic::new(
            Severity::Warning,
            "V009",
            format!("<{}> is missing required attribute: {key}", el.name),
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn codes(src: &str) -> Vec<String> {
        validate_source(src, &ParseOptions::default())
            .into_iter()
            .filter_map(|d| d.code)
            .collect()
    }

    #[test]
    fn validate_clean_doc() {
        let diags = validate_source(
            r#"<section id="a" title="A"><h2 icon="zap">Hi</h2><p>Text <badge color="red">x</badge></p></section>"#,
            &ParseOptions::default(),
        );
        assert!(diags.is_empty(), "Clean doc should have no diagnostics, got: {diags:?}");
    }

    #[test]
    fn validate_unknown_tag_is_info() {
        let diags = validate_source("<marquee>hi</marquee>", &ParseOptions::default());
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].severity, Severity::Info);
        assert_eq!(diags[0].code.as_deref(), Some("V001"));
    }

    #[test]
    fn validate_out_of_enum_values() {
        let diags = validate_source(r#"<badge color="purple">x</badge>"#, &ParseOptions::default());
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].code.as_deref(), Some("V002"));
        assert!(diags[0].message.contains("\"orange\""));
    }

    #[test]
    fn validate_grid_cols() {
        assert_eq!(codes(r#"<grid cols="banana"/>"#), vec!["V003"]);
        assert!(codes(r#"<grid cols="3"/>"#).is_empty());
        assert!(codes("<grid/>").is_empty());
    }

    #[test]
    fn validate_section_ids() {
        assert_eq!(
            codes(r#"<section/><section id="a"/><section id="a"/>"#),
            vec!["V004", "V005"]
        );
    }

    #[test]
    fn validate_checklist_children() {
        assert_eq!(
            codes(r#"<list type="check"><li>a</li><p>b</p></list>"#),
            vec!["V006"]
        );
    }

    #[test]
    fn validate_req_case() {
        assert_eq!(codes(r#"<param name="a" req="TRUE"/>"#), vec!["V007"]);
        assert!(codes(r#"<param name="a" req="true"/>"#).is_empty());
        assert!(codes(r#"<param name="a" req="yes"/>"#).is_empty());
    }

    #[test]
    fn validate_untitled_tabs() {
        let diags = validate_source(
            r#"<tabs><tab title="A">a</tab><tab>b</tab></tabs>"#,
            &ParseOptions::default(),
        );
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].severity, Severity::Info);
        assert!(diags[0].message.contains("Tab 2"));

        assert_eq!(codes(r#"<tabs><tab title="">a</tab></tabs>"#), vec!["V008"]);
    }

    #[test]
    fn validate_missing_src_and_href() {
        assert_eq!(
            codes(r#"<img/><video src=""/><link>x</link><card title="c" href="/ok"/>"#),
            vec!["V009", "V009", "V009"]
        );
    }

    #[test]
    fn validate_parse_error_is_an_error() {
        let diags = validate_source("<p>", &ParseOptions::default());
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].severity, Severity::Error);
        assert_eq!(diags[0].code.as_deref(), Some("E001"));
        assert_eq!(diags[0].at.map(|at| at.line), Some(1));
    }
}
