//! Integration tests that run complete fixture files through the engine.

use docml_engine::attrs::HttpMethod;
use docml_engine::ui::{Mark, walk_all};
use docml_engine::{
    DocumentCache, Engine, EngineConfig, MarkupError, PageConfig, Severity, UiNode,
};
use pretty_assertions::assert_eq;

fn fixtures_dir() -> std::path::PathBuf {
    std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("../tests/fixtures")
}

fn read_fixture(name: &str) -> String {
    let path = fixtures_dir().join(name);
    std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture '{}': {}", path.display(), e))
}

#[test]
fn showcase_renders_one_node_per_section() {
    let nodes = docml_engine::render_source(&read_fixture("showcase.docml"));
    assert_eq!(nodes.len(), 5, "got: {nodes:#?}");
    assert!(nodes.iter().all(|n| matches!(n, UiNode::Section { .. })));
}

#[test]
fn showcase_navigation() {
    let nav = docml_engine::navigation_for(&read_fixture("showcase.docml"));
    let summary: Vec<(&str, &str, &str)> = nav
        .iter()
        .map(|e| (e.id.as_str(), e.title.as_str(), e.icon.as_str()))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("basics", "Basics", "mouse"),
            ("components", "Components", "layout"),
            ("commands", "Commands & API", "server"),
            ("interactive", "Interactive", "zap"),
            ("data", "Tables & Lists", "hash"),
        ]
    );
}

#[test]
fn showcase_contains_every_widget_kind() {
    let nodes = docml_engine::render_source(&read_fixture("showcase.docml"));
    let all: Vec<&UiNode> = walk_all(&nodes).collect();

    let count = |pred: fn(&UiNode) -> bool| all.iter().filter(|n| pred(n)).count();
    assert_eq!(count(|n| matches!(n, UiNode::Grid { columns: 2, .. })), 1);
    assert_eq!(count(|n| matches!(n, UiNode::Grid { columns: 3, .. })), 1);
    assert_eq!(count(|n| matches!(n, UiNode::Card { .. })), 2);
    assert_eq!(count(|n| matches!(n, UiNode::Command { .. })), 1);
    assert_eq!(count(|n| matches!(n, UiNode::Param { required: true, .. })), 1);
    assert_eq!(count(|n| matches!(n, UiNode::Param { required: false, .. })), 1);
    assert_eq!(count(|n| matches!(n, UiNode::Tabs(_))), 1);
    assert_eq!(count(|n| matches!(n, UiNode::Details { .. })), 1);
    assert_eq!(count(|n| matches!(n, UiNode::Checklist { .. })), 1);
    assert_eq!(count(|n| matches!(n, UiNode::List { ordered: true, .. })), 1);
    assert_eq!(count(|n| matches!(n, UiNode::Mark { mark: Mark::Kbd, .. })), 1);
    assert_eq!(count(|n| matches!(n, UiNode::Divider)), 1);
}

#[test]
fn showcase_api_block_keeps_code_verbatim() {
    let nodes = docml_engine::render_source(&read_fixture("showcase.docml"));
    let api = walk_all(&nodes)
        .find(|n| matches!(n, UiNode::Api { .. }))
        .expect("api block");
    let UiNode::Api { method, label, url, .. } = api else {
        unreachable!()
    };
    assert_eq!(*method, HttpMethod::Post);
    assert_eq!(label.as_deref(), Some("POST"));
    assert_eq!(url.as_deref(), Some("/v1/users/{id}/xp"));

    let code = api
        .walk()
        .find_map(|n| match n {
            UiNode::CodeBlock { lang, code, copy, .. } => Some((lang, code, copy)),
            _ => None,
        })
        .expect("code block inside api");
    assert_eq!(code.0, "json");
    assert!(code.1.contains("\"amount\": 150"));
    assert_eq!(code.2.payload(), code.1);
}

#[test]
fn showcase_tabs_start_on_first_panel() {
    let nodes = docml_engine::render_source(&read_fixture("showcase.docml"));
    let Some(UiNode::Tabs(tabs)) = walk_all(&nodes).find(|n| matches!(n, UiNode::Tabs(_))) else {
        panic!("expected a tab strip");
    };
    let mut tabs = tabs.clone();
    assert_eq!(tabs.titles().collect::<Vec<_>>(), vec!["cargo", "source"]);
    assert_eq!(tabs.active(), 0);
    assert!(tabs.panel().iter().any(|n| n.plain_text().contains("cargo install")));

    assert!(tabs.select(1));
    assert!(tabs.panel().iter().any(|n| n.plain_text().contains("git clone")));
}

#[test]
fn showcase_checklist_items() {
    let nodes = docml_engine::render_source(&read_fixture("showcase.docml"));
    let items = walk_all(&nodes)
        .find_map(|n| match n {
            UiNode::Checklist { items } => Some(items.clone()),
            _ => None,
        })
        .expect("checklist");
    let flat: Vec<(&str, bool)> = items.iter().map(|i| (i.text.as_str(), i.checked)).collect();
    assert_eq!(flat, vec![("Parser", true), ("Renderer", false)]);
}

#[test]
fn showcase_is_clean_under_validation() {
    let doc = docml_engine::parse(&read_fixture("showcase.docml")).expect("fixture parses");
    let diags = doc.validate();
    assert!(diags.is_empty(), "unexpected diagnostics: {diags:#?}");
}

#[test]
fn showcase_html_page() {
    let doc = docml_engine::parse(&read_fixture("showcase.docml")).expect("fixture parses");
    let html = doc.to_html_page(&PageConfig {
        title: Some("Showcase".into()),
        ..PageConfig::default()
    });

    assert!(html.contains("<!DOCTYPE html>"));
    assert!(html.contains("<title>Showcase</title>"));
    assert!(html.contains("<a href=\"#commands\" data-icon=\"server\">Commands &amp; API</a>"));
    assert!(html.contains("<section class=\"docml-section\" id=\"interactive\">"));
    assert!(html.contains("<details class=\"docml-cmd\">"));
    assert!(html.contains("docml-method method-post"));
    // Both tab panels are emitted; the script switches between them.
    assert!(html.contains("cargo install docml-cli"));
    assert!(html.contains("git clone https://example.org/docml.git"));
}

#[test]
fn showcase_json_is_tagged() {
    let nodes = docml_engine::render_source(&read_fixture("showcase.docml"));
    let json = docml_engine::to_json(&nodes).expect("serializes");
    let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");
    assert_eq!(value[0]["node"], "section");
    assert_eq!(value[0]["id"], "basics");
}

#[test]
fn malformed_fixture_renders_error_panel() {
    let nodes = docml_engine::render_source(&read_fixture("malformed.docml"));
    assert_eq!(nodes.len(), 1);
    match &nodes[0] {
        UiNode::ErrorPanel { message, line, .. } => {
            assert_eq!(*line, 2);
            assert!(message.contains("Unclosed tag <p>"), "{message}");
        }
        other => panic!("expected an error panel, got {other:?}"),
    }
}

#[test]
fn malformed_fixture_has_no_navigation() {
    let nav = docml_engine::navigation_for(&read_fixture("malformed.docml"));
    assert!(nav.is_empty());
}

#[test]
fn malformed_fixture_validates_to_a_single_error() {
    let diags = docml_engine::validate::validate_source(
        &read_fixture("malformed.docml"),
        &docml_engine::ParseOptions::default(),
    );
    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0].severity, Severity::Error);
}

#[test]
fn malformed_error_is_memoized() {
    let cache = DocumentCache::unbounded();
    let source = read_fixture("malformed.docml");
    let first = cache.parse(&source).unwrap_err();
    let second = cache.parse(&source).unwrap_err();
    assert!(matches!(first, MarkupError::UnclosedTag { .. }));
    assert_eq!(first, second);
    assert_eq!(cache.stats().misses, 1);
    assert_eq!(cache.stats().hits, 1);
}

#[test]
fn engine_results_are_deterministic() {
    let engine = Engine::new(EngineConfig::default());
    let source = read_fixture("showcase.docml");
    let a = engine.render_source(&source);
    let b = engine.render_source(&source);
    assert_eq!(a, b);
    assert_eq!(engine.cache().len(), 1);

    // A fresh engine produces the same tree as the warmed one.
    assert_eq!(a, Engine::default().render_source(&source));
}

#[test]
fn cached_documents_are_shared() {
    let engine = Engine::default();
    let source = read_fixture("showcase.docml");
    let a = engine.parse(&source).expect("parses");
    let b = engine.parse(&source).expect("parses");
    assert!(std::sync::Arc::ptr_eq(&a, &b));
}

fn nested_columns(depth: usize) -> String {
    format!("{}x{}", "<col>".repeat(depth), "</col>".repeat(depth))
}

#[test]
fn deepest_accepted_nesting_renders_to_html() {
    let depth = docml_engine::parse::DEFAULT_MAX_DEPTH;
    let doc = docml_engine::parse_document(&nested_columns(depth), &docml_engine::ParseOptions::default())
        .expect("parses at the depth limit");
    let html = doc.to_html();
    assert_eq!(html.matches("<div class=\"docml-col\">").count(), depth);
    assert!(html.contains("<div class=\"docml-col\">x</div>"));
    assert!(html.ends_with("</div>"));
}

#[test]
fn nested_tab_strips_render_every_level() {
    let levels = 60;
    let source = format!(
        "{}inner{}",
        "<tabs><tab title=\"t\">".repeat(levels),
        "</tab><tab title=\"u\">other</tab></tabs>".repeat(levels)
    );
    let html = docml_engine::render_html::to_html(&docml_engine::render_source(&source));
    assert_eq!(html.matches("role=\"tablist\"").count(), levels);
    assert!(html.contains(">inner</div>"));
    assert_eq!(html.matches(">other</div>").count(), levels);
}

#[test]
fn json_carries_every_tab_panel() {
    let nodes = docml_engine::render_source(
        r#"<tabs><tab title="A">alpha</tab><tab title="B">bravo</tab></tabs>"#,
    );
    let json = docml_engine::to_json(&nodes).expect("serializes");
    assert!(json.contains("alpha"));
    assert!(json.contains("bravo"));

    let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");
    assert_eq!(value[0]["node"], "tabs");
    assert_eq!(value[0]["active"], 0);
    assert_eq!(value[0]["panels"].as_array().map(Vec::len), Some(2));
}

#[cfg(feature = "terminal")]
#[test]
fn deepest_accepted_nesting_renders_to_terminal() {
    let depth = docml_engine::parse::DEFAULT_MAX_DEPTH;
    let doc = docml_engine::parse_document(&nested_columns(depth), &docml_engine::ParseOptions::default())
        .expect("parses at the depth limit");
    assert_eq!(doc.to_terminal(), "x");
}

#[cfg(feature = "terminal")]
#[test]
fn showcase_terminal_output() {
    colored::control::set_override(false);
    let doc = docml_engine::parse(&read_fixture("showcase.docml")).expect("fixture parses");
    let out = doc.to_terminal();
    assert!(out.contains("Writing Pages"));
    assert!(out.contains("/ban"));
    assert!(out.contains("POST"));
}
