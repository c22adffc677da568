//! WASM bindings for `docml-engine`.
//!
//! Exposes the DocML renderer to JavaScript via wasm-bindgen. All entry points
//! share the engine's process-wide parse cache, so re-rendering unchanged
//! source text on every frame is cheap.

use docml_engine::render_html::{to_html, to_html_page};
use docml_engine::{Diagnostic, PageConfig};
use wasm_bindgen::prelude::*;

/// Render DocML source as an HTML fragment.
///
/// The output uses `docml-*` CSS classes. A markup error renders as a single
/// error panel instead of failing.
#[wasm_bindgen]
pub fn render_html(input: &str) -> String {
    to_html(&docml_engine::render_source(input))
}

/// Render DocML source as a complete styled HTML page with a section sidebar.
#[wasm_bindgen]
pub fn render_html_page(input: &str, title: Option<String>) -> String {
    let nodes = docml_engine::render_source(input);
    let nav = docml_engine::navigation_for(input);
    let config = PageConfig {
        title,
        ..Default::default()
    };
    to_html_page(&nodes, &nav, &config)
}

/// Render DocML source as the JSON UI tree (one object per node, tagged by `node`).
#[wasm_bindgen]
pub fn render_json(input: &str) -> String {
    docml_engine::to_json(&docml_engine::render_source(input)).unwrap_or_else(|_| "[]".to_string())
}

/// Section entries `[{ id, title, icon }]` as JSON. Empty for malformed input.
#[wasm_bindgen]
pub fn navigation(input: &str) -> String {
    serde_json::to_string(&docml_engine::navigation_for(input)).unwrap_or_else(|_| "[]".to_string())
}

/// Section entries as a plain JS array of objects.
#[wasm_bindgen]
pub fn navigation_value(input: &str) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(&docml_engine::navigation_for(input)).map_err(JsValue::from)
}

/// Validate DocML source and return diagnostics as JSON.
///
/// Returns a JSON array of `{ severity, message, code, at }` objects. A parse
/// error is reported as a single `E001` error. An empty array means the
/// document is clean.
#[wasm_bindgen]
pub fn validate(input: &str) -> String {
    serde_json::to_string(&diagnostics(input)).unwrap_or_else(|_| "[]".to_string())
}

fn diagnostics(input: &str) -> Vec<Diagnostic> {
    match docml_engine::parse(input) {
        Ok(doc) => doc.validate(),
        Err(err) => vec![Diagnostic::from(&err)],
    }
}
