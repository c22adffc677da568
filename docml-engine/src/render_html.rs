//! HTML renderer for the UI tree.
//!
//! Produces semantic HTML with `docml-*` CSS classes. Every piece of authored
//! text and every attribute value is HTML-escaped. Interaction state maps onto
//! native elements where one exists (`<details>` for commands and
//! disclosures); tab strips emit all panels and a small script switches them.

use std::borrow::Cow;

use crate::attrs::{AttrEnum, VideoKind};
use crate::types::NavEntry;
use crate::ui::{ERROR_PANEL_TITLE, Mark, TablePart, UiNode};
use crate::widgets::TabsBlock;

/// Configuration for full-page HTML rendering.
#[derive(Debug, Clone)]
pub struct PageConfig {
    /// Path of the source document served next to the page.
    pub source_path: String,
    /// Page title. Falls back to the first navigation entry, then "Documentation".
    pub title: Option<String>,
    pub description: Option<String>,
    /// Language code (default: "en").
    pub lang: Option<String>,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            source_path: "index.docml".to_string(),
            title: None,
            description: None,
            lang: None,
        }
    }
}

/// Render a node sequence as an HTML fragment.
///
/// No `<html>`, `<head>` or `<body>` wrapper is added.
pub fn to_html(nodes: &[UiNode]) -> String {
    let mut writer = HtmlWriter::default();
    writer.write(nodes);
    writer.out
}

/// Render a complete page: sidebar built from `nav`, content, embedded CSS
/// and the script that drives tabs and copy buttons.
pub fn to_html_page(nodes: &[UiNode], nav: &[NavEntry], config: &PageConfig) -> String {
    let body = to_html(nodes);
    let lang = config.lang.as_deref().unwrap_or("en");
    let title = config
        .title
        .clone()
        .or_else(|| nav.first().map(|e| e.title.clone()))
        .unwrap_or_else(|| "Documentation".to_string());
    let source_path = escape_html(&config.source_path);

    let mut meta_extra = String::new();
    if let Some(desc) = &config.description {
        meta_extra.push_str(&format!(
            "\n    <meta name=\"description\" content=\"{}\">",
            escape_html(desc)
        ));
    }

    format!(
        r#"<!-- Built with DocML, source: {source_path} -->
<!DOCTYPE html>
<html lang="{lang}">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <meta name="generator" content="DocML">
    <link rel="alternate" type="application/xml" href="{source_path}">
    <title>{title}</title>{meta_extra}
    <style>{css}</style>
</head>
<body>
<div class="docml-layout">
{sidebar}
<article class="docml">
{body}
</article>
</div>
<script>{script}</script>
</body>
</html>"#,
        lang = escape_html(lang),
        title = escape_html(&title),
        css = DOCML_CSS,
        sidebar = render_sidebar(nav),
        script = PAGE_SCRIPT,
    )
}

fn render_sidebar(nav: &[NavEntry]) -> String {
    let mut html = String::from(
        "<nav class=\"docml-sidebar\" role=\"navigation\" aria-label=\"Sections\">\n",
    );
    for (i, entry) in nav.iter().enumerate() {
        let active = if i == 0 { " class=\"active\"" } else { "" };
        html.push_str(&format!(
            "  <a href=\"#{}\"{active} data-icon=\"{}\">{}</a>\n",
            escape_html(&entry.id),
            escape_html(&entry.icon),
            escape_html(&entry.title),
        ));
    }
    html.push_str("</nav>");
    html
}

/// Escape HTML special characters to prevent XSS.
pub(crate) fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn opt_attr(name: &str, value: Option<&String>) -> String {
    match value {
        Some(v) => format!(" {name}=\"{}\"", escape_html(v)),
        None => String::new(),
    }
}

/// Pending output of the writer loop.
enum Work<'a> {
    Node(&'a UiNode),
    /// A node produced while writing, such as an inactive tab panel.
    Owned(UiNode),
    Text(Cow<'static, str>),
}

#[derive(Default)]
struct HtmlWriter {
    out: String,
    /// Tab strips seen so far, for unique element ids.
    tab_strips: usize,
}

impl HtmlWriter {
    /// Depth-first over an explicit stack: each node writes its opening
    /// markup, then its closing markup is queued behind its children.
    fn write<'a>(&mut self, roots: &'a [UiNode]) {
        let mut stack: Vec<Work<'a>> = roots.iter().rev().map(Work::Node).collect();
        while let Some(work) = stack.pop() {
            match work {
                Work::Text(text) => self.out.push_str(&text),
                Work::Node(UiNode::Tabs(tabs)) => {
                    let active = tabs.panel().iter().map(Work::Node).collect();
                    self.tabs(tabs, active, &mut stack);
                }
                Work::Owned(UiNode::Tabs(mut tabs)) => {
                    let active = tabs.take_panel().into_iter().map(Work::Owned).collect();
                    self.tabs(&tabs, active, &mut stack);
                }
                Work::Node(node) => {
                    let close = self.open(node);
                    if !close.is_empty() {
                        stack.push(Work::Text(close));
                    }
                    stack.extend(node.children().iter().rev().map(Work::Node));
                }
                Work::Owned(mut node) => {
                    let close = self.open(&node);
                    if !close.is_empty() {
                        stack.push(Work::Text(close));
                    }
                    stack.extend(node.take_children().into_iter().rev().map(Work::Owned));
                }
            }
        }
    }

    /// Write the opening markup of `node` and return its closing markup.
    /// Children are not touched.
    fn open(&mut self, node: &UiNode) -> Cow<'static, str> {
        match node {
            UiNode::Text { text } => {
                self.out.push_str(&escape_html(text));
                Cow::Borrowed("")
            }

            UiNode::Section { id, .. } => {
                self.out.push_str(&format!(
                    "<section class=\"docml-section\"{}>",
                    opt_attr("id", id.as_ref())
                ));
                Cow::Borrowed("</section>")
            }
            UiNode::Grid { columns, .. } => {
                self.out.push_str(&format!(
                    "<div class=\"docml-grid\" role=\"group\" data-cols=\"{columns}\" style=\"--cols: {columns}\">"
                ));
                Cow::Borrowed("</div>")
            }
            UiNode::Column { .. } => {
                self.out.push_str("<div class=\"docml-col\">");
                Cow::Borrowed("</div>")
            }
            UiNode::Divider => {
                self.out.push_str("<hr class=\"docml-divider\">");
                Cow::Borrowed("")
            }

            UiNode::Heading { level, icon, .. } => {
                self.out.push_str(&format!("<h{level}>"));
                if let Some(icon) = icon {
                    self.out.push_str(&format!(
                        "<span class=\"docml-icon\" data-icon=\"{}\" aria-hidden=\"true\"></span>",
                        icon.as_str()
                    ));
                }
                Cow::Owned(format!("</h{level}>"))
            }
            UiNode::Paragraph { .. } => {
                self.out.push_str("<p>");
                Cow::Borrowed("</p>")
            }
            UiNode::Quote { author, .. } => {
                self.out.push_str("<blockquote class=\"docml-quote\"><p>");
                match author {
                    Some(author) => Cow::Owned(format!(
                        "</p><footer class=\"attribution\">{}</footer></blockquote>",
                        escape_html(author)
                    )),
                    None => Cow::Borrowed("</p></blockquote>"),
                }
            }

            UiNode::Image {
                src,
                alt,
                caption,
                align,
                width,
                shadow,
            } => {
                let shadow = if *shadow { " shadow" } else { "" };
                let caption_html = match caption {
                    Some(c) => format!("<figcaption>{}</figcaption>", escape_html(c)),
                    None => String::new(),
                };
                self.out.push_str(&format!(
                    "<figure class=\"docml-image align-{} width-{}{shadow}\"><img{} alt=\"{}\" loading=\"lazy\">{caption_html}</figure>",
                    align.as_str(),
                    width.as_str(),
                    opt_attr("src", src.as_ref()),
                    escape_html(alt),
                ));
                Cow::Borrowed("")
            }
            UiNode::Video { src, player, title } => {
                let inner = match player {
                    VideoKind::Youtube => format!(
                        "<iframe{} title=\"{}\" allow=\"accelerometer; autoplay; clipboard-write; encrypted-media; gyroscope; picture-in-picture\" allowfullscreen></iframe>",
                        opt_attr("src", src.as_ref()),
                        escape_html(title),
                    ),
                    VideoKind::Native => format!(
                        "<video controls{} title=\"{}\"></video>",
                        opt_attr("src", src.as_ref()),
                        escape_html(title),
                    ),
                };
                self.out.push_str(&format!("<div class=\"docml-video\">{inner}</div>"));
                Cow::Borrowed("")
            }

            UiNode::List { ordered, .. } => {
                if *ordered {
                    self.out.push_str("<ol class=\"docml-list\">");
                    Cow::Borrowed("</ol>")
                } else {
                    self.out.push_str("<ul class=\"docml-list\">");
                    Cow::Borrowed("</ul>")
                }
            }
            UiNode::ListItem { .. } => {
                self.out.push_str("<li>");
                Cow::Borrowed("</li>")
            }
            UiNode::Checklist { items } => {
                self.out.push_str("<ul class=\"docml-checklist\">");
                for item in items {
                    let text = escape_html(&item.text);
                    if item.checked {
                        self.out.push_str(&format!(
                            "<li class=\"checked\"><input type=\"checkbox\" checked disabled> <s>{text}</s></li>"
                        ));
                    } else {
                        self.out.push_str(&format!(
                            "<li><input type=\"checkbox\" disabled> <span>{text}</span></li>"
                        ));
                    }
                }
                self.out.push_str("</ul>");
                Cow::Borrowed("")
            }

            UiNode::Table { part, .. } => {
                let (open, close) = match part {
                    TablePart::Table => ("<div class=\"docml-table\"><table>", "</table></div>"),
                    TablePart::Head => ("<thead>", "</thead>"),
                    TablePart::Body => ("<tbody>", "</tbody>"),
                    TablePart::Row => ("<tr>", "</tr>"),
                    TablePart::HeaderCell => ("<th scope=\"col\">", "</th>"),
                    TablePart::Cell => ("<td>", "</td>"),
                };
                self.out.push_str(open);
                Cow::Borrowed(close)
            }

            UiNode::CodeBlock {
                lang,
                title,
                code,
                copy,
            } => {
                let lang = escape_html(lang);
                self.out.push_str(&format!(
                    "<div class=\"docml-code\"><div class=\"docml-code-header\"><span class=\"lang\">{lang}</span>"
                ));
                if let Some(title) = title {
                    self.out
                        .push_str(&format!("<span class=\"title\">{}</span>", escape_html(title)));
                }
                self.out.push_str(&copy_button(copy.payload()));
                self.out.push_str(&format!(
                    "</div><pre aria-label=\"{lang} code\"><code class=\"language-{lang}\">{}</code></pre></div>",
                    escape_html(code)
                ));
                Cow::Borrowed("")
            }
            UiNode::Command {
                name,
                desc,
                tag,
                state,
                ..
            } => {
                let open = if state.is_open() { " open" } else { "" };
                self.out.push_str(&format!("<details class=\"docml-cmd\"{open}><summary>"));
                if let Some(name) = name {
                    self.out
                        .push_str(&format!("<code class=\"name\">{}</code>", escape_html(name)));
                }
                if let Some(tag) = tag {
                    self.out.push_str(&format!("<span class=\"tag\">{}</span>", escape_html(tag)));
                }
                if let Some(desc) = desc {
                    self.out.push_str(&format!("<span class=\"desc\">{}</span>", escape_html(desc)));
                }
                self.out.push_str("</summary><div class=\"docml-cmd-body\">");
                Cow::Borrowed("</div></details>")
            }
            UiNode::Usage { copy, .. } => {
                self.out.push_str("<div class=\"docml-usage\"><span class=\"body\">");
                Cow::Owned(format!("</span>{}</div>", copy_button(copy.payload())))
            }
            UiNode::Api {
                method, label, url, ..
            } => {
                self.out.push_str(&format!(
                    "<div class=\"docml-api\"><div class=\"docml-api-head\"><span class=\"docml-method method-{}\">{}</span>",
                    method.as_str().to_ascii_lowercase(),
                    label.as_deref().map(escape_html).unwrap_or_default(),
                ));
                if let Some(url) = url {
                    self.out.push_str(&format!("<code>{}</code>", escape_html(url)));
                }
                self.out.push_str("</div><div class=\"docml-api-body\">");
                Cow::Borrowed("</div></div>")
            }

            // Written by `tabs`, which needs the work stack.
            UiNode::Tabs(_) => Cow::Borrowed(""),
            UiNode::Panel { title, .. } => {
                self.out.push_str(&format!(
                    "<div class=\"docml-tab-panel\"{}>",
                    opt_attr("title", title.as_ref())
                ));
                Cow::Borrowed("</div>")
            }
            UiNode::Details { summary, state, .. } => {
                let open = if state.is_open() { " open" } else { "" };
                self.out.push_str(&format!(
                    "<details class=\"docml-details\"{open}><summary>{}</summary><div class=\"docml-details-body\">",
                    summary.as_deref().map(escape_html).unwrap_or_default()
                ));
                Cow::Borrowed("</div></details>")
            }

            UiNode::Alert { level, .. } => {
                let role = if level.as_str() == "danger" { "alert" } else { "note" };
                self.out.push_str(&format!(
                    "<div class=\"docml-alert docml-alert-{}\" role=\"{role}\">",
                    level.as_str()
                ));
                Cow::Borrowed("</div>")
            }
            UiNode::Card { title, href, .. } => {
                self.out.push_str(&format!(
                    "<a class=\"docml-card\"{} target=\"_blank\" rel=\"noreferrer\"><span class=\"title\">{}</span><div class=\"body\">",
                    opt_attr("href", href.as_ref()),
                    title.as_deref().map(escape_html).unwrap_or_default(),
                ));
                Cow::Borrowed("</div></a>")
            }
            UiNode::Step { num, title, .. } => {
                self.out.push_str(&format!(
                    "<div class=\"docml-step\"><span class=\"num\">{}</span><div class=\"content\"><h4>{}</h4><div class=\"body\">",
                    num.as_deref().map(escape_html).unwrap_or_default(),
                    title.as_deref().map(escape_html).unwrap_or_default(),
                ));
                Cow::Borrowed("</div></div></div>")
            }

            UiNode::Mark { mark, .. } => {
                let (open, close) = match mark {
                    Mark::Bold => ("<strong>", "</strong>"),
                    Mark::Italic => ("<em>", "</em>"),
                    Mark::Underline => ("<u>", "</u>"),
                    Mark::Kbd => ("<kbd>", "</kbd>"),
                    Mark::Code => ("<code>", "</code>"),
                };
                self.out.push_str(open);
                Cow::Borrowed(close)
            }
            UiNode::Link { href, .. } => {
                self.out.push_str(&format!(
                    "<a class=\"docml-link\"{}>",
                    opt_attr("href", href.as_ref())
                ));
                Cow::Borrowed("</a>")
            }
            UiNode::Badge { color, .. } => {
                self.out.push_str(&format!(
                    "<span class=\"docml-badge badge-{}\">",
                    color.as_str()
                ));
                Cow::Borrowed("</span>")
            }
            UiNode::Tooltip { text, .. } => {
                self.out.push_str(&format!(
                    "<span class=\"docml-tooltip\" tabindex=\"0\"{}>",
                    opt_attr("data-tip", text.as_ref())
                ));
                match text {
                    Some(text) => Cow::Owned(format!(
                        "<span class=\"tip\" role=\"tooltip\">{}</span></span>",
                        escape_html(text)
                    )),
                    None => Cow::Borrowed("</span>"),
                }
            }
            UiNode::Param {
                name,
                type_name,
                required,
                ..
            } => {
                self.out.push_str(&format!(
                    "<div class=\"docml-param\"><span class=\"name\">{}</span>",
                    name.as_deref().map(escape_html).unwrap_or_default()
                ));
                if let Some(type_name) = type_name {
                    self.out
                        .push_str(&format!("<span class=\"type\">{}</span>", escape_html(type_name)));
                }
                if *required {
                    self.out.push_str("<span class=\"required\">required</span>");
                }
                self.out.push_str("<span class=\"desc\">");
                Cow::Borrowed("</span></div>")
            }

            UiNode::ErrorPanel {
                message,
                line,
                column,
            } => {
                self.out.push_str(&format!(
                    "<div class=\"docml-error\" role=\"alert\" data-line=\"{line}\" data-column=\"{column}\"><strong>{ERROR_PANEL_TITLE}</strong><p>{}</p></div>",
                    escape_html(message)
                ));
                Cow::Borrowed("")
            }
        }
    }

    /// Tablist pattern: one button per tab, every panel written, only the
    /// active one visible. The panels are queued on `stack`.
    fn tabs<'a>(&mut self, tabs: &TabsBlock, active_panel: Vec<Work<'a>>, stack: &mut Vec<Work<'a>>) {
        let strip = self.tab_strips;
        self.tab_strips += 1;
        let active = tabs.active();

        self.out.push_str("<div class=\"docml-tabs\"><nav role=\"tablist\">");
        for (i, title) in tabs.titles().enumerate() {
            let selected = i == active;
            self.out.push_str(&format!(
                "<button class=\"tab-btn{}\" role=\"tab\" aria-selected=\"{selected}\" aria-controls=\"docml-panel-{strip}-{i}\" id=\"docml-tab-{strip}-{i}\" tabindex=\"{}\">{}</button>",
                if selected { " active" } else { "" },
                if selected { "0" } else { "-1" },
                escape_html(title),
            ));
        }
        self.out.push_str("</nav>");

        stack.push(Work::Text(Cow::Borrowed("</div>")));
        let mut active_panel = Some(active_panel);
        for i in (0..tabs.len()).rev() {
            let selected = i == active;
            stack.push(Work::Text(Cow::Borrowed("</div>")));
            if selected {
                stack.extend(active_panel.take().unwrap_or_default().into_iter().rev());
            } else {
                stack.extend(tabs.render_panel(i).into_iter().rev().map(Work::Owned));
            }
            stack.push(Work::Text(Cow::Owned(format!(
                "<div class=\"tab-panel{}\" role=\"tabpanel\" id=\"docml-panel-{strip}-{i}\" aria-labelledby=\"docml-tab-{strip}-{i}\" tabindex=\"0\"{}>",
                if selected { " active" } else { "" },
                if selected { "" } else { " hidden" },
            ))));
        }
    }
}

fn copy_button(payload: &str) -> String {
    format!(
        "<button class=\"docml-copy\" type=\"button\" aria-label=\"Copy to clipboard\" data-copy=\"{}\">Copy</button>",
        escape_html(payload)
    )
}

/// Tab switching, copy feedback and active sidebar entry.
const PAGE_SCRIPT: &str = r#"
document.querySelectorAll('.docml-tabs').forEach(t=>{t.querySelectorAll('[role="tab"]').forEach(b=>{b.onclick=()=>{t.querySelectorAll('[role="tab"]').forEach(e=>{e.classList.remove('active');e.setAttribute('aria-selected','false');e.tabIndex=-1});b.classList.add('active');b.setAttribute('aria-selected','true');b.tabIndex=0;t.querySelectorAll('[role="tabpanel"]').forEach(p=>{p.classList.remove('active');p.hidden=true});var panel=document.getElementById(b.getAttribute('aria-controls'));if(panel){panel.classList.add('active');panel.hidden=false}}})});
document.querySelectorAll('.docml-copy').forEach(b=>{b.onclick=()=>{b.classList.add('copied');b.textContent='Copied';setTimeout(()=>{b.classList.remove('copied');b.textContent='Copy'},2000);if(navigator.clipboard){navigator.clipboard.writeText(b.dataset.copy).catch(e=>console.warn('clipboard write failed',e))}}});
document.querySelectorAll('.docml-sidebar a').forEach(a=>{a.onclick=ev=>{var el=document.getElementById(a.getAttribute('href').slice(1));if(!el)return;ev.preventDefault();document.querySelectorAll('.docml-sidebar a').forEach(x=>x.classList.remove('active'));a.classList.add('active');el.scrollIntoView({behavior:'smooth'})}});
"#;

/// Embedded dark theme for standalone pages.
const DOCML_CSS: &str = r##"
:root {
    --bg: #0a0a0c;
    --bg-card: #121216;
    --bg-hover: #1a1a20;
    --border: #2a2a32;
    --border-subtle: #1c1c22;
    --text: #e8e8ee;
    --text-dim: #9a9aa8;
    --text-muted: #5e5e6e;
    --accent: #f97316;
    --blue: #60a5fa;
    --green: #4ade80;
    --red: #f87171;
    --yellow: #facc15;
}

*, *::before, *::after { box-sizing: border-box; margin: 0; padding: 0; }
body { background: var(--bg); color: var(--text); font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, sans-serif; -webkit-font-smoothing: antialiased; }

/* Layout */
.docml-layout { display: flex; gap: 2rem; max-width: 72rem; margin: 0 auto; padding: 2rem 1.5rem 4rem; }
.docml-sidebar { position: sticky; top: 2rem; align-self: flex-start; display: flex; flex-direction: column; gap: 0.25rem; min-width: 12rem; }
.docml-sidebar a { color: var(--text-dim); text-decoration: none; font-size: 0.875rem; padding: 0.375rem 0.75rem; border-radius: 6px; border-left: 2px solid transparent; }
.docml-sidebar a:hover { color: var(--text); background: var(--bg-hover); }
.docml-sidebar a.active { color: var(--accent); border-left-color: var(--accent); background: rgba(249,115,22,0.05); }
.docml { flex: 1; min-width: 0; line-height: 1.7; }
.docml-section { scroll-margin-top: 2rem; margin-bottom: 4rem; }
.docml-grid { display: grid; grid-template-columns: repeat(var(--cols), minmax(0, 1fr)); gap: 1.5rem; margin: 1.5rem 0; }
.docml-col { display: flex; flex-direction: column; gap: 1rem; }
.docml-divider { border: none; border-top: 1px solid var(--border-subtle); margin: 3rem 0; }

/* Typography */
.docml h1 { font-size: 2.5rem; font-weight: 800; margin-bottom: 1.5rem; letter-spacing: -0.025em; }
.docml h2 { font-size: 1.5rem; font-weight: 700; margin: 2.5rem 0 1.5rem; padding-bottom: 1rem; border-bottom: 1px solid var(--border-subtle); display: flex; align-items: center; gap: 0.75rem; }
.docml h3 { font-size: 1.25rem; font-weight: 700; margin: 1.5rem 0 0.75rem; border-left: 3px solid var(--accent); padding-left: 0.5rem; }
.docml h4 { font-size: 1rem; font-weight: 700; margin-bottom: 0.25rem; }
.docml p { color: var(--text-dim); margin-bottom: 1rem; }
.docml strong { font-weight: 700; color: var(--text); }
.docml em { color: var(--text-dim); }
.docml u { text-decoration-color: rgba(249,115,22,0.5); text-underline-offset: 4px; }
.docml kbd { background: rgba(255,255,255,0.1); border: 1px solid rgba(255,255,255,0.2); border-radius: 4px; padding: 0.1rem 0.4rem; font-size: 0.7rem; font-family: monospace; font-weight: 700; }
.docml code { font-family: "SF Mono", "Fira Code", monospace; font-size: 0.85em; background: #1a1a1e; border: 1px solid var(--border); border-radius: 4px; padding: 0.1em 0.4em; color: #fdba74; }
.docml-icon::before { content: "#"; color: var(--accent); }
.docml-quote { border-left: 2px solid var(--accent); padding: 0.25rem 1rem; margin: 1.5rem 0; font-style: italic; color: var(--text-dim); background: rgba(255,255,255,0.02); border-radius: 0 8px 8px 0; }
.docml-quote .attribution { margin-top: 0.5rem; font-size: 0.75rem; font-style: normal; font-weight: 700; color: var(--text-muted); }
.docml-quote .attribution::before { content: "\2014  "; }

/* Media */
.docml-image { margin: 2rem 0; }
.docml-image img { width: 100%; height: auto; border-radius: 12px; border: 1px solid var(--border); }
.docml-image.shadow img { box-shadow: 0 25px 50px rgba(0,0,0,0.5); }
.docml-image.align-left { margin-right: auto; }
.docml-image.align-center { margin-left: auto; margin-right: auto; }
.docml-image.align-right { margin-left: auto; }
.docml-image.width-sm { max-width: 24rem; }
.docml-image.width-md { max-width: 28rem; }
.docml-image.width-lg { max-width: 42rem; }
.docml-image figcaption { margin-top: 0.5rem; text-align: center; font-size: 0.75rem; color: var(--text-muted); }
.docml-video { margin: 2rem 0; aspect-ratio: 16 / 9; border-radius: 12px; overflow: hidden; border: 1px solid var(--border); background: #000; }
.docml-video iframe, .docml-video video { width: 100%; height: 100%; border: 0; }

/* Lists */
.docml-list { margin: 1rem 0 1rem 1.25rem; color: var(--text-dim); }
.docml-list li { margin: 0.5rem 0; }
.docml-checklist { list-style: none; margin: 1rem 0; }
.docml-checklist li { display: flex; gap: 0.75rem; align-items: flex-start; color: var(--text-dim); margin: 0.5rem 0; }
.docml-checklist input[type="checkbox"] { accent-color: var(--accent); margin-top: 0.35rem; }
.docml-checklist li.checked s { color: var(--text-muted); }

/* Tables */
.docml-table { margin: 1.5rem 0; overflow-x: auto; border: 1px solid var(--border); border-radius: 8px; }
.docml-table table { width: 100%; border-collapse: collapse; font-size: 0.875rem; color: var(--text-dim); }
.docml-table thead { background: rgba(255,255,255,0.05); color: var(--text); text-transform: uppercase; }
.docml-table th { text-align: left; padding: 0.75rem 1rem; font-weight: 600; white-space: nowrap; }
.docml-table td { padding: 0.75rem 1rem; vertical-align: top; border-top: 1px solid var(--border-subtle); }
.docml-table tr:hover td { background: rgba(255,255,255,0.02); }

/* Code, commands, usage */
.docml-code { margin: 1.5rem 0; border: 1px solid var(--border); border-radius: 8px; background: #050505; overflow: hidden; }
.docml-code-header { display: flex; align-items: center; gap: 0.75rem; padding: 0.5rem 1rem; border-bottom: 1px solid var(--border-subtle); background: rgba(255,255,255,0.03); }
.docml-code-header .lang { font-size: 0.75rem; font-weight: 700; text-transform: uppercase; color: var(--text-dim); }
.docml-code-header .title { font-size: 0.75rem; color: var(--text-muted); border-left: 1px solid var(--border); padding-left: 0.75rem; }
.docml-code pre { padding: 1rem; overflow-x: auto; font-size: 0.85rem; line-height: 1.6; }
.docml-code pre code { background: none; border: none; padding: 0; color: #d1d5db; }
.docml-copy { margin-left: auto; background: none; border: 1px solid var(--border); border-radius: 6px; color: var(--text-dim); font-size: 0.7rem; padding: 0.2rem 0.5rem; cursor: pointer; }
.docml-copy:hover { color: var(--text); background: rgba(255,255,255,0.1); }
.docml-copy.copied { color: var(--green); border-color: var(--green); }
.docml-cmd { margin-bottom: 1rem; border: 1px solid var(--border-subtle); border-radius: 12px; }
.docml-cmd[open] { background: rgba(255,255,255,0.02); border-color: var(--border); }
.docml-cmd summary { display: flex; align-items: center; gap: 0.75rem; padding: 1rem; cursor: pointer; list-style: none; }
.docml-cmd .name { color: var(--accent); font-weight: 700; background: rgba(249,115,22,0.1); border-color: rgba(249,115,22,0.2); }
.docml-cmd .tag { font-size: 0.625rem; font-weight: 700; text-transform: uppercase; letter-spacing: 0.05em; color: var(--text-muted); border: 1px solid var(--border); border-radius: 4px; padding: 0.1rem 0.4rem; }
.docml-cmd .desc { font-size: 0.875rem; color: var(--text); }
.docml-cmd-body { padding: 0.5rem 1rem 1rem; border-top: 1px solid var(--border-subtle); color: var(--text-dim); }
.docml-usage { display: flex; align-items: flex-start; gap: 0.75rem; margin: 0.75rem 0; padding: 0.75rem; border: 1px solid var(--border-subtle); border-radius: 8px; background: rgba(0,0,0,0.4); font-family: monospace; font-size: 0.875rem; white-space: pre-wrap; }
.docml-usage .body { flex: 1; }

/* API */
.docml-api { margin: 1.5rem 0; border: 1px solid var(--border-subtle); border-radius: 12px; background: rgba(255,255,255,0.02); overflow: hidden; }
.docml-api-head { display: flex; align-items: center; gap: 0.75rem; padding: 0.75rem; border-bottom: 1px solid var(--border-subtle); background: rgba(0,0,0,0.2); }
.docml-method { font-family: monospace; font-weight: 700; font-size: 0.625rem; padding: 0.1rem 0.5rem; border-radius: 4px; }
.docml-method.method-get { color: var(--blue); background: rgba(96,165,250,0.1); }
.docml-method.method-post { color: var(--green); background: rgba(74,222,128,0.1); }
.docml-method.method-delete { color: var(--red); background: rgba(248,113,113,0.1); }
.docml-method.method-put { color: var(--yellow); background: rgba(250,204,21,0.1); }
.docml-api-body { padding: 1rem; font-size: 0.875rem; color: var(--text-dim); }
.docml-param { display: flex; flex-wrap: wrap; align-items: baseline; gap: 0.5rem; padding: 0.5rem 0; border-bottom: 1px solid rgba(255,255,255,0.03); font-size: 0.875rem; }
.docml-param .name { font-family: monospace; font-weight: 700; color: var(--text); }
.docml-param .type { font-size: 0.625rem; font-weight: 700; text-transform: uppercase; color: var(--text-muted); border: 1px solid var(--border); border-radius: 4px; padding: 0 0.25rem; }
.docml-param .required { font-size: 0.625rem; color: var(--red); }
.docml-param .desc { flex-basis: 100%; color: var(--text-dim); }

/* Tabs and disclosures */
.docml-tabs { margin: 1.5rem 0; border: 1px solid var(--border); border-radius: 12px; overflow: hidden; }
.docml-tabs nav { display: flex; overflow-x: auto; background: rgba(255,255,255,0.02); border-bottom: 1px solid var(--border-subtle); }
.docml-tabs nav button { padding: 0.625rem 1rem; background: none; border: none; border-bottom: 2px solid transparent; color: var(--text-dim); font-size: 0.875rem; cursor: pointer; white-space: nowrap; }
.docml-tabs nav button:hover { color: var(--text); background: rgba(255,255,255,0.05); }
.docml-tabs nav button.active { color: var(--accent); border-bottom-color: var(--accent); background: rgba(249,115,22,0.05); }
.docml-tabs .tab-panel { padding: 1rem; background: #0c0c0e; display: none; }
.docml-tabs .tab-panel.active { display: block; }
.docml-details { margin: 1rem 0; border: 1px solid var(--border-subtle); border-radius: 8px; }
.docml-details summary { padding: 0.75rem; cursor: pointer; font-weight: 500; color: var(--text); }
.docml-details-body { padding: 0.75rem 1rem 1rem; border-top: 1px solid var(--border-subtle); font-size: 0.875rem; color: var(--text-dim); }

/* Callouts */
.docml-alert { display: flex; gap: 0.75rem; margin: 1.5rem 0; padding: 1rem; border: 1px solid; border-radius: 8px; font-size: 0.875rem; }
.docml-alert-info { border-color: rgba(96,165,250,0.2); background: rgba(96,165,250,0.05); }
.docml-alert-warn { border-color: rgba(249,115,22,0.2); background: rgba(249,115,22,0.05); }
.docml-alert-danger { border-color: rgba(248,113,113,0.2); background: rgba(248,113,113,0.05); }
.docml-alert-success { border-color: rgba(74,222,128,0.2); background: rgba(74,222,128,0.05); }
.docml-card { display: block; margin: 1rem 0; padding: 1rem; border: 1px solid var(--border); border-radius: 12px; background: rgba(255,255,255,0.02); text-decoration: none; color: inherit; }
.docml-card:hover { border-color: rgba(249,115,22,0.3); background: rgba(255,255,255,0.05); }
.docml-card .title { display: block; font-weight: 700; margin-bottom: 0.5rem; }
.docml-card .body { font-size: 0.875rem; color: var(--text-muted); }
.docml-step { display: flex; gap: 1rem; margin-bottom: 2rem; }
.docml-step .num { flex-shrink: 0; width: 2rem; height: 2rem; border-radius: 50%; display: flex; align-items: center; justify-content: center; font-weight: 700; font-size: 0.875rem; color: var(--accent); border: 1px solid rgba(249,115,22,0.3); background: #0f0f12; }
.docml-step .body { font-size: 0.875rem; color: var(--text-dim); }

/* Inline */
.docml-link { color: var(--accent); text-decoration: none; }
.docml-link:hover { text-decoration: underline; }
.docml-badge { display: inline-flex; margin-left: 0.5rem; padding: 0.1rem 0.5rem; border-radius: 4px; font-size: 0.625rem; font-weight: 700; text-transform: uppercase; letter-spacing: 0.05em; vertical-align: middle; }
.docml-badge.badge-red { color: var(--red); background: rgba(248,113,113,0.1); }
.docml-badge.badge-green { color: var(--green); background: rgba(74,222,128,0.1); }
.docml-badge.badge-orange { color: var(--accent); background: rgba(249,115,22,0.1); }
.docml-badge.badge-blue { color: var(--blue); background: rgba(96,165,250,0.1); }
.docml-tooltip { position: relative; border-bottom: 1px dotted var(--text-muted); cursor: help; }
.docml-tooltip .tip { position: absolute; bottom: 100%; left: 50%; transform: translateX(-50%); margin-bottom: 0.5rem; padding: 0.25rem 0.5rem; font-size: 0.75rem; white-space: nowrap; background: #000; border: 1px solid var(--border); border-radius: 4px; opacity: 0; pointer-events: none; }
.docml-tooltip:hover .tip, .docml-tooltip:focus .tip { opacity: 1; }

/* Parse failures */
.docml-error { margin: 2rem 0; padding: 1rem; border: 1px solid rgba(248,113,113,0.3); border-radius: 8px; background: rgba(248,113,113,0.05); color: var(--red); }
.docml-error p { margin-top: 0.5rem; font-family: monospace; font-size: 0.8rem; color: var(--text-dim); }

@media (max-width: 768px) {
    .docml-layout { flex-direction: column; }
    .docml-sidebar { position: static; flex-direction: row; flex-wrap: wrap; }
    .docml-grid { grid-template-columns: 1fr; }
}
"##;
