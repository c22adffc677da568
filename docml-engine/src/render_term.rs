//! ANSI terminal renderer.
//!
//! Produces colored terminal output using the `colored` crate. The output is a
//! static snapshot: collapsed commands and disclosures are printed expanded,
//! and every tab of a tab strip is printed under its title.
//!
//! Each node's text is built from its children's text, so the tree is folded
//! bottom-up over an explicit stack rather than by recursion.

use colored::Colorize;

use crate::attrs::{AlertKind, BadgeColor, HttpMethod, Icon, VideoKind};
use crate::ui::{ERROR_PANEL_TITLE, Mark, TablePart, UiNode};

/// Render a node sequence as ANSI-colored terminal text.
pub fn to_terminal(nodes: &[UiNode]) -> String {
    let blocks: Vec<String> = fold(nodes.to_vec())
        .into_iter()
        .map(|piece| piece.text)
        .filter(|b| !b.trim().is_empty())
        .collect();
    blocks.join("\n\n")
}

/// The rendered text of one node plus what its parent needs to know about it.
struct Piece {
    text: String,
    inline: bool,
    /// Whitespace-only text.
    blank: bool,
    table: bool,
    /// Body of a list item without its bullet.
    item: Option<String>,
}

enum Step {
    Enter(UiNode),
    /// A node whose children were moved out, and how many there were.
    Exit(UiNode, usize),
}

fn fold(roots: Vec<UiNode>) -> Vec<Piece> {
    let mut steps: Vec<Step> = roots.into_iter().rev().map(Step::Enter).collect();
    let mut done: Vec<Piece> = Vec::new();
    while let Some(step) = steps.pop() {
        match step {
            Step::Enter(mut node) => {
                let kids = take_kids(&mut node);
                steps.push(Step::Exit(node, kids.len()));
                steps.extend(kids.into_iter().rev().map(Step::Enter));
            }
            Step::Exit(node, count) => {
                let kids = done.split_off(done.len().saturating_sub(count));
                done.push(Piece {
                    item: matches!(node, UiNode::ListItem { .. }).then(|| blocks(&kids)),
                    text: render_node(&node, &kids),
                    inline: is_inline(&node),
                    blank: matches!(&node, UiNode::Text { text } if text.trim().is_empty()),
                    table: matches!(node, UiNode::Table { .. }),
                });
            }
        }
    }
    done
}

/// Children to fold. A tab strip contributes one untitled panel per tab.
fn take_kids(node: &mut UiNode) -> Vec<UiNode> {
    let UiNode::Tabs(tabs) = node else {
        return node.take_children();
    };
    let mut active = Some(tabs.take_panel());
    let mut panels = Vec::with_capacity(tabs.len());
    for i in 0..tabs.len() {
        let children = if i == tabs.active() {
            active.take().unwrap_or_default()
        } else {
            tabs.render_panel(i)
        };
        panels.push(UiNode::Panel {
            title: None,
            children,
        });
    }
    panels
}

/// Inline content: text and marks on one line.
fn inline(kids: &[Piece]) -> String {
    kids.iter().map(|k| k.text.as_str()).collect()
}

/// Block children, one per line, keeping inline runs joined.
fn blocks(kids: &[Piece]) -> String {
    let mut lines: Vec<String> = Vec::new();
    let mut run = String::new();
    for kid in kids {
        if kid.inline {
            run.push_str(&kid.text);
        } else {
            if !run.trim().is_empty() {
                lines.push(std::mem::take(&mut run));
            }
            run.clear();
            if !kid.text.is_empty() {
                lines.push(kid.text.clone());
            }
        }
    }
    if !run.trim().is_empty() {
        lines.push(run);
    }
    lines.join("\n")
}

fn is_inline(node: &UiNode) -> bool {
    matches!(
        node,
        UiNode::Text { .. }
            | UiNode::Mark { .. }
            | UiNode::Link { .. }
            | UiNode::Badge { .. }
            | UiNode::Tooltip { .. }
    )
}

fn indent(text: &str, prefix: &str) -> String {
    text.lines()
        .map(|line| format!("{prefix}{line}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// `node` has had its children moved out; their text is in `kids`.
fn render_node(node: &UiNode, kids: &[Piece]) -> String {
    match node {
        UiNode::Text { text } => text.clone(),
        UiNode::Mark { mark, .. } => {
            let text = inline(kids);
            match mark {
                Mark::Bold => format!("{}", text.bold()),
                Mark::Italic => format!("{}", text.italic()),
                Mark::Underline => format!("{}", text.underline()),
                Mark::Kbd => format!("{}", format!("[{text}]").bold()),
                Mark::Code => format!("{}", text.yellow()),
            }
        }
        UiNode::Link { href, .. } => {
            let text = inline(kids);
            match href {
                Some(href) => format!("{} {}", text.underline(), format!("<{href}>").dimmed()),
                None => format!("{}", text.underline()),
            }
        }
        UiNode::Badge { color, .. } => {
            let label = format!("[{}]", inline(kids).to_uppercase());
            badge_color(*color, &label)
        }
        UiNode::Tooltip { text, .. } => match text {
            Some(tip) => format!("{} {}", inline(kids), format!("({tip})").dimmed()),
            None => inline(kids),
        },

        UiNode::Section { .. } | UiNode::Column { .. } | UiNode::Grid { .. } => blocks(kids),
        UiNode::Divider => format!("{}", "\u{2500}".repeat(40).dimmed()), // ─

        UiNode::Heading { level, icon, .. } => {
            let icon = icon.map(|i| format!("{} ", icon_glyph(i))).unwrap_or_default();
            let text = format!("{icon}{}", inline(kids));
            match level {
                1 => format!("{}", text.bold().underline()),
                2 => format!("{}", text.bold()),
                _ => format!("{} {}", "\u{258E}".yellow(), text.bold()), // ▎
            }
        }
        UiNode::Paragraph { .. } => blocks(kids),
        UiNode::Quote { author, .. } => {
            let border = "\u{2502}".dimmed(); // │
            let mut lines = vec![format!("{border} {}", format!("\"{}\"", inline(kids)).italic())];
            if let Some(author) = author {
                lines.push(format!("{border} {}", format!("\u{2014} {author}").dimmed()));
            }
            lines.join("\n")
        }
        UiNode::Image {
            src, alt, caption, ..
        } => {
            let mut line = format!("{} {alt}", "[image]".cyan());
            if let Some(src) = src {
                line.push_str(&format!(" {}", format!("<{src}>").dimmed()));
            }
            if let Some(caption) = caption {
                line.push_str(&format!("\n  {}", caption.dimmed()));
            }
            line
        }
        UiNode::Video { src, player, title } => {
            let kind = match player {
                VideoKind::Youtube => "[video: youtube]",
                VideoKind::Native => "[video]",
            };
            match src {
                Some(src) => format!("{} {title} {}", kind.cyan(), format!("<{src}>").dimmed()),
                None => format!("{} {title}", kind.cyan()),
            }
        }

        UiNode::List { ordered, .. } => kids
            .iter()
            .filter(|kid| !kid.blank)
            .enumerate()
            .map(|(i, kid)| {
                let marker = if *ordered {
                    format!("{}.", i + 1)
                } else {
                    "\u{2022}".to_string() // •
                };
                format!("  {marker} {}", kid.item.as_deref().unwrap_or(kid.text.as_str()))
            })
            .collect::<Vec<_>>()
            .join("\n"),
        UiNode::ListItem { .. } => format!("  \u{2022} {}", blocks(kids)),
        UiNode::Checklist { items } => items
            .iter()
            .map(|item| {
                if item.checked {
                    format!("  {} {}", "\u{2713}".green(), item.text.strikethrough().dimmed()) // ✓
                } else {
                    format!("  {} {}", "\u{25CB}".dimmed(), item.text) // ○
                }
            })
            .collect::<Vec<_>>()
            .join("\n"),

        UiNode::Table { part, .. } => render_table_part(*part, kids),

        UiNode::CodeBlock {
            lang, title, code, ..
        } => {
            let title = title
                .as_ref()
                .map(|t| format!(" {}", t.dimmed()))
                .unwrap_or_default();
            let border = format!("{}", "\u{2500}\u{2500}\u{2500}".dimmed()); // ───
            let mut lines = vec![format!("{border} {}{title}", lang.to_uppercase().dimmed())];
            for line in code.trim_matches('\n').lines() {
                lines.push(format!("  {line}"));
            }
            lines.push(border);
            lines.join("\n")
        }
        UiNode::Command { name, desc, tag, .. } => {
            let mut head = format!(
                "{} {}",
                "\u{25B8}".dimmed(), // ▸
                name.as_deref().unwrap_or_default().yellow().bold()
            );
            if let Some(tag) = tag {
                head.push_str(&format!(" {}", format!("[{}]", tag.to_uppercase()).dimmed()));
            }
            if let Some(desc) = desc {
                head.push_str(&format!("  {desc}"));
            }
            let body = blocks(kids);
            if body.is_empty() {
                head
            } else {
                format!("{head}\n{}", indent(&body, "    "))
            }
        }
        UiNode::Usage { .. } => format!("{} {}", "$".dimmed(), blocks(kids)),
        UiNode::Api {
            method, label, url, ..
        } => {
            let label = label.as_deref().unwrap_or_default();
            let mut head = format!(
                "{} {}",
                method_color(*method, label),
                url.as_deref().unwrap_or_default()
            );
            let body = blocks(kids);
            if !body.is_empty() {
                head.push_str(&format!("\n{}", indent(&body, "  ")));
            }
            head
        }

        UiNode::Tabs(tabs) => {
            let mut parts = Vec::new();
            for (i, (title, panel)) in tabs.titles().zip(kids).enumerate() {
                let header = if i == tabs.active() {
                    format!("{}", format!("[{title}]").yellow().bold())
                } else {
                    format!("{}", format!("[{title}]").bold())
                };
                parts.push(format!("{header}\n{}", indent(&panel.text, "  ")));
            }
            parts.join("\n")
        }
        UiNode::Panel { title, .. } => match title {
            Some(title) => format!("{}\n{}", format!("[{title}]").bold(), indent(&blocks(kids), "  ")),
            None => blocks(kids),
        },
        UiNode::Details { summary, .. } => {
            let head = format!(
                "{} {}",
                "\u{25BE}".dimmed(), // ▾
                summary.as_deref().unwrap_or_default().bold()
            );
            format!("{head}\n{}", indent(&blocks(kids), "  "))
        }

        UiNode::Alert { level, .. } => {
            let (color, label) = alert_style(*level);
            let border = apply_color("\u{2502}", color); // │
            let mut lines = vec![format!("{border} {}", apply_color(label, color).bold())];
            for line in blocks(kids).lines() {
                lines.push(format!("{border} {line}"));
            }
            lines.join("\n")
        }
        UiNode::Card { title, href, .. } => {
            let mut head = format!("{}", title.as_deref().unwrap_or_default().bold());
            if let Some(href) = href {
                head.push_str(&format!(" {}", format!("\u{2197} {href}").dimmed())); // ↗
            }
            let body = blocks(kids);
            if body.is_empty() {
                head
            } else {
                format!("{head}\n{}", indent(&body, "  "))
            }
        }
        UiNode::Step { num, title, .. } => {
            let num = format!("({})", num.as_deref().unwrap_or_default());
            let head = format!(
                "{} {}",
                num.yellow().bold(),
                title.as_deref().unwrap_or_default().bold()
            );
            let body = blocks(kids);
            if body.is_empty() {
                head
            } else {
                format!("{head}\n{}", indent(&body, "    "))
            }
        }

        UiNode::Param {
            name,
            type_name,
            required,
            ..
        } => {
            let mut line = format!("  {}", name.as_deref().unwrap_or_default().bold());
            if let Some(type_name) = type_name {
                line.push_str(&format!(" {}", type_name.to_uppercase().dimmed()));
            }
            if *required {
                line.push_str(&format!(" {}", "required".red()));
            }
            let desc = inline(kids);
            if !desc.trim().is_empty() {
                line.push_str(&format!("\n    {desc}"));
            }
            line
        }

        UiNode::ErrorPanel {
            message,
            line,
            column,
        } => format!(
            "{}\n{} {}",
            ERROR_PANEL_TITLE.red().bold(),
            format!("{line}:{column}").dimmed(),
            message
        ),
    }
}

fn render_table_part(part: TablePart, kids: &[Piece]) -> String {
    let parts = || kids.iter().filter(|k| k.table).map(|k| k.text.as_str());
    match part {
        TablePart::Table | TablePart::Head | TablePart::Body => {
            parts().collect::<Vec<_>>().join("\n")
        }
        TablePart::Row => {
            format!("\u{2502} {} \u{2502}", parts().collect::<Vec<_>>().join(" \u{2502} ")) // │
        }
        TablePart::HeaderCell => format!("{}", inline(kids).trim().bold()),
        TablePart::Cell => inline(kids).trim().to_string(),
    }
}

fn alert_style(level: AlertKind) -> (&'static str, &'static str) {
    match level {
        AlertKind::Info => ("blue", "INFO"),
        AlertKind::Warn => ("yellow", "WARNING"),
        AlertKind::Danger => ("red", "DANGER"),
        AlertKind::Success => ("green", "SUCCESS"),
    }
}

fn method_color(method: HttpMethod, label: &str) -> String {
    let label = label.bold();
    match method {
        HttpMethod::Get => format!("{}", label.blue()),
        HttpMethod::Post => format!("{}", label.green()),
        HttpMethod::Put => format!("{}", label.yellow()),
        HttpMethod::Delete => format!("{}", label.red()),
    }
}

fn badge_color(color: BadgeColor, text: &str) -> String {
    apply_color(
        text,
        match color {
            BadgeColor::Red => "red",
            BadgeColor::Green => "green",
            BadgeColor::Orange => "yellow",
            BadgeColor::Blue => "blue",
        },
    )
}

fn icon_glyph(icon: Icon) -> String {
    let glyph = match icon {
        Icon::Globe => "\u{25CE}",  // ◎
        Icon::Server => "\u{25A4}", // ▤
        Icon::Credit => "\u{25AD}", // ▭
        Icon::Layout => "\u{25A6}", // ▦
        Icon::Hash => "#",
        Icon::Zap => "\u{03DF}", // ϟ
        Icon::List => "\u{2630}", // ☰
        Icon::Mouse => "\u{2316}", // ⌖
    };
    format!("{}", glyph.yellow())
}

fn apply_color(text: &str, color: &str) -> String {
    match color {
        "yellow" => format!("{}", text.yellow()),
        "red" => format!("{}", text.red()),
        "blue" => format!("{}", text.blue()),
        "green" => format!("{}", text.green()),
        "cyan" => format!("{}", text.cyan()),
        _ => text.to_string(),
    }
}
