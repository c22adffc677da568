//! `docml build`: compile a DocML file into a static HTML page.
//!
//! The page is written to `<out>/index.html` next to a copy of the source
//! document. An unchanged page (same SHA-256) is not rewritten, so file
//! watchers downstream only fire on real changes.

use anyhow::{Context, Result};
use colored::Colorize;
use docml_engine::render_html::to_html_page;
use docml_engine::{Engine, PageConfig};
use notify::{EventKind, RecursiveMode, Watcher};
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::{Duration, Instant};

/// Options for a single build.
pub struct BuildOpts {
    pub file: PathBuf,
    pub out_dir: PathBuf,
    pub title: Option<String>,
    pub lang: String,
    pub quiet: bool,
}

/// What a build did to `index.html`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildOutcome {
    Written,
    Unchanged,
}

/// Read the source file and build it.
pub fn handle_build(engine: &Engine, opts: &BuildOpts) -> Result<BuildOutcome> {
    let content = std::fs::read_to_string(&opts.file)
        .with_context(|| format!("Failed to read '{}'", opts.file.display()))?;
    build_source(engine, opts, &content)
}

fn build_source(engine: &Engine, opts: &BuildOpts, content: &str) -> Result<BuildOutcome> {
    let nodes = engine
        .try_render(content)
        .with_context(|| format!("Failed to parse '{}'", opts.file.display()))?;
    let nav = engine.navigation(content);

    let source_filename = opts
        .file
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| "index.docml".to_string());

    let config = PageConfig {
        source_path: source_filename.clone(),
        title: opts.title.clone(),
        description: None,
        lang: Some(opts.lang.clone()),
    };
    let html = to_html_page(&nodes, &nav, &config);

    std::fs::create_dir_all(&opts.out_dir)
        .with_context(|| format!("Failed to create '{}'", opts.out_dir.display()))?;

    let index_path = opts.out_dir.join("index.html");
    let outcome = if file_hash(&index_path).as_deref() == Some(content_hash(html.as_bytes()).as_str()) {
        log::debug!("{} is up to date", index_path.display());
        BuildOutcome::Unchanged
    } else {
        std::fs::write(&index_path, &html)
            .with_context(|| format!("Failed to write '{}'", index_path.display()))?;
        BuildOutcome::Written
    };

    // Copy the source alongside the built output (discovery mechanism).
    let source_dest = opts.out_dir.join(&source_filename);
    if source_dest != opts.file {
        std::fs::write(&source_dest, content)
            .with_context(|| format!("Failed to copy source to '{}'", source_dest.display()))?;
    }

    if !opts.quiet {
        match outcome {
            BuildOutcome::Written => println!("{} {}", "Built".green().bold(), index_path.display()),
            BuildOutcome::Unchanged => {
                println!("{} {}", "Unchanged".dimmed(), index_path.display())
            }
        }
        println!("  {} {}", "source:".dimmed(), source_dest.display());
        println!("  {} {}", "sections:".dimmed(), nav.len());
    }

    Ok(outcome)
}

fn content_hash(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}

/// Hash of an existing file, `None` if it cannot be read.
fn file_hash(path: &Path) -> Option<String> {
    std::fs::read(path).ok().map(|bytes| content_hash(&bytes))
}

/// Watch the source file for changes and rebuild on each save.
///
/// Debounces rapid events (e.g. editors that write in stages) with a 200ms window.
/// The cache entry of the previous revision is dropped on every rebuild.
/// Ctrl+C exits cleanly.
pub fn watch_and_rebuild(engine: &Engine, opts: &BuildOpts) -> Result<()> {
    let file_path = std::fs::canonicalize(&opts.file)
        .with_context(|| format!("Cannot resolve path '{}'", opts.file.display()))?;

    let watch_dir = file_path
        .parent()
        .with_context(|| format!("Cannot determine parent directory of '{}'", opts.file.display()))?;

    println!(
        "{} {} for changes (Ctrl+C to stop)",
        "Watching".cyan().bold(),
        opts.file.display()
    );

    let (tx, rx) = mpsc::channel();
    let mut watcher = notify::recommended_watcher(move |res: notify::Result<notify::Event>| {
        if let Ok(event) = res {
            let _ = tx.send(event);
        }
    })?;

    watcher.watch(watch_dir, RecursiveMode::NonRecursive)?;

    let mut previous = std::fs::read_to_string(&opts.file).ok();
    let mut last_rebuild = Instant::now();
    let debounce = Duration::from_millis(200);

    loop {
        match rx.recv_timeout(Duration::from_secs(1)) {
            Ok(event) => {
                let is_write = matches!(event.kind, EventKind::Modify(_) | EventKind::Create(_));
                let affects_our_file = event
                    .paths
                    .iter()
                    .any(|p| p.canonicalize().ok().as_ref() == Some(&file_path));

                if is_write && affects_our_file && last_rebuild.elapsed() > debounce {
                    // Small delay to let the editor finish writing
                    std::thread::sleep(Duration::from_millis(50));

                    let content = match std::fs::read_to_string(&opts.file) {
                        Ok(content) => content,
                        Err(e) => {
                            eprintln!("{} {}", "Read error:".red().bold(), e);
                            continue;
                        }
                    };
                    if let Some(old) = previous.as_deref().filter(|old| *old != content) {
                        engine.cache().invalidate(old);
                    }

                    match build_source(engine, opts, &content) {
                        Ok(_) => last_rebuild = Instant::now(),
                        Err(e) => eprintln!("{} {:#}", "Build error:".red().bold(), e),
                    }
                    previous = Some(content);
                }
            }
            Err(mpsc::RecvTimeoutError::Timeout) => {}
            Err(mpsc::RecvTimeoutError::Disconnected) => break,
        }
    }

    Ok(())
}
