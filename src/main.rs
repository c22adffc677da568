use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use docml_engine::validate::validate_source;
use docml_engine::{Diagnostic, Engine, Severity, UiNode};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

mod build;
mod config;

#[derive(Parser)]
#[command(name = "docml", version, about = "Render and check DocML documentation pages")]
struct Cli {
    /// Suppress non-essential output
    #[arg(long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum RenderFormat {
    Terminal,
    Html,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a DocML file
    Render {
        /// Path to the .docml file
        file: PathBuf,

        /// Output format
        #[arg(long, value_enum, default_value = "terminal")]
        format: RenderFormat,
    },

    /// Build a static HTML page from a DocML file
    Build {
        /// Path to the .docml file
        file: PathBuf,

        /// Output directory (default: build.outDir from docml.json, else "dist")
        #[arg(long)]
        out: Option<PathBuf>,

        /// Page title (default: build.title, else the first section title)
        #[arg(long)]
        title: Option<String>,

        /// Rebuild whenever the file changes
        #[arg(long)]
        watch: bool,
    },

    /// List the sections of a DocML file
    Nav {
        /// Path to the .docml file
        file: PathBuf,

        /// Print the entries as JSON
        #[arg(long)]
        json: bool,
    },

    /// Validate DocML files or directories
    Validate {
        /// Files or directories to check
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::from_default_env()
        .filter_level(if cli.quiet {
            log::LevelFilter::Error
        } else {
            log::LevelFilter::Warn
        })
        .init();

    match cli.command {
        Commands::Render { file, format } => {
            let config = config::load_config(Some(file.as_path()))?;
            let engine = Engine::new(config.engine_config());
            handle_render(&engine, &file, format)?;
        }
        Commands::Build {
            file,
            out,
            title,
            watch,
        } => {
            let config = config::load_config(Some(file.as_path()))?;
            let engine = Engine::new(config.engine_config());
            let opts = build::BuildOpts {
                out_dir: out.unwrap_or_else(|| PathBuf::from(&config.build.out_dir)),
                title: title.or(config.build.title),
                lang: config.build.lang,
                quiet: cli.quiet,
                file,
            };
            build::handle_build(&engine, &opts)?;
            if watch {
                build::watch_and_rebuild(&engine, &opts)?;
            }
        }
        Commands::Nav { file, json } => {
            let config = config::load_config(Some(file.as_path()))?;
            let engine = Engine::new(config.engine_config());
            handle_nav(&engine, &file, json)?;
        }
        Commands::Validate { paths } => {
            handle_validate(&paths)?;
        }
    }

    Ok(())
}

fn read_source(file: &Path) -> Result<String> {
    std::fs::read_to_string(file).with_context(|| format!("Failed to read '{}'", file.display()))
}

fn handle_render(engine: &Engine, file: &Path, format: RenderFormat) -> Result<()> {
    let content = read_source(file)?;

    let (nodes, failed) = match engine.try_render(&content) {
        Ok(nodes) => (nodes, false),
        Err(err) => {
            eprintln!("{}: {}", file.display(), err);
            (vec![UiNode::error_panel(&err)], true)
        }
    };

    let output = match format {
        RenderFormat::Terminal => docml_engine::render_term::to_terminal(&nodes),
        RenderFormat::Html => docml_engine::render_html::to_html(&nodes),
        RenderFormat::Json => docml_engine::to_json(&nodes)?,
    };
    println!("{output}");

    if failed {
        std::process::exit(1);
    }
    Ok(())
}

fn handle_nav(engine: &Engine, file: &Path, json: bool) -> Result<()> {
    let content = read_source(file)?;
    engine
        .parse(&content)
        .with_context(|| format!("Failed to parse '{}'", file.display()))?;
    let nav = engine.navigation(&content);

    if json {
        println!("{}", serde_json::to_string_pretty(&nav)?);
        return Ok(());
    }

    for entry in &nav {
        println!("{}  {} {}", format!("#{}", entry.id).cyan(), entry.title.bold(), format!("({})", entry.icon).dimmed());
    }
    Ok(())
}

/// Expand directories into the DocML files below them, sorted by name.
fn collect_files(paths: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for path in paths {
        if !path.is_dir() {
            files.push(path.clone());
            continue;
        }
        let config = config::load_config(Some(path.as_path()))?;
        for entry in WalkDir::new(path).sort_by_file_name() {
            let entry = entry?;
            if entry.file_type().is_file() && config.accepts(entry.path()) {
                files.push(entry.into_path());
            }
        }
    }
    Ok(files)
}

fn handle_validate(paths: &[PathBuf]) -> Result<()> {
    let mut has_errors = false;

    for file in collect_files(paths)? {
        let content = read_source(&file)?;
        let config = config::load_config(Some(file.as_path()))?;
        let diagnostics = validate_source(&content, &config.parse_options());

        if diagnostics.is_empty() {
            println!("{}: {}", file.display(), "OK".green());
            continue;
        }
        for diag in &diagnostics {
            has_errors |= diag.severity == Severity::Error;
            println!("{}", format_diagnostic(&file, diag));
        }
    }

    if has_errors {
        std::process::exit(1);
    }

    Ok(())
}

fn format_diagnostic(file: &Path, diag: &Diagnostic) -> String {
    let severity_str = match diag.severity {
        Severity::Error => format!("{}", "error".red().bold()),
        Severity::Warning => format!("{}", "warning".yellow().bold()),
        Severity::Info => format!("{}", "info".cyan().bold()),
    };

    let line_info = match diag.at {
        Some(at) => format!("{}:{}:{}", file.display(), at.line, at.column),
        None => file.display().to_string(),
    };

    let code_str = match &diag.code {
        Some(c) => format!("[{}] ", c),
        None => String::new(),
    };

    format!("{line_info}: {severity_str}: {code_str}{}", diag.message)
}
