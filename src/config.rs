use anyhow::{Context, Result};
use docml_engine::{EngineConfig, ParseOptions, parse::DEFAULT_MAX_DEPTH};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Name of the project configuration file.
pub const CONFIG_FILE: &str = "docml.json";

/// Top-level docml.json schema.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocmlConfig {
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,

    /// Distinct sources kept by the parse cache; `null` keeps everything.
    #[serde(default)]
    pub cache_capacity: Option<usize>,

    /// File extensions picked up when validating a directory.
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    #[serde(default)]
    pub build: BuildConfig,
}

impl Default for DocmlConfig {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
            cache_capacity: None,
            extensions: default_extensions(),
            build: BuildConfig::default(),
        }
    }
}

fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}
fn default_extensions() -> Vec<String> {
    vec!["docml".to_string(), "xml".to_string()]
}

/// `docml build` settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildConfig {
    #[serde(default = "default_out_dir")]
    pub out_dir: String,

    #[serde(default)]
    pub title: Option<String>,

    #[serde(default = "default_lang")]
    pub lang: String,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            out_dir: default_out_dir(),
            title: None,
            lang: default_lang(),
        }
    }
}

fn default_out_dir() -> String {
    "dist".to_string()
}
fn default_lang() -> String {
    "en".to_string()
}

impl DocmlConfig {
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            parse: self.parse_options(),
            cache_capacity: self.cache_capacity,
        }
    }

    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions {
            max_depth: self.max_depth,
        }
    }

    /// Whether `path` has one of the configured extensions (case-insensitive).
    pub fn accepts(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
    }
}

/// Locate docml.json: next to `input` first, then in the working directory.
pub fn find_config(input: Option<&Path>) -> Option<PathBuf> {
    let mut candidates = Vec::new();
    if let Some(input) = input {
        let dir = if input.is_dir() {
            Some(input)
        } else {
            input.parent()
        };
        if let Some(dir) = dir {
            // `parent()` of a bare file name is the empty path.
            let dir = if dir.as_os_str().is_empty() {
                Path::new(".")
            } else {
                dir
            };
            candidates.push(dir.join(CONFIG_FILE));
        }
    }
    if let Ok(cwd) = std::env::current_dir() {
        candidates.push(cwd.join(CONFIG_FILE));
    }
    candidates.into_iter().find(|path| path.is_file())
}

/// Load the config that applies to `input`, or defaults if there is none.
pub fn load_config(input: Option<&Path>) -> Result<DocmlConfig> {
    match find_config(input) {
        Some(path) => load_config_file(&path),
        None => Ok(DocmlConfig::default()),
    }
}

pub fn load_config_file(path: &Path) -> Result<DocmlConfig> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let config: DocmlConfig = serde_json::from_str(&raw)
        .with_context(|| format!("Failed to parse {}", path.display()))?;
    anyhow::ensure!(
        config.cache_capacity != Some(0),
        "Invalid {}: cacheCapacity must be at least 1 (null keeps every document)",
        path.display()
    );
    log::debug!("loaded config from {}", path.display());
    Ok(config)
}
