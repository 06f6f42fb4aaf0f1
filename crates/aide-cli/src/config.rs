//! Configuration loading from TOML files.
//!
//! Lookup order:
//! 1. `$AIDE_CONFIG` environment variable
//! 2. `~/.config/aide/config.toml`
//! 3. Built-in defaults (everything is optional)

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::BaseDirs;
use serde::Deserialize;
use tracing::warn;

use aide_assistant::{Assistant, CommandKind, DEFAULT_NAME, DEFAULT_SEARCH_URL};

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub store: StoreConfig,
    pub assistant: AssistantConfig,
    pub search: SearchConfig,
    /// Extra command names, e.g. `todo = "add_task"`.
    pub aliases: BTreeMap<String, String>,
}

/// State file settings.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// JSON state file. Default: platform-specific data dir.
    pub path: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct AssistantConfig {
    pub name: String,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Prefix the `+`-joined query is appended to.
    pub url: String,
}

// --- Defaults ---

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_NAME.into(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_SEARCH_URL.into(),
        }
    }
}

impl Config {
    /// Register every alias whose target is a built-in command. Unknown
    /// targets are skipped with a warning.
    pub fn apply_aliases(&self, assistant: &mut Assistant) -> usize {
        let mut applied = 0;
        for (alias, target) in &self.aliases {
            match target.parse::<CommandKind>() {
                Ok(kind) => {
                    let description = format!("Alias for {kind}");
                    assistant.register(alias, kind, &description);
                    applied += 1;
                }
                Err(e) => warn!("ignoring alias {alias}: {e}"),
            }
        }
        applied
    }

    /// Load from `$AIDE_CONFIG` or `~/.config/aide/config.toml`.
    pub fn load() -> Result<Self> {
        Self::load_from(config_path().as_deref())
    }

    /// A missing file (or no path at all) yields defaults; an unreadable or
    /// malformed file is an error.
    pub fn load_from(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path.filter(|p| p.exists()) else {
            return Ok(Self::default());
        };
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("parsing {}", path.display()))
    }
}

fn config_path() -> Option<PathBuf> {
    if let Some(p) = std::env::var_os("AIDE_CONFIG") {
        return Some(PathBuf::from(p));
    }
    BaseDirs::new().map(|dirs| dirs.home_dir().join(".config").join("aide").join("config.toml"))
}

/// One-line summary of where config comes from, for `aide config`.
pub fn describe_config_path() -> String {
    match config_path() {
        Some(p) if p.exists() => format!("{} (loaded)", p.display()),
        Some(p) => format!("{} (not found, using defaults)", p.display()),
        None => "no config path resolved (using defaults)".into(),
    }
}
