use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::theme::{apply_overrides, Theme, ThemeOverrides};

pub const DEFAULT_CONTEXT_LINES: usize = 3;

/// Settings handed to the app at construction. Nothing reads configuration globally.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub theme: Theme,
    pub context_lines: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            context_lines: DEFAULT_CONTEXT_LINES,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    theme: Option<String>,
    #[serde(default)]
    colors: Option<ThemeOverrides>,
    #[serde(default)]
    context_lines: Option<usize>,
}

fn config_path() -> PathBuf {
    let mut path = dirs_home().unwrap_or_else(|| PathBuf::from("."));
    path.push(".config");
    path.push("pairdiff");
    path.push("config.toml");
    path
}

fn dirs_home() -> Option<PathBuf> {
    std::env::var_os("HOME").map(PathBuf::from)
}

/// Load config from `explicit`, or from `~/.config/pairdiff/config.toml`.
///
/// A missing default file means defaults; a missing explicit file is an error.
/// A malformed file is logged and replaced by defaults.
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    let contents = match explicit {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Could not read config file {}", path.display()))?,
        None => match std::fs::read_to_string(config_path()) {
            Ok(c) => c,
            Err(_) => return Ok(Config::default()),
        },
    };

    match parse_config(&contents) {
        Ok(config) => Ok(config),
        Err(e) => {
            tracing::warn!("Ignoring malformed config: {e:#}");
            Ok(Config::default())
        }
    }
}

pub fn parse_config(contents: &str) -> Result<Config> {
    let file: ConfigFile = toml::from_str(contents).context("Invalid config TOML")?;

    let theme_name = file.theme.as_deref().unwrap_or("one-dark");
    let mut theme = Theme::from_name(theme_name);
    if let Some(ref overrides) = file.colors {
        apply_overrides(&mut theme, overrides);
    }

    Ok(Config {
        theme,
        context_lines: file.context_lines.unwrap_or(DEFAULT_CONTEXT_LINES),
    })
}
