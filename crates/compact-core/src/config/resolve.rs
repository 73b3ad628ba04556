use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use super::types::CompactConfig;

/// Project-local config, relative to the working directory.
pub const LOCAL_CONFIG: &str = ".compact/config.toml";

/// User config, relative to the home directory.
pub const GLOBAL_CONFIG: &str = ".config/compact/config.toml";

/// Where the effective configuration came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    Explicit(PathBuf),
    Local(PathBuf),
    Global(PathBuf),
    Default,
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigSource::Explicit(path) => write!(f, "explicit: {}", path.display()),
            ConfigSource::Local(path) => write!(f, "local: {}", path.display()),
            ConfigSource::Global(path) => write!(f, "global: {}", path.display()),
            ConfigSource::Default => f.write_str("built-in defaults"),
        }
    }
}

/// Resolve the configuration for the current process.
///
/// Search order, first hit wins:
/// 1. `explicit` — must exist
/// 2. `.compact/config.toml` in the working directory
/// 3. `~/.config/compact/config.toml`
/// 4. Built-in defaults
pub fn resolve_config(explicit: Option<&Path>) -> Result<(CompactConfig, ConfigSource)> {
    let cwd = std::env::current_dir().context("reading current directory")?;
    resolve_config_in(explicit, &cwd, home_dir().as_deref())
}

/// [`resolve_config`] with the search roots spelled out.
pub fn resolve_config_in(
    explicit: Option<&Path>,
    cwd: &Path,
    home: Option<&Path>,
) -> Result<(CompactConfig, ConfigSource)> {
    if let Some(path) = explicit {
        let config = parse_toml_file(path)?;
        tracing::debug!(path = %path.display(), "loaded explicit config");
        return Ok((config, ConfigSource::Explicit(path.to_path_buf())));
    }

    let local = cwd.join(LOCAL_CONFIG);
    if local.is_file() {
        let config = parse_toml_file(&local)?;
        tracing::debug!(path = %local.display(), "loaded local config");
        return Ok((config, ConfigSource::Local(local)));
    }

    if let Some(home) = home {
        let global = home.join(GLOBAL_CONFIG);
        if global.is_file() {
            let config = parse_toml_file(&global)?;
            tracing::debug!(path = %global.display(), "loaded global config");
            return Ok((config, ConfigSource::Global(global)));
        }
    }

    tracing::debug!("no config file found, using defaults");
    Ok((CompactConfig::default(), ConfigSource::Default))
}

fn parse_toml_file(path: &Path) -> Result<CompactConfig> {
    let contents =
        std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
    let config: CompactConfig =
        toml::from_str(&contents).with_context(|| format!("parsing {}", path.display()))?;
    Ok(config)
}

fn home_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        std::env::var("USERPROFILE").ok().map(PathBuf::from)
    }
    #[cfg(not(target_os = "windows"))]
    {
        std::env::var("HOME").ok().map(PathBuf::from)
    }
}
