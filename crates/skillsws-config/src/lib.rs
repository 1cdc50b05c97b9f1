use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable overriding the catalog root.
pub const CATALOG_ENV: &str = "SKILLS_WS_CATALOG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON5 parse error: {0}")]
    Json5(#[from] json5::Error),
    #[error("Config directory not found")]
    NoDirFound,
}

/// Top-level skills-ws configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SkillsWsConfig {
    /// Catalog root override.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog_dir: Option<PathBuf>,
    /// Explicit install target. Replaces the candidate search entirely.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<PathBuf>,
    /// Force colors on or off. Auto-detected when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<bool>,
    /// Print the banner before each command.
    #[serde(default = "default_true")]
    pub banner: bool,
}

fn default_true() -> bool {
    true
}

impl Default for SkillsWsConfig {
    fn default() -> Self {
        Self {
            catalog_dir: None,
            target: None,
            color: None,
            banner: true,
        }
    }
}

impl SkillsWsConfig {
    /// Apply environment overrides using `lookup` to read variables.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = lookup(CATALOG_ENV).filter(|v| !v.trim().is_empty()) {
            tracing::debug!(catalog = %dir, "catalog dir overridden from environment");
            self.catalog_dir = Some(PathBuf::from(dir));
        }
        if lookup("NO_COLOR").is_some_and(|v| !v.is_empty()) {
            self.color = Some(false);
        }
    }
}

/// Resolve the user's home directory.
///
/// Falls back to a literal `~` when no home directory can be determined,
/// so derived paths stay relative instead of failing outright.
pub fn home_dir() -> PathBuf {
    dirs::home_dir().unwrap_or_else(|| PathBuf::from("~"))
}

/// Resolve the skills-ws config directory (~/.skills-ws/).
pub fn config_dir() -> Result<PathBuf, ConfigError> {
    dirs::home_dir()
        .map(|h| h.join(".skills-ws"))
        .ok_or(ConfigError::NoDirFound)
}

/// Resolve the config file path (~/.skills-ws/config.json5).
pub fn config_file_path() -> Result<PathBuf, ConfigError> {
    Ok(config_dir()?.join("config.json5"))
}

/// Load configuration from the default path with environment overrides applied.
pub fn load_config() -> Result<SkillsWsConfig, ConfigError> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    let path = config_file_path()?;
    let mut config = load_config_from(&path)?;
    config.apply_env(|key| std::env::var(key).ok());
    Ok(config)
}

/// Load configuration from a specific path, falling back to defaults if not found.
pub fn load_config_from(path: &Path) -> Result<SkillsWsConfig, ConfigError> {
    if !path.exists() {
        tracing::debug!("Config file not found at {}, using defaults", path.display());
        return Ok(SkillsWsConfig::default());
    }

    let content = std::fs::read_to_string(path)?;
    let config: SkillsWsConfig = json5::from_str(&content)?;
    Ok(config)
}

/// Pick the catalog root.
///
/// Precedence: explicit override, configured `catalog_dir`, the `skills`
/// directory beside the executable's parent directory, then `<cwd>/skills`.
pub fn resolve_catalog_dir(
    config: &SkillsWsConfig,
    override_dir: Option<&Path>,
    exe: Option<&Path>,
    cwd: &Path,
) -> PathBuf {
    if let Some(dir) = override_dir {
        return dir.to_path_buf();
    }
    if let Some(dir) = &config.catalog_dir {
        return dir.clone();
    }

    let bundled = exe
        .and_then(Path::parent)
        .and_then(Path::parent)
        .map(|root| root.join("skills"));
    match bundled {
        Some(dir) if dir.is_dir() => dir,
        _ => cwd.join("skills"),
    }
}
