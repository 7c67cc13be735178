//! meritscope configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Top-level meritscope configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeritscopeConfig {
    /// Directory holding the reference data files.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Institution catalog file or directory, relative to `data_dir`.
    #[serde(default = "default_catalog")]
    pub catalog: PathBuf,
    /// Quiz bank file, relative to `data_dir`.
    #[serde(default = "default_quiz_bank")]
    pub quiz_bank: PathBuf,
    /// Alias table file, relative to `data_dir`.
    #[serde(default = "default_aliases")]
    pub aliases: PathBuf,
    /// Entrance-test maximum used when none is given.
    #[serde(default = "default_test_max")]
    pub default_test_max: f64,
    /// Output directory for saved reports.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}
fn default_catalog() -> PathBuf {
    PathBuf::from("catalog.toml")
}
fn default_quiz_bank() -> PathBuf {
    PathBuf::from("quiz.toml")
}
fn default_aliases() -> PathBuf {
    PathBuf::from("aliases.toml")
}
fn default_test_max() -> f64 {
    200.0
}
fn default_output_dir() -> PathBuf {
    PathBuf::from("./meritscope-results")
}

impl Default for MeritscopeConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            catalog: default_catalog(),
            quiz_bank: default_quiz_bank(),
            aliases: default_aliases(),
            default_test_max: default_test_max(),
            output_dir: default_output_dir(),
        }
    }
}

impl MeritscopeConfig {
    pub fn catalog_path(&self) -> PathBuf {
        self.data_dir.join(&self.catalog)
    }

    pub fn quiz_bank_path(&self) -> PathBuf {
        self.data_dir.join(&self.quiz_bank)
    }

    pub fn aliases_path(&self) -> PathBuf {
        self.data_dir.join(&self.aliases)
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
///
/// Substituted values are not scanned again.
fn resolve_env_vars(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(end) = rest[start..].find('}') else {
            break;
        };
        let var_name = &rest[start + 2..start + end];
        result.push_str(&rest[..start]);
        result.push_str(&std::env::var(var_name).unwrap_or_default());
        rest = &rest[start + end + 1..];
    }
    result.push_str(rest);
    result
}

fn resolve_path(path: &Path) -> PathBuf {
    PathBuf::from(resolve_env_vars(&path.to_string_lossy()))
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `meritscope.toml` in the current directory
/// 2. `~/.config/meritscope/config.toml`
///
/// Environment variable override: `MERITSCOPE_DATA_DIR`.
pub fn load_config() -> Result<MeritscopeConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<MeritscopeConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("meritscope.toml");
        if local.exists() {
            Some(local)
        } else if let Some(home) = dirs_path() {
            let global = home.join("config.toml");
            if global.exists() {
                Some(global)
            } else {
                None
            }
        } else {
            None
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            let config = parse_config_str(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?;
            tracing::debug!("loaded config from {}", path.display());
            config
        }
        None => MeritscopeConfig::default(),
    };

    if let Ok(dir) = std::env::var("MERITSCOPE_DATA_DIR") {
        config.data_dir = PathBuf::from(dir);
    }

    Ok(config)
}

/// Parse a TOML string into a config and resolve `${VAR}` references.
pub fn parse_config_str(content: &str) -> Result<MeritscopeConfig> {
    let mut config: MeritscopeConfig = toml::from_str(content)?;

    config.data_dir = resolve_path(&config.data_dir);
    config.catalog = resolve_path(&config.catalog);
    config.quiz_bank = resolve_path(&config.quiz_bank);
    config.aliases = resolve_path(&config.aliases);
    config.output_dir = resolve_path(&config.output_dir);

    anyhow::ensure!(
        config.default_test_max > 0.0,
        "default_test_max must be greater than zero"
    );

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("meritscope"))
}
