//! quizkit configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use quizkit_core::parser::{load_quiz_directory, parse_quiz_set};
use quizkit_core::Catalog;

/// Top-level quizkit configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizkitConfig {
    /// Extra quiz set files or directories layered on top of the built-in catalog.
    #[serde(default)]
    pub catalog_dirs: Vec<PathBuf>,
    /// Whether the built-in quizzes are part of the catalog.
    #[serde(default = "default_true")]
    pub include_builtin: bool,
    /// Where saved runs are written.
    #[serde(default = "default_results_dir")]
    pub results_dir: PathBuf,
    /// Show each question's explanation after it is answered.
    #[serde(default = "default_true")]
    pub show_explanations: bool,
}

fn default_true() -> bool {
    true
}
fn default_results_dir() -> PathBuf {
    PathBuf::from("./quizkit-results")
}

impl Default for QuizkitConfig {
    fn default() -> Self {
        Self {
            catalog_dirs: Vec::new(),
            include_builtin: true,
            results_dir: default_results_dir(),
            show_explanations: true,
        }
    }
}

impl QuizkitConfig {
    /// Build the catalog this configuration describes.
    pub fn load_catalog(&self) -> Result<Catalog> {
        let mut sets = Vec::new();
        for path in &self.catalog_dirs {
            if path.is_dir() {
                sets.extend(load_quiz_directory(path)?);
            } else {
                sets.push(parse_quiz_set(path)?);
            }
        }

        let extra = Catalog::from_sets(sets)?;
        if self.include_builtin {
            Ok(Catalog::builtin()?.merge(extra)?)
        } else {
            Ok(extra)
        }
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
///
/// Substituted values are inserted verbatim and never rescanned.
fn resolve_env_vars(s: &str) -> String {
    resolve_vars_with(s, |name| std::env::var(name).ok())
}

fn resolve_vars_with(s: &str, lookup: impl Fn(&str) -> Option<String>) -> String {
    let mut result = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(start) = rest.find("${") {
        let Some(end) = rest[start..].find('}') else {
            break;
        };
        let var_name = &rest[start + 2..start + end];
        result.push_str(&rest[..start]);
        result.push_str(&lookup(var_name).unwrap_or_default());
        rest = &rest[start + end + 1..];
    }
    result.push_str(rest);
    result
}

fn resolve_path(path: &Path) -> PathBuf {
    PathBuf::from(resolve_env_vars(&path.to_string_lossy()))
}

/// Apply `QUIZKIT_RESULTS_DIR` and `QUIZKIT_CATALOG_DIR` overrides.
fn apply_env_overrides(config: &mut QuizkitConfig, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(dir) = lookup("QUIZKIT_RESULTS_DIR") {
        config.results_dir = PathBuf::from(dir);
    }
    if let Some(dir) = lookup("QUIZKIT_CATALOG_DIR") {
        config.catalog_dirs.push(PathBuf::from(dir));
    }
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order without a path:
/// 1. `quizkit.toml` in the current directory
/// 2. `~/.config/quizkit/config.toml`
///
/// Environment overrides: `QUIZKIT_RESULTS_DIR`, `QUIZKIT_CATALOG_DIR`.
pub fn load_config_from(path: Option<&Path>) -> Result<QuizkitConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("quizkit.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            tracing::debug!("loading config from {}", path.display());
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<QuizkitConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => QuizkitConfig::default(),
    };

    apply_env_overrides(&mut config, |key| std::env::var(key).ok());

    config.results_dir = resolve_path(&config.results_dir);
    config.catalog_dirs = config.catalog_dirs.iter().map(|p| resolve_path(p)).collect();

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("quizkit"))
}
