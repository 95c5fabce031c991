use std::fs;
use std::path::{Path, PathBuf};

use glob::Pattern;
use serde::{Deserialize, Serialize};

use crate::errors::{BundleError, Result};
use crate::types::{DependencyErrorPolicy, OutputFormat};

/// Name of the configuration file stored inside the `.ctxbundle` directory.
pub const CONFIG_FILENAME: &str = "config.json";

/// Name of the hidden directory holding ctxbundle settings.
pub const CTXBUNDLE_DIR: &str = ".ctxbundle";

/// Configuration for a ctxbundle project.
///
/// Controls which changed files are bundled and how dependency failures
/// are treated during collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BundleConfig {
    /// Schema version of the configuration.
    pub version: u32,
    /// Glob patterns of files that may be bundled.
    pub include: Vec<String>,
    /// Glob patterns of files that are never bundled.
    pub exclude: Vec<String>,
    /// Policy for dependencies that fail to parse while being expanded.
    pub dependency_errors: DependencyErrorPolicy,
    /// Default output format of the `bundle` command.
    pub format: OutputFormat,
}

impl Default for BundleConfig {
    fn default() -> Self {
        Self {
            version: 1,
            include: vec![
                "**/*.ts".to_string(),
                "**/*.tsx".to_string(),
                "**/*.js".to_string(),
                "**/*.jsx".to_string(),
            ],
            exclude: vec![
                "**/__tests__/**".to_string(),
                "node_modules/**".to_string(),
                ".git/**".to_string(),
                ".ctxbundle/**".to_string(),
                "dist/**".to_string(),
                "build/**".to_string(),
            ],
            dependency_errors: DependencyErrorPolicy::Skip,
            format: OutputFormat::Text,
        }
    }
}

/// Returns the path to the `.ctxbundle` directory within the given project root.
pub fn get_ctxbundle_dir(project_root: &Path) -> PathBuf {
    project_root.join(CTXBUNDLE_DIR)
}

/// Returns the path to the configuration file within the `.ctxbundle` directory.
pub fn get_config_path(project_root: &Path) -> PathBuf {
    get_ctxbundle_dir(project_root).join(CONFIG_FILENAME)
}

/// Loads the configuration from disk, falling back to defaults when the
/// file does not exist.
pub fn load_config(project_root: &Path) -> Result<BundleConfig> {
    let config_path = get_config_path(project_root);

    if !config_path.exists() {
        return Ok(BundleConfig::default());
    }

    let contents = fs::read_to_string(&config_path).map_err(|e| BundleError::Config {
        message: format!(
            "failed to read config file '{}': {}",
            config_path.display(),
            e
        ),
    })?;

    serde_json::from_str(&contents).map_err(|e| BundleError::Config {
        message: format!(
            "failed to parse config file '{}': {}",
            config_path.display(),
            e
        ),
    })
}

/// Saves the configuration to disk using an atomic write.
///
/// Writes to a temporary file first and then renames it into place.
pub fn save_config(project_root: &Path, config: &BundleConfig) -> Result<()> {
    let dir = get_ctxbundle_dir(project_root);
    fs::create_dir_all(&dir).map_err(|e| BundleError::Config {
        message: format!("failed to create directory '{}': {}", dir.display(), e),
    })?;

    let config_path = get_config_path(project_root);
    let tmp_path = config_path.with_extension("tmp");

    let json = serde_json::to_string_pretty(config).map_err(|e| BundleError::Config {
        message: format!("failed to serialize config: {}", e),
    })?;

    fs::write(&tmp_path, &json).map_err(|e| BundleError::Config {
        message: format!(
            "failed to write temporary config file '{}': {}",
            tmp_path.display(),
            e
        ),
    })?;

    fs::rename(&tmp_path, &config_path).map_err(|e| BundleError::Config {
        message: format!(
            "failed to rename '{}' to '{}': {}",
            tmp_path.display(),
            config_path.display(),
            e
        ),
    })?;

    Ok(())
}

/// Determines whether a project-relative file path is a bundling candidate.
///
/// Exclude patterns take precedence; otherwise at least one include pattern
/// must match.
pub fn should_include_file(file_path: &str, config: &BundleConfig) -> bool {
    let match_opts = glob::MatchOptions {
        case_sensitive: true,
        require_literal_separator: false,
        require_literal_leading_dot: false,
    };

    for pattern_str in &config.exclude {
        if let Ok(pattern) = Pattern::new(pattern_str) {
            if pattern.matches_with(file_path, match_opts) {
                return false;
            }
        }
    }

    config.include.iter().any(|pattern_str| {
        Pattern::new(pattern_str)
            .map(|pattern| pattern.matches_with(file_path, match_opts))
            .unwrap_or(false)
    })
}
