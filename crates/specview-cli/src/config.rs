//! Configuration management for the CLI
//!
//! This module handles loading configuration from:
//! - Default values
//! - Configuration files (YAML/JSON)
//! - Command-line arguments, applied by the handlers
//!
//! Copyright (c) 2025 Specview Team
//! Licensed under the Apache-2.0 license

use crate::error::Result;
use serde::{Deserialize, Serialize};
use specview_core::{FailurePolicy, PreviewOptions};
use std::path::{Path, PathBuf};
use tracing::warn;

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Output settings
    pub output: OutputConfig,

    /// Logging settings
    pub logging: LoggingConfig,

    /// Page rendering settings
    pub render: RenderConfig,

    /// Path settings
    pub paths: PathConfig,
}

/// Output configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Use colored output by default
    pub color: bool,

    /// Show progress indicators
    pub progress: bool,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level used when no `-v` flag is given
    pub level: Option<String>,

    /// Log format (compact, full, json)
    pub format: String,
}

/// Page rendering configuration, mirrors [`PreviewOptions`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    pub banner_title: String,
    pub docs_url: String,
    pub resource_base_url: String,
    pub include_banner: bool,
    pub failure_policy: FailurePolicy,
    /// Run the structural check before rendering
    pub validate_structure: bool,
}

/// Path configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathConfig {
    /// Default directory for generated pages
    pub output_dir: Option<PathBuf>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            color: true,
            progress: true,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: None,
            format: "compact".to_string(),
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        let options = PreviewOptions::default();
        Self {
            banner_title: options.banner_title,
            docs_url: options.docs_url,
            resource_base_url: options.resource_base_url,
            include_banner: options.include_banner,
            failure_policy: options.failure_policy,
            validate_structure: true,
        }
    }
}

impl RenderConfig {
    /// Preview options described by this configuration
    pub fn preview_options(&self) -> PreviewOptions {
        PreviewOptions {
            banner_title: self.banner_title.clone(),
            docs_url: self.docs_url.clone(),
            resource_base_url: self.resource_base_url.clone(),
            include_banner: self.include_banner,
            failure_policy: self.failure_policy,
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;

        let config = if is_yaml(path) {
            serde_yaml::from_str(&content)?
        } else {
            serde_json::from_str(&content)?
        };

        Ok(config)
    }

    /// Load configuration from default locations
    pub fn load() -> Result<Self> {
        for path in Self::default_config_paths() {
            if path.exists() {
                match Self::from_file(&path) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        warn!(path = %path.display(), error = %e, "Skipping unreadable config file");
                    }
                }
            }
        }

        Ok(Self::default())
    }

    /// Load configuration from a specific file or default locations
    pub fn load_with_file(file: Option<&Path>) -> Result<Self> {
        if let Some(path) = file {
            Self::from_file(path)
        } else {
            Self::load()
        }
    }

    /// Configuration file locations, in lookup order
    pub fn default_config_paths() -> Vec<PathBuf> {
        let mut paths = vec![
            PathBuf::from(".specview.yaml"),
            PathBuf::from(".specview.json"),
            PathBuf::from("specview.yaml"),
            PathBuf::from("specview.json"),
        ];

        if let Some(config_dir) = dirs::config_dir() {
            let specview_dir = config_dir.join("specview");
            paths.push(specview_dir.join("config.yaml"));
            paths.push(specview_dir.join("config.json"));
        }

        if let Some(home_dir) = dirs::home_dir() {
            paths.push(home_dir.join(".specview.yaml"));
            paths.push(home_dir.join(".specview.json"));
        }

        paths
    }

    /// Where `config init` writes when no path is given
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("specview").join("config.yaml"))
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = if is_yaml(path) {
            serde_yaml::to_string(self)?
        } else {
            serde_json::to_string_pretty(self)?
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content)?;
        Ok(())
    }
}

fn is_yaml(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|s| s.to_str()),
        Some("yaml") | Some("yml")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_render_config_matches_preview_defaults() {
        let config = Config::default();
        assert_eq!(config.render.preview_options(), PreviewOptions::default());
        assert!(config.render.validate_structure);
    }

    #[test]
    fn test_partial_yaml_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("specview.yaml");
        std::fs::write(
            &path,
            "render:\n  include_banner: false\n  failure_policy: isolate\nlogging:\n  format: json\n",
        )
        .unwrap();

        let config = Config::from_file(&path).unwrap();
        assert!(!config.render.include_banner);
        assert_eq!(config.render.failure_policy, FailurePolicy::Isolate);
        assert_eq!(config.render.docs_url, PreviewOptions::default().docs_url);
        assert_eq!(config.logging.format, "json");
        assert!(config.output.color);
    }

    #[test]
    fn test_save_and_reload() {
        let dir = tempdir().unwrap();
        let mut config = Config::default();
        config.render.resource_base_url = "https://api.example.com".to_string();
        config.paths.output_dir = Some(PathBuf::from("site"));

        for name in ["nested/config.json", "config.yml"] {
            let path = dir.path().join(name);
            config.save(&path).unwrap();
            assert_eq!(Config::from_file(&path).unwrap(), config);
        }
    }

    #[test]
    fn test_invalid_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(Config::load_with_file(Some(&path)).is_err());
    }

    #[test]
    fn test_lookup_order_starts_local() {
        let paths = Config::default_config_paths();
        assert_eq!(paths[0], PathBuf::from(".specview.yaml"));
        assert_eq!(paths[3], PathBuf::from("specview.json"));
    }
}
