//! Configuration command handlers
//!
//! Copyright (c) 2025 Specview Team
//! Licensed under the Apache-2.0 license

use crate::cli::{ConfigAction, ConfigArgs, ConfigFormat, ConfigInitArgs, ConfigShowArgs, OutputFormat};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::output::OutputWriter;
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;

/// Handle the config command
pub async fn handle_config(args: ConfigArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    match args.action {
        ConfigAction::Show(show_args) => handle_config_show(show_args, config, output),
        ConfigAction::Init(init_args) => handle_config_init(init_args, output),
        ConfigAction::Path => handle_config_path(output),
    }
}

/// Print the effective configuration
fn handle_config_show(args: ConfigShowArgs, config: &Config, output: &mut OutputWriter) -> Result<()> {
    let content = match args.format {
        ConfigFormat::Json => serde_json::to_string_pretty(config)
            .map_err(|e| Error::config(format!("Failed to serialize as JSON: {}", e)))?,
        ConfigFormat::Yaml => serde_yaml::to_string(config)
            .map_err(|e| Error::config(format!("Failed to serialize as YAML: {}", e)))?,
    };

    output.writeln(content.trim_end())
}

/// Write a configuration file holding the defaults
fn handle_config_init(args: ConfigInitArgs, output: &mut OutputWriter) -> Result<()> {
    let path = match args.path {
        Some(path) => path,
        None => Config::user_config_path()
            .ok_or_else(|| Error::config("Unable to determine user config directory"))?,
    };

    if path.exists() && !args.force {
        output.warning(&format!(
            "Config already exists at {} (use --force to overwrite)",
            path.display()
        ))?;
        return Ok(());
    }

    Config::default().save(&path)?;
    info!(path = %path.display(), "Default configuration written");
    output.success(&format!("✓ Created config at {}", path.display()))
}

#[derive(Serialize)]
struct ConfigLocation {
    path: PathBuf,
    exists: bool,
}

/// List the configuration lookup locations, in order
fn handle_config_path(output: &mut OutputWriter) -> Result<()> {
    let locations: Vec<ConfigLocation> = Config::default_config_paths()
        .into_iter()
        .map(|path| ConfigLocation {
            exists: path.exists(),
            path,
        })
        .collect();

    if output.format() != OutputFormat::Human {
        return output.data(&locations);
    }

    for location in &locations {
        let marker = if location.exists { "*" } else { " " };
        output.writeln(&format!("{} {}", marker, location.path.display()))?;
    }
    Ok(())
}
