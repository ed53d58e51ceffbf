//! Show or initialize the configuration file.

use std::path::PathBuf;

use focuslens_common::config::{config_file_path, AppConfig};

pub fn run(path: Option<PathBuf>, init: bool, config: &AppConfig) -> anyhow::Result<()> {
    if init {
        let defaults = AppConfig::default();
        let replaced = path.clone().unwrap_or_else(config_file_path).exists();
        let written = match path {
            Some(path) => {
                defaults
                    .save_to(&path)
                    .map_err(|e| anyhow::anyhow!("Failed to write config: {e}"))?;
                path
            }
            None => defaults
                .save()
                .map_err(|e| anyhow::anyhow!("Failed to write config: {e}"))?,
        };
        if replaced {
            tracing::warn!(path = %written.display(), "Replaced existing configuration");
        }
        println!("Wrote default configuration to {}", written.display());
        return Ok(());
    }

    let location = path.unwrap_or_else(config_file_path);
    let status = if location.exists() { "" } else { " (not present, using defaults)" };
    println!("Config file: {}{status}", location.display());
    println!("{}", serde_json::to_string_pretty(config)?);
    Ok(())
}
