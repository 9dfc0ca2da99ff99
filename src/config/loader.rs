// Configuration file loading and creation

use super::types::Config;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Get the default path to the configuration file
pub fn get_config_path() -> PathBuf {
    let mut path = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("duopong");
    path.push("config.toml");
    path
}

/// Load configuration from file, or create default if it doesn't exist
pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        create_default_config(path)?;
        return Ok(Config::default());
    }

    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;

    Ok(parse_config(&contents).unwrap_or_else(|e| {
        tracing::warn!(path = %path.display(), error = %e, "invalid config, using defaults");
        Config::default()
    }))
}

/// Parse config text; missing sections and fields fall back to defaults
pub fn parse_config(contents: &str) -> Result<Config, toml::de::Error> {
    toml::from_str(contents)
}

/// Create a default configuration file with helpful comments
pub fn create_default_config(path: &Path) -> Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)
            .with_context(|| format!("failed to create config directory {}", dir.display()))?;
    }

    let toml_string =
        toml::to_string_pretty(&Config::default()).context("failed to serialize defaults")?;

    let commented_toml = format!(
        "# Pong Configuration File\n\
         # Edit this file to customize controls, colors and timings\n\
         # After editing, restart the game for changes to take effect\n\
         #\n\
         # Key binding format: \"Up\", \"Down\", \"Left\", \"Right\", \"Enter\", \"Esc\",\n\
         #                     \"Space\", \"Tab\", or single characters like \"W\", \"S\"\n\
         #\n\
         # Colors: RGB values from 0-255\n\n\
         {}",
        toml_string
    );

    fs::write(path, commented_toml)
        .with_context(|| format!("failed to write config file {}", path.display()))?;
    tracing::info!(path = %path.display(), "created default config file");
    Ok(())
}
