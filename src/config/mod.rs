// Configuration module for Pong
// Handles loading and managing game configuration from TOML file

pub mod loader;
pub mod types;

pub use loader::{get_config_path, load_config};
pub use types::{Config, DisplayConfig, InputConfig, KeyBindings, TimingConfig};
