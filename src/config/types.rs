// Pong configuration types
// Defaults reproduce the classic controls and timings; playfield geometry is fixed

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub keybindings: KeyBindings,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub timing: TimingConfig,
    #[serde(default)]
    pub input: InputConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct KeyBindings {
    // Left paddle (player one)
    pub left_paddle_up: String,
    pub left_paddle_down: String,

    // Right paddle (player two)
    pub right_paddle_up: String,
    pub right_paddle_down: String,

    // Lifecycle controls
    pub start: String,
    pub reset: String,
    pub quit: String,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            left_paddle_up: "W".to_string(),
            left_paddle_down: "S".to_string(),
            right_paddle_up: "Up".to_string(),
            right_paddle_down: "Down".to_string(),
            start: "Space".to_string(),
            reset: "R".to_string(),
            quit: "Q".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DisplayConfig {
    // Terminal redraw rate; the simulation tick rate is set in [timing]
    pub target_fps: u64,

    // Show the key hints under the scores
    pub show_controls: bool,

    // Colors (RGB values 0-255)
    pub ball_color: [u8; 3],
    pub paddle_color: [u8; 3],
    pub divider_color: [u8; 3],
    pub label_color: [u8; 3],
    pub announcement_color: [u8; 3],
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            target_fps: 60,
            show_controls: true,
            ball_color: [140, 140, 230],
            paddle_color: [140, 140, 230],
            divider_color: [60, 60, 110],
            label_color: [60, 60, 110],
            announcement_color: [255, 255, 255],
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimingConfig {
    // Simulation step period
    pub tick_interval_ms: u64,

    // Period of one countdown step (pre-game and between points)
    pub countdown_interval_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: 10,
            countdown_interval_ms: 1000,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct InputConfig {
    // How long a key counts as held after its last press/repeat, used only
    // when the terminal cannot report key releases
    pub hold_release_ms: u64,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            hold_release_ms: 150,
        }
    }
}
