pub mod loader;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub display: DisplayConfig,
    pub timing: TimingConfig,
    pub game: GameConfig,
}

// What the renderer draws besides the board itself
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub show_grid: bool,
    pub show_next_piece: bool,
    pub show_controls: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            show_grid: true,
            show_next_piece: true,
            show_controls: true,
        }
    }
}

// Main loop cadence, in milliseconds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimingConfig {
    pub frame_ms: u64,
    pub input_poll_ms: u64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            frame_ms: 16,
            input_poll_ms: 5,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Fixed seed for the piece randomizer; random when absent.
    pub seed: Option<u64>,
}
