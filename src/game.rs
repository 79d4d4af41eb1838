#![warn(clippy::all, clippy::pedantic)]

// Game board dimensions
pub const BOARD_WIDTH: usize = 10;
pub const BOARD_HEIGHT: usize = 20;

// Where every new piece appears (anchor column, anchor row)
pub const SPAWN_X: i32 = 5;
pub const SPAWN_Y: i32 = 0;

// Glyph templates are 5x5; the piece anchor sits at glyph column 2, row 4
pub const GLYPH_SIZE: usize = 5;
pub const GLYPH_ORIGIN_X: i32 = 2;
pub const GLYPH_ORIGIN_Y: i32 = 4;

// Fall pacing, all in milliseconds
pub const FALL_INTERVAL_START_MS: u32 = 270;
pub const FALL_INTERVAL_FLOOR_MS: u32 = 150;
pub const FALL_INTERVAL_STEP_MS: u32 = 5;
pub const SPEED_RAMP_PERIOD_MS: f32 = 5000.0;

// Scoring
pub const POINTS_PER_ROW: u32 = 10;

// How long the loss message stays up before returning to the main menu
pub const GAME_OVER_DISPLAY_MS: f32 = 2000.0;
