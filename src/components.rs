#![warn(clippy::all, clippy::pedantic)]
#![allow(
    // Allow truncation when casting from usize to i32 since board dimensions are always small enough to fit in i32
    clippy::cast_possible_truncation,
    // Allow sign loss when going from signed to unsigned types since we validate values are non-negative before casting
    clippy::cast_sign_loss,
    // Allow precision loss when casting between numeric types since exact precision isn't critical in this game
    clippy::cast_precision_loss,
    // Allow potential wrapping when casting between types of same size as we validate values are in range
    clippy::cast_possible_wrap
)]

use bevy_ecs::prelude::*;
use crossterm::event::KeyCode;
use log::debug;

use crate::game::{
    FALL_INTERVAL_FLOOR_MS, FALL_INTERVAL_START_MS, FALL_INTERVAL_STEP_MS, GLYPH_ORIGIN_X,
    GLYPH_ORIGIN_Y, POINTS_PER_ROW, SPAWN_X, SPEED_RAMP_PERIOD_MS, SPAWN_Y,
};
use crate::shapes::{self, Frame};

/// A cell color. Empty board cells carry [`BACKGROUND`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

pub const BACKGROUND: Rgb = Rgb(0, 0, 0);

impl From<Rgb> for ratatui::style::Color {
    fn from(color: Rgb) -> Self {
        ratatui::style::Color::Rgb(color.0, color.1, color.2)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TetrominoType {
    S,
    Z,
    I,
    O,
    J,
    L,
    T,
}

impl TetrominoType {
    pub const ALL: [TetrominoType; 7] = [
        TetrominoType::S,
        TetrominoType::Z,
        TetrominoType::I,
        TetrominoType::O,
        TetrominoType::J,
        TetrominoType::L,
        TetrominoType::T,
    ];

    /// Position of this kind in the shape catalog.
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            TetrominoType::S => 0,
            TetrominoType::Z => 1,
            TetrominoType::I => 2,
            TetrominoType::O => 3,
            TetrominoType::J => 4,
            TetrominoType::L => 5,
            TetrominoType::T => 6,
        }
    }

    #[must_use]
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index % Self::ALL.len()]
    }

    #[must_use]
    pub fn color(self) -> Rgb {
        shapes::catalog().entry(self).color
    }

    #[must_use]
    pub fn frame_count(self) -> usize {
        shapes::catalog().entry(self).frames.len()
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            TetrominoType::S => "S",
            TetrominoType::Z => "Z",
            TetrominoType::I => "I",
            TetrominoType::O => "O",
            TetrominoType::J => "J",
            TetrominoType::L => "L",
            TetrominoType::T => "T",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

/// A live piece: its kind, anchor and rotation index.
///
/// Moving or rotating never checks the board. Callers test the result with
/// [`Grid::is_valid_position`](crate::board::Grid::is_valid_position) and
/// keep the old value when it is rejected.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Piece {
    pub kind: TetrominoType,
    pub position: Position,
    pub rotation: usize,
}

impl Piece {
    /// A fresh piece at the spawn anchor with rotation 0.
    #[must_use]
    pub fn new(kind: TetrominoType) -> Self {
        Self::at(kind, SPAWN_X, SPAWN_Y)
    }

    #[must_use]
    pub fn at(kind: TetrominoType, x: i32, y: i32) -> Self {
        Self {
            kind,
            position: Position { x, y },
            rotation: 0,
        }
    }

    #[must_use]
    pub fn frame(&self) -> &'static Frame {
        shapes::catalog().frame(self.kind, self.rotation)
    }

    #[must_use]
    pub fn color(&self) -> Rgb {
        self.kind.color()
    }

    /// Absolute board coordinates of every filled glyph cell.
    #[must_use]
    pub fn occupied_cells(&self) -> Vec<Position> {
        self.frame()
            .cells()
            .iter()
            .map(|&(col, row)| Position {
                x: self.position.x + col as i32 - GLYPH_ORIGIN_X,
                y: self.position.y + row as i32 - GLYPH_ORIGIN_Y,
            })
            .collect()
    }

    pub fn translate(&mut self, dx: i32, dy: i32) {
        self.position.x += dx;
        self.position.y += dy;
    }

    pub fn rotate(&mut self, delta: i32) {
        let frames = self.kind.frame_count() as i32;
        self.rotation = (self.rotation as i32 + delta).rem_euclid(frames) as usize;
    }
}

/// Marks the piece the player is steering.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Active;

/// Marks the piece shown in the preview; it becomes [`Active`] on the next spawn.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct Next;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Falling,
    Locking,
    RowClearing,
    GameOver,
}

#[derive(Debug, Resource, Clone)]
pub struct GameState {
    pub score: u32,
    pub lines_cleared: u32,
    pub phase: Phase,
    pub fall_interval_ms: u32,
    pub fall_timer_ms: f32,
    pub ramp_timer_ms: f32,
}

impl Default for GameState {
    fn default() -> Self {
        Self {
            score: 0,
            lines_cleared: 0,
            phase: Phase::Falling,
            fall_interval_ms: FALL_INTERVAL_START_MS,
            fall_timer_ms: 0.0,
            ramp_timer_ms: 0.0,
        }
    }
}

impl GameState {
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    #[must_use]
    pub fn is_game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn set_phase(&mut self, phase: Phase) {
        if self.phase != phase {
            debug!("Phase {:?} -> {:?}", self.phase, phase);
            self.phase = phase;
        }
    }

    /// Advances both pacing timers and applies the speed ramp.
    /// Returns true when the active piece is due to fall one row.
    pub fn advance_timers(&mut self, delta_ms: f32) -> bool {
        self.fall_timer_ms += delta_ms;
        self.ramp_timer_ms += delta_ms;

        if self.ramp_timer_ms > SPEED_RAMP_PERIOD_MS {
            self.ramp_timer_ms = 0.0;
            if self.fall_interval_ms > FALL_INTERVAL_FLOOR_MS {
                self.fall_interval_ms = self
                    .fall_interval_ms
                    .saturating_sub(FALL_INTERVAL_STEP_MS)
                    .max(FALL_INTERVAL_FLOOR_MS);
                debug!("Fall interval now {}ms", self.fall_interval_ms);
            }
        }

        if self.fall_timer_ms > self.fall_interval_ms as f32 {
            self.fall_timer_ms = 0.0;
            true
        } else {
            false
        }
    }

    pub fn record_cleared_rows(&mut self, rows: usize) {
        let rows = u32::try_from(rows).unwrap_or(u32::MAX);
        self.lines_cleared = self.lines_cleared.saturating_add(rows);
        self.score = self.score.saturating_add(rows.saturating_mul(POINTS_PER_ROW));
    }
}

/// A discrete player request, at most one per tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    MoveLeft,
    MoveRight,
    SoftDrop,
    RotateCw,
    Quit,
}

impl Intent {
    #[must_use]
    pub fn from_key_code(code: KeyCode) -> Option<Self> {
        match code {
            KeyCode::Left | KeyCode::Char('a') => Some(Intent::MoveLeft),
            KeyCode::Right | KeyCode::Char('d') => Some(Intent::MoveRight),
            KeyCode::Down | KeyCode::Char('s') => Some(Intent::SoftDrop),
            KeyCode::Up | KeyCode::Char('w' | ' ') => Some(Intent::RotateCw),
            KeyCode::Char('q') | KeyCode::Esc => Some(Intent::Quit),
            _ => None,
        }
    }
}

// Pending player input for the next tick
#[derive(Resource, Debug, Clone, Default)]
pub struct Input {
    pending: Option<Intent>,
}

impl Input {
    /// Queues an intent unless one is already waiting; the first press in a tick wins.
    pub fn queue(&mut self, intent: Intent) -> bool {
        if self.pending.is_some() {
            return false;
        }
        self.pending = Some(intent);
        true
    }

    pub fn take(&mut self) -> Option<Intent> {
        self.pending.take()
    }

    #[must_use]
    pub fn pending(&self) -> Option<Intent> {
        self.pending
    }
}

/// Source of new piece kinds.
#[derive(Resource, Debug, Clone)]
pub struct PieceRng {
    rng: fastrand::Rng,
}

impl PieceRng {
    #[must_use]
    pub fn new() -> Self {
        Self {
            rng: fastrand::Rng::new(),
        }
    }

    #[must_use]
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: fastrand::Rng::with_seed(seed),
        }
    }

    pub fn next_kind(&mut self) -> TetrominoType {
        TetrominoType::from_index(self.rng.usize(0..TetrominoType::ALL.len()))
    }
}

impl Default for PieceRng {
    fn default() -> Self {
        Self::new()
    }
}
