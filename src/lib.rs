pub mod app;
pub mod board;
pub mod components;
pub mod config;
pub mod game;
pub mod menu_types;
pub mod shapes;
pub mod systems;
pub mod ui;

#[cfg(test)]
mod tests;

use bevy_ecs::prelude::Resource;
use std::time::{Duration, Instant};

#[derive(Resource, Debug, Clone)]
pub struct Time {
    delta: Duration,
    last_update: Instant,
}

impl Time {
    #[must_use]
    pub fn new() -> Self {
        Self {
            delta: Duration::default(),
            last_update: Instant::now(),
        }
    }

    pub fn update(&mut self) {
        let now = Instant::now();
        self.delta = now.duration_since(self.last_update);
        self.last_update = now;
    }

    /// Elapsed time of the last frame in milliseconds, the unit the engine timers use.
    #[must_use]
    pub fn delta_millis(&self) -> f32 {
        self.delta.as_secs_f32() * 1000.0
    }
}

impl Default for Time {
    fn default() -> Self {
        Self::new()
    }
}
