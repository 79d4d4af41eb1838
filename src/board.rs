#![warn(clippy::all, clippy::pedantic)]
#![allow(
    // Allow truncation when casting from usize to i32 since board dimensions are always small enough to fit in i32
    clippy::cast_possible_truncation,
    // Allow sign loss when going from signed to unsigned types since we validate values are non-negative before casting
    clippy::cast_sign_loss,
    // Allow potential wrapping when casting between types as board coordinates are within reasonable ranges
    clippy::cast_possible_wrap
)]

use std::collections::HashMap;

use bevy_ecs::prelude::*;
use log::trace;

use crate::components::{BACKGROUND, Piece, Rgb};
use crate::game::{BOARD_HEIGHT, BOARD_WIDTH};

/// Permanently settled cells keyed by `(column, row)`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LockedCells {
    cells: HashMap<(i32, i32), Rgb>,
}

impl LockedCells {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, col: i32, row: i32) -> Option<Rgb> {
        self.cells.get(&(col, row)).copied()
    }

    #[must_use]
    pub fn contains(&self, col: i32, row: i32) -> bool {
        self.cells.contains_key(&(col, row))
    }

    /// Stores `color` at `(col, row)`, returning whatever was there before.
    pub fn insert(&mut self, col: i32, row: i32, color: Rgb) -> Option<Rgb> {
        self.cells.insert((col, row), color)
    }

    /// Removes the cell at `(col, row)` when one exists.
    pub fn remove_if_present(&mut self, col: i32, row: i32) -> Option<Rgb> {
        if !self.contains(col, row) {
            return None;
        }
        self.cells.remove(&(col, row))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = ((i32, i32), Rgb)> + '_ {
        self.cells.iter().map(|(&key, &color)| (key, color))
    }

    /// Commits every visible cell of `piece` (row > -1).
    pub fn lock(&mut self, piece: &Piece) {
        let color = piece.color();
        for cell in piece.occupied_cells() {
            if cell.y > -1 {
                self.insert(cell.x, cell.y, color);
            }
        }
    }

    /// Removes the rows that are full in `grid` and drops everything above
    /// the topmost cleared row by the number of rows removed.
    ///
    /// Returns how many rows were cleared.
    pub fn clear_full_rows(&mut self, grid: &Grid) -> usize {
        let mut increment = 0;
        let mut topmost_cleared = None;

        for row in (0..BOARD_HEIGHT).rev() {
            if grid.is_row_full(row) {
                increment += 1;
                topmost_cleared = Some(row as i32);
                for col in 0..BOARD_WIDTH {
                    self.remove_if_present(col as i32, row as i32);
                }
            }
        }

        let Some(topmost) = topmost_cleared else {
            return 0;
        };

        // Bottom-most first so a shifted key never lands on one still waiting to move
        let mut above: Vec<(i32, i32)> = self
            .cells
            .keys()
            .copied()
            .filter(|&(_, row)| row < topmost)
            .collect();
        above.sort_by(|a, b| b.1.cmp(&a.1));

        let shift = increment as i32;
        for (col, row) in above {
            if let Some(color) = self.remove_if_present(col, row) {
                self.insert(col, row + shift, color);
            }
        }

        trace!("Cleared {increment} rows, topmost {topmost}");
        increment
    }

    /// True once any settled cell sits in the top row (the loss condition).
    #[must_use]
    pub fn has_reached_top(&self) -> bool {
        self.cells.keys().any(|&(_, row)| row < 1)
    }
}

/// The fixed 20x10 view of the board, one color per cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    rows: [[Rgb; BOARD_WIDTH]; BOARD_HEIGHT],
}

impl Default for Grid {
    fn default() -> Self {
        Self {
            rows: [[BACKGROUND; BOARD_WIDTH]; BOARD_HEIGHT],
        }
    }
}

impl Grid {
    /// Background everywhere, then each locked cell that falls inside the board.
    #[must_use]
    pub fn snapshot(locked: &LockedCells) -> Self {
        let mut grid = Self::default();
        for (row, cells) in grid.rows.iter_mut().enumerate() {
            for (col, cell) in cells.iter_mut().enumerate() {
                if let Some(color) = locked.get(col as i32, row as i32) {
                    *cell = color;
                }
            }
        }
        grid
    }

    #[must_use]
    pub fn cell(&self, col: i32, row: i32) -> Option<Rgb> {
        if !Self::in_bounds(col, row) {
            return None;
        }
        Some(self.rows[row as usize][col as usize])
    }

    #[must_use]
    pub fn rows(&self) -> &[[Rgb; BOARD_WIDTH]; BOARD_HEIGHT] {
        &self.rows
    }

    #[must_use]
    pub fn in_bounds(col: i32, row: i32) -> bool {
        col >= 0 && col < BOARD_WIDTH as i32 && row >= 0 && row < BOARD_HEIGHT as i32
    }

    #[must_use]
    pub fn is_row_full(&self, row: usize) -> bool {
        self.rows
            .get(row)
            .is_some_and(|cells| cells.iter().all(|&cell| cell != BACKGROUND))
    }

    /// Every cell at row >= 0 must be inside the board and on background.
    /// Cells above the top edge are always accepted.
    #[must_use]
    pub fn is_valid_position(&self, piece: &Piece) -> bool {
        piece.occupied_cells().iter().all(|cell| {
            cell.y < 0 || self.cell(cell.x, cell.y).is_some_and(|color| color == BACKGROUND)
        })
    }

    /// A copy with the piece's visible cells painted on top.
    #[must_use]
    pub fn overlaid(&self, piece: &Piece) -> Self {
        let mut grid = *self;
        let color = piece.color();
        for cell in piece.occupied_cells() {
            if cell.y > -1 && Self::in_bounds(cell.x, cell.y) {
                grid.rows[cell.y as usize][cell.x as usize] = color;
            }
        }
        grid
    }
}

/// Settled cells plus the snapshot taken at the start of the current tick.
#[derive(Resource, Debug, Clone, Default)]
pub struct Board {
    pub locked: LockedCells,
    pub grid: Grid,
}

impl Board {
    #[must_use]
    pub fn new(locked: LockedCells) -> Self {
        let grid = Grid::snapshot(&locked);
        Self { locked, grid }
    }

    /// Rebuilds the snapshot from the locked cells.
    pub fn refresh(&mut self) {
        self.grid = Grid::snapshot(&self.locked);
    }
}
