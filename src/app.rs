#![warn(clippy::all, clippy::pedantic)]

use bevy_ecs::prelude::*;
use crossterm::event::KeyCode;
use log::info;

use crate::Time;
use crate::board::{Board, Grid, LockedCells};
use crate::components::{GameState, Input, Intent, Piece, PieceRng};
use crate::config::Config;
use crate::game::GAME_OVER_DISPLAY_MS;
use crate::menu_types::{Menu, MenuOption, MenuState};
use crate::systems::{active_piece, game_tick_system, next_piece, spawn_piece};

pub type AppResult<T> = anyhow::Result<T>;

pub struct App {
    pub world: World,
    pub should_quit: bool,
    pub menu: Menu,
    pub config: Config,
}

impl App {
    #[must_use]
    pub fn new(config: Config) -> Self {
        let mut app = Self {
            world: World::new(),
            should_quit: false,
            menu: Menu::new(),
            config,
        };
        app.reset();
        app
    }

    fn piece_rng(&self) -> PieceRng {
        match self.config.game.seed {
            Some(seed) => PieceRng::with_seed(seed),
            None => PieceRng::new(),
        }
    }

    /// Replaces the engine with a fresh one: empty board, zero score, new pieces.
    pub fn reset(&mut self) {
        let mut world = World::new();
        world.insert_resource(Time::new());
        world.insert_resource(Input::default());
        world.insert_resource(GameState::default());
        world.insert_resource(Board::new(LockedCells::new()));
        world.insert_resource(self.piece_rng());
        self.world = world;

        spawn_piece(&mut self.world);
    }

    pub fn start_game(&mut self) {
        info!("Starting new game");
        self.reset();
        self.menu.state = MenuState::Game;
        self.menu.game_over_elapsed_ms = 0.0;
    }

    /// The board as it should be drawn: locked cells plus the active piece.
    pub fn render_grid(&mut self) -> Grid {
        let grid = Grid::snapshot(&self.world.resource::<Board>().locked);
        match active_piece(&mut self.world) {
            Some((_, piece)) => grid.overlaid(&piece),
            None => grid,
        }
    }

    pub fn next_preview(&mut self) -> Option<Piece> {
        next_piece(&mut self.world).map(|(_, piece)| piece)
    }

    #[must_use]
    pub fn game_state(&self) -> &GameState {
        self.world.resource::<GameState>()
    }

    pub fn queue_intent(&mut self, intent: Intent) {
        if intent == Intent::Quit {
            self.should_quit = true;
            return;
        }
        self.world.resource_mut::<Input>().queue(intent);
    }

    pub fn handle_key(&mut self, code: KeyCode) {
        match self.menu.state {
            MenuState::MainMenu => match code {
                KeyCode::Up | KeyCode::Char('w') => self.menu.prev_option(),
                KeyCode::Down | KeyCode::Char('s') => self.menu.next_option(),
                KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
                // Any other key confirms the highlighted option
                _ => match self.menu.selected_option {
                    MenuOption::NewGame => self.start_game(),
                    MenuOption::Quit => self.should_quit = true,
                },
            },
            MenuState::Game => {
                if let Some(intent) = Intent::from_key_code(code) {
                    self.queue_intent(intent);
                }
            }
            MenuState::GameOver => match code {
                KeyCode::Char('q') => self.should_quit = true,
                _ => self.menu.state = MenuState::MainMenu,
            },
        }
    }

    /// Runs one frame worth of work for whichever screen is showing.
    pub fn on_tick(&mut self, delta_ms: f32) {
        match self.menu.state {
            MenuState::MainMenu => {}
            MenuState::Game => {
                game_tick_system(&mut self.world, delta_ms);
                if self.game_state().is_game_over() {
                    self.menu.state = MenuState::GameOver;
                    self.menu.game_over_elapsed_ms = 0.0;
                }
            }
            MenuState::GameOver => {
                self.menu.game_over_elapsed_ms += delta_ms;
                if self.menu.game_over_elapsed_ms > GAME_OVER_DISPLAY_MS {
                    self.menu.state = MenuState::MainMenu;
                }
            }
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new(Config::default())
    }
}
