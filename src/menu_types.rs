// Top-level screen the app is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuState {
    MainMenu,
    Game,
    GameOver,
}

// Menu option selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuOption {
    NewGame,
    Quit,
}

#[derive(Debug, Clone)]
pub struct Menu {
    pub state: MenuState,
    pub selected_option: MenuOption,
    // Time the loss message has been on screen
    pub game_over_elapsed_ms: f32,
}

impl Default for Menu {
    fn default() -> Self {
        Self {
            state: MenuState::MainMenu,
            selected_option: MenuOption::NewGame,
            game_over_elapsed_ms: 0.0,
        }
    }
}

impl Menu {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_option(&mut self) {
        self.selected_option = match self.selected_option {
            MenuOption::NewGame => MenuOption::Quit,
            MenuOption::Quit => MenuOption::NewGame,
        };
    }

    pub fn prev_option(&mut self) {
        // Only two entries, so stepping back is the same as stepping forward
        self.next_option();
    }
}
