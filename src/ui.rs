use crate::app::App;
use crate::board::Grid;
use crate::components::{BACKGROUND, Piece};
use crate::game::{BOARD_HEIGHT, BOARD_WIDTH, GLYPH_SIZE};
use crate::menu_types::{MenuOption, MenuState};
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph, Wrap},
};

// Each cell is 2 characters wide and 1 tall
const CELL_WIDTH: u16 = 2;
const BOARD_PIXEL_WIDTH: u16 = BOARD_WIDTH as u16 * CELL_WIDTH + 2;
const BOARD_PIXEL_HEIGHT: u16 = BOARD_HEIGHT as u16 + 2;
const MIN_INFO_WIDTH: u16 = 22;

pub fn render(f: &mut Frame, app: &mut App) {
    match app.menu.state {
        MenuState::MainMenu => render_main_menu(f, app),
        MenuState::Game | MenuState::GameOver => render_game(f, app),
    }
}

#[must_use]
pub fn minimum_size() -> (u16, u16) {
    (BOARD_PIXEL_WIDTH + MIN_INFO_WIDTH, BOARD_PIXEL_HEIGHT + 2)
}

fn render_main_menu(f: &mut Frame, app: &App) {
    let area = centered_rect(60, 50, f.area());
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(2),
            Constraint::Min(1),
        ])
        .split(area);

    let title = Paragraph::new("BLOCKDROP")
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::BOTTOM));
    f.render_widget(title, layout[0]);

    let hint = Paragraph::new("Press any key to begin").alignment(Alignment::Center);
    f.render_widget(hint, layout[1]);

    let lines: Vec<Line> = [("New Game", MenuOption::NewGame), ("Quit", MenuOption::Quit)]
        .into_iter()
        .map(|(label, option)| {
            let style = if option == app.menu.selected_option {
                Style::default().add_modifier(Modifier::REVERSED)
            } else {
                Style::default()
            };
            Line::from(Span::styled(label, style))
        })
        .collect();
    f.render_widget(
        Paragraph::new(Text::from(lines)).alignment(Alignment::Center),
        layout[2],
    );
}

fn render_game(f: &mut Frame, app: &mut App) {
    let (min_width, min_height) = minimum_size();
    if f.area().width < min_width || f.area().height < min_height {
        let warning = Paragraph::new("Terminal too small!\nPlease resize your terminal.")
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL).title("Blockdrop"));
        f.render_widget(warning, centered_rect(60, 40, f.area()));
        return;
    }

    let main_layout = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(BOARD_PIXEL_WIDTH),
            Constraint::Min(MIN_INFO_WIDTH),
        ])
        .split(f.area());

    let board_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(BOARD_PIXEL_HEIGHT),
            Constraint::Fill(1),
        ])
        .split(main_layout[0]);

    let title = Paragraph::new("BLOCKDROP").alignment(Alignment::Center);
    f.render_widget(title, board_layout[0]);

    let grid = app.render_grid();
    render_board(f, &grid, app.config.display.show_grid, board_layout[1]);

    if app.menu.state == MenuState::GameOver {
        let inner = Block::default().borders(Borders::ALL).inner(board_layout[1]);
        let lost_area = Rect {
            x: inner.x,
            y: inner.y + inner.height / 2,
            width: inner.width,
            height: 1,
        };
        let lost = Paragraph::new("YOU LOST")
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::White).add_modifier(Modifier::BOLD));
        f.render_widget(lost, lost_area);
    }

    render_info(f, app, main_layout[1]);
}

fn render_board(f: &mut Frame, grid: &Grid, show_grid: bool, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Red));
    let inner = block.inner(area);
    f.render_widget(block, area);

    for (row, cells) in grid.rows().iter().enumerate() {
        for (col, &color) in cells.iter().enumerate() {
            let x = inner.left() + col as u16 * CELL_WIDTH;
            let y = inner.top() + row as u16;
            if x + CELL_WIDTH > inner.right() || y >= inner.bottom() {
                continue;
            }

            // Empty cells get a dot in their left half when the grid is shown
            let (left, right, fg) = if color != BACKGROUND {
                ("█", "█", Color::from(color))
            } else if show_grid {
                ("·", " ", Color::DarkGray)
            } else {
                (" ", " ", Color::Reset)
            };

            for (dx, symbol) in [(0, left), (1, right)] {
                if let Some(cell) = f.buffer_mut().cell_mut((x + dx, y)) {
                    cell.set_symbol(symbol);
                    cell.set_fg(fg);
                    cell.set_bg(Color::Black);
                }
            }
        }
    }
}

fn render_info(f: &mut Frame, app: &mut App, area: Rect) {
    let info_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),
            Constraint::Length(4),
            Constraint::Length(GLYPH_SIZE as u16 + 2),
            Constraint::Min(3),
        ])
        .split(area);

    let game_state = app.game_state();
    let stats = format!(
        "Score: {}\nLines: {}\nSpeed: {}ms",
        game_state.score, game_state.lines_cleared, game_state.fall_interval_ms
    );
    let stats = Paragraph::new(stats).wrap(Wrap { trim: true });
    f.render_widget(stats, info_layout[1]);

    if app.config.display.show_next_piece {
        if let Some(next) = app.next_preview() {
            render_next_piece(f, &next, info_layout[2]);
        }
    }

    if app.config.display.show_controls {
        let controls = Paragraph::new(
            "Controls:\n\
            ←/→: Move left/right\n\
            ↓: Soft drop\n\
            ↑/Space: Rotate\n\
            Q: Quit",
        )
        .block(Block::default().borders(Borders::TOP))
        .wrap(Wrap { trim: true });
        f.render_widget(controls, info_layout[3]);
    }
}

/// Draws the next piece's current glyph frame inside a titled box.
pub fn render_next_piece(f: &mut Frame, piece: &Piece, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title("Next Shape");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let color = Color::from(piece.color());
    for &(col, row) in piece.frame().cells() {
        let x = inner.left() + col as u16 * CELL_WIDTH;
        let y = inner.top() + row as u16;
        if y >= inner.bottom() {
            continue;
        }
        for dx in 0..CELL_WIDTH {
            if x + dx >= inner.right() {
                continue;
            }
            if let Some(cell) = f.buffer_mut().cell_mut((x + dx, y)) {
                cell.set_symbol("█");
                cell.set_fg(color);
            }
        }
    }
}

/// Helper function to create a centered rect using up certain percentage of the available rect
#[must_use]
pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
