#![warn(clippy::all, clippy::pedantic)]

use std::io;
use std::os::fd::AsRawFd;
use std::time::{Duration, Instant};

use anyhow::Context;
use blockdrop::Time;
use blockdrop::app::{App, AppResult};
use blockdrop::config::{self, Config};
use blockdrop::{shapes, ui};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use log::{debug, error, info};
use ratatui::{Terminal, prelude::*};

const LOG_PATH: &str = "blockdrop.log";

fn main() -> AppResult<()> {
    // Create log file and redirect stderr to it so logging never touches the UI
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(LOG_PATH)
        .with_context(|| format!("failed to create log file {LOG_PATH}"))?;

    let stderr_fd = std::io::stderr().as_raw_fd();
    let log_file_fd = log_file.as_raw_fd();

    // Safety: We're redirecting stderr to our log file using standard POSIX operations
    unsafe {
        libc::dup2(log_file_fd, stderr_fd);
    }

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .format_module_path(false)
        .init();

    info!("Starting Blockdrop");

    shapes::validate_standard().context("built-in shape catalog is invalid")?;

    let config = match config::loader::load_config_from_file() {
        Ok(config) => {
            info!("Configuration loaded successfully");
            config
        }
        Err(e) => {
            error!("Failed to load configuration: {e}");
            Config::default()
        }
    };

    // Terminal initialization
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, App::new(config));

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = &res {
        error!("Game error: {err:?}");
    }

    res
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, mut app: App) -> AppResult<()> {
    let frame_rate = Duration::from_millis(app.config.timing.frame_ms);
    let poll_timeout = Duration::from_millis(app.config.timing.input_poll_ms);
    let mut last_frame = Instant::now();

    // Flush anything typed before the UI came up
    while event::poll(Duration::from_millis(0))? {
        let _ = event::read()?;
    }

    debug!("Entering main loop");

    loop {
        if app.should_quit {
            info!("Quitting");
            return Ok(());
        }

        if last_frame.elapsed() >= frame_rate {
            last_frame = Instant::now();

            let delta_ms = {
                let mut time = app.world.resource_mut::<Time>();
                time.update();
                time.delta_millis()
            };
            app.on_tick(delta_ms);

            terminal
                .draw(|f| ui::render(f, &mut app))
                .context("failed to draw frame")?;
        }

        // At most one key event per pass; the engine consumes one intent per tick
        if event::poll(poll_timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Release {
                    continue;
                }
                debug!("Key event: {key:?}");
                app.handle_key(key.code);
            }
        }
    }
}
