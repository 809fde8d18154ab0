//! slayken_tui - Terminal simulator for Slayken stages and battles

mod app;
mod ui;

use app::{App, AppError};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use slayken_core::EquipmentSlot;
use std::io;
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

const DATA_DIR_ENV: &str = "SLAYKEN_DATA_DIR";
const DEFAULT_DATA_DIR: &str = "slayken_save";
const LOG_FILE: &str = "slayken.log";

fn main() -> Result<(), AppError> {
    let data_dir = std::env::var_os(DATA_DIR_ENV)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR));
    std::fs::create_dir_all(&data_dir)?;

    let _guard = setup_logging(&data_dir);
    let mut app = App::load(&data_dir)?;
    tracing::info!(data_dir = %data_dir.display(), characters = app.roster.len(), "save loaded");

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    result
}

fn run(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> Result<(), AppError> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                match (key.code, key.modifiers) {
                    (KeyCode::Char('q'), _) | (KeyCode::Char('c'), KeyModifiers::CONTROL) => break,
                    (KeyCode::Tab, _) => app.next_tab(),
                    (KeyCode::BackTab, _) => app.prev_tab(),
                    (KeyCode::Char('1'), _) => app.set_tab(0),
                    (KeyCode::Char('2'), _) => app.set_tab(1),
                    (KeyCode::Char('3'), _) => app.set_tab(2),
                    (KeyCode::Char('4'), _) => app.set_tab(3),
                    (KeyCode::Up, _) | (KeyCode::Char('k'), _) => app.on_up(),
                    (KeyCode::Down, _) | (KeyCode::Char('j'), _) => app.on_down(),
                    (KeyCode::PageUp, _) => app.on_scroll_log(true),
                    (KeyCode::PageDown, _) => app.on_scroll_log(false),
                    (KeyCode::Enter, _) => app.on_enter(),
                    (KeyCode::Char('a'), _) => app.attack(),
                    (KeyCode::Char('u'), _) => app.unequip(EquipmentSlot::Weapon),
                    (KeyCode::Char('r'), _) => app.reset(),
                    (KeyCode::Char('?'), _) => app.set_tab(3),
                    _ => {}
                }
            }
        }
    }

    Ok(())
}

/// Log to a file in the data directory; the terminal is in raw mode, so
/// nothing goes to stderr
fn setup_logging(data_dir: &Path) -> WorkerGuard {
    let file_appender = tracing_appender::rolling::never(data_dir, LOG_FILE);
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false);

    tracing_subscriber::registry().with(env_filter).with(file_layer).init();

    guard
}
