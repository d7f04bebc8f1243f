//! build_tui - Interactive character build planner

mod app;
mod config;
mod ui;

use anyhow::Context;
use app::{App, InputMode, Tab};
use build_core::{Catalog, CharacterBuild, Favorites, FileStore, Persistence};
use config::TuiConfig;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::Backend, backend::CrosstermBackend, Terminal};
use std::io;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = TuiConfig::from_env().context("failed to load configuration")?;
    setup_logging(&config.log_dir())?;

    let store = FileStore::new(config.data_dir());
    info!("Data directory: {}", store.dir().display());
    let persistence = Persistence::spawn(Arc::new(store));

    let build = CharacterBuild::load(persistence.clone(), config.constants.clone()).await;
    let mut favorites = Favorites::new(persistence.clone(), config.constants.favorites_key.clone());
    favorites.initialize().await;

    let catalog_dir = config.catalog_dir();
    let catalog = match Catalog::load_dir(&catalog_dir) {
        Ok(catalog) => catalog,
        Err(e) => {
            warn!("Catalog unavailable, continuing without items: {}", e);
            Catalog::new()
        }
    };

    let mut app = App::new(build, favorites, catalog, persistence);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    app.shutdown().await;
    result
}

fn setup_logging(log_dir: &Path) -> anyhow::Result<()> {
    std::fs::create_dir_all(log_dir)
        .with_context(|| format!("failed to create log directory {}", log_dir.display()))?;

    let file_appender = tracing_appender::rolling::never(log_dir, "build_planner.log");
    let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::INFO.into());

    // The terminal belongs to the UI, so logs only go to the file
    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking_file)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .init();

    // Keep the writer alive for the whole process
    std::mem::forget(guard);

    info!("Log file: {}/build_planner.log", log_dir.display());
    Ok(())
}

fn run<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> anyhow::Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if !handle_key(app, key) {
                    return Ok(());
                }
            }
        }
    }
}

/// Dispatch one key press. Returns false when the user asked to quit.
fn handle_key(app: &mut App, key: KeyEvent) -> bool {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return false;
    }

    match app.input_mode {
        InputMode::Search => match key.code {
            KeyCode::Char(c) => app.push_search_char(c),
            KeyCode::Backspace => app.pop_search_char(),
            KeyCode::Enter | KeyCode::Esc => app.finish_search(),
            _ => {}
        },
        InputMode::StatEntry => match key.code {
            KeyCode::Char(c) => app.push_stat_char(c),
            KeyCode::Backspace => {
                app.stat_input.pop();
            }
            KeyCode::Enter => app.commit_stat_entry(),
            KeyCode::Esc => app.cancel_input(),
            _ => {}
        },
        InputMode::ConfirmReset => match key.code {
            KeyCode::Char('y') | KeyCode::Char('Y') => app.confirm_reset(),
            _ => app.cancel_reset(),
        },
        InputMode::Normal => match key.code {
            KeyCode::Char('q') => return false,
            KeyCode::Tab => app.next_tab(),
            KeyCode::BackTab => app.prev_tab(),
            KeyCode::Char(c @ '1'..='7') => app.set_tab(c as usize - '1' as usize),
            KeyCode::Up | KeyCode::Char('k') => app.on_up(),
            KeyCode::Down | KeyCode::Char('j') => app.on_down(),
            KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('-') => app.on_left(),
            KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('+') => app.on_right(),
            KeyCode::Enter => app.on_enter(),
            KeyCode::Char('r') => app.request_reset(),
            KeyCode::Char('f') => app.toggle_favorite(),
            KeyCode::Char('e') => app.toggle_equippable(),
            KeyCode::Char('/') => app.start_search(),
            KeyCode::Char('?') => app.set_tab(Tab::all().len() - 1),
            _ => {}
        },
    }
    true
}
