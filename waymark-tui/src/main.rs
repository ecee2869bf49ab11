use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{io, time::Duration};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use waymark_lib::{AppService, ConfigLocator, LocationProvider};

mod app; // Application state
mod ui; // UI rendering logic

use crate::app::App;

fn main() -> Result<()> {
    init_logging();

    // Initialize the library service
    let app_service = match AppService::initialize() {
        Ok(service) => service,
        Err(err) => {
            error!(error = ?err, "failed to initialize application service");
            return Err(err);
        }
    };

    // No map without a center point: a failed position lookup ends the
    // run before the terminal is touched.
    let locator = ConfigLocator::new(app_service.config.location.clone());
    let origin = match locator.current_position() {
        Ok(point) => point,
        Err(err) => {
            error!(error = %err, "could not determine a starting position");
            return Err(err.into());
        }
    };
    info!(
        lat = origin.latitude,
        lng = origin.longitude,
        "map centered on current position"
    );

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app and run it
    let mut app = App::new(app_service, origin);
    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("Error: {err:?}"); // Print errors to stderr
    }

    Ok(())
}

// Logs go to stderr so the alternate screen stays clean. RUST_LOG
// overrides the default filter.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn,waymark_lib=info,waymark_tui=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(false)
        .with_timer(tracing_subscriber::fmt::time::ChronoLocal::rfc_3339())
        .compact()
        .init();
}

fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    loop {
        // Drop expired transient state before drawing
        app.refresh();

        terminal.draw(|f| ui::render_ui(f, app))?;

        // Poll for events with a timeout (e.g., 250ms)
        // This allows the app to potentially update state even without input
        if event::poll(Duration::from_millis(250))? {
            // Handler errors are recoverable: they land in the status bar
            // instead of ending the session.
            let handled = match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => app.handle_key_event(key),
                Event::Mouse(mouse) => app.handle_mouse_event(mouse),
                _ => Ok(()),
            };
            if let Err(err) = handled {
                app.set_error(err.to_string());
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
