//! Live terminal view of Monte Carlo trials as they accumulate.
//!
//! Feature-gated behind `tui`. Launch with `--tui` on the CLI.

mod controls;
mod layout;
/// Simulation runner and application state.
pub mod runtime;
mod style;

use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use crate::config::ScenarioConfig;
use runtime::App;

/// Poll interval while trials are paused or complete.
const IDLE_POLL: Duration = Duration::from_millis(250);

/// Raw-mode alternate screen; the user's terminal comes back on drop.
struct Screen {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl Screen {
    fn enter() -> io::Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        if let Err(e) = execute!(stdout, EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(e);
        }
        match Terminal::new(CrosstermBackend::new(stdout)) {
            Ok(terminal) => Ok(Self { terminal }),
            Err(e) => {
                let _ = execute!(io::stdout(), LeaveAlternateScreen);
                let _ = disable_raw_mode();
                Err(e)
            }
        }
    }
}

impl Drop for Screen {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(self.terminal.backend_mut(), LeaveAlternateScreen);
        let _ = self.terminal.show_cursor();
    }
}

/// Watches the trials of a validated scenario accumulate.
///
/// The inventory is loaded first so input file errors print on the normal
/// screen.
pub fn run(scenario: ScenarioConfig, label: &str) {
    let mut app = App::new(scenario, label).unwrap_or_else(|e| {
        eprintln!("error: {e}");
        std::process::exit(1);
    });

    let outcome = Screen::enter().and_then(|mut screen| event_loop(&mut screen.terminal, &mut app));
    if let Err(e) = outcome {
        eprintln!("error: terminal view failed: {e}");
        std::process::exit(1);
    }
}

/// Draws, waits for a key or the next trial deadline, then runs one trial.
fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> io::Result<()> {
    while !app.quit {
        terminal.draw(|frame| layout::render(frame, app))?;

        let running = !app.paused && !app.is_finished();
        let wait = if running {
            let interval = Duration::from_millis(app.tick_interval_ms());
            (app.last_tick + interval).saturating_duration_since(Instant::now())
        } else {
            IDLE_POLL
        };

        if event::poll(wait)? {
            if let Event::Key(key) = event::read()? {
                controls::handle_key(app, key);
            }
            continue;
        }

        if running {
            app.tick();
            app.last_tick = Instant::now();
        }
    }
    Ok(())
}
