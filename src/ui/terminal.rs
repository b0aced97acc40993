use std::io::{self, Stdout};
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;

use crate::store::StudentStore;

use super::app::App;

/// Spin up the terminal backend, enter the draw loop, and keep processing input
/// until the user quits. The terminal is restored even when the loop fails.
pub fn run_app<S: StudentStore>(app: &mut App<S>) -> Result<()> {
    enable_raw_mode().context("failed to enable raw mode")?;
    let mut terminal = undo_on_err(enter_alternate_screen(), || {
        let _ = disable_raw_mode();
    })?;

    let result = event_loop(&mut terminal, app);

    cleanup_terminal(&mut terminal)?;
    result
}

/// What a single key press means to the event loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum KeyAction {
    OpenStudents,
    Quit,
    Forward(KeyCode),
    Ignore,
}

/// Ctrl+L and Ctrl+C are the only chords; every other Ctrl combination is
/// dropped so it never reaches the form as a plain character.
fn classify_key(key_event: KeyEvent) -> KeyAction {
    if key_event.kind != KeyEventKind::Press {
        return KeyAction::Ignore;
    }

    if key_event.modifiers.contains(KeyModifiers::CONTROL) {
        return match key_event.code {
            KeyCode::Char('l') | KeyCode::Char('L') => KeyAction::OpenStudents,
            KeyCode::Char('c') | KeyCode::Char('C') => KeyAction::Quit,
            _ => KeyAction::Ignore,
        };
    }

    KeyAction::Forward(key_event.code)
}

fn enter_alternate_screen() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).context("failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend).context("failed to create terminal backend")
}

/// Run `undo` when `result` is an error, then hand the result back.
fn undo_on_err<T>(result: Result<T>, undo: impl FnOnce()) -> Result<T> {
    if result.is_err() {
        undo();
    }
    result
}

fn event_loop<S: StudentStore>(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    app: &mut App<S>,
) -> Result<()> {
    loop {
        terminal
            .draw(|frame| app.draw(frame))
            .context("failed to draw frame")?;

        if !event::poll(Duration::from_millis(250)).context("event polling failed")? {
            continue;
        }

        let Event::Key(key_event) = event::read().context("failed to read event")? else {
            continue;
        };

        match classify_key(key_event) {
            KeyAction::OpenStudents => app.handle_ctrl_l(),
            KeyAction::Quit => return Ok(()),
            KeyAction::Forward(code) => {
                if app.handle_key(code) {
                    return Ok(());
                }
            }
            KeyAction::Ignore => {}
        }
    }
}

fn cleanup_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<()> {
    disable_raw_mode().context("failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("failed to leave alternate screen")?;
    terminal
        .show_cursor()
        .context("failed to restore cursor visibility")
}
