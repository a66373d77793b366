use {
    super::layout::{render_layout, ViewState},
    crate::stream::StreamHandle,
    crossterm::event::{Event, KeyCode, KeyEventKind},
    ratatui::{backend::CrosstermBackend, Terminal},
    std::time::Duration,
};

const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// What a key press asks the loop to do
#[derive(Debug, PartialEq, Eq)]
pub enum KeyAction {
    None,
    TogglePause,
    Quit,
}

/// Apply a key press to the view state
pub fn handle_key(view: &mut ViewState, code: KeyCode) -> KeyAction {
    if view.editing_query {
        match code {
            KeyCode::Enter | KeyCode::Esc => view.editing_query = false,
            KeyCode::Backspace => {
                view.query.pop();
            }
            KeyCode::Char(c) => view.query.push(c),
            _ => {}
        }
        return KeyAction::None;
    }

    match code {
        KeyCode::Char('q') | KeyCode::Esc => KeyAction::Quit,
        KeyCode::Char('p') | KeyCode::Char(' ') => KeyAction::TogglePause,
        KeyCode::Char('/') => {
            view.editing_query = true;
            KeyAction::None
        }
        _ => KeyAction::None,
    }
}

/// Run the TUI event loop
///
/// Renders the latest published snapshot and forwards pause/resume to the
/// stream controller. The search query only affects what is displayed.
pub async fn run_ui(handle: StreamHandle) -> Result<(), Box<dyn std::error::Error>> {
    let stdout = std::io::stdout();
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    crossterm::terminal::enable_raw_mode()?;

    // Alternate screen keeps stderr logs off the dashboard
    crossterm::execute!(
        std::io::stdout(),
        crossterm::terminal::EnterAlternateScreen,
        crossterm::cursor::Hide
    )?;
    terminal.clear()?;

    let mut view = ViewState::default();

    loop {
        if crossterm::event::poll(POLL_INTERVAL)? {
            if let Event::Key(key) = crossterm::event::read()? {
                if key.kind == KeyEventKind::Press {
                    match handle_key(&mut view, key.code) {
                        KeyAction::Quit => break,
                        KeyAction::TogglePause => {
                            if let Err(e) = handle.toggle().await {
                                log::error!("Failed to toggle stream: {}", e);
                                break;
                            }
                        }
                        KeyAction::None => {}
                    }
                }
            }
        }

        let snapshot = handle.latest();
        let area = terminal.size()?;
        terminal.draw(|f| render_layout(f, area, &snapshot, &view))?;
    }

    crossterm::execute!(
        std::io::stdout(),
        crossterm::terminal::LeaveAlternateScreen,
        crossterm::cursor::Show
    )?;
    crossterm::terminal::disable_raw_mode()?;
    Ok(())
}
