pub mod app;
pub mod theme;
pub mod ui;

pub use app::App;

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use scl90_core::models::evaluation::Evaluation;

const TICK: Duration = Duration::from_millis(250);

/// Run the form until it is submitted or abandoned. Returns the validated
/// evaluation, or `None` when the user quit.
pub fn run_form(mut app: App) -> eyre::Result<Option<Evaluation>> {
    // Init terminal (sets up panic hooks automatically)
    let mut terminal = ratatui::init();
    tracing::debug!("form opened");
    app.set_flash(
        "Rate each item from 0 (not at all) to 4 (extremely)",
        app::FlashKind::Info,
    );

    let result = (|| -> eyre::Result<()> {
        while !app.should_quit {
            terminal.draw(|frame| ui::draw(frame, &mut app))?;

            if event::poll(TICK)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        handle_key_event(&mut app, key);
                    }
                }
            } else {
                app.tick();
            }
        }
        Ok(())
    })();

    ratatui::restore();
    result?;

    if app.submitted.is_none() {
        tracing::info!("form closed without submitting");
    }
    Ok(app.submitted)
}

pub fn handle_key_event(app: &mut App, key: KeyEvent) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    if key.code != KeyCode::Esc {
        app.cancel_quit();
    }
    match key.code {
        KeyCode::Char('c') if ctrl => app.should_quit = true,
        KeyCode::Char('s') if ctrl => app.submit(),
        KeyCode::F(2) => app.submit(),
        KeyCode::Esc => app.request_quit(),
        KeyCode::Tab | KeyCode::Enter => app.next_field(),
        KeyCode::BackTab => app.previous_field(),
        KeyCode::Up => app.move_up(),
        KeyCode::Down => app.move_down(),
        KeyCode::Left => app.move_left(),
        KeyCode::Right => app.move_right(),
        KeyCode::Backspace | KeyCode::Delete => app.backspace(),
        KeyCode::Char(c) if !ctrl => app.input_char(c),
        _ => {}
    }
}
