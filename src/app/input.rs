//! Input handling for the simq TUI
//!
//! Every change to the question text asks for a similarity search. The
//! coalescer decides whether that starts a request or queues a rerun.

use crate::app::background::{check_similarity, refresh_all_questions, submit_question};
use crate::app::RuntimeContext;
use crate::ui::App;
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

const PAGE: usize = 10;

/// Main key event handler
pub fn handle_key_event(app: &mut App, key: KeyEvent, ctx: &RuntimeContext) -> Result<()> {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Esc => app.should_quit = true,
        KeyCode::Char('c') if ctrl => app.should_quit = true,
        KeyCode::Char('r') if ctrl => refresh_all_questions(ctx),
        KeyCode::Char('u') if ctrl => {
            if app.clear_input() {
                check_similarity(app, ctx);
            }
        }
        KeyCode::Enter => submit_question(app, ctx),
        KeyCode::Backspace => {
            if app.input_pop() {
                check_similarity(app, ctx);
            }
        }
        KeyCode::Char(c) if !ctrl => {
            app.input_push(c);
            check_similarity(app, ctx);
        }
        KeyCode::Tab | KeyCode::BackTab => app.next_panel(),
        KeyCode::Down => app.scroll_down(1),
        KeyCode::Up => app.scroll_up(1),
        KeyCode::PageDown => app.scroll_down(PAGE),
        KeyCode::PageUp => app.scroll_up(PAGE),
        _ => {}
    }
    Ok(())
}
