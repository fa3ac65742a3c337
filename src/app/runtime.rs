//! TUI runtime for simq
//!
//! All UI state, including the similarity coalescer, lives on the thread
//! running [`run_loop`]. Background tasks only talk to it through the message
//! channel, so none of that state needs a lock.

use crate::app::messages::BackgroundMessage;
use crate::app::{background, input, RuntimeContext};
use crate::config::Config;
use crate::service::QuestionService;
use crate::ui::{self, App};
use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use std::io;
use std::sync::mpsc;
use std::sync::Arc;
use std::time::Duration;

/// Run the TUI application against `service`
pub async fn run_tui(config: Config, service: Arc<dyn QuestionService>, server_label: String) -> Result<()> {
    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(&config, server_label);

    // Create channel for background tasks
    let (tx, rx) = mpsc::channel::<BackgroundMessage>();

    let result = {
        let ctx = RuntimeContext {
            service: &service,
            tx: &tx,
        };

        background::start_session(&mut app, &ctx);

        run_loop(&mut terminal, &mut app, &rx, &ctx)
    };

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    tracing::info!(
        searches = app.coalescer.issued(),
        "session finished"
    );

    result
}

/// Main event loop with background message handling
fn run_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    rx: &mpsc::Receiver<BackgroundMessage>,
    ctx: &RuntimeContext,
) -> Result<()> {
    loop {
        app.clear_expired_toast();

        // Advance spinner animation
        app.tick_loading();

        // Check for background messages (non-blocking)
        background::drain_messages(app, rx, ctx);

        terminal.draw(|f| ui::render(f, app))?;

        // Poll for events with fast timeout (snappy animations)
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                input::handle_key_event(app, key, ctx)?;
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
