mod footer;
mod header;
mod main;
mod toast;

#[cfg(test)]
mod tests;

use crate::ui::theme::Theme;
use crate::ui::App;
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::Style,
    widgets::Block,
    Frame,
};

use footer::render_footer;
use header::render_header;
use main::{render_input, render_panels, render_status};
use toast::render_toast;

/// Lines of the status log shown under the panels
const STATUS_LINES: u16 = 4;

/// Main render function
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    // Clear with dark background
    frame.render_widget(Block::default().style(Style::default().bg(Theme::BG)), area);

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),                // Header (logo)
            Constraint::Length(3),                // Question entry
            Constraint::Min(6),                   // Similar | All questions
            Constraint::Length(STATUS_LINES + 2), // Status log
            Constraint::Length(1),                // Footer
        ])
        .split(area);

    render_header(frame, layout[0], app);
    render_input(frame, layout[1], app);
    render_panels(frame, layout[2], app);
    render_status(frame, layout[3], app);
    render_footer(frame, layout[4], app);

    if let Some(toast) = &app.toast {
        render_toast(frame, toast);
    }
}
