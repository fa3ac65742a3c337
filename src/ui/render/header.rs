use crate::ui::theme::Theme;
use crate::ui::App;
use crate::util::fit_width;
use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

pub(super) fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let spans = vec![
        Span::styled(
            format!("   {}", Theme::LOGO),
            Style::default()
                .fg(Theme::WHITE)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("   {}", Theme::TAGLINE), Theme::text_dim()),
    ];

    let header = Paragraph::new(vec![Line::from(""), Line::from(spans)])
        .style(Style::default().bg(Theme::BG));
    frame.render_widget(header, area);

    // Server on the right of the logo line
    let server = fit_width(&app.server_label, (area.width / 2) as usize);
    let server_line = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(format!("{}  ", server), Theme::text_muted())),
    ])
    .alignment(Alignment::Right);
    frame.render_widget(server_line, area);
}
