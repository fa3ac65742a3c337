use crate::search::SearchState;
use crate::ui::theme::Theme;
use crate::ui::App;
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

const HINTS: [(&str, &str); 4] = [("↵", "submit"), ("⇥", "panel"), ("^r", "reload"), ("esc", "quit")];

pub(super) fn render_footer(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![Span::styled("  ", Style::default())];

    // Search state: spinner while a search is outstanding
    match app.coalescer.state() {
        SearchState::Idle => {
            spans.push(Span::styled(
                format!("{} ", Theme::BULLET_EMPTY),
                Theme::text_dim(),
            ));
        }
        _ => {
            let frame_char =
                Theme::SPINNER_BRAILLE[app.loading_frame % Theme::SPINNER_BRAILLE.len()];
            spans.push(Span::styled(format!("{} ", frame_char), Theme::text()));
        }
    }
    spans.push(Span::styled(app.coalescer.state().label(), Theme::text_muted()));

    let resolved = app.similar.resolved_count();
    spans.push(Span::styled(
        format!(
            "  {} similar {} {} resolved",
            app.similar.len(),
            Theme::DOT_SEPARATOR,
            resolved
        ),
        Theme::text_dim(),
    ));

    // Spacer before key hints
    let status_len: usize = spans.iter().map(|s| s.content.chars().count()).sum();
    let hints_len: usize = HINTS
        .iter()
        .map(|(k, label)| k.chars().count() + label.len() + 4)
        .sum();
    let spacer_len = (area.width as usize).saturating_sub(status_len + hints_len);
    if spacer_len > 0 {
        spans.push(Span::styled(" ".repeat(spacer_len), Style::default()));
    }

    for (key, label) in HINTS {
        spans.push(Span::styled(format!(" {} ", key), Theme::key()));
        spans.push(Span::styled(format!(" {} ", label), Theme::text_muted()));
    }

    let footer = Paragraph::new(Line::from(spans)).style(Style::default().bg(Theme::GREY_800));
    frame.render_widget(footer, area);
}
