use super::STATUS_LINES;
use crate::ui::theme::{dot_gauge, Theme};
use crate::ui::{ActivePanel, App};
use crate::util::{fit_width, tail_width};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

const GAUGE_DOTS: usize = 4;

fn panel_block(title: &str, active: bool) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .border_style(if active {
            Theme::border_active()
        } else {
            Theme::border()
        })
        .title(Span::styled(format!(" {} ", title), Theme::title()))
}

pub(super) fn render_input(frame: &mut Frame, area: Rect, app: &App) {
    let block = panel_block("QUESTION", true);
    let inner = block.inner(area);

    let prompt = format!(" {} ", Theme::KEY_PROMPT);
    let room = (inner.width as usize).saturating_sub(prompt.width() + 1);
    let visible = tail_width(&app.input, room);

    let line = if app.input.is_empty() {
        Line::from(vec![
            Span::styled(prompt.clone(), Theme::text_muted()),
            Span::styled("type a question, ↵ to submit", Theme::text_dim()),
        ])
    } else {
        Line::from(vec![
            Span::styled(prompt.clone(), Theme::text_muted()),
            Span::styled(visible, Theme::text()),
        ])
    };

    frame.render_widget(Paragraph::new(line).block(block), area);

    if inner.width > 0 && inner.height > 0 {
        let typed = if app.input.is_empty() { 0 } else { visible.width() };
        let x = inner.x + ((prompt.width() + typed) as u16).min(inner.width - 1);
        frame.set_cursor_position((x, inner.y));
    }
}

pub(super) fn render_panels(frame: &mut Frame, area: Rect, app: &App) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);

    render_similar(frame, columns[0], app);
    render_all_questions(frame, columns[1], app);
}

fn render_similar(frame: &mut Frame, area: Rect, app: &App) {
    let title = match &app.similar_query {
        Some(q) if !q.is_empty() => format!("SIMILAR to \"{}\"", fit_width(q, 24)),
        _ => "SIMILAR".to_string(),
    };
    let block = panel_block(&title, app.active_panel == ActivePanel::Similar);
    let inner = block.inner(area);
    let width = inner.width as usize;

    let lines: Vec<Line> = if app.similar.is_empty() {
        let hint = if app.similar_query.is_some() {
            "no similar questions"
        } else {
            "waiting for first search…"
        };
        vec![Line::from(Span::styled(format!(" {}", hint), Theme::text_dim()))]
    } else {
        let top = app.top_score();
        app.similar
            .rows()
            .iter()
            .skip(app.similar_scroll)
            .take(inner.height as usize)
            .map(|row| {
                let score = format!(" {:>6} ", row.display_score());
                let gauge = format!("{} ", dot_gauge(row.candidate.score, top, GAUGE_DOTS));
                let mut spans = vec![
                    Span::styled(score.clone(), Theme::text()),
                    Span::styled(gauge.clone(), Theme::text_dim()),
                ];
                if let Some(text) = &row.text {
                    let room = width.saturating_sub(score.width() + gauge.width());
                    spans.push(Span::styled(fit_width(text, room), Theme::text()));
                }
                Line::from(spans)
            })
            .collect()
    };

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_all_questions(frame: &mut Frame, area: Rect, app: &App) {
    let title = format!("ALL QUESTIONS {} {}", Theme::DOT_SEPARATOR, app.all_questions.len());
    let block = panel_block(&title, app.active_panel == ActivePanel::AllQuestions);
    let inner = block.inner(area);
    let room = (inner.width as usize).saturating_sub(3);

    let lines: Vec<Line> = app
        .all_questions
        .iter()
        .skip(app.questions_scroll)
        .take(inner.height as usize)
        .map(|q| {
            Line::from(vec![
                Span::styled(format!(" {} ", Theme::DOT_SEPARATOR), Theme::text_dim()),
                Span::styled(fit_width(q, room), Theme::text_muted()),
            ])
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

pub(super) fn render_status(frame: &mut Frame, area: Rect, app: &App) {
    let block = panel_block("STATUS", false);
    let inner = block.inner(area);
    let room = (inner.width as usize).saturating_sub(11);

    let skip = app.status.len().saturating_sub(STATUS_LINES as usize);
    let lines: Vec<Line> = app
        .status
        .iter()
        .skip(skip)
        .map(|line| {
            let style = if line.text.starts_with("Error") {
                Style::default().fg(Theme::RED)
            } else {
                Theme::text_muted()
            };
            Line::from(vec![
                Span::styled(format!(" {} ", line.at.format("%H:%M:%S")), Theme::text_dim()),
                Span::styled(fit_width(&line.text, room), style),
            ])
        })
        .collect();

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
