use super::render;
use crate::config::Config;
use crate::search::Resolution;
use crate::service::{Candidate, QuestionId};
use crate::ui::App;
use ratatui::backend::TestBackend;
use ratatui::Terminal;

fn render_to_string(app: &App, width: u16, height: u16) -> String {
    let mut terminal = Terminal::new(TestBackend::new(width, height)).unwrap();
    terminal.draw(|f| render(f, app)).unwrap();
    let buffer = terminal.backend().buffer();
    let mut out = String::new();
    for y in 0..height {
        for x in 0..width {
            out.push_str(buffer[(x, y)].symbol());
        }
        out.push('\n');
    }
    out
}

fn app() -> App {
    App::new(&Config::default(), "http://localhost:8091/")
}

#[test]
fn test_unresolved_row_shows_only_score() {
    let mut app = app();
    app.show_similar(
        1,
        "x".into(),
        vec![Candidate {
            id: QuestionId::from(7),
            score: 0.5,
        }],
    );
    let screen = render_to_string(&app, 100, 24);
    assert!(screen.contains("0.50"));
    assert!(!screen.contains("Error"));
}

#[test]
fn test_resolved_row_shows_text() {
    let mut app = app();
    app.show_similar(
        3,
        "rev".into(),
        vec![
            Candidate {
                id: QuestionId::from(1),
                score: 12.0,
            },
            Candidate {
                id: QuestionId::from(2),
                score: 4.0,
            },
        ],
    );
    app.similar.apply_resolution(Resolution {
        generation: 3,
        row: 1,
        text: "Sorting a vec in place".into(),
    });
    let screen = render_to_string(&app, 100, 24);
    assert!(screen.contains("12.00"));
    assert!(screen.contains("4.00"));
    assert!(screen.contains("Sorting a vec in place"));
    assert!(screen.contains("2 similar · 1 resolved"));
}

#[test]
fn test_status_and_question_list_are_drawn() {
    let mut app = app();
    app.set_all_questions(vec!["How to reverse a list?".into()]);
    app.push_status("Error : backend down".into());
    let screen = render_to_string(&app, 100, 24);
    assert!(screen.contains("How to reverse a list?"));
    assert!(screen.contains("Error : backend down"));
    assert!(screen.contains("ALL QUESTIONS · 1"));
}

#[test]
fn test_busy_state_is_visible() {
    let mut app = app();
    app.input = "ab".into();
    app.coalescer.trigger("ab");
    app.coalescer.trigger("abc");
    let screen = render_to_string(&app, 120, 24);
    assert!(screen.contains("searching (+1 queued)"));
}

#[test]
fn test_tiny_terminal_does_not_panic() {
    let mut app = app();
    app.input = "a very long question that will not fit anywhere".into();
    app.show_toast("Submit failed: backend down");
    render_to_string(&app, 10, 5);
}
