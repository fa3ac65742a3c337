//! simq UI - question entry over two result panels
//!
//! Layout:
//! ╔══════════════════════════════════════════════════════════════╗
//! ║  s i m q   have I been asked before?          localhost:8091 ║
//! ╠══════════════════════════════════════════════════════════════╣
//! ║  ▸ how do I reverse a list_                                  ║
//! ╠═══════════════════════════════╦══════════════════════════════╣
//! ║  SIMILAR                      ║  ALL QUESTIONS               ║
//! ║  12.00 ●●●● How to reverse... ║  How to reverse a list?      ║
//! ║   4.00 ●○○○ Sorting a vec...  ║  Sorting a vec in place      ║
//! ╠═══════════════════════════════╩══════════════════════════════╣
//! ║  12:01:07 Error : backend down                               ║
//! ╠══════════════════════════════════════════════════════════════╣
//! ║  ⠹ searching  3 similar        ↵ submit  ⇥ panel  esc quit   ║
//! ╚══════════════════════════════════════════════════════════════╝

mod render;
pub mod theme;

pub use render::render;

use crate::config::Config;
use crate::search::{SimilarResults, SimilarityCoalescer};
use crate::service::Candidate;
use chrono::{DateTime, Local};
use std::collections::VecDeque;
use std::time::Instant;

/// Active panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActivePanel {
    #[default]
    Similar,
    AllQuestions,
}

impl ActivePanel {
    pub fn toggle(&self) -> Self {
        match self {
            ActivePanel::Similar => ActivePanel::AllQuestions,
            ActivePanel::AllQuestions => ActivePanel::Similar,
        }
    }
}

/// Toast notification kind - affects duration and styling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ToastKind {
    #[default]
    Info,
    Success,
    Error,
}

impl ToastKind {
    /// Duration in seconds before toast expires
    pub fn duration_secs(&self) -> u64 {
        match self {
            ToastKind::Info => 3,
            ToastKind::Success => 3,
            ToastKind::Error => 10, // Errors stay longer
        }
    }
}

/// Toast notification
pub struct Toast {
    pub message: String,
    pub created_at: Instant,
    pub kind: ToastKind,
}

impl Toast {
    pub fn new(message: &str) -> Self {
        // Check success indicators before error keywords
        let kind = if message.starts_with('+') {
            ToastKind::Success
        } else if message.contains("failed")
            || message.contains("error")
            || message.contains("Error")
            || message.contains("crashed")
        {
            ToastKind::Error
        } else {
            ToastKind::Info
        };

        Self {
            message: message.to_string(),
            created_at: Instant::now(),
            kind,
        }
    }

    pub fn is_expired(&self) -> bool {
        self.created_at.elapsed().as_secs() >= self.kind.duration_secs()
    }
}

/// One line of the status log
#[derive(Debug, Clone)]
pub struct StatusLine {
    pub at: DateTime<Local>,
    pub text: String,
}

/// Main application state
pub struct App {
    pub server_label: String,
    pub status_history: usize,

    // Question entry
    pub input: String,

    // Similarity search
    pub coalescer: SimilarityCoalescer,
    pub similar: SimilarResults,
    /// Query the displayed results were computed for
    pub similar_query: Option<String>,

    pub all_questions: Vec<String>,
    pub status: VecDeque<StatusLine>,

    // UI state
    pub active_panel: ActivePanel,
    pub similar_scroll: usize,
    pub questions_scroll: usize,
    pub toast: Option<Toast>,
    pub loading_frame: usize,
    pub should_quit: bool,
}

impl App {
    pub fn new(config: &Config, server_label: impl Into<String>) -> Self {
        Self {
            server_label: server_label.into(),
            status_history: config.status_history.max(1),
            input: String::new(),
            coalescer: SimilarityCoalescer::new(),
            similar: SimilarResults::default(),
            similar_query: None,
            all_questions: Vec::new(),
            status: VecDeque::new(),
            active_panel: ActivePanel::default(),
            similar_scroll: 0,
            questions_scroll: 0,
            toast: None,
            loading_frame: 0,
            should_quit: false,
        }
    }

    // ═══════════════════════════════════════════════════════════════════════
    //  INPUT
    // ═══════════════════════════════════════════════════════════════════════

    pub fn input_push(&mut self, c: char) {
        self.input.push(c);
    }

    /// Remove the last character. Returns false when the input was already
    /// empty (nothing changed).
    pub fn input_pop(&mut self) -> bool {
        self.input.pop().is_some()
    }

    /// Returns false when the input was already empty.
    pub fn clear_input(&mut self) -> bool {
        let changed = !self.input.is_empty();
        self.input.clear();
        changed
    }

    // ═══════════════════════════════════════════════════════════════════════
    //  RESULTS
    // ═══════════════════════════════════════════════════════════════════════

    /// Replace the similar panel with a fresh result set.
    pub fn show_similar(&mut self, generation: u64, query: String, candidates: Vec<Candidate>) {
        self.similar = SimilarResults::new(generation, candidates);
        self.similar_query = Some(query);
        self.similar_scroll = 0;
    }

    pub fn set_all_questions(&mut self, questions: Vec<String>) {
        self.all_questions = questions;
        self.questions_scroll = self
            .questions_scroll
            .min(self.all_questions.len().saturating_sub(1));
    }

    /// Best score in the displayed results, used to scale the gauges.
    pub fn top_score(&self) -> f64 {
        self.similar
            .rows()
            .iter()
            .map(|r| r.candidate.score)
            .filter(|s| s.is_finite())
            .fold(0.0, f64::max)
    }

    // ═══════════════════════════════════════════════════════════════════════
    //  STATUS / TOASTS
    // ═══════════════════════════════════════════════════════════════════════

    /// Append a status line, dropping the oldest past the history limit.
    pub fn push_status(&mut self, text: String) {
        self.status.push_back(StatusLine {
            at: Local::now(),
            text,
        });
        while self.status.len() > self.status_history {
            self.status.pop_front();
        }
    }

    pub fn show_toast(&mut self, message: &str) {
        self.toast = Some(Toast::new(message));
    }

    pub fn clear_expired_toast(&mut self) {
        if let Some(ref toast) = self.toast {
            if toast.is_expired() {
                self.toast = None;
            }
        }
    }

    /// Advance the spinner while a search is running
    pub fn tick_loading(&mut self) {
        if self.coalescer.is_busy() {
            self.loading_frame = self.loading_frame.wrapping_add(1);
        }
    }

    // ═══════════════════════════════════════════════════════════════════════
    //  NAVIGATION
    // ═══════════════════════════════════════════════════════════════════════

    pub fn next_panel(&mut self) {
        self.active_panel = self.active_panel.toggle();
    }

    fn active_len(&self) -> usize {
        match self.active_panel {
            ActivePanel::Similar => self.similar.len(),
            ActivePanel::AllQuestions => self.all_questions.len(),
        }
    }

    fn active_scroll_mut(&mut self) -> &mut usize {
        match self.active_panel {
            ActivePanel::Similar => &mut self.similar_scroll,
            ActivePanel::AllQuestions => &mut self.questions_scroll,
        }
    }

    pub fn scroll_down(&mut self, lines: usize) {
        let max = self.active_len().saturating_sub(1);
        let scroll = self.active_scroll_mut();
        *scroll = (*scroll + lines).min(max);
    }

    pub fn scroll_up(&mut self, lines: usize) {
        let scroll = self.active_scroll_mut();
        *scroll = scroll.saturating_sub(lines);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::service::QuestionId;

    fn app() -> App {
        App::new(&Config::default(), "localhost:8091")
    }

    #[test]
    fn test_status_history_is_capped() {
        let config = Config {
            status_history: 3,
            ..Config::default()
        };
        let mut app = App::new(&config, "x");
        for i in 0..5 {
            app.push_status(format!("line {}", i));
        }
        let lines: Vec<&str> = app.status.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(lines, vec!["line 2", "line 3", "line 4"]);
    }

    #[test]
    fn test_input_pop_reports_change() {
        let mut app = app();
        assert!(!app.input_pop());
        app.input_push('a');
        assert!(app.input_pop());
        assert!(app.input.is_empty());
        assert!(!app.clear_input());
    }

    #[test]
    fn test_show_similar_replaces_rows() {
        let mut app = app();
        app.similar_scroll = 4;
        app.show_similar(
            2,
            "ab".into(),
            vec![Candidate {
                id: QuestionId::from(1),
                score: 0.9,
            }],
        );
        assert_eq!(app.similar.generation(), 2);
        assert_eq!(app.similar.len(), 1);
        assert_eq!(app.similar_scroll, 0);
        assert_eq!(app.similar_query.as_deref(), Some("ab"));
        assert_eq!(app.top_score(), 0.9);
    }

    #[test]
    fn test_scroll_is_clamped_to_panel() {
        let mut app = app();
        app.next_panel();
        app.set_all_questions(vec!["a".into(), "b".into(), "c".into()]);
        app.scroll_down(10);
        assert_eq!(app.questions_scroll, 2);
        app.scroll_up(1);
        assert_eq!(app.questions_scroll, 1);
        app.set_all_questions(vec!["a".into()]);
        assert_eq!(app.questions_scroll, 0);
    }

    #[test]
    fn test_toast_kinds() {
        assert_eq!(Toast::new("+ Added: x").kind, ToastKind::Success);
        assert_eq!(Toast::new("Submit failed: x").kind, ToastKind::Error);
        assert_eq!(Toast::new("hello").kind, ToastKind::Info);
    }
}
