pub mod background;
pub mod input;
pub mod messages;
pub mod runtime;


#[allow(unused_imports)]
pub use messages::BackgroundMessage;
pub use runtime::run_tui;

use crate::service::QuestionService;
use std::sync::mpsc;
use std::sync::Arc;

/// Handles the UI thread passes to input and message handlers so they can
/// start background work.
pub struct RuntimeContext<'a> {
    pub service: &'a Arc<dyn QuestionService>,
    pub tx: &'a mpsc::Sender<messages::BackgroundMessage>,
}
